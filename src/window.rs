use std::num::NonZeroU32;
use std::rc::Rc;

use softbuffer::{Context, Surface};
use winit::{
	dpi::PhysicalSize,
	event::{Event, WindowEvent},
	event_loop::{EventLoop, EventLoopWindowTarget},
	window::{Window, WindowBuilder},
};

use crate::error::BoothError;
use crate::frame::RgbFrame;

pub const TITLE: &str = "photobooth";

/// The preview window. A softbuffer surface on a winit window; frames get
/// stretched into whatever size the window currently is and presented.
pub struct BoothWindow {
	pub event_loop: Option<EventLoop<()>>,
	pub window: Rc<Window>,

	// softbuffer wants the context alive as long as the surface is
	_context: Context<Rc<Window>>,
	surface: Surface<Rc<Window>, Rc<Window>>,
	surface_size: PhysicalSize<u32>,
}

impl BoothWindow {
	pub fn build(width: u32, height: u32) -> Result<Self, BoothError> {
		let event_loop = EventLoop::new()?;
		let window = Rc::new(
			WindowBuilder::new()
				.with_title(TITLE)
				.with_inner_size(PhysicalSize::new(width, height))
				.build(&event_loop)?,
		);

		let context = Context::new(window.clone())?;
		let surface = Surface::new(&context, window.clone())?;

		let mut this = BoothWindow {
			event_loop: Some(event_loop),
			window,
			_context: context,
			surface,
			surface_size: PhysicalSize::new(0, 0),
		};
		this.resize_surface(this.window.inner_size())?;
		Ok(this)
	}

	/// Take the event loop, leaving `None` in its place. This is neccesary
	/// 'cause `run` wants it by value while everything else lives in here.
	/// If there's no loop it panics
	pub fn take_el(&mut self) -> EventLoop<()> {
		self.event_loop.take().unwrap()
	}

	fn resize_surface(&mut self, size: PhysicalSize<u32>) -> Result<(), BoothError> {
		let (Some(width), Some(height)) =
			(NonZeroU32::new(size.width), NonZeroU32::new(size.height))
		else {
			// minimized; remember so present skips the tick
			self.surface_size = PhysicalSize::new(0, 0);
			return Ok(());
		};

		self.surface.resize(width, height)?;
		self.surface_size = size;
		Ok(())
	}

	/// Resize and close handling every tick wants regardless of state.
	pub fn common_events(&mut self, event: &Event<()>, el: &EventLoopWindowTarget<()>) {
		match event {
			Event::WindowEvent {
				event: WindowEvent::Resized(phys),
				..
			} => {
				if let Err(e) = self.resize_surface(*phys) {
					log::error!("surface resize failed: {e}");
					el.exit();
				}
				self.window.request_redraw();
			}

			Event::WindowEvent {
				event: WindowEvent::CloseRequested,
				..
			} => el.exit(),

			_ => (),
		}
	}

	/// Nearest-neighbour stretch of the frame into the surface and flip it
	/// onto the screen. Softbuffer pixels are 0RGB in a u32.
	pub fn present(&mut self, frame: &RgbFrame) -> Result<(), BoothError> {
		let width = self.surface_size.width as usize;
		let height = self.surface_size.height as usize;
		if width == 0 || height == 0 || frame.width == 0 || frame.height == 0 {
			return Ok(());
		}

		let mut buffer = self.surface.buffer_mut()?;
		for y in 0..height {
			let sy = y * frame.height / height;
			for x in 0..width {
				let sx = x * frame.width / width;
				let idx = (sy * frame.width + sx) * 3;

				buffer[y * width + x] = u32::from_be_bytes([
					0,
					frame.data[idx],
					frame.data[idx + 1],
					frame.data[idx + 2],
				]);
			}
		}

		buffer.present()?;
		Ok(())
	}
}
