use std::path::Path;

use clap::Parser;
use winit::{
	event::{ElementState, Event, KeyEvent, WindowEvent},
	event_loop::ControlFlow,
	keyboard::{Key, NamedKey},
};

mod booth;
mod capture;
mod chain;
mod dispatch;
mod effect;
mod error;
mod filter;
mod frame;
mod prompt;
mod save;
mod window;

use booth::Booth;
use capture::{CameraSource, FrameSource, StillSource};
use chain::EffectChain;
use dispatch::{dispatch, Action, KeyPress};
use error::BoothError;
use save::FrameSaver;
use window::BoothWindow;

const KEY_HELP: &str = "\
keys:
  n negate            g grayscale
  v flip vertical     h flip horizontal
  a gaussian blur     c gradient magnitude
  l laplace           r rotate
  m mirror            u unsharp mask
  b alpha blend       f frame differencing
  s save frame        q / esc quit";

#[derive(Debug, Parser)]
#[command(name = "photobooth")]
#[command(about = "point a camera at yourself and mash effect keys")]
#[command(after_help = KEY_HELP)]
struct Args {
	/// 0-9 for a webcam, or a path to an image file or a directory of
	/// image files
	#[arg(short, long, default_value = "0")]
	source: String,
}

fn main() -> Result<(), BoothError> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	// AVFoundation wants a nudge before we go looking for cameras
	#[cfg(target_os = "macos")]
	nokhwa::nokhwa_initialize(|_| {});

	let mut source = open_source(&args.source)?;
	let (width, height) = source.dimensions();

	let mut win = BoothWindow::build(width as u32, height as u32)?;
	let mut booth = Booth::new();
	let mut chain = EffectChain::new();
	let mut params = prompt::console();
	let mut saver = FrameSaver::new();
	let mut save_pending = false;

	let el = win.take_el();
	el.run(move |event, elwt| {
		elwt.set_control_flow(ControlFlow::Poll);
		win.common_events(&event, elwt);

		match &event {
			Event::WindowEvent {
				event: WindowEvent::KeyboardInput {
					event: key_event, ..
				},
				..
			} => {
				if let Some(key) = keypress(key_event) {
					match dispatch(key) {
						Action::Toggle(effect) => {
							// parameterized effects block here on the
							// console prompt, same as the capture read
							// blocks. Single thread, single booth.
							if let Err(e) = chain.toggle(effect, &mut params) {
								log::error!("couldn't toggle {}: {e}", effect.name());
								elwt.exit();
							}
						}
						Action::Save => save_pending = true,
						Action::Quit => elwt.exit(),
						Action::None => log::debug!("ignoring {key:?}"),
					}
				}
			}

			// Poll control flow keeps this firing; the blocking read is
			// what paces the loop at the source's frame rate
			Event::AboutToWait => match source.read() {
				Ok(Some(raw)) => {
					let display = booth.tick(raw, &chain);

					if save_pending {
						save_pending = false;
						if let Err(e) = saver.save(&display) {
							log::error!("save failed: {e}");
						}
					}

					if let Err(e) = win.present(&display) {
						log::error!("present failed: {e}");
						elwt.exit();
					}
				}
				Ok(None) => {
					log::info!("source drained; closing the booth");
					elwt.exit();
				}
				Err(e) => {
					log::error!("capture failed: {e}");
					elwt.exit();
				}
			},

			_ => (),
		}
	})?;

	Ok(())
}

fn keypress(event: &KeyEvent) -> Option<KeyPress> {
	if event.state != ElementState::Pressed || event.repeat {
		return None;
	}

	match &event.logical_key {
		Key::Named(NamedKey::Escape) => Some(KeyPress::Escape),
		Key::Character(c) => c.chars().next().map(KeyPress::Char),
		_ => None,
	}
}

fn open_source(source: &str) -> Result<Box<dyn FrameSource>, BoothError> {
	match source.parse::<u32>() {
		Ok(index) => Ok(Box::new(CameraSource::open(index)?)),
		Err(_) => Ok(Box::new(StillSource::open(Path::new(source))?)),
	}
}
