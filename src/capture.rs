use std::fs;
use std::path::{Path, PathBuf};

use nokhwa::{
	pixel_format::RgbFormat,
	utils::{CameraIndex, RequestedFormat, RequestedFormatType},
	Camera,
};

use crate::error::BoothError;
use crate::frame::Frame;

/// Something that hands us frames until it runs out. `Ok(None)` is the end
/// of the stream, which ends the run loop without ceremony.
pub trait FrameSource {
	fn read(&mut self) -> Result<Option<Frame>, BoothError>;
	fn dimensions(&self) -> (usize, usize);
}

/// A live webcam through nokhwa.
pub struct CameraSource {
	camera: Camera,
	width: usize,
	height: usize,
}

impl CameraSource {
	pub fn open(index: u32) -> Result<Self, BoothError> {
		let requested =
			RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
		let mut camera = Camera::new(CameraIndex::Index(index), requested)?;

		let width = camera.camera_format().width() as usize;
		let height = camera.camera_format().height() as usize;
		log::info!("camera {index} open at {width}x{height}");

		camera.open_stream()?;
		Ok(CameraSource {
			camera,
			width,
			height,
		})
	}
}

impl FrameSource for CameraSource {
	fn read(&mut self) -> Result<Option<Frame>, BoothError> {
		// A camera that stops producing is the stream ending, not a
		// crash; unplugged devices get to quit the booth politely.
		let buffer = match self.camera.frame() {
			Ok(buffer) => buffer,
			Err(e) => {
				log::warn!("camera stream ended: {e}");
				return Ok(None);
			}
		};

		let decoded = match buffer.decode_image::<RgbFormat>() {
			Ok(decoded) => decoded,
			Err(e) => {
				log::warn!("camera frame didn't decode: {e}");
				return Ok(None);
			}
		};

		let width = decoded.width() as usize;
		let height = decoded.height() as usize;
		Ok(Some(Frame::from_rgb8(decoded.as_raw(), width, height)))
	}

	fn dimensions(&self) -> (usize, usize) {
		(self.width, self.height)
	}
}

const STILL_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Stills standing in for a video file: a single image plays once, a
/// directory plays its images in name order. Then the stream ends.
pub struct StillSource {
	files: Vec<PathBuf>,
	cursor: usize,
	width: usize,
	height: usize,
}

impl StillSource {
	pub fn open(path: &Path) -> Result<Self, BoothError> {
		let mut files = if path.is_dir() {
			let mut files = Vec::new();
			for entry in fs::read_dir(path)? {
				let path = entry?.path();
				let ext = path
					.extension()
					.and_then(|e| e.to_str())
					.map(|e| e.to_ascii_lowercase());
				if matches!(&ext, Some(e) if STILL_EXTENSIONS.contains(&e.as_str())) {
					files.push(path);
				}
			}
			files
		} else {
			vec![path.to_owned()]
		};
		files.sort();

		let first = match files.first() {
			Some(first) => first,
			None => return Err(BoothError::EmptySource(path.to_owned())),
		};
		let (width, height) = image::io::Reader::open(first)?.into_dimensions()?;
		log::info!(
			"{} still frame(s) from {}, first is {width}x{height}",
			files.len(),
			path.display()
		);

		Ok(StillSource {
			files,
			cursor: 0,
			width: width as usize,
			height: height as usize,
		})
	}
}

impl FrameSource for StillSource {
	fn read(&mut self) -> Result<Option<Frame>, BoothError> {
		let path = match self.files.get(self.cursor) {
			Some(path) => path,
			None => return Ok(None),
		};
		self.cursor += 1;

		// a camera blocks until the next frame; stills fake the same
		// pacing so a directory plays like footage
		if self.cursor > 1 {
			std::thread::sleep(std::time::Duration::from_millis(33));
		}

		let image = image::open(path)?.to_rgb8();
		let width = image.width() as usize;
		let height = image.height() as usize;
		Ok(Some(Frame::from_rgb8(image.as_raw(), width, height)))
	}

	fn dimensions(&self) -> (usize, usize) {
		(self.width, self.height)
	}
}
