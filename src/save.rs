use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::BoothError;
use crate::frame::RgbFrame;

/// Writes saved frames as img-000.jpg, img-001.jpg, and so on. The counter
/// lives for the run; restarting the booth starts over at zero and happily
/// clobbers last session's shots.
pub struct FrameSaver {
	dir: PathBuf,
	next: u32,
}

impl FrameSaver {
	pub fn new() -> Self {
		Self::in_dir(".")
	}

	pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
		FrameSaver {
			dir: dir.as_ref().to_owned(),
			next: 0,
		}
	}

	pub fn save(&mut self, frame: &RgbFrame) -> Result<PathBuf, BoothError> {
		let path = self.dir.join(format!("img-{:03}.jpg", self.next));

		let image = RgbImage::from_raw(
			frame.width as u32,
			frame.height as u32,
			frame.data.clone(),
		)
		.ok_or_else(|| {
			BoothError::Image(image::ImageError::Parameter(
				image::error::ParameterError::from_kind(
					image::error::ParameterErrorKind::DimensionMismatch,
				),
			))
		})?;
		image.save(&path)?;

		self.next += 1;
		log::info!("saved {}", path.display());
		Ok(path)
	}
}
