use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoothError {
	#[error("camera: {0}")]
	Camera(#[from] nokhwa::NokhwaError),

	#[error("image: {0}")]
	Image(#[from] image::ImageError),

	#[error("io: {0}")]
	Io(#[from] std::io::Error),

	#[error("event loop: {0}")]
	EventLoop(#[from] winit::error::EventLoopError),

	#[error("window: {0}")]
	Window(#[from] winit::error::OsError),

	#[error("surface: {0}")]
	Surface(#[from] softbuffer::SoftBufferError),

	/// Stdin closed while we were waiting on an effect parameter.
	#[error("parameter prompt closed")]
	PromptClosed,

	#[error("no frames to read at {}", .0.display())]
	EmptySource(PathBuf),
}
