use crate::chain::EffectChain;
use crate::frame::{Frame, RgbFrame};

/// The per-tick pipeline. Owns the previous-frame buffer the temporal
/// effects feed on.
///
/// Policy, since the ordering matters: `previous` is the post-effect,
/// pre-normalization buffer. What the chain produced last tick is what
/// alpha-blend and frame-differencing compare against, not the stretched
/// thing we put on screen.
pub struct Booth {
	previous: Option<Frame>,
}

impl Booth {
	pub fn new() -> Self {
		Booth { previous: None }
	}

	/// One capture cycle: fold the chain over the frame, keep the result
	/// for next tick, hand back a normalized frame for display.
	///
	/// On the very first tick (or if the source changed shape under us)
	/// there is no previous buffer, so the frame stands in for its own
	/// past; temporal effects see zero delta instead of faulting.
	pub fn tick(&mut self, mut frame: Frame, chain: &EffectChain) -> RgbFrame {
		let previous = self
			.previous
			.take()
			.filter(|p| p.width == frame.width && p.height == frame.height)
			.unwrap_or_else(|| frame.clone());

		chain.apply(&mut frame, &previous);

		let display = frame.normalize((0.0, 255.0));
		self.previous = Some(frame);
		display
	}
}
