use crate::effect::Effect;
use crate::error::BoothError;
use crate::frame::Frame;
use crate::prompt::ParamSource;

/// One entry in the chain: the effect and whatever number it asked for
/// when it activated. The record lives exactly as long as the activation.
struct ActiveEffect {
	effect: Effect,
	param: Option<i32>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Toggled {
	Activated,
	Deactivated,
}

/// The ordered set of active effects. Order is activation order and stays
/// that way; grayscale-then-negate is not negate-then-grayscale.
#[derive(Default)]
pub struct EffectChain {
	active: Vec<ActiveEffect>,
}

impl EffectChain {
	pub fn new() -> Self {
		Self::default()
	}

	/// Activate or deactivate an effect. Activating a parameterized effect
	/// asks `params` for its number right here, once; deactivating throws
	/// the record away, so the next activation asks again.
	pub fn toggle(
		&mut self,
		effect: Effect,
		params: &mut dyn ParamSource,
	) -> Result<Toggled, BoothError> {
		let toggled = match self.active.iter().position(|a| a.effect == effect) {
			Some(pos) => {
				self.active.remove(pos);
				Toggled::Deactivated
			}
			None => {
				let param = match effect.prompt() {
					Some(prompt) => Some(params.request(prompt)?),
					None => None,
				};
				self.active.push(ActiveEffect { effect, param });
				Toggled::Activated
			}
		};

		log::info!("active effects: {}", self.describe());
		Ok(toggled)
	}

	/// Fold the chain over the frame, left to right. Every temporal effect
	/// sees the same `previous` no matter where it sits in the chain; the
	/// buffer from before this tick, never an intermediate.
	pub fn apply(&self, frame: &mut Frame, previous: &Frame) {
		for entry in &self.active {
			entry.effect.apply(frame, previous, entry.param);
		}
	}

	#[cfg(test)]
	fn is_active(&self, effect: Effect) -> bool {
		self.active.iter().any(|a| a.effect == effect)
	}

	#[cfg(test)]
	fn param(&self, effect: Effect) -> Option<i32> {
		self.active
			.iter()
			.find(|a| a.effect == effect)
			.and_then(|a| a.param)
	}

	#[cfg(test)]
	fn is_empty(&self) -> bool {
		self.active.is_empty()
	}

	fn describe(&self) -> String {
		if self.active.is_empty() {
			return "none".into();
		}

		let parts: Vec<String> = self
			.active
			.iter()
			.map(|a| match a.param {
				Some(p) => format!("{}({p})", a.effect.name()),
				None => a.effect.name().into(),
			})
			.collect();
		parts.join(", ")
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::prompt::QueuedParams;

	fn frame_3x3() -> Frame {
		let rgb: Vec<u8> = (0..27).map(|v| (v * 7) % 251).collect();
		Frame::from_rgb8(&rgb, 3, 3)
	}

	#[test]
	fn toggle_on_then_off_restores_membership() {
		let mut chain = EffectChain::new();
		let mut params = QueuedParams(vec![]);

		assert_eq!(
			chain.toggle(Effect::Negate, &mut params).unwrap(),
			Toggled::Activated
		);
		assert!(chain.is_active(Effect::Negate));

		assert_eq!(
			chain.toggle(Effect::Negate, &mut params).unwrap(),
			Toggled::Deactivated
		);
		assert!(!chain.is_active(Effect::Negate));
		assert!(chain.is_empty());
	}

	#[test]
	fn activation_asks_for_the_parameter_once() {
		let mut chain = EffectChain::new();
		let mut params = QueuedParams(vec![4]);

		chain.toggle(Effect::GaussianBlur, &mut params).unwrap();
		assert_eq!(chain.param(Effect::GaussianBlur), Some(4));
		// the queue is drained; nothing re-prompts while active
		assert!(params.0.is_empty());
	}

	#[test]
	fn deactivation_discards_the_parameter_record() {
		let mut chain = EffectChain::new();
		let mut params = QueuedParams(vec![4, 9]);

		chain.toggle(Effect::GaussianBlur, &mut params).unwrap();
		chain.toggle(Effect::GaussianBlur, &mut params).unwrap();
		assert_eq!(chain.param(Effect::GaussianBlur), None);

		// reactivation prompts fresh and gets the new number
		chain.toggle(Effect::GaussianBlur, &mut params).unwrap();
		assert_eq!(chain.param(Effect::GaussianBlur), Some(9));
	}

	#[test]
	fn a_failed_prompt_leaves_the_chain_alone() {
		let mut chain = EffectChain::new();
		let mut params = QueuedParams(vec![]);

		assert!(chain.toggle(Effect::Rotate, &mut params).is_err());
		assert!(!chain.is_active(Effect::Rotate));
	}

	#[test]
	fn activation_order_changes_the_result() {
		let mut params = QueuedParams(vec![]);
		let previous = frame_3x3();

		// laplace of a negated frame flips sign; negating a laplace
		// offsets it from 255. Composition order is the user's call and
		// the chain must keep it.
		let mut nl = EffectChain::new();
		nl.toggle(Effect::Negate, &mut params).unwrap();
		nl.toggle(Effect::Laplace, &mut params).unwrap();

		let mut ln = EffectChain::new();
		ln.toggle(Effect::Laplace, &mut params).unwrap();
		ln.toggle(Effect::Negate, &mut params).unwrap();

		let mut dot = Frame::new(5, 5);
		dot.set(2, 2, 0, 100.0);

		let mut a = dot.clone();
		let mut b = dot.clone();
		nl.apply(&mut a, &previous);
		ln.apply(&mut b, &previous);

		assert!((a.get(2, 2, 0) - 400.0).abs() < 1e-3);
		assert!((b.get(2, 2, 0) - 655.0).abs() < 1e-3);
	}

	#[test]
	fn temporal_effects_see_the_pre_tick_previous_frame() {
		let mut chain = EffectChain::new();
		let mut params = QueuedParams(vec![]);
		chain.toggle(Effect::Negate, &mut params).unwrap();
		chain.toggle(Effect::FrameDifferencing, &mut params).unwrap();

		let mut frame = Frame::new(1, 1);
		frame.data = vec![10.0, 20.0, 30.0];
		let mut previous = Frame::new(1, 1);
		previous.data = vec![1.0, 2.0, 3.0];

		chain.apply(&mut frame, &previous);
		// negate first: [245, 235, 225], then minus the *original*
		// previous, not a negated one
		assert_eq!(frame.data, vec![244.0, 233.0, 222.0]);
	}

	#[test]
	fn no_duplicate_selectors() {
		let mut chain = EffectChain::new();
		let mut params = QueuedParams(vec![]);

		chain.toggle(Effect::Mirror, &mut params).unwrap();
		chain.toggle(Effect::Laplace, &mut params).unwrap();
		chain.toggle(Effect::Mirror, &mut params).unwrap();
		chain.toggle(Effect::Mirror, &mut params).unwrap();

		assert_eq!(
			chain
				.active
				.iter()
				.filter(|a| a.effect == Effect::Mirror)
				.count(),
			1
		);
	}
}
