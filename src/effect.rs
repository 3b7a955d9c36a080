use crate::filter;
use crate::frame::Frame;

/// Every transform the booth knows, keyed by the character that toggles it.
/// A fixed enum instead of a table of callables so the chain can carry
/// per-effect parameter records around without boxing anything.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
	Negate,
	Grayscale,
	FlipVertical,
	FlipHorizontal,
	GaussianBlur,
	GradientMagnitude,
	Laplace,
	Rotate,
	Mirror,
	UnsharpMask,
	AlphaBlend,
	FrameDifferencing,
}

pub const ALL: [Effect; 12] = [
	Effect::Negate,
	Effect::Grayscale,
	Effect::FlipVertical,
	Effect::FlipHorizontal,
	Effect::GaussianBlur,
	Effect::GradientMagnitude,
	Effect::Laplace,
	Effect::Rotate,
	Effect::Mirror,
	Effect::UnsharpMask,
	Effect::AlphaBlend,
	Effect::FrameDifferencing,
];

impl Effect {
	pub fn from_selector(selector: char) -> Option<Effect> {
		ALL.into_iter().find(|e| e.selector() == selector)
	}

	pub fn selector(self) -> char {
		match self {
			Effect::Negate => 'n',
			Effect::Grayscale => 'g',
			Effect::FlipVertical => 'v',
			Effect::FlipHorizontal => 'h',
			Effect::GaussianBlur => 'a',
			Effect::GradientMagnitude => 'c',
			Effect::Laplace => 'l',
			Effect::Rotate => 'r',
			Effect::Mirror => 'm',
			Effect::UnsharpMask => 'u',
			Effect::AlphaBlend => 'b',
			Effect::FrameDifferencing => 'f',
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Effect::Negate => "negate",
			Effect::Grayscale => "grayscale",
			Effect::FlipVertical => "flip-vertical",
			Effect::FlipHorizontal => "flip-horizontal",
			Effect::GaussianBlur => "gaussian-blur",
			Effect::GradientMagnitude => "gradient-magnitude",
			Effect::Laplace => "laplace",
			Effect::Rotate => "rotate",
			Effect::Mirror => "mirror",
			Effect::UnsharpMask => "unsharp-mask",
			Effect::AlphaBlend => "alpha-blend",
			Effect::FrameDifferencing => "frame-differencing",
		}
	}

	/// The prompt text for effects that want a number when they activate.
	pub fn prompt(self) -> Option<&'static str> {
		match self {
			Effect::GaussianBlur => Some("gaussian sigma"),
			Effect::GradientMagnitude => Some("gradient sigma"),
			Effect::Rotate => Some("rotation degrees"),
			Effect::UnsharpMask => Some("unsharp sigma"),
			_ => None,
		}
	}

	/// Run the transform in place. `previous` is the post-effect buffer of
	/// the prior tick; only the temporal effects look at it. `param` is the
	/// number this effect asked for at activation, if it asked for one.
	pub fn apply(self, frame: &mut Frame, previous: &Frame, param: Option<i32>) {
		match self {
			Effect::Negate => {
				for v in frame.data.iter_mut() {
					*v = 255.0 - *v;
				}
			}

			Effect::Grayscale => {
				for px in frame.data.chunks_exact_mut(3) {
					let luma = px[0] * 0.3 + px[1] * 0.59 + px[2] * 0.11;
					px[0] = luma;
					px[1] = luma;
					px[2] = luma;
				}
			}

			Effect::FlipVertical => {
				// mirror columns, left for right
				for y in 0..frame.height {
					for x in 0..frame.width / 2 {
						for c in 0..3 {
							let a = frame.idx(x, y, c);
							let b = frame.idx(frame.width - 1 - x, y, c);
							frame.data.swap(a, b);
						}
					}
				}
			}

			Effect::FlipHorizontal => {
				// mirror rows, top for bottom
				let row = frame.width * 3;
				let (top, bottom) = frame.data.split_at_mut(frame.height / 2 * row);
				let lower_rows = bottom.chunks_exact_mut(row).rev().take(frame.height / 2);
				for (a, b) in top.chunks_exact_mut(row).zip(lower_rows) {
					a.swap_with_slice(b);
				}
			}

			Effect::GaussianBlur => {
				let sigma = param.unwrap_or(0);
				if sigma <= 0 {
					return;
				}
				for c in 0..3 {
					let plane = filter::gaussian_blur(
						&frame.plane(c),
						frame.width,
						frame.height,
						sigma as f32,
					);
					frame.set_plane(c, &plane);
				}
			}

			Effect::GradientMagnitude => {
				let sigma = param.unwrap_or(0);
				if sigma <= 0 {
					return;
				}
				for c in 0..3 {
					let plane = filter::gradient_magnitude(
						&frame.plane(c),
						frame.width,
						frame.height,
						sigma as f32,
					);
					frame.set_plane(c, &plane);
				}
			}

			Effect::Laplace => {
				for c in 0..3 {
					let plane = filter::laplace(&frame.plane(c), frame.width, frame.height);
					frame.set_plane(c, &plane);
				}
			}

			Effect::Rotate => {
				let degrees = param.unwrap_or(0);
				if degrees != 0 {
					*frame = filter::rotate(frame, degrees as f32);
				}
			}

			Effect::Mirror => {
				// flipped left half written over the right half. Column i
				// lands in column width-1-i, which leaves the middle column
				// of an odd width alone.
				for y in 0..frame.height {
					for x in 0..frame.width / 2 {
						for c in 0..3 {
							let v = frame.get(x, y, c);
							frame.set(frame.width - 1 - x, y, c, v);
						}
					}
				}
			}

			Effect::UnsharpMask => {
				let original = frame.clone();
				Effect::GaussianBlur.apply(frame, previous, param);
				// 3 * high-pass + original, clamped back into range
				for (v, &orig) in frame.data.iter_mut().zip(&original.data) {
					let high_pass = orig - *v;
					*v = (high_pass * 3.0 + orig).clamp(0.0, 255.0);
				}
			}

			Effect::AlphaBlend => {
				for (v, &prev) in frame.data.iter_mut().zip(&previous.data) {
					*v = *v * 0.1 + prev * 0.9;
				}
			}

			Effect::FrameDifferencing => {
				for (v, &prev) in frame.data.iter_mut().zip(&previous.data) {
					*v -= prev;
				}
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn frame_4x2() -> Frame {
		let rgb: Vec<u8> = (0..24).map(|v| v * 10).collect();
		Frame::from_rgb8(&rgb, 4, 2)
	}

	fn assert_frames_eq(a: &Frame, b: &Frame) {
		assert_eq!(a.width, b.width);
		assert_eq!(a.height, b.height);
		for (x, y) in a.data.iter().zip(&b.data) {
			assert!((x - y).abs() < 1e-3, "{x} != {y}");
		}
	}

	#[test]
	fn selectors_roundtrip_and_are_unique() {
		for effect in ALL {
			assert_eq!(Effect::from_selector(effect.selector()), Some(effect));
		}
		assert_eq!(Effect::from_selector('z'), None);
		assert_eq!(Effect::from_selector('s'), None);
		assert_eq!(Effect::from_selector('q'), None);
	}

	#[test]
	fn negate_is_an_involution() {
		let mut frame = frame_4x2();
		let original = frame.clone();
		let previous = frame.clone();

		Effect::Negate.apply(&mut frame, &previous, None);
		assert!((frame.get(0, 0, 0) - 255.0).abs() < 1e-3);
		Effect::Negate.apply(&mut frame, &previous, None);
		assert_frames_eq(&frame, &original);
	}

	#[test]
	fn flips_are_involutions() {
		for effect in [Effect::FlipVertical, Effect::FlipHorizontal] {
			let mut frame = frame_4x2();
			let original = frame.clone();
			let previous = frame.clone();

			effect.apply(&mut frame, &previous, None);
			assert!(frame.data != original.data, "{} did nothing", effect.name());
			effect.apply(&mut frame, &previous, None);
			assert_frames_eq(&frame, &original);
		}
	}

	#[test]
	fn flip_vertical_mirrors_columns() {
		let mut frame = frame_4x2();
		let previous = frame.clone();
		let original = frame.clone();

		Effect::FlipVertical.apply(&mut frame, &previous, None);
		for y in 0..2 {
			for x in 0..4 {
				for c in 0..3 {
					assert_eq!(frame.get(x, y, c), original.get(3 - x, y, c));
				}
			}
		}
	}

	#[test]
	fn flip_horizontal_mirrors_rows() {
		let mut frame = frame_4x2();
		let previous = frame.clone();
		let original = frame.clone();

		Effect::FlipHorizontal.apply(&mut frame, &previous, None);
		for y in 0..2 {
			for x in 0..4 {
				for c in 0..3 {
					assert_eq!(frame.get(x, y, c), original.get(x, 1 - y, c));
				}
			}
		}
	}

	#[test]
	fn grayscale_uses_the_original_channels() {
		let mut frame = Frame::new(1, 1);
		frame.data = vec![100.0, 50.0, 200.0];
		let previous = frame.clone();

		Effect::Grayscale.apply(&mut frame, &previous, None);
		let luma = 100.0 * 0.3 + 50.0 * 0.59 + 200.0 * 0.11;
		for c in 0..3 {
			assert!((frame.get(0, 0, c) - luma).abs() < 1e-3);
		}
	}

	#[test]
	fn mirror_writes_the_flipped_left_half_into_the_right() {
		// per-row [1, 2, 3, 4] becomes [1, 2, 2, 1]
		let mut frame = Frame::new(4, 1);
		frame.data = vec![
			1.0, 1.0, 1.0, 2.0, 2.0, 2.0, //
			3.0, 3.0, 3.0, 4.0, 4.0, 4.0,
		];
		let previous = frame.clone();

		Effect::Mirror.apply(&mut frame, &previous, None);
		let row: Vec<f32> = (0..4).map(|x| frame.get(x, 0, 0)).collect();
		assert_eq!(row, vec![1.0, 2.0, 2.0, 1.0]);
	}

	#[test]
	fn mirror_leaves_the_middle_column_of_odd_widths() {
		let mut frame = Frame::new(5, 1);
		frame.data = vec![
			1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0, //
			4.0, 4.0, 4.0, 5.0, 5.0, 5.0,
		];
		let previous = frame.clone();

		Effect::Mirror.apply(&mut frame, &previous, None);
		let row: Vec<f32> = (0..5).map(|x| frame.get(x, 0, 0)).collect();
		assert_eq!(row, vec![1.0, 2.0, 3.0, 2.0, 1.0]);
	}

	#[test]
	fn blur_without_a_usable_sigma_is_a_no_op() {
		let mut frame = frame_4x2();
		let original = frame.clone();
		let previous = frame.clone();

		Effect::GaussianBlur.apply(&mut frame, &previous, None);
		assert_frames_eq(&frame, &original);
		Effect::GaussianBlur.apply(&mut frame, &previous, Some(0));
		assert_frames_eq(&frame, &original);
		Effect::GaussianBlur.apply(&mut frame, &previous, Some(-3));
		assert_frames_eq(&frame, &original);
	}

	#[test]
	fn blur_flattens_contrast() {
		let mut frame = Frame::new(8, 8);
		frame.set(4, 4, 0, 255.0);
		let previous = frame.clone();

		Effect::GaussianBlur.apply(&mut frame, &previous, Some(2));
		let peak = frame.get(4, 4, 0);
		assert!(peak < 255.0 && peak > 0.0);
		// mass moved outward, not lost entirely
		assert!(frame.get(3, 4, 0) > 0.0);
	}

	#[test]
	fn unsharp_mask_clamps_to_displayable_range() {
		let mut frame = Frame::new(6, 1);
		frame.data = vec![
			0.0, 0.0, 0.0, 255.0, 255.0, 255.0, //
			0.0, 0.0, 0.0, 255.0, 255.0, 255.0, //
			0.0, 0.0, 0.0, 255.0, 255.0, 255.0,
		];
		let previous = frame.clone();

		Effect::UnsharpMask.apply(&mut frame, &previous, Some(1));
		for &v in frame.data.iter() {
			assert!((0.0..=255.0).contains(&v), "{v} escaped the clamp");
		}
		// the hard edge really did overshoot before the clamp
		assert!(frame.data.contains(&0.0) && frame.data.contains(&255.0));
	}

	#[test]
	fn alpha_blend_weighs_the_previous_frame_heavier() {
		let mut frame = Frame::new(1, 1);
		frame.data = vec![100.0, 100.0, 100.0];
		let mut previous = Frame::new(1, 1);
		previous.data = vec![200.0, 200.0, 200.0];

		Effect::AlphaBlend.apply(&mut frame, &previous, None);
		for c in 0..3 {
			assert!((frame.get(0, 0, c) - 190.0).abs() < 1e-3);
		}
	}

	#[test]
	fn frame_differencing_subtracts_the_previous_frame() {
		let mut frame = Frame::new(1, 1);
		frame.data = vec![100.0, 60.0, 10.0];
		let mut previous = Frame::new(1, 1);
		previous.data = vec![40.0, 60.0, 30.0];

		Effect::FrameDifferencing.apply(&mut frame, &previous, None);
		assert_eq!(frame.data, vec![60.0, 0.0, -20.0]);
	}

	#[test]
	fn rotate_by_360_is_identity_within_rounding() {
		let mut frame = frame_4x2();
		let original = frame.clone();
		let previous = frame.clone();

		Effect::Rotate.apply(&mut frame, &previous, Some(360));
		assert_frames_eq(&frame, &original);
	}
}
