/// A frame mid-pipeline. Three f32 channels per pixel, interleaved RGB, so
/// effects can swing values past the u8 range without clipping anything
/// until we normalize at the end of the tick.
#[derive(Clone, Debug)]
pub struct Frame {
	pub data: Vec<f32>,
	pub width: usize,
	pub height: usize,
}

impl Frame {
	pub fn new(width: usize, height: usize) -> Self {
		Frame {
			data: vec![0.0; width * height * 3],
			width,
			height,
		}
	}

	pub fn from_rgb8(rgb: &[u8], width: usize, height: usize) -> Self {
		Frame {
			data: rgb.iter().map(|&v| v as f32).collect(),
			width,
			height,
		}
	}

	#[inline(always)]
	pub fn idx(&self, x: usize, y: usize, channel: usize) -> usize {
		(y * self.width + x) * 3 + channel
	}

	#[inline(always)]
	pub fn get(&self, x: usize, y: usize, channel: usize) -> f32 {
		self.data[(y * self.width + x) * 3 + channel]
	}

	#[inline(always)]
	pub fn set(&mut self, x: usize, y: usize, channel: usize, value: f32) {
		self.data[(y * self.width + x) * 3 + channel] = value;
	}

	/// Pull one channel out into a flat plane for the kernel code, which
	/// doesn't want to think about interleaving.
	pub fn plane(&self, channel: usize) -> Vec<f32> {
		self.data[channel..].iter().step_by(3).copied().collect()
	}

	pub fn set_plane(&mut self, channel: usize, plane: &[f32]) {
		for (px, &v) in self.data[channel..].iter_mut().step_by(3).zip(plane) {
			*px = v;
		}
	}

	/// Linear remap of [min, max] over every sample to [lo, hi], truncated
	/// to u8. A flat frame has no range to stretch, so it comes out solid
	/// `lo` instead of dividing by zero.
	pub fn normalize(&self, (lo, hi): (f32, f32)) -> RgbFrame {
		let min = self.data.iter().copied().fold(f32::INFINITY, f32::min);
		let max = self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max);

		let data = if max == min {
			vec![lo.clamp(0.0, 255.0) as u8; self.data.len()]
		} else {
			let ratio = (hi - lo) / (max - min);
			self.data
				.iter()
				.map(|&v| ((v - min) * ratio + lo).clamp(0.0, 255.0) as u8)
				.collect()
		};

		RgbFrame {
			data,
			width: self.width,
			height: self.height,
		}
	}
}

/// A frame at the display/save boundary. 24bit RGB.
#[derive(Clone, Debug)]
pub struct RgbFrame {
	pub data: Vec<u8>,
	pub width: usize,
	pub height: usize,
}
