//! Plane-level kernels for the heavier effects. Everything here works on a
//! single channel laid out flat, width * height. Boundaries reflect
//! (`d c b a | a b c d | d c b a`) so a constant plane stays constant.

use crate::frame::Frame;

/// Fold an out-of-range index back into `0..len` by reflecting off both
/// ends. Period is 2*len, which covers kernels wider than the plane.
#[inline(always)]
fn reflect(i: isize, len: usize) -> usize {
	let n = len as isize;
	if n == 1 {
		return 0;
	}

	let i = i.rem_euclid(2 * n);
	if i >= n {
		(2 * n - 1 - i) as usize
	} else {
		i as usize
	}
}

/// Sampled gaussian, radius round(4 * sigma), normalized to sum 1.
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
	let radius = (4.0 * sigma).round() as isize;
	let mut kernel: Vec<f32> = (-radius..=radius)
		.map(|x| (-(x * x) as f32 / (2.0 * sigma * sigma)).exp())
		.collect();

	let sum: f32 = kernel.iter().sum();
	for k in kernel.iter_mut() {
		*k /= sum;
	}
	kernel
}

/// First derivative of the gaussian, -x/sigma^2 * g(x). Pairs with the
/// plain kernel for the gradient magnitude.
fn gaussian_deriv_kernel(sigma: f32) -> Vec<f32> {
	let smooth = gaussian_kernel(sigma);
	let radius = (smooth.len() / 2) as isize;

	(-radius..=radius)
		.zip(smooth)
		.map(|(x, g)| -x as f32 / (sigma * sigma) * g)
		.collect()
}

fn convolve_rows(plane: &[f32], width: usize, height: usize, kernel: &[f32]) -> Vec<f32> {
	let radius = (kernel.len() / 2) as isize;
	let mut out = vec![0.0; plane.len()];

	for y in 0..height {
		let row = y * width;
		for x in 0..width {
			let mut acc = 0.0;
			for (ki, k) in kernel.iter().enumerate() {
				let sx = reflect(x as isize + ki as isize - radius, width);
				acc += plane[row + sx] * k;
			}
			out[row + x] = acc;
		}
	}
	out
}

fn convolve_cols(plane: &[f32], width: usize, height: usize, kernel: &[f32]) -> Vec<f32> {
	let radius = (kernel.len() / 2) as isize;
	let mut out = vec![0.0; plane.len()];

	for y in 0..height {
		for x in 0..width {
			let mut acc = 0.0;
			for (ki, k) in kernel.iter().enumerate() {
				let sy = reflect(y as isize + ki as isize - radius, height);
				acc += plane[sy * width + x] * k;
			}
			out[y * width + x] = acc;
		}
	}
	out
}

pub fn gaussian_blur(plane: &[f32], width: usize, height: usize, sigma: f32) -> Vec<f32> {
	let kernel = gaussian_kernel(sigma);
	let rows = convolve_rows(plane, width, height, &kernel);
	convolve_cols(&rows, width, height, &kernel)
}

/// sqrt(gx^2 + gy^2) where each component is the derivative-of-gaussian
/// along its axis and plain smoothing along the other.
pub fn gradient_magnitude(plane: &[f32], width: usize, height: usize, sigma: f32) -> Vec<f32> {
	let smooth = gaussian_kernel(sigma);
	let deriv = gaussian_deriv_kernel(sigma);

	let gx = convolve_cols(&convolve_rows(plane, width, height, &deriv), width, height, &smooth);
	let gy = convolve_rows(&convolve_cols(plane, width, height, &deriv), width, height, &smooth);

	gx.iter()
		.zip(gy)
		.map(|(x, y)| (x * x + y * y).sqrt())
		.collect()
}

/// Second difference [1, -2, 1] summed over both axes.
pub fn laplace(plane: &[f32], width: usize, height: usize) -> Vec<f32> {
	let mut out = vec![0.0; plane.len()];

	for y in 0..height {
		for x in 0..width {
			let up = plane[reflect(y as isize - 1, height) * width + x];
			let down = plane[reflect(y as isize + 1, height) * width + x];
			let left = plane[y * width + reflect(x as isize - 1, width)];
			let right = plane[y * width + reflect(x as isize + 1, width)];

			out[y * width + x] = up + down + left + right - 4.0 * plane[y * width + x];
		}
	}
	out
}

/// Rotate about the frame center, same-size output. Positive degrees go
/// counterclockwise. Bilinear sampling, anything from outside the frame
/// reads as zero.
pub fn rotate(frame: &Frame, degrees: f32) -> Frame {
	let (sin, cos) = degrees.to_radians().sin_cos();
	let cx = (frame.width as f32 - 1.0) / 2.0;
	let cy = (frame.height as f32 - 1.0) / 2.0;

	let mut out = Frame::new(frame.width, frame.height);
	for y in 0..frame.height {
		for x in 0..frame.width {
			// inverse mapping: where in the source does this pixel land
			let dx = x as f32 - cx;
			let dy = y as f32 - cy;
			let sx = cx + dx * cos - dy * sin;
			let sy = cy + dx * sin + dy * cos;

			for channel in 0..3 {
				out.set(x, y, channel, bilinear(frame, sx, sy, channel));
			}
		}
	}
	out
}

fn bilinear(frame: &Frame, x: f32, y: f32, channel: usize) -> f32 {
	let x0 = x.floor();
	let y0 = y.floor();
	let fx = x - x0;
	let fy = y - y0;
	let x0 = x0 as isize;
	let y0 = y0 as isize;

	let sample = |xi: isize, yi: isize| -> f32 {
		if xi < 0 || yi < 0 || xi >= frame.width as isize || yi >= frame.height as isize {
			0.0
		} else {
			frame.get(xi as usize, yi as usize, channel)
		}
	};

	sample(x0, y0) * (1.0 - fx) * (1.0 - fy)
		+ sample(x0 + 1, y0) * fx * (1.0 - fy)
		+ sample(x0, y0 + 1) * (1.0 - fx) * fy
		+ sample(x0 + 1, y0 + 1) * fx * fy
}
