use std::io::{self, BufRead, StdinLock, Write};

use crate::error::BoothError;

/// Where effect parameters come from. The chain asks this when a
/// parameterized effect activates, so the core never touches stdin itself
/// and tests can hand out numbers from a queue.
pub trait ParamSource {
	fn request(&mut self, prompt: &str) -> Result<i32, BoothError>;
}

/// Console parameters: print the prompt, read a line. Junk input gets a
/// warning and another prompt; a closed stdin is an error.
pub struct LineParams<R> {
	input: R,
}

pub fn console() -> LineParams<StdinLock<'static>> {
	LineParams {
		input: io::stdin().lock(),
	}
}

impl<R: BufRead> ParamSource for LineParams<R> {
	fn request(&mut self, prompt: &str) -> Result<i32, BoothError> {
		loop {
			print!("{prompt}: ");
			io::stdout().flush()?;

			let mut line = String::new();
			if self.input.read_line(&mut line)? == 0 {
				return Err(BoothError::PromptClosed);
			}

			match line.trim().parse() {
				Ok(value) => return Ok(value),
				Err(_) => log::warn!("{:?} isn't an integer, asking again", line.trim()),
			}
		}
	}
}

#[cfg(test)]
pub struct QueuedParams(pub Vec<i32>);

#[cfg(test)]
impl ParamSource for QueuedParams {
	fn request(&mut self, _prompt: &str) -> Result<i32, BoothError> {
		if self.0.is_empty() {
			Err(BoothError::PromptClosed)
		} else {
			Ok(self.0.remove(0))
		}
	}
}
