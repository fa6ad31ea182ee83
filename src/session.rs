use std::io::{BufRead, Write};

use tracing::{debug, trace};

use crate::config::{MachineConfig, Settings};
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;

/// Symbols per output block.
pub const BLOCK_SIZE: usize = 5;

/// `msg` in blocks of [`BLOCK_SIZE`] separated by single spaces; the last
/// block may be shorter.
pub fn group_blocks(msg: &str) -> String {
	let chars: Vec<char> = msg.chars().collect();
	let mut out = String::with_capacity(chars.len() + chars.len() / BLOCK_SIZE);
	for (i, block) in chars.chunks(BLOCK_SIZE).enumerate() {
		if i > 0 {
			out.push(' ');
		}
		out.extend(block);
	}
	out
}

/// Runs a stream of settings lines and messages through one machine.
#[derive(Debug)]
pub struct Session {
	machine: Machine,
	configured: bool,
}

impl Session {
	pub fn new(config: &MachineConfig) -> Result<Self> {
		Ok(Session {
			machine: config.build()?,
			configured: false,
		})
	}

	pub fn machine(&self) -> &Machine {
		&self.machine
	}

	/// Handles one input line, writing any output to `output`.
	///
	/// Settings lines reconfigure the machine and print nothing. Blank
	/// lines are echoed. Anything else is a message: whitespace is dropped
	/// and the rest converted and printed in blocks.
	pub fn process_line<W: Write>(&mut self, line: &str, output: &mut W) -> Result<()> {
		if Settings::is_settings_line(line) {
			let settings = Settings::parse(line, self.machine.num_rotors())?;
			settings.apply(&mut self.machine)?;
			self.configured = true;
			return Ok(());
		}

		if line.trim().is_empty() {
			writeln!(output)?;
			return Ok(());
		}

		if !self.configured {
			return Err(EnigmaError::MissingSettings);
		}

		let msg: String = line.chars().filter(|c| !c.is_whitespace()).collect();
		let converted = self.machine.convert(&msg)?;
		trace!(len = msg.len(), positions = %self.machine.positions(), "converted line");
		writeln!(output, "{}", group_blocks(&converted))?;
		Ok(())
	}

	/// Processes every line of `input`. Input that never configures the
	/// machine, including empty input, is an error.
	pub fn process<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
		let mut lines = 0usize;
		for line in input.lines() {
			self.process_line(&line?, output)?;
			lines += 1;
		}
		output.flush()?;
		debug!(lines, "input exhausted");
		if !self.configured {
			return Err(EnigmaError::MissingSettings);
		}
		Ok(())
	}
}
