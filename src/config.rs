//! Machine descriptions and settings lines.
//!
//! A configuration names the alphabet, the slot and pawl counts, and every
//! rotor that may be installed:
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ
//! 5 3
//! I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//! Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B R       (AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN)
//!           (MO) (TZ) (VW)
//! ```
//!
//! The type token is `M` followed by the notch symbols, `N` for a fixed
//! rotor, or `R` for a reflector. A settings line picks rotors for a
//! message:
//!
//! ```text
//! * B Beta III IV I AXLE [RINGS] (HQ) (EX) (IP) (TR) (BY)
//! ```

use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::{RotorKind, RotorSpec};

/// Marker token that opens a settings line.
pub const SETTINGS_MARKER: &str = "*";

/// Everything needed to build a [`Machine`].
#[derive(Debug, Clone)]
pub struct MachineConfig {
	alphabet: Arc<Alphabet>,
	num_rotors: usize,
	pawls: usize,
	rotors: Vec<Arc<RotorSpec>>,
}

fn truncated(detail: &str) -> EnigmaError {
	EnigmaError::Truncated {
		detail: detail.to_string(),
	}
}

fn bad_rotor(detail: String) -> EnigmaError {
	EnigmaError::BadRotorDescription { detail }
}

fn is_cycle_token(token: &str) -> bool {
	token.starts_with('(')
}

fn is_rotor_name(token: &str) -> bool {
	token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_count(token: Option<&str>, what: &str) -> Result<usize> {
	let token = token.ok_or_else(|| truncated(&format!("missing {}", what)))?;
	token.parse().map_err(|_| EnigmaError::InvalidConfig {
		detail: format!("{} must be a number, got '{}'", what, token),
	})
}

impl MachineConfig {
	pub fn new(
		alphabet: Arc<Alphabet>,
		num_rotors: usize,
		pawls: usize,
		rotors: Vec<Arc<RotorSpec>>,
	) -> Self {
		MachineConfig {
			alphabet,
			num_rotors,
			pawls,
			rotors,
		}
	}

	pub fn parse(text: &str) -> Result<Self> {
		let mut lines = text.lines().skip_while(|l| l.trim().is_empty());
		let alphabet = lines
			.next()
			.map(str::trim)
			.ok_or_else(|| truncated("missing alphabet"))?;
		let alphabet = Arc::new(Alphabet::new(alphabet)?);

		let mut tokens = lines.flat_map(str::split_whitespace).peekable();
		let num_rotors = parse_count(tokens.next(), "number of rotors")?;
		let pawls = parse_count(tokens.next(), "number of pawls")?;
		if num_rotors == 0 || pawls >= num_rotors {
			return Err(EnigmaError::BadPawlCount { num_rotors, pawls });
		}

		let mut rotors: Vec<Arc<RotorSpec>> = Vec::new();
		while let Some(name) = tokens.next() {
			if !is_rotor_name(name) {
				return Err(bad_rotor(format!("invalid rotor name '{}'", name)));
			}
			let desc = tokens
				.next()
				.ok_or_else(|| truncated(&format!("rotor '{}' has no type", name)))?;

			let mut cycles = String::new();
			while let Some(token) = tokens.next_if(|t| is_cycle_token(t)) {
				cycles.push_str(token);
			}
			let wiring = Permutation::new(&cycles, Arc::clone(&alphabet))?;

			let mut kind = desc.chars();
			let spec = match (kind.next(), kind.as_str()) {
				(Some('M'), notches) => RotorSpec::moving(name, wiring, notches)?,
				(Some('N'), "") => RotorSpec::fixed(name, wiring),
				(Some('R'), "") => RotorSpec::reflector(name, wiring),
				_ => {
					return Err(bad_rotor(format!(
						"rotor '{}' has unknown type '{}'",
						name, desc
					)))
				}
			};

			if *spec.kind() == RotorKind::Reflector && !spec.wiring().derangement() {
				warn!(rotor = name, "reflector maps some symbol to itself");
			}
			if rotors.iter().any(|r| r.name() == name) {
				warn!(rotor = name, "rotor defined more than once, first definition wins");
			}

			rotors.push(Arc::new(spec));
		}

		debug!(
			alphabet = %alphabet,
			num_rotors,
			pawls,
			available = rotors.len(),
			"parsed machine configuration"
		);

		Ok(MachineConfig::new(alphabet, num_rotors, pawls, rotors))
	}

	pub fn alphabet(&self) -> &Arc<Alphabet> {
		&self.alphabet
	}

	pub fn num_rotors(&self) -> usize {
		self.num_rotors
	}

	pub fn num_pawls(&self) -> usize {
		self.pawls
	}

	pub fn rotors(&self) -> &[Arc<RotorSpec>] {
		&self.rotors
	}

	/// A machine sharing my rotor specs, with nothing installed.
	pub fn build(&self) -> Result<Machine> {
		Machine::new(
			Arc::clone(&self.alphabet),
			self.num_rotors,
			self.pawls,
			self.rotors.clone(),
		)
	}
}

impl FromStr for MachineConfig {
	type Err = EnigmaError;

	fn from_str(s: &str) -> Result<Self> {
		MachineConfig::parse(s)
	}
}

/// One settings line: rotors, positions, rings and plugboard for a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub rotors: Vec<String>,
	pub positions: String,
	pub rings: Option<String>,
	pub plugboard: String,
}

fn bad_settings(detail: String) -> EnigmaError {
	EnigmaError::BadSettings { detail }
}

impl Settings {
	/// True if `line` opens with the settings marker.
	pub fn is_settings_line(line: &str) -> bool {
		line.split_whitespace().next() == Some(SETTINGS_MARKER)
	}

	/// Parses a settings line for a machine with `num_rotors` slots.
	pub fn parse(line: &str, num_rotors: usize) -> Result<Self> {
		let mut tokens = line.split_whitespace().peekable();
		if tokens.next() != Some(SETTINGS_MARKER) {
			return Err(bad_settings(format!(
				"settings must start with '{}'",
				SETTINGS_MARKER
			)));
		}

		let rotors: Vec<String> = tokens.by_ref().take(num_rotors).map(String::from).collect();
		if rotors.len() != num_rotors {
			return Err(bad_settings(format!(
				"expected {} rotor names, got {}",
				num_rotors,
				rotors.len()
			)));
		}

		let positions = tokens
			.next()
			.filter(|t| !is_cycle_token(t))
			.ok_or_else(|| bad_settings("missing rotor positions".to_string()))?
			.to_string();

		let rings = tokens.next_if(|t| !is_cycle_token(t)).map(String::from);

		let mut plugboard = String::new();
		for token in tokens {
			if !is_cycle_token(token) {
				return Err(bad_settings(format!("unexpected '{}' in plugboard", token)));
			}
			plugboard.push_str(token);
		}

		Ok(Settings {
			rotors,
			positions,
			rings,
			plugboard,
		})
	}

	/// Sets up `machine` for a new message. On error `machine` is unchanged.
	pub fn apply(&self, machine: &mut Machine) -> Result<()> {
		let plugboard = Permutation::new(&self.plugboard, Arc::clone(machine.alphabet()))?;

		let mut staged = machine.clone();
		staged.insert_rotors(self.rotors.as_slice())?;
		staged.set_rotors(&self.positions)?;
		if let Some(rings) = &self.rings {
			staged.set_rings(rings)?;
		}
		staged.set_plugboard(plugboard)?;

		debug!(
			rotors = ?self.rotors,
			positions = %self.positions,
			rings = ?self.rings,
			plugboard = %staged.plugboard().permutation(),
			"machine set"
		);

		*machine = staged;
		Ok(())
	}
}
