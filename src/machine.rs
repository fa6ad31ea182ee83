use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;
use crate::rotor::{Rotor, RotorSpec};

/// A complete rotor machine: a reflector and rotors in slots 0..n
/// (0 is leftmost), plus a plugboard.
#[derive(Debug, Clone)]
pub struct Machine {
	alphabet: Arc<Alphabet>,
	num_rotors: usize,		// slots, reflector included
	pawls: usize,			// rightmost slots able to step
	available: Vec<Arc<RotorSpec>>,
	rotors: Vec<Rotor>,
	plugboard: Rotor,
}

impl Machine {
	/// A machine with `num_rotors` slots and `pawls` pawls that installs
	/// rotors from `available`. No rotors are installed yet and the
	/// plugboard is the identity.
	pub fn new(
		alphabet: Arc<Alphabet>,
		num_rotors: usize,
		pawls: usize,
		available: Vec<Arc<RotorSpec>>,
	) -> Result<Self> {
		if num_rotors == 0 || pawls >= num_rotors {
			return Err(EnigmaError::BadPawlCount { num_rotors, pawls });
		}
		if let Some(spec) = available.iter().find(|s| **s.wiring().alphabet() != *alphabet) {
			return Err(EnigmaError::AlphabetMismatch {
				name: spec.name().to_string(),
			});
		}

		Ok(Machine {
			plugboard: Rotor::plugboard(Permutation::identity(Arc::clone(&alphabet))),
			alphabet,
			num_rotors,
			pawls,
			available,
			rotors: Vec::with_capacity(num_rotors),
		})
	}

	pub fn alphabet(&self) -> &Arc<Alphabet> {
		&self.alphabet
	}

	/// Number of rotor slots, reflector included.
	pub fn num_rotors(&self) -> usize {
		self.num_rotors
	}

	/// Number of pawls, and so of rotors that may move.
	pub fn num_pawls(&self) -> usize {
		self.pawls
	}

	/// Number of rotors currently installed.
	pub fn installed(&self) -> usize {
		self.rotors.len()
	}

	pub fn rotor(&self, index: usize) -> Option<&Rotor> {
		self.rotors.get(index)
	}

	pub fn rotors(&self) -> &[Rotor] {
		&self.rotors
	}

	pub fn plugboard(&self) -> &Rotor {
		&self.plugboard
	}

	pub fn available(&self) -> &[Arc<RotorSpec>] {
		&self.available
	}

	/// Window symbols of every installed rotor except the reflector.
	pub fn positions(&self) -> String {
		self.rotors
			.iter()
			.skip(1)
			.map(|r| self.alphabet.to_symbol(r.position()))
			.collect()
	}

	fn find(&self, name: &str) -> Result<&Arc<RotorSpec>> {
		self.available
			.iter()
			.find(|spec| spec.name() == name)
			.ok_or_else(|| EnigmaError::UnknownRotor {
				name: name.to_string(),
			})
	}

	/// Fills my slots with fresh rotors named by `names`, where `names[0]`
	/// is the reflector. Every rotor starts at position 0, ring 0.
	pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
		if names.len() != self.num_rotors {
			return Err(EnigmaError::RotorCount {
				expected: self.num_rotors,
				actual: names.len(),
			});
		}

		let first_moving = self.num_rotors - self.pawls;
		let mut rotors = Vec::with_capacity(self.num_rotors);
		for (slot, name) in names.iter().enumerate() {
			let rotor = self.find(name.as_ref())?.instantiate();

			if slot == 0 && !rotor.reflecting() {
				return Err(EnigmaError::ReflectorRequired {
					name: rotor.name().to_string(),
				});
			}
			if slot > 0 && rotor.reflecting() {
				return Err(EnigmaError::ReflectorMisplaced {
					name: rotor.name().to_string(),
					slot,
				});
			}
			if slot > 0 && slot < first_moving && rotor.rotates() {
				return Err(EnigmaError::MovingRotorMisplaced {
					name: rotor.name().to_string(),
					slot,
				});
			}

			rotors.push(rotor);
		}

		self.rotors = rotors;
		Ok(())
	}

	/// Resolves one symbol of `setting` per non-reflector slot.
	fn resolve_setting(&self, setting: &str) -> Result<Vec<usize>> {
		self.ensure_configured()?;

		let expected = self.rotors.len() - 1;
		let actual = setting.chars().count();
		if actual != expected {
			return Err(EnigmaError::SettingLength {
				setting: setting.to_string(),
				expected,
				actual,
			});
		}

		setting.chars().map(|c| self.alphabet.to_index(c)).collect()
	}

	/// Sets rotor positions from `setting`, one symbol per slot starting at
	/// the leftmost rotor after the reflector.
	pub fn set_rotors(&mut self, setting: &str) -> Result<()> {
		let posns = self.resolve_setting(setting)?;
		for (rotor, posn) in self.rotors[1..].iter_mut().zip(posns) {
			rotor.set(posn as isize)?;
		}
		Ok(())
	}

	/// Sets ring settings from `setting`, laid out like [`Machine::set_rotors`].
	pub fn set_rings(&mut self, setting: &str) -> Result<()> {
		let rings = self.resolve_setting(setting)?;
		for (rotor, ring) in self.rotors[1..].iter_mut().zip(rings) {
			rotor.set_ring(ring as isize)?;
		}
		Ok(())
	}

	pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<()> {
		if **plugboard.alphabet() != *self.alphabet {
			return Err(EnigmaError::AlphabetMismatch {
				name: "Plugboard".to_string(),
			});
		}
		self.plugboard = Rotor::plugboard(plugboard);
		Ok(())
	}

	fn ensure_configured(&self) -> Result<()> {
		if self.rotors.len() != self.num_rotors {
			return Err(EnigmaError::NotConfigured {
				installed: self.rotors.len(),
				expected: self.num_rotors,
			});
		}
		Ok(())
	}

	/// Which slots move on the next keystroke, judged entirely from the
	/// current positions.
	fn will_advance(&self) -> Vec<bool> {
		let n = self.rotors.len();
		(0..n)
			.map(|i| {
				let rotor = &self.rotors[i];
				if i == 0 || i == n - 1 {
					rotor.rotates()
				} else {
					let right = &self.rotors[i + 1];
					let left = &self.rotors[i - 1];
					(right.at_notch() && rotor.rotates())
						|| (rotor.at_notch() && left.rotates())
				}
			})
			.collect()
	}

	/// Steps every rotor that is due, all at once. A middle rotor sitting on
	/// its notch moves together with its left neighbour, which gives the
	/// double step.
	fn advance_rotors(&mut self) {
		let due = self.will_advance();
		for (rotor, go) in self.rotors.iter_mut().zip(due) {
			if go {
				rotor.step();
			}
		}
	}

	/// Converts index `c` after first advancing the machine.
	pub fn convert_index(&mut self, mut c: usize) -> usize {
		self.advance_rotors();

		c = self.plugboard.convert_forward(c);

		// right to left, ending in the reflector
		for rotor in self.rotors.iter().rev() {
			c = rotor.convert_forward(c);
		}

		// and back out, skipping the reflector
		for rotor in self.rotors.iter().skip(1) {
			c = rotor.convert_backward(c);
		}

		self.plugboard.convert_backward(c)
	}

	pub fn convert_symbol(&mut self, c: char) -> Result<char> {
		self.ensure_configured()?;
		let i = self.alphabet.to_index(c)?;
		let out = self.convert_index(i);
		Ok(self.alphabet.to_symbol(out))
	}

	/// Converts `msg` one symbol at a time, left to right, advancing the
	/// rotors before each. No rotor moves unless every symbol is in the
	/// alphabet.
	pub fn convert(&mut self, msg: &str) -> Result<String> {
		self.ensure_configured()?;
		let indices = msg
			.chars()
			.map(|c| self.alphabet.to_index(c))
			.collect::<Result<Vec<_>>>()?;

		Ok(indices
			.into_iter()
			.map(|i| {
				let out = self.convert_index(i);
				self.alphabet.to_symbol(out)
			})
			.collect())
	}
}

impl fmt::Display for Machine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for rotor in &self.rotors {
			writeln!(f, "{}", rotor)?;
		}
		write!(f, "Plugboard {}", self.plugboard.permutation())
	}
}
