use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;

/// What a rotor is able to do in the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
	/// Has a ratchet; `notches` are alphabet indices.
	Moving { notches: Vec<usize> },
	/// Never moves. Also used for the plugboard.
	Fixed,
	/// Never moves and folds the signal back through the stack.
	Reflector,
}

/// The immutable part of a rotor: name, variant and wiring at position 0.
///
/// Specs are shared between machines; every installed slot gets its own
/// [`Rotor`] with independent position and ring state.
#[derive(Debug, Clone)]
pub struct RotorSpec {
	name: String,
	kind: RotorKind,
	wiring: Arc<Permutation>,
}

impl RotorSpec {
	pub fn new(name: impl Into<String>, kind: RotorKind, wiring: Permutation) -> Self {
		RotorSpec {
			name: name.into(),
			kind,
			wiring: Arc::new(wiring),
		}
	}

	/// A moving rotor whose notches are the symbols of `notches`.
	pub fn moving(name: impl Into<String>, wiring: Permutation, notches: &str) -> Result<Self> {
		let notches = notches
			.chars()
			.map(|c| wiring.alphabet().to_index(c))
			.collect::<Result<Vec<_>>>()?;
		Ok(Self::new(name, RotorKind::Moving { notches }, wiring))
	}

	pub fn fixed(name: impl Into<String>, wiring: Permutation) -> Self {
		Self::new(name, RotorKind::Fixed, wiring)
	}

	pub fn reflector(name: impl Into<String>, wiring: Permutation) -> Self {
		Self::new(name, RotorKind::Reflector, wiring)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> &RotorKind {
		&self.kind
	}

	pub fn wiring(&self) -> &Permutation {
		&self.wiring
	}

	/// A fresh rotor at position 0 with ring setting 0.
	pub fn instantiate(self: &Arc<Self>) -> Rotor {
		Rotor::new(Arc::clone(self))
	}
}

/// A rotor installed in a slot: a shared spec plus its own offsets.
#[derive(Debug, Clone)]
pub struct Rotor {
	spec: Arc<RotorSpec>,
	position: usize,	// rotational offset
	ring: usize,		// ringstellung
}

impl Rotor {
	pub fn new(spec: Arc<RotorSpec>) -> Self {
		Rotor {
			spec,
			position: 0,
			ring: 0,
		}
	}

	/// A non-moving rotor named "Plugboard" wrapping `wiring`.
	pub fn plugboard(wiring: Permutation) -> Self {
		Rotor::new(Arc::new(RotorSpec::fixed("Plugboard", wiring)))
	}

	pub fn name(&self) -> &str {
		self.spec.name()
	}

	pub fn kind(&self) -> &RotorKind {
		self.spec.kind()
	}

	pub fn spec(&self) -> &Arc<RotorSpec> {
		&self.spec
	}

	pub fn permutation(&self) -> &Permutation {
		self.spec.wiring()
	}

	pub fn alphabet(&self) -> &Alphabet {
		self.permutation().alphabet()
	}

	pub fn size(&self) -> usize {
		self.permutation().size()
	}

	/// True iff I have a ratchet and can move.
	pub fn rotates(&self) -> bool {
		matches!(self.kind(), RotorKind::Moving { .. })
	}

	pub fn reflecting(&self) -> bool {
		matches!(self.kind(), RotorKind::Reflector)
	}

	pub fn position(&self) -> usize {
		self.position
	}

	pub fn ring(&self) -> usize {
		self.ring
	}

	fn fixed_at_zero(&self, value: usize, operation: &'static str) -> Result<()> {
		if self.reflecting() && value != 0 {
			return Err(EnigmaError::InvalidOperation {
				name: self.name().to_string(),
				operation,
			});
		}
		Ok(())
	}

	/// Sets my position to `posn` modulo the alphabet size.
	pub fn set(&mut self, posn: isize) -> Result<()> {
		let posn = self.permutation().wrap(posn);
		self.fixed_at_zero(posn, "reflector position is fixed")?;
		self.position = posn;
		Ok(())
	}

	/// Sets my position to the index of `c`.
	pub fn set_symbol(&mut self, c: char) -> Result<()> {
		let posn = self.alphabet().to_index(c)?;
		self.set(posn as isize)
	}

	pub fn set_ring(&mut self, ring: isize) -> Result<()> {
		let ring = self.permutation().wrap(ring);
		self.fixed_at_zero(ring, "reflector ring setting is fixed")?;
		self.ring = ring;
		Ok(())
	}

	pub fn set_ring_symbol(&mut self, c: char) -> Result<()> {
		let ring = self.alphabet().to_index(c)?;
		self.set_ring(ring as isize)
	}

	fn offset(&self) -> isize {
		self.position as isize - self.ring as isize
	}

	/// Converts contact `p` through my wiring, corrected for position and ring.
	pub fn convert_forward(&self, p: usize) -> usize {
		let shift = self.offset();
		let contact = self.permutation().permute(p as isize + shift);
		self.permutation().wrap(contact as isize - shift)
	}

	/// Converts contact `e` through the inverse of my wiring.
	pub fn convert_backward(&self, e: usize) -> usize {
		let shift = self.offset();
		let contact = self.permutation().invert(e as isize + shift);
		self.permutation().wrap(contact as isize - shift)
	}

	/// True iff I am positioned to let the rotor on my left advance.
	pub fn at_notch(&self) -> bool {
		match self.kind() {
			RotorKind::Moving { notches } => notches.contains(&self.position),
			RotorKind::Fixed | RotorKind::Reflector => false,
		}
	}

	/// Advances me one position. Reflectors ignore this; fixed rotors have
	/// no ratchet and refuse.
	pub fn advance(&mut self) -> Result<()> {
		match self.kind() {
			RotorKind::Moving { .. } => {
				self.step();
				Ok(())
			}
			RotorKind::Reflector => Ok(()),
			RotorKind::Fixed => Err(EnigmaError::InvalidOperation {
				name: self.name().to_string(),
				operation: "fixed rotor cannot advance",
			}),
		}
	}

	/// Moves one position without consulting the variant. Only called for
	/// slots the machine has already found to rotate.
	pub(crate) fn step(&mut self) {
		self.position = (self.position + 1) % self.size();
	}
}

impl fmt::Display for Rotor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Rotor {}, position {}, ring {}, perm {}",
			self.name(),
			self.alphabet().to_symbol(self.position),
			self.alphabet().to_symbol(self.ring),
			self.permutation()
		)
	}
}
