use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};

/// A bijection over the indices of an alphabet, written as disjoint cycles.
///
/// Indices that appear in no cycle map to themselves. Lookups go through
/// tables built once at construction; the cycles are kept for
/// `derangement` and display.
#[derive(Debug, Clone)]
pub struct Permutation {
	alphabet: Arc<Alphabet>,
	cycles: Vec<Vec<usize>>,
	forward: Vec<usize>,
	inverse: Vec<usize>,
}

impl Permutation {
	/// Parses `cycles` of the form `"(cccc) (cc) ..."` over `alphabet`.
	/// Whitespace is ignored and empty text gives the identity.
	pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Self> {
		let cycles = parse_cycles(cycles, &alphabet)?;
		Ok(Self::from_cycles(cycles, alphabet))
	}

	pub fn identity(alphabet: Arc<Alphabet>) -> Self {
		Self::from_cycles(Vec::new(), alphabet)
	}

	fn from_cycles(cycles: Vec<Vec<usize>>, alphabet: Arc<Alphabet>) -> Self {
		let n = alphabet.size();
		let mut forward: Vec<usize> = (0..n).collect();
		let mut inverse: Vec<usize> = (0..n).collect();

		for cycle in &cycles {
			for (k, &from) in cycle.iter().enumerate() {
				let to = cycle[(k + 1) % cycle.len()];
				forward[from] = to;
				inverse[to] = from;
			}
		}

		Permutation {
			alphabet,
			cycles,
			forward,
			inverse,
		}
	}

	/// Size of the alphabet I permute.
	pub fn size(&self) -> usize {
		self.alphabet.size()
	}

	pub fn alphabet(&self) -> &Arc<Alphabet> {
		&self.alphabet
	}

	pub fn cycles(&self) -> &[Vec<usize>] {
		&self.cycles
	}

	/// `p` modulo the alphabet size.
	pub fn wrap(&self, p: isize) -> usize {
		self.alphabet.wrap(p)
	}

	/// Applies the permutation to `p` modulo the alphabet size.
	pub fn permute(&self, p: isize) -> usize {
		self.forward[self.wrap(p)]
	}

	/// Applies the inverse permutation to `c` modulo the alphabet size.
	pub fn invert(&self, c: isize) -> usize {
		self.inverse[self.wrap(c)]
	}

	pub fn permute_symbol(&self, p: char) -> Result<char> {
		let i = self.alphabet.to_index(p)?;
		Ok(self.alphabet.to_symbol(self.forward[i]))
	}

	pub fn invert_symbol(&self, c: char) -> Result<char> {
		let i = self.alphabet.to_index(c)?;
		Ok(self.alphabet.to_symbol(self.inverse[i]))
	}

	/// True iff no symbol maps to itself.
	pub fn derangement(&self) -> bool {
		let moved: usize = self
			.cycles
			.iter()
			.filter(|c| c.len() > 1)
			.map(|c| c.len())
			.sum();
		moved == self.size()
	}
}

impl fmt::Display for Permutation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (k, cycle) in self.cycles.iter().enumerate() {
			if k > 0 {
				write!(f, " ")?;
			}
			write!(f, "(")?;
			for &i in cycle {
				write!(f, "{}", self.alphabet.to_symbol(i))?;
			}
			write!(f, ")")?;
		}
		Ok(())
	}
}

fn malformed(detail: impl Into<String>) -> EnigmaError {
	EnigmaError::MalformedCycle {
		detail: detail.into(),
	}
}

fn parse_cycles(text: &str, alphabet: &Alphabet) -> Result<Vec<Vec<usize>>> {
	let mut cycles = Vec::new();
	let mut seen = vec![false; alphabet.size()];
	let mut open: Option<Vec<usize>> = None;

	for c in text.chars().filter(|c| !c.is_whitespace()) {
		match c {
			'(' => {
				if open.is_some() {
					return Err(malformed(format!("nested '(' in \"{}\"", text.trim())));
				}
				open = Some(Vec::new());
			}
			')' => match open.take() {
				None => return Err(malformed(format!("unmatched ')' in \"{}\"", text.trim()))),
				// empty groups contribute nothing
				Some(cycle) if cycle.is_empty() => {}
				Some(cycle) => cycles.push(cycle),
			},
			_ => {
				let cycle = open.as_mut().ok_or_else(|| {
					malformed(format!("'{}' outside parentheses in \"{}\"", c, text.trim()))
				})?;
				let i = alphabet.to_index(c)?;
				if seen[i] {
					return Err(EnigmaError::RepeatedCycleSymbol { symbol: c });
				}
				seen[i] = true;
				cycle.push(i);
			}
		}
	}

	if open.is_some() {
		return Err(malformed(format!("unclosed '(' in \"{}\"", text.trim())));
	}

	Ok(cycles)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;

	const ROTOR_I: &str = "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)";
	const ROTOR_V: &str = "(AVOLDRWFIUQ)(BZKSMNHYC) (EGTJPX)";
	const ROTOR_VI: &str = "(AJQDVLEOZWIYTS) (CGMNHFUX) (BPRK)";

	fn upper() -> Arc<Alphabet> {
		Arc::new(Alphabet::upper())
	}

	/// Checks that `perm` maps each symbol of `from` to the matching symbol
	/// of `to`, and back, at both the symbol and the index level.
	fn check_perm(perm: &Permutation, from: &str, to: &str) {
		let alpha = perm.alphabet().clone();
		for (c, e) in from.chars().zip(to.chars()) {
			assert_eq!(perm.permute_symbol(c).unwrap(), e, "wrong translation of '{}'", c);
			assert_eq!(perm.invert_symbol(e).unwrap(), c, "wrong inverse of '{}'", e);
			let ci = alpha.to_index(c).unwrap() as isize;
			let ei = alpha.to_index(e).unwrap();
			assert_eq!(perm.permute(ci), ei, "wrong translation of {}", ci);
			assert_eq!(perm.invert(ei as isize), ci as usize, "wrong inverse of {}", ei);
		}
	}

	#[test]
	fn identity_from_empty_text() {
		let perm = Permutation::new("", upper()).unwrap();
		let all: String = Alphabet::upper().symbols().collect();
		check_perm(&perm, &all, &all);
		assert!(perm.cycles().is_empty());
	}

	#[test]
	fn rotor_wiring() {
		let perm = Permutation::new(ROTOR_I, upper()).unwrap();
		check_perm(&perm, "ABCDE", "EKMFL");
		check_perm(
			&perm,
			"THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG",
			"PQLXAVMNKUYBWGYRZAOHSYILUPQLTEJCFYD",
		);
	}

	#[test]
	fn large_alphabet() {
		let alpha = Arc::new(
			Alphabet::new("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_.").unwrap(),
		);
		let perm = Permutation::new(
			"(AR) (BD) (CO) (EJ) (FN) (GT) (HK) (IV) (LM) \
			 (PW) (ar) (bd) (co) (ej) (fn) (gt) (hk) (iv) (lm)\
			           (pw) (QZ) (SX) (UY) (qz) (sx) (uy) (_.)",
			alpha,
		)
		.unwrap();
		check_perm(&perm, ".qFlu", "_zNmy");
	}

	#[test]
	fn out_of_range_indices_wrap() {
		let perm = Permutation::new(ROTOR_I, upper()).unwrap();
		// A -> E
		assert_eq!(perm.permute(0), 4);
		assert_eq!(perm.permute(26), 4);
		assert_eq!(perm.permute(-26), 4);
		// (JZ)
		assert_eq!(perm.permute(-1), 9);
		assert_eq!(perm.invert(-17), 25);
	}

	#[test]
	fn derangements() {
		assert!(!Permutation::new(ROTOR_I, upper()).unwrap().derangement());
		assert!(Permutation::new(ROTOR_V, upper()).unwrap().derangement());
		assert!(Permutation::new(ROTOR_VI, upper()).unwrap().derangement());

		let five = Arc::new(Alphabet::new("ABCDE").unwrap());
		assert!(Permutation::new("(ABCDE)", five.clone()).unwrap().derangement());
		assert!(!Permutation::new("(AB)", five.clone()).unwrap().derangement());
		assert!(!Permutation::new("(AB)(CD)(E)", five).unwrap().derangement());
	}

	#[test]
	fn singleton_cycles_are_fixed_points() {
		let perm = Permutation::new(ROTOR_I, upper()).unwrap();
		assert_eq!(perm.permute_symbol('S').unwrap(), 'S');
		assert_eq!(perm.invert_symbol('S').unwrap(), 'S');
	}

	#[test]
	fn empty_groups_are_ignored() {
		let perm = Permutation::new("() (AB) ()", upper()).unwrap();
		assert_eq!(perm.cycles().len(), 1);
		assert_eq!(perm.permute_symbol('A').unwrap(), 'B');
	}

	#[test]
	fn malformed_text_is_rejected() {
		for text in ["AB", "(AB", "AB)", "(A(B))", "(AB) C", "(AB))"] {
			let err = Permutation::new(text, upper()).unwrap_err();
			assert!(
				matches!(err, EnigmaError::MalformedCycle { .. }),
				"{:?} gave {:?}",
				text,
				err
			);
			assert_eq!(err.kind(), ErrorKind::Configuration);
		}
	}

	#[test]
	fn cycles_must_be_disjoint() {
		assert!(matches!(
			Permutation::new("(AB) (BC)", upper()),
			Err(EnigmaError::RepeatedCycleSymbol { symbol: 'B' })
		));
		assert!(matches!(
			Permutation::new("(ABA)", upper()),
			Err(EnigmaError::RepeatedCycleSymbol { symbol: 'A' })
		));
	}

	#[test]
	fn unknown_symbol_is_lookup_error() {
		let err = Permutation::new("(Ab)", upper()).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Lookup);
	}

	#[test]
	fn displays_cycle_notation() {
		let perm = Permutation::new("(HQ)(EX) (IP)", upper()).unwrap();
		assert_eq!(perm.to_string(), "(HQ) (EX) (IP)");
	}
}
