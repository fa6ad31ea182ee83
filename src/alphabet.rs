use std::fmt;

use crate::error::{EnigmaError, Result};

/// An ordered set of distinct symbols. The K-th symbol has index K.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
	symbols: Vec<char>,
}

impl Alphabet {
	/// Builds an alphabet from `symbols` in order.
	///
	/// Parentheses and whitespace delimit cycle notation and settings
	/// tokens, so they are rejected along with duplicates.
	pub fn new(symbols: &str) -> Result<Self> {
		let mut chars: Vec<char> = Vec::with_capacity(symbols.len());
		for c in symbols.chars() {
			if c == '(' || c == ')' || c.is_whitespace() {
				return Err(EnigmaError::ReservedSymbol { symbol: c });
			}
			if chars.contains(&c) {
				return Err(EnigmaError::DuplicateSymbol { symbol: c });
			}
			chars.push(c);
		}

		if chars.is_empty() {
			return Err(EnigmaError::EmptyAlphabet);
		}

		Ok(Alphabet { symbols: chars })
	}

	/// The 26 upper-case Latin letters.
	pub fn upper() -> Self {
		Alphabet {
			symbols: ('A'..='Z').collect(),
		}
	}

	pub fn size(&self) -> usize {
		self.symbols.len()
	}

	pub fn contains(&self, c: char) -> bool {
		self.symbols.contains(&c)
	}

	/// Index of `c`, the inverse of [`Alphabet::to_symbol`].
	pub fn to_index(&self, c: char) -> Result<usize> {
		self.symbols
			.iter()
			.position(|&s| s == c)
			.ok_or(EnigmaError::NotInAlphabet { symbol: c })
	}

	/// Symbol number `index`.
	///
	/// # Panics
	///
	/// If `index >= self.size()`.
	pub fn to_symbol(&self, index: usize) -> char {
		self.symbols[index]
	}

	/// `p` reduced into `0..size()`, wrapping negatives around.
	pub fn wrap(&self, p: isize) -> usize {
		p.rem_euclid(self.symbols.len() as isize) as usize
	}

	pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
		self.symbols.iter().copied()
	}
}

impl Default for Alphabet {
	fn default() -> Self {
		Alphabet::upper()
	}
}

impl fmt::Display for Alphabet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for c in &self.symbols {
			write!(f, "{}", c)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;

	#[test]
	fn sizes() {
		assert_eq!(Alphabet::upper().size(), 26);
		assert_eq!(Alphabet::new("ABCDEFGHIJKLM").unwrap().size(), 13);
	}

	#[test]
	fn contains_only_members() {
		let half = Alphabet::new("ABCDEFGHIJKLM").unwrap();
		assert!(Alphabet::default().contains('Z'));
		assert!(!half.contains('Z'));
	}

	#[test]
	fn index_and_symbol_are_inverse() {
		let alpha = Alphabet::new("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_.").unwrap();
		for (i, c) in alpha.symbols().enumerate() {
			assert_eq!(alpha.to_index(c).unwrap(), i);
			assert_eq!(alpha.to_symbol(i), c);
		}
		assert_eq!(alpha.to_symbol(alpha.to_index('.').unwrap()), '.');
	}

	#[test]
	fn non_member_is_lookup_error() {
		let half = Alphabet::new("ABCDEFGHIJKLM").unwrap();
		let err = half.to_index('Z').unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Lookup);
	}

	#[test]
	fn rejects_bad_alphabets() {
		assert!(matches!(
			Alphabet::new("ABCA"),
			Err(EnigmaError::DuplicateSymbol { symbol: 'A' })
		));
		assert!(matches!(Alphabet::new(""), Err(EnigmaError::EmptyAlphabet)));
		assert!(matches!(
			Alphabet::new("AB(C"),
			Err(EnigmaError::ReservedSymbol { symbol: '(' })
		));
		assert!(matches!(
			Alphabet::new("AB C"),
			Err(EnigmaError::ReservedSymbol { symbol: ' ' })
		));
	}

	#[test]
	fn wrap_handles_negative_and_large() {
		let alpha = Alphabet::upper();
		assert_eq!(alpha.wrap(-1), 25);
		assert_eq!(alpha.wrap(-27), 25);
		assert_eq!(alpha.wrap(26), 0);
		assert_eq!(alpha.wrap(53), 1);
	}

	#[test]
	fn displays_symbols_in_order() {
		assert_eq!(Alphabet::new("XYZ").unwrap().to_string(), "XYZ");
	}
}
