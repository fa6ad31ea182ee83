use thiserror::Error;

/// Errors raised while building or driving a rotor machine.
///
/// Setup either succeeds completely or fails with one of these before any
/// machine state changes. Converting text on a fully configured machine only
/// fails for symbols outside the alphabet.
#[derive(Error, Debug)]
pub enum EnigmaError {
	// === Configuration errors ===
	/// The alphabet has no symbols.
	#[error("alphabet is empty")]
	EmptyAlphabet,

	/// A symbol occurs twice in the alphabet.
	#[error("duplicate symbol '{symbol}' in alphabet")]
	DuplicateSymbol { symbol: char },

	/// The alphabet contains a symbol used as a delimiter.
	#[error("symbol {symbol:?} is reserved and cannot be part of an alphabet")]
	ReservedSymbol { symbol: char },

	/// Cycle notation could not be split into parenthesized groups.
	#[error("malformed cycle notation: {detail}")]
	MalformedCycle { detail: String },

	/// The same symbol appears in two cycles (or twice in one).
	#[error("symbol '{symbol}' appears in more than one cycle")]
	RepeatedCycleSymbol { symbol: char },

	/// A settings line names a rotor that is not available.
	#[error("no rotor named '{name}'")]
	UnknownRotor { name: String },

	/// The rotor list does not fill every slot.
	#[error("expected {expected} rotors, got {actual}")]
	RotorCount { expected: usize, actual: usize },

	/// The leftmost slot holds something other than a reflector.
	#[error("rotor '{name}' cannot occupy the reflector slot")]
	ReflectorRequired { name: String },

	/// A reflector was named for a slot other than the leftmost.
	#[error("reflector '{name}' cannot occupy slot {slot}")]
	ReflectorMisplaced { name: String, slot: usize },

	/// A moving rotor was placed in a slot with no pawl.
	#[error("moving rotor '{name}' cannot occupy slot {slot}")]
	MovingRotorMisplaced { name: String, slot: usize },

	/// A position or ring setting has the wrong number of symbols.
	#[error("setting '{setting}' has {actual} symbols, expected {expected}")]
	SettingLength {
		setting: String,
		expected: usize,
		actual: usize,
	},

	/// Slot and pawl counts do not describe a machine.
	#[error("a machine with {num_rotors} slots cannot have {pawls} pawls")]
	BadPawlCount { num_rotors: usize, pawls: usize },

	/// A rotor or plugboard is wired over a different alphabet.
	#[error("'{name}' is wired over a different alphabet than the machine")]
	AlphabetMismatch { name: String },

	/// The configuration text ended early.
	#[error("configuration truncated: {detail}")]
	Truncated { detail: String },

	/// The configuration text is present but not understood.
	#[error("invalid configuration: {detail}")]
	InvalidConfig { detail: String },

	/// A rotor description in the configuration text is malformed.
	#[error("bad rotor description: {detail}")]
	BadRotorDescription { detail: String },

	/// A settings line is malformed.
	#[error("bad settings line: {detail}")]
	BadSettings { detail: String },

	/// Conversion was requested before every slot was filled.
	#[error("machine has {installed} of {expected} rotors installed")]
	NotConfigured { installed: usize, expected: usize },

	/// A message arrived before any settings line.
	#[error("input does not start with a settings line")]
	MissingSettings,

	// === Contract violations ===
	/// An operation the rotor variant does not support.
	#[error("rotor '{name}': {operation}")]
	InvalidOperation { name: String, operation: &'static str },

	// === Lookup errors ===
	/// A symbol is not a member of the alphabet.
	#[error("symbol {symbol:?} is not in the alphabet")]
	NotInAlphabet { symbol: char },

	// === I/O ===
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

/// Broad classes of [`EnigmaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Malformed or inconsistent configuration, caught at setup time.
	Configuration,
	/// A rotor was asked to do something its variant cannot.
	InvalidOperation,
	/// A symbol outside the alphabet.
	Lookup,
	Io,
}

impl EnigmaError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::EmptyAlphabet
			| Self::DuplicateSymbol { .. }
			| Self::ReservedSymbol { .. }
			| Self::MalformedCycle { .. }
			| Self::RepeatedCycleSymbol { .. }
			| Self::UnknownRotor { .. }
			| Self::RotorCount { .. }
			| Self::ReflectorRequired { .. }
			| Self::ReflectorMisplaced { .. }
			| Self::MovingRotorMisplaced { .. }
			| Self::SettingLength { .. }
			| Self::BadPawlCount { .. }
			| Self::AlphabetMismatch { .. }
			| Self::Truncated { .. }
			| Self::InvalidConfig { .. }
			| Self::BadRotorDescription { .. }
			| Self::BadSettings { .. }
			| Self::NotConfigured { .. }
			| Self::MissingSettings => ErrorKind::Configuration,
			Self::InvalidOperation { .. } => ErrorKind::InvalidOperation,
			Self::NotInAlphabet { .. } => ErrorKind::Lookup,
			Self::Io(_) => ErrorKind::Io,
		}
	}
}

pub type Result<T> = std::result::Result<T, EnigmaError>;
