//! Rotor cipher machine simulator.
//!
//! A [`Machine`] holds a reflector, a stack of rotors and a plugboard. Every
//! keystroke first steps the rotors (double step included), then sends the
//! signal through the plugboard, right to left through the rotors into the
//! reflector, and back out again. Wiring is given in cycle notation over an
//! arbitrary [`Alphabet`].
//!
//! ```
//! use std::sync::Arc;
//! use rotor_enigma::{Alphabet, Machine, Permutation, RotorSpec};
//!
//! let alpha = Arc::new(Alphabet::upper());
//! let wiring = |c: &str| Permutation::new(c, Arc::clone(&alpha)).unwrap();
//! let rotors = vec![
//! 	Arc::new(RotorSpec::reflector("B", wiring(
//! 		"(AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)"))),
//! 	Arc::new(RotorSpec::moving("I", wiring(
//! 		"(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)"), "Q").unwrap()),
//! 	Arc::new(RotorSpec::moving("II", wiring(
//! 		"(FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)"), "E").unwrap()),
//! 	Arc::new(RotorSpec::moving("III", wiring(
//! 		"(ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)"), "V").unwrap()),
//! ];
//!
//! let mut machine = Machine::new(Arc::clone(&alpha), 4, 3, rotors).unwrap();
//! machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
//! machine.set_rotors("AAA").unwrap();
//! assert_eq!(machine.convert("AAAAA").unwrap(), "BDZGO");
//! ```

pub mod alphabet;
pub mod config;
pub mod error;
pub mod machine;
pub mod permutation;
pub mod rotor;
pub mod session;

pub use alphabet::Alphabet;
pub use config::{MachineConfig, Settings};
pub use error::{EnigmaError, ErrorKind, Result};
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorKind, RotorSpec};
pub use session::{group_blocks, Session};
