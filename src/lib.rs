//! Decoder for scrambled seven-segment display readings.
//!
//! Each entry of the puzzle input shows all ten digits through one
//! unknown permutation of the seven segment wires, then four output
//! digits scrambled the same way.  [`pattern`] canonicalizes raw
//! tokens into wire sets, [`entry`] parses and validates one input
//! line, [`deduce`] recovers the digit and wire maps from the ten
//! observed patterns, and [`output`] reads the four-digit value.

pub mod deduce;
pub mod entry;
pub mod output;
pub mod pattern;
