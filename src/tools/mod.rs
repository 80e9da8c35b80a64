//! The tools module provides helper functions for huffcode.
//!
//! The tools are:
//! - cli: Command line interface.
//! - freq_count: Byte frequency count, the weights a code tree is built from.
//!
pub mod cli;
pub mod freq_count;
