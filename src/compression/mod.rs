//! The compression module drives whole files through the coder.
//!
//! Encoding a file happens in the following steps:
//! - Count the bytes of the input. The counts are the symbol weights.
//! - Build the code tree from those weights.
//! - Save the tree as a code table (`<stem>.code`).
//! - Write the exact payload bit count, then every byte's code path, to `<stem>.short`.
//!
//! Decoding follows the inverse of that process:
//! - Load the code table and rebuild the tree.
//! - Read the bit count, then walk the tree one bit at a time, writing symbols to `<stem>.new`.
//!

pub mod compress;
pub mod decompress;
