//! Compiler Output Parser
//!
//! Turns GCC/Clang stderr into structured diagnostics. Focused solely on
//! the `file:line[:col]: severity: message` shape both front ends share.

pub mod gnu;

pub use gnu::parse_output;
