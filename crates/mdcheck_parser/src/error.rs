//! Parser error types.

use thiserror::Error;

/// Errors that can occur while building the token tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Block quotes nested beyond the supported depth.
    #[error("block quotes nested deeper than {max} levels at line {line}")]
    NestingTooDeep {
        /// Line where the limit was exceeded.
        line: u32,
        /// The supported nesting depth.
        max: usize,
    },
}
