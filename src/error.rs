use thiserror::Error;

use crate::input::KEY_COUNT;

/// Errors that can come out of the sandbox.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A raw key code was outside the range of the key table.
    #[error("key code {code} is outside the supported range 0..{max}", max = KEY_COUNT)]
    KeyOutOfRange { code: u16 },

    /// A shader program failed to compile or link.
    #[error("failed to build shader program `{name}`: {message}")]
    Shader { name: &'static str, message: String },
}
