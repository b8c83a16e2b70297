//! Naming error types.

use thiserror::Error;

pub type NamingResult<T> = Result<T, NamingError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// Every numeric suffix for a shortened candidate is already taken.
    #[error(
        "Name space exhausted: no free suffix for '{base}' (max_length {max_length}, tried _2.._{max_suffix})"
    )]
    NameSpaceExhausted {
        base: String,
        max_length: usize,
        max_suffix: usize,
    },
}
