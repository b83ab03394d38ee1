//!
//! Errors produced internally by [`plugin_log`](super)
//!
//! None of these escape a logging call: the logger recovers from all of
//! them locally. Only [`init`](crate::init) hands an error back.
//!

use std::sync::PoisonError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Format Error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Poison Error: {0}")]
    Poison(String),

    #[cfg(feature = "facade")]
    #[error(transparent)]
    SetLogger(#[from] log::SetLoggerError),
}

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Error::Poison(err.to_string())
    }
}
