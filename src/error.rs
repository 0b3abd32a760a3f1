use std::io;

use derive_more::{Display, Error};
use toml::de::Error as TomlError;

/// Errors that can occur while loading [`CorsOptions`](crate::CorsOptions) from configuration.
///
/// Building a [`Policy`](crate::Policy) and handling requests never fail; only reading options
/// from disk or parsing them can.
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error.
    #[display("I/O error: {_0}")]
    Io(io::Error),

    /// Error deserializing as TOML.
    #[display("TOML error: {_0}")]
    Toml(TomlError),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<TomlError> for Error {
    fn from(err: TomlError) -> Self {
        Self::Toml(err)
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(io_error) => io_error,
            Error::Toml(_) => io::Error::new(io::ErrorKind::InvalidInput, err.to_string()),
        }
    }
}
