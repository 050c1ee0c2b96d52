//! Error taxonomy shared by both translation pipelines.
//!
//! Command-level variants carry the offending source line verbatim so the
//! drivers can report it without tracking positions.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The source file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    InputIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be created or written.
    #[error("cannot write {}: {source}", path.display())]
    OutputIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line does not fit any known command shape.
    #[error("unrecognized command `{line}`")]
    Lex { line: String },

    /// A C-instruction field is missing from the encoder tables.
    #[error("unknown {field} mnemonic `{mnemonic}` in `{line}`")]
    UnknownMnemonic {
        field: &'static str,
        mnemonic: String,
        line: String,
    },

    /// A push/pop/function/call argument is malformed.
    #[error("bad argument in `{line}`: {reason}")]
    BadArgument { line: String, reason: String },

    /// A stream error not yet pinned to a named file; the driver that
    /// knows the path converts this via [`Error::with_output_path`].
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    #[inline]
    pub(crate) fn lex(line: impl Into<String>) -> Self {
        Self::Lex { line: line.into() }
    }

    #[inline]
    pub(crate) fn unknown_mnemonic(
        field: &'static str,
        mnemonic: impl Into<String>,
        line: impl Into<String>,
    ) -> Self {
        Self::UnknownMnemonic {
            field,
            mnemonic: mnemonic.into(),
            line: line.into(),
        }
    }

    #[inline]
    pub(crate) fn bad_argument(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadArgument {
            line: line.into(),
            reason: reason.into(),
        }
    }

    #[inline]
    pub(crate) fn input_io(path: &Path, source: io::Error) -> Self {
        Self::InputIo {
            path: path.to_path_buf(),
            source,
        }
    }

    #[inline]
    pub(crate) fn output_io(path: &Path, source: io::Error) -> Self {
        Self::OutputIo {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Pins a bare stream error to the output file it was writing.
    #[must_use]
    pub fn with_output_path(self, path: &Path) -> Self {
        match self {
            Self::Io(source) => Self::output_io(path, source),
            other => other,
        }
    }
}
