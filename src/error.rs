use thiserror::Error;

/// Errors raised by move validation, the search and the collaborators around it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cannot remove {count} from pile {pile} ({reason})")]
    InvalidMove {
        pile: i64,
        count: i64,
        reason: &'static str,
    },

    #[error("game already over: no move left to play")]
    AlreadyTerminal,

    #[error("search exhausted the frontier without reaching a terminal state")]
    NoPathFound,

    #[error("search gave up after expanding {limit} nodes")]
    ExpansionLimit { limit: usize },

    #[error("search cancelled")]
    Cancelled,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(operation: impl Into<String>, source: std::io::Error) -> Error {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Error {
        match e {
            dialoguer::Error::IO(source) => Error::io("read move", source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
