use std::collections::TryReserveError;

use crate::account::ParseAccountError;

/// Errors returned by the fallible operations in this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Storage for a new tree node could not be allocated.
    ///
    /// The tree is left unmodified.
    #[error("failed to allocate tree node: {0}")]
    Alloc(#[from] TryReserveError),

    /// No account identifier greater than the last one handed out is free.
    #[error("account identifiers exhausted")]
    IdExhausted,

    /// Reading delimited records failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A delimited record could not be parsed.
    #[error("invalid record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseAccountError,
    },
}
