use std::num::ParseFloatError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{input:?} is not a number: {source}")]
    Parse {
        input: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("dvdb must be a finite number, got {0}")]
    NonFinite(f64),

    #[error("entry {index} overflows the f64 product")]
    ProductOverflow { index: usize },

    #[error("table must have at least one entry")]
    EmptyTable,

    #[error("at least one value per line is required")]
    ZeroRowWidth,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
