use thiserror::Error;

use crate::model::content::{DocumentError, LookupError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
