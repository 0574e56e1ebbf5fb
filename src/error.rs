use thiserror::Error;
use tokio::sync::mpsc;

use crate::ProductRecord;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Transport Error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The response didn't have the expected shape: {0}")]
    MalformedResponse(String),

    #[error("No products were collected, nothing to write.")]
    EmptyResult,
    #[error("The search query is empty.")]
    EmptyQuery,

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),
    #[error("Couldn't send a batch of products through a channel.")]
    RuntimeSendError,
}

impl From<mpsc::error::SendError<Vec<ProductRecord>>> for Error {
    fn from(_value: mpsc::error::SendError<Vec<ProductRecord>>) -> Self {
        Error::RuntimeSendError
    }
}
