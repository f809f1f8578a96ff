use std::str::Utf8Error;

use thiserror::Error;

use super::{method::MethodError, Method};

#[derive(Debug, Error)]
pub enum ParseRequestError {
    #[error("Request parsing error: connection closed before a request line was sent")]
    Empty,
    #[error("Request parsing error: Invalid Request Encoding")]
    Encoding(#[from] Utf8Error),
    #[error("Request parsing error: Invalid Request {0:?}")]
    Request(String),
    #[error("Request parsing error: request line longer than {0} bytes")]
    TooLong(u64),
    #[error("Request parsing error: Invalid Request Method")]
    Method(#[from] MethodError),
    #[error("Request parsing error: unsupported method {0}")]
    UnsupportedMethod(Method),
}

/// Everything that can end a single request/response exchange early.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error(transparent)]
    Parse(#[from] ParseRequestError),
    #[error("Network I/O Error: {0}")]
    Network(#[from] std::io::Error),
}
