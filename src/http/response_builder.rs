use std::fmt::Display;

use bytes::Bytes;
use tokio::fs::File;

use super::{
    response::{Body, Response},
    HttpDate, StatusCode,
};

/// Accumulates headers in the order they are added; the wire order is the
/// caller's responsibility.
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    status_code: StatusCode,
    headers: Vec<(String, String)>,
    body: Body,
}

impl ResponseBuilder {
    pub fn ok() -> Self {
        Self::with_status_code(StatusCode::Ok)
    }

    pub fn not_found() -> Self {
        Self::with_status_code(StatusCode::NotFound)
    }

    pub fn internal_server_error() -> Self {
        Self::with_status_code(StatusCode::InternalServerError)
    }

    pub fn with_status_code(status_code: StatusCode) -> Self {
        ResponseBuilder {
            status_code,
            ..Default::default()
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.headers.push((key.into(), value.to_string()));
        self
    }

    pub fn server(self, name: &str) -> Self {
        self.header("Server", name)
    }

    pub fn date(self, date: HttpDate) -> Self {
        self.header("Date", date)
    }

    pub fn connection_close(self) -> Self {
        self.header("Connection", "close")
    }

    pub fn content_type(self, mime: &str) -> Self {
        self.header("Content-Type", mime)
    }

    pub fn content_length(self, length: u64) -> Self {
        self.header("Content-Length", length)
    }

    pub fn last_modified(self, date: HttpDate) -> Self {
        self.header("Last-Modified", date)
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Body::Bytes(body.into());
        self
    }

    pub fn file(mut self, file: File) -> Self {
        self.body = Body::File(file);
        self
    }

    pub fn build(self) -> Response {
        Response {
            status_code: self.status_code,
            headers: self.headers,
            body: self.body,
        }
    }
}
