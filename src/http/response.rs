use bytes::Bytes;
use itertools::Itertools;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncWrite, AsyncWriteExt},
};

use super::status_code::StatusCode;

/// Files are copied to the socket this many bytes at a time.
pub const CHUNK_SIZE: usize = 1024;

#[derive(Debug, Default)]
pub enum Body {
    #[default]
    Empty,
    Bytes(Bytes),
    File(File),
}

#[derive(Debug, Default)]
pub struct Response {
    pub status_code: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl Response {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Status line, headers and the blank line that ends them.
    pub fn head_bytes(&self) -> Vec<u8> {
        let headers = self
            .headers
            .iter()
            .map(|(k, v)| format!("{}: {}\r\n", k, v))
            .join("");

        format!("HTTP/1.1 {}\r\n{}\r\n", self.status_code, headers).into_bytes()
    }

    pub async fn write_to<W>(self, stream: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        stream.write_all(&self.head_bytes()).await?;

        match self.body {
            Body::Empty => {}
            Body::Bytes(bytes) => stream.write_all(&bytes).await?,
            Body::File(mut file) => {
                let mut buffer = [0u8; CHUNK_SIZE];
                loop {
                    let length = file.read(&mut buffer).await?;
                    if length == 0 {
                        break;
                    }
                    stream.write_all(&buffer[..length]).await?;
                }
            }
        }

        stream.flush().await
    }
}
