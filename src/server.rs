use std::{io, net::SocketAddr, time::Duration};

use tokio::net::{TcpListener, ToSocketAddrs};

use crate::{
    handlers::{handle_connection, ServeContext},
    http::ConnectionError,
};

/// Pause after an accept error that is not tied to a single connection,
/// such as running out of file descriptors.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts connections one at a time. A connection is answered and closed
/// before the next one is accepted, so a slow client holds up everyone
/// behind it.
pub struct Server {
    listener: TcpListener,
    ctx: ServeContext,
}

impl Server {
    pub async fn bind(addr: impl ToSocketAddrs, ctx: ServeContext) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, ctx })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn run(&self) {
        loop {
            self.serve_one().await;
        }
    }

    /// Accepts and fully handles a single connection. Failures are logged
    /// and never end the loop.
    pub async fn serve_one(&self) {
        let (stream, peer) = match self.listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                log::error!("error: {}", e);
                if let Some(delay) = accept_backoff(&e) {
                    tokio::time::sleep(delay).await;
                }
                return;
            }
        };

        log::debug!("Accepted connection from {}", peer);

        match handle_connection(stream, &self.ctx).await {
            Ok(()) => {}
            Err(ConnectionError::Parse(e)) => log::warn!("{}: dropped: {}", peer, e),
            Err(ConnectionError::Network(e)) => log::error!("{}: {}", peer, e),
        }
    }
}

/// Errors about one half-open connection are retried straight away; anything
/// else waits before the next accept.
fn accept_backoff(error: &io::Error) -> Option<Duration> {
    match error.kind() {
        io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionRefused => None,
        _ => Some(ACCEPT_BACKOFF),
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use pretty_assertions::assert_eq;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpStream,
    };

    use super::*;
    use crate::{document_root::DocumentRoot, mime::MimeTable, policy::ServePolicy};

    async fn start(root: &std::path::Path) -> SocketAddr {
        let ctx = ServeContext {
            root: DocumentRoot::new(root).unwrap(),
            mime: MimeTable::default(),
            policy: ServePolicy::default(),
            server_name: "test-server".to_string(),
        };
        let server = Arc::new(Server::bind("127.0.0.1:0", ctx).await.unwrap());
        let addr = server.local_addr().unwrap();

        tokio::spawn(async move { server.run().await });

        addr
    }

    async fn get(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request).await.unwrap();
        stream.shutdown().await.unwrap();

        let mut out = Vec::new();
        stream.read_to_end(&mut out).await.unwrap();
        out
    }

    #[tokio::test]
    async fn serves_over_tcp_and_survives_bad_requests() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "Hello World").unwrap();
        let addr = start(dir.path()).await;

        let dropped = get(addr, b"POST /a.txt HTTP/1.1\r\n\r\n").await;
        assert!(dropped.is_empty());

        let out = get(addr, b"GET /a.txt HTTP/1.1\r\n\r\n").await;
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("\r\nContent-Length: 11\r\n"));
        assert!(text.ends_with("\r\n\r\nHello World"));

        let out = get(addr, b"GET /nope HTTP/1.1\r\n\r\n").await;
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.ends_with("\r\n\r\nFile /nope not found"));
    }

    #[test]
    fn accept_backoff_waits_on_resource_errors() {
        let aborted = io::Error::from(io::ErrorKind::ConnectionAborted);
        assert_eq!(accept_backoff(&aborted), None);

        // EMFILE
        let exhausted = io::Error::from_raw_os_error(24);
        assert_eq!(accept_backoff(&exhausted), Some(ACCEPT_BACKOFF));

        let other = io::Error::new(io::ErrorKind::Other, "accept failed");
        assert_eq!(accept_backoff(&other), Some(ACCEPT_BACKOFF));
    }

    #[tokio::test]
    async fn client_hanging_up_mid_file_does_not_stop_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("big.bin"), vec![1u8; 4 * 1024 * 1024]).unwrap();
        std::fs::write(dir.path().join("a.txt"), "Hello World").unwrap();
        let addr = start(dir.path()).await;

        let mut quitter = TcpStream::connect(addr).await.unwrap();
        quitter
            .write_all(b"GET /big.bin HTTP/1.1\r\n\r\n")
            .await
            .unwrap();
        let mut buf = [0u8; 64];
        quitter.read_exact(&mut buf).await.unwrap();
        drop(quitter);

        let out = get(addr, b"GET /a.txt HTTP/1.1\r\n\r\n").await;
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.ends_with("\r\n\r\nHello World"));
    }

    #[tokio::test]
    async fn connections_are_handled_one_at_a_time() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "A").unwrap();
        let addr = start(dir.path()).await;

        // first client connects but stays silent
        let mut first = TcpStream::connect(addr).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mut second = TcpStream::connect(addr).await.unwrap();
        second.write_all(b"GET /a.txt HTTP/1.1\r\n\r\n").await.unwrap();

        let mut buf = [0u8; 1];
        let blocked =
            tokio::time::timeout(Duration::from_millis(200), second.read(&mut buf)).await;
        assert!(blocked.is_err(), "second client was served too early");

        first.write_all(b"GET /a.txt HTTP/1.1\r\n\r\n").await.unwrap();
        let mut out = Vec::new();
        first.read_to_end(&mut out).await.unwrap();
        assert!(out.ends_with(b"\r\n\r\nA"));

        let mut out = Vec::new();
        second.read_to_end(&mut out).await.unwrap();
        assert_eq!(&out[out.len() - 5..], b"\r\n\r\nA");
    }
}
