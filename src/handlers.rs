use std::{
    fs::Metadata,
    path::{Path, PathBuf},
};

use tokio::{
    fs::File,
    io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, BufReader},
};

use crate::{
    document_root::DocumentRoot,
    http::{ConnectionError, HttpDate, ParseRequestError, RequestLine, Response, ResponseBuilder},
    listing::DirectoryRenderer,
    mime::MimeTable,
    policy::ServePolicy,
};

/// Longest request line read before giving up on finding its end.
const MAX_REQUEST_LINE: u64 = 8 * 1024;

/// Read-only state shared by every request.
#[derive(Debug, Clone)]
pub struct ServeContext {
    pub root: DocumentRoot,
    pub mime: MimeTable,
    pub policy: ServePolicy,
    pub server_name: String,
}

#[derive(Debug)]
enum Target {
    NotFound,
    File(PathBuf, Metadata),
    Directory(PathBuf),
}

/// Reads one request line, answers it and returns. The stream is dropped on
/// every path out of here, which closes the connection.
pub async fn handle_connection<S>(mut stream: S, ctx: &ServeContext) -> Result<(), ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut raw = Vec::new();
    BufReader::new(&mut stream)
        .take(MAX_REQUEST_LINE)
        .read_until(b'\n', &mut raw)
        .await?;

    if raw.last() != Some(&b'\n') && raw.len() as u64 >= MAX_REQUEST_LINE {
        return Err(ParseRequestError::TooLong(MAX_REQUEST_LINE).into());
    }

    let line = std::str::from_utf8(&raw).map_err(ParseRequestError::from)?;
    log::info!("{}", line.trim_end());

    let request = RequestLine::try_from(line)?;
    let response = respond(ctx, request.target()).await;
    log::debug!(
        "{} {} -> {}",
        request.method(),
        request.target(),
        response.status_code
    );

    response.write_to(&mut stream).await?;

    Ok(())
}

/// Builds the response for a GET of `target`.
pub async fn respond(ctx: &ServeContext, target: &str) -> Response {
    match resolve_target(ctx, target).await {
        Target::NotFound => not_found_response(ctx, target),
        Target::File(path, metadata) => file_response(ctx, target, &path, &metadata).await,
        Target::Directory(path) => directory_response(ctx, target, &path).await,
    }
}

async fn resolve_target(ctx: &ServeContext, target: &str) -> Target {
    let mut path = ctx.root.resolve(target);

    if ctx.policy.confine_to_root {
        match ctx.root.confine(&path).await {
            Some(canonical) => path = canonical,
            None => return Target::NotFound,
        }
    }

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(_) => return Target::NotFound,
    };

    if ctx.policy.rejects(target) {
        Target::NotFound
    } else if metadata.is_file() {
        Target::File(path, metadata)
    } else {
        Target::Directory(path)
    }
}

fn not_found_response(ctx: &ServeContext, target: &str) -> Response {
    ResponseBuilder::not_found()
        .server(&ctx.server_name)
        .date(HttpDate::now())
        .content_type("text/plain")
        .body(format!("File {} not found", target))
        .build()
}

fn internal_error_response(ctx: &ServeContext, target: &str, error: std::io::Error) -> Response {
    log::error!("Failed to serve {}: {}", target, error);

    ResponseBuilder::internal_server_error()
        .server(&ctx.server_name)
        .date(HttpDate::now())
        .content_type("text/plain")
        .body(format!("File {} could not be read", target))
        .build()
}

async fn file_response(
    ctx: &ServeContext,
    target: &str,
    path: &Path,
    metadata: &Metadata,
) -> Response {
    let opened = match metadata.modified() {
        Ok(modified) => File::open(path).await.map(|file| (file, modified)),
        Err(e) => Err(e),
    };

    match opened {
        Ok((file, modified)) => ResponseBuilder::ok()
            .server(&ctx.server_name)
            .date(HttpDate::now())
            .connection_close()
            .content_type(ctx.mime.resolve(target))
            .content_length(metadata.len())
            .last_modified(HttpDate::from(modified))
            .file(file)
            .build(),
        Err(e) => internal_error_response(ctx, target, e),
    }
}

async fn directory_response(ctx: &ServeContext, target: &str, path: &Path) -> Response {
    let renderer = DirectoryRenderer::new(&ctx.root, ctx.policy);

    match renderer.render(path).await {
        Ok(html) => ResponseBuilder::ok()
            .server(&ctx.server_name)
            .date(HttpDate::now())
            .connection_close()
            .content_type("text/html")
            .body(html)
            .build(),
        Err(e) => internal_error_response(ctx, target, e),
    }
}
