use std::collections::HashMap;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

const DEFAULT_EXTENSIONS: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("txt", "text/plain"),
    ("text", "text/plain"),
    ("csv", "text/csv"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("js", "application/javascript"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
];

/// Extension to content type lookup. Built once at startup and only read
/// afterwards.
#[derive(Debug, Clone)]
pub struct MimeTable {
    types: HashMap<String, String>,
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::with_extra(std::iter::empty::<(String, String)>())
    }
}

impl MimeTable {
    /// The built-in table plus `extra`; later entries win.
    pub fn with_extra<I, K, V>(extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let types = DEFAULT_EXTENSIONS
            .iter()
            .map(|(ext, mime)| (ext.to_string(), mime.to_string()))
            .chain(extra.into_iter().map(|(ext, mime)| {
                let ext = ext.as_ref().trim_start_matches('.').to_lowercase();
                (ext, mime.into())
            }))
            .collect();

        Self { types }
    }

    /// Content type for the last path segment of `filename`, falling back to
    /// [`DEFAULT_MIME_TYPE`] when there is no extension or it is unknown.
    pub fn resolve(&self, filename: &str) -> &str {
        log::debug!("Requested file: {}", filename);

        let name = filename.rsplit('/').next().unwrap_or(filename);
        let mime = name
            .rsplit_once('.')
            .and_then(|(_, ext)| self.types.get(&ext.to_lowercase()))
            .map(String::as_str);

        match mime {
            Some(mime) => {
                log::debug!("MIME type: {}", mime);
                mime
            }
            None => {
                log::debug!("MIME type: default");
                DEFAULT_MIME_TYPE
            }
        }
    }
}
