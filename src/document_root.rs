use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use itertools::Itertools;

/// The directory every request target is resolved against. Always held in
/// canonical form.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    path: PathBuf,
}

impl DocumentRoot {
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = std::fs::canonicalize(path)?;

        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", path.display()),
            ));
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Root and target glued together as text, so `/a/../b` is passed
    /// through untouched.
    pub fn resolve(&self, target: &str) -> PathBuf {
        let mut joined = OsString::from(self.path.as_os_str());
        joined.push(target);
        PathBuf::from(joined)
    }

    /// Canonical form of `path`, or `None` when it does not exist or lies
    /// outside the root.
    pub async fn confine(&self, path: &Path) -> Option<PathBuf> {
        let canonical = tokio::fs::canonicalize(path).await.ok()?;
        canonical.starts_with(&self.path).then_some(canonical)
    }

    /// URL-style path of `path` below the root, always starting with `/`.
    pub fn relative(&self, path: &Path) -> String {
        let normalized: PathBuf = path.components().collect();

        match normalized.strip_prefix(&self.path) {
            Ok(rest) => format!("/{}", rest.iter().map(|c| c.to_string_lossy()).join("/")),
            Err(_) => normalized.to_string_lossy().replace('\\', "/"),
        }
    }
}
