use std::{
    fmt::{self, Display, Formatter},
    io,
    path::Path,
    time::SystemTime,
};

use itertools::Itertools;

use crate::{document_root::DocumentRoot, http::ListingDate, policy::ServePolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "File"),
            EntryKind::Directory => write!(f, "Directory"),
        }
    }
}

/// One row of a listing.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub link: String,
    pub size: u64,
    pub kind: EntryKind,
    pub modified: SystemTime,
}

impl Display for DirectoryEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<TR>\n\
             <TD>\n\
             <A HREF=\"{}\">\n\
             {}</A>\n\
             </TD>\n\
             <TD> {} </TD>\n\
             <TD> \n\
             {} </TD>\n\
             <TD> {}</TD>\n\
             </TR>\n",
            HtmlEscaped(&self.link),
            HtmlEscaped(&self.name),
            self.size,
            self.kind,
            ListingDate::from(self.modified),
        )
    }
}

struct HtmlEscaped<'a>(&'a str);

impl Display for HtmlEscaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                c => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}

/// Renders the immediate children of a directory as a standalone HTML page.
pub struct DirectoryRenderer<'a> {
    root: &'a DocumentRoot,
    policy: ServePolicy,
}

impl<'a> DirectoryRenderer<'a> {
    pub fn new(root: &'a DocumentRoot, policy: ServePolicy) -> Self {
        Self { root, policy }
    }

    /// Children in enumeration order, minus the ones the policy hides.
    pub async fn entries(&self, directory: &Path) -> io::Result<Vec<DirectoryEntry>> {
        let mut read_dir = tokio::fs::read_dir(directory).await?;
        let mut entries = Vec::new();

        while let Some(entry) = read_dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.policy.hides(&name) {
                continue;
            }

            let path = entry.path();
            // dangling symlinks are described by the link itself
            let metadata = match tokio::fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(_) => entry.metadata().await?,
            };

            entries.push(DirectoryEntry {
                link: self.root.relative(&path),
                name,
                size: metadata.len(),
                kind: if metadata.is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Directory
                },
                modified: metadata.modified()?,
            });
        }

        Ok(entries)
    }

    /// Fails as a whole if the directory cannot be read; never returns a
    /// partial page.
    pub async fn render(&self, directory: &Path) -> io::Result<String> {
        let entries = self.entries(directory).await?;

        Ok(format!(
            "<HTML>\n\
             <HEAD>\n\
             <TITLE>Index of {}\n\
             </TITLE>\n\
             </HEAD>\n\
             <BODY>\n\
             <TT>\n\
             <TABLE>\n\
             <TR>\n\
             <TD>Name</TD>\n\
             <TD>Size</TD>\n\
             <TD>Type</TD>\n\
             <TD>Last Modified</TD>\n\
             </TR>\n\
             {}\
             </TABLE>\n\
             </TT>\n\
             </BODY>\n\
             </HTML>",
            HtmlEscaped(&self.root.relative(directory)),
            entries.iter().join(""),
        ))
    }
}
