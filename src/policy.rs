use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HiddenFilePolicy {
    /// Dot-entries are listed and served like any other
    Visible,
    /// Dot-entries are left out of listings and answered with 404
    #[default]
    Excluded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AmbiguousExtensionPolicy {
    #[default]
    Allow,
    /// Targets with more than one `.` are answered with 404
    Reject,
}

/// Which existing entries are still treated as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServePolicy {
    pub hidden_files: HiddenFilePolicy,
    pub ambiguous_extensions: AmbiguousExtensionPolicy,
    /// Canonicalize every resolved path and refuse anything outside the root.
    pub confine_to_root: bool,
}

impl Default for ServePolicy {
    fn default() -> Self {
        Self {
            hidden_files: HiddenFilePolicy::default(),
            ambiguous_extensions: AmbiguousExtensionPolicy::default(),
            confine_to_root: true,
        }
    }
}

impl ServePolicy {
    /// Whether a directory entry called `name` is left out of listings.
    pub fn hides(&self, name: &str) -> bool {
        self.hidden_files == HiddenFilePolicy::Excluded && name.starts_with('.')
    }

    /// Whether an existing entry must still be answered with 404.
    pub fn rejects(&self, target: &str) -> bool {
        let name = target.trim_end_matches('/').rsplit('/').next().unwrap_or("");

        self.hides(name)
            || (self.ambiguous_extensions == AmbiguousExtensionPolicy::Reject
                && target.matches('.').count() > 1)
    }
}
