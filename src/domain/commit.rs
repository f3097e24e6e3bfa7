use serde::Serialize;
use std::path::{Path, PathBuf};

/// A commit as seen by the analysis engine
///
/// `message` is the full commit message; `body` is whatever the commit source
/// treats as the long form (for git both are the full message). Paths in
/// `files` are absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub hash: String,
    pub message: String,
    pub body: String,
    pub files: Vec<PathBuf>,
}

impl Commit {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Commit {
            hash: hash.into(),
            body: message.clone(),
            message,
            files: Vec::new(),
        }
    }

    /// Replace the body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Add touched files
    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    /// First line of the message
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim_end()
    }

    /// Hash shortened to seven characters
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(7) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }

    /// True when any touched file lives under `root`
    pub fn touches(&self, root: &Path) -> bool {
        self.files.iter().any(|file| file.starts_with(root))
    }
}
