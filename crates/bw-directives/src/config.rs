//! Resolver configuration.

use std::io;
use std::path::{Path, PathBuf};

/// Type alias for the file reading callback function.
pub type ReadFileFn = dyn Fn(&Path) -> io::Result<String> + Send + Sync;

/// Type alias for the file existence callback function.
pub type FileExistsFn = dyn Fn(&Path) -> bool + Send + Sync;

/// Immutable settings threaded through every resolution.
///
/// File access goes through callbacks so tests can resolve against an
/// in-memory tree. Both callbacks must be `Send + Sync` because documents
/// are resolved in parallel against one shared configuration.
pub struct ResolverConfig {
    /// Root of the origin source tree. Snippet paths are relative to it.
    pub source_root: PathBuf,
    /// Base URL of the hosted copy of the source tree, for provenance links.
    pub remote_url: String,
    /// Base URL of the generated API documentation.
    pub apidocs_root: String,
    /// Language tag on fenced code blocks.
    ///
    /// Default: `java`
    pub language: String,
    /// Whether comments are removed from marked snippets.
    ///
    /// Default: `true`
    pub strip_comments: bool,
    /// Image paths starting with this prefix are read from the source tree.
    ///
    /// Default: `doc-files`
    pub vendored_prefix: String,
    read_file: Option<Box<ReadFileFn>>,
    file_exists: Option<Box<FileExistsFn>>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverConfig")
            .field("source_root", &self.source_root)
            .field("remote_url", &self.remote_url)
            .field("apidocs_root", &self.apidocs_root)
            .field("language", &self.language)
            .field("strip_comments", &self.strip_comments)
            .field("vendored_prefix", &self.vendored_prefix)
            .finish_non_exhaustive()
    }
}

impl ResolverConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source_root: PathBuf::from("."),
            remote_url: String::new(),
            apidocs_root: String::new(),
            language: "java".to_owned(),
            strip_comments: true,
            vendored_prefix: "doc-files".to_owned(),
            read_file: None,
            file_exists: None,
        }
    }

    /// Set the origin source tree root.
    #[must_use]
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = root.into();
        self
    }

    /// Set the provenance link base URL.
    #[must_use]
    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = url.into();
        self
    }

    /// Set the API documentation base URL.
    #[must_use]
    pub fn with_apidocs_root(mut self, url: impl Into<String>) -> Self {
        self.apidocs_root = url.into();
        self
    }

    /// Set the code block language tag.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Enable or disable comment stripping in marked snippets.
    #[must_use]
    pub fn with_strip_comments(mut self, strip: bool) -> Self {
        self.strip_comments = strip;
        self
    }

    /// Set the vendored image prefix.
    #[must_use]
    pub fn with_vendored_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.vendored_prefix = prefix.into();
        self
    }

    /// Set the file reading callback.
    #[must_use]
    pub fn with_read_file<F>(mut self, read_file: F) -> Self
    where
        F: Fn(&Path) -> io::Result<String> + Send + Sync + 'static,
    {
        self.read_file = Some(Box::new(read_file));
        self
    }

    /// Set the file existence callback.
    #[must_use]
    pub fn with_file_exists<F>(mut self, file_exists: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        self.file_exists = Some(Box::new(file_exists));
        self
    }

    /// Read a file through the configured callback.
    pub fn read_file(&self, path: &Path) -> io::Result<String> {
        match &self.read_file {
            Some(read) => read(path),
            None => std::fs::read_to_string(path),
        }
    }

    /// Check a file through the configured callback.
    #[must_use]
    pub fn file_exists(&self, path: &Path) -> bool {
        match &self.file_exists {
            Some(exists) => exists(path),
            None => path.is_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.language, "java");
        assert!(config.strip_comments);
        assert_eq!(config.vendored_prefix, "doc-files");
    }

    #[test]
    fn test_callbacks_override_filesystem() {
        let config = ResolverConfig::new()
            .with_read_file(|_| Ok("stub".to_owned()))
            .with_file_exists(|p| p.ends_with("x"));
        assert_eq!(config.read_file(Path::new("/nope")).unwrap(), "stub");
        assert!(config.file_exists(Path::new("/a/x")));
        assert!(!config.file_exists(Path::new("/a/y")));
    }

    #[test]
    fn test_default_callbacks_use_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "hello").unwrap();

        let config = ResolverConfig::new();
        assert!(config.file_exists(&file));
        assert!(!config.file_exists(dir.path()));
        assert_eq!(config.read_file(&file).unwrap(), "hello");
    }
}
