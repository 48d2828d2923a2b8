//! Input tree discovery.
//!
//! Walking is separated from building: the [`Walker`] only classifies files,
//! nothing is read at this stage.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::BuildError;

/// How a file in the input tree is treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EntryKind {
    /// Annotated document whose directives are resolved.
    Document,
    /// Any other file, copied through unchanged.
    Asset,
}

/// A file found in the input tree.
#[derive(Clone, Debug)]
pub(crate) struct Entry {
    /// Path relative to the input root.
    pub relative: PathBuf,
    /// Full path of the file.
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    /// Directory of the entry relative to the input root.
    pub fn relative_dir(&self) -> &Path {
        self.relative.parent().unwrap_or(Path::new(""))
    }
}

/// Walks the input tree, skipping hidden and ignored entries.
#[derive(Debug)]
pub(crate) struct Walker {
    root: PathBuf,
    document_extension: String,
    ignore: Vec<Pattern>,
}

impl Walker {
    /// Create a walker over `root`.
    ///
    /// Ignore patterns are matched against both the entry name and its path
    /// relative to `root`.
    pub fn new(
        root: PathBuf,
        document_extension: &str,
        ignore: &[String],
    ) -> Result<Self, BuildError> {
        let ignore = ignore
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|source| BuildError::Pattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            root,
            document_extension: document_extension.to_owned(),
            ignore,
        })
    }

    /// Return every file under the root, in name order within each directory.
    ///
    /// Returns an empty Vec if the root doesn't exist.
    pub fn walk(&self) -> Vec<Entry> {
        let mut entries = Vec::new();
        if self.root.is_dir() {
            self.walk_directory(&self.root, Path::new(""), &mut entries);
        }
        entries
    }

    /// Documents only.
    pub fn documents(&self) -> Vec<Entry> {
        self.walk()
            .into_iter()
            .filter(|e| e.kind == EntryKind::Document)
            .collect()
    }

    fn walk_directory(&self, dir: &Path, relative: &Path, out: &mut Vec<Entry>) {
        let read = match fs::read_dir(dir) {
            Ok(read) => read,
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "Cannot read directory");
                return;
            }
        };

        // Cache file_type to avoid repeated stat calls
        let mut children: Vec<_> = read
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                (e.file_name().to_string_lossy().into_owned(), e.path(), is_dir)
            })
            .collect();
        children.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, path, is_dir) in children {
            if name.starts_with('.') {
                continue;
            }
            let child_relative = relative.join(&name);
            if self.is_ignored(&name, &child_relative) {
                tracing::debug!(path = %child_relative.display(), "Ignored");
                continue;
            }

            if is_dir {
                self.walk_directory(&path, &child_relative, out);
            } else {
                let kind = if path
                    .extension()
                    .is_some_and(|ext| ext == self.document_extension.as_str())
                {
                    EntryKind::Document
                } else {
                    EntryKind::Asset
                };
                out.push(Entry {
                    relative: child_relative,
                    path,
                    kind,
                });
            }
        }
    }

    fn is_ignored(&self, name: &str, relative: &Path) -> bool {
        self.ignore
            .iter()
            .any(|p| p.matches(name) || p.matches_path(relative))
    }
}
