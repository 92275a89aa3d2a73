//! Translation source discovery.
//!
//! Tree layout:
//!
//! ```text
//! translations/
//! ├── en.json          # a single file named after its language
//! └── ru/              # or a directory, loaded recursively
//!     ├── common.json
//!     └── shop/
//!         └── cart.json
//! ```
//!
//! Every immediate entry of the root names a language. Directories are walked
//! to the bottom and every regular file in them is loaded. Entries starting
//! with `.` are skipped at every level.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::i18n::{I18nError, LanguageTag, TagRegistry};

/// Raw bytes of one translation source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Empty for in-memory buffers.
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Where the translations of one language come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Buffer(Vec<u8>),
    File(PathBuf),
    Directory(PathBuf),
}

/// A language and its translation sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSource {
    pub tag: LanguageTag,
    pub location: SourceLocation,
}

impl LanguageSource {
    /// Read every source file of this language, in file-name order.
    pub fn files(&self) -> Result<Vec<SourceFile>, I18nError> {
        match &self.location {
            SourceLocation::Buffer(bytes) => Ok(vec![SourceFile {
                path: PathBuf::new(),
                bytes: bytes.clone(),
            }]),
            SourceLocation::File(path) => Ok(vec![read_file(path)?]),
            SourceLocation::Directory(dir) => walk_directory(dir),
        }
    }
}

/// Enumerates translation sources per language.
pub struct SourceWalker;

impl SourceWalker {
    /// Discover languages under a root directory, registering each tag.
    ///
    /// File entries name their language by file stem, so `en.json` is `en`.
    pub fn discover(root: &Path, registry: &mut TagRegistry) -> Result<Vec<LanguageSource>, I18nError> {
        let mut entries = fs::read_dir(root)
            .and_then(|dir| dir.collect::<io::Result<Vec<_>>>())
            .map_err(|source| io_error(root, source))?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut sources = Vec::new();
        for entry in entries {
            let path = entry.path();
            if is_hidden_name(&entry.file_name().to_string_lossy()) {
                debug!("Skipping hidden entry {}", path.display());
                continue;
            }

            let is_dir = fs::metadata(&path)
                .map_err(|source| io_error(&path, source))?
                .is_dir();
            let name = if is_dir {
                entry.file_name()
            } else {
                path.file_stem().map(|stem| stem.to_os_string()).unwrap_or_default()
            };

            let tag = registry.register(&name.to_string_lossy())?;
            debug!("Discovered language {} at {}", tag, path.display());

            let location = if is_dir {
                SourceLocation::Directory(path)
            } else {
                SourceLocation::File(path)
            };
            sources.push(LanguageSource { tag, location });
        }

        Ok(sources)
    }

    /// Register in-memory buffers, one per language name.
    pub fn buffers<I, N, B>(buffers: I, registry: &mut TagRegistry) -> Result<Vec<LanguageSource>, I18nError>
    where
        I: IntoIterator<Item = (N, B)>,
        N: AsRef<str>,
        B: Into<Vec<u8>>,
    {
        buffers
            .into_iter()
            .map(|(name, bytes)| {
                let tag = registry.register(name.as_ref())?;
                Ok(LanguageSource {
                    tag,
                    location: SourceLocation::Buffer(bytes.into()),
                })
            })
            .collect()
    }
}

fn walk_directory(dir: &Path) -> Result<Vec<SourceFile>, I18nError> {
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            io_error(&path, io::Error::from(err))
        })?;
        if entry.file_type().is_file() {
            files.push(read_file(entry.path())?);
        }
    }

    debug!("Found {} translation files under {}", files.len(), dir.display());
    Ok(files)
}

fn read_file(path: &Path) -> Result<SourceFile, I18nError> {
    let bytes = fs::read(path).map_err(|source| io_error(path, source))?;
    Ok(SourceFile {
        path: path.to_path_buf(),
        bytes,
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    is_hidden_name(&entry.file_name().to_string_lossy())
}

fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

fn io_error(path: &Path, source: io::Error) -> I18nError {
    I18nError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tag(name: &str) -> LanguageTag {
        LanguageTag::parse(name).unwrap()
    }

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    // ==================== Discover Tests ====================

    #[test]
    fn test_discover_directories_and_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "ru/common.json", "[]");
        write(dir.path(), "en.json", "[]");

        let mut registry = TagRegistry::new();
        let sources = SourceWalker::discover(dir.path(), &mut registry).unwrap();

        assert_eq!(registry.tags(), &[tag("en"), tag("ru")]);
        assert_eq!(sources[0].location, SourceLocation::File(dir.path().join("en.json")));
        assert_eq!(sources[1].location, SourceLocation::Directory(dir.path().join("ru")));
    }

    #[test]
    fn test_discover_file_without_extension() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "de", "[]");

        let mut registry = TagRegistry::new();
        let sources = SourceWalker::discover(dir.path(), &mut registry).unwrap();
        assert_eq!(sources[0].tag, tag("de"));
    }

    #[test]
    fn test_discover_skips_hidden_entries() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".gitkeep", "");
        write(dir.path(), "en/messages.json", "[]");

        let mut registry = TagRegistry::new();
        let sources = SourceWalker::discover(dir.path(), &mut registry).unwrap();
        assert_eq!(sources.len(), 1);
    }

    #[test]
    fn test_discover_invalid_language_name() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "-/messages.json", "[]");

        let mut registry = TagRegistry::new();
        let result = SourceWalker::discover(dir.path(), &mut registry);
        assert!(matches!(result, Err(I18nError::InvalidTag { .. })));
    }

    #[test]
    fn test_discover_duplicate_language() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "en/messages.json", "[]");
        write(dir.path(), "en.json", "[]");

        let mut registry = TagRegistry::new();
        let result = SourceWalker::discover(dir.path(), &mut registry);
        assert!(matches!(result, Err(I18nError::DuplicateTag { .. })));
    }

    #[test]
    fn test_discover_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let mut registry = TagRegistry::new();
        match SourceWalker::discover(&missing, &mut registry) {
            Err(I18nError::Io { path, source }) => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    // ==================== Files Tests ====================

    #[test]
    fn test_directory_files_are_all_loaded_recursively() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "ru/b.json", "[2]");
        write(dir.path(), "ru/a.json", "[1]");
        write(dir.path(), "ru/nested/deeper/c.json", "[3]");
        write(dir.path(), "ru/nested/.hidden.json", "[0]");

        let source = LanguageSource {
            tag: tag("ru"),
            location: SourceLocation::Directory(dir.path().join("ru")),
        };
        let files = source.files().unwrap();

        let contents: Vec<&[u8]> = files.iter().map(|f| f.bytes.as_slice()).collect();
        assert_eq!(contents, vec![&b"[1]"[..], &b"[2]"[..], &b"[3]"[..]]);
    }

    #[test]
    fn test_empty_directory_has_no_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("en")).unwrap();

        let source = LanguageSource {
            tag: tag("en"),
            location: SourceLocation::Directory(dir.path().join("en")),
        };
        assert!(source.files().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let source = LanguageSource {
            tag: tag("en"),
            location: SourceLocation::File(dir.path().join("en.json")),
        };
        assert!(matches!(source.files(), Err(I18nError::Io { .. })));
    }

    #[test]
    fn test_buffer_source_has_empty_path() {
        let mut registry = TagRegistry::new();
        let sources = SourceWalker::buffers([("en", b"[]".to_vec())], &mut registry).unwrap();

        let files = sources[0].files().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.as_os_str().is_empty());
        assert_eq!(files[0].bytes, b"[]");
    }

    #[test]
    fn test_buffers_reject_duplicate_language() {
        let mut registry = TagRegistry::new();
        let result = SourceWalker::buffers([("en", "[]"), ("en", "[]")], &mut registry);
        assert!(matches!(result, Err(I18nError::DuplicateTag { .. })));
    }
}
