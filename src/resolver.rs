// src/resolver.rs
// =============================================================================
// Turns the configured input set into a concrete list of markdown files.
//
// Two modes: an explicit path list, or a recursive walk from a root
// directory. Either way the output is deduplicated and lexicographically
// ordered, and per-entry failures (missing file, unreadable directory)
// are recorded instead of aborting the scan. Only configuration-level
// problems (empty input list, unreadable root) are fatal.
// =============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::InputSet;
use crate::error::{FileError, FileErrorKind, ScanError};

/// Outcome of file set resolution. `files` is sorted and deduplicated;
/// `errors` holds the entries that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFiles {
    pub files: Vec<PathBuf>,
    pub errors: Vec<FileError>,
}

pub fn resolve(inputs: &InputSet) -> Result<ResolvedFiles, ScanError> {
    match inputs {
        InputSet::Explicit(paths) => resolve_explicit(paths),
        InputSet::Recursive(root) => resolve_recursive(root),
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn resolve_explicit(paths: &[PathBuf]) -> Result<ResolvedFiles, ScanError> {
    if paths.is_empty() {
        return Err(ScanError::NoInputFiles);
    }

    let mut files = BTreeSet::new();
    let mut errors = Vec::new();

    for path in paths {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => {
                if is_markdown(path) {
                    files.insert(path.clone());
                } else {
                    tracing::warn!(path = %path.display(), "skipping non-markdown file");
                }
            }
            Ok(_) => {
                errors.push(FileError::new(
                    path.clone(),
                    FileErrorKind::NotAFile,
                    "not a regular file",
                ));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                errors.push(FileError::new(
                    path.clone(),
                    FileErrorKind::NotFound,
                    "no such file",
                ));
            }
            Err(err) => {
                errors.push(FileError::new(
                    path.clone(),
                    FileErrorKind::Unreadable,
                    err.to_string(),
                ));
            }
        }
    }

    Ok(ResolvedFiles {
        files: files.into_iter().collect(),
        errors,
    })
}

fn resolve_recursive(root: &Path) -> Result<ResolvedFiles, ScanError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(ScanError::RootUnreadable {
                path: root.to_path_buf(),
                source: io::Error::other("not a directory"),
            });
        }
        Err(source) => {
            return Err(ScanError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            });
        }
    }

    let mut files = BTreeSet::new();
    let mut errors = Vec::new();

    // A read failure on the root itself is fatal; deeper failures are
    // recorded and the walk moves on.
    walk_dir(root, &mut files, &mut errors).map_err(|source| ScanError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(ResolvedFiles {
        files: files.into_iter().collect(),
        errors,
    })
}

fn walk_dir(
    dir: &Path,
    files: &mut BTreeSet<PathBuf>,
    errors: &mut Vec<FileError>,
) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                errors.push(FileError::new(
                    dir.to_path_buf(),
                    FileErrorKind::Unreadable,
                    err.to_string(),
                ));
                continue;
            }
        };
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                errors.push(FileError::new(
                    path,
                    FileErrorKind::Unreadable,
                    err.to_string(),
                ));
                continue;
            }
        };

        if file_type.is_dir() {
            if let Err(err) = walk_dir(&path, files, errors) {
                errors.push(FileError::new(
                    path,
                    FileErrorKind::Unreadable,
                    err.to_string(),
                ));
            }
        } else if file_type.is_file() {
            if is_markdown(&path) {
                files.insert(path);
            }
        } else if file_type.is_symlink() && is_markdown(&path) {
            // Follow symlinks to files, never to directories.
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {
                    files.insert(path);
                }
                Ok(_) => {}
                Err(err) => {
                    errors.push(FileError::new(
                        path,
                        FileErrorKind::Unreadable,
                        err.to_string(),
                    ));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "stub").unwrap();
        path
    }

    #[test]
    fn test_empty_explicit_list_is_a_configuration_error() {
        let err = resolve(&InputSet::Explicit(Vec::new())).unwrap_err();
        assert!(matches!(err, ScanError::NoInputFiles));
    }

    #[test]
    fn test_explicit_paths_record_partial_failures() {
        let tmp = tempfile::tempdir().unwrap();
        let good = touch(tmp.path(), "notes.md");
        let missing = tmp.path().join("gone.md");
        let dir_as_file = tmp.path().join("subdir");
        fs::create_dir(&dir_as_file).unwrap();

        let resolved = resolve(&InputSet::Explicit(vec![
            good.clone(),
            missing.clone(),
            dir_as_file.clone(),
        ]))
        .unwrap();

        assert_eq!(resolved.files, vec![good]);
        assert_eq!(resolved.errors.len(), 2);
        assert!(resolved
            .errors
            .iter()
            .any(|e| e.path == missing && e.kind == FileErrorKind::NotFound));
        assert!(resolved
            .errors
            .iter()
            .any(|e| e.path == dir_as_file && e.kind == FileErrorKind::NotAFile));
    }

    #[test]
    fn test_explicit_non_markdown_files_are_skipped_without_error() {
        let tmp = tempfile::tempdir().unwrap();
        let txt = touch(tmp.path(), "notes.txt");

        let resolved = resolve(&InputSet::Explicit(vec![txt])).unwrap();
        assert!(resolved.files.is_empty());
        assert!(resolved.errors.is_empty());
    }

    #[test]
    fn test_duplicate_explicit_paths_resolve_once() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = touch(tmp.path(), "doc.md");

        let resolved = resolve(&InputSet::Explicit(vec![doc.clone(), doc.clone()])).unwrap();
        assert_eq!(resolved.files, vec![doc]);
    }

    #[test]
    fn test_recursive_walk_is_sorted_and_case_insensitive_on_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let b = touch(tmp.path(), "b.md");
        let a = touch(tmp.path(), "a.md");
        let upper = touch(tmp.path(), "c.MD");
        let nested = touch(tmp.path(), "sub/deep/d.md");
        touch(tmp.path(), "ignored.txt");
        touch(tmp.path(), "sub/ignored.rs");

        let resolved = resolve(&InputSet::Recursive(tmp.path().to_path_buf())).unwrap();
        assert_eq!(resolved.files, vec![a, b, upper, nested]);
        assert!(resolved.errors.is_empty());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("nope");
        let err = resolve(&InputSet::Recursive(root)).unwrap_err();
        assert!(matches!(err, ScanError::RootUnreadable { .. }));
    }

    #[test]
    fn test_file_passed_as_root_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let file = touch(tmp.path(), "plain.md");
        let err = resolve(&InputSet::Recursive(file)).unwrap_err();
        assert!(matches!(err, ScanError::RootUnreadable { .. }));
    }
}
