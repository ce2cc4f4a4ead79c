//! Input discovery: literal paths and single-segment wildcard patterns.
//!
//! A pattern without `*` names one file. A pattern with `*` is split into a
//! directory prefix and a single trailing segment; every regular file below
//! the prefix whose path relative to it matches the segment is selected.
//! The segment's `*` may therefore span subdirectories.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use regex::Regex;
use thiserror::Error;

const WILDCARD: char = '*';
const SEPARATORS: [char; 2] = ['/', '\\'];

#[derive(Debug, Error)]
pub enum PathError {
    #[error("Invalid or missing path: {}", path.display())]
    Missing { path: PathBuf },

    #[error("Not a file: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("Too many wild cards in {pattern}")]
    TooManyWildcards { pattern: String },

    #[error("Cannot search {} for {pattern}: {source}", root.display())]
    Walk {
        root: PathBuf,
        pattern: String,
        #[source]
        source: std::io::Error,
    },
}

/// Files selected by a set of patterns, plus the patterns that failed.
#[derive(Debug, Default)]
pub struct PathResolution {
    /// Existing regular files, deduplicated and sorted.
    pub files: Vec<PathBuf>,
    pub errors: Vec<PathError>,
}

impl PathResolution {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Resolve every pattern. A failing pattern contributes an error and no
/// files; the rest still resolve.
pub fn resolve_patterns<S: AsRef<str>>(patterns: &[S]) -> PathResolution {
    let mut resolution = PathResolution::default();
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref().trim();
        if pattern.is_empty() {
            continue;
        }
        match resolve_pattern(pattern) {
            Ok(found) => {
                for file in found {
                    let canonical = std::fs::canonicalize(&file).unwrap_or_else(|_| file.clone());
                    if seen.insert(canonical) {
                        files.push(file);
                    }
                }
            }
            Err(error) => {
                tracing::warn!(pattern, %error, "pattern did not resolve");
                resolution.errors.push(error);
            }
        }
    }

    files.sort();
    resolution.files = files;
    resolution
}

fn resolve_pattern(pattern: &str) -> Result<Vec<PathBuf>, PathError> {
    if !pattern.contains(WILDCARD) {
        return resolve_literal(Path::new(pattern)).map(|file| vec![file]);
    }

    let (prefix, segment) = split_pattern(pattern);
    if segment.contains(SEPARATORS) {
        return Err(PathError::TooManyWildcards {
            pattern: pattern.to_string(),
        });
    }
    let rule = wildcard_to_regex(segment).map_err(|_| PathError::TooManyWildcards {
        pattern: pattern.to_string(),
    })?;

    let root = if prefix.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(prefix)
    };
    let mut walked = Vec::new();
    walk(&root, &mut walked).map_err(|source| PathError::Walk {
        root: root.clone(),
        pattern: pattern.to_string(),
        source,
    })?;

    let files = walked
        .into_iter()
        .filter(|file| {
            file.strip_prefix(&root)
                .is_ok_and(|relative| rule.is_match(&portable(relative)))
        })
        .map(|file| {
            if prefix.is_empty()
                && let Ok(relative) = file.strip_prefix(".")
            {
                return relative.to_path_buf();
            }
            file
        })
        .collect();
    Ok(files)
}

fn resolve_literal(path: &Path) -> Result<PathBuf, PathError> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Err(PathError::NotAFile {
            path: path.to_path_buf(),
        }),
        Ok(_) => Ok(path.to_path_buf()),
        Err(_) => Err(PathError::Missing {
            path: path.to_path_buf(),
        }),
    }
}

/// Split at the last separator before the first wildcard: `("dir/sub",
/// "*.xml")` for `dir/sub/*.xml`, `("", "*.xml")` for `*.xml`.
fn split_pattern(pattern: &str) -> (&str, &str) {
    let wildcard = pattern.find(WILDCARD).unwrap_or(pattern.len());
    match pattern[..wildcard].rfind(SEPARATORS) {
        // Keep the root of absolute patterns such as `/*.xml`.
        Some(0) => (&pattern[..1], &pattern[1..]),
        Some(separator) => (&pattern[..separator], &pattern[separator + 1..]),
        None => ("", pattern),
    }
}

/// Anchored regex for one wildcard segment: literals are escaped and `*`
/// matches any run of characters, separators included.
pub fn wildcard_to_regex(segment: &str) -> Result<Regex, regex::Error> {
    if segment == "**" {
        return Regex::new("^.*$");
    }
    let body = segment
        .split(WILDCARD)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$"))
}

/// Relative path with `/` separators, whatever the platform.
fn portable(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Collect every regular file below `dir`.
fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk(&entry.path(), files)?;
        } else if file_type.is_file() {
            files.push(entry.path());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_prefix_from_segment() {
        assert_eq!(split_pattern("*.xml"), ("", "*.xml"));
        assert_eq!(split_pattern("dir/sub/*.xml"), ("dir/sub", "*.xml"));
        assert_eq!(split_pattern(r"dir\*.xml"), ("dir", "*.xml"));
        assert_eq!(split_pattern("/*.xml"), ("/", "*.xml"));
        assert_eq!(split_pattern("dir/*/a.xml"), ("dir", "*/a.xml"));
    }

    #[test]
    fn wildcard_segments_are_anchored() {
        let rule = wildcard_to_regex("*.xml").unwrap();
        assert!(rule.is_match("a.xml"));
        assert!(rule.is_match("sub/b.xml"));
        assert!(!rule.is_match("a.xml.bak"));
        assert!(!rule.is_match("axml"));

        let everything = wildcard_to_regex("**").unwrap();
        assert!(everything.is_match("deep/nested/file.txt"));

        let literal = wildcard_to_regex("report(1)+.xml").unwrap();
        assert!(literal.is_match("report(1)+.xml"));
        assert!(!literal.is_match("report1.xml"));
    }

    #[test]
    fn nested_wildcards_are_rejected() {
        let resolution = resolve_patterns(&["src/*/a.xml"]);
        assert!(resolution.files.is_empty());
        assert!(matches!(
            resolution.errors.as_slice(),
            [PathError::TooManyWildcards { .. }]
        ));
    }

    #[test]
    fn blank_patterns_are_ignored() {
        let resolution = resolve_patterns(&["", "   "]);
        assert!(resolution.is_empty());
        assert!(resolution.errors.is_empty());
    }
}
