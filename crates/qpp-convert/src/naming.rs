//! Output file naming.

use std::path::{Path, PathBuf};

/// Suffix of a successful conversion.
pub const QPP_SUFFIX: &str = ".qpp.json";
/// Suffix of an error report.
pub const ERROR_SUFFIX: &str = ".err.json";

const XML_EXTENSION: &str = ".xml";

/// File name with surrounding whitespace and a trailing `.xml` (any case)
/// removed.
pub fn output_stem(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let name = name.trim();
    let stem = name
        .len()
        .checked_sub(XML_EXTENSION.len())
        .filter(|&split| {
            name.get(split..)
                .is_some_and(|tail| tail.eq_ignore_ascii_case(XML_EXTENSION))
        })
        .map_or(name, |split| &name[..split]);
    stem.to_string()
}

pub fn qpp_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}{QPP_SUFFIX}", output_stem(input)))
}

pub fn error_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}{ERROR_SUFFIX}", output_stem(input)))
}

/// Identifier written into error reports: the input's file name.
pub fn source_identifier(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string())
}
