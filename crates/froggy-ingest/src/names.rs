//! Trusted species name lists.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Parses one species name per line.
///
/// Blank lines and lines starting with `#` are ignored; names are trimmed.
pub fn parse_name_list(source: &str) -> BTreeSet<String> {
    source
        .lines()
        .map(|line| line.trim_start_matches('\u{feff}').trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Reads a trusted-name file.
pub fn load_name_list(path: &Path) -> Result<BTreeSet<String>> {
    let source = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let names = parse_name_list(&source);
    tracing::debug!(path = %path.display(), names = names.len(), "loaded trusted names");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blanks_are_ignored() {
        let names = parse_name_list("# curated 2024\nBufo bufo\n\n  Hyla arborea  \n#Rana\n");
        let expected: BTreeSet<String> = ["Bufo bufo".to_string(), "Hyla arborea".to_string()].into();
        assert_eq!(names, expected);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_name_list(Path::new("/no/such/trusted.txt")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
