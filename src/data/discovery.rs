//! Locates the hydrography dataset inside an input directory tree.

use crate::{MapError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// True when `path` has one of `extensions` and its file name contains one
/// of `keywords`, both compared case-insensitively.
pub fn is_hydrography_dataset<K, E>(path: &Path, keywords: &[K], extensions: &[E]) -> bool
where
    K: AsRef<str>,
    E: AsRef<str>,
{
    let extension_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| x.as_ref().eq_ignore_ascii_case(e)))
        .unwrap_or(false);
    if !extension_ok {
        return false;
    }

    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| {
            let name = name.to_lowercase();
            keywords
                .iter()
                .any(|k| name.contains(&k.as_ref().to_lowercase()))
        })
        .unwrap_or(false)
}

/// Searches `dir` recursively for the hydrography dataset.
///
/// When several files qualify, the lexicographically smallest path is
/// returned so the choice does not depend on directory traversal order.
/// A missing directory or no candidate is [`MapError::MissingInput`]; an
/// entry that cannot be read aborts the search with [`MapError::Io`].
pub fn find_hydrography_dataset<K, E>(dir: &Path, keywords: &[K], extensions: &[E]) -> Result<PathBuf>
where
    K: AsRef<str>,
    E: AsRef<str>,
{
    if !dir.is_dir() {
        return Err(MapError::MissingInput(dir.to_path_buf()));
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && is_hydrography_dataset(entry.path(), keywords, extensions) {
            candidates.push(entry.into_path());
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Err(MapError::MissingInput(dir.to_path_buf())),
        1 => Ok(candidates.remove(0)),
        n => {
            log::warn!(
                "{} hydrography datasets under {}, using {}",
                n,
                dir.display(),
                candidates[0].display()
            );
            Ok(candidates.remove(0))
        }
    }
}
