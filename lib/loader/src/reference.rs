//! Reference file loading
//!
//! A reference file is line oriented; each line is `label : synonym, ...`.

use crate::{Error, Result};
use hjmatch_core::ReferenceCatalog;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read every line of a reference file
pub fn read_reference_lines(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(path, e))
}

/// Append the entries of a reference file to `catalog`
///
/// # Returns
/// The number of new entries
pub fn load_reference_file(catalog: &mut ReferenceCatalog, path: &Path) -> Result<usize> {
    let lines = read_reference_lines(path)?;
    let added = catalog.extend_lines(&lines)?;
    tracing::debug!(path = %path.display(), lines = lines.len(), added, "reference file loaded");
    Ok(added)
}
