pub mod report;

use std::path::Path;

use anyhow::{Context, Result};
use provmap::ProvinceMap;

/// Reads both dataset files and builds the province map.
///
/// File I/O lives here; the library core only consumes in-memory
/// bytes.
pub fn load_map(bitmap: &Path, definitions: &Path) -> Result<ProvinceMap> {
    let bitmap_bytes = std::fs::read(bitmap)
        .with_context(|| format!("reading bitmap: {}", bitmap.display()))?;
    let definition_bytes = std::fs::read(definitions)
        .with_context(|| format!("reading definitions: {}", definitions.display()))?;

    ProvinceMap::from_bytes(&bitmap_bytes, &definition_bytes)
        .context("building province map")
}
