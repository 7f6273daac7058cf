//! Dataset integrity validation.
//!
//! A shipped province map must resolve every pixel to exactly one
//! province. The validator cross-checks the whole surface against the
//! definition table and reports coverage plus the colors that failed
//! to resolve.

use std::collections::HashSet;

use serde::Serialize;

use crate::color::ColorKey;
use crate::map::ProvinceMap;

/// Result of a full-surface coverage scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Pixels examined (the whole surface).
    pub total_pixels: u64,
    /// Pixels whose color resolved to a province id.
    pub mapped_pixels: u64,
    /// Pixels whose color has no definition entry.
    pub unmapped_pixels: u64,
    /// Distinct colors that resolved to a province id.
    pub mapped_colors: u64,
    /// Distinct unresolved colors, in order of first appearance
    /// during the raster scan.
    pub unmapped_colors: Vec<ColorKey>,
}

impl CoverageReport {
    /// True when every pixel resolved to a province.
    pub fn is_valid(&self) -> bool {
        self.unmapped_pixels == 0
    }

    /// Mapped fraction of the surface; 0.0 for an empty surface.
    pub fn coverage(&self) -> f64 {
        if self.total_pixels == 0 {
            0.0
        } else {
            self.mapped_pixels as f64 / self.total_pixels as f64
        }
    }
}

impl ProvinceMap {
    /// Cross-checks every pixel color against the definition table.
    ///
    /// Scans in raster order (row-major), which fixes the first-seen
    /// ordering of [`CoverageReport::unmapped_colors`]; the counts do
    /// not depend on it. Pure: repeated calls on the same map yield
    /// equal reports.
    pub fn validate(&self) -> CoverageReport {
        let mut seen_mapped: HashSet<ColorKey> = HashSet::new();
        let mut seen_unmapped: HashSet<ColorKey> = HashSet::new();
        let mut unmapped_colors = Vec::new();
        let mut mapped_pixels = 0u64;
        let mut unmapped_pixels = 0u64;

        for (_, _, pixel) in self.surface().enumerate_pixels() {
            let color = ColorKey::from(*pixel);
            if self.id_of(color).is_some() {
                mapped_pixels += 1;
                seen_mapped.insert(color);
            } else {
                unmapped_pixels += 1;
                if seen_unmapped.insert(color) {
                    unmapped_colors.push(color);
                }
            }
        }

        if unmapped_pixels > 0 {
            log::warn!(
                "Province map has {} unmapped pixels across {} colors",
                unmapped_pixels,
                unmapped_colors.len()
            );
        }

        CoverageReport {
            total_pixels: mapped_pixels + unmapped_pixels,
            mapped_pixels,
            unmapped_pixels,
            mapped_colors: seen_mapped.len() as u64,
            unmapped_colors,
        }
    }
}
