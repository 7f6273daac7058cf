//! Per-province pixel extraction and spatial statistics.
//!
//! All of these are full scans over the immutable surface, recomputed
//! on demand. Callers that need many provinces at once should prefer
//! [`ProvinceMap::centers`] over repeated per-id scans.

use std::collections::HashMap;

use serde::Serialize;

use crate::color::ColorKey;
use crate::definition::ProvinceId;
use crate::map::ProvinceMap;

/// Spatial statistics for one province, derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProvinceStats {
    /// Number of pixels painted with the province's color (area).
    pub pixel_count: u64,
    /// Inclusive bounding box.
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    /// Integer-truncated mean pixel position.
    pub center_x: u32,
    pub center_y: u32,
}

impl ProvinceMap {
    /// Collects every pixel coordinate painted with `id`'s canonical
    /// color, in raster order.
    ///
    /// One full scan of the surface per call. An id with no definition
    /// entry yields an empty list, never an error.
    pub fn find_pixels(&self, id: ProvinceId) -> Vec<(u32, u32)> {
        let Some(target) = self.color_of(id) else {
            return Vec::new();
        };

        self.surface()
            .enumerate_pixels()
            .filter_map(|(x, y, pixel)| (ColorKey::from(*pixel) == target).then_some((x, y)))
            .collect()
    }

    /// Area, bounding box and centroid for one province.
    ///
    /// `None` when no pixel carries the province's color, including
    /// ids absent from the definition table entirely.
    pub fn stats(&self, id: ProvinceId) -> Option<ProvinceStats> {
        let pixels = self.find_pixels(id);
        if pixels.is_empty() {
            return None;
        }

        let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
        let (mut max_x, mut max_y) = (0u32, 0u32);
        let (mut sum_x, mut sum_y) = (0u64, 0u64);

        for &(x, y) in &pixels {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            sum_x += u64::from(x);
            sum_y += u64::from(y);
        }

        let count = pixels.len() as u64;
        Some(ProvinceStats {
            pixel_count: count,
            min_x,
            min_y,
            max_x,
            max_y,
            center_x: (sum_x / count) as u32,
            center_y: (sum_y / count) as u32,
        })
    }

    /// Computes the center point of every mapped province in a single
    /// pass over the surface, for marker placement and similar bulk
    /// consumers.
    ///
    /// Only pixels painted with a province's canonical color count,
    /// so each centroid matches what [`ProvinceMap::stats`] reports
    /// for that id.
    pub fn centers(&self) -> HashMap<ProvinceId, (u32, u32)> {
        // Accumulate pixel positions per province id
        let mut sums: HashMap<ProvinceId, (u64, u64, u64)> = HashMap::new();

        for (x, y, pixel) in self.surface().enumerate_pixels() {
            let color = ColorKey::from(*pixel);
            let Some(id) = self.id_of(color) else {
                continue;
            };
            // A duplicate-id table row maps a second color to the same
            // id; per-id extraction scans only the canonical color, so
            // alias colors are excluded here as well.
            if self.color_of(id) != Some(color) {
                continue;
            }
            let entry = sums.entry(id).or_insert((0, 0, 0));
            entry.0 += u64::from(x);
            entry.1 += u64::from(y);
            entry.2 += 1;
        }

        sums.into_iter()
            .map(|(id, (sum_x, sum_y, count))| {
                (id, ((sum_x / count) as u32, (sum_y / count) as u32))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ProvinceDefinitions;
    use image::RgbImage;

    /// 2x2 surface: top row province 5 (1,0,0), bottom row province 9
    /// (0,1,0).
    fn reference_map() -> ProvinceMap {
        let mut surface = RgbImage::new(2, 2);
        surface.put_pixel(0, 0, image::Rgb([1, 0, 0]));
        surface.put_pixel(1, 0, image::Rgb([1, 0, 0]));
        surface.put_pixel(0, 1, image::Rgb([0, 1, 0]));
        surface.put_pixel(1, 1, image::Rgb([0, 1, 0]));

        let csv = b"province;red;green;blue\n5;1;0;0\n9;0;1;0\n";
        ProvinceMap::from_parts(surface, ProvinceDefinitions::from_bytes(csv).unwrap())
    }

    #[test]
    fn test_find_pixels() {
        let map = reference_map();
        assert_eq!(map.find_pixels(5), vec![(0, 0), (1, 0)]);
        assert_eq!(map.find_pixels(9), vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn test_find_pixels_unknown_id() {
        let map = reference_map();
        assert!(map.find_pixels(42).is_empty());
    }

    #[test]
    fn test_stats() {
        let map = reference_map();
        let stats = map.stats(5).unwrap();

        assert_eq!(stats.pixel_count, 2);
        assert_eq!((stats.min_x, stats.min_y), (0, 0));
        assert_eq!((stats.max_x, stats.max_y), (1, 0));
        assert_eq!((stats.center_x, stats.center_y), (0, 0)); // (0+1)/2 truncates
    }

    #[test]
    fn test_stats_unknown_id_is_none() {
        let map = reference_map();
        assert_eq!(map.stats(42), None);
    }

    #[test]
    fn test_stats_defined_but_unpainted_id_is_none() {
        let surface = RgbImage::from_pixel(2, 2, image::Rgb([1, 0, 0]));
        let csv = b"province;red;green;blue\n5;1;0;0\n9;0;1;0\n";
        let map = ProvinceMap::from_parts(surface, ProvinceDefinitions::from_bytes(csv).unwrap());

        // 9 is in the table but owns no pixel
        assert_eq!(map.stats(9), None);
        assert!(map.find_pixels(9).is_empty());
    }

    #[test]
    fn test_stats_idempotent() {
        let map = reference_map();
        assert_eq!(map.stats(5), map.stats(5));
        assert_eq!(map.stats(9), map.stats(9));
    }

    #[test]
    fn test_centers_ignore_alias_colors_of_duplicate_ids() {
        // Two rows claim id 1; only the first color is canonical.
        // The surface has the canonical color at x=0 and the alias
        // color at x=1..3.
        let mut surface = RgbImage::from_pixel(4, 1, image::Rgb([20, 20, 20]));
        surface.put_pixel(0, 0, image::Rgb([10, 10, 10]));
        let csv = b"province;red;green;blue\n1;10;10;10\n1;20;20;20\n";
        let map = ProvinceMap::from_parts(surface, ProvinceDefinitions::from_bytes(csv).unwrap());

        let stats = map.stats(1).unwrap();
        assert_eq!(stats.pixel_count, 1);
        assert_eq!((stats.center_x, stats.center_y), (0, 0));
        assert_eq!(map.centers()[&1], (stats.center_x, stats.center_y));
    }

    #[test]
    fn test_centers_agree_with_stats() {
        let map = reference_map();
        let centers = map.centers();

        assert_eq!(centers.len(), 2);
        for id in [5, 9] {
            let stats = map.stats(id).unwrap();
            assert_eq!(centers[&id], (stats.center_x, stats.center_y));
        }
    }
}
