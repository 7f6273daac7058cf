use std::io::Cursor;

use image::codecs::bmp::BmpDecoder;
use image::{DynamicImage, ImageDecoder, RgbImage};

use crate::color::ColorKey;
use crate::definition::{ProvinceDefinitions, ProvinceId};
use crate::error::MapError;

/// A fully decoded province map: the pixel surface plus the lookup
/// tables built from its definition table.
///
/// Immutable once built. Every query is a `&self` projection, so a
/// built map can be shared across threads without synchronization.
#[derive(Debug)]
pub struct ProvinceMap {
    surface: RgbImage,
    definitions: ProvinceDefinitions,
}

impl ProvinceMap {
    /// Decodes a provinces bitmap (BMP) and its definition table,
    /// both supplied as in-memory bytes.
    ///
    /// Fails on any structural problem: a malformed bitmap header or
    /// body, an unreadable definition table, or a definition table
    /// missing one of the required columns. Nothing partial survives
    /// a failed build; intermediates are dropped on each early return.
    pub fn from_bytes(bitmap: &[u8], definitions: &[u8]) -> Result<Self, MapError> {
        let decoder = BmpDecoder::new(Cursor::new(bitmap))?;
        let (width, height) = decoder.dimensions();
        let surface = DynamicImage::from_decoder(decoder)?.into_rgb8();
        let definitions = ProvinceDefinitions::from_bytes(definitions)?;

        log::info!(
            "Built province map: {}x{} pixels, {} definition rows",
            width,
            height,
            definitions.province_count
        );

        Ok(Self {
            surface,
            definitions,
        })
    }

    /// Assembles a map from an already-decoded surface and tables.
    pub fn from_parts(surface: RgbImage, definitions: ProvinceDefinitions) -> Self {
        Self {
            surface,
            definitions,
        }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// The packed color at `(x, y)`, or `None` outside the surface.
    pub fn color_at(&self, x: u32, y: u32) -> Option<ColorKey> {
        if x < self.surface.width() && y < self.surface.height() {
            Some(ColorKey::from(*self.surface.get_pixel(x, y)))
        } else {
            None
        }
    }

    /// Resolves a pixel coordinate to a province id.
    ///
    /// `None` for out-of-bounds coordinates and for colors with no
    /// definition entry; absence is an expected outcome, not an error.
    /// O(1), cheap enough for per-pixel use in tight loops.
    pub fn locate(&self, x: u32, y: u32) -> Option<ProvinceId> {
        self.definitions.id_of(self.color_at(x, y)?)
    }

    /// The province id a bitmap color resolves to, if any.
    pub fn id_of(&self, color: ColorKey) -> Option<ProvinceId> {
        self.definitions.id_of(color)
    }

    /// The canonical bitmap color of a province id, if any.
    pub fn color_of(&self, id: ProvinceId) -> Option<ColorKey> {
        self.definitions.color_of(id)
    }

    /// Number of successfully parsed definition rows.
    pub fn province_count(&self) -> usize {
        self.definitions.province_count
    }

    /// Every id from the definition table in file order, duplicates
    /// included.
    pub fn ids(&self) -> &[ProvinceId] {
        &self.definitions.ids
    }

    pub(crate) fn surface(&self) -> &RgbImage {
        &self.surface
    }
}
