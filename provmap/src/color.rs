use serde::Serialize;

/// A province color packed into a 24-bit key: `red<<16 | green<<8 | blue`.
///
/// Both lookup tables are indexed by this key, so color equality and
/// hashing go through a single integer instead of a channel tuple.
/// Channels are `u8`, so an out-of-range color cannot be constructed;
/// range checking of raw table data happens at row-parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ColorKey(u32);

impl ColorKey {
    /// Packs three 8-bit channels, red in the most significant byte.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        ColorKey(u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b))
    }

    /// Unpacks the key back into `(red, green, blue)`.
    pub fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    /// The raw packed value (always < 2^24).
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl From<image::Rgb<u8>> for ColorKey {
    fn from(pixel: image::Rgb<u8>) -> Self {
        ColorKey::new(pixel[0], pixel[1], pixel[2])
    }
}

impl std::fmt::Display for ColorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}
