use std::collections::HashMap;

use crate::color::ColorKey;
use crate::error::DefinitionError;

/// A province identifier from the definition table.
pub type ProvinceId = i32;

/// Lookup tables built from `definition.csv`.
///
/// The table format is a semicolon-delimited header row followed by
/// data rows with at least `province`, `red`, `green` and `blue`
/// columns (order irrelevant, extra columns such as the province name
/// ignored).
///
/// Both tables are first-wins, independently of each other: a row
/// whose color was already claimed can still claim its id in
/// `id_to_color`, and a row whose id was already claimed can still
/// claim its color in `color_to_id`. Real definition files rely on
/// this leniency, so it is kept rather than made jointly consistent.
#[derive(Debug, Clone, Default)]
pub struct ProvinceDefinitions {
    /// Packed bitmap color → province id (first row with that color wins).
    pub color_to_id: HashMap<ColorKey, ProvinceId>,
    /// Province id → canonical bitmap color (first row with that id wins).
    pub id_to_color: HashMap<ProvinceId, ColorKey>,
    /// Every id encountered, in file order, duplicates included.
    pub ids: Vec<ProvinceId>,
    /// Number of successfully parsed rows (not distinct ids).
    pub province_count: usize,
}

impl ProvinceDefinitions {
    /// Builds the lookup tables from raw `definition.csv` bytes.
    ///
    /// Fails only structurally: an unreadable header or a missing
    /// required column. Rows with unparseable integers or channel
    /// values outside 0–255 are skipped without failing the build.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DefinitionError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        // Resolve the four required columns once; rows below are
        // accessed positionally.
        let headers = reader.headers()?.clone();
        let col_province = find_column(&headers, "province")?;
        let col_red = find_column(&headers, "red")?;
        let col_green = find_column(&headers, "green")?;
        let col_blue = find_column(&headers, "blue")?;

        let mut definitions = ProvinceDefinitions::default();
        let mut skipped = 0usize;

        for record in reader.records() {
            // A record the reader cannot produce at all is treated the
            // same as one with unparseable fields: skipped.
            let Ok(record) = record else {
                skipped += 1;
                continue;
            };
            let (Some(id), Some(r), Some(g), Some(b)) = (
                int_field(&record, col_province),
                channel_field(&record, col_red),
                channel_field(&record, col_green),
                channel_field(&record, col_blue),
            ) else {
                skipped += 1;
                continue;
            };

            let color = ColorKey::new(r, g, b);
            definitions.color_to_id.entry(color).or_insert(id);
            definitions.id_to_color.entry(id).or_insert(color);
            definitions.ids.push(id);
        }

        definitions.province_count = definitions.ids.len();
        if skipped > 0 {
            log::debug!("Skipped {} malformed definition rows", skipped);
        }

        Ok(definitions)
    }

    /// The province id a bitmap color resolves to, if any.
    pub fn id_of(&self, color: ColorKey) -> Option<ProvinceId> {
        self.color_to_id.get(&color).copied()
    }

    /// The canonical bitmap color of a province id, if any.
    pub fn color_of(&self, id: ProvinceId) -> Option<ColorKey> {
        self.id_to_color.get(&id).copied()
    }
}

fn find_column(
    headers: &csv::StringRecord,
    name: &'static str,
) -> Result<usize, DefinitionError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(DefinitionError::MissingColumn(name))
}

fn int_field(record: &csv::StringRecord, index: usize) -> Option<ProvinceId> {
    record.get(index)?.trim().parse().ok()
}

fn channel_field(record: &csv::StringRecord, index: usize) -> Option<u8> {
    // u8 bounds are exactly the valid 0-255 channel range
    record.get(index)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_basic() {
        let csv = b"province;red;green;blue;x\n\
                    1;128;34;64;Stockholm\n\
                    2;0;36;128;Uppland\n";
        let defs = ProvinceDefinitions::from_bytes(csv).unwrap();

        assert_eq!(defs.province_count, 2);
        assert_eq!(defs.ids, vec![1, 2]);
        assert_eq!(defs.id_of(ColorKey::new(128, 34, 64)), Some(1));
        assert_eq!(defs.id_of(ColorKey::new(0, 36, 128)), Some(2));
        assert_eq!(defs.color_of(1), Some(ColorKey::new(128, 34, 64)));
        assert_eq!(defs.color_of(2), Some(ColorKey::new(0, 36, 128)));
    }

    #[test]
    fn test_column_order_irrelevant() {
        let csv = b"blue;province;x;red;green\n64;1;Name;128;34\n";
        let defs = ProvinceDefinitions::from_bytes(csv).unwrap();
        assert_eq!(defs.color_of(1), Some(ColorKey::new(128, 34, 64)));
    }

    #[test]
    fn test_missing_column_fails() {
        let csv = b"province;red;green;x\n1;128;34;Name\n";
        let err = ProvinceDefinitions::from_bytes(csv).unwrap_err();
        assert!(matches!(err, DefinitionError::MissingColumn("blue")));
    }

    #[test]
    fn test_missing_column_is_case_sensitive() {
        let csv = b"Province;red;green;blue\n1;1;2;3\n";
        let err = ProvinceDefinitions::from_bytes(csv).unwrap_err();
        assert!(matches!(err, DefinitionError::MissingColumn("province")));
    }

    #[test]
    fn test_bad_rows_skipped() {
        let csv = b"province;red;green;blue\n\
                    abc;1;2;3\n\
                    1;300;2;3\n\
                    2;-1;2;3\n\
                    3;10;20\n\
                    4;10;20;30\n";
        let defs = ProvinceDefinitions::from_bytes(csv).unwrap();

        // Only the last row parses: bad id, channel > 255, negative
        // channel and a short row are all skipped silently.
        assert_eq!(defs.province_count, 1);
        assert_eq!(defs.ids, vec![4]);
        assert_eq!(defs.id_of(ColorKey::new(10, 20, 30)), Some(4));
        assert_eq!(defs.color_of(1), None);
    }

    #[test]
    fn test_duplicate_rows_first_wins_asymmetric() {
        // Row 2 reuses row 1's color, row 3 reuses row 1's id. Each
        // duplicate loses the contested table but still claims the
        // other one.
        let csv = b"province;red;green;blue\n\
                    1;10;10;10\n\
                    2;10;10;10\n\
                    1;20;20;20\n";
        let defs = ProvinceDefinitions::from_bytes(csv).unwrap();

        assert_eq!(defs.province_count, 3);
        assert_eq!(defs.ids, vec![1, 2, 1]);
        // color (10,10,10) stays with id 1, but id 2 still got its color
        assert_eq!(defs.id_of(ColorKey::new(10, 10, 10)), Some(1));
        assert_eq!(defs.color_of(2), Some(ColorKey::new(10, 10, 10)));
        // id 1 keeps its first color, but (20,20,20) still resolves to 1
        assert_eq!(defs.color_of(1), Some(ColorKey::new(10, 10, 10)));
        assert_eq!(defs.id_of(ColorKey::new(20, 20, 20)), Some(1));
    }

    #[test]
    fn test_round_trip_for_unique_rows() {
        let csv = b"province;red;green;blue\n\
                    1;10;10;10\n\
                    2;20;20;20\n\
                    3;30;30;30\n";
        let defs = ProvinceDefinitions::from_bytes(csv).unwrap();

        for (&id, &color) in &defs.id_to_color {
            assert_eq!(defs.id_of(color), Some(id));
        }
        for (&color, &id) in &defs.color_to_id {
            assert_eq!(defs.color_of(id), Some(color));
        }
    }

    #[test]
    fn test_empty_table() {
        let csv = b"province;red;green;blue\n";
        let defs = ProvinceDefinitions::from_bytes(csv).unwrap();
        assert_eq!(defs.province_count, 0);
        assert!(defs.ids.is_empty());
        assert!(defs.color_to_id.is_empty());
    }
}
