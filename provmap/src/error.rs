use thiserror::Error;

/// Structural failures while building the definition lookup tables.
///
/// Row-level problems (unparseable integers, out-of-range channels) are
/// not errors; those rows are skipped. Only failures that make the
/// whole table unusable surface here.
#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),
}

/// Structural failures while building a [`crate::ProvinceMap`].
///
/// Any of these aborts the whole build; a partially decoded map is
/// never returned.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("bitmap decode error: {0}")]
    Bitmap(#[from] image::ImageError),
    #[error("definition table error: {0}")]
    Definition(#[from] DefinitionError),
}
