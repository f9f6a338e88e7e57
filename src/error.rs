//! Catalog construction error types

use thiserror::Error;

/// Result type for catalog construction
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while validating the mode catalog at startup.
///
/// These are construction-fatal: a catalog that fails validation must never
/// be used for classification, since it would drive the digitizer and scaler
/// with unvalidated timings. No-match during classification is *not* an
/// error; it is an ordinary `None` result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A descriptor field lies outside its declared bound
    #[error("mode '{mode}': {field} = {value} outside [{min}, {max}]")]
    FieldOutOfRange {
        mode: &'static str,
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// A descriptor declares no legal line-multiplication strategy
    #[error("mode '{0}': no line-multiplication strategy flag set")]
    NoMultiplierStrategy(&'static str),

    /// The catalog contains no descriptors at all
    #[error("catalog is empty")]
    Empty,
}
