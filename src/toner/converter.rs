use snafu::{OptionExt, ResultExt};

use super::error::{ConversionError, MissingWidthSnafu, NonNumericWidthSnafu};

/// Indicator units drawn for a full cartridge.
pub const FULL_SCALE_UNITS: f64 = 160.0;

/// Percentage represented by a single indicator unit (0.625 %).
pub const PERCENT_PER_UNIT: f64 = 100.0 / FULL_SCALE_UNITS;

/// Converts the `width` of a toner fill bar into a fill percentage.
///
/// The result is not clamped, so a negative width or one beyond
/// [`FULL_SCALE_UNITS`] comes out as a percentage outside of `0..=100`.
pub fn fill_percent(width: Option<&str>) -> Result<f64, ConversionError> {
    let width = width.context(MissingWidthSnafu)?.trim();
    let units: f64 = width.parse().context(NonNumericWidthSnafu { width })?;
    Ok(units * PERCENT_PER_UNIT)
}
