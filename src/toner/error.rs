use std::num::ParseFloatError;

use snafu::Snafu;

use super::models::TonerColor;

// ////// //
// Errors //
// ////// //

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum ConversionError {
    #[snafu(display("Toner indicator has no width"))]
    MissingWidth,

    #[snafu(display("Toner indicator width '{width}' is not a number"))]
    NonNumericWidth { width: String, source: ParseFloatError },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum ExtractionError {
    #[snafu(display("Printer '{printer_name}': status page layout unrecognized, found {found} of 4 toner indicators"))]
    MissingIndicators { printer_name: String, found: usize },

    #[snafu(display("Printer '{printer_name}': could not read the {color} toner indicator"))]
    Conversion {
        printer_name: String,
        color: TonerColor,
        source: ConversionError,
    },
}

impl ExtractionError {
    pub fn printer_name(&self) -> &str {
        match self {
            ExtractionError::MissingIndicators { printer_name, .. } | ExtractionError::Conversion { printer_name, .. } => printer_name,
        }
    }
}
