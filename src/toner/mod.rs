//! Toner level extraction from printer web status pages.
//!
//! The status page draws one fill bar per toner cartridge. Each bar is an
//! `<img>` whose `width` is the fill level in indicator units, 160 units being
//! a full cartridge. The bars carry no colour label, so the colour comes from
//! the bar's position (see [`TonerLayout`]).

mod converter;
mod error;
mod extractor;
mod models;

pub use converter::{fill_percent, FULL_SCALE_UNITS, PERCENT_PER_UNIT};
pub use error::{ConversionError, ExtractionError};
pub use extractor::{paired, Paired, PrinterRecords, TonerExtractor};
pub use models::{PrinterRecord, TonerColor, TonerLayout};
