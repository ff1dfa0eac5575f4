use std::error::Error;

use log::{debug, error};
use scraper::Html;
use snafu::Report;

use crate::config::printers::PrinterEndpoint;
use crate::toner::{PrinterRecord, TonerExtractor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSummary {
    pub published: usize,
    pub failed: usize,
}

/// Runs one polling round over `printers`.
///
/// Status pages are fetched one at a time, each right before its record is
/// extracted and handed to `sink`. A printer whose page can't be fetched, read
/// or published is logged and counted as failed; the round goes on with the
/// next printer.
pub fn poll_once<F, E, S>(printers: &[PrinterEndpoint], extractor: &TonerExtractor, mut fetch: F, mut sink: S) -> PollSummary
where
    F: FnMut(&PrinterEndpoint) -> Result<Html, E>,
    E: Error,
    S: FnMut(&PrinterRecord) -> anyhow::Result<()>,
{
    let mut unreachable = 0;
    let pages = printers.iter().filter_map(|printer| match fetch(printer) {
        Ok(document) => Some((document, printer.name.as_str())),
        Err(e) => {
            error!("{}", Report::from_error(e));
            unreachable += 1;
            None
        }
    });

    let mut published = 0;
    let mut failed = 0;
    for record in extractor.records(pages) {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                error!("{}", Report::from_error(e));
                failed += 1;
                continue;
            }
        };

        match sink(&record) {
            Ok(()) => {
                debug!("Handled toner levels of '{}'.", record.printer_name());
                published += 1;
            }
            Err(e) => {
                error!("Could not publish toner levels of '{}': {e:#}", record.printer_name());
                failed += 1;
            }
        }
    }

    PollSummary { published, failed: failed + unreachable }
}
