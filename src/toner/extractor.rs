use std::{borrow::Borrow, sync::OnceLock};

use log::warn;
use scraper::{ElementRef, Html, Selector};
use snafu::{ensure, ResultExt};

use super::{
    converter::fill_percent,
    error::{ConversionSnafu, ExtractionError, MissingIndicatorsSnafu},
    models::{PrinterRecord, TonerLayout},
};

/// Fill bars of the toner gauges on the printer status page.
const TONER_INDICATOR_SELECTOR: &str = "img.ver-algn-m.mgn-R5p.bdr-1px-666[width]";

fn toner_indicator_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse(TONER_INDICATOR_SELECTOR).expect("toner indicator selector is valid CSS"))
}

/// Reads toner levels out of parsed printer status pages.
#[derive(Debug, Clone, Default)]
pub struct TonerExtractor {
    layout: TonerLayout,
}

impl TonerExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: TonerLayout) -> Self {
        Self { layout }
    }

    /// All toner fill bars in `document`, in document order.
    pub fn indicators<'a>(&self, document: &'a Html) -> impl Iterator<Item = ElementRef<'a>> {
        document.select(toner_indicator_selector())
    }

    /// Builds the record of one printer from its status page.
    ///
    /// Only the first four fill bars are read; anything after them is ignored.
    pub fn extract(&self, document: &Html, printer_name: &str) -> Result<PrinterRecord, ExtractionError> {
        let indicators: Vec<ElementRef> = self.indicators(document).take(4).collect();
        ensure!(indicators.len() == 4, MissingIndicatorsSnafu { printer_name, found: indicators.len() });

        let mut levels = [0.0; 4];
        for (&color, indicator) in self.layout.positions().iter().zip(&indicators) {
            levels[color.index()] = fill_percent(indicator.value().attr("width")).context(ConversionSnafu { printer_name, color })?;
        }

        Ok(PrinterRecord::from_levels(printer_name, levels))
    }

    /// Lazily extracts one record per `(document, printer name)` pair, in order.
    pub fn records<I, D, N>(&self, pairs: I) -> PrinterRecords<'_, I::IntoIter>
    where
        I: IntoIterator<Item = (D, N)>,
        D: Borrow<Html>,
        N: AsRef<str>,
    {
        PrinterRecords { extractor: self, pairs: pairs.into_iter() }
    }
}

/// Iterator returned by [`TonerExtractor::records`].
///
/// A failing pair yields an `Err` at its own position; the pairs after it can
/// still be drawn.
pub struct PrinterRecords<'e, I> {
    extractor: &'e TonerExtractor,
    pairs: I,
}

impl<I, D, N> Iterator for PrinterRecords<'_, I>
where
    I: Iterator<Item = (D, N)>,
    D: Borrow<Html>,
    N: AsRef<str>,
{
    type Item = Result<PrinterRecord, ExtractionError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (document, printer_name) = self.pairs.next()?;
        Some(self.extractor.extract(document.borrow(), printer_name.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

/// Pairs documents with printer names position by position.
///
/// When one side runs out first the pairing stops there and a warning is
/// logged; the surplus items of the longer side are dropped.
pub fn paired<D, N>(documents: D, names: N) -> Paired<D::IntoIter, N::IntoIter>
where
    D: IntoIterator,
    N: IntoIterator,
{
    Paired { documents: documents.into_iter(), names: names.into_iter(), finished: false, truncated: false }
}

/// Iterator returned by [`paired`].
pub struct Paired<D, N> {
    documents: D,
    names: N,
    finished: bool,
    truncated: bool,
}

impl<D, N> Paired<D, N> {
    /// Whether one side had items left over when the other ran out.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl<D: Iterator, N: Iterator> Iterator for Paired<D, N> {
    type Item = (D::Item, N::Item);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match (self.documents.next(), self.names.next()) {
            (Some(document), Some(name)) => return Some((document, name)),
            (Some(_), None) => {
                warn!("More status pages than printer names, ignoring the remaining pages.");
                self.truncated = true;
            }
            (None, Some(_)) => {
                warn!("More printer names than status pages, ignoring the remaining printers.");
                self.truncated = true;
            }
            (None, None) => {}
        }
        self.finished = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toner::{ConversionError, TonerColor};

    fn status_page(widths: &[&str]) -> Html {
        let bars: String = widths
            .iter()
            .map(|width| format!(r#"<tr><td><img src="/images/deviceStTnBarK.gif" width="{width}" height="10" class="ver-algn-m mgn-R5p bdr-1px-666"></td></tr>"#))
            .collect();
        Html::parse_document(&format!(
            r#"<html><head><title>Web Image Monitor</title></head><body>
            <table class="reportListCommon">
              <tr><td><img src="/images/logo.gif" width="120" class="ver-algn-m"></td></tr>
              {bars}
            </table></body></html>"#
        ))
    }

    #[test]
    fn maps_bars_to_black_cyan_magenta_yellow() {
        let record = TonerExtractor::new().extract(&status_page(&["160", "80", "40", "0"]), "Printer-A").unwrap();
        assert_eq!(record, PrinterRecord::new("Printer-A", 100.0, 50.0, 25.0, 0.0));
    }

    #[test]
    fn ignores_bars_after_the_fourth() {
        let record = TonerExtractor::new().extract(&status_page(&["16", "32", "48", "64", "160"]), "Printer-A").unwrap();
        assert_eq!(record, PrinterRecord::new("Printer-A", 10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn bars_without_the_indicator_classes_are_not_counted() {
        let document = Html::parse_document(
            r#"<body>
              <img class="ver-algn-m mgn-R5p" width="160">
              <img class="ver-algn-m mgn-R5p bdr-1px-666">
              <img class="ver-algn-m mgn-R5p bdr-1px-666" width="160">
              <img class="ver-algn-m mgn-R5p bdr-1px-666" width="120">
              <img class="ver-algn-m mgn-R5p bdr-1px-666" width="80">
              <img class="ver-algn-m mgn-R5p bdr-1px-666" width="40">
            </body>"#,
        );
        let record = TonerExtractor::new().extract(&document, "Printer-A").unwrap();
        assert_eq!(record, PrinterRecord::new("Printer-A", 100.0, 75.0, 50.0, 25.0));
    }

    #[test]
    fn too_few_bars_is_an_error_naming_the_printer() {
        let err = TonerExtractor::new().extract(&status_page(&["160", "80", "40"]), "Printer-B").unwrap_err();
        assert!(matches!(err, ExtractionError::MissingIndicators { found: 3, .. }));
        assert_eq!(err.printer_name(), "Printer-B");
        assert!(err.to_string().contains("Printer-B"));
    }

    #[test]
    fn non_numeric_width_reports_its_color() {
        let err = TonerExtractor::new().extract(&status_page(&["160", "80", "n/a", "0"]), "Printer-C").unwrap_err();
        match err {
            ExtractionError::Conversion { printer_name, color, source } => {
                assert_eq!(printer_name, "Printer-C");
                assert_eq!(color, TonerColor::Magenta);
                assert!(matches!(source, ConversionError::NonNumericWidth { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn custom_layout_reorders_colors() {
        let layout = TonerLayout::new([TonerColor::Yellow, TonerColor::Magenta, TonerColor::Cyan, TonerColor::Black]).unwrap();
        let record = TonerExtractor::with_layout(layout).extract(&status_page(&["160", "80", "40", "0"]), "Printer-A").unwrap();
        assert_eq!(record, PrinterRecord::new("Printer-A", 0.0, 25.0, 50.0, 100.0));
    }

    #[test]
    fn records_come_out_in_input_order() {
        let documents = [status_page(&["160", "160", "160", "160"]), status_page(&["0", "0", "0", "0"])];
        let extractor = TonerExtractor::new();
        let records: Vec<PrinterRecord> = extractor
            .records(documents.iter().zip(["Printer-A", "Printer-B"]))
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].printer_name(), "Printer-A");
        assert_eq!(records[0].level_black(), 100.0);
        assert_eq!(records[1].printer_name(), "Printer-B");
        assert_eq!(records[1].level_yellow(), 0.0);
    }

    #[test]
    fn records_before_a_broken_page_are_still_delivered() {
        let documents = vec![
            status_page(&["160", "80", "40", "0"]),
            status_page(&["80", "80", "80", "80"]),
            status_page(&["80", "oops", "80", "80"]),
            status_page(&["40", "40", "40", "40"]),
        ];
        let names = ["A", "B", "C", "D"];
        let extractor = TonerExtractor::new();
        let mut records = extractor.records(documents.into_iter().zip(names));

        assert_eq!(records.next().unwrap().unwrap().printer_name(), "A");
        assert_eq!(records.next().unwrap().unwrap().printer_name(), "B");
        let err = records.next().unwrap().unwrap_err();
        assert_eq!(err.printer_name(), "C");
        assert_eq!(records.next().unwrap().unwrap().level_cyan(), 25.0);
        assert!(records.next().is_none());
    }

    #[test]
    fn records_pull_pairs_on_demand() {
        let mut pulled = 0;
        let pairs = (0..3).map(|i| {
            pulled += 1;
            (status_page(&["160", "160", "160", "160"]), format!("Printer-{i}"))
        });
        let extractor = TonerExtractor::new();
        let mut records = extractor.records(pairs);
        assert!(records.next().unwrap().is_ok());
        drop(records);
        assert_eq!(pulled, 1);
    }

    #[test]
    fn pairing_truncates_to_the_shorter_side() {
        let documents = [status_page(&["160", "80", "40", "0"]), status_page(&["0", "0", "0", "0"])];
        let names = ["A", "B", "C"];
        let mut pairs = paired(&documents, &names);
        assert_eq!(pairs.by_ref().count(), 2);
        assert!(pairs.truncated());

        let mut pairs = paired(&documents, ["A", "B"]);
        assert_eq!(pairs.by_ref().count(), 2);
        assert!(!pairs.truncated());

        let names = ["A"];
        let extractor = TonerExtractor::new();
        let mut pairs = paired(&documents, &names);
        let records: Vec<_> = extractor.records(pairs.by_ref()).collect();
        assert!(pairs.truncated());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_ref().unwrap().printer_name(), "A");
    }
}
