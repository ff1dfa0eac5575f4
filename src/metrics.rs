use prometheus::{GaugeVec, Opts, Registry, TextEncoder};

use crate::toner::PrinterRecord;

pub const TONER_LEVEL_METRIC: &str = "printer_toner_level_percent";

/// Toner levels as a Prometheus gauge, one sample per colour per printer.
pub struct TonerMetrics {
    registry: Registry,
    levels: GaugeVec,
}

impl TonerMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let levels = GaugeVec::new(Opts::new(TONER_LEVEL_METRIC, "Toner fill level in percent, as drawn on the printer status page."), &["printer", "color"])?;
        let registry = Registry::new();
        registry.register(Box::new(levels.clone()))?;
        Ok(Self { registry, levels })
    }

    pub fn observe(&self, record: &PrinterRecord) {
        for (color, level) in record.levels() {
            self.levels.with_label_values(&[record.printer_name(), color.name()]).set(level);
        }
    }

    /// Everything observed so far in the Prometheus text exposition format.
    pub fn render(&self) -> prometheus::Result<String> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_sample_per_color_and_printer() {
        let metrics = TonerMetrics::new().unwrap();
        metrics.observe(&PrinterRecord::new("Printer-A", 100.0, 50.0, 25.0, 0.0));
        metrics.observe(&PrinterRecord::new("Printer-B", 12.5, 12.5, 12.5, 12.5));

        let text = metrics.render().unwrap();
        let samples: Vec<&str> = text.lines().filter(|line| line.starts_with(TONER_LEVEL_METRIC)).collect();
        assert_eq!(samples.len(), 8);
        assert!(samples.iter().any(|s| s.contains(r#"color="cyan""#) && s.contains(r#"printer="Printer-A""#) && s.ends_with(" 50")));
        assert!(samples.iter().any(|s| s.contains(r#"color="yellow""#) && s.contains(r#"printer="Printer-B""#) && s.ends_with(" 12.5")));
    }

    #[test]
    fn newer_records_replace_older_values() {
        let metrics = TonerMetrics::new().unwrap();
        metrics.observe(&PrinterRecord::new("Printer-A", 100.0, 100.0, 100.0, 100.0));
        metrics.observe(&PrinterRecord::new("Printer-A", 90.0, 100.0, 100.0, 100.0));

        let text = metrics.render().unwrap();
        assert!(text.lines().any(|s| s.contains(r#"color="black""#) && s.ends_with(" 90")));
        assert!(!text.lines().any(|s| s.contains(r#"color="black""#) && s.ends_with(" 100")));
    }
}
