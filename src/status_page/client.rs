use log::debug;
use reqwest::blocking::Client;
use scraper::Html;
use snafu::{ResultExt, Snafu};

use crate::config::{models::Http, printers::PrinterEndpoint};

/// Downloads printer status pages and hands them back parsed.
pub struct StatusPageClient {
    http: Client,
}

impl StatusPageClient {
    pub fn new(http_settings: &Http) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(http_settings.timeout)
            .user_agent(http_settings.user_agent.as_str())
            // Printers mostly ship self-signed certificates.
            .danger_accept_invalid_certs(http_settings.ignore_tls_errors)
            .build()
            .context(BuildClientSnafu)?;

        Ok(Self { http })
    }

    pub fn fetch(&self, printer: &PrinterEndpoint) -> Result<Html, FetchError> {
        debug!("Fetching status page of '{}' from {}", printer.name, printer.url);
        let body = self.http
            .get(printer.url.clone())
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .context(RequestSnafu { printer_name: &printer.name, url: printer.url.as_str() })?;

        Ok(Html::parse_document(&body))
    }
}

// ////// //
// Errors //
// ////// //

#[derive(Debug, Snafu)]
pub enum FetchError {
    #[snafu(display("Could not set up the HTTP client"))]
    BuildClient { source: reqwest::Error },

    #[snafu(display("Printer '{printer_name}': could not fetch status page {url}"))]
    Request {
        printer_name: String,
        url: String,
        source: reqwest::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn http_settings() -> Http {
        Http { timeout: Duration::from_millis(200), ignore_tls_errors: true, user_agent: "toner2mqtt-test".to_owned() }
    }

    #[test]
    fn builds_with_default_settings() {
        assert!(StatusPageClient::new(&http_settings()).is_ok());
    }

    #[test]
    fn unreachable_printer_names_the_printer() {
        let client = StatusPageClient::new(&http_settings()).unwrap();
        // Nothing listens on the discard port.
        let printer = PrinterEndpoint { name: "Nowhere".to_owned(), url: "http://127.0.0.1:9/status".parse().unwrap() };
        let err = client.fetch(&printer).unwrap_err();
        assert!(matches!(&err, FetchError::Request { printer_name, .. } if printer_name == "Nowhere"));
    }
}
