use std::{collections::HashSet, fmt::Formatter, ops::Deref, str::FromStr};

use convert_case::{Case, Casing};
use serde::{de::{self, Visitor}, Deserialize};
use snafu::{ensure, OptionExt, ResultExt, Snafu};
use url::Url;

/// A printer to poll: its display name and the URL of its status page.
#[derive(Debug, Clone, PartialEq)]
pub struct PrinterEndpoint {
    pub name: String,
    pub url: Url,
}

/// Topic-safe form of a printer name, e.g. `Office Printer` becomes `office_printer`.
pub fn printer_slug(printer_name: &str) -> String {
    printer_name.to_case(Case::Snake)
}

/// Printers as configured in `T2M_PRINTERS`, a comma separated list of
/// `name=url` entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrinterList(Vec<PrinterEndpoint>);

impl Deref for PrinterList {
    type Target = [PrinterEndpoint];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for PrinterList {
    type Err = PrinterListError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut seen = HashSet::new();
        let mut printers = Vec::new();

        for entry in value.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (name, url) = entry.split_once('=').context(MissingSeparatorSnafu { entry })?;
            let (name, url) = (name.trim(), url.trim());
            ensure!(!name.is_empty(), EmptyNameSnafu { entry });

            // The slug becomes one MQTT topic level and part of the Home Assistant ids.
            let slug = printer_slug(name);
            ensure!(!slug.is_empty() && !slug.contains(['/', '#', '+']), UnusableNameSnafu { name, slug });
            ensure!(seen.insert(slug.clone()), DuplicateNameSnafu { name, slug });

            let url = Url::parse(url).context(InvalidUrlSnafu { name })?;
            printers.push(PrinterEndpoint { name: name.to_owned(), url });
        }

        Ok(PrinterList(printers))
    }
}

impl<'de> Deserialize<'de> for PrinterList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: serde::Deserializer<'de> {
        struct PrinterListVisitor;

        impl<'de> Visitor<'de> for PrinterListVisitor {
            type Value = PrinterList;

            fn expecting(&self, formatter: &mut Formatter) -> Result<(), std::fmt::Error> {
                formatter.write_str("a comma separated list of name=url entries")
            }

            fn visit_str<E>(self, value: &str) -> Result<PrinterList, E>
            where
                E: de::Error,
            {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(PrinterListVisitor)
    }
}

// ////// //
// Errors //
// ////// //

#[derive(Debug, Snafu)]
pub enum PrinterListError {
    #[snafu(display("Printer entry '{entry}' is not of the form name=url"))]
    MissingSeparator { entry: String },

    #[snafu(display("Printer entry '{entry}' has an empty name"))]
    EmptyName { entry: String },

    #[snafu(display("Printer '{name}' is configured more than once (as '{slug}')"))]
    DuplicateName { name: String, slug: String },

    #[snafu(display("Printer name '{name}' can't be used in MQTT topics (as '{slug}')"))]
    UnusableName { name: String, slug: String },

    #[snafu(display("Printer '{name}' has an invalid status page URL"))]
    InvalidUrl { name: String, source: url::ParseError },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_in_order() {
        let printers: PrinterList = "Office = http://10.0.0.5/web/guest/en/websys/webArch/getStatus.cgi,Lab=http://lab-printer/status".parse().unwrap();
        assert_eq!(printers.len(), 2);
        assert_eq!(printers[0].name, "Office");
        assert_eq!(printers[0].url.host_str(), Some("10.0.0.5"));
        assert_eq!(printers[1].name, "Lab");
    }

    #[test]
    fn empty_string_means_no_printers() {
        assert!("".parse::<PrinterList>().unwrap().is_empty());
        assert!(" , ".parse::<PrinterList>().unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(matches!("Office".parse::<PrinterList>(), Err(PrinterListError::MissingSeparator { .. })));
        assert!(matches!("=http://a/".parse::<PrinterList>(), Err(PrinterListError::EmptyName { .. })));
        assert!(matches!("A=http://a/,A=http://b/".parse::<PrinterList>(), Err(PrinterListError::DuplicateName { .. })));
        assert!(matches!("A=not a url".parse::<PrinterList>(), Err(PrinterListError::InvalidUrl { .. })));
        assert!(matches!("Printer-A=http://a/,Printer A=http://b/".parse::<PrinterList>(), Err(PrinterListError::DuplicateName { ref slug, .. }) if slug == "printer_a"));
        assert!(matches!("Lab#1=http://a/".parse::<PrinterList>(), Err(PrinterListError::UnusableName { .. })));
        assert!(matches!("Lab+=http://a/".parse::<PrinterList>(), Err(PrinterListError::UnusableName { .. })));
        assert!(matches!("Floor/2=http://a/".parse::<PrinterList>(), Err(PrinterListError::UnusableName { .. })));
    }

    #[test]
    fn slugs_are_snake_case() {
        assert_eq!(printer_slug("Office Printer"), "office_printer");
        assert_eq!(printer_slug("Printer-A"), "printer_a");
    }
}
