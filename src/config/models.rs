use std::time::Duration;

use serde_derive::Deserialize;

use super::printers::PrinterList;
use super::schedule::TimeSchedule;

// When changing anything here, make sure to add
// #[serde(alias = "ihavenounderscores")]
// where needed, so it can be read from the ENV vars.

#[derive(Debug, Deserialize)]
pub struct Mqtt {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub username: String,
    pub password: String,
    #[serde(alias = "clientid")]
    pub client_id: String,
    #[serde(alias = "roottopic")]
    pub root_topic: String,
    pub ha: HomeAssistant,
}

#[derive(Debug, Deserialize)]
pub struct HomeAssistant {
    #[serde(alias = "enablediscovery")]
    pub enable_discovery: bool,
    #[serde(alias = "discoverytopicprefix")]
    pub discovery_topic_prefix: String,
    #[serde(alias = "componentid")]
    pub component_id: String,
}

#[derive(Debug, Deserialize)]
pub struct Http {
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(alias = "ignoretlserrors")]
    pub ignore_tls_errors: bool,
    #[serde(alias = "useragent")]
    pub user_agent: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub printers: PrinterList,
    pub http: Http,
    pub mqtt: Mqtt,
    pub schedule: TimeSchedule,
    #[serde(alias = "sentrydsn")]
    pub sentry_dsn: Option<String>,
}
