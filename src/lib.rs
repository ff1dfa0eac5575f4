//! Reads toner levels off the web status pages of networked printers and
//! republishes them over MQTT or as Prometheus metrics.

pub mod config;
pub mod metrics;
pub mod mqtt_client;
pub mod poller;
pub mod status_page;
pub mod toner;
