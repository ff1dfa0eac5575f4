use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

use crate::toner::PrinterRecord;

// ////// //
// Status //
// ////// //

#[derive(Debug, Serialize, Deserialize)]
pub struct MqttTonerStatus {
    pub printer_name: String,
    pub black: f64,
    pub cyan: f64,
    pub magenta: f64,
    pub yellow: f64,
    pub sampled_at: DateTime<Utc>,
    pub toner2mqtt_version: String,
}

impl MqttTonerStatus {
    pub fn new(record: &PrinterRecord, sampled_at: DateTime<Utc>) -> Self {
        MqttTonerStatus {
            printer_name: record.printer_name().to_owned(),
            black: record.level_black(),
            cyan: record.level_cyan(),
            magenta: record.level_magenta(),
            yellow: record.level_yellow(),
            sampled_at,
            toner2mqtt_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

// ////////////// //
// Home Assistant //
// ////////////// //

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeAssistantDiscoverySensorPayload {
    pub name: String,
    pub state_topic: String,
    pub unique_id: String,
    pub device: HomeAssistantDevice,
    pub value_template: String,
    pub unit_of_measurement: String,
    pub state_class: String,
    pub icon: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeAssistantDevice {
    pub identifiers: Vec<String>,
    pub model: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sw_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via_device: Option<String>,
}
