use crate::config::models::Mqtt;
pub use crate::config::printers::printer_slug;
use crate::toner::TonerColor;

use super::models::{HomeAssistantDevice, HomeAssistantDiscoverySensorPayload};

pub fn status_topic(mqtt_settings: &Mqtt, printer_name: &str) -> String {
    format!("{}/{}", mqtt_settings.root_topic, printer_slug(printer_name))
}

pub fn discovery_topic(mqtt_settings: &Mqtt, printer_name: &str, color: TonerColor) -> String {
    let ha = &mqtt_settings.ha;
    format!("{}/sensor/{}/{}_{}/config", ha.discovery_topic_prefix, ha.component_id, printer_slug(printer_name), color)
}

/// Home Assistant sensor config for one toner colour of one printer.
pub fn discovery_payload(mqtt_settings: &Mqtt, printer_name: &str, color: TonerColor) -> HomeAssistantDiscoverySensorPayload {
    let slug = printer_slug(printer_name);
    let component_id = &mqtt_settings.ha.component_id;

    HomeAssistantDiscoverySensorPayload {
        name: format!("{color} toner"),
        state_topic: status_topic(mqtt_settings, printer_name),
        unique_id: format!("{component_id}_{slug}_{color}"),
        device: HomeAssistantDevice {
            identifiers: vec![format!("{component_id}_{slug}")],
            model: "Printer".to_owned(),
            name: printer_name.to_owned(),
            sw_version: None,
            via_device: None,
        },
        value_template: format!("{{{{ value_json.{color} }}}}"),
        unit_of_measurement: "%".to_owned(),
        state_class: "measurement".to_owned(),
        icon: "mdi:printer-toner".to_owned(),
    }
}
