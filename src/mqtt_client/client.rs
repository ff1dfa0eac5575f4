use rumqttc::{Client, MqttOptions, QoS, Transport};
use std::{thread, time::Duration};
use anyhow::Result;
use log::warn;

use crate::config::models::Mqtt;

/// Requests rumqttc buffers while the broker is unreachable. Large enough for
/// the Home Assistant discovery burst sent right after start.
const REQUEST_QUEUE_CAPACITY: usize = 100;

pub struct MqttClient {
    client: Client,
}

impl MqttClient {
    pub fn new(mqtt_settings: &Mqtt) -> Self {
        let mut mqtt_options = MqttOptions::new(mqtt_settings.client_id.to_owned(), mqtt_settings.host.to_owned(), mqtt_settings.port);
        mqtt_options
            .set_transport(match mqtt_settings.secure {
                // TLS against the system root certificates.
                true => Transport::tls_with_default_config(),
                // No TLS.
                false => Transport::tcp(),
            })
            .set_keep_alive(Duration::from_secs(10));
        if !mqtt_settings.username.is_empty() {
            mqtt_options.set_credentials(mqtt_settings.username.to_owned(), mqtt_settings.password.to_owned());
        }

        let (client, mut connection) = Client::new(mqtt_options, REQUEST_QUEUE_CAPACITY);

        thread::spawn(move || {
            for notification in connection.iter() {
                if let Err(e) = notification {
                    warn!("MQTT connection error: {e}");
                    thread::sleep(Duration::from_secs(5));
                }
            }
        });

        Self { client }
    }

    /// Queues a message without waiting. Fails when the request queue is full,
    /// e.g. while the broker is unreachable, so polling keeps its cadence.
    pub fn publish(&self, topic: &str, payload: &[u8], retain: bool) -> Result<()> {
        Ok(self.client.try_publish(topic, QoS::AtLeastOnce, retain, payload)?)
    }
}
