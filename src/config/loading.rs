use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment};
use log::info;

use super::models::Settings;

pub fn load_config() -> Result<Settings, ConfigError> {
    // As Rust has no native support for .env files,
    // we use the dotenv_flow crate to import to actual ENV vars.
    if let Ok(dotenv_path) = dotenv_flow::dotenv_flow() {
        info!("Loaded dotenv file: {:?}", dotenv_path);
    }

    with_defaults(Config::builder())?
        .add_source(Environment::default()
            .prefix("T2M")
            .separator("_")
            .prefix_separator("_")
            .try_parsing(true))
        .build()?
        .try_deserialize()
}

fn with_defaults(builder: ConfigBuilder<DefaultState>) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("printers", "")?
        .set_default("http.timeout", "10s")?
        .set_default("http.ignoretlserrors", "true")?
        .set_default("http.useragent", concat!("toner2mqtt/", env!("CARGO_PKG_VERSION")))?
        .set_default("mqtt.host", "localhost")?
        .set_default("mqtt.port", "1883")?
        .set_default("mqtt.secure", "false")?
        .set_default("mqtt.username", "")?
        .set_default("mqtt.password", "")?
        .set_default("mqtt.clientid", "toner2mqtt")?
        .set_default("mqtt.roottopic", "toner2mqtt")?
        .set_default("mqtt.ha.enablediscovery", "false")?
        .set_default("mqtt.ha.discoverytopicprefix", "homeassistant")?
        .set_default("mqtt.ha.componentid", "toner2mqtt")?
        .set_default("schedule", "1m")?
        .set_default("sentrydsn", "")
}
