use std::{fs, path::PathBuf};

use anyhow::{ensure, Context, Result};
use chrono::Utc;
use clap::Parser;
use log::{debug, error, info, warn};
use scraper::Html;
use snafu::Report;

use cli::{Cli, Commands};
use toner2mqtt::config::{loading::load_config, models::Settings};
use toner2mqtt::metrics::TonerMetrics;
use toner2mqtt::mqtt_client::{client::MqttClient, models::MqttTonerStatus, topics};
use toner2mqtt::poller::poll_once;
use toner2mqtt::status_page::client::StatusPageClient;
use toner2mqtt::toner::{paired, PrinterRecord, TonerColor, TonerExtractor};

mod cli;

fn main() -> Result<()> {
    colog::init();

    let command = Cli::parse().command;
    if let Some(Commands::Parse { names, files }) = &command {
        return parse_files(names, files);
    }

    let settings = load_config().context("Could not load configuration")?;
    let _sentry = init_sentry(settings.sentry_dsn.as_deref());

    match command {
        Some(Commands::Dump) => dump(&settings),
        _ => run(&settings),
    }
}

fn init_sentry(dsn: Option<&str>) -> Option<sentry::ClientInitGuard> {
    let dsn = dsn.filter(|dsn| !dsn.is_empty())?;
    match dsn.parse::<sentry::types::Dsn>() {
        Ok(dsn) => Some(sentry::init(sentry::ClientOptions {
            dsn: Some(dsn),
            release: sentry::release_name!(),
            ..Default::default()
        })),
        Err(e) => {
            warn!("Ignoring invalid Sentry DSN: {e}");
            None
        }
    }
}

fn run(settings: &Settings) -> Result<()> {
    if settings.printers.is_empty() {
        warn!("No printers configured, set T2M_PRINTERS to a comma separated list of name=url entries.");
    }

    let client = StatusPageClient::new(&settings.http)?;
    let extractor = TonerExtractor::new();
    let mqtt_client = MqttClient::new(&settings.mqtt);

    if settings.mqtt.ha.enable_discovery {
        match publish_discovery(&mqtt_client, settings) {
            Ok(_) => debug!("Published Home Assistant discovery configs."),
            Err(e) => error!("Error publishing Home Assistant discovery configs: {:?}", e),
        }
    }

    loop {
        let summary = poll_once(
            &settings.printers,
            &extractor,
            |printer| client.fetch(printer),
            |record| publish_record(&mqtt_client, settings, record),
        );
        info!("Published toner levels of {} printers, {} failed.", summary.published, summary.failed);

        std::thread::sleep(settings.schedule.get_duration_till_next_occurrence()?);
    }
}

fn publish_record(mqtt_client: &MqttClient, settings: &Settings, record: &PrinterRecord) -> Result<()> {
    let topic = topics::status_topic(&settings.mqtt, record.printer_name());
    let payload = serde_json::to_string(&MqttTonerStatus::new(record, Utc::now()))?;
    mqtt_client.publish(&topic, payload.as_bytes(), false)?;
    debug!("Published: {}", topic);
    Ok(())
}

fn publish_discovery(mqtt_client: &MqttClient, settings: &Settings) -> Result<()> {
    for printer in settings.printers.iter() {
        for color in TonerColor::ALL {
            let topic = topics::discovery_topic(&settings.mqtt, &printer.name, color);
            let payload = serde_json::to_string(&topics::discovery_payload(&settings.mqtt, &printer.name, color))?;
            mqtt_client.publish(&topic, payload.as_bytes(), true)?;
        }
    }
    Ok(())
}

fn dump(settings: &Settings) -> Result<()> {
    let client = StatusPageClient::new(&settings.http)?;
    let metrics = TonerMetrics::new()?;

    poll_once(&settings.printers, &TonerExtractor::new(), |printer| client.fetch(printer), |record| {
        metrics.observe(record);
        Ok(())
    });

    print!("{}", metrics.render()?);
    Ok(())
}

fn parse_files(names: &[String], files: &[PathBuf]) -> Result<()> {
    let documents = files
        .iter()
        .map(|path| {
            let html = fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
            Ok(Html::parse_document(&html))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut failed = 0;
    for record in TonerExtractor::new().records(paired(&documents, names)) {
        match record {
            Ok(record) => println!("{}", serde_json::to_string(&record)?),
            Err(e) => {
                error!("{}", Report::from_error(e));
                failed += 1;
            }
        }
    }

    ensure!(failed == 0, "{failed} status pages could not be read");
    Ok(())
}
