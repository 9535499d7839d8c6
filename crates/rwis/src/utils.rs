use anyhow::{anyhow, Error};
use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use std::{env, fs::File, io::Read};
use time::{format_description::well_known::Iso8601, OffsetDateTime};

#[derive(Parser, Clone, Debug, serde::Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to Settings.toml file holding the rest of the cli options
    #[arg(short, long)]
    pub config: Option<String>,

    /// Set the log level (default: info)
    #[arg(short, long)]
    pub level: Option<String>,

    /// Path to the JSON list of METRo location descriptions (default: ./data/locations.json)
    #[arg(short, long)]
    pub descriptions: Option<String>,

    /// Path to the JSON snapshot of latest measurements and forecasts (default: ./data/values.json)
    #[arg(short, long)]
    pub values: Option<String>,

    /// Only resolve descriptions for this target model id
    #[arg(short, long)]
    pub model_id: Option<String>,

    /// Give up on a single data source after this many milliseconds
    #[arg(short, long)]
    pub source_timeout_ms: Option<u64>,
}

pub fn get_config_info() -> Result<Cli, Error> {
    let mut cli = Cli::parse();

    if let Some(config_path) = cli.config.clone() {
        if let Ok(mut file) = File::open(&config_path) {
            let mut content = String::new();
            file.read_to_string(&mut content)
                .map_err(|e| anyhow!("error reading {}: {}", config_path, e))?;
            cli = toml::from_str(&content)
                .map_err(|e| anyhow!("error deserializing {}: {}", config_path, e))?;
        };
    };
    Ok(cli)
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    match &cli.level {
        Some(level) => parse_level(level),
        None => parse_level(&env::var("RUST_LOG").unwrap_or_default()),
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}: {}",
                OffsetDateTime::now_utc()
                    .format(&Iso8601::DEFAULT)
                    .unwrap_or_default(),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stderr())
}
