use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use crate::error::{self, Context};

pub type Kdf = hkdf::Hkdf<sha2::Sha256>;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// a config path to load settings from. later files override earlier
    /// ones section by section
    #[arg(long)]
    config: Vec<PathBuf>
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
}

#[derive(Debug)]
pub struct Settings {
    pub listeners: HashMap<String, Listener>,
    pub master_key: String,
    pub directory: DirectorySettings,
    pub notifier: NotifierSettings,
    pub schedule: ScheduleSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Listener {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySettings {
    pub endpoint: String,
    pub project: String,
    pub key: String,
    pub database: String,
    pub profiles_collection: String,
    pub meetings_collection: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifierSettings {
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleSettings {
    /// when set, conversation access is also denied before the scheduled
    /// instant. the lax default matches the long standing behavior of
    /// letting participants join arbitrarily early
    #[serde(default)]
    pub enforce_start: bool,
}

impl std::default::Default for ScheduleSettings {
    fn default() -> Self {
        ScheduleSettings {
            enforce_start: false,
        }
    }
}

// every section is optional in a given file so settings can be split
// between checked in defaults and a deploy specific overlay
#[derive(Debug, Default, Deserialize)]
struct SettingsShape {
    listeners: Option<HashMap<String, Listener>>,
    master_key: Option<String>,
    directory: Option<DirectorySettings>,
    notifier: Option<NotifierSettings>,
    schedule: Option<ScheduleSettings>,
}

pub fn get_config() -> error::Result<Config> {
    Config::from_args(CliArgs::parse())
}

impl Config {
    pub fn from_args(args: CliArgs) -> error::Result<Self> {
        let mut shape = SettingsShape::default();

        for config_path in args.config {
            tracing::debug!("loading config file \"{}\"", config_path.display());

            let loaded = Self::load_file(&config_path)?;

            shape.merge(loaded);
        }

        let settings = Settings::from_shape(shape)?;

        tracing::debug!("{settings:#?}");

        Ok(Config {
            settings,
        })
    }

    fn load_file(path: &PathBuf) -> error::Result<SettingsShape> {
        let ext = path.extension().context(format!(
            "failed to retrieve the file extension for config file: \"{}\"", path.display()
        ))?;

        let ext = ext.to_ascii_lowercase();
        let file = std::fs::OpenOptions::new()
            .read(true)
            .open(path)
            .context(format!("failed to open config file: \"{}\"", path.display()))?;
        let reader = std::io::BufReader::new(file);

        if ext.eq("yaml") || ext.eq("yml") {
            serde_yaml::from_reader(reader).context(format!(
                "failed to parse yaml config file: \"{}\"", path.display()
            ))
        } else if ext.eq("json") {
            serde_json::from_reader(reader).context(format!(
                "failed to parse json config file: \"{}\"", path.display()
            ))
        } else {
            Err(error::Error::new().message(format!(
                "unknown type of config file: \"{}\"", path.display()
            )))
        }
    }
}

impl SettingsShape {
    fn merge(&mut self, other: SettingsShape) {
        if let Some(listeners) = other.listeners {
            self.listeners
                .get_or_insert_with(HashMap::new)
                .extend(listeners);
        }

        if other.master_key.is_some() {
            self.master_key = other.master_key;
        }

        if other.directory.is_some() {
            self.directory = other.directory;
        }

        if other.notifier.is_some() {
            self.notifier = other.notifier;
        }

        if other.schedule.is_some() {
            self.schedule = other.schedule;
        }
    }
}

impl Settings {
    fn from_shape(shape: SettingsShape) -> error::Result<Settings> {
        let listeners = shape.listeners.context(
            "no listeners specified in settings"
        )?;

        if listeners.is_empty() {
            return Err(error::Error::new().message(
                "no listeners specified in settings"
            ));
        }

        let master_key = shape.master_key.context(
            "no master_key specified in settings"
        )?;

        if master_key.is_empty() {
            return Err(error::Error::new().message(
                "settings.master_key cannot be empty"
            ));
        }

        let directory = shape.directory.context(
            "no directory collaborator specified in settings"
        )?;

        let notifier = shape.notifier.context(
            "no notifier collaborator specified in settings"
        )?;

        Ok(Settings {
            listeners,
            master_key,
            directory,
            notifier,
            schedule: shape.schedule.unwrap_or_default(),
        })
    }
}
