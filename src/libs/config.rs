//! Application configuration.
//!
//! Settings live in `config.json` inside the application data directory. Every
//! section is optional; a missing file or section means defaults. `todoai init`
//! runs an interactive wizard that edits the sections the user selects.
//!
//! ```rust,ignore
//! use todoai::libs::config::Config;
//!
//! let config = Config::read()?;
//! let strict = config.schedule_or_default().strict_add;
//! ```

use super::data_storage::DataStorage;
use super::messages::Message;
use super::task::DEFAULT_DURATION;
use crate::api::openai::AiConfig;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// A section offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// How new tasks are placed on the calendar.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScheduleConfig {
    /// Reject new tasks that overlap a same-day task instead of warning.
    #[serde(default)]
    pub strict_add: bool,
    /// Duration in minutes used when `task add` gets no `--duration`.
    #[serde(default = "default_duration")]
    pub default_duration: u32,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            strict_add: false,
            default_duration: DEFAULT_DURATION,
        }
    }
}

impl ScheduleConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "schedule".to_string(),
            name: Message::ConfigModuleSchedule.to_string(),
        }
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let default = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleSchedule);
        Ok(Self {
            strict_add: Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptStrictAdd.to_string())
                .default(default.strict_add)
                .interact()?,
            default_duration: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptDuration.to_string())
                .default(default.default_duration)
                .validate_with(|minutes: &u32| if *minutes > 0 { Ok(()) } else { Err("Duration must be positive") })
                .interact_text()?,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleConfig>,
}

impl Config {
    pub fn read() -> Result<Config> {
        Self::read_from(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    /// Reads the file at `path`; a missing file yields the default config.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&config_str)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn schedule_or_default(&self) -> ScheduleConfig {
        self.schedule.clone().unwrap_or_default()
    }

    /// Interactive setup, starting from the stored values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read()?;

        let modules = vec![AiConfig::module(), ScheduleConfig::module()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "ai" => config.ai = Some(AiConfig::init(&config.ai)?),
                "schedule" => config.schedule = Some(ScheduleConfig::init(&config.schedule)?),
                _ => {}
            }
        }

        Ok(config)
    }
}
