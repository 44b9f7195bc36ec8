//! Configuration management for homekeep.
//!
//! Settings live in `config.json` inside the platform application data
//! directory. Every section is optional; a missing file or a missing section
//! falls back to defaults, so the tool works without any setup.
//!
//! ## Configuration Structure
//!
//! - **Schedule Config**: lead times used when a generated task is first scheduled
//! - **Dashboard Config**: the upcoming-task window and currency symbol
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use homekeep::libs::config::Config;
//!
//! let config = Config::read()?;
//! let schedule = config.schedule.unwrap_or_default();
//! println!("High priority lead time: {} days", schedule.high_priority_lead_days);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// A configurable section offered by the interactive wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Lead times applied when a generated task receives its first due date.
///
/// Seasonal tasks ignore these and anchor to their season instead.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScheduleConfig {
    /// Days until a high-priority task first falls due.
    pub high_priority_lead_days: i64,

    /// Days until a short-cycle task first falls due.
    pub short_cycle_lead_days: i64,

    /// Largest frequency, in days, that still counts as short-cycle.
    pub short_cycle_max_frequency: i64,

    /// Days until any other task first falls due.
    pub default_lead_days: i64,
}

/// Dashboard presentation settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DashboardConfig {
    /// How far ahead, in days, the dashboard looks for upcoming tasks.
    pub upcoming_days: i64,

    /// Symbol printed in front of costs.
    pub currency: String,
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<DashboardConfig>,
}

impl Default for ScheduleConfig {
    /// One week for urgent work, two weeks for anything recurring at least
    /// quarterly, a month for everything else.
    fn default() -> Self {
        ScheduleConfig {
            high_priority_lead_days: 7,
            short_cycle_lead_days: 14,
            short_cycle_max_frequency: 90,
            default_lead_days: 30,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            upcoming_days: 30,
            currency: "$".to_string(),
        }
    }
}

impl Config {
    /// Reads configuration from the platform data directory.
    ///
    /// Returns the default configuration when no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads configuration from an explicit file path.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration to the platform data directory.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    /// Saves the configuration as pretty-printed JSON to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn schedule(&self) -> ScheduleConfig {
        self.schedule.clone().unwrap_or_default()
    }

    pub fn dashboard(&self) -> DashboardConfig {
        self.dashboard.clone().unwrap_or_default()
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Existing values are offered as defaults. The returned configuration is
    /// not saved; callers decide whether to persist it.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "schedule".to_string(),
                name: "Schedule".to_string(),
            },
            ConfigModule {
                key: "dashboard".to_string(),
                name: "Dashboard".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "schedule" => {
                    let default = config.schedule();
                    msg_print!(Message::ConfigModuleSchedule);
                    config.schedule = Some(ScheduleConfig {
                        high_priority_lead_days: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptHighPriorityLead.to_string())
                            .default(default.high_priority_lead_days)
                            .interact_text()?,
                        short_cycle_lead_days: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptShortCycleLead.to_string())
                            .default(default.short_cycle_lead_days)
                            .interact_text()?,
                        short_cycle_max_frequency: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptShortCycleMaxFrequency.to_string())
                            .default(default.short_cycle_max_frequency)
                            .interact_text()?,
                        default_lead_days: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptDefaultLead.to_string())
                            .default(default.default_lead_days)
                            .interact_text()?,
                    });
                }
                "dashboard" => {
                    let default = config.dashboard();
                    msg_print!(Message::ConfigModuleDashboard);
                    config.dashboard = Some(DashboardConfig {
                        upcoming_days: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptUpcomingDays.to_string())
                            .default(default.upcoming_days)
                            .interact_text()?,
                        currency: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptCurrency.to_string())
                            .default(default.currency)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
