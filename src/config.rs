//! User configuration and command-line overrides.
//!
//! Precedence, lowest first: defaults, `~/.pippin/config.json`, the
//! `PIPPIN_LEADERBOARD_URL` environment variable, command-line flags.

use crate::core::DeviceClass;
use crate::utils::persistence::{data_path, load_json_or_default, save_json};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "config.json";
pub const LEADERBOARD_URL_ENV: &str = "PIPPIN_LEADERBOARD_URL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub device: DeviceClass,
    pub leaderboard_url: Option<String>,
    pub start_muted: bool,
    /// Fixed seed for obstacle placement; random when absent.
    pub seed: Option<u64>,
}

impl Config {
    /// Load from disk and the environment. Never fails.
    ///
    /// A missing file is written out with defaults so it can be edited.
    pub fn load() -> Self {
        let exists = data_path(CONFIG_FILE).map(|p| p.exists()).unwrap_or(false);
        let mut config: Config = load_json_or_default(CONFIG_FILE);
        if !exists {
            if let Err(e) = save_json(CONFIG_FILE, &config) {
                log::warn!("could not write default config: {}", e);
            }
        }
        config.apply_env(std::env::var(LEADERBOARD_URL_ENV).ok());
        config
    }

    /// A non-empty environment URL replaces the configured one.
    pub fn apply_env(&mut self, leaderboard_url: Option<String>) {
        if let Some(url) = leaderboard_url.filter(|u| !u.trim().is_empty()) {
            self.leaderboard_url = Some(url);
        }
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(device) = overrides.device {
            self.device = device;
        }
        if overrides.muted {
            self.start_muted = true;
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
    }
}

/// Settings given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub device: Option<DeviceClass>,
    pub muted: bool,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Run(Overrides),
    Version,
    Help,
}

pub const USAGE: &str = "\
Pippin - a flappy pig for the terminal

Usage: pippin [options]

Options:
  --phone      Use the phone gravity profile (default)
  --tablet     Use the tablet gravity profile
  --device D   Gravity profile by name: phone, tablet or ipad
  --muted      Start with audio muted
  --seed N     Fixed seed for obstacle placement
  --version    Show version information
  --help       Show this help message";

/// Parse arguments, not including the program name.
pub fn parse_args<I>(args: I) -> Result<CliCommand, String>
where
    I: IntoIterator<Item = String>,
{
    let mut overrides = Overrides::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--phone" => overrides.device = Some(DeviceClass::Phone),
            "--tablet" => overrides.device = Some(DeviceClass::Tablet),
            "--device" => {
                let value = args.next().ok_or("--device needs a value")?;
                let device = DeviceClass::parse(&value)
                    .ok_or_else(|| format!("Unknown device: {}", value))?;
                overrides.device = Some(device);
            }
            "--muted" => overrides.muted = true,
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
                overrides.seed = Some(seed);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }

    Ok(CliCommand::Run(overrides))
}
