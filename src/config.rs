use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "popup-probe", version, about)]
pub struct Cli {
    /// Path to configuration file
    #[clap(long, default_value = "./config.toml")]
    pub config: PathBuf,

    /// Scenario to run (repeatable); defaults to all scenarios
    #[clap(long = "scenario")]
    pub scenarios: Vec<String>,

    /// Run every registered scenario (the default when none are selected)
    #[clap(long, conflicts_with = "scenarios")]
    pub all: bool,

    /// List available scenarios and exit
    #[clap(long)]
    pub list: bool,

    /// Print the final log as JSON after the run
    #[clap(long)]
    pub json: bool,

    /// Write the rendered log markup to this file instead of the terminal
    #[clap(long)]
    pub html_out: Option<PathBuf>,

    /// Skip the fixed settle delays between open and follow-up checks
    #[clap(long)]
    pub no_delays: bool,

    /// Simulate an active popup blocker
    #[clap(long)]
    pub popup_blocker: bool,

    /// Override the probe page URL
    #[clap(long)]
    pub page_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL the simulated host considers its own page.
    pub page_url: String,
    /// Whether new-window opens are suppressed.
    pub popup_blocker: bool,
    /// Honor the original page's setTimeout settle delays.
    pub settle_delays: bool,
    pub screen_width: u32,
    pub screen_height: u32,
    pub avail_width: u32,
    pub avail_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_url: "https://example.test/window-open/index.html".to_string(),
            popup_blocker: false,
            settle_delays: true,
            screen_width: 1920,
            screen_height: 1080,
            avail_width: 1920,
            avail_height: 1040,
        }
    }
}

pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if cli.config.exists() {
        let config_content = fs::read_to_string(&cli.config)
            .with_context(|| format!("Failed to read config file: {:?}", cli.config))?;

        toml::from_str(&config_content).context("Failed to parse config file")?
    } else {
        debug!("No config file at {:?}, using defaults", cli.config);
        Config::default()
    };

    // Apply CLI overrides
    if cli.popup_blocker {
        config.popup_blocker = true;
    }

    if cli.no_delays {
        config.settle_delays = false;
    }

    if let Some(ref page_url) = cli.page_url {
        config.page_url = page_url.clone();
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_are_sane() {
        let config = Config::default();
        assert!(!config.popup_blocker);
        assert!(config.settle_delays);
        assert!(config.screen_width >= config.avail_width);
        assert!(config.screen_height >= config.avail_height);
    }

    #[test]
    fn cli_accepts_the_all_flag() {
        let cli = Cli::try_parse_from(["popup-probe", "--all"]).unwrap();
        assert!(cli.all);
        assert!(cli.scenarios.is_empty());
    }

    #[test]
    fn all_flag_conflicts_with_scenario_selection() {
        assert!(Cli::try_parse_from(["popup-probe", "--all", "--scenario", "popup"]).is_err());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str("popup_blocker = true\nscreen_width = 1280\n").unwrap();
        assert!(config.popup_blocker);
        assert_eq!(config.screen_width, 1280);
        assert_eq!(config.screen_height, 1080);
        assert!(config.settle_delays);
    }
}
