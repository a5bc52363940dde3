mod config;
mod display;
mod error;
mod event_log;
mod features;
mod opener;
mod scenarios;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simple_logger::SimpleLogger;
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use crate::display::{HtmlSink, TerminalSink};
use crate::error::ProbeError;
use crate::event_log::{DisplaySink, EventLog};
use crate::opener::SimulatedOpener;
use crate::scenarios::{Scenario, ScenarioContext, SCENARIOS};

fn main() -> Result<()> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init()?;

    let cli = config::Cli::parse();

    if cli.list {
        for scenario in SCENARIOS {
            println!("{:<18} {}", scenario.name, scenario.label);
        }
        return Ok(());
    }

    let config = config::load_config(&cli)?;
    info!("Configuration loaded successfully");

    // Resolve the selection up front so a typo fails before anything runs.
    let selected: Vec<&Scenario> = if cli.all || cli.scenarios.is_empty() {
        SCENARIOS.iter().collect()
    } else {
        cli.scenarios
            .iter()
            .map(|name| {
                scenarios::find(name).ok_or_else(|| ProbeError::UnknownScenario(name.clone()))
            })
            .collect::<Result<_, _>>()?
    };

    let html_sink = cli
        .html_out
        .as_ref()
        .map(|_| Rc::new(RefCell::new(HtmlSink::new())));
    let sink: Box<dyn DisplaySink> = match &html_sink {
        Some(sink) => Box::new(Rc::clone(sink)),
        None => Box::new(TerminalSink::new()),
    };

    let mut log = EventLog::new(sink);
    let mut opener = SimulatedOpener::new(&config);

    scenarios::startup_banner(&mut log);
    for scenario in &selected {
        info!("Running scenario: {}", scenario.name);
        (scenario.run)(&mut ScenarioContext {
            log: &mut log,
            opener: &mut opener,
            config: &config,
        });
    }
    info!(
        "Run finished: {} scenario(s), {} log entries, {} window(s) still open",
        selected.len(),
        log.len(),
        opener.open_windows().len()
    );

    if let (Some(path), Some(sink)) = (&cli.html_out, &html_sink) {
        fs::write(path, sink.borrow().finish())
            .with_context(|| format!("Failed to write rendered log to {path:?}"))?;
        info!("Wrote rendered log to {path:?}");
    }

    if cli.json {
        let json = serde_json::to_string_pretty(log.entries()).map_err(ProbeError::JsonError)?;
        println!("{json}");
    }

    Ok(())
}
