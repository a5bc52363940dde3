//! Replays of the original test-bed page's window.open() scenarios against a
//! simulated host. Each scenario narrates intent as `info`, then classifies
//! the outcome as `success`/`error` (`warning` for soft outcomes).

use crate::config::Config;
use crate::event_log::EventLog;
use crate::features::FeatureSet;
use crate::opener::{OpenOutcome, SimulatedOpener, WindowHandle, WindowOpener};
use crate::types::Severity;
use chrono::Local;
use std::thread;
use std::time::Duration;

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub run: fn(&mut ScenarioContext),
}

pub struct ScenarioContext<'a> {
    pub log: &'a mut EventLog,
    pub opener: &'a mut SimulatedOpener,
    pub config: &'a Config,
}

impl ScenarioContext<'_> {
    /// Fixed delay giving the host time to settle before a follow-up check.
    /// Collapses to nothing when settle delays are disabled.
    fn settle(&self, delay: Duration) {
        if self.config.settle_delays {
            thread::sleep(delay);
        }
    }

    fn open(&mut self, url: &str, target: &str, features: &FeatureSet) -> OpenOutcome {
        self.opener.open(url, target, features)
    }

    /// The common open-and-classify tail: success line on an opened window,
    /// the stock popup-blocked error otherwise.
    fn report_open(
        &mut self,
        outcome: OpenOutcome,
        success_message: impl Into<String>,
    ) -> Option<WindowHandle> {
        match outcome {
            OpenOutcome::Opened(handle) => {
                self.log.append(success_message, Severity::Success);
                Some(handle)
            }
            OpenOutcome::Blocked | OpenOutcome::Unknown => {
                self.log
                    .append("✗ Failed to open window (popup blocked?)", Severity::Error);
                None
            }
        }
    }
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "same-origin",
        label: "Open same origin URL",
        run: same_origin,
    },
    Scenario {
        name: "about-blank",
        label: "Open about:blank",
        run: about_blank,
    },
    Scenario {
        name: "external-url",
        label: "Open external URL",
        run: external_url,
    },
    Scenario {
        name: "data-url",
        label: "Open data URL with inline HTML",
        run: data_url,
    },
    Scenario {
        name: "relative-path",
        label: "Open relative path",
        run: relative_path,
    },
    Scenario {
        name: "with-toolbar",
        label: "Open window with toolbar and menubar",
        run: with_toolbar,
    },
    Scenario {
        name: "minimal",
        label: "Open minimal window",
        run: minimal,
    },
    Scenario {
        name: "custom-size",
        label: "Open window with custom size",
        run: custom_size,
    },
    Scenario {
        name: "positioned",
        label: "Open positioned window",
        run: positioned,
    },
    Scenario {
        name: "scrollable",
        label: "Open window with scrollbars",
        run: scrollable,
    },
    Scenario {
        name: "blank-target",
        label: "Open with target=_blank",
        run: blank_target,
    },
    Scenario {
        name: "self-target",
        label: "Open with target=_self",
        run: self_target,
    },
    Scenario {
        name: "named-target",
        label: "Open with a named target",
        run: named_target,
    },
    Scenario {
        name: "parent-target",
        label: "Open with target=_parent",
        run: parent_target,
    },
    Scenario {
        name: "top-target",
        label: "Open with target=_top",
        run: top_target,
    },
    Scenario {
        name: "write-content",
        label: "Open about:blank and write content",
        run: write_content,
    },
    Scenario {
        name: "multiple-windows",
        label: "Open multiple windows",
        run: multiple_windows,
    },
    Scenario {
        name: "noopener",
        label: "Open window with noopener",
        run: noopener,
    },
    Scenario {
        name: "noreferrer",
        label: "Open window with noreferrer",
        run: noreferrer,
    },
    Scenario {
        name: "window-reference",
        label: "Test window reference and properties",
        run: window_reference,
    },
    Scenario {
        name: "popup",
        label: "Open centered popup window",
        run: popup,
    },
    Scenario {
        name: "maximized",
        label: "Open maximized window",
        run: maximized,
    },
    Scenario {
        name: "all-features",
        label: "Open window with comprehensive feature string",
        run: all_features,
    },
    Scenario {
        name: "conditional",
        label: "Conditional open with popup blocker detection",
        run: conditional,
    },
    Scenario {
        name: "clear-log",
        label: "Clear the event log",
        run: clear_log,
    },
];

pub fn find(name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.name == name)
}

/// The original page's load-time banner.
pub fn startup_banner(log: &mut EventLog) {
    log.append(
        "🚀 window.open() Test Bed loaded successfully",
        Severity::Success,
    );
    log.info("Click any button to test different window.open() scenarios");
}

// ===== URL Types =====

fn same_origin(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening same origin URL...");
    let url = ctx.opener.current_url().to_string();
    let outcome = ctx.open(&url, "_blank", &FeatureSet::new());
    ctx.report_open(outcome, "✓ Same origin window opened successfully");
}

fn about_blank(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening about:blank...");
    let outcome = ctx.open("about:blank", "_blank", &FeatureSet::new());
    if let Some(win) = ctx.report_open(outcome, "✓ about:blank opened successfully") {
        let name = win.name();
        let name = if name.is_empty() {
            "(unnamed)".to_string()
        } else {
            name
        };
        ctx.log.info(format!("Window name: {name}"));
    }
}

fn external_url(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening external URL (example.com)...");
    let outcome = ctx.open("https://example.com", "_blank", &FeatureSet::new());
    ctx.report_open(outcome, "✓ External URL opened successfully");
}

fn data_url(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening data URL with inline HTML...");
    let html = format!(
        "<!DOCTYPE html><html><head><title>Data URL Test</title></head>\
         <body><h1>🎉 Data URL Content</h1>\
         <p>This content was loaded from a data URL!</p>\
         <p>Time: {}</p></body></html>",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    let data_url = format!("data:text/html;charset=utf-8,{html}");
    let outcome = ctx.open(&data_url, "_blank", &FeatureSet::new());
    ctx.report_open(outcome, "✓ Data URL window opened successfully");
}

fn relative_path(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening relative path (sample.html)...");
    let outcome = ctx.open("sample.html", "_blank", &FeatureSet::new());
    ctx.report_open(outcome, "✓ Relative path window opened successfully");
}

// ===== Window Features =====

fn with_toolbar(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening window with toolbar and menubar...");
    let features = FeatureSet::parse("toolbar=yes,menubar=yes,location=yes,status=yes");
    let url = ctx.opener.current_url().to_string();
    let outcome = ctx.open(&url, "_blank", &features);
    ctx.report_open(outcome, format!("✓ Window opened with features: {features}"));
}

fn minimal(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening minimal window...");
    let features = FeatureSet::parse("toolbar=no,menubar=no,location=no,status=no,scrollbars=yes");
    let url = ctx.opener.current_url().to_string();
    let outcome = ctx.open(&url, "_blank", &features);
    ctx.report_open(
        outcome,
        format!("✓ Minimal window opened with features: {features}"),
    );
}

fn custom_size(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening window with custom size (400x300)...");
    let features = FeatureSet::parse("width=400,height=300");
    let url = ctx.opener.current_url().to_string();
    let outcome = ctx.open(&url, "_blank", &features);
    ctx.report_open(outcome, format!("✓ Window opened with dimensions: {features}"));
}

fn positioned(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening positioned window...");
    let features = FeatureSet::parse("left=100,top=100,width=500,height=400");
    let url = ctx.opener.current_url().to_string();
    let outcome = ctx.open(&url, "_blank", &features);
    ctx.report_open(outcome, format!("✓ Window opened at position: {features}"));
}

fn scrollable(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening window with scrollbars...");
    let features = FeatureSet::parse("scrollbars=yes,width=300,height=400");
    let url = ctx.opener.current_url().to_string();
    let outcome = ctx.open(&url, "_blank", &features);
    ctx.report_open(outcome, format!("✓ Scrollable window opened: {features}"));
}

// ===== Target Options =====

fn blank_target(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening with target=\"_blank\"...");
    let url = ctx.opener.current_url().to_string();
    let outcome = ctx.open(&url, "_blank", &FeatureSet::new());
    ctx.report_open(outcome, "✓ New window/tab opened with _blank target");
}

fn self_target(ctx: &mut ScenarioContext) {
    ctx.log.append(
        "⚠️ Opening with target=\"_self\" (will replace current window)...",
        Severity::Warning,
    );
    ctx.settle(Duration::from_millis(1000));
    let url = ctx.opener.current_url().to_string();
    ctx.open(&url, "_self", &FeatureSet::new());
}

fn named_target(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening with named target \"myWindow\"...");
    let url = ctx.opener.current_url().to_string();
    let outcome = ctx.open(&url, "myWindow", &FeatureSet::new());
    ctx.report_open(
        outcome,
        "✓ Window opened with named target (reuse this window by clicking again)",
    );
}

fn parent_target(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening with target=\"_parent\"...");
    let url = ctx.opener.current_url().to_string();
    ctx.open(&url, "_parent", &FeatureSet::new());
    ctx.log.append(
        "✓ Opened with _parent target (behaves like _self if no parent frame)",
        Severity::Success,
    );
}

fn top_target(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening with target=\"_top\"...");
    let url = ctx.opener.current_url().to_string();
    ctx.open(&url, "_top", &FeatureSet::new());
    ctx.log.append(
        "✓ Opened with _top target (behaves like _self if not in frames)",
        Severity::Success,
    );
}

// ===== Advanced Scenarios =====

fn write_content(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening about:blank and writing content...");
    let features = FeatureSet::parse("width=500,height=400");
    let outcome = ctx.open("about:blank", "_blank", &features);
    match outcome {
        OpenOutcome::Opened(win) => {
            win.write(&format!(
                "<!DOCTYPE html><html><head><title>Written Content</title></head>\
                 <body><h1>✍️ Dynamically Written Content</h1>\
                 <p>This content was written after the open!</p>\
                 <p>Created at: {}</p></body></html>",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            ));
            ctx.log.append(
                "✓ Content written to new window successfully",
                Severity::Success,
            );
        }
        _ => {
            ctx.log
                .append("✗ Failed to open window (popup blocked?)", Severity::Error);
        }
    }
}

fn multiple_windows(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening multiple windows...");
    let mut count = 0;
    for i in 1..=3 {
        let features = FeatureSet::parse(&format!(
            "width=300,height=200,left={},top={}",
            i * 50,
            i * 50
        ));
        let outcome = ctx.open("about:blank", &format!("window{i}"), &features);
        if let OpenOutcome::Opened(win) = outcome {
            win.write(&format!(
                "<!DOCTYPE html><html><head><title>Window {i}</title></head>\
                 <body><h2>Window #{i}</h2><p>This is window number {i}</p></body></html>"
            ));
            count += 1;
        }
    }
    let severity = if count == 3 {
        Severity::Success
    } else {
        Severity::Warning
    };
    ctx.log
        .append(format!("✓ Opened {count} of 3 windows"), severity);
}

fn noopener(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening window with rel=\"noopener\"...");
    let url = ctx.opener.current_url().to_string();
    let outcome = ctx.open(&url, "_blank", &FeatureSet::parse("noopener"));
    report_reference_withheld(
        ctx,
        outcome,
        "✓ Window opened with noopener (reference is null as expected)",
    );
}

fn noreferrer(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening window with rel=\"noreferrer\"...");
    let url = ctx.opener.current_url().to_string();
    let outcome = ctx.open(&url, "_blank", &FeatureSet::parse("noreferrer"));
    report_reference_withheld(
        ctx,
        outcome,
        "✓ Window opened with noreferrer (reference is null, no referrer sent)",
    );
}

fn report_reference_withheld(ctx: &mut ScenarioContext, outcome: OpenOutcome, success_message: &str) {
    match outcome {
        OpenOutcome::Unknown => {
            ctx.log.append(success_message, Severity::Success);
        }
        OpenOutcome::Opened(_) => {
            ctx.log.append(
                "⚠️ Window opened but reference might not be null (browser behavior varies)",
                Severity::Warning,
            );
        }
        OpenOutcome::Blocked => {
            ctx.log
                .append("✗ Failed to open window (popup blocked?)", Severity::Error);
        }
    }
}

fn window_reference(ctx: &mut ScenarioContext) {
    ctx.log.info("Testing window reference and properties...");
    let features = FeatureSet::parse("width=400,height=300");
    let outcome = ctx.open("about:blank", "_blank", &features);
    match outcome {
        OpenOutcome::Opened(win) => {
            ctx.log
                .append("✓ Window opened successfully", Severity::Success);
            ctx.log.info("Reference type: window handle");
            ctx.log.info(format!("Window closed: {}", win.closed()));
            let name = win.name();
            let name = if name.is_empty() {
                "(unnamed)".to_string()
            } else {
                name
            };
            ctx.log.info(format!("Window name: {name}"));
            ctx.log.info(format!("Window location: {}", win.url()));

            // Close it after the settle window, like the page's timer did.
            ctx.settle(Duration::from_millis(3000));
            if !win.closed() {
                win.close();
                ctx.log.info("Test window closed automatically");
            }
        }
        _ => {
            ctx.log
                .append("✗ Failed to open window (popup blocked?)", Severity::Error);
        }
    }
}

// ===== Complex Features =====

fn popup(ctx: &mut ScenarioContext) {
    ctx.log.info("Opening centered popup window...");
    let (screen_width, screen_height) = ctx.opener.screen_size();
    let width = 500;
    let height = 400;
    // Screens smaller than the popup pin it to the corner instead of
    // underflowing.
    let left = (screen_width / 2).saturating_sub(width / 2);
    let top = (screen_height / 2).saturating_sub(height / 2);
    let features = FeatureSet::parse(&format!(
        "width={width},height={height},left={left},top={top},toolbar=no,menubar=no"
    ));
    let url = ctx.opener.current_url().to_string();
    let outcome = ctx.open(&url, "popup", &features);
    match outcome {
        OpenOutcome::Opened(_) => {
            ctx.log.append(
                format!("✓ Popup opened at center of screen: {features}"),
                Severity::Success,
            );
        }
        _ => {
            ctx.log
                .append("✗ Failed to open popup (popup blocked?)", Severity::Error);
        }
    }
}

fn maximized(ctx: &mut ScenarioContext) {
    ctx.log.info("Attempting to open maximized window...");
    let (avail_width, avail_height) = ctx.opener.avail_size();
    let features = FeatureSet::parse(&format!(
        "width={avail_width},height={avail_height},left=0,top=0"
    ));
    let url = ctx.opener.current_url().to_string();
    let outcome = ctx.open(&url, "_blank", &features);
    if ctx
        .report_open(
            outcome,
            format!("✓ Window opened with screen dimensions: {features}"),
        )
        .is_some()
    {
        ctx.log
            .info("Note: True fullscreen requires user interaction");
    }
}

fn all_features(ctx: &mut ScenarioContext) {
    ctx.log
        .info("Opening window with comprehensive feature string...");
    let features = FeatureSet::parse(
        "width=800,height=600,left=100,top=100,toolbar=yes,menubar=yes,\
         location=yes,status=yes,scrollbars=yes,resizable=yes",
    );
    let url = ctx.opener.current_url().to_string();
    let outcome = ctx.open(&url, "_blank", &features);
    ctx.report_open(
        outcome,
        format!("✓ Window opened with all features: {features}"),
    );
}

fn conditional(ctx: &mut ScenarioContext) {
    ctx.log
        .info("Testing conditional window open (popup blocker detection)...");
    let features = FeatureSet::parse("width=400,height=300");
    let outcome = ctx.open("about:blank", "_blank", &features);
    match outcome {
        OpenOutcome::Blocked | OpenOutcome::Unknown => {
            ctx.log
                .append("✗ Window was blocked by popup blocker", Severity::Error);
        }
        OpenOutcome::Opened(win) => {
            ctx.log
                .append("✓ Window opened successfully", Severity::Success);

            ctx.settle(Duration::from_millis(100));
            if win.closed() {
                ctx.log
                    .append("⚠️ Window was closed immediately", Severity::Warning);
            } else {
                ctx.log.append("✓ Window is still open", Severity::Success);
                win.write(
                    "<!DOCTYPE html><html><head><title>Conditional Test</title></head>\
                     <body><h2>✅ Popup Not Blocked</h2>\
                     <p>This window opened successfully!</p></body></html>",
                );
            }
        }
    }
}

fn clear_log(ctx: &mut ScenarioContext) {
    ctx.log.clear();
}
