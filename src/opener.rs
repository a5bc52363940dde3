use crate::config::Config;
use crate::features::FeatureSet;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Result of a window-open request.
///
/// `Unknown` covers the cases where the host gives no reliable signal:
/// `_self`/`_parent`/`_top` navigations, and `noopener`/`noreferrer` opens
/// where the window exists but the reference is withheld.
#[derive(Debug, Clone)]
pub enum OpenOutcome {
    Opened(WindowHandle),
    Blocked,
    Unknown,
}

impl OpenOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, OpenOutcome::Blocked)
    }
}

/// Host-side window-opening primitive, abstracted so scenarios can run
/// against any host.
pub trait WindowOpener {
    fn open(&mut self, url: &str, target: &str, features: &FeatureSet) -> OpenOutcome;
}

#[derive(Debug)]
struct WindowState {
    name: String,
    url: String,
    document: Option<String>,
    closed: bool,
}

/// Shared reference to a simulated window. Cloning the handle clones the
/// reference, matching how a host hands out window objects.
#[derive(Debug, Clone)]
pub struct WindowHandle {
    state: Rc<RefCell<WindowState>>,
}

impl WindowHandle {
    fn new(name: &str, url: &str) -> Self {
        Self {
            state: Rc::new(RefCell::new(WindowState {
                name: name.to_string(),
                url: url.to_string(),
                document: None,
                closed: false,
            })),
        }
    }

    pub fn name(&self) -> String {
        self.state.borrow().name.clone()
    }

    pub fn url(&self) -> String {
        self.state.borrow().url.clone()
    }

    pub fn closed(&self) -> bool {
        self.state.borrow().closed
    }

    pub fn close(&self) {
        self.state.borrow_mut().closed = true;
    }

    /// Replace the window's document, like `document.write` followed by
    /// `document.close()`. Writes to a closed window are dropped.
    pub fn write(&self, html: &str) {
        let mut state = self.state.borrow_mut();
        if !state.closed {
            state.document = Some(html.to_string());
        }
    }

    pub fn document(&self) -> Option<String> {
        self.state.borrow().document.clone()
    }

    fn navigate(&self, url: &str) {
        self.state.borrow_mut().url = url.to_string();
    }
}

/// Simulated host standing in for the browser: a window registry plus a
/// popup-blocker policy and screen geometry taken from configuration.
pub struct SimulatedOpener {
    popup_blocker: bool,
    current_url: String,
    windows: Vec<WindowHandle>,
    screen_width: u32,
    screen_height: u32,
    avail_width: u32,
    avail_height: u32,
}

impl SimulatedOpener {
    pub fn new(config: &Config) -> Self {
        Self {
            popup_blocker: config.popup_blocker,
            current_url: config.page_url.clone(),
            windows: Vec::new(),
            screen_width: config.screen_width,
            screen_height: config.screen_height,
            avail_width: config.avail_width,
            avail_height: config.avail_height,
        }
    }

    /// URL the probe's own page is currently on (`window.location.href`).
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    pub fn avail_size(&self) -> (u32, u32) {
        (self.avail_width, self.avail_height)
    }

    /// Windows created this session that are still open.
    pub fn open_windows(&self) -> Vec<WindowHandle> {
        self.windows.iter().filter(|w| !w.closed()).cloned().collect()
    }

    pub fn window_named(&self, name: &str) -> Option<WindowHandle> {
        self.windows
            .iter()
            .find(|w| !w.closed() && w.name() == name)
            .cloned()
    }

    fn create(&mut self, name: &str, url: &str) -> WindowHandle {
        let handle = WindowHandle::new(name, url);
        debug!("created window name={:?} url={}", name, url);
        self.windows.push(handle.clone());
        handle
    }
}

impl WindowOpener for SimulatedOpener {
    fn open(&mut self, url: &str, target: &str, features: &FeatureSet) -> OpenOutcome {
        match target {
            // Navigations of the current browsing context never hand back a
            // usable reference.
            "_self" | "_parent" | "_top" => {
                debug!("navigating current page to {url} (target {target})");
                self.current_url = url.to_string();
                OpenOutcome::Unknown
            }
            "_blank" => {
                if self.popup_blocker {
                    debug!("popup blocker suppressed open of {url}");
                    return OpenOutcome::Blocked;
                }
                let handle = self.create("", url);
                if features.enabled("noopener") || features.enabled("noreferrer") {
                    OpenOutcome::Unknown
                } else {
                    OpenOutcome::Opened(handle)
                }
            }
            name => {
                // Named target: navigate an existing open window of that
                // name, else create one. Reuse is a navigation, which popup
                // blockers leave alone.
                if let Some(existing) = self.window_named(name) {
                    existing.navigate(url);
                    return OpenOutcome::Opened(existing);
                }
                if self.popup_blocker {
                    debug!("popup blocker suppressed open of {url}");
                    return OpenOutcome::Blocked;
                }
                let handle = self.create(name, url);
                if features.enabled("noopener") || features.enabled("noreferrer") {
                    OpenOutcome::Unknown
                } else {
                    OpenOutcome::Opened(handle)
                }
            }
        }
    }
}
