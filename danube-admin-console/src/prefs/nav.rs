use std::sync::Arc;
use std::time::{Duration, Instant};

use super::storage::{PreferenceStorage, PrefsError};

pub const NAV_DESKTOP_KEY: &str = "nav.desktopExpanded";
pub const NAV_MOBILE_KEY: &str = "nav.mobileExpanded";

/// How long the expand animation runs before labels may show.
pub const NAV_TRANSITION: Duration = Duration::from_millis(225);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Desktop,
    Mobile,
}

impl Layout {
    fn key(self) -> &'static str {
        match self {
            Layout::Desktop => NAV_DESKTOP_KEY,
            Layout::Mobile => NAV_MOBILE_KEY,
        }
    }

    fn default_expanded(self) -> bool {
        matches!(self, Layout::Desktop)
    }
}

/// Navigation expansion, persisted separately per layout.
pub struct NavState {
    desktop_expanded: bool,
    mobile_expanded: bool,
    transition_until: Option<Instant>,
    storage: Arc<dyn PreferenceStorage>,
}

impl NavState {
    pub fn load(storage: Arc<dyn PreferenceStorage>) -> Self {
        let read = |layout: Layout| {
            storage
                .get(layout.key())
                .and_then(|raw| parse_bool(&raw))
                .unwrap_or_else(|| layout.default_expanded())
        };
        Self {
            desktop_expanded: read(Layout::Desktop),
            mobile_expanded: read(Layout::Mobile),
            transition_until: None,
            storage,
        }
    }

    pub fn is_expanded(&self, layout: Layout) -> bool {
        match layout {
            Layout::Desktop => self.desktop_expanded,
            Layout::Mobile => self.mobile_expanded,
        }
    }

    pub fn set_expanded(&mut self, layout: Layout, expanded: bool) -> Result<(), PrefsError> {
        let slot = match layout {
            Layout::Desktop => &mut self.desktop_expanded,
            Layout::Mobile => &mut self.mobile_expanded,
        };
        if *slot != expanded {
            *slot = expanded;
            self.transition_until = Some(Instant::now() + NAV_TRANSITION);
        }
        self.storage
            .set(layout.key(), if expanded { "true" } else { "false" })
    }

    pub fn toggle(&mut self, layout: Layout) -> Result<bool, PrefsError> {
        let next = !self.is_expanded(layout);
        self.set_expanded(layout, next)?;
        Ok(next)
    }

    /// False while the expand/collapse transition is still running.
    pub fn transition_complete(&self) -> bool {
        self.transition_until
            .map(|until| Instant::now() >= until)
            .unwrap_or(true)
    }

    /// Labels only show on an expanded nav once it finished expanding.
    pub fn labels_visible(&self, layout: Layout) -> bool {
        self.is_expanded(layout) && self.transition_complete()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
