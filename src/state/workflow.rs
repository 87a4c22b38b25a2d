//! Landing page controller: mode switcher plus one widget per mode.

use crate::config::ClientConfig;
use crate::message::{Effect, Intent};
use crate::model::UploadMode;
use crate::state::UploadWidget;

/// What the mode switcher should look like after a switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeView {
    /// Mode whose block is displayed
    pub active: UploadMode,
    /// `(mode, visible)` for every block, in landing page order
    pub blocks: Vec<(UploadMode, bool)>,
}

/// The landing page's three upload widgets and which one is shown.
#[derive(Debug, Clone)]
pub struct UploadWorkflow {
    active: UploadMode,
    widgets: Vec<UploadWidget>,
}

impl UploadWorkflow {
    /// Create the workflow with `initial` shown (`one` when no button is active).
    pub fn new(config: &ClientConfig, initial: Option<UploadMode>) -> Self {
        Self {
            active: initial.unwrap_or(UploadMode::One),
            widgets: UploadMode::all()
                .iter()
                .map(|mode| UploadWidget::new(*mode, config))
                .collect(),
        }
    }

    pub fn active(&self) -> UploadMode {
        self.active
    }

    /// Show `mode`'s block and hide the others.
    pub fn switch_mode(&mut self, mode: UploadMode) -> ModeView {
        if mode != self.active {
            log::debug!("🔄 Switching mode: {} -> {}", self.active, mode);
        }
        self.active = mode;
        self.view()
    }

    pub fn view(&self) -> ModeView {
        ModeView {
            active: self.active,
            blocks: UploadMode::all()
                .iter()
                .map(|mode| (*mode, *mode == self.active))
                .collect(),
        }
    }

    pub fn widget(&self, mode: UploadMode) -> &UploadWidget {
        &self.widgets[Self::index(mode)]
    }

    pub fn widget_mut(&mut self, mode: UploadMode) -> &mut UploadWidget {
        &mut self.widgets[Self::index(mode)]
    }

    /// Route an intent to the widget it belongs to.
    pub fn handle(&mut self, mode: UploadMode, intent: Intent) -> Vec<Effect> {
        self.widget_mut(mode).handle(intent)
    }

    fn index(mode: UploadMode) -> usize {
        match mode {
            UploadMode::One => 0,
            UploadMode::All => 1,
            UploadMode::Choice => 2,
        }
    }
}
