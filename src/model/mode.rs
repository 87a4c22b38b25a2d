//! Upload mode selecting the lookup workflow.

use serde::{Deserialize, Serialize};

use crate::constants::route;

/// One of the three upload workflows offered on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    /// Recognize the single most prominent card
    One,
    /// Recognize every card in the picture
    All,
    /// Upload first, then let the user pick detected crops
    Choice,
}

impl UploadMode {
    /// Get all modes in landing page order.
    pub fn all() -> &'static [UploadMode] {
        &[UploadMode::One, UploadMode::All, UploadMode::Choice]
    }

    /// Name used in element ids (`fileInput-{name}`) and `data-mode`.
    pub fn name(&self) -> &'static str {
        match self {
            UploadMode::One => "one",
            UploadMode::All => "all",
            UploadMode::Choice => "choice",
        }
    }

    /// Parse a `data-mode` attribute value.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|mode| mode.name() == name)
    }

    /// Page the browser navigates to once the mode's hand-off is done.
    pub fn route(&self) -> &'static str {
        match self {
            UploadMode::One => route::ONE,
            UploadMode::All => route::ALL,
            UploadMode::Choice => route::CHOICE,
        }
    }

    /// Whether the image must reach the backend before navigating.
    pub fn uploads_before_navigation(&self) -> bool {
        matches!(self, UploadMode::Choice)
    }

    /// Class the mode's switcher button carries while active.
    pub fn active_class(&self) -> String {
        format!("mode-{}-active", self.name())
    }

    /// Build a per-mode element id such as `uploadArea-all`.
    pub fn element_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.name())
    }
}

impl std::fmt::Display for UploadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
