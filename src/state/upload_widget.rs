//! State of one mode's upload widget.

use crate::config::ClientConfig;
use crate::constants::CARD_TEXT_BREAK;
use crate::locale::Locale;
use crate::message::{Effect, Intent};
use crate::model::{SelectedFile, UploadMode, validate_selection};
use crate::state::{DecorativeProgress, ProgressStep};

/// Picker, drop area, preview, progress bar and modal of a single mode.
///
/// The three modes each own an instance; nothing is shared between them.
#[derive(Debug, Clone)]
pub struct UploadWidget {
    mode: UploadMode,
    locale: Locale,
    allowed_extensions: Vec<String>,
    selected: Option<SelectedFile>,
    /// Bumped on every selection so late preview reads can be dropped
    selection: u64,
    drag_over: bool,
    modal_open: bool,
    progress: DecorativeProgress,
}

impl UploadWidget {
    pub fn new(mode: UploadMode, config: &ClientConfig) -> Self {
        Self {
            mode,
            locale: config.locale,
            allowed_extensions: config.allowed_extensions.clone(),
            selected: None,
            selection: 0,
            drag_over: false,
            modal_open: false,
            progress: DecorativeProgress::new(config.progress),
        }
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Feed one intent; returns the effects to apply in order.
    pub fn handle(&mut self, intent: Intent) -> Vec<Effect> {
        match intent {
            Intent::SelectFile(file) => self.select(file),
            Intent::ClearSelection => self.clear(),
            Intent::DragOver => {
                self.drag_over = true;
                vec![Effect::SetDragHighlight(true)]
            }
            Intent::DragLeave => {
                self.drag_over = false;
                vec![Effect::SetDragHighlight(false)]
            }
            Intent::Drop(file) => {
                self.drag_over = false;
                let mut effects = vec![Effect::SetDragHighlight(false)];
                if let Some(file) = file {
                    effects.extend(self.select(file));
                }
                effects
            }
            Intent::PreviewLoaded { selection, src } => {
                if selection != self.selection {
                    log::debug!("🖼️ Dropping stale preview for {} widget", self.mode);
                    return Vec::new();
                }
                vec![Effect::ShowPreview { src }]
            }
            Intent::RequestConfirm => self.request_confirm(),
            Intent::Confirm => {
                if !self.modal_open {
                    return Vec::new();
                }
                self.modal_open = false;
                log::info!("✅ Confirmed {} search", self.mode);
                vec![Effect::CloseModal, Effect::Dispatch(self.mode)]
            }
            Intent::Cancel => {
                if !self.modal_open {
                    return Vec::new();
                }
                self.modal_open = false;
                vec![Effect::CloseModal]
            }
        }
    }

    /// Advance the decorative progress bar for a timer that fired.
    pub fn advance_progress(&mut self, run: u64) -> Option<Effect> {
        self.progress.advance(run).map(Effect::Progress)
    }

    fn select(&mut self, file: SelectedFile) -> Vec<Effect> {
        self.selection += 1;
        log::info!(
            "📂 {} widget selected {} ({})",
            self.mode,
            file.name,
            if file.media_type.is_empty() {
                "unknown type"
            } else {
                file.media_type.as_str()
            }
        );

        let mut effects = vec![Effect::SetCaption(
            self.locale.selected_file_caption(&file.name),
        )];
        if file.is_image() {
            effects.push(Effect::ReadPreview {
                selection: self.selection,
            });
        } else {
            effects.push(Effect::HidePreview);
        }
        let step: ProgressStep = self.progress.start();
        effects.push(Effect::Progress(step));

        self.selected = Some(file);
        effects
    }

    fn clear(&mut self) -> Vec<Effect> {
        // Invalidate any preview read still in flight
        self.selection += 1;
        if self.selected.take().is_some() {
            log::info!("🗑️ {} widget selection cleared", self.mode);
        }
        vec![
            Effect::SetCaption(String::new()),
            Effect::HidePreview,
            Effect::Progress(self.progress.stop()),
        ]
    }

    fn request_confirm(&mut self) -> Vec<Effect> {
        if let Err(e) = validate_selection(self.selected.as_ref(), self.allowed_extensions.as_slice()) {
            log::warn!("⚠️ {} widget rejected confirmation: {}", self.mode, e);
            return vec![Effect::Alert(e.user_message(self.locale))];
        }

        self.modal_open = true;
        vec![Effect::OpenModal {
            title: self.locale.modal_title(self.mode).to_string(),
            message_html: self
                .locale
                .modal_message_lines(self.mode)
                .join(CARD_TEXT_BREAK),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ProgressFrame;

    fn widget(mode: UploadMode) -> UploadWidget {
        let config = ClientConfig {
            locale: Locale::En,
            ..ClientConfig::default()
        };
        UploadWidget::new(mode, &config)
    }

    fn jpg() -> SelectedFile {
        SelectedFile::new("a.JPG", "image/jpeg")
    }

    #[test]
    fn test_select_image_reads_preview_and_starts_progress() {
        let mut w = widget(UploadMode::One);
        let effects = w.handle(Intent::SelectFile(jpg()));

        assert_eq!(effects[0], Effect::SetCaption("Selected: a.JPG".to_string()));
        assert_eq!(effects[1], Effect::ReadPreview { selection: 1 });
        assert!(matches!(
            effects[2],
            Effect::Progress(ProgressStep {
                frame: ProgressFrame::Show { percent: 0 },
                ..
            })
        ));
        assert_eq!(w.selected(), Some(&jpg()));
    }

    #[test]
    fn test_select_non_image_hides_preview() {
        let mut w = widget(UploadMode::One);
        let effects = w.handle(Intent::SelectFile(SelectedFile::new("notes.txt", "text/plain")));
        assert!(effects.contains(&Effect::HidePreview));
        assert!(!effects.iter().any(|e| matches!(e, Effect::ReadPreview { .. })));
    }

    #[test]
    fn test_stale_preview_is_dropped() {
        let mut w = widget(UploadMode::All);
        w.handle(Intent::SelectFile(jpg()));
        w.handle(Intent::SelectFile(SelectedFile::new("b.png", "image/png")));

        let stale = w.handle(Intent::PreviewLoaded {
            selection: 1,
            src: "data:image/jpeg;base64,AA==".to_string(),
        });
        assert!(stale.is_empty());

        let fresh = w.handle(Intent::PreviewLoaded {
            selection: 2,
            src: "data:image/png;base64,AA==".to_string(),
        });
        assert_eq!(
            fresh,
            vec![Effect::ShowPreview {
                src: "data:image/png;base64,AA==".to_string()
            }]
        );
    }

    #[test]
    fn test_drag_and_drop() {
        let mut w = widget(UploadMode::Choice);
        assert_eq!(w.handle(Intent::DragOver), vec![Effect::SetDragHighlight(true)]);
        assert!(w.is_drag_over());

        assert_eq!(w.handle(Intent::Drop(None)), vec![Effect::SetDragHighlight(false)]);
        assert!(!w.is_drag_over());
        assert!(w.selected().is_none());

        w.handle(Intent::DragOver);
        let effects = w.handle(Intent::Drop(Some(jpg())));
        assert_eq!(effects[0], Effect::SetDragHighlight(false));
        assert!(effects.contains(&Effect::ReadPreview { selection: 1 }));
        assert_eq!(w.selected(), Some(&jpg()));
    }

    #[test]
    fn test_confirm_without_file_alerts() {
        let mut w = widget(UploadMode::One);
        let effects = w.handle(Intent::RequestConfirm);
        assert_eq!(
            effects,
            vec![Effect::Alert(Locale::En.no_file_message().to_string())]
        );
        assert!(!w.is_modal_open());
    }

    #[test]
    fn test_emptied_picker_blocks_confirmation() {
        let mut w = widget(UploadMode::One);
        let select = w.handle(Intent::SelectFile(jpg()));
        let Some(Effect::Progress(first)) = select.last().cloned() else {
            panic!("expected progress effect");
        };

        let effects = w.handle(Intent::ClearSelection);
        assert_eq!(effects[0], Effect::SetCaption(String::new()));
        assert_eq!(effects[1], Effect::HidePreview);
        assert!(matches!(
            effects[2],
            Effect::Progress(ProgressStep {
                frame: ProgressFrame::Hide,
                next_delay_ms: None,
                ..
            })
        ));
        assert!(w.selected().is_none());
        assert_eq!(w.advance_progress(first.run), None);

        // A preview read started before the clear is dropped
        let late = w.handle(Intent::PreviewLoaded {
            selection: 1,
            src: "data:image/jpeg;base64,AA==".to_string(),
        });
        assert!(late.is_empty());

        assert_eq!(
            w.handle(Intent::RequestConfirm),
            vec![Effect::Alert(Locale::En.no_file_message().to_string())]
        );
        assert!(!w.is_modal_open());
    }

    #[test]
    fn test_invalid_extension_accepted_then_rejected() {
        let mut w = widget(UploadMode::All);
        for name in ["c.gif", "d"] {
            let effects = w.handle(Intent::SelectFile(SelectedFile::new(name, "")));
            assert!(!effects.iter().any(|e| matches!(e, Effect::Alert(_))));

            let effects = w.handle(Intent::RequestConfirm);
            assert_eq!(
                effects,
                vec![Effect::Alert(Locale::En.bad_extension_message().to_string())]
            );
            assert!(!w.is_modal_open());
            assert!(w.handle(Intent::Confirm).is_empty());
        }
    }

    #[test]
    fn test_modal_copy_per_mode() {
        let mut w = widget(UploadMode::All);
        w.handle(Intent::SelectFile(SelectedFile::new("b.jfif", "image/jpeg")));
        let effects = w.handle(Intent::RequestConfirm);
        assert_eq!(
            effects,
            vec![Effect::OpenModal {
                title: "⚠️ All cards".to_string(),
                message_html: "With many cards<br>results will take longer<br>Search this way?"
                    .to_string(),
            }]
        );
        assert!(w.is_modal_open());
    }

    #[test]
    fn test_confirm_dispatches_own_mode() {
        let mut w = widget(UploadMode::Choice);
        w.handle(Intent::SelectFile(jpg()));
        w.handle(Intent::RequestConfirm);

        let effects = w.handle(Intent::Confirm);
        assert_eq!(
            effects,
            vec![Effect::CloseModal, Effect::Dispatch(UploadMode::Choice)]
        );
        assert!(!w.is_modal_open());
    }

    #[test]
    fn test_cancel_closes_without_dispatch() {
        let mut w = widget(UploadMode::One);
        w.handle(Intent::SelectFile(jpg()));
        w.handle(Intent::RequestConfirm);
        assert_eq!(w.handle(Intent::Cancel), vec![Effect::CloseModal]);
        assert!(w.handle(Intent::Confirm).is_empty());
    }

    #[test]
    fn test_progress_runs_through_widget() {
        let mut w = widget(UploadMode::One);
        let effects = w.handle(Intent::SelectFile(jpg()));
        let Some(Effect::Progress(first)) = effects.last().cloned() else {
            panic!("expected progress effect");
        };

        let mut frames = Vec::new();
        while let Some(Effect::Progress(step)) = w.advance_progress(first.run) {
            frames.push(step.frame);
        }
        assert_eq!(frames.len(), 12);
        assert_eq!(frames.last(), Some(&ProgressFrame::Hide));
    }
}
