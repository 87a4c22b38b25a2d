//! Intents and effects of the upload widgets.
//!
//! DOM events are translated into [`Intent`]s; each widget answers with
//! [`Effect`]s that the page glue applies. The widgets never touch the DOM.

use crate::model::{SelectedFile, UploadMode};
use crate::state::ProgressStep;

/// Something the user did to one upload widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// A file was chosen in the picker
    SelectFile(SelectedFile),
    /// The picker now holds no file (e.g. reopened and cancelled)
    ClearSelection,
    /// A drag is hovering over the upload area
    DragOver,
    /// The drag left the upload area
    DragLeave,
    /// Something was dropped; `None` when the drop carried no file
    Drop(Option<SelectedFile>),
    /// The preview read for selection `selection` finished
    PreviewLoaded { selection: u64, src: String },
    /// The mode's search button was pressed
    RequestConfirm,
    /// The modal's accept button was pressed
    Confirm,
    /// The modal was dismissed
    Cancel,
}

/// Something the page should do in response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the file name caption
    SetCaption(String),
    /// Read the current file as a data URL and report back with `PreviewLoaded`
    ReadPreview { selection: u64 },
    /// Display the preview and replay its fade-in
    ShowPreview { src: String },
    HidePreview,
    /// Apply a progress frame and schedule the next one
    Progress(ProgressStep),
    /// Toggle the drag-over highlight
    SetDragHighlight(bool),
    /// Show a blocking message
    Alert(String),
    /// Open the mode's confirmation modal
    OpenModal { title: String, message_html: String },
    CloseModal,
    /// Re-read the file, store it, and hand off to the mode's destination
    Dispatch(UploadMode),
}
