//! Client state: the pending image slot, widget view models, and the result list.

mod card_list;
mod progress;
mod stored_image;
mod upload_widget;
mod workflow;

pub use card_list::{CardItem, CardList};
pub use progress::{DecorativeProgress, ProgressFrame, ProgressPhase, ProgressStep};
pub use stored_image::{MemoryStore, SessionStore, StoredImage};
pub use upload_widget::UploadWidget;
pub use workflow::{ModeView, UploadWorkflow};
