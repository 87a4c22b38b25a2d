//! Global constants for the cardlens client

/// Session storage key holding the pending image data URL
pub const STORED_IMAGE_KEY: &str = "uploadedImage";

/// LocalStorage key for client config overrides
pub const CONFIG_STORAGE_KEY: &str = "cardlens-config";

/// Multipart field name every upload uses
pub const UPLOAD_FIELD: &str = "image";

/// Filename sent with images rebuilt from the stored data URL
pub const RECONSTRUCTED_FILENAME: &str = "upload.jpg";

/// Extensions accepted at confirmation time (compared lowercase)
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "jfif", "webp"];

/// Line separator inside a rendered card description
pub const CARD_TEXT_BREAK: &str = "<br>";

/// Backend endpoint paths.
pub mod endpoint {
    /// Multi-card recognition, returns an HTML fragment
    pub const MATCH_ALL: &str = "/match_all";
    /// Single-card recognition, returns card match JSON
    pub const MATCH_ONE: &str = "/match_one";
    /// Average price lookup by Japanese card name
    pub const GET_PRICE: &str = "/get_price";
    /// Recognition of one server-side crop by index
    pub const MATCH_CHOICE: &str = "/match_choice";
    /// Raw image upload for the choice flow, status only
    pub const UPLOAD_CHOICE: &str = "/upload_choice_image";
}

/// Navigation routes.
pub mod route {
    pub const ONE: &str = "/one";
    pub const ALL: &str = "/all";
    pub const CHOICE: &str = "/choice";
}

/// Timing of the decorative progress bar.
pub mod progress {
    /// Interval between bar increments
    pub const TICK_MS: u32 = 100;
    /// Percent added per tick
    pub const STEP_PERCENT: u8 = 10;
    /// Pause at 100% before fading
    pub const HOLD_MS: u32 = 800;
    /// Duration of the fade-out transition
    pub const FADE_MS: u32 = 1000;
}

/// Scroll offset (px) past which the scroll-to-top button shows
pub const SCROLL_TOP_THRESHOLD: f64 = 20.0;

/// Element ids and class names the page markup provides.
pub mod dom {
    pub const CARD_RESULT: &str = "cardResult";
    pub const CARD_SUMMARY: &str = "cardSummary";
    pub const CARD_PRICE: &str = "cardPrice";
    pub const CARD_LIST: &str = ".card-list";
    pub const CARD_ITEM_CLASS: &str = "card-item";
    pub const CARD_ITEM: &str = ".card-item";
    pub const CARD_TEXT: &str = ".card-text";
    pub const FILTER_BUTTONS: &str = ".filter-bar button";
    pub const SCROLL_TOP_BUTTON: &str = "myBtn";
    pub const MODE_BUTTONS: &str = ".mode-button";
    pub const MODE_CONTAINERS: &str = ".mode-container";
    pub const MODAL_TITLE: &str = ".modal-title";
    pub const MODAL_MESSAGE: &str = ".modal-message";

    pub const ACTIVE_CLASS: &str = "active";
    pub const SINGLE_COLUMN_CLASS: &str = "single-column";
    pub const HIDDEN_CLASS: &str = "hidden";
    pub const DRAGOVER_CLASS: &str = "dragover";
    pub const FADE_IN_CLASS: &str = "fade-in";
}
