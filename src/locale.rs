//! User-facing copy for each supported site language.

use serde::{Deserialize, Serialize};

use crate::model::UploadMode;

/// Language of the page copy and of the rendered card descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    /// Traditional Chinese (the backend renders card text in this)
    #[default]
    #[serde(rename = "zh-TW")]
    ZhTw,
    /// English
    #[serde(rename = "en")]
    En,
}

impl Locale {
    /// Get all locales. Card text parsing tries each of them.
    pub fn all() -> &'static [Locale] {
        &[Locale::ZhTw, Locale::En]
    }

    /// Prefix of the description line that carries the card type.
    pub fn type_prefix(&self) -> &'static str {
        match self {
            Locale::ZhTw => "類型:",
            Locale::En => "Type:",
        }
    }

    /// Label of the filter control that shows every card.
    pub fn all_label(&self) -> &'static str {
        match self {
            Locale::ZhTw => "全部",
            Locale::En => "All",
        }
    }

    pub fn no_file_message(&self) -> &'static str {
        match self {
            Locale::ZhTw => "💥 請上傳一張圖檔",
            Locale::En => "💥 Please upload an image file",
        }
    }

    pub fn bad_extension_message(&self) -> &'static str {
        match self {
            Locale::ZhTw => "❌ 僅支援 jpg、jpeg、png、jfif、webp 格式的圖檔",
            Locale::En => "❌ Only jpg, jpeg, png, jfif and webp images are supported",
        }
    }

    pub fn upload_failed_message(&self) -> &'static str {
        match self {
            Locale::ZhTw => "❌ 圖片上傳失敗",
            Locale::En => "❌ Image upload failed",
        }
    }

    /// Shown inside the result container when recognition could not be reached.
    pub fn render_failed_message(&self) -> &'static str {
        match self {
            Locale::ZhTw => "❌ 發送資料失敗",
            Locale::En => "❌ Failed to send data",
        }
    }

    pub fn unexpected_error_message(&self) -> &'static str {
        match self {
            Locale::ZhTw => "⚠️ 發生未預期的錯誤",
            Locale::En => "⚠️ Something went wrong",
        }
    }

    pub fn select_button_label(&self) -> &'static str {
        match self {
            Locale::ZhTw => "選取檔案",
            Locale::En => "Choose file",
        }
    }

    pub fn drop_hint(&self) -> &'static str {
        match self {
            Locale::ZhTw => "或拖曳檔案到此",
            Locale::En => "or drop a file here",
        }
    }

    /// Caption under the upload area once a file is picked.
    pub fn selected_file_caption(&self, filename: &str) -> String {
        match self {
            Locale::ZhTw => format!("已選取：{}", filename),
            Locale::En => format!("Selected: {}", filename),
        }
    }

    /// Title of a mode's confirmation modal.
    pub fn modal_title(&self, mode: UploadMode) -> &'static str {
        match (self, mode) {
            (Locale::ZhTw, UploadMode::One) => "單張顯示 📌",
            (Locale::ZhTw, UploadMode::All) => "⚠️ 全部顯示",
            (Locale::ZhTw, UploadMode::Choice) => "自行選擇 👆",
            (Locale::En, UploadMode::One) => "Single card 📌",
            (Locale::En, UploadMode::All) => "⚠️ All cards",
            (Locale::En, UploadMode::Choice) => "Pick yourself 👆",
        }
    }

    /// Lines of a mode's confirmation message, rendered with `<br>` between them.
    pub fn modal_message_lines(&self, mode: UploadMode) -> &'static [&'static str] {
        match (self, mode) {
            (Locale::ZhTw, UploadMode::One) => &["只會顯示一張卡片", "是否確定以此方式做搜尋？"],
            (Locale::ZhTw, UploadMode::All) => &[
                "由於卡片過多",
                "顯示速度會較慢",
                "是否確定以此方式做搜尋？",
            ],
            (Locale::ZhTw, UploadMode::Choice) => &[
                "不會顯示全部資訊",
                "需自行選擇想要呈現的卡片",
                "是否確定以此方式做搜尋？",
            ],
            (Locale::En, UploadMode::One) => &[
                "Only one card will be shown",
                "Search this way?",
            ],
            (Locale::En, UploadMode::All) => &[
                "With many cards",
                "results will take longer",
                "Search this way?",
            ],
            (Locale::En, UploadMode::Choice) => &[
                "Not every detail is shown",
                "you pick the cards to display",
                "Search this way?",
            ],
        }
    }
}
