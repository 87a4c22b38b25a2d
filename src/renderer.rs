//! Result pages: turn the pending image into rendered markup.

use crate::backend::{Backend, CardMatch, LookupApi};
use crate::error::LookupError;
use crate::locale::Locale;
use crate::model::{DataUrl, ImageUpload};
use crate::state::{SessionStore, StoredImage};

/// What a result page should show after its lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// No pending image; the page stays as served
    Inert,
    /// Markup for the result container
    Rendered {
        html: String,
        /// Card name for the follow-up price lookup
        price_key: Option<String>,
    },
    /// Message for the result container
    Failed { message: String },
}

/// Where a result page writes its markup.
pub trait ResultView {
    /// Replace the result container's content. `false` when the page has none.
    fn show_result(&self, html: &str) -> bool;
}

/// Runs the lookups of the result pages against one pending image slot.
pub struct ResultRenderer<'a, S: SessionStore + ?Sized, B: Backend> {
    pub slot: StoredImage<'a, S>,
    pub api: LookupApi<'a, B>,
    pub locale: Locale,
}

impl<S: SessionStore + ?Sized, B: Backend> ResultRenderer<'_, S, B> {
    /// All-results page: submit the pending image to `/match_all`.
    ///
    /// Only a 2xx reply counts as success. The pending image is cleared once
    /// the markup has been written into `view`.
    pub async fn render_all<V: ResultView + ?Sized>(&self, view: &V) -> RenderOutcome {
        let upload = match self.pending_upload() {
            Ok(Some(upload)) => upload,
            Ok(None) => return RenderOutcome::Inert,
            Err(e) => return self.failed(view, e),
        };

        match self.api.match_all(&upload).await {
            Ok(html) => self.show(view, html, None, true),
            Err(e) => self.failed(view, e),
        }
    }

    /// Single-result page: submit the pending image to `/match_one`.
    pub async fn render_one<V: ResultView + ?Sized>(&self, view: &V) -> RenderOutcome {
        let upload = match self.pending_upload() {
            Ok(Some(upload)) => upload,
            Ok(None) => return RenderOutcome::Inert,
            Err(e) => return self.failed(view, e),
        };

        match self.api.match_one(&upload).await {
            Ok(found) => self.show_match(view, found, true),
            Err(e) => self.failed(view, e),
        }
    }

    /// Choice page: recognize the crop the user picked.
    pub async fn render_choice<V: ResultView + ?Sized>(&self, view: &V, index: u32) -> RenderOutcome {
        match self.api.match_choice(index).await {
            Ok(found) => self.show_match(view, found, false),
            Err(e) => self.failed(view, e),
        }
    }

    /// The choice page gets its image from the earlier upload, so any pending
    /// copy is discarded on arrival.
    pub fn discard_pending(&self) {
        self.consume();
    }

    /// Price markup for a recognized card. Failures only get logged.
    pub async fn price_html(&self, price_key: &str) -> Option<String> {
        match self.api.price_html(price_key).await {
            Ok(html) => Some(html),
            Err(e) => {
                log::warn!("⚠️ Price lookup for {:?} failed: {}", price_key, e);
                None
            }
        }
    }

    fn pending_upload(&self) -> Result<Option<ImageUpload>, LookupError> {
        let Some(data_url) = self.slot.peek()? else {
            log::info!("⚠️ No pending image to recognize");
            return Ok(None);
        };
        let data_url = DataUrl::parse(&data_url)?;
        Ok(Some(ImageUpload::from_stored(data_url)))
    }

    fn consume(&self) {
        if let Err(e) = self.slot.clear() {
            log::warn!("⚠️ Could not clear pending image: {}", e);
        }
    }

    fn show_match<V: ResultView + ?Sized>(
        &self,
        view: &V,
        found: CardMatch,
        consumes: bool,
    ) -> RenderOutcome {
        let price_key = found.price_key().map(str::to_string);
        self.show(view, found.html(), price_key, consumes)
    }

    fn show<V: ResultView + ?Sized>(
        &self,
        view: &V,
        html: String,
        price_key: Option<String>,
        consumes: bool,
    ) -> RenderOutcome {
        if !view.show_result(&html) {
            log::warn!("⚠️ No result container on this page, keeping pending image");
        } else if consumes {
            self.consume();
        }
        RenderOutcome::Rendered { html, price_key }
    }

    fn failed<V: ResultView + ?Sized>(&self, view: &V, error: LookupError) -> RenderOutcome {
        log::error!("❌ Lookup failed: {}", error);
        let message = match error {
            LookupError::Backend(message) => message,
            _ => self.locale.render_failed_message().to_string(),
        };
        view.show_result(&message);
        RenderOutcome::Failed { message }
    }
}
