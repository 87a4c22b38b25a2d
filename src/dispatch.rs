//! Hand-off from a confirmed upload widget to the mode's destination page.

use crate::backend::{Backend, LookupApi};
use crate::error::LookupError;
use crate::locale::Locale;
use crate::model::{DataUrl, ImageUpload, SelectedFile, UploadMode};
use crate::state::{SessionStore, StoredImage};

/// Page-level browser actions the hand-off needs.
pub trait Browser {
    /// Full page navigation to a same-origin route.
    fn navigate(&self, route: &str) -> Result<(), LookupError>;
    /// Blocking message box.
    fn alert(&self, message: &str);
}

/// Everything a confirmed widget needs to leave the landing page.
pub struct Handoff<'a, S: SessionStore + ?Sized, B: Backend, W: Browser + ?Sized> {
    pub slot: StoredImage<'a, S>,
    pub api: LookupApi<'a, B>,
    pub browser: &'a W,
    pub locale: Locale,
}

impl<S: SessionStore + ?Sized, B: Backend, W: Browser + ?Sized> Handoff<'_, S, B, W> {
    /// Store the image and navigate, uploading first for the choice flow.
    ///
    /// On failure nothing is rolled back: the stored image stays, which is
    /// harmless because the destination page is never reached.
    pub async fn hand_off(
        &self,
        mode: UploadMode,
        file: &SelectedFile,
        data_url: &str,
    ) -> Result<&'static str, LookupError> {
        self.slot.put(data_url)?;

        if mode.uploads_before_navigation() {
            let bytes = DataUrl::parse(data_url)?.bytes;
            self.api
                .upload_choice(&ImageUpload::from_original(file, bytes))
                .await?;
        }

        let route = mode.route();
        log::info!("➡️ Navigating to {}", route);
        self.browser.navigate(route)?;
        Ok(route)
    }

    /// Run the hand-off, alerting the user on failure. Returns whether it navigated.
    pub async fn run(&self, mode: UploadMode, file: &SelectedFile, data_url: &str) -> bool {
        match self.hand_off(mode, file, data_url).await {
            Ok(_) => true,
            Err(e) => {
                log::error!("❌ {} hand-off failed: {}", mode, e);
                self.browser.alert(&e.user_message(self.locale));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::backend::HttpReply;
    use crate::backend::testing::{FakeBackend, Sent};
    use crate::config::Endpoints;
    use crate::state::MemoryStore;

    const DATA_URL: &str = "data:image/jpeg;base64,/9j/";

    #[derive(Default)]
    struct FakeBrowser {
        navigations: RefCell<Vec<String>>,
        alerts: RefCell<Vec<String>>,
    }

    impl Browser for FakeBrowser {
        fn navigate(&self, route: &str) -> Result<(), LookupError> {
            self.navigations.borrow_mut().push(route.to_string());
            Ok(())
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    fn run(
        mode: UploadMode,
        store: &MemoryStore,
        backend: &FakeBackend,
        browser: &FakeBrowser,
    ) -> bool {
        let endpoints = Endpoints::default();
        let handoff = Handoff {
            slot: StoredImage::new(store, "uploadedImage"),
            api: LookupApi::new(backend, &endpoints),
            browser,
            locale: Locale::En,
        };
        let file = SelectedFile::new("deck.jpg", "image/jpeg");
        pollster::block_on(handoff.run(mode, &file, DATA_URL))
    }

    #[test]
    fn test_one_and_all_navigate_without_upload() {
        for (mode, route) in [(UploadMode::One, "/one"), (UploadMode::All, "/all")] {
            let store = MemoryStore::new();
            let backend = FakeBackend::default();
            let browser = FakeBrowser::default();

            assert!(run(mode, &store, &backend, &browser));
            assert_eq!(*browser.navigations.borrow(), vec![route.to_string()]);
            assert_eq!(backend.sent_count(), 0);
            assert_eq!(
                store.get("uploadedImage").unwrap().as_deref(),
                Some(DATA_URL)
            );
        }
    }

    #[test]
    fn test_choice_uploads_original_file_then_navigates() {
        let store = MemoryStore::new();
        let backend = FakeBackend::with_replies(vec![Ok(HttpReply::new(200, ""))]);
        let browser = FakeBrowser::default();

        assert!(run(UploadMode::Choice, &store, &backend, &browser));
        assert_eq!(*browser.navigations.borrow(), vec!["/choice".to_string()]);

        let sent = backend.sent.borrow();
        let Sent::Multipart { endpoint, upload } = &sent[0] else {
            panic!("expected multipart upload");
        };
        assert_eq!(endpoint, "/upload_choice_image");
        assert_eq!(upload.filename, "deck.jpg");
        assert_eq!(upload.media_type, "image/jpeg");
        assert_eq!(upload.bytes, vec![0xff, 0xd8, 0xff]);
    }

    #[test]
    fn test_choice_upload_failure_stays_on_page() {
        let store = MemoryStore::new();
        let backend = FakeBackend::with_replies(vec![Ok(HttpReply::new(500, ""))]);
        let browser = FakeBrowser::default();

        assert!(!run(UploadMode::Choice, &store, &backend, &browser));
        assert!(browser.navigations.borrow().is_empty());
        assert_eq!(
            *browser.alerts.borrow(),
            vec![Locale::En.upload_failed_message().to_string()]
        );
        // Stored image is left in place
        assert!(store.get("uploadedImage").unwrap().is_some());
    }

    #[test]
    fn test_choice_network_error_stays_on_page() {
        let store = MemoryStore::new();
        let backend =
            FakeBackend::with_replies(vec![Err(LookupError::Network("offline".to_string()))]);
        let browser = FakeBrowser::default();

        assert!(!run(UploadMode::Choice, &store, &backend, &browser));
        assert!(browser.navigations.borrow().is_empty());
        assert_eq!(browser.alerts.borrow().len(), 1);
    }
}
