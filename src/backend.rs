//! Backend requests and the interpretation of their replies.
//!
//! [`Backend`] is the transport seam: `gloo-net` in the browser, fakes in tests.
//! [`LookupApi`] knows the endpoints and what each reply means.

use std::future::Future;

use serde::Deserialize;
use web_time::Instant;

use crate::config::Endpoints;
use crate::error::LookupError;
use crate::model::ImageUpload;

/// Status and body of a finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP transport used by the lookup flows.
///
/// Network failures are `Err`; any status the server answered with is `Ok`.
pub trait Backend {
    /// POST a multipart form holding one image part.
    fn post_multipart(
        &self,
        endpoint: &str,
        upload: &ImageUpload,
    ) -> impl Future<Output = Result<HttpReply, LookupError>>;

    /// POST a JSON body.
    fn post_json(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<HttpReply, LookupError>>;
}

/// Single-card recognition reply of `/match_one` and `/match_choice`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CardMatch {
    #[serde(default)]
    pub images_html: String,
    #[serde(default)]
    pub text_html: String,
    /// Japanese card name, used for the price lookup
    #[serde(default)]
    pub card_name_jp: Option<String>,
    /// Set instead of the fields above when recognition failed
    #[serde(default)]
    pub error: Option<String>,
}

impl CardMatch {
    /// Markup to inject: images first, then the description.
    pub fn html(&self) -> String {
        format!("{}{}", self.images_html, self.text_html)
    }

    /// Name to look up the price for, if the card was identified.
    pub fn price_key(&self) -> Option<&str> {
        self.card_name_jp
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct PriceReply {
    #[serde(default)]
    price_html: String,
}

/// Endpoint-aware client over a [`Backend`].
pub struct LookupApi<'a, B: Backend> {
    backend: &'a B,
    endpoints: &'a Endpoints,
}

impl<'a, B: Backend> LookupApi<'a, B> {
    pub fn new(backend: &'a B, endpoints: &'a Endpoints) -> Self {
        Self { backend, endpoints }
    }

    /// Recognize every card in the image; returns the result fragment.
    pub async fn match_all(&self, upload: &ImageUpload) -> Result<String, LookupError> {
        let endpoint = &self.endpoints.match_all;
        let reply = self.timed(endpoint, self.backend.post_multipart(endpoint, upload)).await?;
        let reply = require_success(endpoint, reply)?;
        Ok(reply.body)
    }

    /// Recognize the single most prominent card.
    pub async fn match_one(&self, upload: &ImageUpload) -> Result<CardMatch, LookupError> {
        let endpoint = &self.endpoints.match_one;
        let reply = self.timed(endpoint, self.backend.post_multipart(endpoint, upload)).await?;
        card_match(endpoint, reply)
    }

    /// Recognize one of the crops the server cut from the uploaded image.
    pub async fn match_choice(&self, index: u32) -> Result<CardMatch, LookupError> {
        let endpoint = &self.endpoints.match_choice;
        let body = serde_json::json!({ "index": index });
        let reply = self.timed(endpoint, self.backend.post_json(endpoint, &body)).await?;
        card_match(endpoint, reply)
    }

    /// Fetch the average price markup for a card.
    pub async fn price_html(&self, card_name_jp: &str) -> Result<String, LookupError> {
        let endpoint = &self.endpoints.get_price;
        let body = serde_json::json!({ "card_name_jp": card_name_jp });
        let reply = self.timed(endpoint, self.backend.post_json(endpoint, &body)).await?;
        let reply = require_success(endpoint, reply)?;
        let price: PriceReply =
            serde_json::from_str(&reply.body).map_err(|e| LookupError::Decode(e.to_string()))?;
        Ok(price.price_html)
    }

    /// Hand the original file to the choice flow. Only the status matters.
    pub async fn upload_choice(&self, upload: &ImageUpload) -> Result<(), LookupError> {
        let endpoint = &self.endpoints.upload_choice;
        let reply = self.timed(endpoint, self.backend.post_multipart(endpoint, upload)).await?;
        require_success(endpoint, reply)?;
        Ok(())
    }

    async fn timed<F>(&self, endpoint: &str, request: F) -> Result<HttpReply, LookupError>
    where
        F: Future<Output = Result<HttpReply, LookupError>>,
    {
        log::info!("📤 POST {}", endpoint);
        let started = Instant::now();
        let result = request.await;
        match &result {
            Ok(reply) => log::debug!(
                "📥 {} answered {} in {:?} ({} bytes)",
                endpoint,
                reply.status,
                started.elapsed(),
                reply.body.len()
            ),
            Err(e) => log::error!("❌ {} failed after {:?}: {}", endpoint, started.elapsed(), e),
        }
        result
    }
}

fn require_success(endpoint: &str, reply: HttpReply) -> Result<HttpReply, LookupError> {
    if reply.is_success() {
        Ok(reply)
    } else {
        Err(LookupError::Http {
            endpoint: endpoint.to_string(),
            status: reply.status,
        })
    }
}

/// Error replies still carry a JSON `error` field, so the body is parsed first.
fn card_match(endpoint: &str, reply: HttpReply) -> Result<CardMatch, LookupError> {
    match serde_json::from_str::<CardMatch>(&reply.body) {
        Ok(CardMatch {
            error: Some(error), ..
        }) => Err(LookupError::Backend(error)),
        Ok(found) if reply.is_success() => Ok(found),
        Ok(_) => Err(LookupError::Http {
            endpoint: endpoint.to_string(),
            status: reply.status,
        }),
        Err(e) if reply.is_success() => Err(LookupError::Decode(e.to_string())),
        Err(_) => Err(LookupError::Http {
            endpoint: endpoint.to_string(),
            status: reply.status,
        }),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    /// A request the fake backend received.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Sent {
        Multipart {
            endpoint: String,
            upload: ImageUpload,
        },
        Json {
            endpoint: String,
            body: serde_json::Value,
        },
    }

    /// Backend answering from a queue of canned replies.
    #[derive(Default)]
    pub struct FakeBackend {
        pub replies: RefCell<VecDeque<Result<HttpReply, LookupError>>>,
        pub sent: RefCell<Vec<Sent>>,
    }

    impl FakeBackend {
        pub fn with_replies(replies: Vec<Result<HttpReply, LookupError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                sent: RefCell::new(Vec::new()),
            }
        }

        pub fn sent_count(&self) -> usize {
            self.sent.borrow().len()
        }

        fn next_reply(&self) -> Result<HttpReply, LookupError> {
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(LookupError::Network("no canned reply".to_string())))
        }
    }

    impl Backend for FakeBackend {
        fn post_multipart(
            &self,
            endpoint: &str,
            upload: &ImageUpload,
        ) -> impl Future<Output = Result<HttpReply, LookupError>> {
            self.sent.borrow_mut().push(Sent::Multipart {
                endpoint: endpoint.to_string(),
                upload: upload.clone(),
            });
            std::future::ready(self.next_reply())
        }

        fn post_json(
            &self,
            endpoint: &str,
            body: &serde_json::Value,
        ) -> impl Future<Output = Result<HttpReply, LookupError>> {
            self.sent.borrow_mut().push(Sent::Json {
                endpoint: endpoint.to_string(),
                body: body.clone(),
            });
            std::future::ready(self.next_reply())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{FakeBackend, Sent};
    use super::*;
    use crate::model::DataUrl;

    fn upload() -> ImageUpload {
        ImageUpload::from_stored(DataUrl::new("image/png", vec![1, 2, 3]))
    }

    #[test]
    fn test_match_all_returns_fragment() {
        let backend = FakeBackend::with_replies(vec![Ok(HttpReply::new(200, "<div>ok</div>"))]);
        let endpoints = Endpoints::default();
        let api = LookupApi::new(&backend, &endpoints);

        let html = pollster::block_on(api.match_all(&upload())).unwrap();
        assert_eq!(html, "<div>ok</div>");
        assert_eq!(
            backend.sent.borrow()[0],
            Sent::Multipart {
                endpoint: "/match_all".to_string(),
                upload: upload(),
            }
        );
    }

    #[test]
    fn test_match_all_error_status() {
        let backend = FakeBackend::with_replies(vec![Ok(HttpReply::new(500, "<p>boom</p>"))]);
        let endpoints = Endpoints::default();
        let api = LookupApi::new(&backend, &endpoints);

        let err = pollster::block_on(api.match_all(&upload())).unwrap_err();
        assert_eq!(
            err,
            LookupError::Http {
                endpoint: "/match_all".to_string(),
                status: 500
            }
        );
    }

    #[test]
    fn test_match_one_parses_json() {
        let body = r#"{"images_html": "<img>", "text_html": "Type: Spell Card", "card_name_jp": "強欲な壺"}"#;
        let backend = FakeBackend::with_replies(vec![Ok(HttpReply::new(200, body))]);
        let endpoints = Endpoints::default();
        let api = LookupApi::new(&backend, &endpoints);

        let found = pollster::block_on(api.match_one(&upload())).unwrap();
        assert_eq!(found.html(), "<img>Type: Spell Card");
        assert_eq!(found.price_key(), Some("強欲な壺"));
    }

    #[test]
    fn test_match_one_error_field() {
        let body = r#"{"error": "❌ 請正確上傳一張圖檔"}"#;
        let backend = FakeBackend::with_replies(vec![Ok(HttpReply::new(400, body))]);
        let endpoints = Endpoints::default();
        let api = LookupApi::new(&backend, &endpoints);

        let err = pollster::block_on(api.match_one(&upload())).unwrap_err();
        assert_eq!(err, LookupError::Backend("❌ 請正確上傳一張圖檔".to_string()));
    }

    #[test]
    fn test_match_one_non_json_error() {
        let backend = FakeBackend::with_replies(vec![Ok(HttpReply::new(502, "Bad Gateway"))]);
        let endpoints = Endpoints::default();
        let api = LookupApi::new(&backend, &endpoints);

        let err = pollster::block_on(api.match_one(&upload())).unwrap_err();
        assert!(matches!(err, LookupError::Http { status: 502, .. }));
    }

    #[test]
    fn test_match_choice_sends_index() {
        let backend = FakeBackend::with_replies(vec![Ok(HttpReply::new(
            200,
            r#"{"images_html": "", "text_html": "text"}"#,
        ))]);
        let endpoints = Endpoints::default();
        let api = LookupApi::new(&backend, &endpoints);

        let found = pollster::block_on(api.match_choice(3)).unwrap();
        assert_eq!(found.html(), "text");
        assert_eq!(found.price_key(), None);
        assert_eq!(
            backend.sent.borrow()[0],
            Sent::Json {
                endpoint: "/match_choice".to_string(),
                body: serde_json::json!({ "index": 3 }),
            }
        );
    }

    #[test]
    fn test_price_html() {
        let backend = FakeBackend::with_replies(vec![Ok(HttpReply::new(
            200,
            r#"{"price_html": "<b>120</b>"}"#,
        ))]);
        let endpoints = Endpoints::default();
        let api = LookupApi::new(&backend, &endpoints);

        let html = pollster::block_on(api.price_html("name")).unwrap();
        assert_eq!(html, "<b>120</b>");
    }

    #[test]
    fn test_upload_choice_status_only() {
        let backend = FakeBackend::with_replies(vec![
            Ok(HttpReply::new(200, "<html>ignored</html>")),
            Ok(HttpReply::new(400, "")),
        ]);
        let endpoints = Endpoints::default();
        let api = LookupApi::new(&backend, &endpoints);

        assert!(pollster::block_on(api.upload_choice(&upload())).is_ok());
        assert!(pollster::block_on(api.upload_choice(&upload())).is_err());
    }

    #[test]
    fn test_network_error_passes_through() {
        let backend = FakeBackend::with_replies(vec![Err(LookupError::Network(
            "connection refused".to_string(),
        ))]);
        let endpoints = Endpoints::default();
        let api = LookupApi::new(&backend, &endpoints);

        let err = pollster::block_on(api.match_all(&upload())).unwrap_err();
        assert_eq!(err, LookupError::Network("connection refused".to_string()));
    }
}
