//! `gloo-net` transport for the browser build.

use std::future::Future;

use gloo_net::http::{Request, Response};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use crate::backend::{Backend, HttpReply};
use crate::error::LookupError;
use crate::model::ImageUpload;
use crate::wasm_dom::js_error;

/// Same-origin fetch through `gloo-net`.
pub struct GlooBackend;

fn network_error(e: gloo_net::Error) -> LookupError {
    LookupError::Network(e.to_string())
}

/// Build a `FormData` holding the upload as a named blob part.
fn form_data(upload: &ImageUpload) -> Result<FormData, LookupError> {
    let bytes = js_sys::Uint8Array::from(upload.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);

    let options = BlobPropertyBag::new();
    options.set_type(&upload.media_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| js_error("blob", e))?;

    let form = FormData::new().map_err(|e| js_error("form data", e))?;
    form.append_with_blob_and_filename(upload.field, &blob, &upload.filename)
        .map_err(|e| js_error("form append", e))?;
    Ok(form)
}

async fn into_reply(response: Response) -> Result<HttpReply, LookupError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| LookupError::Decode(e.to_string()))?;
    Ok(HttpReply::new(status, body))
}

impl Backend for GlooBackend {
    fn post_multipart(
        &self,
        endpoint: &str,
        upload: &ImageUpload,
    ) -> impl Future<Output = Result<HttpReply, LookupError>> {
        let endpoint = endpoint.to_string();
        let form = form_data(upload);
        async move {
            let form = JsValue::from(form?);
            let response = Request::post(&endpoint)
                .body(form)
                .map_err(network_error)?
                .send()
                .await
                .map_err(network_error)?;
            into_reply(response).await
        }
    }

    fn post_json(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<HttpReply, LookupError>> {
        let endpoint = endpoint.to_string();
        let request = Request::post(&endpoint).json(body).map_err(network_error);
        async move {
            let response = request?.send().await.map_err(network_error)?;
            into_reply(response).await
        }
    }
}
