//! cardlens - browser client for an image-based card lookup site
//!
//! Captures an uploaded card photo, hands it to the backend in one of three
//! modes, and renders and filters the recognition result. The state core is
//! plain Rust; the `web-sys` glue is only compiled for `wasm32`.

pub mod backend;
pub mod chrome;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod locale;
pub mod message;
pub mod model;
pub mod page;
pub mod renderer;
pub mod state;

pub use config::ClientConfig;
pub use error::LookupError;

// WASM entry point and DOM glue
#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
mod wasm_dom;
#[cfg(target_arch = "wasm32")]
mod wasm_file;
#[cfg(target_arch = "wasm32")]
mod wasm_http;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
