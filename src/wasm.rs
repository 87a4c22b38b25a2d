//! Browser entry point and the functions page markup calls.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::backend::LookupApi;
use crate::chrome::scroll_button_visible;
use crate::config::ClientConfig;
use crate::constants::dom;
use crate::error::LookupError;
use crate::message::Intent;
use crate::model::UploadMode;
use crate::page::{Initializers, PageKind};
use crate::renderer::{RenderOutcome, ResultRenderer, ResultView};
use crate::state::{ModeView, StoredImage, UploadWorkflow};
use crate::wasm_dom::{
    self, WebSessionStore, body_classes, by_id, document, query_document, set_class, set_inner_html,
    set_style, window,
};
use crate::wasm_file::{dispatch_intent, setup_upload_area};
use crate::wasm_http::GlooBackend;

thread_local! {
    static CONFIG: RefCell<ClientConfig> = RefCell::new(ClientConfig::default());
    static WORKFLOW: RefCell<Option<UploadWorkflow>> = const { RefCell::new(None) };
}

/// Snapshot of the page's configuration.
pub(crate) fn config() -> ClientConfig {
    CONFIG.with(|config| config.borrow().clone())
}

/// Run `f` on the landing page workflow. `None` off the landing page.
///
/// The borrow ends before the caller applies any effects.
pub(crate) fn with_workflow<R>(f: impl FnOnce(&mut UploadWorkflow) -> R) -> Option<R> {
    WORKFLOW.with(|workflow| workflow.borrow_mut().as_mut().map(f))
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = ClientConfig::load();
    if let Err(e) = console_log::init_with_level(config.log_level.to_level()) {
        web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
    }
    log::info!("🃏 cardlens starting (log level {})", config.log_level.name());
    CONFIG.with(|slot| *slot.borrow_mut() = config.clone());

    let initializers = Initializers::new()
        .register("scroll-to-top", init_scroll_button)
        .register("landing", init_landing)
        .register("results", init_results);
    let done = initializers.run(&config);
    log::debug!("🚀 {}/{} initializers ran", done, initializers.len());
}

fn current_page() -> PageKind {
    let classes = body_classes();
    let has_blocks = by_id(&UploadMode::One.element_id("block")).is_some();
    PageKind::detect(classes.iter().map(String::as_str), has_blocks)
}

fn init_scroll_button(config: &ClientConfig) -> Result<(), LookupError> {
    let threshold = config.scroll_threshold;
    let onscroll = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        let Some(button) = by_id(dom::SCROLL_TOP_BUTTON) else {
            return;
        };
        let Ok(document) = document() else {
            return;
        };
        let body_top = document.body().map(|b| b.scroll_top()).unwrap_or(0);
        let doc_top = document
            .document_element()
            .map(|e| e.scroll_top())
            .unwrap_or(0);
        let visible = scroll_button_visible(f64::from(body_top), f64::from(doc_top), threshold);
        set_style(&button, "display", if visible { "block" } else { "none" });
    }) as Box<dyn FnMut(web_sys::Event)>);

    window()?.set_onscroll(Some(onscroll.as_ref().unchecked_ref()));
    onscroll.forget();
    Ok(())
}

/// Mode named by a switcher button, read from `data-mode`.
fn button_mode(button: &Element) -> Option<UploadMode> {
    button
        .get_attribute("data-mode")
        .and_then(|name| UploadMode::from_name(&name))
}

fn init_landing(config: &ClientConfig) -> Result<(), LookupError> {
    if current_page() != PageKind::Landing {
        return Ok(());
    }

    let initial = query_document(dom::MODE_BUTTONS)?
        .iter()
        .filter_map(|button| button_mode(button).map(|mode| (button, mode)))
        .find(|(button, mode)| button.class_list().contains(&mode.active_class()))
        .map(|(_, mode)| mode);

    let workflow = UploadWorkflow::new(config, initial);
    let view = workflow.view();
    WORKFLOW.with(|slot| *slot.borrow_mut() = Some(workflow));
    apply_mode_view(&view)?;

    for mode in UploadMode::all() {
        setup_upload_area(*mode, config.locale)?;
    }
    log::info!("📤 Landing page ready, showing {}", view.active);
    Ok(())
}

fn apply_mode_view(view: &ModeView) -> Result<(), LookupError> {
    for (mode, visible) in &view.blocks {
        if let Some(block) = by_id(&mode.element_id("block")) {
            set_style(&block, "display", if *visible { "block" } else { "none" });
        }
    }
    for button in query_document(dom::MODE_BUTTONS)? {
        if let Some(mode) = button_mode(&button) {
            set_class(&button, &mode.active_class(), mode == view.active);
        }
    }
    Ok(())
}

fn init_results(config: &ClientConfig) -> Result<(), LookupError> {
    match current_page() {
        PageKind::AllResults => {
            let config = config.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let store = WebSessionStore;
                let backend = GlooBackend;
                let renderer = renderer(&store, &backend, &config);
                let outcome = renderer.render_all(&CardResultView).await;
                if matches!(outcome, RenderOutcome::Rendered { .. }) {
                    if let Err(e) = wasm_dom::adjust_layout() {
                        log::warn!("⚠️ Layout adjustment failed: {}", e);
                    }
                }
            });
        }
        PageKind::OneResult => {
            let config = config.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let store = WebSessionStore;
                let backend = GlooBackend;
                let renderer = renderer(&store, &backend, &config);
                if let Some(key) = price_key(renderer.render_one(&CardResultView).await) {
                    show_price(&renderer, &key).await;
                }
            });
        }
        PageKind::Choice => {
            let store = WebSessionStore;
            let backend = GlooBackend;
            renderer(&store, &backend, config).discard_pending();
        }
        PageKind::Landing | PageKind::Other => {}
    }
    Ok(())
}

fn renderer<'a>(
    store: &'a WebSessionStore,
    backend: &'a GlooBackend,
    config: &'a ClientConfig,
) -> ResultRenderer<'a, WebSessionStore, GlooBackend> {
    ResultRenderer {
        slot: StoredImage::new(store, &config.storage_key),
        api: LookupApi::new(backend, &config.endpoints),
        locale: config.locale,
    }
}

/// `#cardResult` of the current page.
struct CardResultView;

impl ResultView for CardResultView {
    fn show_result(&self, html: &str) -> bool {
        set_inner_html(dom::CARD_RESULT, html)
    }
}

fn price_key(outcome: RenderOutcome) -> Option<String> {
    match outcome {
        RenderOutcome::Rendered { price_key, .. } => price_key,
        RenderOutcome::Inert | RenderOutcome::Failed { .. } => None,
    }
}

async fn show_price(renderer: &ResultRenderer<'_, WebSessionStore, GlooBackend>, key: &str) {
    let Some(target) = by_id(dom::CARD_PRICE) else {
        return;
    };
    if let Some(html) = renderer.price_html(key).await {
        let current = target.inner_html();
        target.set_inner_html(&format!("{}{}", current, html));
    }
}

fn report(context: &str, result: Result<(), LookupError>) {
    if let Err(e) = result {
        log::error!("❌ {} failed: {}", context, e);
    }
}

/// Filter bar click: `filterCards(this, label)`.
#[wasm_bindgen(js_name = filterCards)]
pub fn filter_cards(button: Element, label: &str) {
    report("filterCards", wasm_dom::filter_cards(&button, label));
}

/// Mode switcher click: `switchMode('all')`.
#[wasm_bindgen(js_name = switchMode)]
pub fn switch_mode(mode: &str) {
    let Some(mode) = UploadMode::from_name(mode) else {
        log::warn!("⚠️ Unknown mode {:?}", mode);
        return;
    };
    if let Some(view) = with_workflow(|workflow| workflow.switch_mode(mode)) {
        report("switchMode", apply_mode_view(&view));
    }
}

fn with_mode(name: &str, intent: Intent) {
    match UploadMode::from_name(name) {
        Some(mode) => dispatch_intent(mode, intent),
        None => log::warn!("⚠️ Unknown mode {:?}", name),
    }
}

/// Search button: validates the pick and opens the mode's modal.
#[wasm_bindgen(js_name = openModal)]
pub fn open_modal(mode: &str) {
    with_mode(mode, Intent::RequestConfirm);
}

#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal(mode: &str) {
    with_mode(mode, Intent::Cancel);
}

/// Modal accept button.
#[wasm_bindgen(js_name = confirmAction)]
pub fn confirm_action(mode: &str) {
    with_mode(mode, Intent::Confirm);
}

/// Scroll-to-top button.
#[wasm_bindgen(js_name = topFunction)]
pub fn top_function() {
    let Ok(document) = document() else {
        return;
    };
    if let Some(body) = document.body() {
        body.set_scroll_top(0);
    }
    if let Some(root) = document.document_element() {
        root.set_scroll_top(0);
    }
}

/// Choice page crop click: recognize crop `index`.
#[wasm_bindgen(js_name = selectCrop)]
pub fn select_crop(index: u32) {
    let config = config();
    wasm_bindgen_futures::spawn_local(async move {
        let store = WebSessionStore;
        let backend = GlooBackend;
        let renderer = renderer(&store, &backend, &config);
        if let Some(key) = price_key(renderer.render_choice(&CardResultView, index).await) {
            show_price(&renderer, &key).await;
        }
    });
}
