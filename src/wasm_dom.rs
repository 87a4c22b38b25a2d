//! DOM access helpers and the browser implementations of the core traits.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Storage, Window};

use crate::constants::dom;
use crate::dispatch::Browser;
use crate::error::LookupError;
use crate::model::CategoryFilter;
use crate::state::{CardItem, CardList, SessionStore};

/// Convert a thrown JS value into a crate error.
pub fn js_error(context: &str, value: JsValue) -> LookupError {
    LookupError::Dom(format!("{}: {:?}", context, value))
}

pub fn window() -> Result<Window, LookupError> {
    web_sys::window().ok_or_else(|| LookupError::Dom("no window".to_string()))
}

pub fn document() -> Result<Document, LookupError> {
    window()?
        .document()
        .ok_or_else(|| LookupError::Dom("no document".to_string()))
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn html_by_id(id: &str) -> Option<HtmlElement> {
    by_id(id)?.dyn_into::<HtmlElement>().ok()
}

/// All elements in the document matching `selector`.
pub fn query_document(selector: &str) -> Result<Vec<Element>, LookupError> {
    let nodes = document()?
        .query_selector_all(selector)
        .map_err(|e| js_error(selector, e))?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn query_one(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        if let Err(e) = html.style().set_property(property, value) {
            log::warn!("⚠️ Could not set {}: {:?}", property, e);
        }
    }
}

pub fn is_displayed(element: &Element) -> bool {
    element
        .dyn_ref::<HtmlElement>()
        .and_then(|html| html.style().get_property_value("display").ok())
        .map(|display| display != "none")
        .unwrap_or(true)
}

pub fn set_class(element: &Element, class: &str, enabled: bool) {
    let classes = element.class_list();
    let result = if enabled {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    if let Err(e) = result {
        log::warn!("⚠️ Could not toggle class {}: {:?}", class, e);
    }
}

/// Classes on `<body>`, used for page detection.
pub fn body_classes() -> Vec<String> {
    let Some(body) = document().ok().and_then(|d| d.body()) else {
        return Vec::new();
    };
    body.class_name()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Write markup into an element if the page has it.
pub fn set_inner_html(id: &str, html: &str) -> bool {
    match by_id(id) {
        Some(element) => {
            element.set_inner_html(html);
            true
        }
        None => false,
    }
}

/// `window.sessionStorage`.
pub struct WebSessionStore;

impl WebSessionStore {
    fn storage(&self) -> Result<Storage, LookupError> {
        window()?
            .session_storage()
            .map_err(|e| LookupError::Storage(format!("sessionStorage access error: {:?}", e)))?
            .ok_or_else(|| LookupError::Storage("sessionStorage not available".to_string()))
    }
}

impl SessionStore for WebSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, LookupError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| LookupError::Storage(format!("read failed: {:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LookupError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| LookupError::Storage(format!("write failed: {:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), LookupError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| LookupError::Storage(format!("remove failed: {:?}", e)))
    }
}

/// `window.location` and `window.alert`.
pub struct WebBrowser;

impl Browser for WebBrowser {
    fn navigate(&self, route: &str) -> Result<(), LookupError> {
        window()?
            .location()
            .set_href(route)
            .map_err(|e| js_error("navigation", e))
    }

    fn alert(&self, message: &str) {
        if let Ok(window) = window() {
            if let Err(e) = window.alert_with_message(message) {
                log::warn!("⚠️ alert failed: {:?}", e);
            }
        }
    }
}

fn card_text(item: &Element) -> String {
    query_one(item, dom::CARD_TEXT)
        .map(|text| text.inner_html())
        .unwrap_or_default()
}

/// Apply a filter bar click to every rendered card.
pub fn filter_cards(button: &Element, label: &str) -> Result<(), LookupError> {
    let buttons = query_document(dom::FILTER_BUTTONS)?;
    let index = buttons
        .iter()
        .position(|b| js_sys::Object::is(b.as_ref(), button.as_ref()));

    let items = query_document(dom::CARD_ITEM)?;
    let mut list = CardList::from_texts(items.iter().map(card_text));
    list.filter_by_category(index, CategoryFilter::from_label(label));

    for b in &buttons {
        set_class(b, dom::ACTIVE_CLASS, false);
    }
    set_class(button, dom::ACTIVE_CLASS, true);

    for (element, item) in items.iter().zip(&list.items) {
        set_style(element, "display", if item.visible { "flex" } else { "none" });
    }

    if let Some(summary) = by_id(dom::CARD_SUMMARY) {
        set_style(
            &summary,
            "display",
            if list.summary_visible { "block" } else { "none" },
        );
    }

    adjust_layout()
}

/// Toggle the single-column class from the cards currently displayed.
pub fn adjust_layout() -> Result<(), LookupError> {
    let Some(container) = document()?
        .query_selector(dom::CARD_LIST)
        .map_err(|e| js_error(dom::CARD_LIST, e))?
    else {
        return Ok(());
    };

    let children = container.children();
    let items: Vec<CardItem> = (0..children.length())
        .filter_map(|i| children.item(i))
        .filter(|child| child.class_list().contains(dom::CARD_ITEM_CLASS))
        .map(|child| {
            let mut item = CardItem::from_text(&card_text(&child));
            item.visible = is_displayed(&child);
            item
        })
        .collect();

    let list = CardList::from_items(items);
    set_class(&container, dom::SINGLE_COLUMN_CLASS, list.single_column);
    Ok(())
}
