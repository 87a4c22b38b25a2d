//! Upload widget wiring: file picker, drag-and-drop, preview and progress.
//!
//! Browser events become [`Intent`]s for the landing page's workflow; the
//! returned [`Effect`]s are applied here.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DragEvent, Event, File, FileReader, HtmlImageElement, HtmlInputElement, MouseEvent};

use crate::backend::LookupApi;
use crate::constants::dom;
use crate::dispatch::{Browser, Handoff};
use crate::error::LookupError;
use crate::locale::Locale;
use crate::message::{Effect, Intent};
use crate::model::{SelectedFile, UploadMode};
use crate::state::{ProgressFrame, ProgressStep, StoredImage};
use crate::wasm::{config, with_workflow};
use crate::wasm_dom::{
    self, WebBrowser, WebSessionStore, by_id, html_by_id, js_error, set_class, set_style,
};
use crate::wasm_http::GlooBackend;

/// Read a file into a `data:` URL.
pub async fn read_as_data_url(file: &File) -> Result<String, LookupError> {
    let reader = FileReader::new().map_err(|e| js_error("FileReader", e))?;

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let loaded = reader.clone();
        let onload = Closure::once_into_js(move |_event: Event| {
            let result = loaded.result().unwrap_or(JsValue::NULL);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let onerror = Closure::once_into_js(move |event: Event| {
            let _ = reject.call1(&JsValue::NULL, &event);
        });
        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    });

    reader
        .read_as_data_url(file)
        .map_err(|e| js_error("readAsDataURL", e))?;

    let result = JsFuture::from(promise)
        .await
        .map_err(|e| js_error("file read", e))?;
    result
        .as_string()
        .ok_or_else(|| LookupError::Dom("file read produced no string".to_string()))
}

fn file_input(mode: UploadMode) -> Option<HtmlInputElement> {
    by_id(&mode.element_id("fileInput"))?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

/// First file currently held by the mode's input.
fn current_file(mode: UploadMode) -> Option<File> {
    file_input(mode)?.files()?.get(0)
}

fn selected_file(file: &File) -> SelectedFile {
    SelectedFile::new(file.name(), file.type_())
}

/// Markup of one upload area; ids are suffixed with the mode.
fn upload_block_html(mode: UploadMode, locale: Locale) -> String {
    let m = mode.name();
    format!(
        r#"<input type="file" id="fileInput-{m}" style="display:none;">
<div class="file-name" id="fileNameDisplay-{m}"></div>
<img id="previewImage-{m}" class="preview-image" style="display:none;">
<div class="progress-bar-container-{m}">
    <div class="progress-bar-{m}" id="progressBar-{m}"></div>
</div>
<button id="selectButton-{m}" class="upload-button upload-button-{m}">{select}</button>
<p class="upload-hint">{hint}</p>"#,
        select = locale.select_button_label(),
        hint = locale.drop_hint(),
    )
}

/// Render and wire the upload area of `mode`.
pub fn setup_upload_area(mode: UploadMode, locale: Locale) -> Result<(), LookupError> {
    let area_id = mode.element_id("uploadArea");
    let area = html_by_id(&area_id)
        .ok_or_else(|| LookupError::Dom(format!("missing #{}", area_id)))?;
    area.set_inner_html(&upload_block_html(mode, locale));

    let input = file_input(mode)
        .ok_or_else(|| LookupError::Dom(format!("missing file input for {}", mode)))?;

    if let Some(button) = html_by_id(&mode.element_id("selectButton")) {
        let input = input.clone();
        let onclick = Closure::wrap(Box::new(move |event: MouseEvent| {
            event.stop_propagation();
            input.click();
        }) as Box<dyn FnMut(MouseEvent)>);
        button.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    {
        let input = input.clone();
        let onclick = Closure::wrap(Box::new(move |_event: MouseEvent| {
            input.click();
        }) as Box<dyn FnMut(MouseEvent)>);
        area.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    let onchange = Closure::wrap(Box::new(move |_event: Event| {
        let intent = match current_file(mode) {
            Some(file) => Intent::SelectFile(selected_file(&file)),
            None => Intent::ClearSelection,
        };
        dispatch_intent(mode, intent);
    }) as Box<dyn FnMut(Event)>);
    input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget();

    let ondragover = Closure::wrap(Box::new(move |event: DragEvent| {
        event.prevent_default();
        dispatch_intent(mode, Intent::DragOver);
    }) as Box<dyn FnMut(DragEvent)>);
    area.set_ondragover(Some(ondragover.as_ref().unchecked_ref()));
    ondragover.forget();

    let ondragleave = Closure::wrap(Box::new(move |event: DragEvent| {
        event.prevent_default();
        dispatch_intent(mode, Intent::DragLeave);
    }) as Box<dyn FnMut(DragEvent)>);
    area.set_ondragleave(Some(ondragleave.as_ref().unchecked_ref()));
    ondragleave.forget();

    let ondrop = Closure::wrap(Box::new(move |event: DragEvent| {
        event.prevent_default();
        let files = event
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .filter(|files| files.length() > 0);

        let dropped = files.and_then(|files| {
            // Keep the input as the single source of the file for confirmation
            input.set_files(Some(&files));
            files.get(0)
        });
        dispatch_intent(mode, Intent::Drop(dropped.as_ref().map(selected_file)));
    }) as Box<dyn FnMut(DragEvent)>);
    area.set_ondrop(Some(ondrop.as_ref().unchecked_ref()));
    ondrop.forget();

    log::debug!("📦 Upload area ready for {}", mode);
    Ok(())
}

/// Feed an intent to the workflow and apply what comes back.
pub fn dispatch_intent(mode: UploadMode, intent: Intent) {
    let effects = with_workflow(|workflow| workflow.handle(mode, intent)).unwrap_or_default();
    for effect in effects {
        apply_effect(mode, effect);
    }
}

fn apply_effect(mode: UploadMode, effect: Effect) {
    match effect {
        Effect::SetCaption(text) => {
            if let Some(caption) = by_id(&mode.element_id("fileNameDisplay")) {
                caption.set_text_content(Some(&text));
            }
        }
        Effect::ReadPreview { selection } => {
            let Some(file) = current_file(mode) else {
                return;
            };
            wasm_bindgen_futures::spawn_local(async move {
                match read_as_data_url(&file).await {
                    Ok(src) => dispatch_intent(mode, Intent::PreviewLoaded { selection, src }),
                    Err(e) => log::warn!("⚠️ Preview read failed: {}", e),
                }
            });
        }
        Effect::ShowPreview { src } => {
            let preview = by_id(&mode.element_id("previewImage"))
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
            if let Some(preview) = preview {
                preview.set_src(&src);
                set_style(&preview, "display", "block");
                // Restart the fade-in: remove, force layout, re-add
                set_class(&preview, dom::FADE_IN_CLASS, false);
                let _ = preview.offset_width();
                set_class(&preview, dom::FADE_IN_CLASS, true);
            }
        }
        Effect::HidePreview => {
            if let Some(preview) = by_id(&mode.element_id("previewImage")) {
                set_style(&preview, "display", "none");
            }
        }
        Effect::Progress(step) => apply_progress(mode, step),
        Effect::SetDragHighlight(on) => {
            if let Some(area) = by_id(&mode.element_id("uploadArea")) {
                set_class(&area, dom::DRAGOVER_CLASS, on);
            }
        }
        Effect::Alert(message) => {
            WebBrowser.alert(&message);
        }
        Effect::OpenModal {
            title,
            message_html,
        } => {
            let Some(modal) = by_id(&mode.element_id("myModal")) else {
                log::warn!("⚠️ No modal for {}", mode);
                return;
            };
            if let Some(el) = wasm_dom::query_one(&modal, dom::MODAL_TITLE) {
                el.set_text_content(Some(&title));
            }
            if let Some(el) = wasm_dom::query_one(&modal, dom::MODAL_MESSAGE) {
                el.set_inner_html(&message_html);
            }
            set_class(&modal, dom::HIDDEN_CLASS, false);
        }
        Effect::CloseModal => {
            if let Some(modal) = by_id(&mode.element_id("myModal")) {
                set_class(&modal, dom::HIDDEN_CLASS, true);
            }
        }
        Effect::Dispatch(mode) => {
            wasm_bindgen_futures::spawn_local(hand_off(mode));
        }
    }
}

/// Decorative only: the bar is timer driven and reflects no transfer.
fn apply_progress(mode: UploadMode, step: ProgressStep) {
    let container = by_id(&mode.element_id("uploadArea")).and_then(|area| {
        wasm_dom::query_one(&area, &format!(".progress-bar-container-{}", mode.name()))
    });
    let bar = by_id(&mode.element_id("progressBar"));

    match step.frame {
        ProgressFrame::Show { percent } => {
            if let Some(container) = &container {
                set_style(container, "display", "block");
                set_style(container, "opacity", "1");
            }
            if let Some(bar) = &bar {
                set_style(bar, "width", &format!("{}%", percent));
            }
        }
        ProgressFrame::Width { percent } => {
            if let Some(bar) = &bar {
                set_style(bar, "width", &format!("{}%", percent));
            }
        }
        ProgressFrame::FadeOut { duration_ms } => {
            if let Some(container) = &container {
                set_style(
                    container,
                    "transition",
                    &format!("opacity {}ms ease", duration_ms),
                );
                set_style(container, "opacity", "0");
            }
        }
        ProgressFrame::Hide => {
            if let Some(container) = &container {
                set_style(container, "display", "none");
                set_style(container, "opacity", "1");
            }
        }
    }

    if let Some(delay) = step.next_delay_ms {
        let run = step.run;
        Timeout::new(delay, move || {
            let next =
                with_workflow(|workflow| workflow.widget_mut(mode).advance_progress(run)).flatten();
            if let Some(effect) = next {
                apply_effect(mode, effect);
            }
        })
        .forget();
    }
}

/// Confirmed: re-read the file, store it, and leave for the mode's page.
async fn hand_off(mode: UploadMode) {
    let config = config();
    let Some(file) = current_file(mode) else {
        WebBrowser.alert(&LookupError::NoFileSelected.user_message(config.locale));
        return;
    };

    let data_url = match read_as_data_url(&file).await {
        Ok(url) => url,
        Err(e) => {
            log::error!("❌ Could not read {}: {}", file.name(), e);
            WebBrowser.alert(&e.user_message(config.locale));
            return;
        }
    };

    let store = WebSessionStore;
    let backend = GlooBackend;
    let handoff = Handoff {
        slot: StoredImage::new(&store, &config.storage_key),
        api: LookupApi::new(&backend, &config.endpoints),
        browser: &WebBrowser,
        locale: config.locale,
    };
    handoff.run(mode, &selected_file(&file), &data_url).await;
}
