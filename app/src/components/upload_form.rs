//! Upload form
//!
//! File picker and upload button shown until the server accepts a file.

use dioxus::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, spawn_local as spawn};

use evalboard_core::PendingUpload;

use crate::api::DashboardHandle;

const INPUT_ID: &str = "upload-input";

/// Read the first file chosen in the input element
async fn read_selected_file(input_id: &str) -> Option<PendingUpload> {
    let input = web_sys::window()?
        .document()?
        .get_element_by_id(input_id)?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?;
    let file = input.files()?.get(0)?;

    let buffer = match JsFuture::from(file.array_buffer()).await {
        Ok(buffer) => buffer,
        Err(e) => {
            tracing::error!(error = ?e, file = %file.name(), "Error reading selected file");
            return None;
        }
    };
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    Some(PendingUpload::new(file.name(), bytes).with_mime(file.type_()))
}

#[component]
pub fn UploadForm() -> Element {
    let dashboard = use_context::<DashboardHandle>();
    let has_file = dashboard.session.read().pending_file().is_some();

    let on_change = {
        let dashboard = dashboard.clone();
        move |_: Event<FormData>| {
            let dashboard = dashboard.clone();
            spawn(async move {
                if let Some(file) = read_selected_file(INPUT_ID).await {
                    dashboard.apply(|s| {
                        s.select_file(file);
                        Vec::new()
                    });
                }
            });
        }
    };

    rsx! {
        div { class: "upload-form",
            input { id: INPUT_ID, r#type: "file", onchange: on_change }
            button {
                disabled: !has_file,
                onclick: move |_| dashboard.apply(|s| s.upload()),
                "Upload"
            }
        }
    }
}
