use contracts::shared::validation::{
    validate_attachments, AttachmentMeta, MAX_ATTACHMENTS, MAX_ATTACHMENT_MB,
};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

use super::model::Attachment;
use super::view_model::TicketEditViewModel;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

fn meta(file: &File) -> AttachmentMeta {
    AttachmentMeta {
        name: file.name(),
        mime: file.type_(),
        size_bytes: file.size() as u64,
    }
}

fn preview_url(file: &File) -> Option<String> {
    match web_sys::Url::create_object_url_with_blob(file) {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("No preview for {}: {:?}", file.name(), e);
            None
        }
    }
}

/// Выбор изображений к тикету с проверкой и превью
#[component]
pub fn AttachmentsSection(vm: TicketEditViewModel) -> impl IntoView {
    let toast = use_toast();

    let on_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let files: Vec<File> = input
            .files()
            .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
            .unwrap_or_default();

        let metas: Vec<AttachmentMeta> = files.iter().map(meta).collect();
        if let Err(e) = validate_attachments(&metas, MAX_ATTACHMENTS, MAX_ATTACHMENT_MB) {
            toast.error(e.to_string());
            input.set_value("");
            return;
        }

        let attachments = files
            .iter()
            .zip(metas)
            .map(|(file, meta)| Attachment {
                meta,
                preview_url: preview_url(file),
            })
            .collect();
        vm.replace_attachments(attachments);
    };

    view! {
        <section class="edit-section">
            <div class="edit-section__header">
                <h4>{icon("image")} " Imágenes"</h4>
                <small class="text-muted">
                    {format!(
                        "Máximo {} imágenes de hasta {}MB cada una",
                        MAX_ATTACHMENTS,
                        MAX_ATTACHMENT_MB,
                    )}
                </small>
            </div>
            <input
                type="file"
                id="images"
                class="form-control"
                accept="image/*"
                multiple=true
                on:change=on_change
            />
            <div class="image-preview">
                {move || {
                    vm.attachments
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(i, file)| {
                            view! {
                                <div class="image-preview__item">
                                    {file
                                        .preview_url
                                        .map(|src| view! { <img src=src alt=file.meta.name.clone()/> })}
                                    <div class="image-preview__name">{file.meta.name.clone()}</div>
                                    <button
                                        type="button"
                                        class="btn btn-danger btn-sm"
                                        on:click=move |_| vm.remove_attachment(i)
                                    >
                                        {icon("trash")}
                                        " Eliminar"
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}
