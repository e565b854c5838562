//! Всплывающие уведомления в правом верхнем углу
//!
//! Сервис кладётся в контекст в `App`; уведомление исчезает само через
//! `[ui] toast_ms`.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::config::client_config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    fn intent(&self) -> MessageBarIntent {
        match self {
            ToastKind::Success => MessageBarIntent::Success,
            ToastKind::Error => MessageBarIntent::Error,
            ToastKind::Warning => MessageBarIntent::Warning,
            ToastKind::Info => MessageBarIntent::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn show(&self, kind: ToastKind, title: impl Into<String>, text: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.items.update(|items| {
            items.push(Toast {
                id,
                kind,
                title: title.into(),
                text: text.into(),
            })
        });

        let items = self.items;
        let delay = client_config().ui.toast_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            items.update(|items| items.retain(|t| t.id != id));
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(ToastKind::Success, "¡Éxito!", text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(ToastKind::Error, "Error", text);
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.show(ToastKind::Warning, "Atención", text);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.show(ToastKind::Info, "Información", text);
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|t| t.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toast() -> ToastService {
    use_context::<ToastService>().expect("ToastService not found in context")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toast();

    view! {
        <div class="toast-host">
            <For
                each=move || toasts.items.get()
                key=|t| t.id
                children=move |t: Toast| {
                    let id = t.id;
                    view! {
                        <div class="toast-host__item" on:click=move |_| toasts.dismiss(id)>
                            <MessageBar intent=t.kind.intent()>
                                <div class="toast-host__text">
                                    <strong>{t.title}</strong>
                                    " "
                                    <span>{t.text}</span>
                                </div>
                            </MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}
