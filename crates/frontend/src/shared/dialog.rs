//! Модальные диалоги: блокирующее сообщение и подтверждение
//!
//! Одновременно открыт один диалог; новый запрос закрывает предыдущий
//! с ответом «нет».

use leptos::prelude::*;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogTone {
    Info,
    Warning,
    Error,
    Success,
}

impl DialogTone {
    fn class(&self) -> &'static str {
        match self {
            DialogTone::Info => "app-dialog app-dialog--info",
            DialogTone::Warning => "app-dialog app-dialog--warning",
            DialogTone::Error => "app-dialog app-dialog--error",
            DialogTone::Success => "app-dialog app-dialog--success",
        }
    }
}

#[derive(Clone)]
struct DialogRequest {
    title: String,
    text: String,
    tone: DialogTone,
    confirm_label: String,
    /// `None`: диалог без кнопки отмены
    cancel_label: Option<String>,
    on_close: Option<Callback<bool>>,
}

#[derive(Clone, Copy)]
pub struct DialogService {
    open: RwSignal<bool>,
    current: RwSignal<Option<DialogRequest>>,
}

impl DialogService {
    pub fn new() -> Self {
        Self {
            open: RwSignal::new(false),
            current: RwSignal::new(None),
        }
    }

    fn present(&self, request: DialogRequest) {
        self.resolve(false);
        self.current.set(Some(request));
        self.open.set(true);
    }

    /// Сообщение с единственной кнопкой
    pub fn alert(&self, tone: DialogTone, title: impl Into<String>, text: impl Into<String>) {
        self.present(DialogRequest {
            title: title.into(),
            text: text.into(),
            tone,
            confirm_label: "Entendido".to_string(),
            cancel_label: None,
            on_close: None,
        });
    }

    /// Подтверждение; `on_result(true)` только при нажатии кнопки подтверждения
    pub fn confirm(
        &self,
        title: impl Into<String>,
        text: impl Into<String>,
        confirm_label: impl Into<String>,
        on_result: impl Fn(bool) + Send + Sync + 'static,
    ) {
        self.present(DialogRequest {
            title: title.into(),
            text: text.into(),
            tone: DialogTone::Warning,
            confirm_label: confirm_label.into(),
            cancel_label: Some("Cancelar".to_string()),
            on_close: Some(Callback::new(on_result)),
        });
    }

    fn resolve(&self, accepted: bool) {
        let request = self.current.get_untracked();
        if request.is_none() {
            return;
        }
        self.current.set(None);
        self.open.set(false);
        if let Some(cb) = request.and_then(|r| r.on_close) {
            cb.run(accepted);
        }
    }
}

impl Default for DialogService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_dialog() -> DialogService {
    use_context::<DialogService>().expect("DialogService not found in context")
}

#[component]
pub fn DialogHost() -> impl IntoView {
    let dialog = use_dialog();

    // закрытие по маске/Escape считается отказом
    Effect::new(move |_| {
        if !dialog.open.get() {
            dialog.resolve(false);
        }
    });

    view! {
        <Dialog open=dialog.open>
            <DialogSurface>
                {move || {
                    dialog
                        .current
                        .get()
                        .map(|req| {
                            let has_cancel = req.cancel_label.is_some();
                            let cancel_label = StoredValue::new(req.cancel_label.clone().unwrap_or_default());
                            view! {
                                <DialogBody>
                                    <DialogTitle>{req.title.clone()}</DialogTitle>
                                    <DialogContent>
                                        <div class=req.tone.class()>
                                            {req
                                                .text
                                                .split("\n\n")
                                                .map(|p| view! { <p>{p.to_string()}</p> })
                                                .collect_view()}
                                        </div>
                                    </DialogContent>
                                    <DialogActions>
                                        <Show when=move || has_cancel>
                                            <Button
                                                appearance=ButtonAppearance::Secondary
                                                on_click=move |_| dialog.resolve(false)
                                            >
                                                {cancel_label.get_value()}
                                            </Button>
                                        </Show>
                                        <Button
                                            appearance=ButtonAppearance::Primary
                                            on_click=move |_| dialog.resolve(true)
                                        >
                                            {req.confirm_label.clone()}
                                        </Button>
                                    </DialogActions>
                                </DialogBody>
                            }
                        })
                }}
            </DialogSurface>
        </Dialog>
    }
}
