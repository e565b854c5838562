use contracts::domain::a001_ticket::{TicketId, TicketModule, TicketState};
use contracts::usecases::u501_change_ticket_state::{
    Decision, Outcome, StatusControl, CONFIRM_TITLE, REJECT_TITLE,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;

use super::api;
use crate::shared::dialog::{use_dialog, DialogTone};
use crate::shared::toast::use_toast;

const UPDATED: &str = "Estado actualizado correctamente";

/// Селектор статуса строки тикета
///
/// Назад перейти нельзя; вперёд только после подтверждения. Пока запрос в
/// полёте селектор заблокирован, при ошибке значение возвращается.
#[component]
pub fn StatusSelect(
    ticket_id: TicketId,
    state: TicketState,
    module: TicketModule,
    /// Сервер принял новую стадию
    on_committed: Callback<TicketState>,
) -> impl IntoView {
    let control = RwSignal::new(StatusControl::new(ticket_id, state));
    let dialog = use_dialog();
    let toast = use_toast();

    let submit = move || {
        let Some(request) = control.try_update(|c| c.confirm()).flatten() else {
            return;
        };
        toast.info("Actualizando estado...");
        spawn_local(async move {
            let result = api::update_status(&request).await;
            if let Err(e) = &result {
                log::error!("Failed to update ticket {} status: {}", request.ticket_id, e);
            }
            match control.try_update(|c| c.resolve(result)) {
                Some(Outcome::Committed { state, message }) => {
                    toast.success(message.unwrap_or_else(|| UPDATED.to_string()));
                    on_committed.run(state);
                }
                Some(Outcome::Reverted { message }) => toast.error(message),
                _ => {}
            }
        });
    };

    let on_change = move |raw: String| {
        let Ok(target) = raw.parse::<TicketState>() else {
            log::warn!("Unknown state in selector: {}", raw);
            return;
        };
        let decision = control
            .try_update(|c| c.request(target))
            .unwrap_or(Decision::Ignored);
        match decision {
            Decision::Rejected(err) => {
                dialog.alert(DialogTone::Error, REJECT_TITLE, err.to_string());
            }
            Decision::Confirm { prompt, .. } => {
                dialog.confirm(CONFIRM_TITLE, prompt, "Sí, cambiar", move |accepted| {
                    if accepted {
                        submit();
                    } else {
                        control.update(|c| c.cancel());
                    }
                });
            }
            Decision::Ignored => {}
        }
    };

    let options = move || {
        let committed = control.with(|c| c.committed());
        module
            .selectable_states(committed)
            .into_iter()
            .map(|s| {
                view! {
                    <option value=s.label() selected=move || control.with(|c| c.displayed() == s)>
                        {s.label()}
                    </option>
                }
            })
            .collect_view()
    };

    view! {
        <select
            class="status-select"
            class:status-select--busy=move || control.with(|c| c.is_disabled())
            disabled=move || control.with(|c| c.is_disabled())
            prop:value=move || control.with(|c| c.displayed().label())
            on:change=move |ev| {
                on_change(event_target_value(&ev));
                // отказ не меняет сигнал, поэтому DOM возвращаем вручную
                if let Some(select) = ev
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                {
                    select.set_value(control.with_untracked(|c| c.displayed().label()));
                }
            }
        >
            {options}
        </select>
    }
}
