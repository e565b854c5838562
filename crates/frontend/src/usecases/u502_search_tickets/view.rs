use contracts::domain::a001_ticket::TicketModule;
use contracts::usecases::u502_search_tickets::{SearchRequest, SearchSession, SEARCH_FAILED};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

/// Строка единого поиска над таблицей тикетов
///
/// Поиск по Enter или кнопке; пока активны результаты, таблица страницы
/// показывает `SearchResultsBody`, а пагинация скрыта.
#[component]
pub fn UnifiedSearch(module: TicketModule, session: RwSignal<SearchSession>) -> impl IntoView {
    let toast = use_toast();
    let term = RwSignal::new(String::new());

    let perform = move || {
        let request = match SearchRequest::new(&term.get_untracked()) {
            Ok(r) => r,
            Err(e) => {
                toast.warning(e.to_string());
                return;
            }
        };
        let searched = request.search.clone();
        session.set(SearchSession::start(searched.clone()));

        spawn_local(async move {
            let result = api::search_tickets(module, &request).await;
            // очистка во время запроса отменяет результат
            let still_waiting = session.with_untracked(|s| {
                matches!(s, SearchSession::Loading { term } if *term == searched)
            });
            if !still_waiting {
                return;
            }
            let next = match result {
                Ok(envelope) => SearchSession::from_envelope(searched, envelope),
                Err(e) => {
                    log::error!("Ticket search failed: {}", e);
                    SearchSession::fail(SEARCH_FAILED)
                }
            };
            if let SearchSession::Failed { message } = &next {
                toast.error(message.clone());
            }
            session.set(next);
        });
    };

    let clear = move |_| {
        term.set(String::new());
        session.update(|s| *s = s.clear());
    };

    view! {
        <div class="unified-search">
            <div class="unified-search__bar">
                <input
                    type="text"
                    class="unified-search__input"
                    placeholder="Buscar por documento, cliente, IMEI o referencia"
                    prop:value=move || term.get()
                    on:input=move |ev| term.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            perform();
                        }
                    }
                />
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || session.with(|s| s.is_loading()))
                    on_click=move |_| perform()
                >
                    {icon("search")}
                </Button>
                <Show when=move || !term.get().trim().is_empty() || session.with(|s| s.is_active())>
                    <Button appearance=ButtonAppearance::Secondary on_click=clear>
                        {icon("x")}
                        " Limpiar"
                    </Button>
                </Show>
            </div>
            {move || {
                session.with(|s| match s {
                    SearchSession::Results { message, total, .. } => Some(view! {
                        <div class="unified-search__message">
                            <span>{message.clone()}</span>
                            <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Brand>
                                {format!("{} resultado(s)", total)}
                            </Badge>
                        </div>
                    }),
                    _ => None,
                })
            }}
        </div>
    }
}

/// Тело таблицы во время поиска: индикатор загрузки или HTML сервера
#[component]
pub fn SearchResultsBody(session: RwSignal<SearchSession>, colspan: u32) -> impl IntoView {
    move || {
        if session.with(|s| s.is_loading()) {
            view! {
                <tbody>
                    <tr>
                        <td colspan=colspan.to_string() class="table-loading">
                            <Spinner />
                            <div>"Buscando tickets..."</div>
                        </td>
                    </tr>
                </tbody>
            }
            .into_any()
        } else {
            let html = session.with(|s| s.results_html().unwrap_or_default().to_string());
            view! { <tbody inner_html=html></tbody> }.into_any()
        }
    }
}
