pub mod state;

use contracts::domain::a001_ticket::{
    priority_tone, service_type_label, BadgeTone, ServiceType, TicketId, TicketListFilter,
    TicketModule, TicketRow, TicketState, ALL_CITIES, ALL_STATES,
};
use contracts::domain::a003_ticket_form::LOCKED_MESSAGE;
use contracts::usecases::u502_search_tickets::SearchSession;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;
use thaw::*;

use crate::domain::a001_ticket::api;
use crate::shared::api_utils::{with_query, LOAD_FAILED};
use crate::shared::components::{FilterChips, PaginationControls, SearchInput, ToneBadge};
use crate::shared::config::client_config;
use crate::shared::icons::icon;
use crate::shared::nav::{without_params, FlashNotice};
use crate::shared::toast::{use_toast, ToastKind};
use crate::usecases::u501_change_ticket_state::StatusSelect;
use crate::usecases::u502_search_tickets::{SearchResultsBody, UnifiedSearch};
use state::TicketListState;

const COLUMNS: u32 = 11;

fn state_options() -> Vec<String> {
    std::iter::once(ALL_STATES.to_string())
        .chain(TicketState::ALL.iter().map(|s| s.label().to_string()))
        .collect()
}

fn city_options() -> Vec<String> {
    std::iter::once(ALL_CITIES.to_string())
        .chain(client_config().filters.cities.iter().cloned())
        .collect()
}

fn state_tone(raw: &str) -> BadgeTone {
    raw.parse::<TicketState>()
        .map(|s| s.badge_tone())
        .unwrap_or(BadgeTone::Secondary)
}

/// Страница списка тикетов модуля
#[component]
pub fn TicketListPage(module: TicketModule) -> impl IntoView {
    let location = use_location();
    let navigate = StoredValue::new_local(use_navigate());
    let toast = use_toast();

    let state = RwSignal::new(TicketListState::from_query(&location.search.get_untracked()));
    let session = RwSignal::new(SearchSession::default());

    // фильтр живёт в URL, переход по новому URL перезагружает список
    let filter = Memo::new(move |_| TicketListFilter::from_query_string(&location.search.get()));

    let go = move |next: TicketListFilter| {
        let url = with_query(&module.page_path(), &next.to_query_string());
        navigate.with_value(|nav| nav(&url, NavigateOptions::default()));
    };

    let load = move |f: TicketListFilter| {
        state.update(|s| s.begin(f.clone()));
        spawn_local(async move {
            log::debug!("Loading {} tickets: {}", module.key(), f.to_query_string());
            let result = api::fetch_tickets(module, &f).await;
            if let Err(e) = &result {
                log::error!("Failed to load {} tickets: {}", module.key(), e);
                toast.error(LOAD_FAILED);
            }
            state.update(|s| {
                s.finish(&f, result);
            });
        });
    };

    Effect::new(move |_| {
        let f = filter.get();
        session.set(SearchSession::Idle);
        load(f);
    });

    // уведомление после сохранения тикета, затем чистим URL
    Effect::new(move |_| {
        let search = location.search.get_untracked();
        if let Some(notice) = FlashNotice::from_query(&search) {
            toast.show(ToastKind::Success, notice.title(), notice.text());
            let url = with_query(&module.page_path(), &without_params(&search, &FlashNotice::KEYS));
            navigate.with_value(|nav| {
                nav(
                    &url,
                    NavigateOptions {
                        replace: true,
                        ..NavigateOptions::default()
                    },
                )
            });
        }
    });

    let on_state_chip = Callback::new(move |label: String| {
        toast.info("Aplicando filtro...");
        go(filter.get_untracked().with_state(TicketListFilter::state_from_label(&label)));
    });
    let on_city_chip = Callback::new(move |label: String| {
        toast.info("Aplicando filtro...");
        go(filter.get_untracked().with_city(Some(label)));
    });
    let on_search = Callback::new(move |text: String| {
        let current = filter.get_untracked();
        if current.search == text.trim().to_lowercase() {
            return;
        }
        if !text.trim().is_empty() {
            toast.info("Buscando...");
        }
        go(current.with_search(&text));
    });
    let on_page = Callback::new(move |page: u32| go(filter.get_untracked().with_page(page)));
    let clear_filters = move |_| go(TicketListFilter::cleared());

    let on_committed = move |id: TicketId, new_state: TicketState| {
        state.update(|s| s.apply_committed(id, new_state));
        if state.with_untracked(|s| s.needs_refresh_after(new_state)) {
            load(filter.get_untracked());
        }
    };

    let rows_view = move || {
        view! {
            <For
                each=move || state.with(|s| s.rows.clone())
                key=|row: &TicketRow| (row.id, row.state.clone())
                children=move |row: TicketRow| ticket_row(module, row, on_committed)
            />
        }
    };

    let table_phase = Memo::new(move |_| {
        state.with(|s| (s.is_loaded, s.empty_message(), s.error.clone()))
    });

    let body = move || {
        if session.with(|s| s.is_active()) {
            return view! { <SearchResultsBody session=session colspan=COLUMNS /> }.into_any();
        }
        let (loaded, empty, error) = table_phase.get();
        if !loaded {
            return view! {
                <tbody>
                    <tr><td colspan=COLUMNS.to_string() class="table-loading"><Spinner /></td></tr>
                </tbody>
            }
            .into_any();
        }
        if let Some(e) = error {
            return view! {
                <tbody>
                    <tr><td colspan=COLUMNS.to_string() class="table-error">{e}</td></tr>
                </tbody>
            }
            .into_any();
        }
        if let Some(message) = empty {
            let filtered = filter.with(|f| f.has_active_filters());
            return view! {
                <tbody>
                    <tr>
                        <td colspan=COLUMNS.to_string() class="table-empty">
                            {icon("filter")}
                            <p>{message}</p>
                            <Show when=move || filtered>
                                <Button appearance=ButtonAppearance::Secondary on_click=clear_filters>
                                    {icon("x")}
                                    " Limpiar filtros"
                                </Button>
                            </Show>
                        </td>
                    </tr>
                </tbody>
            }
            .into_any();
        }
        view! { <tbody>{rows_view}</tbody> }.into_any()
    };

    let initial_search = filter.get_untracked().search;

    view! {
        <div class="page ticket-list">
            <div class="page-header">
                <h1>{module.title()}</h1>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                    {move || format!("{} tickets", state.with(|s| s.rows.len()))}
                </Badge>
                {move || {
                    let count = filter.with(|f| f.active_filters_count());
                    (count > 0).then(|| view! {
                        <span class="badge badge--primary" title="Filtros activos">{count}</span>
                    })
                }}
            </div>

            <div class="filter-panel">
                <FilterChips
                    label="Estado"
                    options=state_options()
                    selected=Signal::derive(move || filter.with(|f| f.state_label().to_string()))
                    on_select=on_state_chip
                />
                <FilterChips
                    label="Ciudad"
                    options=city_options()
                    selected=Signal::derive(move || filter.with(|f| f.city_label().to_string()))
                    on_select=on_city_chip
                />
                <SearchInput
                    initial=initial_search
                    on_change=on_search
                    delay_ms=client_config().ui.filter_debounce_ms
                    placeholder="Filtrar tickets..."
                />
            </div>

            <UnifiedSearch module=module session=session />

            <div class="table-container">
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"#"</th>
                            <th>"Documento"</th>
                            <th>"Cliente"</th>
                            <th>"Producto"</th>
                            <th>"IMEI"</th>
                            <th>"Técnico"</th>
                            <th>"Ciudad"</th>
                            <th>"Prioridad"</th>
                            <th>"Tipo"</th>
                            <th>"Estado"</th>
                            <th>"Acciones"</th>
                        </tr>
                    </thead>
                    {body}
                </table>
            </div>

            <Show when=move || session.with(|s| s.pagination_visible())>
                <PaginationControls
                    pagination=Signal::derive(move || state.with(|s| s.pagination.clone()))
                    on_page_change=on_page
                    show_summary=true
                />
            </Show>
        </div>
    }
}

fn ticket_row(
    module: TicketModule,
    row: TicketRow,
    on_committed: impl Fn(TicketId, TicketState) + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let id = row.id;
    let edit_href = format!("/edit_ticket/{}?from={}", id, module.key());
    let can_edit = row.can_edit();
    let timestamp = row.current_timestamp().unwrap_or_default().to_string();
    let service = service_type_label(&row.service_type);
    let service_tone = ServiceType::parse(&row.service_type)
        .map(|s| s.badge_tone())
        .unwrap_or(BadgeTone::Secondary);

    let status_cell = match row.parsed_state() {
        Some(current) => view! {
            <StatusSelect
                ticket_id=id
                state=current
                module=module
                on_committed=Callback::new(move |s| on_committed(id, s))
            />
            <small class="ticket-row__timestamp">{timestamp}</small>
        }
        .into_any(),
        // стадия вне цепочки: только показываем
        None => view! { <ToneBadge tone=state_tone(&row.state) text=row.state.clone() /> }.into_any(),
    };

    view! {
        <tr class="ticket-row" data-status=row.state.clone()>
            <td><strong>{format!("#{}", id)}</strong></td>
            <td>{row.document.clone()}</td>
            <td>{row.client.clone()}</td>
            <td title=row.reference.clone()>{row.product.clone()}</td>
            <td>{row.imei.clone()}</td>
            <td>{row.technician.clone()}</td>
            <td>{row.city.clone()}</td>
            <td><ToneBadge tone=priority_tone(&row.priority) text=row.priority.clone() /></td>
            <td><ToneBadge tone=service_tone text=service /></td>
            <td>{status_cell}</td>
            <td>
                {if can_edit {
                    view! {
                        <a class="btn-icon" href=edit_href title="Editar ticket">{icon("edit")}</a>
                    }
                    .into_any()
                } else {
                    view! {
                        <button class="btn-icon" disabled=true title=LOCKED_MESSAGE>
                            {icon("edit")}
                        </button>
                    }
                    .into_any()
                }}
            </td>
        </tr>
    }
}
