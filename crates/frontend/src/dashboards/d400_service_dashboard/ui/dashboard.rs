use contracts::dashboards::d400_service_dashboard::{
    kpi_trend, validate_custom_range, DashboardMetrics, DistributionSlice, Kpi, PendingTicket,
    Period, ProblemCount, TechnicianCount, TimelinePoint, TrendView,
};
use contracts::domain::a001_ticket::{priority_tone, BadgeTone, ServiceType, TicketState};
use contracts::shared::api_response::{ApiMessage, Pagination};
use contracts::shared::number_format::format_currency;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d400_service_dashboard::api;
use crate::shared::charts::{BarChart, LineChart, PieChart};
use crate::shared::components::{PaginationControls, StatCard, ToneBadge};
use crate::shared::config::client_config;
use crate::shared::dialog::{use_dialog, DialogService, DialogTone};
use crate::shared::icons::icon;

const PENDING_COLUMNS: u32 = 9;

/// Значение KPI-карточки
fn kpi_value(metrics: &DashboardMetrics, kpi: Kpi) -> String {
    match kpi {
        Kpi::ActiveTickets => metrics.active_tickets.to_string(),
        Kpi::AvgResolutionTime => format!("{} horas", metrics.avg_resolution_time_hours),
        Kpi::ActiveWarranties => metrics.active_warranties.to_string(),
        Kpi::FacturadoSt => format_currency(metrics.facturado_st),
        Kpi::FacturadoRi => format_currency(metrics.facturado_ri),
    }
}

fn kpi_icon(kpi: Kpi) -> &'static str {
    match kpi {
        Kpi::ActiveTickets => "ticket",
        Kpi::AvgResolutionTime => "clock",
        Kpi::ActiveWarranties => "shield",
        Kpi::FacturadoSt | Kpi::FacturadoRi => "dollar",
    }
}

/// Тон диалога по иконке из сообщения сервера
fn notice_tone(message: &ApiMessage) -> DialogTone {
    let icon = match message {
        ApiMessage::Detailed { icon, .. } => icon.as_deref(),
        ApiMessage::Text(_) => None,
    };
    match icon {
        Some("success") => DialogTone::Success,
        Some("error") => DialogTone::Error,
        Some("warning") => DialogTone::Warning,
        _ => DialogTone::Info,
    }
}

fn show_notice(dialog: DialogService, message: &ApiMessage) {
    let title = message.title().unwrap_or("Notificación").to_string();
    let text = match message {
        ApiMessage::Detailed { text, .. } => text.clone().unwrap_or_default(),
        ApiMessage::Text(text) => text.clone(),
    };
    dialog.alert(notice_tone(message), title, text);
}

fn state_tone(raw: &str) -> BadgeTone {
    raw.parse::<TicketState>()
        .map(|s| s.badge_tone())
        .unwrap_or(BadgeTone::Info)
}

fn service_tone(raw: &str) -> BadgeTone {
    ServiceType::parse(raw)
        .map(|t| t.badge_tone())
        .unwrap_or(BadgeTone::Secondary)
}

/// Состояние постраничного виджета
struct PagedWidget<T: Send + Sync + 'static> {
    rows: RwSignal<Vec<T>>,
    pagination: RwSignal<Option<Pagination>>,
    page: RwSignal<u32>,
    loading: RwSignal<bool>,
}

impl<T: Send + Sync + 'static> Clone for PagedWidget<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for PagedWidget<T> {}

impl<T: Clone + Send + Sync + 'static> PagedWidget<T> {
    fn new() -> Self {
        Self {
            rows: RwSignal::new(Vec::new()),
            pagination: RwSignal::new(None),
            page: RwSignal::new(1),
            loading: RwSignal::new(false),
        }
    }

    /// Загрузить страницу; ответ на устаревший запрос отбрасывается
    fn load<F, Fut>(&self, period: RwSignal<Period>, name: &'static str, fetch: F)
    where
        F: FnOnce(Period, u32) -> Fut + 'static,
        Fut: std::future::Future<Output = Result<(Vec<T>, Option<Pagination>), String>> + 'static,
    {
        let widget = *self;
        let requested = (period.get_untracked(), widget.page.get_untracked());
        widget.loading.set(true);
        spawn_local(async move {
            let result = fetch(requested.0, requested.1).await;
            if (period.get_untracked(), widget.page.get_untracked()) != requested {
                return;
            }
            match result {
                Ok((rows, pagination)) => {
                    widget.rows.set(rows);
                    widget.pagination.set(pagination);
                }
                Err(e) => {
                    log::error!("Failed to load {}: {}", name, e);
                    widget.rows.set(Vec::new());
                    widget.pagination.set(None);
                }
            }
            widget.loading.set(false);
        });
    }
}

#[component]
fn PeriodSelector(period: RwSignal<Period>, on_select: Callback<Period>) -> impl IntoView {
    let dialog = use_dialog();
    let picker_open = RwSignal::new(false);
    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());

    let apply = move |_| {
        let (s, e) = (start.get_untracked(), end.get_untracked());
        match validate_custom_range(&s, &e) {
            Ok(custom) => {
                picker_open.set(false);
                on_select.run(custom);
                dialog.alert(
                    DialogTone::Success,
                    "Rango aplicado",
                    format!("Datos desde {} hasta {}", s.trim(), e.trim()),
                );
            }
            Err(err) => dialog.alert(DialogTone::Warning, err.title(), err.to_string()),
        }
    };
    let cancel = move |_| {
        picker_open.set(false);
        start.set(String::new());
        end.set(String::new());
    };

    view! {
        <div class="period-selector">
            <div class="period-selector__buttons">
                {Period::PRESETS
                    .into_iter()
                    .map(|p| {
                        view! {
                            <button
                                type="button"
                                class="period-btn"
                                class:active=move || period.get() == p
                                on:click=move |_| {
                                    picker_open.set(false);
                                    on_select.run(p);
                                }
                            >
                                {p.label()}
                            </button>
                        }
                    })
                    .collect_view()}
                <button
                    type="button"
                    class="period-btn"
                    class:active=move || period.get().is_custom()
                    on:click=move |_| picker_open.update(|open| *open = !*open)
                >
                    {icon("clock")}
                    " Personalizado"
                </button>
            </div>
            <Show when=move || picker_open.get()>
                <div class="period-selector__custom">
                    <label>
                        "Desde"
                        <input
                            type="date"
                            class="form-control"
                            prop:value=move || start.get()
                            on:input=move |ev| start.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Hasta"
                        <input
                            type="date"
                            class="form-control"
                            prop:value=move || end.get()
                            on:input=move |ev| end.set(event_target_value(&ev))
                        />
                    </label>
                    <Button appearance=ButtonAppearance::Primary on_click=apply>
                        "Aplicar"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=cancel>
                        "Cancelar"
                    </Button>
                </div>
            </Show>
        </div>
    }
}

fn pending_row(t: PendingTicket) -> impl IntoView {
    view! {
        <tr class="ticket-row">
            <td>
                <span class="fw-bold text-primary">{format!("#{}", t.id)}</span>
            </td>
            <td class="text-truncate" title=t.document.clone()>
                <span class="fw-bold">{t.document.clone()}</span>
            </td>
            <td class="text-truncate" title=t.product.clone()>
                <small class="text-muted">{t.product.clone()}</small>
            </td>
            <td>
                <ToneBadge tone=state_tone(&t.state) text=t.state.clone()/>
            </td>
            <td class="text-truncate">{t.technician.clone()}</td>
            <td class="text-truncate">
                <small class="text-muted">{t.city.clone()}</small>
            </td>
            <td>
                <small class="text-muted">{t.waiting_time.clone()}</small>
            </td>
            <td>
                <ToneBadge tone=priority_tone(&t.priority) text=t.priority.clone()/>
            </td>
            <td>
                <ToneBadge tone=service_tone(&t.service_type) text=t.service_type.clone()/>
            </td>
        </tr>
    }
}

/// Дашборд сервисного центра
#[component]
pub fn ServiceDashboard() -> impl IntoView {
    let dialog = use_dialog();
    let paging = client_config().paging;

    let period = RwSignal::new(Period::default());

    let metrics = RwSignal::new(None::<DashboardMetrics>);
    let kpi_loading = RwSignal::new(false);

    let technicians = PagedWidget::<TechnicianCount>::new();
    let pending = PagedWidget::<PendingTicket>::new();
    let problems = PagedWidget::<ProblemCount>::new();
    let distribution = RwSignal::new(Vec::<DistributionSlice>::new());
    let timeline = RwSignal::new(Vec::<TimelinePoint>::new());

    // смена периода начинает постраничные виджеты с первой страницы
    let select_period = Callback::new(move |p: Period| {
        technicians.page.set(1);
        pending.page.set(1);
        problems.page.set(1);
        period.set(p);
    });

    // KPI
    Effect::new(move |_| {
        let p = period.get();
        kpi_loading.set(true);
        spawn_local(async move {
            let result = api::fetch_metrics(p).await;
            if period.get_untracked() != p {
                return;
            }
            match result {
                Ok((data, notice)) => {
                    metrics.set(Some(data));
                    if let Some(message) = notice {
                        show_notice(dialog, &message);
                    }
                }
                Err(e) => {
                    log::error!("Failed to load KPIs: {}", e);
                    metrics.set(None);
                    dialog.alert(DialogTone::Error, "Error", "No se pudo cargar KPIs");
                }
            }
            kpi_loading.set(false);
        });
    });

    Effect::new(move |_| {
        period.track();
        technicians.page.track();
        technicians.load(period, "tickets by technician", move |p, page| {
            api::fetch_tickets_by_technician(p, page, paging.technicians_per_page)
        });
    });

    Effect::new(move |_| {
        period.track();
        pending.page.track();
        pending.load(period, "pending tickets", move |p, page| {
            api::fetch_pending_tickets(p, page, paging.pending_per_page)
        });
    });

    Effect::new(move |_| {
        period.track();
        problems.page.track();
        problems.load(period, "top problems", move |p, page| {
            api::fetch_top_problems(p, page, paging.problems_per_page)
        });
    });

    Effect::new(move |_| {
        let p = period.get();
        spawn_local(async move {
            match api::fetch_distribution(p).await {
                Ok(slices) if period.get_untracked() == p => distribution.set(slices),
                Ok(_) => {}
                Err(e) => log::error!("Failed to load distribution: {}", e),
            }
        });
    });

    // за один день линии времени нет: не грузим и не показываем
    Effect::new(move |_| {
        let p = period.get();
        if !p.shows_timeline() {
            timeline.set(Vec::new());
            return;
        }
        spawn_local(async move {
            match api::fetch_timeline(p).await {
                Ok(points) if period.get_untracked() == p => timeline.set(points),
                Ok(_) => {}
                Err(e) => log::error!("Failed to load timeline: {}", e),
            }
        });
    });

    let export = move |_| {
        dialog.alert(
            DialogTone::Info,
            "Función de exportar",
            "Esta funcionalidad estará disponible próximamente",
        )
    };

    let kpi_cards = Kpi::ALL
        .into_iter()
        .map(|kpi| {
            let value = Signal::derive(move || metrics.with(|m| m.as_ref().map(|m| kpi_value(m, kpi))));
            let trend = Signal::derive(move || {
                metrics.with(|m| match m {
                    Some(m) => kpi_trend(m.trends.as_ref(), kpi),
                    None => TrendView::missing(),
                })
            });
            view! {
                <StatCard
                    label=kpi.title()
                    icon_name=kpi_icon(kpi)
                    value=value
                    trend=trend
                    loading=kpi_loading
                />
            }
        })
        .collect_view();

    let tech_labels = Signal::derive(move || {
        technicians
            .rows
            .with(|rows| rows.iter().map(|t| t.technician.clone()).collect::<Vec<_>>())
    });
    let tech_values =
        Signal::derive(move || technicians.rows.with(|rows| rows.iter().map(|t| t.ticket_count).collect::<Vec<_>>()));
    let dist_labels = Signal::derive(move || {
        distribution.with(|d| d.iter().map(|s| s.display_label()).collect::<Vec<_>>())
    });
    let dist_values = Signal::derive(move || distribution.with(|d| d.iter().map(|s| s.value).collect::<Vec<_>>()));
    let timeline_labels =
        Signal::derive(move || timeline.with(|t| t.iter().map(|p| p.period.clone()).collect::<Vec<_>>()));
    let timeline_values =
        Signal::derive(move || timeline.with(|t| t.iter().map(|p| p.total_tickets).collect::<Vec<_>>()));

    let pending_body = move || {
        if pending.loading.get() && pending.rows.with(|r| r.is_empty()) {
            return view! {
                <tr>
                    <td colspan=PENDING_COLUMNS.to_string() class="text-center">
                        <Spinner label="Cargando..."/>
                    </td>
                </tr>
            }
            .into_any();
        }
        let rows = pending.rows.get();
        if rows.is_empty() {
            return view! {
                <tr>
                    <td colspan=PENDING_COLUMNS.to_string() class="text-center text-muted">
                        "Sin tickets pendientes"
                    </td>
                </tr>
            }
            .into_any();
        }
        rows.into_iter().map(pending_row).collect_view().into_any()
    };

    let problems_body = move || {
        let rows = problems.rows.get();
        if rows.is_empty() {
            return view! {
                <li class="problem-item problem-item--empty">
                    {icon("alert")}
                    <span>"Sin problemas frecuentes"</span>
                </li>
            }
            .into_any();
        }
        rows.into_iter()
            .map(|p| {
                view! {
                    <li class="problem-item">
                        <div class="problem-info">
                            <span class="problem-title">{p.problem}</span>
                            <small class="text-muted">"Casos reportados"</small>
                        </div>
                        <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Danger>
                            {p.count.to_string()}
                        </Badge>
                    </li>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="page dashboard">
            <div class="page__header">
                <h2>{icon("dashboard")} " Dashboard"</h2>
                <div class="page__header-actions">
                    <PeriodSelector period=period on_select=select_period/>
                    <Button appearance=ButtonAppearance::Secondary on_click=export>
                        {icon("download")}
                        " Exportar"
                    </Button>
                </div>
            </div>

            <div class="kpi-grid">{kpi_cards}</div>

            <div class="dashboard-grid">
                <div class="card">
                    <h4 class="card__title">"Tickets por técnico"</h4>
                    <BarChart labels=tech_labels values=tech_values series="tickets"/>
                    <PaginationControls
                        pagination=technicians.pagination
                        on_page_change=Callback::new(move |page| technicians.page.set(page))
                    />
                </div>
                <div class="card">
                    <h4 class="card__title">"Distribución por tipo de servicio"</h4>
                    <PieChart labels=dist_labels values=dist_values/>
                </div>
            </div>

            <Show when=move || period.get().shows_timeline()>
                <div class="card">
                    <h4 class="card__title">"Tickets creados en el período"</h4>
                    <LineChart labels=timeline_labels values=timeline_values/>
                </div>
            </Show>

            <div class="dashboard-grid dashboard-grid--wide">
                <div class="card">
                    <h4 class="card__title">"Tickets pendientes"</h4>
                    <div class="table-wrapper">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"ID"</th>
                                    <th>"Documento"</th>
                                    <th>"Producto"</th>
                                    <th>"Estado"</th>
                                    <th>"Técnico"</th>
                                    <th>"Ciudad"</th>
                                    <th>"Tiempo de espera"</th>
                                    <th>"Prioridad"</th>
                                    <th>"Tipo"</th>
                                </tr>
                            </thead>
                            <tbody>{pending_body}</tbody>
                        </table>
                    </div>
                    <PaginationControls
                        pagination=pending.pagination
                        on_page_change=Callback::new(move |page| pending.page.set(page))
                        show_summary=true
                    />
                </div>
                <div class="card">
                    <h4 class="card__title">"Problemas más frecuentes"</h4>
                    <ul class="problem-list">{problems_body}</ul>
                    <PaginationControls
                        pagination=problems.pagination
                        on_page_change=Callback::new(move |page| problems.page.set(page))
                    />
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> DashboardMetrics {
        serde_json::from_value(serde_json::json!({
            "active_tickets": 42,
            "avg_resolution_time_hours": 12.5,
            "active_warranties": 7,
            "facturado_st": 1250000,
            "facturado_ri": 0
        }))
        .unwrap()
    }

    #[test]
    fn test_kpi_values() {
        let m = metrics();
        assert_eq!(kpi_value(&m, Kpi::ActiveTickets), "42");
        assert_eq!(kpi_value(&m, Kpi::AvgResolutionTime), "12.5 horas");
        assert_eq!(kpi_value(&m, Kpi::FacturadoSt), "$1.250.000");
        assert_eq!(kpi_value(&m, Kpi::FacturadoRi), "$0");
    }

    #[test]
    fn test_notice_tone_from_icon() {
        let message = ApiMessage::Detailed {
            icon: Some("warning".into()),
            title: Some("Sin datos".into()),
            text: None,
        };
        assert_eq!(notice_tone(&message), DialogTone::Warning);
        assert_eq!(notice_tone(&ApiMessage::Text("hola".into())), DialogTone::Info);
    }

    #[test]
    fn test_badge_tones() {
        assert_eq!(service_tone("GA"), BadgeTone::Success);
        assert_eq!(service_tone("??"), BadgeTone::Secondary);
        assert_eq!(state_tone("Terminado"), TicketState::Terminado.badge_tone());
    }
}
