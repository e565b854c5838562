use crate::shared::icons::icon;
use contracts::dashboards::d400_service_dashboard::{TrendDirection, TrendView};
use leptos::prelude::*;

/// KPI-карточка дашборда
///
/// `value = None`: данные ещё грузятся или не пришли, показывается `--`.
#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Отформатированное значение
    #[prop(into)]
    value: Signal<Option<String>>,
    /// Тренд относительно предыдущего периода
    #[prop(into)]
    trend: Signal<TrendView>,
    #[prop(into)]
    loading: Signal<bool>,
) -> impl IntoView {
    let formatted = move || {
        if loading.get() {
            "...".to_string()
        } else {
            value.get().unwrap_or_else(|| "--".to_string())
        }
    };

    let arrow = move || match trend.get().direction {
        TrendDirection::Up => "\u{2191} ",
        TrendDirection::Down => "\u{2193} ",
        TrendDirection::Flat => "",
    };

    view! {
        <div class="stat-card" class:stat-card--loading=move || loading.get()>
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                <div class=move || trend.get().direction.css_class()>
                    {arrow}
                    {move || trend.get().text}
                </div>
                {move || {
                    trend.get().progress_percent().map(|pct| {
                        view! {
                            <div class="stat-card__progress">
                                <div
                                    class="stat-card__progress-bar"
                                    style:width=format!("{:.0}%", pct)
                                ></div>
                            </div>
                        }
                    })
                }}
            </div>
        </div>
    }
}
