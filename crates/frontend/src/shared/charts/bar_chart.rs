use super::geometry::{bar_layout, label_step, PRIMARY};
use leptos::prelude::*;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 260.0;
const PAD_LEFT: f64 = 36.0;
const PAD_BOTTOM: f64 = 40.0;

#[component]
pub fn BarChart(
    #[prop(into)] labels: Signal<Vec<String>>,
    #[prop(into)] values: Signal<Vec<i64>>,
    /// Подпись для всплывающей подсказки
    #[prop(optional)]
    series: &'static str,
) -> impl IntoView {
    let plot_w = WIDTH - PAD_LEFT;
    let plot_h = HEIGHT - PAD_BOTTOM;

    let bars = move || {
        let labels = labels.get();
        let values = values.get();
        let step = label_step(labels.len());
        bar_layout(&values, plot_w, plot_h)
            .into_iter()
            .enumerate()
            .map(|(i, bar)| {
                let label = labels.get(i).cloned().unwrap_or_default();
                let show_label = i % step == 0;
                let tooltip = format!("{}: {} {}", label, bar.value, series);
                view! {
                    <g class="chart-bar">
                        <rect
                            x=bar.x.to_string()
                            y=bar.y.to_string()
                            width=bar.width.to_string()
                            height=bar.height.to_string()
                            rx="6"
                            fill=PRIMARY
                        >
                            <title>{tooltip}</title>
                        </rect>
                        {show_label.then(|| view! {
                            <text
                                class="chart-axis-label"
                                x=(bar.x + bar.width / 2.0).to_string()
                                y=(plot_h + 16.0).to_string()
                                text-anchor="middle"
                            >
                                {label}
                            </text>
                        })}
                    </g>
                }
            })
            .collect_view()
    };

    let max_label = move || values.get().iter().copied().max().unwrap_or(0).max(0).to_string();

    view! {
        <svg class="chart chart--bar" viewBox=format!("0 0 {} {}", WIDTH, HEIGHT) preserveAspectRatio="xMidYMid meet">
            <text class="chart-axis-label" x="0" y="12">{max_label}</text>
            <text class="chart-axis-label" x="0" y=plot_h.to_string()>"0"</text>
            <line class="chart-axis" x1=PAD_LEFT.to_string() y1=plot_h.to_string() x2=WIDTH.to_string() y2=plot_h.to_string() stroke="#dee2e6"/>
            <g transform=format!("translate({}, 0)", PAD_LEFT)>
                {bars}
            </g>
        </svg>
    }
}
