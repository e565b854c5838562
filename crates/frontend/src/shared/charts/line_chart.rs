use super::geometry::{area_path, label_step, line_path, line_points, PRIMARY, PRIMARY_FILL};
use leptos::prelude::*;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 260.0;
const PAD_X: f64 = 36.0;
const PAD_BOTTOM: f64 = 40.0;

#[component]
pub fn LineChart(
    #[prop(into)] labels: Signal<Vec<String>>,
    #[prop(into)] values: Signal<Vec<i64>>,
) -> impl IntoView {
    let plot_w = WIDTH - PAD_X * 2.0;
    let plot_h = HEIGHT - PAD_BOTTOM;

    let points = Memo::new(move |_| line_points(&values.get(), plot_w, plot_h));

    let ticks = move || {
        let labels = labels.get();
        let step = label_step(labels.len());
        let dense = step > 1;
        points
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                let label = labels.get(i).cloned().unwrap_or_default();
                let tooltip = format!("Período: {}\n{} tickets", label, p.value);
                view! {
                    <g>
                        <circle cx=p.x.to_string() cy=p.y.to_string() r={if dense { "1.5" } else { "3" }} fill=PRIMARY>
                            <title>{tooltip}</title>
                        </circle>
                        {(i % step == 0).then(|| view! {
                            <text class="chart-axis-label" x=p.x.to_string() y=(plot_h + 16.0).to_string() text-anchor="middle">
                                {label}
                            </text>
                        })}
                    </g>
                }
            })
            .collect_view()
    };

    view! {
        <svg class="chart chart--line" viewBox=format!("0 0 {} {}", WIDTH, HEIGHT) preserveAspectRatio="xMidYMid meet">
            <line class="chart-axis" x1=PAD_X.to_string() y1=plot_h.to_string() x2=(WIDTH - PAD_X).to_string() y2=plot_h.to_string() stroke="#dee2e6"/>
            <g transform=format!("translate({}, 0)", PAD_X)>
                <path d=move || area_path(&points.get(), plot_h) fill=PRIMARY_FILL stroke="none"/>
                <path d=move || line_path(&points.get()) fill="none" stroke=PRIMARY stroke-width="2"/>
                {ticks}
            </g>
        </svg>
    }
}
