use super::geometry::pie_slices;
use leptos::prelude::*;

const SIZE: f64 = 220.0;

#[component]
pub fn PieChart(
    #[prop(into)] labels: Signal<Vec<String>>,
    #[prop(into)] values: Signal<Vec<i64>>,
) -> impl IntoView {
    let slices = move || {
        let labels = labels.get();
        let values = values.get();
        // сектора нулевых значений пропущены, подписи сопоставляются по исходному индексу
        let named: Vec<String> = values
            .iter()
            .zip(labels.iter())
            .filter(|(v, _)| **v > 0)
            .map(|(_, l)| l.clone())
            .collect();
        pie_slices(&values, SIZE / 2.0, SIZE / 2.0, SIZE / 2.0 - 4.0)
            .into_iter()
            .zip(named)
            .collect::<Vec<_>>()
    };

    view! {
        <div class="chart chart--pie">
            <svg viewBox=format!("0 0 {} {}", SIZE, SIZE) width=SIZE.to_string() height=SIZE.to_string()>
                {move || {
                    slices()
                        .into_iter()
                        .map(|(slice, label)| {
                            let tooltip = format!("{}: {} ({:.1}%)", label, slice.value, slice.percent);
                            view! {
                                <path d=slice.path fill=slice.color stroke="#fff" stroke-width="1">
                                    <title>{tooltip}</title>
                                </path>
                            }
                        })
                        .collect_view()
                }}
            </svg>
            <ul class="chart-legend">
                {move || {
                    slices()
                        .into_iter()
                        .map(|(slice, label)| {
                            view! {
                                <li>
                                    <span class="chart-legend__swatch" style:background-color=slice.color></span>
                                    <span>{label}</span>
                                    <strong>{slice.value.to_string()}</strong>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
