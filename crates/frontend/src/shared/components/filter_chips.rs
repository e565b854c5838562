use leptos::prelude::*;

/// Группа взаимоисключающих кнопок-фильтров
///
/// Активная кнопка определяется по подписи; клик по уже активной
/// ничего не делает.
#[component]
pub fn FilterChips(
    /// Подписи кнопок, первая обычно "Todos"
    options: Vec<String>,
    #[prop(into)]
    selected: Signal<String>,
    on_select: Callback<String>,
    #[prop(optional)]
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="filter-chips" role="radiogroup">
            {(!label.is_empty()).then(|| view! { <span class="filter-chips__label">{label}</span> })}
            {options
                .into_iter()
                .map(|option| {
                    let value = StoredValue::new(option.clone());
                    let is_active = move || value.with_value(|v| selected.get() == *v);
                    view! {
                        <button
                            class="filter-chip"
                            class:filter-chip--active=is_active
                            role="radio"
                            aria-checked=move || is_active().to_string()
                            on:click=move |_| {
                                if !is_active() {
                                    on_select.run(value.get_value());
                                }
                            }
                        >
                            {option}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
