use crate::shared::icons::icon;
use contracts::shared::api_response::{page_window, PageItem, Pagination};
use leptos::prelude::*;

/// PaginationControls component - серверная пагинация
///
/// Кнопки строятся из `page_window`: текущая страница ±2, первая и
/// последняя, пропуски многоточием. При одной странице ничего не рисует.
#[component]
pub fn PaginationControls(
    /// Пагинация последнего ответа сервера
    #[prop(into)]
    pagination: Signal<Option<Pagination>>,

    /// Callback when page changes (1-based)
    on_page_change: Callback<u32>,

    /// Подпись "Mostrando a-b de N"
    #[prop(optional)]
    show_summary: bool,
) -> impl IntoView {
    let summary = move || {
        pagination.get().filter(|_| show_summary).map(|p| {
            let (from, to) = p.shown_range();
            view! {
                <span class="pagination-info">
                    {format!("Mostrando {}-{} de {}", from, to, p.total)}
                </span>
            }
        })
    };

    let buttons = move || {
        let Some(p) = pagination.get() else {
            return Vec::new();
        };
        page_window(&p)
            .into_iter()
            .map(|item| match item {
                PageItem::Prev { target, enabled } => view! {
                    <button
                        class="pagination-btn"
                        disabled=!enabled
                        title="Página anterior"
                        on:click=move |_| on_page_change.run(target)
                    >
                        {icon("chevron-left")}
                    </button>
                }
                .into_any(),
                PageItem::Page { number, current } => view! {
                    <button
                        class="pagination-btn"
                        class:pagination-btn--active=current
                        on:click=move |_| {
                            if !current {
                                on_page_change.run(number);
                            }
                        }
                    >
                        {number.to_string()}
                    </button>
                }
                .into_any(),
                PageItem::Gap => view! { <span class="pagination-gap">"…"</span> }.into_any(),
                PageItem::Next { target, enabled } => view! {
                    <button
                        class="pagination-btn"
                        disabled=!enabled
                        title="Página siguiente"
                        on:click=move |_| on_page_change.run(target)
                    >
                        {icon("chevron-right")}
                    </button>
                }
                .into_any(),
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="pagination-controls">
            {summary}
            {buttons}
        </div>
    }
}
