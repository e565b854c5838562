use contracts::domain::a002_spare_part::{highlight_segments, SparePart};
use contracts::shared::number_format::format_currency;
use leptos::prelude::*;
use thaw::*;

use super::model::PartSearchState;
use super::view_model::TicketEditViewModel;
use crate::shared::icons::icon;

fn highlighted(text: &str, term: &str) -> AnyView {
    highlight_segments(text, term)
        .into_iter()
        .map(|s| {
            if s.matched {
                view! { <mark class="highlight">{s.text}</mark> }.into_any()
            } else {
                view! { <span>{s.text}</span> }.into_any()
            }
        })
        .collect_view()
        .into_any()
}

fn part_card(vm: TicketEditViewModel, part: SparePart, term: String) -> impl IntoView {
    let price = part.price.filter(|p| *p > 0).map(format_currency);
    let stock = part.stock.map(|s| format!("Stock: {}", s));
    let description = highlighted(&part.description, &term);
    let code = highlighted(&part.code, &term);

    view! {
        <div class="part-card" on:click=move |_| vm.select_part(part.clone())>
            <div class="part-card__head">
                <h6 class="part-card__title">{description}</h6>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    "Cód: "
                    {code}
                </Badge>
            </div>
            <div class="part-card__foot">
                <span class="part-card__price">{price.unwrap_or_default()}</span>
                <span class="text-muted">{stock.unwrap_or_default()}</span>
                <Button appearance=ButtonAppearance::Primary size=ButtonSize::Small>
                    "Seleccionar"
                </Button>
            </div>
        </div>
    }
}

/// Окно поиска запчасти для выбранной строки таблицы
#[component]
pub fn PartSearchDialog(vm: TicketEditViewModel) -> impl IntoView {
    let open = RwSignal::new(false);

    Effect::new(move |_| open.set(vm.search_row.get().is_some()));
    // закрытие по маске/Escape
    Effect::new(move |_| {
        if !open.get() && vm.search_row.get_untracked().is_some() {
            vm.close_part_search();
        }
    });

    let results = move || {
        let state = vm.search.get();
        let count = state.count_text().unwrap_or_default();
        match state {
            PartSearchState::Idle => view! {
                <div class="part-search__hint">
                    {icon("search")}
                    <p>"Ingrese al menos 3 caracteres para buscar repuestos"</p>
                </div>
            }
            .into_any(),
            PartSearchState::Loading { .. } => view! {
                <div class="part-search__hint">
                    <Spinner label="Buscando repuestos..."/>
                </div>
            }
            .into_any(),
            PartSearchState::Empty { term } => view! {
                <div class="part-search__hint">
                    {icon("alert")}
                    <p>{format!("No se encontraron repuestos para \"{}\"", term)}</p>
                </div>
            }
            .into_any(),
            PartSearchState::Failed { message } => view! {
                <div class="part-search__hint part-search__hint--error">
                    {icon("alert")}
                    <h5>"Error al buscar repuestos"</h5>
                    <p class="text-muted">{message}</p>
                </div>
            }
            .into_any(),
            PartSearchState::Found { term, parts } => view! {
                <div class="part-search__results">
                    <small class="text-muted">{count}</small>
                    <div class="part-search__grid">
                        {parts
                            .into_iter()
                            .map(|part| part_card(vm, part, term.clone()))
                            .collect_view()}
                    </div>
                </div>
            }
            .into_any(),
        }
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Buscar repuesto"</DialogTitle>
                    <DialogContent>
                        <div class="part-search">
                            <div class="part-search__input">
                                <input
                                    type="text"
                                    class="form-control"
                                    placeholder="Código o descripción"
                                    autofocus=true
                                    prop:value=move || vm.search_input.get()
                                    on:input=move |ev| vm.input_part_search(event_target_value(&ev))
                                />
                                <button
                                    type="button"
                                    class="btn btn-outline"
                                    title="Limpiar"
                                    on:click=move |_| vm.input_part_search(String::new())
                                >
                                    {icon("x")}
                                </button>
                            </div>
                            {results}
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.close_part_search()
                        >
                            "Cerrar"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
