use contracts::shared::number_format::{format_thousands, reformat_amount_input};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use super::view_model::TicketEditViewModel;
use crate::shared::icons::icon;

/// Переформатировать поле суммы при вводе, сохранив позицию курсора
///
/// Возвращает новое значение поля (`1.234.567`).
pub(super) fn reformat_amount_event(ev: &leptos::ev::Event) -> String {
    let Some(input) = ev
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
    else {
        return event_target_value(ev);
    };

    let raw = input.value();
    let caret = input
        .selection_start()
        .ok()
        .flatten()
        .map(|c| c as usize)
        .unwrap_or_else(|| raw.chars().count());
    let (formatted, new_caret) = reformat_amount_input(&raw, caret);

    input.set_value(&formatted);
    if input
        .set_selection_range(new_caret as u32, new_caret as u32)
        .is_err()
    {
        log::debug!("Caret not restored for amount input");
    }
    formatted
}

/// Таблица запчастей: выбор через поиск, количество, цена, итог строки
#[component]
pub fn PartsSection(vm: TicketEditViewModel) -> impl IntoView {
    let count = Memo::new(move |_| {
        vm.form
            .with(|f| f.as_ref().map(|f| f.parts.len()))
            .unwrap_or(0)
    });

    view! {
        <section class="edit-section">
            <div class="edit-section__header">
                <h4>{icon("wrench")} " Repuestos"</h4>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.add_part()>
                    {icon("plus")}
                    " Agregar repuesto"
                </Button>
            </div>
            <table class="table parts-table">
                <thead>
                    <tr>
                        <th>"Repuesto"</th>
                        <th class="parts-table__qty">"Cantidad"</th>
                        <th>"Valor unitario"</th>
                        <th>"Valor total"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show
                        when=move || { count.get() > 0 }
                        fallback=|| {
                            view! {
                                <tr>
                                    <td colspan="5" class="text-center text-muted">
                                        "No se han agregado repuestos para este servicio."
                                    </td>
                                </tr>
                            }
                        }
                    >
                        <For
                            each=move || 0..count.get()
                            key=|i| *i
                            children=move |i| part_row(vm, i)
                        />
                    </Show>
                </tbody>
            </table>
        </section>
    }
}

// строки привязаны к позиции: после удаления значения сдвигаются реактивно
fn part_row(vm: TicketEditViewModel, index: usize) -> impl IntoView {
    let line = move || {
        vm.form
            .with(|f| f.as_ref().and_then(|f| f.parts.get(index).cloned()))
            .unwrap_or_default()
    };

    view! {
        <tr class="part-row">
            <td>
                <div class="part-picker">
                    <input
                        type="text"
                        class="form-control"
                        readonly=true
                        placeholder="Seleccione un repuesto"
                        prop:value=move || line().display_label()
                    />
                    <button
                        type="button"
                        class="btn btn-outline"
                        title="Buscar repuesto"
                        on:click=move |_| vm.open_part_search(index)
                    >
                        {icon("search")}
                    </button>
                </div>
            </td>
            <td>
                <input
                    type="number"
                    min="1"
                    class="form-control part-quantity"
                    // 0 пока поле пустое; при потере фокуса станет 1
                    prop:value=move || match line().quantity {
                        0 => String::new(),
                        q => q.to_string(),
                    }
                    on:input=move |ev| vm.set_part_quantity(index, event_target_value(&ev))
                    on:blur=move |_| vm.normalize_part_quantity(index)
                />
            </td>
            <td>
                <input
                    type="text"
                    inputmode="numeric"
                    class="form-control part-unit-value"
                    prop:value=move || format_thousands(line().unit_price)
                    on:input=move |ev| {
                        let value = reformat_amount_event(&ev);
                        vm.set_part_price(index, value);
                    }
                />
            </td>
            <td>
                <input
                    type="text"
                    class="form-control part-total-value"
                    readonly=true
                    prop:value=move || format_thousands(line().total())
                />
            </td>
            <td>
                <button
                    type="button"
                    class="btn btn-danger btn-sm"
                    title="Eliminar repuesto"
                    on:click=move |_| vm.confirm_remove_part(index)
                >
                    {icon("trash")}
                </button>
            </td>
        </tr>
    }
}
