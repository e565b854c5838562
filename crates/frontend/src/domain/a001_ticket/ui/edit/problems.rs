use leptos::prelude::*;
use thaw::*;

use super::view_model::TicketEditViewModel;
use crate::shared::icons::icon;

/// Чек-лист проблем с фильтром по подстроке
#[component]
pub fn ProblemsSection(vm: TicketEditViewModel) -> impl IntoView {
    let visible = Memo::new(move |_| {
        let term = vm.problem_filter.get();
        vm.form
            .with(|f| f.as_ref().map(|f| f.visible_problems(&term)))
            .unwrap_or_default()
    });
    let selected_text = move || {
        vm.form
            .with(|f| f.as_ref().map(|f| f.selected_problems_text()))
            .unwrap_or_default()
    };

    view! {
        <section class="edit-section">
            <div class="edit-section__header">
                <h4>{icon("alert")} " Problemas reportados"</h4>
                <div class="edit-section__actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        size=ButtonSize::Small
                        on_click=move |_| vm.select_all_problems()
                    >
                        "Seleccionar todos"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| vm.clear_problems()
                    >
                        "Limpiar"
                    </Button>
                </div>
            </div>

            <input
                type="text"
                class="form-control"
                placeholder="Buscar problema..."
                prop:value=move || vm.problem_filter.get()
                on:input=move |ev| vm.problem_filter.set(event_target_value(&ev))
            />

            <div class="problem-list">
                <For
                    each=move || visible.get()
                    key=|i| *i
                    children=move |i| {
                        let label = vm
                            .form
                            .with_untracked(|f| {
                                f.as_ref().and_then(|f| f.problems.get(i)).map(|p| p.label.clone())
                            })
                            .unwrap_or_default();
                        let id = format!("problem_{}", i);
                        view! {
                            <div class="problem-option">
                                <input
                                    type="checkbox"
                                    id=id.clone()
                                    class="problem-checkbox"
                                    prop:checked=move || {
                                        vm.form
                                            .with(|f| {
                                                f.as_ref().and_then(|f| f.problems.get(i)).map(|p| p.checked)
                                            })
                                            .unwrap_or(false)
                                    }
                                    on:change=move |ev| vm.toggle_problem(i, event_target_checked(&ev))
                                />
                                <label for=id>{label}</label>
                            </div>
                        }
                    }
                />
                <Show when=move || visible.with(|v| v.is_empty())>
                    <p class="text-muted">"Sin problemas que coincidan"</p>
                </Show>
            </div>

            <label class="form-label" for="selected_problems">"Problemas seleccionados"</label>
            <textarea
                id="selected_problems"
                class="form-control"
                readonly=true
                rows="2"
                prop:value=selected_text
            />
        </section>
    }
}
