use contracts::domain::a001_ticket::{TicketId, TicketModule};
use contracts::domain::a003_ticket_form::LOCKED_MESSAGE;
use contracts::shared::number_format::format_thousands;
use contracts::shared::validation::TicketField;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;

use super::attachments::AttachmentsSection;
use super::part_search::PartSearchDialog;
use super::parts::{reformat_amount_event, PartsSection};
use super::problems::ProblemsSection;
use super::view_model::TicketEditViewModel;
use crate::shared::api_utils::with_query;
use crate::shared::components::ToneBadge;
use crate::shared::dialog::use_dialog;
use crate::shared::icons::icon;
use crate::shared::nav::{query_param, FlashNotice};
use crate::shared::toast::use_toast;

#[component]
fn FieldInput(
    vm: TicketEditViewModel,
    field: TicketField,
    label: &'static str,
    #[prop(optional)] input_type: &'static str,
) -> impl IntoView {
    let input_type = if input_type.is_empty() { "text" } else { input_type };
    let error = move || vm.errors.with(|e| e.get(field));

    view! {
        <div class="form-group">
            <label for=field.name()>{label}</label>
            <input
                type=input_type
                id=field.name()
                name=field.name()
                class="form-control"
                class:is-invalid=move || error().is_some()
                prop:value=move || vm.field_value(field)
                on:input=move |ev| vm.set_field(field, event_target_value(&ev))
            />
            {move || error().map(|e| view! { <div class="invalid-feedback">{e}</div> })}
        </div>
    }
}

fn technician_name(vm: TicketEditViewModel) -> String {
    vm.form
        .with_untracked(|f| f.as_ref().and_then(|f| f.technician.as_ref().map(|t| t.name.clone())))
        .unwrap_or_default()
}

fn client_section(vm: TicketEditViewModel) -> impl IntoView {
    let product = move || vm.form.with(|f| f.as_ref().map(|f| f.product.clone())).unwrap_or_default();

    view! {
        <section class="edit-section">
            <h4>{icon("user")} " Cliente y equipo"</h4>
            <div class="form-grid">
                <FieldInput vm=vm field=TicketField::ClientNames label="Nombres"/>
                <FieldInput vm=vm field=TicketField::ClientLastnames label="Apellidos"/>
                <FieldInput vm=vm field=TicketField::Document label="Documento"/>
                <FieldInput vm=vm field=TicketField::Phone label="Teléfono" input_type="tel"/>
                <FieldInput vm=vm field=TicketField::Mail label="Correo electrónico" input_type="email"/>
                <FieldInput vm=vm field=TicketField::Imei label="IMEI / Serial"/>
                <div class="form-group">
                    <label for="product">"Producto"</label>
                    <input type="text" id="product" class="form-control" readonly=true prop:value=product/>
                </div>
            </div>
        </section>
    }
}

fn assignment_section(vm: TicketEditViewModel) -> impl IntoView {
    let document = move || {
        vm.form
            .with(|f| f.as_ref().map(|f| f.technical_document.clone()))
            .unwrap_or_default()
    };
    let priority = move || vm.form.with(|f| f.as_ref().map(|f| f.priority.clone())).unwrap_or_default();
    let state = move || vm.form.with(|f| f.as_ref().map(|f| f.state));
    let options = move || {
        let current = technician_name(vm);
        vm.technicians
            .get()
            .into_iter()
            .map(|t| {
                let selected = t.name == current;
                view! { <option value=t.name.clone() selected=selected>{t.name.clone()}</option> }
            })
            .collect_view()
    };

    view! {
        <section class="edit-section">
            <h4>{icon("cpu")} " Asignación"</h4>
            <div class="form-grid">
                <div class="form-group">
                    <label for="technical_name">"Técnico"</label>
                    <select
                        id="technical_name"
                        class="form-control"
                        on:change=move |ev| {
                            vm.change_technician(event_target_value(&ev));
                            // при отказе форма не меняется: возвращаем выбор вручную
                            if let Some(select) = ev
                                .target()
                                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                            {
                                select.set_value(&technician_name(vm));
                            }
                        }
                    >
                        <option value="" selected=move || technician_name(vm).is_empty()>
                            "Sin asignar"
                        </option>
                        {options}
                    </select>
                </div>
                <div class="form-group">
                    <label for="technical_document">"Documento del técnico"</label>
                    <input
                        type="text"
                        id="technical_document"
                        class="form-control"
                        readonly=true
                        prop:value=document
                    />
                </div>
                <div class="form-group">
                    <label>"Estado"</label>
                    <div>
                        {move || {
                            state()
                                .map(|s| view! { <ToneBadge tone=s.badge_tone() text=s.label().to_string()/> })
                        }}
                    </div>
                </div>
                <div class="form-group">
                    <label for="priority">"Prioridad"</label>
                    <input type="text" id="priority" class="form-control" readonly=true prop:value=priority/>
                </div>
            </div>
        </section>
    }
}

fn totals_section(vm: TicketEditViewModel) -> impl IntoView {
    let spare = move || vm.form.with(|f| f.as_ref().map(|f| f.spare_value())).unwrap_or(0);
    let total = move || vm.form.with(|f| f.as_ref().map(|f| f.total())).unwrap_or(0);
    let service_error = move || vm.errors.with(|e| e.get(TicketField::ServiceValue));
    let comment = move || vm.form.with(|f| f.as_ref().map(|f| f.comment.clone())).unwrap_or_default();

    let suggestions = move || {
        let items = vm.scale_suggestions();
        (!items.is_empty()).then(|| {
            view! {
                <MessageBar intent=MessageBarIntent::Warning>
                    <div class="scale-hint">
                        <strong>"Posibles valores multiplicados por 100"</strong>
                        {items
                            .into_iter()
                            .map(|s| {
                                view! {
                                    <div class="scale-hint__row">
                                        <span>
                                            {format!(
                                                "{}: {} → {}",
                                                s.label(),
                                                format_thousands(s.current),
                                                format_thousands(s.suggested),
                                            )}
                                        </span>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            size=ButtonSize::Small
                                            on_click=move |_| vm.apply_suggestion(s)
                                        >
                                            "Aplicar"
                                        </Button>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </MessageBar>
            }
        })
    };

    view! {
        <section class="edit-section">
            <h4>{icon("dollar")} " Valores"</h4>
            {suggestions}
            <div class="form-grid">
                <div class="form-group">
                    <label for="service_value">"Valor del servicio"</label>
                    <input
                        type="text"
                        inputmode="numeric"
                        id="service_value"
                        class="form-control"
                        class:is-invalid=move || service_error().is_some()
                        prop:value=move || vm.field_value(TicketField::ServiceValue)
                        on:input=move |ev| {
                            let value = reformat_amount_event(&ev);
                            vm.set_field(TicketField::ServiceValue, value);
                        }
                    />
                    {move || service_error().map(|e| view! { <div class="invalid-feedback">{e}</div> })}
                </div>
                <div class="form-group">
                    <label for="spare_value">"Valor repuestos"</label>
                    <input
                        type="text"
                        id="spare_value"
                        class="form-control"
                        readonly=true
                        prop:value=move || format_thousands(spare())
                    />
                </div>
                <div class="form-group">
                    <label for="total">"Total"</label>
                    <input
                        type="text"
                        id="total"
                        class="form-control form-control--total"
                        readonly=true
                        prop:value=move || format_thousands(total())
                    />
                </div>
            </div>
            <div class="form-group">
                <label for="comment">"Comentario"</label>
                <textarea
                    id="comment"
                    class="form-control"
                    rows="3"
                    prop:value=comment
                    on:input=move |ev| vm.set_comment(event_target_value(&ev))
                />
            </div>
        </section>
    }
}

/// Страница редактирования тикета
///
/// `?from=<module>` задаёт список, в который вернуться после сохранения.
#[component]
pub fn TicketEditPage(id: TicketId) -> impl IntoView {
    let location = use_location();
    let navigate = StoredValue::new_local(use_navigate());

    let module = query_param(&location.search.get_untracked(), "from")
        .and_then(|key| TicketModule::from_key(&key))
        .unwrap_or(TicketModule::TechnicalService);

    let vm = TicketEditViewModel::new(id, module, use_toast(), use_dialog());
    vm.load();

    let on_saved = Callback::new(move |_: ()| {
        let url = with_query(&module.page_path(), &FlashNotice::TicketUpdated.param());
        navigate.with_value(|nav| nav(&url, NavigateOptions::default()));
    });

    let loaded = move || vm.form.with(|f| f.is_some());

    view! {
        <div class="page ticket-edit">
            <div class="page__header">
                <h2>{icon("edit")} {format!(" Editar ticket #{}", id)}</h2>
                <a class="btn btn-outline" href=module.page_path()>
                    {icon("chevron-left")}
                    {format!(" Volver a {}", module.title())}
                </a>
            </div>

            {move || {
                vm.load_error
                    .get()
                    .map(|e| {
                        view! {
                            <MessageBar intent=MessageBarIntent::Error>
                                {format!("No se pudo cargar el ticket: {}", e)}
                            </MessageBar>
                        }
                    })
            }}

            <Show
                when=loaded
                fallback=move || {
                    view! {
                        <Show when=move || vm.load_error.with(|e| e.is_none())>
                            <div class="page__loading">
                                <Spinner label="Cargando ticket..."/>
                            </div>
                        </Show>
                    }
                }
            >
                <form class="ticket-form" on:submit=move |ev| {
                    ev.prevent_default();
                    vm.save_command(on_saved);
                }>
                    <Show when=move || vm.is_locked()>
                        <MessageBar intent=MessageBarIntent::Warning>{LOCKED_MESSAGE}</MessageBar>
                    </Show>
                    // disabled fieldset блокирует все вложенные поля и кнопки
                    <fieldset class="ticket-form__body" disabled=move || vm.is_locked()>
                        {client_section(vm)}
                        {assignment_section(vm)}
                        <ProblemsSection vm=vm/>
                        <PartsSection vm=vm/>
                        {totals_section(vm)}
                        <AttachmentsSection vm=vm/>
                    </fieldset>

                    {move || {
                        let errors = vm.submit_errors.get();
                        (!errors.is_empty())
                            .then(|| {
                                view! {
                                    <MessageBar intent=MessageBarIntent::Error>
                                        <ul class="form-errors">
                                            {errors
                                                .into_iter()
                                                .map(|e| view! { <li>{e}</li> })
                                                .collect_view()}
                                        </ul>
                                    </MessageBar>
                                }
                            })
                    }}

                    <div class="details-actions">
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || vm.saving.get() || vm.is_locked()
                        >
                            {icon("download")}
                            {move || if vm.saving.get() { " Guardando..." } else { " Guardar cambios" }}
                        </button>
                        <a class="btn btn-secondary" href=module.page_path()>
                            {icon("x")}
                            " Cancelar"
                        </a>
                    </div>
                </form>
                <PartSearchDialog vm=vm/>
            </Show>
        </div>
    }
}
