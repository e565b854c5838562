use contracts::domain::a001_ticket::{TicketId, TicketModule};
use contracts::domain::a002_spare_part::{part_search_term, SparePart};
use contracts::domain::a003_ticket_form::{TechnicianRef, TicketForm};
use contracts::shared::number_format::unformat;
use contracts::shared::validation::TicketField;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::model::{scale_suggestions, Attachment, FieldErrors, PartSearchState, ScaleSuggestion};
use crate::domain::a001_ticket::api;
use crate::shared::config::client_config;
use crate::shared::debounce::Debouncer;
use crate::shared::dialog::{DialogService, DialogTone};
use crate::shared::toast::ToastService;

const NOT_ALLOWED: &str = "Acción no permitida";

/// ViewModel редактора тикета
///
/// Все поля `Copy`, поэтому модель свободно захватывается обработчиками.
#[derive(Clone, Copy)]
pub struct TicketEditViewModel {
    pub id: TicketId,
    /// Список, в который вернуться после сохранения
    pub module: TicketModule,
    pub form: RwSignal<Option<TicketForm>>,
    pub technicians: RwSignal<Vec<TechnicianRef>>,
    pub errors: RwSignal<FieldErrors>,
    pub load_error: RwSignal<Option<String>>,
    /// Ошибки последней попытки отправки
    pub submit_errors: RwSignal<Vec<String>>,
    pub saving: RwSignal<bool>,
    pub problem_filter: RwSignal<String>,
    pub attachments: RwSignal<Vec<Attachment>>,
    /// Строка, для которой открыт поиск запчасти
    pub search_row: RwSignal<Option<usize>>,
    pub search_input: RwSignal<String>,
    pub search: RwSignal<PartSearchState>,
    search_debounce: Debouncer,
    toast: ToastService,
    dialog: DialogService,
}

impl TicketEditViewModel {
    pub fn new(
        id: TicketId,
        module: TicketModule,
        toast: ToastService,
        dialog: DialogService,
    ) -> Self {
        Self {
            id,
            module,
            form: RwSignal::new(None),
            technicians: RwSignal::new(Vec::new()),
            errors: RwSignal::new(FieldErrors::default()),
            load_error: RwSignal::new(None),
            submit_errors: RwSignal::new(Vec::new()),
            saving: RwSignal::new(false),
            problem_filter: RwSignal::new(String::new()),
            attachments: RwSignal::new(Vec::new()),
            search_row: RwSignal::new(None),
            search_input: RwSignal::new(String::new()),
            search: RwSignal::new(PartSearchState::Idle),
            search_debounce: Debouncer::new(client_config().ui.part_search_debounce_ms),
            toast,
            dialog,
        }
    }

    /// Загрузить карточку и список техников
    pub fn load(&self) {
        let vm = *self;
        spawn_local(async move {
            match api::fetch_ticket(vm.id).await {
                Ok(data) => {
                    vm.technicians.set(data.technicians);
                    vm.form.set(Some(data.ticket));
                    vm.load_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load ticket {}: {}", vm.id, e);
                    vm.load_error.set(Some(e));
                }
            }
        });
    }

    /// Завершённый тикет открыт только на чтение
    pub fn is_locked(&self) -> bool {
        self.form
            .with(|f| f.as_ref().map(TicketForm::is_locked))
            .unwrap_or(false)
    }

    fn is_locked_untracked(&self) -> bool {
        self.form
            .with_untracked(|f| f.as_ref().map(TicketForm::is_locked))
            .unwrap_or(false)
    }

    fn edit(&self, f: impl FnOnce(&mut TicketForm)) {
        self.form.update(|form| {
            if let Some(form) = form.as_mut().filter(|form| !form.is_locked()) {
                f(form);
            }
        });
    }

    // ------------------------------------------------------------------
    // поля
    // ------------------------------------------------------------------

    pub fn field_value(&self, field: TicketField) -> String {
        self.form
            .with(|f| f.as_ref().map(|f| f.field_value(field)))
            .unwrap_or_default()
    }

    /// Новое значение поля с живой проверкой
    pub fn set_field(&self, field: TicketField, value: String) {
        self.errors.update(|e| {
            e.check(field, &value);
        });
        self.edit(|f| match field {
            TicketField::ClientNames => f.client_names = value,
            TicketField::ClientLastnames => f.client_lastnames = value,
            TicketField::Document => f.document = value,
            TicketField::Phone => f.phone = value,
            TicketField::Mail => f.mail = value,
            TicketField::Imei => f.imei = value,
            TicketField::ServiceValue => f.service_value = unformat(&value),
        });
    }

    pub fn set_comment(&self, value: String) {
        self.edit(|f| f.comment = value);
    }

    // ------------------------------------------------------------------
    // техник
    // ------------------------------------------------------------------

    /// Выбор техника в списке; пустое имя снимает назначение
    pub fn change_technician(&self, name: String) {
        if self.is_locked_untracked() {
            return;
        }
        let technician = if name.is_empty() {
            None
        } else {
            let found = self
                .technicians
                .with_untracked(|ts| ts.iter().find(|t| t.name == name).cloned());
            if found.is_none() {
                log::warn!("Unknown technician selected: {}", name);
                return;
            }
            found
        };

        let notice = match &technician {
            Some(t) => format!("Técnico cambiado a: {}", t.name),
            None => "Estado cambiado a: Sin asignar".to_string(),
        };

        // update уведомляет подписчиков и при отказе: select вернётся к прежнему технику
        let result = self
            .form
            .try_update(|f| f.as_mut().map(|f| f.assign_technician(technician)))
            .flatten();
        match result {
            Some(Ok(())) => self.toast.info(notice),
            Some(Err(e)) => self.dialog.alert(DialogTone::Warning, NOT_ALLOWED, e.to_string()),
            None => {}
        }
    }

    // ------------------------------------------------------------------
    // проблемы
    // ------------------------------------------------------------------

    pub fn toggle_problem(&self, index: usize, checked: bool) {
        self.edit(|f| f.toggle_problem(index, checked));
    }

    pub fn select_all_problems(&self) {
        let term = self.problem_filter.get_untracked();
        self.edit(|f| f.select_all_visible(&term));
    }

    pub fn clear_problems(&self) {
        self.edit(|f| f.clear_problems());
    }

    // ------------------------------------------------------------------
    // запчасти
    // ------------------------------------------------------------------

    pub fn add_part(&self) {
        self.edit(|f| {
            f.parts.push();
        });
        self.toast.success("Repuesto agregado correctamente");
    }

    pub fn confirm_remove_part(&self, index: usize) {
        let label = self
            .form
            .with_untracked(|f| {
                f.as_ref()
                    .and_then(|f| f.parts.get(index))
                    .filter(|l| l.has_part())
                    .map(|l| l.display_label())
            })
            .unwrap_or_else(|| "Repuesto".to_string());

        let vm = *self;
        self.dialog.confirm(
            "¿Eliminar repuesto?",
            "¿Estás seguro de eliminar este repuesto?",
            "Sí, eliminar",
            move |accepted| {
                if !accepted {
                    return;
                }
                vm.edit(|f| {
                    f.parts.remove(index);
                });
                vm.toast
                    .success(format!("Repuesto \"{}\" eliminado correctamente", label));
            },
        );
    }

    pub fn set_part_quantity(&self, index: usize, raw: String) {
        self.edit(|f| f.parts.set_quantity(index, &raw));
    }

    /// Пустое или меньше 1 количество при потере фокуса становится 1
    pub fn normalize_part_quantity(&self, index: usize) {
        self.edit(|f| f.parts.normalize_quantity(index));
    }

    pub fn set_part_price(&self, index: usize, raw: String) {
        self.edit(|f| f.parts.set_unit_price(index, &raw));
    }

    // ------------------------------------------------------------------
    // поиск запчастей
    // ------------------------------------------------------------------

    pub fn open_part_search(&self, index: usize) {
        self.search_debounce.cancel();
        self.search_input.set(String::new());
        self.search.set(PartSearchState::Idle);
        self.search_row.set(Some(index));
    }

    pub fn close_part_search(&self) {
        self.search_debounce.cancel();
        self.search_row.set(None);
    }

    /// Ввод в окне поиска; запрос уходит после паузы и только от 3 символов
    pub fn input_part_search(&self, raw: String) {
        self.search_input.set(raw.clone());
        match part_search_term(&raw) {
            Some(term) => {
                let vm = *self;
                self.search_debounce.call(move || vm.run_part_search(term));
            }
            None => {
                self.search_debounce.cancel();
                self.search.set(PartSearchState::Idle);
            }
        }
    }

    fn run_part_search(&self, term: String) {
        self.search.set(PartSearchState::begin(&term));
        let search = self.search;
        spawn_local(async move {
            let result = api::search_spare_parts(&term).await.map(|r| r.parts);
            if let Err(e) = &result {
                log::error!("Spare part search '{}' failed: {}", term, e);
            }
            search.update(|s| {
                s.finish(&term, result);
            });
        });
    }

    pub fn select_part(&self, part: SparePart) {
        let Some(row) = self.search_row.get_untracked() else {
            self.toast
                .error("Error: No se pudo identificar la fila a actualizar");
            return;
        };
        self.edit(|f| f.parts.select_part(row, &part));
        self.close_part_search();
        self.toast.success(format!(
            "Repuesto \"{}\" agregado correctamente",
            part.description
        ));
    }

    // ------------------------------------------------------------------
    // вложения
    // ------------------------------------------------------------------

    /// Новый набор изображений заменяет прежний
    pub fn replace_attachments(&self, files: Vec<Attachment>) {
        let old = self.attachments.get_untracked();
        old.iter().for_each(revoke_preview);
        self.attachments.set(files);
    }

    pub fn remove_attachment(&self, index: usize) {
        self.attachments.update(|files| {
            if index < files.len() {
                let removed = files.remove(index);
                revoke_preview(&removed);
            }
        });
    }

    // ------------------------------------------------------------------
    // суммы
    // ------------------------------------------------------------------

    pub fn scale_suggestions(&self) -> Vec<ScaleSuggestion> {
        let policy = client_config().ui.scale_correction;
        self.form
            .with(|f| f.as_ref().map(|f| scale_suggestions(policy, f)))
            .unwrap_or_default()
    }

    pub fn apply_suggestion(&self, suggestion: ScaleSuggestion) {
        self.edit(|f| suggestion.apply(f));
    }

    // ------------------------------------------------------------------
    // сохранение
    // ------------------------------------------------------------------

    /// Проверка, подтверждение и отправка; `on_saved` после ответа сервера
    pub fn save_command(&self, on_saved: Callback<()>) {
        let Some(current) = self.form.get_untracked() else {
            return;
        };
        if let Err(message) = current.check_editable() {
            log::warn!("Ticket {} is finished, save refused", self.id);
            self.dialog.alert(DialogTone::Warning, NOT_ALLOWED, message);
            return;
        }

        self.errors.update(|e| e.check_all(&current));
        if let Err(errors) = current.validate_for_submit() {
            log::warn!("Ticket {} form has {} errors", self.id, errors.len());
            self.submit_errors.set(errors);
            self.toast.error("Hay errores en el formulario");
            return;
        }
        self.submit_errors.set(Vec::new());

        let vm = *self;
        self.dialog.confirm(
            "¿Guardar cambios?",
            "¿Estás seguro de guardar los cambios en este ticket?",
            "Sí, guardar",
            move |accepted| {
                if accepted {
                    vm.submit(on_saved);
                }
            },
        );
    }

    fn submit(&self, on_saved: Callback<()>) {
        let Some(submission) = self.form.with_untracked(|f| f.as_ref().map(|f| f.to_submission()))
        else {
            return;
        };
        if self.saving.get_untracked() {
            return;
        }
        self.saving.set(true);

        let vm = *self;
        spawn_local(async move {
            let result = api::save_ticket(vm.id, &submission).await;
            vm.saving.set(false);
            match result {
                Ok(_) => on_saved.run(()),
                Err(e) => {
                    log::error!("Failed to save ticket {}: {}", vm.id, e);
                    vm.dialog.alert(DialogTone::Error, "Error al guardar", e);
                }
            }
        });
    }
}

fn revoke_preview(file: &Attachment) {
    if let Some(url) = &file.preview_url {
        if let Err(e) = web_sys::Url::revoke_object_url(url) {
            log::warn!("Failed to revoke preview URL: {:?}", e);
        }
    }
}
