use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::a001_ticket::{TicketId, TicketState};
use crate::domain::a002_spare_part::PartLines;
use crate::shared::number_format::{deserialize_amount, format_thousands};
use crate::shared::validation::TicketField;

/// Значение поля «документ техника» без назначенного техника
pub const UNASSIGNED_DOCUMENT: &str = "Sin asignar";
/// Техник выбран, но документ у него не заполнен
pub const MISSING_DOCUMENT: &str = "Sin documento";
/// Отказ редактировать завершённый тикет
pub const LOCKED_MESSAGE: &str = "No se puede editar un ticket en estado Terminado";

// ============================================================================
// Reference data
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianRef {
    pub name: String,
    #[serde(default)]
    pub document: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemOption {
    pub id: i64,
    pub label: String,
    #[serde(default)]
    pub checked: bool,
}

// ============================================================================
// Form
// ============================================================================

/// Состояние формы редактирования тикета
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketForm {
    pub ticket_id: TicketId,
    #[serde(default)]
    pub client_names: String,
    #[serde(default)]
    pub client_lastnames: String,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub mail: String,
    #[serde(default, rename = "IMEI", alias = "imei")]
    pub imei: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub technician: Option<TechnicianRef>,
    #[serde(default)]
    pub technical_document: String,
    pub state: TicketState,
    #[serde(default)]
    pub priority: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub service_value: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub problems: Vec<ProblemOption>,
    #[serde(default)]
    pub parts: PartLines,
}

/// Ответ `GET /tickets/api/ticket/<id>`
#[derive(Debug, Clone, Deserialize)]
pub struct TicketEditData {
    pub ticket: TicketForm,
    #[serde(default)]
    pub technicians: Vec<TechnicianRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("No se puede quitar el técnico de un ticket en estado \"{0}\".")]
    WorkStarted(TicketState),
}

impl TicketForm {
    /// Тикет в `Terminado` открывается только на чтение
    pub fn is_locked(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn check_editable(&self) -> Result<(), String> {
        if self.is_locked() {
            Err(LOCKED_MESSAGE.to_string())
        } else {
            Ok(())
        }
    }

    /// Назначение или снятие техника
    ///
    /// Выбор техника заполняет его документ и переводит `Sin asignar` в
    /// `Asignado`; на более поздних стадиях стадия не меняется. Снять техника
    /// можно только до начала работ.
    pub fn assign_technician(
        &mut self,
        technician: Option<TechnicianRef>,
    ) -> Result<(), AssignmentError> {
        match technician {
            Some(t) => {
                self.technical_document = if t.document.trim().is_empty() {
                    MISSING_DOCUMENT.to_string()
                } else {
                    t.document.clone()
                };
                if self.state < TicketState::Asignado {
                    self.state = TicketState::Asignado;
                }
                self.technician = Some(t);
                Ok(())
            }
            None => {
                if self.state > TicketState::Asignado {
                    return Err(AssignmentError::WorkStarted(self.state));
                }
                self.technician = None;
                self.technical_document = UNASSIGNED_DOCUMENT.to_string();
                self.state = TicketState::SinAsignar;
                Ok(())
            }
        }
    }

    pub fn selected_problems_text(&self) -> String {
        self.problems
            .iter()
            .filter(|p| p.checked)
            .map(|p| p.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn has_selected_problems(&self) -> bool {
        self.problems.iter().any(|p| p.checked)
    }

    /// Индексы проблем, чьи названия содержат `term` (без учёта регистра)
    pub fn visible_problems(&self, term: &str) -> Vec<usize> {
        let term = term.trim().to_lowercase();
        self.problems
            .iter()
            .enumerate()
            .filter(|(_, p)| term.is_empty() || p.label.to_lowercase().contains(&term))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn toggle_problem(&mut self, index: usize, checked: bool) {
        if let Some(p) = self.problems.get_mut(index) {
            p.checked = checked;
        }
    }

    /// Отмечает все видимые по фильтру проблемы
    pub fn select_all_visible(&mut self, term: &str) {
        for i in self.visible_problems(term) {
            self.problems[i].checked = true;
        }
    }

    pub fn clear_problems(&mut self) {
        for p in &mut self.problems {
            p.checked = false;
        }
    }

    pub fn spare_value(&self) -> i64 {
        self.parts.spare_total()
    }

    pub fn total(&self) -> i64 {
        self.parts.grand_total(self.service_value)
    }

    /// Сырые значения полей, как их видит живая валидация
    pub fn field_value(&self, field: TicketField) -> String {
        match field {
            TicketField::ClientNames => self.client_names.clone(),
            TicketField::ClientLastnames => self.client_lastnames.clone(),
            TicketField::Document => self.document.clone(),
            TicketField::Phone => self.phone.clone(),
            TicketField::Mail => self.mail.clone(),
            TicketField::Imei => self.imei.clone(),
            TicketField::ServiceValue => format_thousands(self.service_value),
        }
    }

    /// Проверка перед сохранением; собирает все сообщения
    pub fn validate_for_submit(&self) -> Result<(), Vec<String>> {
        let mut errors: Vec<String> = TicketField::ALL
            .iter()
            .filter(|f| **f != TicketField::ServiceValue)
            .filter_map(|f| f.check(&self.field_value(*f)).err())
            .collect();

        if self.service_value < 0 {
            errors.push("El valor del servicio debe ser un número positivo.".to_string());
        }
        if !self.has_selected_problems() {
            errors.push("Debe seleccionar al menos un problema.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Строки с кодом запчасти в том виде, в каком уходят на сервер
    fn part_submissions(&self) -> Vec<PartSubmission> {
        self.parts
            .lines()
            .iter()
            .filter(|l| l.has_part())
            .map(|l| {
                let quantity = l.normalized_quantity();
                PartSubmission {
                    code: l.code.clone(),
                    quantity,
                    unit_value: l.unit_price,
                    total_value: quantity.saturating_mul(l.unit_price),
                }
            })
            .collect()
    }

    /// `spare_value` и `total` считаются только по строкам из `parts`
    pub fn to_submission(&self) -> TicketSubmission {
        let parts = self.part_submissions();
        let spare_value = parts.iter().map(|p| p.total_value).sum::<i64>();
        TicketSubmission {
            client_names: self.client_names.trim().to_string(),
            client_lastnames: self.client_lastnames.trim().to_string(),
            document: self.document.trim().to_string(),
            phone: self.phone.trim().to_string(),
            mail: self.mail.trim().to_string(),
            imei: self.imei.trim().to_string(),
            technical_name: self
                .technician
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_default(),
            technical_document: self.technical_document.clone(),
            state: self.state,
            priority: self.priority.clone(),
            service_value: self.service_value,
            spare_value,
            total: spare_value.saturating_add(self.service_value),
            comment: self.comment.clone(),
            problems: self
                .problems
                .iter()
                .filter(|p| p.checked)
                .map(|p| p.id)
                .collect(),
            parts,
            redirect_after_save: true,
        }
    }
}

// ============================================================================
// Submission
// ============================================================================

/// Тело `POST /tickets/edit_ticket/<id>`: суммы: целые без форматирования
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketSubmission {
    pub client_names: String,
    pub client_lastnames: String,
    pub document: String,
    pub phone: String,
    pub mail: String,
    #[serde(rename = "IMEI")]
    pub imei: String,
    pub technical_name: String,
    pub technical_document: String,
    pub state: TicketState,
    pub priority: String,
    pub service_value: i64,
    pub spare_value: i64,
    pub total: i64,
    pub comment: String,
    pub problems: Vec<i64>,
    pub parts: Vec<PartSubmission>,
    pub redirect_after_save: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartSubmission {
    pub code: String,
    pub quantity: i64,
    pub unit_value: i64,
    pub total_value: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_spare_part::{PartLine, SparePart};

    fn form() -> TicketForm {
        serde_json::from_value(serde_json::json!({
            "ticket_id": 15,
            "client_names": "Ana",
            "document": "1020304050",
            "phone": "300 123 4567",
            "mail": "ana@correo.co",
            "IMEI": "356938035643809",
            "state": "Sin asignar",
            "priority": "Media",
            "service_value": "20000.00",
            "problems": [
                {"id": 1, "label": "Pantalla rota"},
                {"id": 2, "label": "No enciende"},
                {"id": 3, "label": "Pantalla con líneas"}
            ]
        }))
        .unwrap()
    }

    fn tech(document: &str) -> TechnicianRef {
        TechnicianRef {
            name: "Luis".into(),
            document: document.into(),
        }
    }

    #[test]
    fn test_assign_technician() {
        let mut f = form();
        f.assign_technician(Some(tech("8080"))).unwrap();
        assert_eq!(f.state, TicketState::Asignado);
        assert_eq!(f.technical_document, "8080");

        f.assign_technician(Some(tech(""))).unwrap();
        assert_eq!(f.technical_document, MISSING_DOCUMENT);

        f.assign_technician(None).unwrap();
        assert_eq!(f.state, TicketState::SinAsignar);
        assert_eq!(f.technical_document, UNASSIGNED_DOCUMENT);
    }

    #[test]
    fn test_assign_technician_keeps_later_states() {
        let mut f = form();
        f.state = TicketState::EnProceso;
        f.assign_technician(Some(tech("1"))).unwrap();
        assert_eq!(f.state, TicketState::EnProceso);
        assert_eq!(
            f.assign_technician(None),
            Err(AssignmentError::WorkStarted(TicketState::EnProceso))
        );
        assert!(f.technician.is_some());
    }

    #[test]
    fn test_problems_filtering() {
        let mut f = form();
        assert_eq!(f.visible_problems("PANTALLA"), vec![0, 2]);
        assert_eq!(f.visible_problems(""), vec![0, 1, 2]);

        f.select_all_visible("pantalla");
        assert_eq!(f.selected_problems_text(), "Pantalla rota, Pantalla con líneas");

        f.clear_problems();
        assert_eq!(f.selected_problems_text(), "");
    }

    #[test]
    fn test_totals_and_submission() {
        let mut f = form();
        let i = f.parts.push();
        f.parts.select_part(
            i,
            &SparePart {
                code: "B-1".into(),
                description: "Batería".into(),
                price: Some(30_000),
                stock: Some(4),
            },
        );
        f.parts.set_quantity(i, "2");
        f.parts.push(); // пустая строка не отправляется
        f.toggle_problem(1, true);

        assert_eq!(f.service_value, 20_000);
        assert_eq!(f.spare_value(), 60_000);
        assert_eq!(f.total(), 80_000);

        let sub = f.to_submission();
        assert_eq!(sub.total, 80_000);
        assert_eq!(sub.problems, vec![2]);
        assert_eq!(sub.parts.len(), 1);
        assert!(sub.redirect_after_save);
    }

    #[test]
    fn test_submission_sums_match_sent_parts() {
        let mut f = form();
        f.service_value = 10_000;
        f.parts = PartLines::new(vec![
            PartLine {
                code: "P1".into(),
                description: "Flex".into(),
                unit_price: 5_000,
                quantity: 0,
            },
            PartLine {
                code: "".into(),
                description: "Sin código".into(),
                unit_price: 7_000,
                quantity: 2,
            },
        ]);

        let sub = f.to_submission();
        let sent: i64 = sub.parts.iter().map(|p| p.total_value).sum();
        assert_eq!(sub.parts.len(), 1);
        assert_eq!(sub.parts[0].quantity, 1);
        assert_eq!(sub.spare_value, sent);
        assert_eq!(sub.spare_value, 5_000);
        assert_eq!(sub.total, 15_000);
    }

    #[test]
    fn test_validate_for_submit() {
        let mut f = form();
        assert_eq!(
            f.validate_for_submit(),
            Err(vec!["Debe seleccionar al menos un problema.".to_string()])
        );

        f.toggle_problem(0, true);
        assert!(f.validate_for_submit().is_ok());

        f.service_value = -1;
        f.mail = "sin-correo".into();
        let errors = f.validate_for_submit().unwrap_err();
        assert!(errors.contains(&"Ingrese un correo electrónico válido".to_string()));
        assert!(errors.contains(&"El valor del servicio debe ser un número positivo.".to_string()));
    }

    #[test]
    fn test_finished_ticket_is_locked() {
        let mut f = form();
        assert!(!f.is_locked());
        assert!(f.check_editable().is_ok());

        f.state = TicketState::EnRevision;
        assert!(!f.is_locked());

        f.state = TicketState::Terminado;
        assert!(f.is_locked());
        assert_eq!(f.check_editable(), Err(LOCKED_MESSAGE.to_string()));
    }
}
