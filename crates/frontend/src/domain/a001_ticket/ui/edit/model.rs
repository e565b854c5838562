//! Состояние редактора вне самой формы: ошибки полей, поиск запчастей,
//! вложения и подсказки по суммам

use std::collections::HashMap;

use contracts::domain::a002_spare_part::SparePart;
use contracts::domain::a003_ticket_form::TicketForm;
use contracts::shared::number_format::ScaleCorrection;
use contracts::shared::validation::{AttachmentMeta, TicketField};

/// Последний результат живой проверки каждого поля
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: HashMap<TicketField, String>,
}

impl FieldErrors {
    /// Проверить значение и запомнить результат; `true`: поле валидно
    pub fn check(&mut self, field: TicketField, raw: &str) -> bool {
        match field.check(raw) {
            Ok(()) => {
                self.errors.remove(&field);
                true
            }
            Err(message) => {
                self.errors.insert(field, message);
                false
            }
        }
    }

    /// Проверить все поля формы разом (перед отправкой)
    pub fn check_all(&mut self, form: &TicketForm) {
        for field in TicketField::ALL {
            self.check(field, &form.field_value(field));
        }
    }

    pub fn get(&self, field: TicketField) -> Option<String> {
        self.errors.get(&field).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Окно поиска запчастей
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PartSearchState {
    /// Подсказка «введите минимум 3 символа»
    #[default]
    Idle,
    Loading {
        term: String,
    },
    Found {
        term: String,
        parts: Vec<SparePart>,
    },
    Empty {
        term: String,
    },
    Failed {
        message: String,
    },
}

impl PartSearchState {
    pub fn begin(term: &str) -> Self {
        PartSearchState::Loading {
            term: term.to_string(),
        }
    }

    /// Применить ответ, если он относится к последнему запросу
    ///
    /// Возвращает `false`, если за время запроса пользователь ввёл другое.
    pub fn finish(&mut self, term: &str, result: Result<Vec<SparePart>, String>) -> bool {
        match self {
            PartSearchState::Loading { term: current } if current == term => {}
            _ => return false,
        }
        *self = match result {
            Ok(parts) if parts.is_empty() => PartSearchState::Empty {
                term: term.to_string(),
            },
            Ok(parts) => PartSearchState::Found {
                term: term.to_string(),
                parts,
            },
            Err(message) => PartSearchState::Failed { message },
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PartSearchState::Loading { .. })
    }

    pub fn count_text(&self) -> Option<String> {
        match self {
            PartSearchState::Found { parts, .. } => {
                Some(format!("Se encontraron {} repuestos", parts.len()))
            }
            _ => None,
        }
    }
}

/// Выбранное изображение и его object URL для превью
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub meta: AttachmentMeta,
    pub preview_url: Option<String>,
}

/// Какая сумма формы выглядит умноженной на 100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleTarget {
    Service,
    Part(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleSuggestion {
    pub target: ScaleTarget,
    pub current: i64,
    pub suggested: i64,
}

impl ScaleSuggestion {
    pub fn label(&self) -> String {
        match self.target {
            ScaleTarget::Service => "Valor del servicio".to_string(),
            ScaleTarget::Part(i) => format!("Repuesto #{}", i + 1),
        }
    }

    pub fn apply(&self, form: &mut TicketForm) {
        match self.target {
            ScaleTarget::Service => form.service_value = self.suggested,
            ScaleTarget::Part(i) => {
                form.parts.set_unit_price(i, &self.suggested.to_string());
            }
        }
    }
}

/// Подсказки исправления сумм по выбранной политике; при `Disabled` пусто
pub fn scale_suggestions(policy: ScaleCorrection, form: &TicketForm) -> Vec<ScaleSuggestion> {
    let service = policy
        .suggest(form.service_value, &form.service_value.to_string())
        .map(|suggested| ScaleSuggestion {
            target: ScaleTarget::Service,
            current: form.service_value,
            suggested,
        });

    let parts = form.parts.lines().iter().enumerate().filter_map(|(i, line)| {
        policy
            .suggest(line.unit_price, &line.unit_price.to_string())
            .map(|suggested| ScaleSuggestion {
                target: ScaleTarget::Part(i),
                current: line.unit_price,
                suggested,
            })
    });

    service.into_iter().chain(parts).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> TicketForm {
        serde_json::from_value(serde_json::json!({
            "ticket_id": 7,
            "client_names": "Ana",
            "document": "1020304050",
            "mail": "ana@correo.co",
            "IMEI": "356938035643809",
            "state": "Asignado",
            "service_value": 25300,
            "parts": [
                {"code": "A1", "unit_price": 9800, "quantity": 1},
                {"code": "A2", "unit_price": 48700, "quantity": 2}
            ]
        }))
        .unwrap()
    }

    fn part(code: &str) -> SparePart {
        SparePart {
            code: code.into(),
            description: "Pantalla".into(),
            price: Some(10_000),
            stock: None,
        }
    }

    #[test]
    fn test_field_errors_follow_last_check() {
        let mut errors = FieldErrors::default();
        assert!(!errors.check(TicketField::Mail, "sin-arroba"));
        assert!(errors.get(TicketField::Mail).is_some());

        assert!(errors.check(TicketField::Mail, "ana@correo.co"));
        assert_eq!(errors.get(TicketField::Mail), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_check_all_on_valid_form() {
        let mut errors = FieldErrors::default();
        errors.check_all(&form());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_part_search_ignores_stale_response() {
        let mut state = PartSearchState::begin("pant");
        assert!(!state.finish("pan", Ok(vec![part("X")])));
        assert!(state.is_loading());

        assert!(state.finish("pant", Ok(vec![part("X"), part("Y")])));
        assert_eq!(state.count_text().as_deref(), Some("Se encontraron 2 repuestos"));
    }

    #[test]
    fn test_part_search_empty_and_failed() {
        let mut state = PartSearchState::begin("bat");
        state.finish("bat", Ok(Vec::new()));
        assert_eq!(state, PartSearchState::Empty { term: "bat".into() });

        let mut state = PartSearchState::begin("bat");
        state.finish("bat", Err("HTTP 500".into()));
        assert_eq!(state, PartSearchState::Failed { message: "HTTP 500".into() });
        assert_eq!(state.count_text(), None);
    }

    #[test]
    fn test_scale_suggestions_disabled_by_default() {
        assert!(scale_suggestions(ScaleCorrection::default(), &form()).is_empty());
    }

    #[test]
    fn test_scale_suggestions_legacy_heuristic() {
        let mut f = form();
        let suggestions = scale_suggestions(ScaleCorrection::LegacyHeuristic, &f);
        assert_eq!(
            suggestions,
            vec![
                ScaleSuggestion {
                    target: ScaleTarget::Service,
                    current: 25_300,
                    suggested: 253,
                },
                ScaleSuggestion {
                    target: ScaleTarget::Part(1),
                    current: 48_700,
                    suggested: 487,
                },
            ]
        );

        suggestions[1].apply(&mut f);
        assert_eq!(f.parts.get(1).map(|l| l.unit_price), Some(487));
        assert_eq!(suggestions[1].label(), "Repuesto #2");
    }
}
