use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::common::AggregateId;

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор тикета (целое число на стороне backend)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub i64);

impl TicketId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for TicketId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(TicketId::new)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Badge tones
// ============================================================================

/// Цвет бейджа (классы `badge-*` общей таблицы стилей)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Info,
    Warning,
    Success,
    Danger,
    Secondary,
}

impl BadgeTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeTone::Info => "badge badge-info",
            BadgeTone::Warning => "badge badge-warning",
            BadgeTone::Success => "badge badge-success",
            BadgeTone::Danger => "badge badge-danger",
            BadgeTone::Secondary => "badge badge-secondary",
        }
    }
}

// ============================================================================
// Ticket state
// ============================================================================

/// Стадия жизненного цикла тикета; порядок строгий, назад переходить нельзя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TicketState {
    #[serde(rename = "Sin asignar")]
    SinAsignar,
    #[serde(rename = "Asignado")]
    Asignado,
    #[serde(rename = "En proceso")]
    EnProceso,
    #[serde(rename = "En Revision")]
    EnRevision,
    #[serde(rename = "Terminado")]
    Terminado,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Estado desconocido: {0}")]
pub struct UnknownState(pub String);

impl TicketState {
    pub const ALL: [TicketState; 5] = [
        TicketState::SinAsignar,
        TicketState::Asignado,
        TicketState::EnProceso,
        TicketState::EnRevision,
        TicketState::Terminado,
    ];

    /// Порядковый номер стадии (1..=5)
    pub fn order(&self) -> u8 {
        match self {
            TicketState::SinAsignar => 1,
            TicketState::Asignado => 2,
            TicketState::EnProceso => 3,
            TicketState::EnRevision => 4,
            TicketState::Terminado => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketState::SinAsignar => "Sin asignar",
            TicketState::Asignado => "Asignado",
            TicketState::EnProceso => "En proceso",
            TicketState::EnRevision => "En Revision",
            TicketState::Terminado => "Terminado",
        }
    }

    /// Завершённый тикет больше не редактируется
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketState::Terminado)
    }

    pub fn badge_tone(&self) -> BadgeTone {
        match self {
            TicketState::EnProceso => BadgeTone::Warning,
            TicketState::Asignado | TicketState::EnRevision => BadgeTone::Info,
            TicketState::SinAsignar => BadgeTone::Secondary,
            TicketState::Terminado => BadgeTone::Success,
        }
    }
}

impl fmt::Display for TicketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TicketState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace("revisión", "revision");
        TicketState::ALL
            .into_iter()
            .find(|state| state.label().to_lowercase() == needle)
            .ok_or_else(|| UnknownState(s.to_string()))
    }
}

// ============================================================================
// Priority / service type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Alta,
    Media,
    Baja,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Alta, Priority::Media, Priority::Baja];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Alta => "Alta",
            Priority::Media => "Media",
            Priority::Baja => "Baja",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Priority::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
    }

    pub fn badge_tone(&self) -> BadgeTone {
        match self {
            Priority::Alta => BadgeTone::Danger,
            Priority::Media => BadgeTone::Warning,
            Priority::Baja => BadgeTone::Success,
        }
    }
}

/// Бейдж приоритета по сырой строке сервера
pub fn priority_tone(raw: &str) -> BadgeTone {
    Priority::parse(raw)
        .map(|p| p.badge_tone())
        .unwrap_or(BadgeTone::Secondary)
}

/// Тип обслуживания: ST: сервис, RI: внутренний ремонт, GA: гарантия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    TechnicalService,
    InternalRepair,
    Warranty,
    NotApplicable,
}

impl ServiceType {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceType::TechnicalService => "ST",
            ServiceType::InternalRepair => "RI",
            ServiceType::Warranty => "GA",
            ServiceType::NotApplicable => "N/A",
        }
    }

    /// Код или устаревшая числовая метка (`"0"`, `"1"`, `"2"`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "ST" | "0" => Some(ServiceType::TechnicalService),
            "RI" | "1" => Some(ServiceType::InternalRepair),
            "GA" | "2" => Some(ServiceType::Warranty),
            "N/A" => Some(ServiceType::NotApplicable),
            _ => None,
        }
    }

    pub fn badge_tone(&self) -> BadgeTone {
        match self {
            ServiceType::TechnicalService => BadgeTone::Info,
            ServiceType::InternalRepair => BadgeTone::Warning,
            ServiceType::Warranty => BadgeTone::Success,
            ServiceType::NotApplicable => BadgeTone::Secondary,
        }
    }
}

/// Подпись для графиков: числовые метки переводятся в коды
pub fn service_type_label(raw: &str) -> String {
    ServiceType::parse(raw)
        .map(|t| t.code().to_string())
        .unwrap_or_else(|| raw.to_string())
}

// ============================================================================
// List row
// ============================================================================

/// Строка списка тикетов
///
/// Состояние и приоритет хранятся сырыми строками: сервер может прислать
/// стадию, которой нет в цепочке (например, `"Recibido"`), и строка всё равно
/// должна отобразиться.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRow {
    pub id: TicketId,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub technician: String,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub imei: String,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub assigned: Option<String>,
    #[serde(default)]
    pub in_progress: Option<String>,
    #[serde(default)]
    pub in_revision: Option<String>,
    #[serde(default)]
    pub finished: Option<String>,
}

impl TicketRow {
    pub fn parsed_state(&self) -> Option<TicketState> {
        self.state.parse().ok()
    }

    /// Редактирование закрыто после `Terminado`
    pub fn can_edit(&self) -> bool {
        !matches!(self.parsed_state(), Some(TicketState::Terminado))
    }

    pub fn timestamp_for(&self, state: TicketState) -> Option<&str> {
        let value = match state {
            TicketState::SinAsignar => self.creation_date.as_ref(),
            TicketState::Asignado => self.assigned.as_ref(),
            TicketState::EnProceso => self.in_progress.as_ref(),
            TicketState::EnRevision => self.in_revision.as_ref(),
            TicketState::Terminado => self.finished.as_ref(),
        };
        value.map(String::as_str).filter(|s| !s.is_empty())
    }

    /// Отметка времени текущей стадии
    ///
    /// Для известной стадии показывается только её собственная отметка;
    /// дата создания подставляется лишь для стадий вне цепочки.
    pub fn current_timestamp(&self) -> Option<&str> {
        match self.parsed_state() {
            Some(state) => self.timestamp_for(state),
            None => self.creation_date.as_deref().filter(|s| !s.is_empty()),
        }
    }

    /// Фиксирует новую стадию после подтверждения сервера
    ///
    /// Отметку времени новой стадии сервер не возвращает, до перезагрузки
    /// списка ячейка остаётся пустой.
    pub fn apply_state(&mut self, state: TicketState) {
        self.state = state.label().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_order_matches_ord() {
        for a in TicketState::ALL {
            for b in TicketState::ALL {
                assert_eq!(a.order() < b.order(), a < b);
            }
        }
    }

    #[test]
    fn test_state_parse() {
        assert_eq!("En proceso".parse::<TicketState>(), Ok(TicketState::EnProceso));
        assert_eq!(" terminado ".parse::<TicketState>(), Ok(TicketState::Terminado));
        assert_eq!("En Revisión".parse::<TicketState>(), Ok(TicketState::EnRevision));
        assert!("Recibido".parse::<TicketState>().is_err());
        for s in TicketState::ALL {
            assert_eq!(s.label().parse::<TicketState>(), Ok(s));
        }
    }

    #[test]
    fn test_state_serde_uses_labels() {
        assert_eq!(
            serde_json::to_string(&TicketState::SinAsignar).unwrap(),
            "\"Sin asignar\""
        );
        let s: TicketState = serde_json::from_str("\"En Revision\"").unwrap();
        assert_eq!(s, TicketState::EnRevision);
    }

    #[test]
    fn test_badges() {
        assert_eq!(TicketState::EnProceso.badge_tone(), BadgeTone::Warning);
        assert_eq!(TicketState::SinAsignar.badge_tone(), BadgeTone::Secondary);
        assert_eq!(priority_tone("Alta"), BadgeTone::Danger);
        assert_eq!(priority_tone("??"), BadgeTone::Secondary);
    }

    #[test]
    fn test_service_type_labels() {
        assert_eq!(service_type_label("0"), "ST");
        assert_eq!(service_type_label("1"), "RI");
        assert_eq!(service_type_label("2"), "GA");
        assert_eq!(service_type_label("GA"), "GA");
        assert_eq!(service_type_label("Otro"), "Otro");
    }

    #[test]
    fn test_row_can_edit() {
        let mut row: TicketRow =
            serde_json::from_str(r#"{"id": 7, "state": "En proceso", "priority": "Alta"}"#).unwrap();
        assert!(row.can_edit());
        row.apply_state(TicketState::Terminado);
        assert!(!row.can_edit());

        row.state = "Recibido".into();
        assert!(row.can_edit());
        assert_eq!(row.parsed_state(), None);
    }

    #[test]
    fn test_row_timestamps() {
        let row: TicketRow = serde_json::from_str(
            r#"{"id": 1, "state": "Asignado", "creation_date": "2024-01-01 10:00", "assigned": "2024-01-02 09:30"}"#,
        )
        .unwrap();
        assert_eq!(row.current_timestamp(), Some("2024-01-02 09:30"));
        assert_eq!(row.timestamp_for(TicketState::Terminado), None);
    }

    #[test]
    fn test_committed_state_has_no_borrowed_timestamp() {
        let mut row: TicketRow = serde_json::from_str(
            r#"{"id": 3, "state": "Sin asignar", "creation_date": "2024-01-01 10:00"}"#,
        )
        .unwrap();
        assert_eq!(row.current_timestamp(), Some("2024-01-01 10:00"));

        row.apply_state(TicketState::EnProceso);
        assert_eq!(row.current_timestamp(), None);

        row.in_progress = Some("2024-01-03 08:00".into());
        assert_eq!(row.current_timestamp(), Some("2024-01-03 08:00"));

        row.state = "Recibido".into();
        assert_eq!(row.current_timestamp(), Some("2024-01-01 10:00"));
    }
}
