use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Reporting period of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Today,
    Week,
    Month,
    Quarter,
    Year,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Period {
    /// Preset buttons, in display order
    pub const PRESETS: [Period; 5] = [
        Period::Today,
        Period::Week,
        Period::Month,
        Period::Quarter,
        Period::Year,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
            Period::Custom { .. } => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "Hoy",
            Period::Week => "Semana",
            Period::Month => "Mes",
            Period::Quarter => "Trimestre",
            Period::Year => "Año",
            Period::Custom { .. } => "Personalizado",
        }
    }

    /// A single day has no timeline to draw
    pub fn shows_timeline(&self) -> bool {
        !matches!(self, Period::Today)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Period::Custom { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Por favor selecciona ambas fechas")]
    Incomplete,
    #[error("Formato de fecha inválido: {0}")]
    InvalidDate(String),
    #[error("La fecha de inicio debe ser anterior a la fecha de fin")]
    StartAfterEnd,
}

impl RangeError {
    /// Title of the warning dialog
    pub fn title(&self) -> &'static str {
        match self {
            RangeError::Incomplete => "Fechas incompletas",
            RangeError::InvalidDate(_) | RangeError::StartAfterEnd => "Fechas inválidas",
        }
    }
}

/// Validates `YYYY-MM-DD` inputs of the custom range picker
pub fn validate_custom_range(start: &str, end: &str) -> Result<Period, RangeError> {
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() || end.is_empty() {
        return Err(RangeError::Incomplete);
    }
    let parse = |s: &str| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RangeError::InvalidDate(s.to_string()))
    };
    let (start, end) = (parse(start)?, parse(end)?);
    if start > end {
        return Err(RangeError::StartAfterEnd);
    }
    Ok(Period::Custom { start, end })
}

/// Query parameters shared by every dashboard endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardQuery {
    pub period: Period,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub group_by: Option<String>,
}

#[derive(Serialize)]
struct QueryWire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_by: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    period: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
}

impl DashboardQuery {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            ..Default::default()
        }
    }

    pub fn paged(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page.max(1));
        self.per_page = Some(per_page.max(1));
        self
    }

    pub fn grouped_by(mut self, group_by: impl Into<String>) -> Self {
        self.group_by = Some(group_by.into());
        self
    }

    /// `period=<key>` for presets, `start_date`/`end_date` for a custom range
    pub fn to_query_string(&self) -> String {
        let (period, start_date, end_date) = match self.period {
            Period::Custom { start, end } => (
                None,
                Some(start.format("%Y-%m-%d").to_string()),
                Some(end.format("%Y-%m-%d").to_string()),
            ),
            preset => (Some(preset.key()), None, None),
        };
        let wire = QueryWire {
            page: self.page,
            per_page: self.per_page,
            group_by: self.group_by.as_deref(),
            period,
            start_date,
            end_date,
        };
        serde_qs::to_string(&wire).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_query() {
        let q = DashboardQuery::new(Period::Today).paged(1, 10);
        assert_eq!(q.to_query_string(), "page=1&per_page=10&period=today");
        assert_eq!(DashboardQuery::new(Period::Year).to_query_string(), "period=year");
    }

    #[test]
    fn test_custom_query() {
        let period = validate_custom_range("2024-01-01", "2024-01-31").unwrap();
        let q = DashboardQuery::new(period).grouped_by("day");
        assert_eq!(
            q.to_query_string(),
            "group_by=day&start_date=2024-01-01&end_date=2024-01-31"
        );
    }

    #[test]
    fn test_custom_range_validation() {
        assert_eq!(validate_custom_range("", "2024-01-31"), Err(RangeError::Incomplete));
        assert_eq!(
            validate_custom_range("2024-02-01", "2024-01-31"),
            Err(RangeError::StartAfterEnd)
        );
        assert!(matches!(
            validate_custom_range("2024-13-01", "2024-12-31"),
            Err(RangeError::InvalidDate(_))
        ));
        assert!(validate_custom_range("2024-01-31", "2024-01-31").is_ok());
        assert_eq!(RangeError::Incomplete.title(), "Fechas incompletas");
        assert_eq!(RangeError::StartAfterEnd.title(), "Fechas inválidas");
    }

    #[test]
    fn test_timeline_visibility() {
        assert!(!Period::Today.shows_timeline());
        for p in [Period::Week, Period::Month, Period::Quarter, Period::Year] {
            assert!(p.shows_timeline());
        }
    }
}
