//! Фильтры списка тикетов и их представление в query string
//!
//! Любое изменение фильтра сбрасывает страницу на первую; страница списка
//! после этого переходит по новому URL целиком.

use serde::{Deserialize, Serialize};

use super::aggregate::TicketState;

/// Значение «все стадии» в селекторе
pub const ALL_STATES: &str = "Todos";
/// Значение «все города» в селекторе
pub const ALL_CITIES: &str = "Todas las ciudades";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketListFilter {
    pub state: Option<TicketState>,
    pub city: Option<String>,
    /// Свободный текст, в нижнем регистре
    pub search: String,
    pub page: u32,
}

impl Default for TicketListFilter {
    fn default() -> Self {
        Self {
            state: None,
            city: None,
            search: String::new(),
            page: 1,
        }
    }
}

/// Представление на проводе; порядок полей задаёт порядок параметров
#[derive(Debug, Default, Serialize, Deserialize)]
struct FilterQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    search: Option<String>,
}

impl TicketListFilter {
    /// Стадия из значения селектора; `"Todos"` и неизвестное: без фильтра
    pub fn state_from_label(label: &str) -> Option<TicketState> {
        let label = label.trim();
        if label.is_empty() || label == ALL_STATES {
            return None;
        }
        label.parse().ok()
    }

    /// Город из значения селектора; `"Todas las ciudades"`: без фильтра
    pub fn city_from_label(label: &str) -> Option<String> {
        let label = label.trim();
        if label.is_empty() || label == ALL_CITIES {
            None
        } else {
            Some(label.to_string())
        }
    }

    pub fn with_state(mut self, state: Option<TicketState>) -> Self {
        self.state = state;
        self.page = 1;
        self
    }

    pub fn with_city(mut self, city: Option<String>) -> Self {
        self.city = city.and_then(|c| Self::city_from_label(&c));
        self.page = 1;
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.trim().to_lowercase();
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Сброс всех фильтров
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn active_filters_count(&self) -> usize {
        [
            self.state.is_some(),
            self.city.is_some(),
            !self.search.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_filters_count() > 0
    }

    pub fn state_label(&self) -> &str {
        self.state.map(|s| s.label()).unwrap_or(ALL_STATES)
    }

    pub fn city_label(&self) -> &str {
        self.city.as_deref().unwrap_or(ALL_CITIES)
    }

    /// `page=N[&state=..][&city=..][&search=..]`
    pub fn to_query_string(&self) -> String {
        let query = FilterQuery {
            page: Some(self.page.max(1).to_string()),
            state: self.state.map(|s| s.label().to_string()),
            city: self.city.clone(),
            search: (!self.search.is_empty()).then(|| self.search.clone()),
        };
        serde_qs::to_string(&query).unwrap_or_else(|_| format!("page={}", self.page.max(1)))
    }

    /// Восстановление из `location.search` (с `?` или без)
    pub fn from_query_string(query: &str) -> Self {
        let raw: FilterQuery =
            serde_qs::from_str(query.trim_start_matches('?')).unwrap_or_default();

        let page = raw
            .page
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        Self {
            state: raw.state.as_deref().and_then(Self::state_from_label),
            city: raw.city.as_deref().and_then(Self::city_from_label),
            search: raw
                .search
                .map(|s| s.trim().to_lowercase())
                .unwrap_or_default(),
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query() {
        assert_eq!(TicketListFilter::default().to_query_string(), "page=1");
    }

    #[test]
    fn test_filter_change_resets_page() {
        let f = TicketListFilter::default()
            .with_page(4)
            .with_state(Some(TicketState::Asignado));
        assert_eq!(f.page, 1);

        let f = f.with_page(3).with_city(Some("Bogota".into()));
        assert_eq!(f.page, 1);
        assert_eq!(f.to_query_string(), "page=1&state=Asignado&city=Bogota");
    }

    #[test]
    fn test_sentinels_are_omitted() {
        let f = TicketListFilter::default()
            .with_state(TicketListFilter::state_from_label(ALL_STATES))
            .with_city(Some(ALL_CITIES.to_string()))
            .with_search("   ");
        assert_eq!(f.to_query_string(), "page=1");
        assert_eq!(f.active_filters_count(), 0);
        assert_eq!(f.state_label(), ALL_STATES);
        assert_eq!(f.city_label(), ALL_CITIES);
    }

    #[test]
    fn test_round_trip_through_url() {
        let f = TicketListFilter::default()
            .with_state(Some(TicketState::EnProceso))
            .with_city(Some("Santa Marta".into()))
            .with_search("  Samsung ")
            .with_page(2);
        let restored = TicketListFilter::from_query_string(&format!("?{}", f.to_query_string()));
        assert_eq!(restored, f);
        assert_eq!(restored.search, "samsung");
        assert_eq!(restored.active_filters_count(), 3);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let f = TicketListFilter::from_query_string("page=abc&state=Recibido&ticket_updated=success");
        assert_eq!(f, TicketListFilter::default());

        let f = TicketListFilter::from_query_string("page=0&state=Todos&city=Todas%20las%20ciudades");
        assert_eq!(f, TicketListFilter::default());
    }

    #[test]
    fn test_cleared() {
        let f = TicketListFilter::default().with_search("moto");
        assert!(f.has_active_filters());
        assert!(!TicketListFilter::cleared().has_active_filters());
    }
}
