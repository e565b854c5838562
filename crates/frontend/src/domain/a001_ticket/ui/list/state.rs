use contracts::domain::a001_ticket::{TicketId, TicketListFilter, TicketRow, TicketState};
use contracts::shared::api_response::Pagination;

/// Состояние страницы списка; фильтр всегда восстанавливается из URL
#[derive(Clone, Debug, Default)]
pub struct TicketListState {
    pub filter: TicketListFilter,
    pub rows: Vec<TicketRow>,
    pub pagination: Option<Pagination>,
    pub is_loaded: bool,
    pub error: Option<String>,
}

impl TicketListState {
    pub fn from_query(query: &str) -> Self {
        Self {
            filter: TicketListFilter::from_query_string(query),
            ..Self::default()
        }
    }

    /// Начало загрузки для нового фильтра
    pub fn begin(&mut self, filter: TicketListFilter) {
        self.filter = filter;
        self.is_loaded = false;
        self.error = None;
    }

    /// Ответ применяется, только если фильтр не сменился за время запроса
    pub fn finish(
        &mut self,
        filter: &TicketListFilter,
        result: Result<(Vec<TicketRow>, Option<Pagination>), String>,
    ) -> bool {
        if &self.filter != filter {
            return false;
        }
        self.is_loaded = true;
        match result {
            Ok((rows, pagination)) => {
                self.rows = rows;
                self.pagination = pagination;
            }
            Err(e) => {
                self.rows.clear();
                self.pagination = None;
                self.error = Some(e);
            }
        }
        true
    }

    /// Стадия строки подтверждена сервером
    pub fn apply_committed(&mut self, id: TicketId, state: TicketState) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
            row.apply_state(state);
        }
    }

    /// После смены стадии строка могла выпасть из активного фильтра
    pub fn needs_refresh_after(&self, state: TicketState) -> bool {
        self.filter.state.is_some_and(|s| s != state)
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.is_loaded || !self.rows.is_empty() || self.error.is_some() {
            return None;
        }
        Some(if self.filter.has_active_filters() {
            "No hay tickets que coincidan con los filtros seleccionados."
        } else {
            "No hay tickets registrados."
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, state: &str) -> TicketRow {
        serde_json::from_value(serde_json::json!({ "id": id, "state": state })).unwrap()
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut state = TicketListState::default();
        let first = TicketListFilter::default().with_page(2);
        let second = TicketListFilter::default().with_page(3);
        state.begin(first.clone());
        state.begin(second.clone());

        assert!(!state.finish(&first, Ok((vec![row(1, "Asignado")], None))));
        assert!(state.rows.is_empty());
        assert!(state.finish(&second, Ok((vec![row(2, "Asignado")], None))));
        assert_eq!(state.rows.len(), 1);
        assert!(state.is_loaded);
    }

    #[test]
    fn test_apply_committed() {
        let mut state = TicketListState::default();
        state.rows = vec![row(1, "Asignado"), row(2, "Sin asignar")];
        state.apply_committed(TicketId::new(2), TicketState::Terminado);
        assert_eq!(state.rows[1].state, "Terminado");
        assert!(!state.rows[1].can_edit());
        assert_eq!(state.rows[0].state, "Asignado");
    }

    #[test]
    fn test_refresh_only_when_row_leaves_filter() {
        let mut state = TicketListState::default();
        assert!(!state.needs_refresh_after(TicketState::EnProceso));
        state.filter = state.filter.clone().with_state(Some(TicketState::Asignado));
        assert!(state.needs_refresh_after(TicketState::EnProceso));
        assert!(!state.needs_refresh_after(TicketState::Asignado));
    }

    #[test]
    fn test_empty_message_depends_on_filters() {
        let mut state = TicketListState::from_query("?page=1&city=Cali");
        assert_eq!(state.empty_message(), None);
        let filter = state.filter.clone();
        state.finish(&filter, Ok((Vec::new(), None)));
        assert_eq!(
            state.empty_message(),
            Some("No hay tickets que coincidan con los filtros seleccionados.")
        );
        state.filter = TicketListFilter::cleared();
        assert_eq!(state.empty_message(), Some("No hay tickets registrados."));
    }
}
