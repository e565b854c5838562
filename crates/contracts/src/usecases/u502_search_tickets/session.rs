use crate::shared::api_response::StatusEnvelope;

pub const SEARCH_FAILED: &str = "Error al realizar la búsqueda";

/// Состояние единого поиска по таблице тикетов
///
/// Пока показаны результаты, серверная пагинация скрыта; `clear` возвращает
/// исходное содержимое таблицы.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchSession {
    #[default]
    Idle,
    Loading {
        term: String,
    },
    Results {
        term: String,
        html: String,
        message: String,
        total: u64,
    },
    Failed {
        message: String,
    },
}

impl SearchSession {
    pub fn start(term: String) -> Self {
        SearchSession::Loading { term }
    }

    /// Разбор ответа сервера
    pub fn from_envelope(term: String, envelope: StatusEnvelope) -> Self {
        if !envelope.is_success() {
            return SearchSession::Failed {
                message: envelope
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| SEARCH_FAILED.to_string()),
            };
        }
        let total = envelope.total_results.unwrap_or(0);
        SearchSession::Results {
            term: envelope.search_term.unwrap_or(term),
            html: envelope.html.unwrap_or_default(),
            message: envelope
                .message
                .unwrap_or_else(|| results_message(total)),
            total,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        let message = message.into();
        SearchSession::Failed {
            message: if message.trim().is_empty() {
                SEARCH_FAILED.to_string()
            } else {
                message
            },
        }
    }

    pub fn clear(&self) -> Self {
        SearchSession::Idle
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchSession::Loading { .. })
    }

    /// Поиск активен: таблица показывает не исходные строки
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            SearchSession::Loading { .. } | SearchSession::Results { .. }
        )
    }

    pub fn pagination_visible(&self) -> bool {
        !self.is_active()
    }

    pub fn results_html(&self) -> Option<&str> {
        match self {
            SearchSession::Results { html, .. } => Some(html.as_str()),
            _ => None,
        }
    }
}

/// Подпись под строкой поиска
pub fn results_message(total: u64) -> String {
    match total {
        0 => "No se encontraron resultados".to_string(),
        1 => "Se encontró 1 resultado".to_string(),
        n => format!("Se encontraron {} resultados", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let s = SearchSession::start("moto".into());
        assert!(s.is_loading());
        assert!(!s.pagination_visible());

        let env = StatusEnvelope {
            status: "success".into(),
            html: Some("<tr><td>1</td></tr>".into()),
            message: None,
            total_results: Some(2),
            search_term: Some("moto".into()),
        };
        let s = SearchSession::from_envelope("moto".into(), env);
        assert_eq!(s.results_html(), Some("<tr><td>1</td></tr>"));
        assert!(!s.pagination_visible());
        if let SearchSession::Results { message, total, .. } = &s {
            assert_eq!(*total, 2);
            assert_eq!(message, "Se encontraron 2 resultados");
        }

        let s = s.clear();
        assert_eq!(s, SearchSession::Idle);
        assert!(s.pagination_visible());
    }

    #[test]
    fn test_error_envelope() {
        let env = StatusEnvelope {
            status: "error".into(),
            message: Some("Sin permisos".into()),
            ..Default::default()
        };
        let s = SearchSession::from_envelope("x".into(), env);
        assert_eq!(
            s,
            SearchSession::Failed {
                message: "Sin permisos".into()
            }
        );
        assert!(s.pagination_visible());
        assert_eq!(
            SearchSession::fail(""),
            SearchSession::Failed {
                message: SEARCH_FAILED.into()
            }
        );
    }
}
