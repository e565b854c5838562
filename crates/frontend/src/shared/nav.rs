//! Работа со строкой запроса страницы

use std::collections::HashMap;

/// Значение параметра из `location.search` (с `?` или без)
pub fn query_param(query: &str, key: &str) -> Option<String> {
    let map: HashMap<String, String> =
        serde_qs::from_str(query.trim_start_matches('?')).unwrap_or_default();
    map.get(key).cloned()
}

/// Строка запроса без указанных параметров, без ведущего `?`
pub fn without_params(query: &str, keys: &[&str]) -> String {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let name = pair.split('=').next().unwrap_or_default();
            !keys.contains(&name)
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Одноразовое уведомление, переданное через URL после сохранения тикета
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashNotice {
    TicketUpdated,
    TicketCreated,
}

impl FlashNotice {
    pub const KEYS: [&'static str; 2] = ["ticket_updated", "ticket_created"];

    pub fn key(&self) -> &'static str {
        match self {
            FlashNotice::TicketUpdated => "ticket_updated",
            FlashNotice::TicketCreated => "ticket_created",
        }
    }

    /// `?ticket_updated=success` → `TicketUpdated`
    pub fn from_query(query: &str) -> Option<Self> {
        [FlashNotice::TicketUpdated, FlashNotice::TicketCreated]
            .into_iter()
            .find(|n| query_param(query, n.key()).as_deref() == Some("success"))
    }

    /// Параметр для URL перехода
    pub fn param(&self) -> String {
        format!("{}=success", self.key())
    }

    pub fn title(&self) -> &'static str {
        "¡Operación exitosa!"
    }

    pub fn text(&self) -> &'static str {
        "El ticket ha sido procesado correctamente."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param() {
        assert_eq!(query_param("?page=2&state=Asignado", "state").as_deref(), Some("Asignado"));
        assert_eq!(query_param("page=2", "state"), None);
        assert_eq!(query_param("", "page"), None);
    }

    #[test]
    fn test_without_params() {
        assert_eq!(
            without_params("?page=2&ticket_updated=success&city=Cali", &FlashNotice::KEYS),
            "page=2&city=Cali"
        );
        assert_eq!(without_params("?ticket_created=success", &FlashNotice::KEYS), "");
    }

    #[test]
    fn test_flash_notice_from_query() {
        assert_eq!(
            FlashNotice::from_query("?ticket_updated=success"),
            Some(FlashNotice::TicketUpdated)
        );
        assert_eq!(
            FlashNotice::from_query("page=1&ticket_created=success"),
            Some(FlashNotice::TicketCreated)
        );
        assert_eq!(FlashNotice::from_query("?ticket_updated=failed"), None);
        assert_eq!(FlashNotice::TicketUpdated.param(), "ticket_updated=success");
    }
}
