use serde::{Deserialize, Serialize};

/// Общая обёртка JSON-ответов backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<ApiMessage>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> ApiEnvelope<T> {
    /// Текст ошибки для пользователя (или `fallback`, если сервер промолчал)
    pub fn error_text(&self, fallback: &str) -> String {
        self.message
            .as_ref()
            .map(|m| m.text())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// `data` успешного ответа или текст ошибки
    pub fn into_result(self, fallback: &str) -> Result<(T, Option<Pagination>), String> {
        if !self.success {
            return Err(self.error_text(fallback));
        }
        let text = self.error_text(fallback);
        match self.data {
            Some(data) => Ok((data, self.pagination)),
            None => Err(text),
        }
    }
}

/// Сообщение сервера: строка или объект `{icon, title, text}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiMessage {
    Text(String),
    Detailed {
        #[serde(default)]
        icon: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        text: Option<String>,
    },
}

impl ApiMessage {
    pub fn text(&self) -> String {
        match self {
            ApiMessage::Text(s) => s.clone(),
            ApiMessage::Detailed { text, title, .. } => text
                .clone()
                .or_else(|| title.clone())
                .unwrap_or_default(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            ApiMessage::Text(_) => None,
            ApiMessage::Detailed { title, .. } => title.as_deref(),
        }
    }
}

/// Серверная пагинация (страницы с 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub has_prev: bool,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub prev_num: Option<u32>,
    #[serde(default)]
    pub next_num: Option<u32>,
}

fn first_page() -> u32 {
    1
}

impl Pagination {
    /// Пагинация по общему количеству записей
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let per_page = per_page.max(1);
        let pages = total.div_ceil(per_page as u64) as u32;
        let page = page.clamp(1, pages.max(1));
        Self {
            page,
            pages,
            per_page,
            total,
            has_prev: page > 1,
            has_next: page < pages,
            prev_num: (page > 1).then(|| page - 1),
            next_num: (page < pages).then(|| page + 1),
        }
    }

    /// Диапазон записей текущей страницы, 1-based, для подписи "1-10 de 57"
    pub fn shown_range(&self) -> (u64, u64) {
        if self.total == 0 {
            return (0, 0);
        }
        let start = (self.page.saturating_sub(1) as u64) * self.per_page as u64 + 1;
        let end = (start + self.per_page as u64 - 1).min(self.total);
        (start, end)
    }
}

/// Элемент ряда кнопок пагинации
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Prev { target: u32, enabled: bool },
    Page { number: u32, current: bool },
    Gap,
    Next { target: u32, enabled: bool },
}

/// Текущая страница ±2, первая и последняя всегда доступны
pub fn page_window(p: &Pagination) -> Vec<PageItem> {
    if p.pages <= 1 {
        return Vec::new();
    }
    let page = p.page.clamp(1, p.pages);
    let mut items = vec![PageItem::Prev {
        target: p.prev_num.unwrap_or(page.saturating_sub(1).max(1)),
        enabled: p.has_prev,
    }];

    let start = page.saturating_sub(2).max(1);
    let end = (page + 2).min(p.pages);

    if start > 1 {
        items.push(PageItem::Page {
            number: 1,
            current: false,
        });
        if start > 2 {
            items.push(PageItem::Gap);
        }
    }
    for number in start..=end {
        items.push(PageItem::Page {
            number,
            current: number == page,
        });
    }
    if end < p.pages {
        if end + 1 < p.pages {
            items.push(PageItem::Gap);
        }
        items.push(PageItem::Page {
            number: p.pages,
            current: false,
        });
    }

    items.push(PageItem::Next {
        target: p.next_num.unwrap_or((page + 1).min(p.pages)),
        enabled: p.has_next,
    });
    items
}

/// Ответ эндпоинтов, возвращающих HTML-фрагмент
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub search_term: Option<String>,
}

impl StatusEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(items: &[PageItem]) -> Vec<String> {
        items
            .iter()
            .map(|i| match i {
                PageItem::Prev { .. } => "<".to_string(),
                PageItem::Next { .. } => ">".to_string(),
                PageItem::Gap => "…".to_string(),
                PageItem::Page { number, current: true } => format!("[{}]", number),
                PageItem::Page { number, .. } => number.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_page_window_middle() {
        let p = Pagination::new(6, 10, 120);
        assert_eq!(
            numbers(&page_window(&p)),
            vec!["<", "1", "…", "4", "5", "[6]", "7", "8", "…", "12", ">"]
        );
    }

    #[test]
    fn test_page_window_edges() {
        let first = Pagination::new(1, 10, 50);
        let items = page_window(&first);
        assert_eq!(numbers(&items), vec!["<", "[1]", "2", "3", "…", "5", ">"]);
        assert_eq!(items[0], PageItem::Prev { target: 1, enabled: false });

        let near_end = Pagination::new(4, 10, 50);
        assert_eq!(numbers(&page_window(&near_end)), vec!["<", "1", "2", "3", "[4]", "5", ">"]);
    }

    #[test]
    fn test_page_window_single_page() {
        assert!(page_window(&Pagination::new(1, 10, 7)).is_empty());
        assert!(page_window(&Pagination::new(1, 10, 0)).is_empty());
    }

    #[test]
    fn test_pagination_new() {
        let p = Pagination::new(3, 10, 25);
        assert_eq!(p.pages, 3);
        assert!(p.has_prev);
        assert!(!p.has_next);
        assert_eq!(p.shown_range(), (21, 25));
        assert_eq!(Pagination::new(99, 10, 25).page, 3);
    }

    #[test]
    fn test_envelope_message_shapes() {
        let plain: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"success": false, "message": "Ticket no encontrado"}"#).unwrap();
        assert_eq!(plain.error_text("x"), "Ticket no encontrado");

        let detailed: ApiEnvelope<Vec<u32>> = serde_json::from_str(
            r#"{"success": false, "message": {"icon": "error", "title": "Error", "text": "Sin permisos"}}"#,
        )
        .unwrap();
        assert_eq!(detailed.error_text("x"), "Sin permisos");
        assert_eq!(detailed.message.as_ref().and_then(|m| m.title()), Some("Error"));

        let ok: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"success": true, "data": [1, 2]}"#).unwrap();
        let (data, pagination) = ok.into_result("x").unwrap();
        assert_eq!(data, vec![1, 2]);
        assert!(pagination.is_none());
    }

    #[test]
    fn test_status_envelope() {
        let env: StatusEnvelope = serde_json::from_str(
            r#"{"status": "success", "html": "<tr></tr>", "total_results": 3, "search_term": "abc"}"#,
        )
        .unwrap();
        assert!(env.is_success());
        assert_eq!(env.total_results, Some(3));
    }
}
