use serde::{Deserialize, Serialize};

use super::aggregate::SparePart;

/// Минимальная длина запроса к каталогу запчастей
pub const MIN_PART_SEARCH_CHARS: usize = 3;

/// Тело запроса `search=<term>` (form-urlencoded)
#[derive(Debug, Clone, Serialize)]
pub struct SparePartSearchRequest {
    pub search: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SparePartSearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub parts: Vec<SparePart>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub message: Option<String>,
}

/// Запрос отправляется только от трёх символов
pub fn part_search_term(raw: &str) -> Option<String> {
    let term = raw.trim();
    (term.chars().count() >= MIN_PART_SEARCH_CHARS).then(|| term.to_string())
}

/// Фрагмент текста для подсветки совпадений
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            matched: false,
        }
    }

    fn hit(text: &str) -> Self {
        Self {
            text: text.to_string(),
            matched: true,
        }
    }
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Разбивает текст на совпавшие и обычные участки без учёта регистра
pub fn highlight_segments(text: &str, term: &str) -> Vec<Segment> {
    let needle: Vec<char> = term.trim().chars().collect();
    if needle.is_empty() || text.is_empty() {
        return vec![Segment::plain(text)];
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i + needle.len() <= chars.len() {
        let found = needle
            .iter()
            .enumerate()
            .all(|(k, c)| same_letter(chars[i + k].1, *c));
        if !found {
            i += 1;
            continue;
        }
        let start = chars[i].0;
        let end = chars
            .get(i + needle.len())
            .map(|(pos, _)| *pos)
            .unwrap_or(text.len());
        if start > plain_start {
            segments.push(Segment::plain(&text[plain_start..start]));
        }
        segments.push(Segment::hit(&text[start..end]));
        plain_start = end;
        i += needle.len();
    }

    if plain_start < text.len() {
        segments.push(Segment::plain(&text[plain_start..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_search_term() {
        assert_eq!(part_search_term(" ab "), None);
        assert_eq!(part_search_term(" pan "), Some("pan".to_string()));
        assert_eq!(part_search_term("ñoñ"), Some("ñoñ".to_string()));
    }

    #[test]
    fn test_highlight_case_insensitive() {
        let segs = highlight_segments("Pantalla LCD pantalla", "PANTALLA");
        assert_eq!(
            segs,
            vec![
                Segment::hit("Pantalla"),
                Segment::plain(" LCD "),
                Segment::hit("pantalla"),
            ]
        );
    }

    #[test]
    fn test_highlight_multibyte() {
        let segs = highlight_segments("Batería Ñandú", "ñan");
        assert_eq!(
            segs,
            vec![Segment::plain("Batería "), Segment::hit("Ñan"), Segment::plain("dú")]
        );
    }

    #[test]
    fn test_highlight_without_match() {
        assert_eq!(highlight_segments("Flex", "xyz"), vec![Segment::plain("Flex")]);
        assert_eq!(highlight_segments("Flex", ""), vec![Segment::plain("Flex")]);
    }

    #[test]
    fn test_response_defaults() {
        let resp: SparePartSearchResponse = serde_json::from_str(
            r#"{"success": true, "parts": [{"code": "P1", "description": "Pin"}], "count": 1}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.parts[0].price, None);
    }
}
