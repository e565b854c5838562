use serde::Serialize;
use thiserror::Error;

pub const MAX_TERM_LEN: usize = 100;
const FORBIDDEN: [char; 5] = ['<', '>', '"', '\'', ';'];

/// Тело `POST <search endpoint>`: `search=<term>` (form-urlencoded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub search: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchTermError {
    #[error("Por favor ingresa un término de búsqueda")]
    Empty,
    #[error("El término de búsqueda no puede tener más de 100 caracteres")]
    TooLong,
    #[error("El término de búsqueda contiene caracteres no permitidos")]
    ForbiddenChars,
}

/// Обрезанный непустой термин без символов разметки
pub fn validate_search_term(raw: &str) -> Result<String, SearchTermError> {
    let term = raw.trim();
    if term.is_empty() {
        return Err(SearchTermError::Empty);
    }
    if term.chars().count() > MAX_TERM_LEN {
        return Err(SearchTermError::TooLong);
    }
    if term.contains(FORBIDDEN) {
        return Err(SearchTermError::ForbiddenChars);
    }
    Ok(term.to_string())
}

impl SearchRequest {
    pub fn new(raw: &str) -> Result<Self, SearchTermError> {
        validate_search_term(raw).map(|search| Self { search })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_search_term() {
        assert_eq!(validate_search_term("  moto g  "), Ok("moto g".to_string()));
        assert_eq!(validate_search_term("   "), Err(SearchTermError::Empty));
        assert_eq!(
            validate_search_term(&"a".repeat(101)),
            Err(SearchTermError::TooLong)
        );
        assert!(validate_search_term(&"a".repeat(100)).is_ok());
        for bad in ["<b>", "x\"y", "a;b", "o'neil"] {
            assert_eq!(validate_search_term(bad), Err(SearchTermError::ForbiddenChars));
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SearchTermError::TooLong.to_string(),
            "El término de búsqueda no puede tener más de 100 caracteres"
        );
    }

    #[test]
    fn test_request_form() {
        let req = SearchRequest::new(" 3001 ").unwrap();
        assert_eq!(serde_qs::to_string(&req).unwrap(), "search=3001");
    }
}
