pub mod request;
pub mod session;

pub use request::{validate_search_term, SearchRequest, SearchTermError, MAX_TERM_LEN};
pub use session::{results_message, SearchSession, SEARCH_FAILED};

use crate::usecases::common::UseCaseMetadata;

pub struct SearchTickets;

impl UseCaseMetadata for SearchTickets {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "search_tickets"
    }

    fn display_name() -> &'static str {
        "Búsqueda de tickets"
    }
}
