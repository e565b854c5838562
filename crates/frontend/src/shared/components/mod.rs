pub mod filter_chips;
pub mod pagination_controls;
pub mod search_input;
pub mod stat_card;
pub mod tone_badge;

pub use filter_chips::FilterChips;
pub use pagination_controls::PaginationControls;
pub use search_input::SearchInput;
pub use stat_card::StatCard;
pub use tone_badge::ToneBadge;
