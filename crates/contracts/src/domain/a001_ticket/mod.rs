pub mod aggregate;
pub mod filter;
pub mod module;

pub use aggregate::{
    priority_tone, service_type_label, BadgeTone, Priority, ServiceType, TicketId, TicketRow,
    TicketState, UnknownState,
};
pub use filter::{TicketListFilter, ALL_CITIES, ALL_STATES};
pub use module::TicketModule;
