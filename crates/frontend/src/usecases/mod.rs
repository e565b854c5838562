pub mod u501_change_ticket_state;
pub mod u502_search_tickets;
