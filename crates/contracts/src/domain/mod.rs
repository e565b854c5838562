pub mod a001_ticket;
pub mod a002_spare_part;
pub mod a003_ticket_form;
pub mod common;
