//! Редактор тикета
//!
//! MVVM:
//! - model.rs: состояние вне формы (ошибки полей, поиск запчастей, вложения)
//! - view_model.rs: ViewModel с командами
//! - view.rs: страница
//! - problems.rs, parts.rs, part_search.rs, attachments.rs: секции формы

mod attachments;
mod model;
mod part_search;
mod parts;
mod problems;
mod view;
mod view_model;

pub use view::TicketEditPage;
pub use view_model::TicketEditViewModel;
