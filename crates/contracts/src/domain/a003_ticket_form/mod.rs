pub mod aggregate;

pub use aggregate::{
    AssignmentError, PartSubmission, ProblemOption, TechnicianRef, TicketEditData, TicketForm,
    TicketSubmission, LOCKED_MESSAGE, MISSING_DOCUMENT, UNASSIGNED_DOCUMENT,
};
