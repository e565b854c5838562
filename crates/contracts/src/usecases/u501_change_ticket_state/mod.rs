pub mod control;
pub mod guard;
pub mod request;

pub use control::{ControlPhase, Decision, Outcome, StatusControl, UPDATE_FAILED};
pub use guard::{
    check_transition, confirmation_prompt, Transition, TransitionError, CONFIRM_TITLE,
    REJECT_TITLE,
};
pub use request::{StatusUpdateRequest, StatusUpdateResponse};

use crate::usecases::common::UseCaseMetadata;

pub struct ChangeTicketState;

impl UseCaseMetadata for ChangeTicketState {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "change_ticket_state"
    }

    fn display_name() -> &'static str {
        "Cambiar estado del ticket"
    }

    fn description() -> &'static str {
        "Avance del ticket por la cadena de estados con confirmación"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        assert_eq!(ChangeTicketState::full_name(), "u501_change_ticket_state");
    }
}
