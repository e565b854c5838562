//! Конечный автомат селектора статуса одной строки
//!
//! `committed` меняется только после явного `success == true` от сервера;
//! любой другой исход возвращает `displayed` к `committed`.

use crate::domain::a001_ticket::{TicketId, TicketState};

use super::guard::{check_transition, confirmation_prompt, TransitionError};
use super::request::{StatusUpdateRequest, StatusUpdateResponse};

pub const UPDATE_FAILED: &str = "Error al actualizar el estado";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPhase {
    Idle,
    AwaitingConfirmation(TicketState),
    InFlight(TicketState),
}

/// Что делать интерфейсу после выбора значения
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Блокирующий диалог, значение уже откатилось
    Rejected(TransitionError),
    /// Спросить подтверждение
    Confirm { target: TicketState, prompt: String },
    /// Запрос уже в полёте
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed { state: TicketState, message: Option<String> },
    Reverted { message: String },
    /// Ответ пришёл вне фазы `InFlight`
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusControl {
    ticket_id: TicketId,
    committed: TicketState,
    displayed: TicketState,
    phase: ControlPhase,
}

impl StatusControl {
    pub fn new(ticket_id: TicketId, committed: TicketState) -> Self {
        Self {
            ticket_id,
            committed,
            displayed: committed,
            phase: ControlPhase::Idle,
        }
    }

    pub fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    pub fn committed(&self) -> TicketState {
        self.committed
    }

    pub fn displayed(&self) -> TicketState {
        self.displayed
    }

    pub fn phase(&self) -> ControlPhase {
        self.phase
    }

    pub fn request(&mut self, to: TicketState) -> Decision {
        if matches!(self.phase, ControlPhase::InFlight(_)) {
            return Decision::Ignored;
        }
        match check_transition(self.committed, to) {
            Err(err) => {
                self.displayed = self.committed;
                self.phase = ControlPhase::Idle;
                Decision::Rejected(err)
            }
            Ok(_) => {
                self.displayed = to;
                self.phase = ControlPhase::AwaitingConfirmation(to);
                Decision::Confirm {
                    target: to,
                    prompt: confirmation_prompt(self.ticket_id, to),
                }
            }
        }
    }

    /// Пользователь отказался от смены статуса
    pub fn cancel(&mut self) {
        if let ControlPhase::AwaitingConfirmation(_) = self.phase {
            self.displayed = self.committed;
            self.phase = ControlPhase::Idle;
        }
    }

    /// Подтверждение: контрол блокируется до ответа сервера
    pub fn confirm(&mut self) -> Option<StatusUpdateRequest> {
        match self.phase {
            ControlPhase::AwaitingConfirmation(to) => {
                self.phase = ControlPhase::InFlight(to);
                Some(StatusUpdateRequest {
                    ticket_id: self.ticket_id,
                    state: to,
                })
            }
            _ => None,
        }
    }

    pub fn resolve(&mut self, result: Result<StatusUpdateResponse, String>) -> Outcome {
        let ControlPhase::InFlight(to) = self.phase else {
            return Outcome::Stale;
        };
        self.phase = ControlPhase::Idle;

        match result {
            Ok(resp) if resp.success => {
                self.committed = to;
                self.displayed = to;
                Outcome::Committed {
                    state: to,
                    message: resp.message,
                }
            }
            Ok(resp) => {
                self.displayed = self.committed;
                Outcome::Reverted {
                    message: non_empty(resp.message).unwrap_or_else(|| UPDATE_FAILED.to_string()),
                }
            }
            Err(err) => {
                self.displayed = self.committed;
                Outcome::Reverted {
                    message: non_empty(Some(err)).unwrap_or_else(|| UPDATE_FAILED.to_string()),
                }
            }
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.phase, ControlPhase::InFlight(_))
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control(state: TicketState) -> StatusControl {
        StatusControl::new(TicketId(7), state)
    }

    fn ok() -> Result<StatusUpdateResponse, String> {
        Ok(StatusUpdateResponse {
            success: true,
            message: None,
        })
    }

    #[test]
    fn test_backward_is_rejected_and_reverted() {
        let mut c = control(TicketState::Asignado);
        let decision = c.request(TicketState::SinAsignar);
        assert!(matches!(decision, Decision::Rejected(TransitionError::Backward { .. })));
        assert_eq!(c.displayed(), TicketState::Asignado);
        assert_eq!(c.phase(), ControlPhase::Idle);
    }

    #[test]
    fn test_forward_asks_confirmation() {
        let mut c = control(TicketState::Asignado);
        match c.request(TicketState::EnProceso) {
            Decision::Confirm { target, prompt } => {
                assert_eq!(target, TicketState::EnProceso);
                assert!(prompt.contains("#7"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(c.displayed(), TicketState::EnProceso);
        assert_eq!(c.committed(), TicketState::Asignado);
    }

    #[test]
    fn test_cancel_reverts() {
        let mut c = control(TicketState::Asignado);
        c.request(TicketState::Terminado);
        c.cancel();
        assert_eq!(c.displayed(), TicketState::Asignado);
        assert_eq!(c.confirm(), None);
    }

    #[test]
    fn test_success_commits() {
        let mut c = control(TicketState::EnRevision);
        c.request(TicketState::Terminado);
        let req = c.confirm().unwrap();
        assert_eq!(req.state, TicketState::Terminado);
        assert!(c.is_disabled());
        assert_eq!(c.request(TicketState::Terminado), Decision::Ignored);

        let outcome = c.resolve(ok());
        assert_eq!(
            outcome,
            Outcome::Committed {
                state: TicketState::Terminado,
                message: None
            }
        );
        assert!(!c.is_disabled());
    }

    #[test]
    fn test_failures_restore_pre_change_value() {
        let failures: Vec<Result<StatusUpdateResponse, String>> = vec![
            Ok(StatusUpdateResponse {
                success: false,
                message: Some("Ticket bloqueado".into()),
            }),
            Ok(StatusUpdateResponse::default()),
            Err("Request failed: network".into()),
            Err(String::new()),
        ];
        for failure in failures {
            let mut c = control(TicketState::Asignado);
            c.request(TicketState::EnProceso);
            c.confirm();
            let outcome = c.resolve(failure);
            assert!(matches!(outcome, Outcome::Reverted { .. }));
            assert_eq!(c.displayed(), TicketState::Asignado);
            assert_eq!(c.committed(), TicketState::Asignado);
            assert!(!c.is_disabled());
        }
    }

    #[test]
    fn test_default_failure_message() {
        let mut c = control(TicketState::Asignado);
        c.request(TicketState::EnProceso);
        c.confirm();
        assert_eq!(
            c.resolve(Ok(StatusUpdateResponse::default())),
            Outcome::Reverted {
                message: UPDATE_FAILED.to_string()
            }
        );
    }

    #[test]
    fn test_stale_response() {
        let mut c = control(TicketState::Asignado);
        assert_eq!(c.resolve(ok()), Outcome::Stale);
        assert_eq!(c.committed(), TicketState::Asignado);
    }
}
