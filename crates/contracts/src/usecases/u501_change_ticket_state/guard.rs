use thiserror::Error;

use crate::domain::a001_ticket::{TicketId, TicketState};

pub const REJECT_TITLE: &str = "Operación no permitida";
pub const CONFIRM_TITLE: &str = "¿Cambiar estado?";

/// Разрешённый переход (вперёд или на ту же стадию)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: TicketState,
    pub to: TicketState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("No se puede cambiar el estado de \"{from}\" a \"{to}\". No se permite retroceder en el flujo de estados.")]
    Backward { from: TicketState, to: TicketState },
}

/// Отклоняет переход тогда и только тогда, когда он ведёт назад
pub fn check_transition(from: TicketState, to: TicketState) -> Result<Transition, TransitionError> {
    if to.order() < from.order() {
        Err(TransitionError::Backward { from, to })
    } else {
        Ok(Transition { from, to })
    }
}

/// Текст диалога подтверждения
pub fn confirmation_prompt(ticket_id: TicketId, to: TicketState) -> String {
    let mut prompt = format!(
        "¿Estás seguro de cambiar el estado del ticket #{} a \"{}\"?",
        ticket_id, to
    );
    if to == TicketState::Terminado {
        prompt.push_str(
            "\n\nIMPORTANTE: Una vez que el ticket esté en estado \"Terminado\", ya no podrá ser editado.",
        );
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_iff_not_backward() {
        for a in TicketState::ALL {
            for b in TicketState::ALL {
                assert_eq!(
                    check_transition(a, b).is_ok(),
                    b.order() >= a.order(),
                    "{} -> {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_backward_message() {
        let err = check_transition(TicketState::Asignado, TicketState::SinAsignar).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No se puede cambiar el estado de \"Asignado\" a \"Sin asignar\". No se permite retroceder en el flujo de estados."
        );
    }

    #[test]
    fn test_forward_and_equal() {
        assert_eq!(
            check_transition(TicketState::Asignado, TicketState::EnProceso),
            Ok(Transition {
                from: TicketState::Asignado,
                to: TicketState::EnProceso
            })
        );
        let same = check_transition(TicketState::EnProceso, TicketState::EnProceso).unwrap();
        assert_eq!(same.from, same.to);
    }

    #[test]
    fn test_confirmation_prompt() {
        let p = confirmation_prompt(TicketId(42), TicketState::EnProceso);
        assert_eq!(p, "¿Estás seguro de cambiar el estado del ticket #42 a \"En proceso\"?");

        let p = confirmation_prompt(TicketId(42), TicketState::Terminado);
        assert!(p.ends_with("ya no podrá ser editado."));
        assert!(p.contains("\n\nIMPORTANTE"));
    }
}
