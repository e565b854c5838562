use serde::{Deserialize, Serialize};

use crate::domain::a001_ticket::{TicketId, TicketState};

/// Тело `POST /tickets/update_ticket_status_ajax` (form-urlencoded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUpdateRequest {
    pub ticket_id: TicketId,
    pub state: TicketState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusUpdateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_form_encoded() {
        let req = StatusUpdateRequest {
            ticket_id: TicketId(9),
            state: TicketState::Terminado,
        };
        assert_eq!(serde_qs::to_string(&req).unwrap(), "ticket_id=9&state=Terminado");
    }

    #[test]
    fn test_response_without_message() {
        let resp: StatusUpdateResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.message, None);
    }
}
