use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_change_ticket_state::{
    ChangeTicketState, StatusUpdateRequest, StatusUpdateResponse,
};

use crate::shared::api_utils::{api_url, post_form};
use crate::shared::config::client_config;

/// API клиент для UseCase u501
///
/// Форма `ticket_id=..&state=..`; причина отказа сервера приходит в `message`.
pub async fn update_status(request: &StatusUpdateRequest) -> Result<StatusUpdateResponse, String> {
    let url = api_url(&client_config().endpoints.update_status);
    log::debug!(
        "{}: ticket #{} -> {}",
        ChangeTicketState::full_name(),
        request.ticket_id,
        request.state
    );
    post_form(&url, request).await
}
