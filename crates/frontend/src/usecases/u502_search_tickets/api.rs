use contracts::domain::a001_ticket::TicketModule;
use contracts::shared::api_response::StatusEnvelope;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u502_search_tickets::{SearchRequest, SearchTickets};

use crate::shared::api_utils::{api_url, post_form};

/// API клиент для UseCase u502: сервер отдаёт готовые строки таблицы
pub async fn search_tickets(
    module: TicketModule,
    request: &SearchRequest,
) -> Result<StatusEnvelope, String> {
    let url = api_url(module.search_endpoint());
    log::debug!("{}: {}", SearchTickets::full_name(), url);
    post_form(&url, request).await
}
