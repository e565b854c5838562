//! HTTP-клиент тикетов: список модуля, карточка, сохранение, поиск запчастей

use contracts::domain::a001_ticket::{TicketId, TicketListFilter, TicketModule, TicketRow};
use contracts::domain::a002_spare_part::{SparePartSearchRequest, SparePartSearchResponse};
use contracts::domain::a003_ticket_form::{TicketEditData, TicketSubmission};
use contracts::shared::api_response::{ApiEnvelope, Pagination};

use crate::shared::api_utils::{api_url, fetch_envelope, post_form, post_json, with_query, LOAD_FAILED};
use crate::shared::config::client_config;

const SAVE_FAILED: &str = "No se pudo guardar el ticket";

/// Страница списка модуля с учётом фильтров
pub async fn fetch_tickets(
    module: TicketModule,
    filter: &TicketListFilter,
) -> Result<(Vec<TicketRow>, Option<Pagination>), String> {
    let url = api_url(&with_query(&module.list_endpoint(), &filter.to_query_string()));
    fetch_envelope(&url).await
}

pub async fn fetch_ticket(id: TicketId) -> Result<TicketEditData, String> {
    let url = api_url(&format!("{}/{}", client_config().endpoints.ticket_detail, id));
    let (data, _) = fetch_envelope(&url).await?;
    Ok(data)
}

/// Сохранение карточки; `Ok` несёт сообщение сервера, если оно было
pub async fn save_ticket(
    id: TicketId,
    submission: &TicketSubmission,
) -> Result<Option<String>, String> {
    let url = api_url(&format!("{}/{}", client_config().endpoints.ticket_save, id));
    let envelope: ApiEnvelope<serde_json::Value> = post_json(&url, submission).await?;
    if !envelope.success {
        return Err(envelope.error_text(SAVE_FAILED));
    }
    Ok(envelope.message.map(|m| m.text()).filter(|m| !m.is_empty()))
}

pub async fn search_spare_parts(term: &str) -> Result<SparePartSearchResponse, String> {
    let url = api_url(&client_config().endpoints.search_spare_parts);
    let request = SparePartSearchRequest {
        search: term.to_string(),
    };
    let response: SparePartSearchResponse = post_form(&url, &request).await?;
    if !response.success {
        return Err(response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| LOAD_FAILED.to_string()));
    }
    Ok(response)
}
