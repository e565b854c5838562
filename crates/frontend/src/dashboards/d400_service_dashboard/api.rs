use contracts::dashboards::d400_service_dashboard::{
    DashboardMetrics, DashboardQuery, DistributionSlice, PendingTicket, Period, ProblemCount,
    TechnicianCount, TimelinePoint,
};
use contracts::shared::api_response::{ApiEnvelope, ApiMessage, Pagination};
use serde::de::DeserializeOwned;

use crate::shared::api_utils::{api_url, fetch_envelope, get_json, with_query, LOAD_FAILED};
use crate::shared::config::client_config;

/// Штатное сообщение метрик, которое не показывается
pub const DATA_LOADED: &str = "¡Datos cargados!";

const GROUP_BY_SERVICE: &str = "type_of_service";

fn url(path: &str, query: &DashboardQuery) -> String {
    api_url(&with_query(path, &query.to_query_string()))
}

/// Сообщение сервера стоит показать, если это не штатное «данные загружены»
pub fn notice_worth_showing(message: &ApiMessage) -> bool {
    match message.title() {
        Some(title) => title != DATA_LOADED,
        None => !message.text().trim().is_empty(),
    }
}

async fn fetch_list<T: DeserializeOwned>(
    path: &str,
    query: &DashboardQuery,
) -> Result<(Vec<T>, Option<Pagination>), String> {
    fetch_envelope(&url(path, query)).await
}

/// KPI и сообщение сервера, если его нужно показать
pub async fn fetch_metrics(
    period: Period,
) -> Result<(DashboardMetrics, Option<ApiMessage>), String> {
    let query = DashboardQuery::new(period);
    let envelope: ApiEnvelope<DashboardMetrics> =
        get_json(&url(&client_config().endpoints.metrics, &query)).await?;
    let notice = envelope.message.clone().filter(notice_worth_showing);
    let (metrics, _) = envelope.into_result(LOAD_FAILED)?;
    Ok((metrics, notice))
}

pub async fn fetch_tickets_by_technician(
    period: Period,
    page: u32,
    per_page: u32,
) -> Result<(Vec<TechnicianCount>, Option<Pagination>), String> {
    let query = DashboardQuery::new(period).paged(page, per_page);
    fetch_list(&client_config().endpoints.tickets_by_technician, &query).await
}

pub async fn fetch_distribution(period: Period) -> Result<Vec<DistributionSlice>, String> {
    let query = DashboardQuery::new(period).grouped_by(GROUP_BY_SERVICE);
    let (slices, _) = fetch_list(&client_config().endpoints.distribution, &query).await?;
    Ok(slices)
}

pub async fn fetch_timeline(period: Period) -> Result<Vec<TimelinePoint>, String> {
    let query = DashboardQuery::new(period);
    let (points, _) = fetch_list(&client_config().endpoints.timeline, &query).await?;
    Ok(points)
}

pub async fn fetch_pending_tickets(
    period: Period,
    page: u32,
    per_page: u32,
) -> Result<(Vec<PendingTicket>, Option<Pagination>), String> {
    let query = DashboardQuery::new(period).paged(page, per_page);
    fetch_list(&client_config().endpoints.pending_tickets, &query).await
}

pub async fn fetch_top_problems(
    period: Period,
    page: u32,
    per_page: u32,
) -> Result<(Vec<ProblemCount>, Option<Pagination>), String> {
    let query = DashboardQuery::new(period).paged(page, per_page);
    fetch_list(&client_config().endpoints.top_problems, &query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detailed(title: &str, text: &str) -> ApiMessage {
        ApiMessage::Detailed {
            icon: Some("info".into()),
            title: Some(title.into()),
            text: Some(text.into()),
        }
    }

    #[test]
    fn test_routine_message_is_hidden() {
        assert!(!notice_worth_showing(&detailed(DATA_LOADED, "Métricas actualizadas")));
    }

    #[test]
    fn test_other_messages_are_shown() {
        assert!(notice_worth_showing(&detailed("Sin datos", "No hay tickets en el período")));
        assert!(notice_worth_showing(&ApiMessage::Text("Datos parciales".into())));
        assert!(!notice_worth_showing(&ApiMessage::Text("  ".into())));
    }
}
