//! Конфигурация клиента
//!
//! Встроенный TOML по умолчанию; при старте приложение пытается загрузить
//! `/config.toml` рядом с бандлом и при любой ошибке остаётся на встроенном.

use anyhow::Context;
use contracts::dashboards::d400_service_dashboard::WidgetPaging;
use contracts::shared::number_format::ScaleCorrection;
use serde::Deserialize;
use std::sync::OnceLock;

pub const DEFAULT_CONFIG: &str = r#"
[api]
# пусто = тот же origin, что и у страницы
base_url = ""

[ui]
toast_ms = 3000
filter_debounce_ms = 800
part_search_debounce_ms = 300
scale_correction = "disabled"

[filters]
cities = ["Bogotá", "Medellín", "Cali", "Barranquilla"]

[paging]
pending_per_page = 10
technicians_per_page = 10
problems_per_page = 5

[endpoints]
metrics = "/tickets/dashboard/metrics"
tickets_by_technician = "/tickets/dashboard/tickets-by-technician"
distribution = "/tickets/dashboard/tickets-distribution"
timeline = "/tickets/dashboard/timeline-data"
pending_tickets = "/tickets/dashboard/pending-tickets"
top_problems = "/tickets/dashboard/top-problems"
ticket_detail = "/tickets/api/ticket"
ticket_save = "/tickets/edit_ticket"
search_spare_parts = "/tickets/search_spare_parts"
update_status = "/tickets/update_ticket_status_ajax"
"#;

pub const CONFIG_PATH: &str = "/config.toml";

/// Встроенный TOML задаёт все значения; `Default` даёт пустую конфигурацию
/// и нужен только если встроенный текст не разобрался
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub filters: FilterConfig,
    pub paging: WidgetPaging,
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiConfig {
    pub toast_ms: u32,
    pub filter_debounce_ms: u32,
    pub part_search_debounce_ms: u32,
    pub scale_correction: ScaleCorrection,
}

/// Города в фильтре списков тикетов
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    pub cities: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Endpoints {
    pub metrics: String,
    pub tickets_by_technician: String,
    pub distribution: String,
    pub timeline: String,
    pub pending_tickets: String,
    pub top_problems: String,
    pub ticket_detail: String,
    pub ticket_save: String,
    pub search_spare_parts: String,
    pub update_status: String,
}

/// Накладывает `overrides` на `base`: таблицы сливаются по ключам,
/// остальные значения (включая массивы) заменяются целиком
fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(inner)), toml::Value::Table(value)) => {
                merge_tables(inner, value)
            }
            (Some(slot), value) => *slot = value,
            (None, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Разбирает `text` поверх встроенной конфигурации
pub fn parse_config(text: &str) -> anyhow::Result<ClientConfig> {
    let mut merged: toml::Table = DEFAULT_CONFIG
        .parse()
        .context("Failed to parse embedded config TOML")?;
    let overrides: toml::Table = text.parse().context("Failed to parse config TOML")?;
    merge_tables(&mut merged, overrides);
    let config: ClientConfig = toml::Value::Table(merged)
        .try_into()
        .context("Invalid config values")?;
    Ok(config)
}

static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Текущая конфигурация (встроенная, если `install` ещё не вызывался)
pub fn client_config() -> &'static ClientConfig {
    CONFIG.get_or_init(embedded_config)
}

/// Фиксирует конфигурацию на всё время жизни страницы
pub fn install(config: ClientConfig) {
    if CONFIG.set(config).is_err() {
        log::warn!("Client config already installed, keeping the first one");
    }
}

async fn fetch_config() -> anyhow::Result<ClientConfig> {
    let response = gloo_net::http::Request::get(CONFIG_PATH)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("Request failed: {}", e))?;
    if !response.ok() {
        anyhow::bail!("HTTP error: {}", response.status());
    }
    let text = response
        .text()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read body: {}", e))?;
    parse_config(&text)
}

/// Загружает `/config.toml`, при ошибке: встроенная конфигурация
pub async fn load_client_config() -> ClientConfig {
    match fetch_config().await {
        Ok(config) => {
            log::info!("Loaded client config from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            log::warn!("Using embedded config ({}): {:#}", CONFIG_PATH, e);
            embedded_config()
        }
    }
}

pub fn embedded_config() -> ClientConfig {
    parse_config("").unwrap_or_else(|e| {
        log::error!("Embedded config is invalid: {:#}", e);
        ClientConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.base_url, "");
        assert_eq!(config.ui.filter_debounce_ms, 800);
        assert_eq!(config.ui.part_search_debounce_ms, 300);
        assert_eq!(config.ui.scale_correction, ScaleCorrection::Disabled);
        assert_eq!(config.paging.problems_per_page, 5);
        assert_eq!(config.filters.cities.len(), 4);
        assert_eq!(config.endpoints.update_status, "/tickets/update_ticket_status_ajax");
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
            [api]
            base_url = "https://soporte.example.co"

            [ui]
            scale_correction = "legacy_heuristic"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://soporte.example.co");
        assert_eq!(config.ui.scale_correction, ScaleCorrection::LegacyHeuristic);
        assert_eq!(config.ui.toast_ms, 3000);
        assert_eq!(config.ui.filter_debounce_ms, 800);
        assert_eq!(config.paging.pending_per_page, 10);
        assert_eq!(
            config.filters.cities,
            vec!["Bogotá", "Medellín", "Cali", "Barranquilla"]
        );
        assert_eq!(config.endpoints.metrics, "/tickets/dashboard/metrics");
        assert_eq!(config.endpoints.update_status, "/tickets/update_ticket_status_ajax");
    }

    #[test]
    fn test_override_replaces_lists() {
        let config = parse_config(
            r#"
            [filters]
            cities = ["Pereira"]

            [endpoints]
            metrics = "/v2/metrics"
            "#,
        )
        .unwrap();
        assert_eq!(config.filters.cities, vec!["Pereira"]);
        assert_eq!(config.endpoints.metrics, "/v2/metrics");
        assert_eq!(config.endpoints.ticket_save, "/tickets/edit_ticket");
    }

    #[test]
    fn test_embedded_config_is_complete() {
        let config = embedded_config();
        assert_eq!(config.filters.cities.len(), 4);
        assert_eq!(config.endpoints.search_spare_parts, "/tickets/search_spare_parts");
    }

    #[test]
    fn test_invalid_config_is_error() {
        assert!(parse_config("[ui]\ntoast_ms = \"soon\"").is_err());
    }
}
