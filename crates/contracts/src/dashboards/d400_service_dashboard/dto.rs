use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::a001_ticket::{service_type_label, TicketId};
use crate::shared::number_format::deserialize_amount;

/// KPI block of the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardMetrics {
    #[serde(default)]
    pub active_tickets: i64,
    /// Average resolution time, hours
    #[serde(default)]
    pub avg_resolution_time_hours: f64,
    #[serde(default)]
    pub active_warranties: i64,
    /// Billed technical service, pesos
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub facturado_st: i64,
    /// Billed internal repair, pesos
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub facturado_ri: i64,
    #[serde(default)]
    pub trends: Option<KpiTrends>,
}

/// Period-over-period change of every KPI (`<kpi>_change`, `<kpi>_direction`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiTrends {
    #[serde(default)]
    pub active_tickets_change: Option<f64>,
    #[serde(default)]
    pub active_tickets_direction: Option<String>,
    #[serde(default)]
    pub avg_resolution_time_change: Option<f64>,
    #[serde(default)]
    pub avg_resolution_time_direction: Option<String>,
    #[serde(default)]
    pub active_warranties_change: Option<f64>,
    #[serde(default)]
    pub active_warranties_direction: Option<String>,
    #[serde(default)]
    pub facturado_st_change: Option<f64>,
    #[serde(default)]
    pub facturado_st_direction: Option<String>,
    #[serde(default)]
    pub facturado_ri_change: Option<f64>,
    #[serde(default)]
    pub facturado_ri_direction: Option<String>,
}

/// Bar of the "tickets by technician" chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicianCount {
    #[serde(default, alias = "technical_name")]
    pub technician: String,
    #[serde(default)]
    pub ticket_count: i64,
}

/// Slice of the service type distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    #[serde(default, deserialize_with = "deserialize_label")]
    pub label: String,
    #[serde(default)]
    pub value: i64,
}

impl DistributionSlice {
    /// `"0"`/`"1"`/`"2"` become `ST`/`RI`/`GA`
    pub fn display_label(&self) -> String {
        service_type_label(&self.label)
    }
}

/// Point of the created-tickets timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    #[serde(default, deserialize_with = "deserialize_label")]
    pub period: String,
    #[serde(default)]
    pub total_tickets: i64,
}

/// Row of the pending tickets table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingTicket {
    pub id: TicketId,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub technician: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub waiting_time: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub service_type: String,
}

/// Entry of the top problems list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemCount {
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub count: i64,
}

/// Page sizes of the paged widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPaging {
    #[serde(default = "default_ten")]
    pub pending_per_page: u32,
    #[serde(default = "default_ten")]
    pub technicians_per_page: u32,
    #[serde(default = "default_five")]
    pub problems_per_page: u32,
}

fn default_ten() -> u32 {
    10
}

fn default_five() -> u32 {
    5
}

impl Default for WidgetPaging {
    fn default() -> Self {
        Self {
            pending_per_page: default_ten(),
            technicians_per_page: default_ten(),
            problems_per_page: default_five(),
        }
    }
}

/// Labels may come as strings or bare numbers
fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_with_trends() {
        let m: DashboardMetrics = serde_json::from_str(
            r#"{
                "active_tickets": 12,
                "avg_resolution_time_hours": 30.5,
                "active_warranties": 3,
                "facturado_st": "1500000.00",
                "facturado_ri": 250000,
                "trends": {"active_tickets_change": 12.34, "active_tickets_direction": "up"}
            }"#,
        )
        .unwrap();
        assert_eq!(m.facturado_st, 1_500_000);
        assert_eq!(m.facturado_ri, 250_000);
        let trends = m.trends.unwrap();
        assert_eq!(trends.active_tickets_change, Some(12.34));
        assert_eq!(trends.facturado_st_change, None);
    }

    #[test]
    fn test_distribution_numeric_labels() {
        let slices: Vec<DistributionSlice> =
            serde_json::from_str(r#"[{"label": 0, "value": 5}, {"label": "2", "value": 1}, {"label": "GA", "value": 2}]"#)
                .unwrap();
        let labels: Vec<String> = slices.iter().map(|s| s.display_label()).collect();
        assert_eq!(labels, vec!["ST", "GA", "GA"]);
    }

    #[test]
    fn test_widget_paging_defaults() {
        let p = WidgetPaging::default();
        assert_eq!((p.pending_per_page, p.technicians_per_page, p.problems_per_page), (10, 10, 5));
        let p: WidgetPaging = serde_json::from_str(r#"{"problems_per_page": 8}"#).unwrap();
        assert_eq!(p.problems_per_page, 8);
        assert_eq!(p.pending_per_page, 10);
    }
}
