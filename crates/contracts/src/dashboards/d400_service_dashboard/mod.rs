pub mod dto;
pub mod period;
pub mod trend;

pub use dto::{
    DashboardMetrics, DistributionSlice, KpiTrends, PendingTicket, ProblemCount, TechnicianCount,
    TimelinePoint, WidgetPaging,
};
pub use period::{validate_custom_range, DashboardQuery, Period, RangeError};
pub use trend::{kpi_trend, Kpi, TrendDirection, TrendView};
