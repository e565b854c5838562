use super::dto::KpiTrends;

/// KPI cards of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kpi {
    ActiveTickets,
    AvgResolutionTime,
    ActiveWarranties,
    FacturadoSt,
    FacturadoRi,
}

impl Kpi {
    pub const ALL: [Kpi; 5] = [
        Kpi::ActiveTickets,
        Kpi::AvgResolutionTime,
        Kpi::ActiveWarranties,
        Kpi::FacturadoSt,
        Kpi::FacturadoRi,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Kpi::ActiveTickets => "active_tickets",
            Kpi::AvgResolutionTime => "avg_resolution_time",
            Kpi::ActiveWarranties => "active_warranties",
            Kpi::FacturadoSt => "facturado_st",
            Kpi::FacturadoRi => "facturado_ri",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Kpi::ActiveTickets => "Tickets activos",
            Kpi::AvgResolutionTime => "Tiempo promedio de resolución",
            Kpi::ActiveWarranties => "Garantías activas",
            Kpi::FacturadoSt => "Facturado ST",
            Kpi::FacturadoRi => "Facturado RI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("up") => TrendDirection::Up,
            Some("down") => TrendDirection::Down,
            _ => TrendDirection::Flat,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            TrendDirection::Up => "trend trend--up",
            TrendDirection::Down => "trend trend--down",
            TrendDirection::Flat => "trend trend--neutral",
        }
    }
}

/// What a KPI card shows under its value
#[derive(Debug, Clone, PartialEq)]
pub struct TrendView {
    pub direction: TrendDirection,
    pub text: String,
    progress: Option<f64>,
}

impl TrendView {
    /// Card without trend data
    pub fn missing() -> Self {
        Self {
            direction: TrendDirection::Flat,
            text: "--".to_string(),
            progress: None,
        }
    }

    /// Width of the progress bar, percent in `10..=100`
    pub fn progress_percent(&self) -> Option<f64> {
        self.progress
    }
}

impl KpiTrends {
    pub fn change(&self, kpi: Kpi) -> Option<f64> {
        match kpi {
            Kpi::ActiveTickets => self.active_tickets_change,
            Kpi::AvgResolutionTime => self.avg_resolution_time_change,
            Kpi::ActiveWarranties => self.active_warranties_change,
            Kpi::FacturadoSt => self.facturado_st_change,
            Kpi::FacturadoRi => self.facturado_ri_change,
        }
    }

    pub fn direction(&self, kpi: Kpi) -> Option<&str> {
        match kpi {
            Kpi::ActiveTickets => self.active_tickets_direction.as_deref(),
            Kpi::AvgResolutionTime => self.avg_resolution_time_direction.as_deref(),
            Kpi::ActiveWarranties => self.active_warranties_direction.as_deref(),
            Kpi::FacturadoSt => self.facturado_st_direction.as_deref(),
            Kpi::FacturadoRi => self.facturado_ri_direction.as_deref(),
        }
    }
}

pub fn kpi_trend(trends: Option<&KpiTrends>, kpi: Kpi) -> TrendView {
    let Some(trends) = trends else {
        return TrendView::missing();
    };
    let Some(change) = trends.change(kpi).filter(|c| c.is_finite()) else {
        return TrendView::missing();
    };

    let magnitude = change.abs();
    let progress = Some(magnitude.clamp(10.0, 100.0));

    if magnitude < 0.1 {
        return TrendView {
            direction: TrendDirection::Flat,
            text: "Sin cambios".to_string(),
            progress,
        };
    }

    let direction = TrendDirection::parse(trends.direction(kpi));
    let sign = match direction {
        TrendDirection::Up => "+",
        TrendDirection::Down => "-",
        TrendDirection::Flat => "",
    };
    TrendView {
        direction,
        text: format!("{}{:.1}%", sign, magnitude),
        progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trends(change: f64, direction: &str) -> KpiTrends {
        KpiTrends {
            facturado_st_change: Some(change),
            facturado_st_direction: Some(direction.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_up_and_down() {
        let t = trends(12.345, "up");
        let view = kpi_trend(Some(&t), Kpi::FacturadoSt);
        assert_eq!(view.text, "+12.3%");
        assert_eq!(view.direction, TrendDirection::Up);
        assert_eq!(view.progress_percent(), Some(12.345));

        let t = trends(-4.0, "down");
        let view = kpi_trend(Some(&t), Kpi::FacturadoSt);
        assert_eq!(view.text, "-4.0%");
        assert_eq!(view.progress_percent(), Some(10.0));
    }

    #[test]
    fn test_no_change() {
        let t = trends(0.04, "up");
        let view = kpi_trend(Some(&t), Kpi::FacturadoSt);
        assert_eq!(view.text, "Sin cambios");
        assert_eq!(view.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_missing() {
        assert_eq!(kpi_trend(None, Kpi::ActiveTickets), TrendView::missing());
        let t = trends(5.0, "up");
        assert_eq!(kpi_trend(Some(&t), Kpi::ActiveTickets).text, "--");
    }

    #[test]
    fn test_progress_is_clamped() {
        let t = trends(250.0, "up");
        assert_eq!(kpi_trend(Some(&t), Kpi::FacturadoSt).progress_percent(), Some(100.0));
    }
}
