pub mod d400_service_dashboard;

pub use d400_service_dashboard::ui::ServiceDashboard;
