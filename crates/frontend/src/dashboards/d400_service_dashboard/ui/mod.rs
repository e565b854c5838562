mod dashboard;

pub use dashboard::ServiceDashboard;
