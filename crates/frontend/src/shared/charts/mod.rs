//! SVG-графики дашборда
//!
//! Геометрия считается чистыми функциями в `geometry`, компоненты только
//! рисуют готовые координаты.

pub mod bar_chart;
pub mod geometry;
pub mod line_chart;
pub mod pie_chart;

pub use bar_chart::BarChart;
pub use line_chart::LineChart;
pub use pie_chart::PieChart;
