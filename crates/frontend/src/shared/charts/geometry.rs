use std::f64::consts::PI;

pub const PRIMARY: &str = "#0d6efd";
pub const PRIMARY_FILL: &str = "rgba(13, 110, 253, 0.1)";
pub const PALETTE: [&str; 7] = [
    "#0d6efd", "#20c997", "#ffc107", "#dc3545", "#6c757d", "#6610f2", "#fd7e14",
];

/// Больше подписей по оси X не выводится
pub const MAX_AXIS_LABELS: usize = 20;

/// Шаг подписей оси: каждая `step`-я
pub fn label_step(count: usize) -> usize {
    if count > MAX_AXIS_LABELS {
        count.div_ceil(MAX_AXIS_LABELS)
    } else {
        1
    }
}

fn scale_max(values: &[i64]) -> f64 {
    values.iter().copied().max().unwrap_or(0).max(1) as f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: i64,
}

/// Столбцы в области `width × height`, ось Y от нуля
pub fn bar_layout(values: &[i64], width: f64, height: f64) -> Vec<Bar> {
    if values.is_empty() {
        return Vec::new();
    }
    let max = scale_max(values);
    let slot = width / values.len() as f64;
    let bar_width = slot * 0.7;

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let h = (value.max(0) as f64 / max) * height;
            Bar {
                x: i as f64 * slot + (slot - bar_width) / 2.0,
                y: height - h,
                width: bar_width,
                height: h,
                value,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Атрибут `d` для `<path>`
    pub path: String,
    pub color: &'static str,
    pub value: i64,
    pub percent: f64,
}

fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    // 0 рад: на 12 часов, по часовой стрелке
    (cx + r * angle.sin(), cy - r * angle.cos())
}

/// Сектора круга; нулевые и отрицательные значения пропускаются
pub fn pie_slices(values: &[i64], cx: f64, cy: f64, r: f64) -> Vec<PieSlice> {
    let total: i64 = values.iter().map(|v| (*v).max(0)).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = 0.0;
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v > 0)
        .map(|(i, &value)| {
            let share = value as f64 / total as f64;
            let color = PALETTE[i % PALETTE.len()];
            let path = if value == total {
                // единственный сектор: полный круг из двух дуг
                format!(
                    "M {cx} {top} A {r} {r} 0 1 1 {cx} {bottom} A {r} {r} 0 1 1 {cx} {top} Z",
                    cx = cx,
                    r = r,
                    top = cy - r,
                    bottom = cy + r
                )
            } else {
                let sweep = share * 2.0 * PI;
                let (x1, y1) = polar(cx, cy, r, angle);
                let (x2, y2) = polar(cx, cy, r, angle + sweep);
                let large = if sweep > PI { 1 } else { 0 };
                format!(
                    "M {cx} {cy} L {x1:.2} {y1:.2} A {r} {r} 0 {large} 1 {x2:.2} {y2:.2} Z"
                )
            };
            angle += share * 2.0 * PI;
            PieSlice {
                path,
                color,
                value,
                percent: share * 100.0,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
    pub value: i64,
}

/// Точки линии; одна точка ставится по центру
pub fn line_points(values: &[i64], width: f64, height: f64) -> Vec<LinePoint> {
    let max = scale_max(values);
    let step = if values.len() > 1 {
        width / (values.len() - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| LinePoint {
            x: if values.len() == 1 { width / 2.0 } else { i as f64 * step },
            y: height - (value.max(0) as f64 / max) * height,
            value,
        })
        .collect()
}

/// `d` ломаной через точки
pub fn line_path(points: &[LinePoint]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} {:.2} {:.2}", if i == 0 { "M" } else { "L" }, p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `d` залитой области под линией до базовой линии `height`
pub fn area_path(points: &[LinePoint], height: f64) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return String::new();
    };
    format!(
        "{} L {:.2} {:.2} L {:.2} {:.2} Z",
        line_path(points),
        last.x,
        height,
        first.x,
        height
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_step() {
        assert_eq!(label_step(0), 1);
        assert_eq!(label_step(20), 1);
        assert_eq!(label_step(21), 2);
        assert_eq!(label_step(45), 3);
        assert_eq!(label_step(365), 19);
    }

    #[test]
    fn test_bar_layout_scales_to_max() {
        let bars = bar_layout(&[5, 10, 0], 300.0, 100.0);
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[1].height, 100.0);
        assert_eq!(bars[1].y, 0.0);
        assert_eq!(bars[0].height, 50.0);
        assert_eq!(bars[2].height, 0.0);
        assert!(bars[0].x + bars[0].width <= bars[1].x);
        assert!(bar_layout(&[], 300.0, 100.0).is_empty());
    }

    #[test]
    fn test_pie_slices_percentages() {
        let slices = pie_slices(&[1, 3, 0], 50.0, 50.0, 40.0);
        assert_eq!(slices.len(), 2);
        assert!((slices[0].percent - 25.0).abs() < 1e-9);
        assert!((slices[1].percent - 75.0).abs() < 1e-9);
        assert_eq!(slices[1].color, PALETTE[1]);
        assert!(pie_slices(&[0, 0], 50.0, 50.0, 40.0).is_empty());
    }

    #[test]
    fn test_single_slice_is_full_circle() {
        let slices = pie_slices(&[7], 50.0, 50.0, 40.0);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].percent, 100.0);
        assert!(slices[0].path.matches('A').count() == 2);
    }

    #[test]
    fn test_line_points() {
        let points = line_points(&[0, 4, 2], 200.0, 100.0);
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[2].x, 200.0);
        assert_eq!(points[0].y, 100.0);
        assert_eq!(points[1].y, 0.0);
        assert_eq!(points[2].y, 50.0);

        let single = line_points(&[3], 200.0, 100.0);
        assert_eq!(single[0].x, 100.0);
    }

    #[test]
    fn test_paths() {
        let points = line_points(&[1, 1], 10.0, 10.0);
        assert_eq!(line_path(&points), "M 0.00 0.00 L 10.00 0.00");
        assert_eq!(
            area_path(&points, 10.0),
            "M 0.00 0.00 L 10.00 0.00 L 10.00 10.00 L 0.00 10.00 Z"
        );
        assert_eq!(area_path(&[], 10.0), "");
    }
}
