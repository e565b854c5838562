use serde::{Deserialize, Serialize};

use crate::shared::number_format::{
    deserialize_amount, deserialize_amount_opt, parse_leading_int, unformat,
};

// ============================================================================
// Catalog item
// ============================================================================

/// Запчасть из каталога (результат поиска)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparePart {
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_amount_opt")]
    pub price: Option<i64>,
    #[serde(default)]
    pub stock: Option<i64>,
}

impl SparePart {
    pub fn display_label(&self) -> String {
        display_label(&self.code, &self.description)
    }
}

fn display_label(code: &str, description: &str) -> String {
    if description.is_empty() {
        code.to_string()
    } else {
        format!("{} - {}", code, description)
    }
}

// ============================================================================
// Line item
// ============================================================================

/// Строка таблицы запчастей тикета
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartLine {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub unit_price: i64,
    #[serde(default = "one")]
    pub quantity: i64,
}

fn one() -> i64 {
    1
}

impl Default for PartLine {
    fn default() -> Self {
        Self {
            code: String::new(),
            description: String::new(),
            unit_price: 0,
            quantity: 1,
        }
    }
}

impl PartLine {
    pub fn total(&self) -> i64 {
        self.quantity.saturating_mul(self.unit_price)
    }

    /// Правило потери фокуса: количество меньше 1 становится 1
    pub fn normalized_quantity(&self) -> i64 {
        self.quantity.max(1)
    }

    pub fn display_label(&self) -> String {
        display_label(&self.code, &self.description)
    }

    pub fn has_part(&self) -> bool {
        !self.code.trim().is_empty()
    }
}

/// Упорядоченный набор строк запчастей; итоги всегда пересчитываются
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartLines {
    lines: Vec<PartLine>,
}

impl PartLines {
    pub fn new(lines: Vec<PartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[PartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PartLine> {
        self.lines.get(index)
    }

    /// Добавляет пустую строку, возвращает её индекс
    pub fn push(&mut self) -> usize {
        self.lines.push(PartLine::default());
        self.lines.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<PartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Количество из поля ввода: ведущие цифры, иначе 0; `"1.5"` → 1
    pub fn set_quantity(&mut self, index: usize, raw: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = parse_leading_int(raw);
        }
    }

    pub fn normalize_quantity(&mut self, index: usize) {
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = line.normalized_quantity();
        }
    }

    pub fn set_unit_price(&mut self, index: usize, raw: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            line.unit_price = unformat(raw);
        }
    }

    /// Выбор запчасти из поиска: код, описание и цена каталога (если есть)
    pub fn select_part(&mut self, index: usize, part: &SparePart) {
        if let Some(line) = self.lines.get_mut(index) {
            line.code = part.code.clone();
            line.description = part.description.clone();
            if let Some(price) = part.price {
                line.unit_price = price;
            }
        }
    }

    pub fn spare_total(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |acc, line| acc.saturating_add(line.total()))
    }

    pub fn grand_total(&self, service_value: i64) -> i64 {
        self.spare_total().saturating_add(service_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(code: &str, price: Option<i64>) -> SparePart {
        SparePart {
            code: code.into(),
            description: format!("Pantalla {}", code),
            price,
            stock: None,
        }
    }

    #[test]
    fn test_totals_follow_every_edit() {
        let mut lines = PartLines::default();
        let a = lines.push();
        let b = lines.push();
        lines.select_part(a, &part("P-100", Some(25_000)));
        lines.set_quantity(a, "2");
        lines.set_unit_price(b, "1.500");
        lines.set_quantity(b, "3");

        for line in lines.lines() {
            assert_eq!(line.total(), line.quantity * line.unit_price);
        }
        assert_eq!(lines.spare_total(), 50_000 + 4_500);
        assert_eq!(lines.grand_total(20_000), 74_500);

        lines.set_quantity(a, "abc");
        assert_eq!(lines.get(a).map(PartLine::total), Some(0));
        assert_eq!(lines.spare_total(), 4_500);

        lines.remove(b);
        assert_eq!(lines.spare_total(), 0);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_quantity_keeps_leading_digits_only() {
        let mut lines = PartLines::default();
        let a = lines.push();
        lines.set_quantity(a, "1.5");
        assert_eq!(lines.get(a).map(|l| l.quantity), Some(1));
        lines.set_quantity(a, "1.000");
        assert_eq!(lines.get(a).map(|l| l.quantity), Some(1));
    }

    #[test]
    fn test_quantity_blur_rule() {
        let mut lines = PartLines::default();
        let i = lines.push();
        lines.set_quantity(i, "0");
        lines.normalize_quantity(i);
        assert_eq!(lines.get(i).map(|l| l.quantity), Some(1));

        lines.set_quantity(i, "-4");
        assert_eq!(lines.get(i).map(|l| l.normalized_quantity()), Some(1));
    }

    #[test]
    fn test_select_part_without_price_keeps_price() {
        let mut lines = PartLines::default();
        let i = lines.push();
        lines.set_unit_price(i, "9.000");
        lines.select_part(i, &part("X1", None));
        let line = lines.get(i).cloned().unwrap_or_default();
        assert_eq!(line.unit_price, 9_000);
        assert_eq!(line.display_label(), "X1 - Pantalla X1");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut lines = PartLines::default();
        assert_eq!(lines.remove(3), None);
    }

    #[test]
    fn test_lines_deserialize_from_server() {
        let lines: PartLines = serde_json::from_str(
            r#"[{"code": "A1", "description": "Batería", "unit_price": "35000.00", "quantity": 2}]"#,
        )
        .unwrap();
        assert_eq!(lines.spare_total(), 70_000);
    }
}
