//! Форматирование денежных сумм в локали es-CO (разделитель тысяч: точка)
//!
//! Суммы в интерфейсе: целые песо. На проводе (JSON) они приходят машинными
//! числами, а в полях ввода живут как строки вида `1.234.567`.

use serde::{Deserialize, Deserializer};

/// Форматирует целое число с разделителем тысяч (точкой)
///
/// # Примеры
/// ```
/// use contracts::shared::number_format::format_thousands;
/// assert_eq!(format_thousands(1234567), "1.234.567");
/// assert_eq!(format_thousands(0), "0");
/// ```
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Денежное значение со знаком `$`
pub fn format_currency(n: i64) -> String {
    format!("${}", format_thousands(n))
}

/// Убирает форматирование и возвращает число; при ошибке: 0
///
/// Разделители `.` и `,` игнорируются, разбор идёт по ведущим цифрам
/// (как `parseInt`): `"12abc"` → 12, `""` → 0.
pub fn unformat(s: &str) -> i64 {
    let cleaned: String = s
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != '.' && *c != ',' && !c.is_whitespace())
        .collect();
    parse_leading_int(&cleaned)
}

/// Целое из ведущих цифр без снятия разделителей (как `parseInt`)
///
/// `"1.5"` → 1, `"3 uds"` → 3, `"-2"` → -2, `""` и `"abc"` → 0.
pub fn parse_leading_int(s: &str) -> i64 {
    let s = s.trim();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }

    match digits.parse::<i64>() {
        Ok(v) if negative => -v,
        Ok(v) => v,
        Err(_) => 0,
    }
}

/// Переформатирует поле ввода суммы «на лету»
///
/// Оставляет только цифры, пустое значение превращает в `"0"` и сдвигает
/// курсор на разницу длин (не меньше 0 и не дальше конца строки).
/// Возвращает новое значение и новую позицию курсора.
pub fn reformat_amount_input(raw: &str, caret: usize) -> (String, usize) {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return ("0".to_string(), 1);
    }

    // i64 вмещает 18 цифр без переполнения
    let trimmed = digits.trim_start_matches('0');
    let significant = if trimmed.len() > 18 {
        &trimmed[..18]
    } else {
        trimmed
    };
    let value = significant.parse::<i64>().unwrap_or(0);
    let formatted = format_thousands(value);

    let old_len = raw.chars().count() as i64;
    let new_len = formatted.chars().count() as i64;
    let new_caret = (caret as i64 + new_len - old_len).clamp(0, new_len) as usize;

    (formatted, new_caret)
}

/// Политика исправления сумм, «умноженных на 100»
///
/// Старые данные иногда приходили как `1500000` вместо `15000`
/// (строка `"15000.00"` без учёта дробной части). Эвристика ненадёжна,
/// поэтому по умолчанию выключена и даже во включённом виде только
/// предлагает исправление: применяет его пользователь.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleCorrection {
    #[default]
    Disabled,
    LegacyHeuristic,
}

impl ScaleCorrection {
    pub fn suggest(&self, value: i64, raw: &str) -> Option<i64> {
        match self {
            ScaleCorrection::Disabled => None,
            ScaleCorrection::LegacyHeuristic => detect_scaled_by_hundred(value, raw),
        }
    }
}

/// Эвристика: значение похоже на сумму, умноженную на 100
///
/// Срабатывает только для значений > 10 000, кратных 100, чья исходная строка
/// заканчивается на `00`, не содержит разделителей и не заканчивается на `0000`.
pub fn detect_scaled_by_hundred(value: i64, raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if value <= 10_000 || value % 100 != 0 {
        return None;
    }
    if !raw.ends_with("00") || raw.contains('.') || raw.ends_with("0000") {
        return None;
    }
    Some(value / 100)
}

/// Десериализация суммы, пришедшей числом или строкой
///
/// Строки разбираются как машинные десятичные (`"15000.00"` → 15000);
/// если это не удалось: как отформатированный ввод (`"15.000"` → 15000).
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(amount_from_json(&value).unwrap_or(0))
}

/// То же для необязательной суммы
pub fn deserialize_amount_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(amount_from_json(&value))
}

fn amount_from_json(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            match s.parse::<f64>() {
                Ok(f) if f.is_finite() && !looks_grouped(s) => Some(f.round() as i64),
                _ => Some(unformat(s)),
            }
        }
        _ => None,
    }
}

/// `"15.000"`: это разделитель тысяч, а не дробная часть
fn looks_grouped(s: &str) -> bool {
    let mut groups = s.trim_start_matches('-').split('.');
    let head = groups.next().unwrap_or_default();
    let tail: Vec<&str> = groups.collect();
    !tail.is_empty()
        && !head.is_empty()
        && head.len() <= 3
        && tail.iter().all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(42), "42");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1.000");
        assert_eq!(format_thousands(1234567), "1.234.567");
        assert_eq!(format_thousands(-1234), "-1.234");
    }

    #[test]
    fn test_unformat() {
        assert_eq!(unformat("1.234.567"), 1234567);
        assert_eq!(unformat("1,234"), 1234);
        assert_eq!(unformat(""), 0);
        assert_eq!(unformat("abc"), 0);
        assert_eq!(parse_leading_int("1.5"), 1);
        assert_eq!(parse_leading_int(" 3 uds"), 3);
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(unformat("12abc"), 12);
        assert_eq!(unformat("$25.000"), 25000);
        assert_eq!(unformat("-3.000"), -3000);
    }

    #[test]
    fn test_unformat_inverts_format() {
        let samples = [0_i64, 1, 99, 100, 999, 1_000, 10_001, 123_456, 9_999_999, i64::MAX];
        for n in samples {
            assert_eq!(unformat(&format_thousands(n)), n, "n = {}", n);
        }
        for n in (0..20_000).step_by(7) {
            assert_eq!(unformat(&format_thousands(n)), n);
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1500000), "$1.500.000");
    }

    #[test]
    fn test_reformat_amount_input() {
        // пользователь дописал цифру в конец "1.234" -> "1.2345"
        assert_eq!(reformat_amount_input("1.2345", 6), ("12.345".to_string(), 6));
        // вставка разделителя сдвигает курсор вправо
        assert_eq!(reformat_amount_input("1000", 4), ("1.000".to_string(), 5));
        assert_eq!(reformat_amount_input("", 0), ("0".to_string(), 1));
        assert_eq!(reformat_amount_input("abc", 3), ("0".to_string(), 1));
        // стирание разделителя не уводит курсор за начало
        assert_eq!(reformat_amount_input("1.00", 0), ("100".to_string(), 0));
    }

    #[test]
    fn test_detect_scaled_by_hundred() {
        assert_eq!(detect_scaled_by_hundred(1_500_000, "1500000"), None); // "0000"
        assert_eq!(detect_scaled_by_hundred(1_234_500, "1234500"), Some(12_345));
        assert_eq!(detect_scaled_by_hundred(1_234_500, "1.234.500"), None);
        assert_eq!(detect_scaled_by_hundred(9_900, "9900"), None);
        assert_eq!(detect_scaled_by_hundred(1_234_567, "1234567"), None);
    }

    #[test]
    fn test_scale_correction_disabled_by_default() {
        assert_eq!(ScaleCorrection::default().suggest(1_234_500, "1234500"), None);
        assert_eq!(
            ScaleCorrection::LegacyHeuristic.suggest(1_234_500, "1234500"),
            Some(12_345)
        );
    }

    #[derive(Deserialize)]
    struct Amounts {
        #[serde(deserialize_with = "deserialize_amount")]
        a: i64,
        #[serde(default, deserialize_with = "deserialize_amount_opt")]
        b: Option<i64>,
    }

    #[test]
    fn test_deserialize_amount() {
        let v: Amounts = serde_json::from_str(r#"{"a": "15000.00", "b": 2500.4}"#).unwrap();
        assert_eq!(v.a, 15000);
        assert_eq!(v.b, Some(2500));

        let v: Amounts = serde_json::from_str(r#"{"a": "15.000"}"#).unwrap();
        assert_eq!(v.a, 15000);
        assert_eq!(v.b, None);

        let v: Amounts = serde_json::from_str(r#"{"a": null, "b": ""}"#).unwrap();
        assert_eq!(v.a, 0);
        assert_eq!(v.b, None);
    }
}
