use serde_json::Value;

/// How malformed optional input is handled: `Lenient` degrades it to null
/// (the historical behavior clients depend on), `Strict` rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePolicy {
    Lenient,
    Strict,
}

impl ParsePolicy {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            ParsePolicy::Strict
        } else {
            ParsePolicy::Lenient
        }
    }
}

/// Coerce a JSON value into integer cents. Accepts integers, floats
/// (truncated) and integer strings.
pub fn parse_money(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Coerce a JSON value into a unit count.
pub fn parse_qty(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}
