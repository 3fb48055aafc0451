use super::CellValue;

/// Format a computed cell value for display.
pub fn format_value(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Number(n) => format_number(*n),
        CellValue::Error(e) => e.to_string(),
    }
}

/// Format a number for display.
pub fn format_number(n: f64) -> String {
    // -0.0 == 0.0, so this also drops the sign of negative zero.
    let n = if n == 0.0 { 0.0 } else { n };
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        format!("{:.0}", n)
    } else {
        format!("{:.2}", n)
    }
}
