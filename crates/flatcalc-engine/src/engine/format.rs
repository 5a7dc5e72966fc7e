/// Format a number for output.
///
/// Whole numbers drop the fractional part (`8`, not `8.0`); everything else
/// uses the shortest representation that parses back to the same value.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}
