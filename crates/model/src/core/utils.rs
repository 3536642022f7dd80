/// Renders a float the way spreadsheet consumers of this table expect it:
/// integral values keep a trailing `.0`, everything else uses the shortest
/// round-trip representation.
pub fn format_float(v: f64) -> String {
    // Adding positive zero folds `-0.0` into `0.0`.
    let v = v + 0.0;
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}
