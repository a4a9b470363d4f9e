/// Scales a bar series so the largest value reaches `max_height`.
///
/// Negative values are drawn as empty bars. When the series has no positive maximum, or
/// contains a non-finite value, every bar is flat.
pub fn bar_heights(series: &[f64], max_height: f64) -> Vec<f64> {
    if series.iter().any(|value| !value.is_finite()) {
        return vec![0.0; series.len()];
    }
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= 0.0 {
        return vec![0.0; series.len()];
    }
    series.iter().map(|value| value.max(0.0) / max * max_height).collect()
}
