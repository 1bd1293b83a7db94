/// Absolute tolerance for coordinate comparisons in tests and identity checks.
pub(crate) const EPS: f64 = 1e-9;

pub(crate) fn nearly_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

pub(crate) fn nearly_eq_slice(a: &[f64], b: &[f64], tol: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| nearly_eq(*x, *y, tol))
}
