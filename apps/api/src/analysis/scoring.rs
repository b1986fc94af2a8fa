/// Share of matched skills among all skills the analysis mentioned, 0–100.
/// Zero when the model reported neither matched nor missing skills.
/// Unrounded; display rounding belongs to the client.
pub fn compute_score<S: AsRef<str>>(matched: &[S], missing: &[S]) -> f64 {
    let total = matched.len() + missing.len();
    if total == 0 {
        return 0.0;
    }
    matched.len() as f64 / total as f64 * 100.0
}
