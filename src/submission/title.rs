use super::fields::Submission;

/// Page title such as `+10 XP +5 diamonds — quiz — 2024-01-01`.
///
/// Zero-valued rewards are left out. `date` is the `YYYY-MM-DD` part of the
/// submission timestamp.
pub fn build(submission: &Submission, date: &str) -> String {
    let parts: Vec<String> = [
        (submission.xp, "XP"),
        (submission.coins, "coins"),
        (submission.diamonds, "diamonds"),
    ]
    .into_iter()
    .filter(|(value, _)| *value != 0.0)
    .map(|(value, unit)| format!("+{} {unit}", format_amount(value)))
    .collect();

    format!("{} — {} — {date}", parts.join(" "), submission.source)
}

/// Whole numbers print without a fractional part (`10`, not `10.0`).
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
