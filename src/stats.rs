//! The aggregated per-user summary record and its derived display strings.

use chrono::{DateTime, Months, Utc};

/// Everything the card shows for one account. Counters are totals over the
/// trailing one-year window except `total_stars`, `total_repos` and
/// `followers`, which are all-time. Missing upstream values are 0, never
/// absent.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    pub name: String,
    pub login: String,
    pub avatar_url: String,
    pub created_at: String,
    pub total_stars: u64,
    pub total_repos: u64,
    pub commits: u64,
    pub prs: u64,
    pub reviews: u64,
    pub issues: u64,
    pub contributed: u64,
    pub followers: u64,
    pub total_contributions: u64,
    /// Account-creation year-month, "YYYY-MM" (or "N/A").
    pub joined: String,
    /// "YYYY-MM to YYYY-MM" for the trailing window.
    pub period_label: String,
}

/// The trailing one-year window `[from, to)` anchored at now. Uses calendar
/// months so the label stays aligned with what the contributions query
/// covers (Feb 29 clamps to Feb 28).
pub fn trailing_window() -> (DateTime<Utc>, DateTime<Utc>) {
    let to = Utc::now();
    let from = to.checked_sub_months(Months::new(12)).unwrap_or(to);
    (from, to)
}

pub fn period_label(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    format!("{} to {}", from.format("%Y-%m"), to.format("%Y-%m"))
}

/// "YYYY-MM" from an RFC 3339 timestamp; anything unparseable is "N/A".
pub fn format_year_month(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(date) => date.format("%Y-%m").to_string(),
        Err(_) => "N/A".to_string(),
    }
}

/// Fixed dataset behind the `demo`/`test` handles and the `demo=1` flag.
/// Renders without a token or any upstream call.
pub fn demo_stats(login: &str) -> Stats {
    let (from, to) = trailing_window();
    let created_at = "2017-06-18T00:00:00Z";

    Stats {
        name: "Octavia Chen".to_string(),
        login: login.to_string(),
        avatar_url: "https://avatars.githubusercontent.com/u/9919?s=128&v=4".to_string(),
        created_at: created_at.to_string(),
        total_stars: 1480,
        total_repos: 42,
        commits: 1327,
        prs: 96,
        reviews: 28,
        issues: 34,
        contributed: 18,
        followers: 512,
        total_contributions: 1638,
        joined: format_year_month(created_at),
        period_label: period_label(from, to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_month_formats_rfc3339() {
        assert_eq!(format_year_month("2017-06-18T00:00:00Z"), "2017-06");
        assert_eq!(format_year_month("2023-12-01T10:30:00+02:00"), "2023-12");
    }

    #[test]
    fn year_month_falls_back_on_garbage() {
        assert_eq!(format_year_month(""), "N/A");
        assert_eq!(format_year_month("yesterday"), "N/A");
    }

    #[test]
    fn window_spans_one_year() {
        let (from, to) = trailing_window();
        assert!(from < to);
        let label = period_label(from, to);
        assert_eq!(label.len(), "YYYY-MM to YYYY-MM".len());
        assert!(label.contains(" to "));
    }

    #[test]
    fn demo_stats_carry_the_requested_login() {
        let stats = demo_stats("somebody");
        assert_eq!(stats.login, "somebody");
        assert_eq!(stats.name, "Octavia Chen");
        assert_eq!(stats.joined, "2017-06");
        assert_eq!(stats.commits, 1327);
    }
}
