use crate::stats::Stats;

/// Letter tiers, best first. The set is closed, so every per-grade lookup
/// is an exhaustive match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grade {
    S,
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
}

impl Grade {
    pub fn label(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Rank {
    pub grade: Grade,
    /// In [0, 100]; lower means more of the baseline population is already
    /// exceeded, i.e. a better rank. Displayed with one decimal digit.
    pub percentile: f64,
}

const COMMITS_MEDIAN: f64 = 250.0;
const COMMITS_WEIGHT: f64 = 2.0;
const PRS_MEDIAN: f64 = 50.0;
const PRS_WEIGHT: f64 = 3.0;
const ISSUES_MEDIAN: f64 = 25.0;
const ISSUES_WEIGHT: f64 = 1.0;
const REVIEWS_MEDIAN: f64 = 2.0;
const REVIEWS_WEIGHT: f64 = 1.0;
const STARS_MEDIAN: f64 = 50.0;
const STARS_WEIGHT: f64 = 4.0;
const FOLLOWERS_MEDIAN: f64 = 10.0;
const FOLLOWERS_WEIGHT: f64 = 1.0;

const TOTAL_WEIGHT: f64 = COMMITS_WEIGHT
    + PRS_WEIGHT
    + ISSUES_WEIGHT
    + REVIEWS_WEIGHT
    + STARS_WEIGHT
    + FOLLOWERS_WEIGHT;

/// Percentile buckets, positionally paired with grades. The bound is
/// inclusive: a percentile exactly on a threshold takes that bucket.
const BUCKETS: [(f64, Grade); 9] = [
    (1.0, Grade::S),
    (12.5, Grade::APlus),
    (25.0, Grade::A),
    (37.5, Grade::AMinus),
    (50.0, Grade::BPlus),
    (62.5, Grade::B),
    (75.0, Grade::BMinus),
    (87.5, Grade::CPlus),
    (100.0, Grade::C),
];

/// `1 - 2^(-x)`: saturating curve for activity counts. Maps [0, inf) into
/// [0, 1) so no single metric can dominate the score.
fn exponential_cdf(x: f64) -> f64 {
    1.0 - 2f64.powf(-x)
}

/// `x / (1 + x)`: heavier-tailed curve for popularity counts.
fn log_normal_cdf(x: f64) -> f64 {
    x / (1.0 + x)
}

fn grade_for(percentile: f64) -> Grade {
    BUCKETS
        .iter()
        .find(|(threshold, _)| percentile <= *threshold)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::C)
}

/// Score a stats record against the fixed baselines. Total function: any
/// stats record yields a grade and a percentile in [0, 100].
pub fn calculate_rank(stats: &Stats) -> Rank {
    let weighted = COMMITS_WEIGHT * exponential_cdf(stats.commits as f64 / COMMITS_MEDIAN)
        + PRS_WEIGHT * exponential_cdf(stats.prs as f64 / PRS_MEDIAN)
        + ISSUES_WEIGHT * exponential_cdf(stats.issues as f64 / ISSUES_MEDIAN)
        + REVIEWS_WEIGHT * exponential_cdf(stats.reviews as f64 / REVIEWS_MEDIAN)
        + STARS_WEIGHT * log_normal_cdf(stats.total_stars as f64 / STARS_MEDIAN)
        + FOLLOWERS_WEIGHT * log_normal_cdf(stats.followers as f64 / FOLLOWERS_MEDIAN);

    let percentile = (1.0 - weighted / TOTAL_WEIGHT) * 100.0;

    Rank {
        grade: grade_for(percentile),
        percentile,
    }
}
