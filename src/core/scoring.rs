use crate::models::{ConnectionResult, QuizAnswers};
use crate::core::{
    hash::{hash_fraction, string_hash},
    keywords::{contains_any, MUSIC_COMPANIES, MUSIC_HUBS, MUSIC_SCHOOLS},
};

/// Modal number of intermediate people before any adjustment
pub const BASE_SCORE: f64 = 4.0;

/// How far the hash-derived variation can move the score (±0.7)
pub const VARIATION_SPREAD: f64 = 1.4;

pub const MIN_CONNECTIONS: u8 = 2;
pub const MAX_CONNECTIONS: u8 = 6;

pub const MIN_RARITY: f64 = 0.1;
pub const MAX_RARITY: f64 = 25.0;

/// A weighted rule that fired for an answer set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    MusicHub,
    MusicIndustry,
    AdjacentIndustry,
    MusicSchool,
    MusicCompany,
    YoungAge,
    OlderAge,
    VeteranExperience,
    EntryExperience,
}

impl Factor {
    /// Signed change applied to the score
    pub fn delta(self) -> f64 {
        match self {
            Factor::MusicHub => -1.0,
            Factor::MusicIndustry => -1.8,
            Factor::AdjacentIndustry => -0.6,
            Factor::MusicSchool => -0.9,
            Factor::MusicCompany => -1.2,
            Factor::YoungAge => -0.4,
            Factor::OlderAge => 0.6,
            Factor::VeteranExperience => -0.5,
            Factor::EntryExperience => 0.4,
        }
    }
}

/// Every step that produced a connection count
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub base_score: f64,
    /// Fired rules in the order their deltas were applied
    pub factors: Vec<Factor>,
    pub hash: u32,
    /// In `[0.0, 0.99]`
    pub variation: f64,
    /// Score before rounding and clamping
    pub raw_score: f64,
}

impl ScoreBreakdown {
    pub fn has(&self, factor: Factor) -> bool {
        self.factors.contains(&factor)
    }
}

/// Base rarity and spread for one connection count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RarityBand {
    pub base: f64,
    pub range: f64,
}

/// Fired factors in rule order
fn matched_factors(answers: &QuizAnswers) -> Vec<Factor> {
    let mut factors = Vec::with_capacity(6);

    if contains_any(answers.city(), MUSIC_HUBS) {
        factors.push(Factor::MusicHub);
    }

    match answers.industry() {
        "music" => factors.push(Factor::MusicIndustry),
        "creative" | "marketing" => factors.push(Factor::AdjacentIndustry),
        _ => {}
    }

    if contains_any(answers.school(), MUSIC_SCHOOLS) {
        factors.push(Factor::MusicSchool);
    }

    if contains_any(answers.company(), MUSIC_COMPANIES) {
        factors.push(Factor::MusicCompany);
    }

    match answers.age_range() {
        "18-24" => factors.push(Factor::YoungAge),
        "45+" => factors.push(Factor::OlderAge),
        _ => {}
    }

    match answers.experience_level() {
        "10+" => factors.push(Factor::VeteranExperience),
        "0-2" => factors.push(Factor::EntryExperience),
        _ => {}
    }

    factors
}

/// Trace the score for an answer set
///
/// Adjustments are accumulated in rule order; the floating point result
/// depends on that order and must not be regrouped.
pub fn score_breakdown(answers: &QuizAnswers) -> ScoreBreakdown {
    let factors = matched_factors(answers);

    let mut score = BASE_SCORE;
    for factor in &factors {
        score += factor.delta();
    }

    let hash = string_hash(&answers.variation_key());
    let variation = hash_fraction(hash);
    score += (variation - 0.5) * VARIATION_SPREAD;

    ScoreBreakdown {
        base_score: BASE_SCORE,
        factors,
        hash,
        variation,
        raw_score: score,
    }
}

/// Number of intermediate people between the quiz taker and the celebrity
///
/// Total and deterministic: any answer set, including an empty one, maps
/// to a value in `2..=6`.
pub fn compute_connections(answers: &QuizAnswers) -> u8 {
    let rounded = round_half_up(score_breakdown(answers).raw_score);
    rounded.clamp(f64::from(MIN_CONNECTIONS), f64::from(MAX_CONNECTIONS)) as u8
}

/// Rarity table; out-of-range counts fall back to the 4-connection band
pub fn rarity_band(connections: u8) -> RarityBand {
    let (base, range) = match connections {
        2 => (1.0, 1.0),
        3 => (2.5, 2.0),
        4 => (5.0, 3.0),
        5 => (9.0, 5.5),
        6 => (16.0, 8.0),
        _ => (5.0, 3.0),
    };
    RarityBand { base, range }
}

/// Display rarity for a connection count, e.g. `"6.0%"`
pub fn compute_rarity(connections: u8) -> String {
    let band = rarity_band(connections);
    let variation = f64::from((u32::from(connections) * 7) % 10) / 10.0;
    let rarity = (band.base + (variation - 0.45) * band.range).clamp(MIN_RARITY, MAX_RARITY);

    format!("{:.1}%", rarity)
}

/// Score an answer set end to end
pub fn compute_result(answers: &QuizAnswers) -> ConnectionResult {
    let connections = compute_connections(answers);
    let rarity = compute_rarity(connections);

    tracing::trace!("Scored answers: connections={}, rarity={}", connections, rarity);

    ConnectionResult { connections, rarity }
}

/// Round half toward positive infinity
#[inline]
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
