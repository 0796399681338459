use std::collections::BTreeMap;
use std::fmt::Display;

/// Placeholder shown for missing values (no pick, no leaderboard entry, no score yet).
pub const MISSING: &str = "—";

/// Standard competition ranking ("1224") over rows already sorted best-first.
///
/// Rows whose keys compare equal share a rank; the next distinct key resumes at
/// the number of rows seen so far plus one.
pub fn competition_ranks<T, K, F>(sorted: &[T], key: F) -> Vec<u32>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut ranks = Vec::with_capacity(sorted.len());
    let mut previous: Option<K> = None;
    let mut current = 0u32;

    for (i, item) in sorted.iter().enumerate() {
        let k = key(item);
        if previous.as_ref() != Some(&k) {
            current = i as u32 + 1;
        }
        ranks.push(current);
        previous = Some(k);
    }

    ranks
}

/// How many rows share each rank.
pub fn tie_counts<I>(ranks: I) -> BTreeMap<u32, u32>
where
    I: IntoIterator<Item = u32>,
{
    let mut counts = BTreeMap::new();
    for rank in ranks {
        *counts.entry(rank).or_insert(0) += 1;
    }
    counts
}

/// Fixed-point key for comparing float totals at display precision.
pub fn cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// "<abbr> <margin>", or blank for a zero-margin (pick 'em) pick.
pub fn format_margin_label(abbr: &str, margin: u32) -> String {
    if margin == 0 {
        String::new()
    } else {
        format!("{} {}", abbr, margin)
    }
}

/// Appends " (<score>)" to a pick label; a blank label becomes just "(<score>)".
pub fn with_score_suffix(label: &str, score: u32) -> String {
    if label.is_empty() {
        format!("({})", score)
    } else {
        format!("{} ({})", label, score)
    }
}

/// Mean margins use the home team when non-negative and one decimal place.
pub fn format_consensus_label(home_abbr: &str, away_abbr: &str, mean: f64) -> String {
    if mean == 0.0 {
        return String::new();
    }
    let abbr = if mean >= 0.0 { home_abbr } else { away_abbr };
    format!("{} {:.1}", abbr, mean.abs())
}

pub fn format_optional<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Whole points print bare; tie-averaged points keep up to two decimals.
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        format!("{:.2}", points).trim_end_matches('0').to_string()
    }
}
