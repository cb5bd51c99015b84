//! Read-only projections over the aspect score log: histories, trend
//! classification, and the rows behind each dashboard chart.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Write;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::domain::{
    AspectCategory, AspectScore, AspectScoreHistory, AspectStatistics, CategoryComparison,
    RadarPoint, TimeRange, TimeSeriesRow, Trend,
};

/// Change in points needed before a trend leaves `Stable`.
pub const TREND_DEAD_BAND: f64 = 5.0;

const TREND_WINDOW: usize = 3;
/// Trend changes are compared at this many decimal places.
const TREND_PRECISION: f64 = 1e6;
const FULL_MARK: f64 = 100.0;

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Distinct aspect names in first-seen order.
pub(crate) fn aspect_names(scores: &[AspectScore]) -> Vec<String> {
    let mut seen = HashSet::new();
    scores
        .iter()
        .filter(|score| seen.insert(score.aspect_name.as_str()))
        .map(|score| score.aspect_name.clone())
        .collect()
}

/// Scores for one aspect, oldest first. Equal timestamps keep log order.
pub(crate) fn scores_for_aspect(scores: &[AspectScore], aspect_name: &str) -> Vec<AspectScore> {
    let mut matching: Vec<AspectScore> = scores
        .iter()
        .filter(|score| score.aspect_name == aspect_name)
        .cloned()
        .collect();
    matching.sort_by_key(|score| score.timestamp);
    matching
}

/// Classifies time-ordered values. Six or more compare the last three against
/// the three before them; two to five compare the endpoints.
pub fn classify_trend(values: &[f64]) -> Trend {
    let change = if values.len() >= TREND_WINDOW * 2 {
        let split = values.len() - TREND_WINDOW;
        let recent = mean(values[split..].iter().copied());
        let previous = mean(values[split - TREND_WINDOW..split].iter().copied());
        match (recent, previous) {
            (Some(recent), Some(previous)) => recent - previous,
            _ => 0.0,
        }
    } else if values.len() >= 2 {
        values[values.len() - 1] - values[0]
    } else {
        0.0
    };
    let change = (change * TREND_PRECISION).round() / TREND_PRECISION;

    if change >= TREND_DEAD_BAND {
        Trend::Improving
    } else if change <= -TREND_DEAD_BAND {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

pub(crate) fn aspect_history(scores: &[AspectScore], aspect_name: &str) -> AspectScoreHistory {
    let ordered = scores_for_aspect(scores, aspect_name);
    let values: Vec<f64> = ordered.iter().map(|score| score.score).collect();

    AspectScoreHistory {
        aspect_name: aspect_name.to_string(),
        average_score: mean(values.iter().copied()).map(round2).unwrap_or(0.0),
        trend: classify_trend(&values),
        latest_score: values.last().copied().unwrap_or(0.0),
        scores: ordered,
    }
}

pub(crate) fn time_series(
    scores: &[AspectScore],
    aspect_names: &[String],
    range: TimeRange,
    now: DateTime<Utc>,
) -> Vec<TimeSeriesRow> {
    let cutoff = range.days().map(|days| now - Duration::days(days));
    let wanted: HashSet<&str> = aspect_names.iter().map(String::as_str).collect();

    let mut buckets: BTreeMap<NaiveDate, HashMap<&str, (f64, usize)>> = BTreeMap::new();
    for score in scores {
        if !wanted.contains(score.aspect_name.as_str()) {
            continue;
        }
        if cutoff.is_some_and(|cutoff| score.timestamp < cutoff) {
            continue;
        }
        let entry = buckets
            .entry(score.timestamp.date_naive())
            .or_default()
            .entry(score.aspect_name.as_str())
            .or_insert((0.0, 0));
        entry.0 += score.score;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(date, day)| TimeSeriesRow {
            date,
            values: aspect_names
                .iter()
                .map(|name| {
                    let value = day
                        .get(name.as_str())
                        .map(|(sum, count)| sum / *count as f64);
                    (name.clone(), value)
                })
                .collect(),
        })
        .collect()
}

/// Most recent score per aspect, in first-seen aspect order. On a timestamp
/// tie the earlier log entry wins.
pub(crate) fn latest_scores(scores: &[AspectScore]) -> Vec<AspectScore> {
    let mut order: Vec<&str> = Vec::new();
    let mut latest: HashMap<&str, &AspectScore> = HashMap::new();
    for score in scores {
        let name = score.aspect_name.as_str();
        let replace = match latest.get(name) {
            Some(existing) => score.timestamp > existing.timestamp,
            None => {
                order.push(name);
                true
            }
        };
        if replace {
            latest.insert(name, score);
        }
    }

    order
        .into_iter()
        .filter_map(|name| latest.get(name).map(|score| (*score).clone()))
        .collect()
}

/// Groups values by a key while keeping first-seen key order.
fn group_ordered<K, I>(items: I) -> Vec<(K, Vec<f64>)>
where
    K: PartialEq,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut groups: Vec<(K, Vec<f64>)> = Vec::new();
    for (key, value) in items {
        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, values)) => values.push(value),
            None => groups.push((key, vec![value])),
        }
    }
    groups
}

pub(crate) fn radar_chart(scores: &[AspectScore], interview_id: Option<&str>) -> Vec<RadarPoint> {
    let source: Vec<AspectScore> = match interview_id {
        Some(id) => scores
            .iter()
            .filter(|score| score.interview_id == id)
            .cloned()
            .collect(),
        None => latest_scores(scores),
    };

    group_ordered(
        source
            .iter()
            .map(|score| (score.aspect_name.as_str(), score.score)),
    )
    .into_iter()
    .map(|(aspect, values)| RadarPoint {
        aspect: aspect.to_string(),
        score: mean(values).map(f64::round).unwrap_or(0.0),
        full_mark: FULL_MARK,
    })
    .collect()
}

pub(crate) fn category_comparison(scores: &[AspectScore]) -> Vec<CategoryComparison> {
    group_ordered(scores.iter().map(|score| (score.category, score.score)))
        .into_iter()
        .map(|(category, values)| CategoryComparison {
            category: AspectCategory::display_label(category).to_string(),
            count: values.len(),
            average_score: mean(values).map(f64::round).unwrap_or(0.0),
        })
        .collect()
}

pub(crate) fn statistics(scores: &[AspectScore]) -> AspectStatistics {
    let interviews: HashSet<&str> = scores
        .iter()
        .map(|score| score.interview_id.as_str())
        .collect();
    let per_aspect = group_ordered(
        scores
            .iter()
            .map(|score| (score.aspect_name.as_str(), score.score)),
    );

    let mut best: Option<(&str, f64)> = None;
    let mut worst: Option<(&str, f64)> = None;
    for (name, values) in &per_aspect {
        let Some(average) = mean(values.iter().copied()) else {
            continue;
        };
        if best.map_or(true, |(_, top)| average > top) {
            best = Some((*name, average));
        }
        if worst.map_or(true, |(_, bottom)| average < bottom) {
            worst = Some((*name, average));
        }
    }

    AspectStatistics {
        total_scores: scores.len(),
        total_interviews: interviews.len(),
        aspects_tracked: per_aspect.len(),
        average_score: mean(scores.iter().map(|score| score.score))
            .map(round2)
            .unwrap_or(0.0),
        best_aspect: best.map(|(name, _)| name.to_string()),
        worst_aspect: worst.map(|(name, _)| name.to_string()),
    }
}

/// Writes time-series rows as CSV: a `date` column followed by one column per
/// aspect, empty where the aspect has no score that day.
pub fn write_time_series_csv<W: Write>(
    rows: &[TimeSeriesRow],
    aspect_names: &[String],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["date".to_string()];
    header.extend(aspect_names.iter().cloned());
    csv_writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.date.format("%Y-%m-%d").to_string()];
        record.extend(aspect_names.iter().map(|name| {
            row.values
                .get(name)
                .copied()
                .flatten()
                .map(|value| format!("{}", round2(value)))
                .unwrap_or_default()
        }));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}
