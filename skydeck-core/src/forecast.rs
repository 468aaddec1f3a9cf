//! Forecast normalization: a flat list of 3-hour samples becomes a capped
//! hourly window plus per-day min/max buckets.

use chrono::{FixedOffset, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::{
    error::InvalidInputError,
    model::{DailyBucket, ForecastResult, HourlyEntry, RawPeriodSample},
    time::local_time,
    wire::OwForecastEntry,
};

pub const MAX_HOURLY_ENTRIES: usize = 24;
pub const MAX_DAILY_BUCKETS: usize = 5;

/// Round a temperature to the nearest integer. Ties go away from zero
/// (`2.5 -> 3`, `-2.5 -> -3`).
pub fn round_temperature(value: f64) -> i64 {
    value.round() as i64
}

/// Normalize the provider's forecast `list` array.
///
/// Every element is decoded before any aggregation starts, so a malformed
/// sample anywhere in the list yields an error and no partial result.
pub fn normalize_forecast(
    list: Option<&Value>,
    offset: FixedOffset,
) -> Result<ForecastResult, InvalidInputError> {
    let items = match list {
        None | Some(Value::Null) => return Err(InvalidInputError::Missing),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(InvalidInputError::NotASequence),
    };

    let samples = items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_sample(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    normalize_samples(&samples, offset)
}

fn decode_sample(index: usize, item: &Value) -> Result<RawPeriodSample, InvalidInputError> {
    let malformed = |reason: String| InvalidInputError::MalformedSample { index, reason };

    let entry = OwForecastEntry::deserialize(item).map_err(|e| malformed(e.to_string()))?;
    RawPeriodSample::try_from(entry).map_err(malformed)
}

/// Aggregate already-decoded samples. Input order is kept; nothing is sorted.
pub fn normalize_samples(
    samples: &[RawPeriodSample],
    offset: FixedOffset,
) -> Result<ForecastResult, InvalidInputError> {
    if samples.is_empty() {
        return Err(InvalidInputError::Empty);
    }

    let mut hourly = Vec::with_capacity(samples.len().min(MAX_HOURLY_ENTRIES));
    let mut buckets: Vec<DailyBucket> = Vec::new();
    let mut index_by_day: HashMap<NaiveDate, usize> = HashMap::new();

    for (index, sample) in samples.iter().enumerate() {
        let time = local_time(sample.timestamp_seconds, offset).ok_or_else(|| {
            InvalidInputError::MalformedSample {
                index,
                reason: format!("timestamp {} is out of range", sample.timestamp_seconds),
            }
        })?;
        let entry = HourlyEntry {
            time,
            temperature: round_temperature(sample.temperature.current),
            icon_code: sample.condition.icon_code.clone(),
            description: sample.condition.description.clone(),
        };

        if hourly.len() < MAX_HOURLY_ENTRIES {
            hourly.push(entry.clone());
        }

        let low = round_temperature(sample.temperature.min);
        let high = round_temperature(sample.temperature.max);
        let day = time.date_naive();

        match index_by_day.get(&day) {
            Some(&slot) => {
                let bucket = &mut buckets[slot];
                bucket.temp_min = bucket.temp_min.min(low);
                bucket.temp_max = bucket.temp_max.max(high);
                bucket.items.push(entry);
            }
            None => {
                index_by_day.insert(day, buckets.len());
                buckets.push(DailyBucket {
                    date: day,
                    items: vec![entry],
                    temp_min: low,
                    temp_max: high,
                });
            }
        }
    }

    buckets.truncate(MAX_DAILY_BUCKETS);
    tracing::debug!(
        samples = samples.len(),
        days = buckets.len(),
        hours = hourly.len(),
        "normalized forecast"
    );

    Ok(ForecastResult { daily: buckets, hourly })
}
