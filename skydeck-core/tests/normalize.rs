mod common;

use chrono::{Datelike, NaiveDate};
use serde_json::json;
use skydeck_core::{InvalidInputError, normalize_forecast, time::offset_from_seconds};

use common::{START, STEP, forecast_list, icon, temp};

#[test]
fn forty_samples_over_five_days() {
    let list = forecast_list();
    let result = normalize_forecast(Some(&list), offset_from_seconds(0)).unwrap();

    assert_eq!(result.daily.len(), 5);
    for (day, bucket) in result.daily.iter().enumerate() {
        let day = day as i64;
        assert_eq!(bucket.date, NaiveDate::from_ymd_opt(2024, 3, 1 + day as u32).unwrap());
        assert_eq!(bucket.items.len(), 8);
        // min of round(t - 1.0) is at slot 0, max of round(t + 1.0) at slot 7
        assert_eq!(bucket.temp_min, (temp(day, 0) - 1.0).round() as i64);
        assert_eq!(bucket.temp_max, (temp(day, 7) + 1.0).round() as i64);
        assert!(bucket.temp_min <= bucket.temp_max);
        assert_eq!(bucket.icon_code(), icon(day * 8));
    }

    assert_eq!(result.hourly.len(), 24);
    for (i, entry) in result.hourly.iter().enumerate() {
        let i = i as i64;
        assert_eq!(entry.time.timestamp(), START + i * STEP);
        assert_eq!(entry.temperature, temp(i / 8, i % 8).round() as i64);
        assert_eq!(entry.icon_code, icon(i));
        assert_eq!(entry.description, format!("sky {i}"));
    }
}

#[test]
fn location_offset_moves_day_boundaries() {
    let list = forecast_list();
    // UTC+09:00: the first UTC day starts at 09:00 local time, and the last
    // samples spill into a sixth local day which is cut off.
    let result = normalize_forecast(Some(&list), offset_from_seconds(9 * 3600)).unwrap();

    assert_eq!(result.daily.len(), 5);
    assert_eq!(result.daily[0].date.day(), 1);
    assert_eq!(result.daily[0].items.len(), 5);
    assert_eq!(result.daily[1].items.len(), 8);
}

#[test]
fn invalid_inputs_raise() {
    let utc = offset_from_seconds(0);
    assert_eq!(normalize_forecast(None, utc), Err(InvalidInputError::Missing));
    assert_eq!(normalize_forecast(Some(&json!([])), utc), Err(InvalidInputError::Empty));
    assert_eq!(
        normalize_forecast(Some(&json!("not a list")), utc),
        Err(InvalidInputError::NotASequence)
    );
    assert_eq!(
        normalize_forecast(Some(&json!({"list": []})), utc),
        Err(InvalidInputError::NotASequence)
    );
}
