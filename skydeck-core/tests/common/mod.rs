#![allow(dead_code)]

use serde_json::{Value, json};

/// 2024-03-01T00:00:00Z
pub const START: i64 = 1_709_251_200;
pub const STEP: i64 = 3 * 3600;

/// Temperature of sample `slot` (0..8) on `day` (0..5).
pub fn temp(day: i64, slot: i64) -> f64 {
    (day * 10 + slot) as f64 + 0.4
}

pub fn icon(i: i64) -> &'static str {
    ["01d", "02d", "10d", "13n"][(i % 4) as usize]
}

/// 40 three-hour samples covering exactly five UTC days.
pub fn forecast_list() -> Value {
    let list: Vec<Value> = (0..40)
        .map(|i| {
            let (day, slot) = (i / 8, i % 8);
            let t = temp(day, slot);
            json!({
                "dt": START + i * STEP,
                "main": {"temp": t, "feels_like": t, "temp_min": t - 1.0, "temp_max": t + 1.0,
                         "humidity": 60, "pressure": 1012},
                "weather": [{
                    "id": 800,
                    "main": "x",
                    "description": format!("sky {i}"),
                    "icon": icon(i)
                }],
                "wind": {"speed": 3.0, "deg": 90}
            })
        })
        .collect();
    Value::Array(list)
}

pub fn forecast_payload() -> Value {
    json!({
        "cod": "200",
        "message": 0,
        "cnt": 40,
        "list": forecast_list(),
        "city": {"name": "London", "country": "GB", "timezone": 0}
    })
}

pub fn current_payload() -> Value {
    json!({
        "cod": 200,
        "name": "London",
        "dt": START,
        "timezone": 0,
        "main": {"temp": 7.6, "feels_like": 5.1, "temp_min": 6.0, "temp_max": 9.2,
                 "humidity": 81, "pressure": 1009},
        "weather": [{"description": "light rain", "icon": "10d"}],
        "wind": {"speed": 4.6, "deg": 240},
        "clouds": {"all": 75},
        "visibility": 10000,
        "sys": {"country": "GB", "sunrise": START + 6 * 3600, "sunset": START + 18 * 3600}
    })
}
