//! Plain-text rendering of a [`WeatherReport`].

use skydeck_core::{
    CurrentConditions, DailyBucket, HourlyEntry, UnitSystem, WeatherReport, convert_wind_speed,
    theme::{WeatherTheme, icon_url},
    time::format_utc_offset,
};
use std::fmt::Write;

pub fn report(report: &WeatherReport, hours: usize, favorite: bool) -> String {
    let mut out = String::new();
    current(&mut out, &report.current, report.units, favorite);

    if !report.forecast.hourly.is_empty() && hours > 0 {
        out.push_str("\nHourly\n");
        for entry in report.forecast.hourly.iter().take(hours) {
            hourly_line(&mut out, entry);
        }
    }

    if !report.forecast.daily.is_empty() {
        out.push_str("\n5-day forecast\n");
        for day in &report.forecast.daily {
            daily_line(&mut out, day);
        }
    }

    out
}

fn current(out: &mut String, c: &CurrentConditions, units: UnitSystem, favorite: bool) {
    let star = if favorite { "★" } else { "☆" };
    let place = match &c.country {
        Some(country) => format!("{}, {country}", c.city),
        None => c.city.clone(),
    };
    let theme = WeatherTheme::from_icon_code(&c.icon_code);
    let symbol = units.temperature_symbol();
    let wind = convert_wind_speed(c.wind_speed_mps, units).round();

    let _ = writeln!(out, "{star} {place}");
    let _ = writeln!(
        out,
        "{} ({})",
        c.observed_at.format("%A %-I:%M %p"),
        format_utc_offset(c.utc_offset())
    );
    let _ = writeln!(
        out,
        "{} {}  {}{symbol}  feels like {}{symbol}  (↓{}° ↑{}°)",
        theme.glyph(),
        c.condition_description,
        c.temperature.current,
        c.temperature.feels_like,
        c.temperature.min,
        c.temperature.max,
    );
    let _ = writeln!(
        out,
        "Humidity {}%  Wind {wind} {}  Pressure {} hPa  Clouds {}%",
        c.humidity_pct,
        units.wind_label(),
        c.pressure_hpa.round(),
        c.cloudiness_pct,
    );

    let visibility = c
        .visibility_km
        .map(|km| format!("{} km", km.round()))
        .unwrap_or_else(|| "n/a".to_string());
    let _ = writeln!(out, "Visibility {visibility}  Precipitation {} mm", c.precipitation_mm);
    let _ = writeln!(out, "Theme {}  Icon {}", theme.as_str(), icon_url(&c.icon_code));
    let _ = writeln!(
        out,
        "Sunrise {}  Sunset {}",
        c.sunrise.format("%-I:%M %p"),
        c.sunset.format("%-I:%M %p")
    );
}

fn hourly_line(out: &mut String, entry: &HourlyEntry) {
    let glyph = WeatherTheme::from_icon_code(&entry.icon_code).glyph();
    let _ = writeln!(
        out,
        "  {:>8}  {glyph} {:>4}°  {}",
        entry.time.format("%-I:%M %p").to_string(),
        entry.temperature,
        entry.description
    );
}

fn daily_line(out: &mut String, day: &DailyBucket) {
    let glyph = WeatherTheme::from_icon_code(day.icon_code()).glyph();
    let _ = writeln!(
        out,
        "  {:<11} {glyph} ↑{:>4}°  ↓{:>4}°  {}",
        day.date.format("%a, %b %-d").to_string(),
        day.temp_max,
        day.temp_min,
        day.description()
    );
}

pub fn favorites(cities: &[String]) -> String {
    if cities.is_empty() {
        return "No favorite cities yet. Add one with `skydeck favorites add <CITY>`.\n"
            .to_string();
    }

    cities.iter().map(|c| format!("★ {c}\n")).collect()
}

pub fn favorite_line(c: &CurrentConditions, units: UnitSystem) -> String {
    format!(
        "★ {:<20} {} {}{}  {}",
        c.city,
        WeatherTheme::from_icon_code(&c.icon_code).glyph(),
        c.temperature.current,
        units.temperature_symbol(),
        c.condition_description
    )
}
