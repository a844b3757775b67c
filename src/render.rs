//! Forecast rendering core
//!
//! Turns an OpenWeatherMap-style forecast payload (a `city` mapping plus an
//! ordered `list` of forecast entries) into the fixed plain-text block served
//! by the convert endpoints. The renderer is a pure function of its input:
//! one pass over the entry list, no I/O, and a failure discards any partially
//! built text.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::Result;
use crate::error::RenderError;

/// Separator appended after every forecast entry block
const ENTRY_SEPARATOR: &str = "--------------------------";

/// A successfully rendered forecast.
///
/// Serializes to the `{"text": ..., "status": "success"}` shape the convert
/// endpoints return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    /// The accumulated plain-text block
    pub text: String,
    /// Always [`RenderStatus::Success`] for a completed render
    pub status: RenderStatus,
}

/// Status marker carried alongside the rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStatus {
    Success,
}

/// Render a raw, unvalidated payload.
///
/// Extracts the top-level `city` mapping and `list` sequence defensively,
/// then delegates to [`render_forecast`]. Used by the entry point that does
/// no structural pre-validation.
pub fn render(payload: &Value) -> Result<Rendered> {
    let root = payload
        .as_object()
        .ok_or_else(|| RenderError::failure("payload is not a JSON object"))?;

    let city = root
        .get("city")
        .ok_or_else(|| RenderError::field_missing("city"))?
        .as_object()
        .ok_or_else(|| RenderError::failure("city is not an object"))?;

    let entries = root
        .get("list")
        .ok_or_else(|| RenderError::field_missing("list"))?
        .as_array()
        .ok_or_else(|| RenderError::failure("list is not a sequence"))?;

    render_forecast(city, entries)
}

/// Render a forecast whose top-level shape has already been validated.
///
/// Single pass: a header from the `city` fields, then a fixed six-line block
/// plus separator per entry, in sequence order. `visibility` and `rain.3h`
/// are the only fields with fallbacks; every other absence aborts the render.
pub fn render_forecast(
    city: &Map<String, Value>,
    entries: &[Value],
) -> Result<Rendered> {
    let mut text = String::new();

    let name = require(city, "city.", "name")?;
    let country = require(city, "city.", "country")?;
    let timezone = require(city, "city.", "timezone")?;
    text.push_str(&format!(
        "Location: {}, {}\n",
        display(name),
        display(country)
    ));
    text.push_str(&format!("Timezone: {}\n\n", display(timezone)));

    for (index, entry) in entries.iter().enumerate() {
        let prefix = format!("list[{index}].");
        let entry = entry.as_object().ok_or_else(|| {
            RenderError::failure(format!("forecast entry at index {index} is not an object"))
        })?;

        let timestamp = require(entry, &prefix, "dt_txt")?;
        let temp = require(entry, &prefix, "main.temp")?;
        let feels_like = require(entry, &prefix, "main.feels_like")?;
        let humidity = require(entry, &prefix, "main.humidity")?;
        let clouds = require(entry, &prefix, "clouds.all")?;
        let condition = first_condition(entry, &prefix)?;
        let wind_speed = require(entry, &prefix, "wind.speed")?;
        // Absent visibility renders the literal N/A placeholder, units label included
        let visibility =
            optional(entry, &prefix, "visibility")?.map_or_else(|| "N/A".to_string(), display);
        let rain = optional(entry, &prefix, "rain.3h")?.map_or_else(|| "0".to_string(), display);

        text.push_str(&format!("Timestamp: {}\n", display(timestamp)));
        text.push_str(&format!(
            "Temp: {}°C | Feels Like: {}°C\n",
            display(temp),
            display(feels_like)
        ));
        text.push_str(&format!(
            "Humidity: {}% | Clouds: {}%\n",
            display(humidity),
            display(clouds)
        ));
        text.push_str(&format!("Condition: {}\n", display(condition)));
        text.push_str(&format!(
            "Wind: {} m/s | Visibility: {} m\n",
            display(wind_speed),
            visibility
        ));
        text.push_str(&format!("Rain (3h): {rain} mm\n"));
        text.push_str(ENTRY_SEPARATOR);
        text.push('\n');
    }

    Ok(Rendered {
        text,
        status: RenderStatus::Success,
    })
}

/// Condition description: the first element of the entry's `weather`
/// sequence. An empty sequence is a shape error, not a missing field.
fn first_condition<'a>(
    entry: &'a Map<String, Value>,
    prefix: &str,
) -> Result<&'a Value> {
    let weather = require(entry, prefix, "weather")?
        .as_array()
        .ok_or_else(|| RenderError::failure(format!("{prefix}weather is not a sequence")))?;

    let first = weather
        .first()
        .ok_or_else(|| RenderError::failure(format!("{prefix}weather is empty")))?
        .as_object()
        .ok_or_else(|| RenderError::failure(format!("{prefix}weather[0] is not an object")))?;

    require(first, &format!("{prefix}weather[0]."), "description")
}

/// Result of walking a dotted path: the value, or the dotted path of the
/// first segment that was absent.
enum Lookup<'a> {
    Found(&'a Value),
    Absent(String),
}

/// Walk a `.`-separated path through nested JSON mappings.
///
/// `prefix` is prepended to reported paths so entry fields read as
/// `list[3].main.temp`. Traversal into a non-mapping is a hard failure
/// regardless of whether the caller treats absence as fatal.
fn lookup<'a>(
    obj: &'a Map<String, Value>,
    prefix: &str,
    path: &str,
) -> Result<Lookup<'a>> {
    let mut current = obj;
    let mut consumed = String::from(prefix);

    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        consumed.push_str(segment);

        let Some(value) = current.get(segment) else {
            return Ok(Lookup::Absent(consumed));
        };

        if segments.peek().is_none() {
            return Ok(Lookup::Found(value));
        }

        current = value
            .as_object()
            .ok_or_else(|| RenderError::failure(format!("{consumed} is not an object")))?;
        consumed.push('.');
    }

    // split('.') yields at least one segment for any input
    Err(RenderError::failure(format!("empty field path: {prefix}")))
}

/// Look up a field that must be present
fn require<'a>(
    obj: &'a Map<String, Value>,
    prefix: &str,
    path: &str,
) -> Result<&'a Value> {
    match lookup(obj, prefix, path)? {
        Lookup::Found(value) => Ok(value),
        Lookup::Absent(missing) => Err(RenderError::field_missing(missing)),
    }
}

/// Look up a field whose absence (at any depth) falls back to a default
fn optional<'a>(
    obj: &'a Map<String, Value>,
    prefix: &str,
    path: &str,
) -> Result<Option<&'a Value>> {
    Ok(match lookup(obj, prefix, path)? {
        Lookup::Found(value) => Some(value),
        Lookup::Absent(_) => None,
    })
}

/// Render a JSON value the way it reads in the source document: strings
/// without quotes, numbers with the precision they were parsed with
/// (`serde_json` keeps the shortest round-trip representation).
fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
