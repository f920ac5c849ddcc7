//! Timestamp parsing and formatting.
//!
//! Detected intervals are plain seconds internally; these helpers convert to
//! and from the `HH:MM:SS.mmm` form used when presenting results or accepting
//! caller-supplied marks.

use thiserror::Error;

/// Timestamp parsing error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimestampError {
    #[error("timestamp is empty")]
    Empty,

    #[error("invalid {component} value '{value}'")]
    InvalidComponent {
        component: &'static str,
        value: String,
    },

    #[error("{component} out of range: {value}")]
    OutOfRange { component: &'static str, value: f64 },

    #[error("unrecognized timestamp format '{0}', expected HH:MM:SS[.mmm] or MM:SS[.mmm]")]
    UnrecognizedFormat(String),
}

/// Format seconds as `HH:MM:SS.mmm`.
///
/// Negative inputs are clamped to zero; non-finite inputs format as zero.
pub fn format_seconds(total_secs: f64) -> String {
    let clamped = if total_secs.is_finite() {
        total_secs.max(0.0)
    } else {
        0.0
    };
    let total_ms = (clamped * 1000.0).round() as u64;

    let hours = total_ms / 3_600_000;
    let minutes = total_ms / 60_000 % 60;
    let seconds = total_ms / 1_000 % 60;
    let millis = total_ms % 1_000;

    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Parse a `HH:MM:SS[.mmm]` or `MM:SS[.mmm]` timestamp into seconds.
///
/// Minutes and seconds must be below 60; every component must be
/// non-negative and finite.
pub fn parse_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Err(TimestampError::Empty);
    }

    let parts: Vec<&str> = ts.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, s] => (0.0, parse_component(m, "minutes")?, parse_component(s, "seconds")?),
        [h, m, s] => (
            parse_component(h, "hours")?,
            parse_component(m, "minutes")?,
            parse_component(s, "seconds")?,
        ),
        _ => return Err(TimestampError::UnrecognizedFormat(ts.to_string())),
    };

    if minutes >= 60.0 {
        return Err(TimestampError::OutOfRange {
            component: "minutes",
            value: minutes,
        });
    }
    if seconds >= 60.0 {
        return Err(TimestampError::OutOfRange {
            component: "seconds",
            value: seconds,
        });
    }

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

fn parse_component(raw: &str, component: &'static str) -> Result<f64, TimestampError> {
    let value: f64 = raw.parse().map_err(|_| TimestampError::InvalidComponent {
        component,
        value: raw.to_string(),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(TimestampError::OutOfRange { component, value });
    }
    Ok(value)
}
