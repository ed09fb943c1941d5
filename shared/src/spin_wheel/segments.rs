use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_SEGMENT_COLOR;
use crate::error::WheelError;
use crate::validation::{validate_hex_color, validate_label};

/// One labeled, colored wedge of the wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub label: String,
    pub color: String,
}

impl Segment {
    pub fn new(label: &str, color: &str) -> Self {
        Self {
            label: label.to_string(),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    label: Option<String>,
    color: Option<String>,
}

const DEFAULT_SEGMENTS: [(&str, &str); 5] = [
    ("Опитай пак утре", "#0074D9"),
    ("Отстъпка 3%", "#fff9c4"),
    ("Отстъпка 5%", "#ffe082"),
    ("Безплатна доставка", "#fff59d"),
    ("Mystery Box", "#ffecb3"),
];

pub fn default_segments() -> Vec<Segment> {
    DEFAULT_SEGMENTS
        .iter()
        .map(|(label, color)| Segment::new(label, color))
        .collect()
}

/// Accepts either a JSON array or a string holding a JSON array.
pub(crate) fn json_list(value: Option<&Value>) -> Result<Vec<Value>, String> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(Value::String(raw)) if raw.trim().is_empty() => Ok(Vec::new()),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(other) => Err(format!("expected a list, got {}", other)),
            Err(e) => Err(e.to_string()),
        },
        Some(other) => Err(format!("expected a list, got {}", other)),
    }
}

pub fn try_parse_segments(value: Option<&Value>) -> Result<Vec<Segment>, WheelError> {
    let items = json_list(value).map_err(WheelError::Segments)?;
    let mut segments = Vec::with_capacity(items.len());

    for item in items {
        let raw: RawSegment =
            serde_json::from_value(item).map_err(|e| WheelError::Segments(e.to_string()))?;
        let label = match raw.label {
            Some(label) if validate_label(&label).is_ok() => label,
            _ => {
                warn!("Skipping prize without a label");
                continue;
            }
        };
        let color = match raw.color {
            Some(color) if validate_hex_color(&color).is_ok() => color,
            Some(color) if !color.is_empty() => {
                warn!("Prize `{}` has unusable color `{}`", label, color);
                DEFAULT_SEGMENT_COLOR.to_string()
            }
            _ => DEFAULT_SEGMENT_COLOR.to_string(),
        };
        segments.push(Segment { label, color });
    }

    Ok(segments)
}

/// Never returns an empty list: bad or empty input falls back to the built-in prizes.
pub fn parse_segments(value: Option<&Value>) -> Vec<Segment> {
    match try_parse_segments(value) {
        Ok(segments) if !segments.is_empty() => segments,
        Ok(_) => default_segments(),
        Err(e) => {
            warn!("{}; using default prizes", e);
            default_segments()
        }
    }
}

pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    let digits = hex.trim().trim_start_matches('#');
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    let channel = |range: std::ops::Range<usize>| {
        expanded
            .get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
    };

    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) if expanded.len() == 6 => {
            format!("rgba({},{},{},{})", r, g, b, alpha)
        }
        _ => format!("rgba(255,255,255,{})", alpha),
    }
}
