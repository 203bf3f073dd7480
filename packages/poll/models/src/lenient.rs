//! Tolerant field decoders for feed values of uneven quality.
//!
//! Feed items come from several collectors. Numbers sometimes arrive as
//! floats or numeric strings, and lists sometimes arrive as `null`. These
//! decoders turn anything unusable into "no value" instead of failing the
//! whole item.

use serde::{Deserialize, Deserializer, de::IgnoredAny};

use crate::MarginOfError;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Scalar {
    fn as_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            Self::Other(_) => None,
        };
        value.filter(|n| n.is_finite())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextList {
    Many(Vec<Scalar>),
    One(String),
    Other(IgnoredAny),
}

/// A finite number from a number or numeric string. Anything else is
/// `None`.
///
/// # Errors
///
/// Only fails on malformed JSON.
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(|s| s.as_number()))
}

/// A non-negative count from a number or numeric string, rounded to the
/// nearest whole number. Negative or non-numeric values are `None`.
///
/// # Errors
///
/// Only fails on malformed JSON.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(number(deserializer)?
        .filter(|n| *n >= 0.0)
        .map(|n| n.round() as u64))
}

/// A margin of error from a number or text. Blank text and other value
/// types are `None`.
///
/// # Errors
///
/// Only fails on malformed JSON.
pub fn margin<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<MarginOfError>, D::Error> {
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Number(n)) if n.is_finite() => Some(MarginOfError::Points(n)),
        Some(Scalar::Text(s)) if !s.trim().is_empty() => Some(MarginOfError::Text(s)),
        _ => None,
    })
}

/// A list of strings. `null` is empty, a lone string is a one-element
/// list, and non-string elements are dropped.
///
/// # Errors
///
/// Only fails on malformed JSON.
pub fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<TextList>::deserialize(deserializer)? {
        Some(TextList::Many(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Scalar::Text(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(TextList::One(s)) => vec![s],
        Some(TextList::Other(_)) | None => Vec::new(),
    })
}
