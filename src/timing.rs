//! CSS timing-function vocabulary.
//!
//! Curves can be named by keyword (`ease-in`) or spelled out as
//! `cubic-bezier(x1, y1, x2, y2)`.  Both forms parse into a
//! [`CubicBezier`].  On the wire a curve is a `{"x1", "y1", "x2", "y2"}`
//! object; deserialization also accepts a 4-element array or either text
//! form, and always validates the control points.

use crate::bezier::{CubicBezier, CurveError};
use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The named CSS easing presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingFunction {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl TimingFunction {
    /// Every preset, in CSS order.
    pub const ALL: [TimingFunction; 5] = [
        TimingFunction::Linear,
        TimingFunction::Ease,
        TimingFunction::EaseIn,
        TimingFunction::EaseOut,
        TimingFunction::EaseInOut,
    ];

    /// The preset's control points as `[x1, y1, x2, y2]`.
    pub fn control_points(self) -> [f64; 4] {
        match self {
            TimingFunction::Linear => [0.0, 0.0, 1.0, 1.0],
            TimingFunction::Ease => [0.25, 0.1, 0.25, 1.0],
            TimingFunction::EaseIn => [0.42, 0.0, 1.0, 1.0],
            TimingFunction::EaseOut => [0.0, 0.0, 0.58, 1.0],
            TimingFunction::EaseInOut => [0.42, 0.0, 0.58, 1.0],
        }
    }

    /// Build the preset's curve.
    pub fn curve(self) -> CubicBezier {
        let [x1, y1, x2, y2] = self.control_points();
        CubicBezier::from_valid(x1, y1, x2, y2)
    }
}

impl fmt::Display for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "linear"),
            TimingFunction::Ease => write!(f, "ease"),
            TimingFunction::EaseIn => write!(f, "ease-in"),
            TimingFunction::EaseOut => write!(f, "ease-out"),
            TimingFunction::EaseInOut => write!(f, "ease-in-out"),
        }
    }
}

/// Error from parsing a timing function.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseCurveError {
    /// The text is neither a known keyword nor a well-formed
    /// `cubic-bezier(...)` expression.
    #[error("invalid timing function: {0}")]
    Syntax(String),
    /// The text is well-formed but describes an invalid curve.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// Parse a preset keyword (case-insensitive; accepts "ease-in", "ease_in", "EaseIn", etc.).
fn parse_keyword(s: &str) -> Option<TimingFunction> {
    let normalized: String = s
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect();
    match normalized.as_str() {
        "linear" => Some(TimingFunction::Linear),
        "ease" => Some(TimingFunction::Ease),
        "easein" => Some(TimingFunction::EaseIn),
        "easeout" => Some(TimingFunction::EaseOut),
        "easeinout" => Some(TimingFunction::EaseInOut),
        _ => None,
    }
}

impl FromStr for TimingFunction {
    type Err = ParseCurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keyword(s)
            .ok_or_else(|| ParseCurveError::Syntax(format!("unknown keyword {:?}", s.trim())))
    }
}

/// Return the argument list of `name(...)`, or `None` if `s` is not a call
/// to `name`.
fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let open = s.find('(')?;
    if !s[..open].trim().eq_ignore_ascii_case(name) {
        return None;
    }
    s[open + 1..].trim_end().strip_suffix(')')
}

impl FromStr for CubicBezier {
    type Err = ParseCurveError;

    /// Parse a preset keyword or `cubic-bezier(x1, y1, x2, y2)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(preset) = parse_keyword(s) {
            return Ok(preset.curve());
        }
        let args = function_args(s, "cubic-bezier").ok_or_else(|| {
            ParseCurveError::Syntax(format!(
                "expected a keyword or cubic-bezier(x1, y1, x2, y2), got {:?}",
                s
            ))
        })?;
        let values = args
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| ParseCurveError::Syntax(format!("not a number: {:?}", part)))
            })
            .collect::<Result<Vec<f64>, _>>()?;
        let [x1, y1, x2, y2] = <[f64; 4]>::try_from(values).map_err(|v| {
            ParseCurveError::Syntax(format!(
                "cubic-bezier takes 4 arguments, got {}",
                v.len()
            ))
        })?;
        Ok(CubicBezier::new(x1, y1, x2, y2)?)
    }
}

impl fmt::Display for CubicBezier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cubic-bezier({}, {}, {}, {})",
            self.x1(),
            self.y1(),
            self.x2(),
            self.y2()
        )
    }
}

//  Serde

impl Serialize for CubicBezier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("CubicBezier", 4)?;
        s.serialize_field("x1", &self.x1())?;
        s.serialize_field("y1", &self.y1())?;
        s.serialize_field("x2", &self.x2())?;
        s.serialize_field("y2", &self.y2())?;
        s.end()
    }
}

impl<'de> Deserialize<'de> for CubicBezier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = CubicBezier;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "object {{x1, y1, x2, y2}}, array [x1, y1, x2, y2], or a timing-function string"
                )
            }
            fn visit_map<A>(self, mut map: A) -> Result<CubicBezier, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut x1 = None;
                let mut y1 = None;
                let mut x2 = None;
                let mut y2 = None;
                while let Some(k) = map.next_key::<String>()? {
                    match k.as_str() {
                        "x1" => x1 = Some(map.next_value()?),
                        "y1" => y1 = Some(map.next_value()?),
                        "x2" => x2 = Some(map.next_value()?),
                        "y2" => y2 = Some(map.next_value()?),
                        _ => { let _: serde::de::IgnoredAny = map.next_value()?; }
                    }
                }
                CubicBezier::new(
                    x1.ok_or_else(|| DeError::missing_field("x1"))?,
                    y1.ok_or_else(|| DeError::missing_field("y1"))?,
                    x2.ok_or_else(|| DeError::missing_field("x2"))?,
                    y2.ok_or_else(|| DeError::missing_field("y2"))?,
                )
                .map_err(DeError::custom)
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<CubicBezier, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut pts = [0.0; 4];
                for (i, p) in pts.iter_mut().enumerate() {
                    *p = seq
                        .next_element()?
                        .ok_or_else(|| DeError::invalid_length(i, &self))?;
                }
                if seq.next_element::<serde::de::IgnoredAny>()?.is_some() {
                    return Err(DeError::invalid_length(5, &self));
                }
                let [x1, y1, x2, y2] = pts;
                CubicBezier::new(x1, y1, x2, y2).map_err(DeError::custom)
            }
            fn visit_str<E>(self, s: &str) -> Result<CubicBezier, E>
            where
                E: DeError,
            {
                s.parse().map_err(DeError::custom)
            }
        }
        deserializer.deserialize_any(V)
    }
}
