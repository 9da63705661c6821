// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! `xsi:type`-tagged scalar values.
//!
//! XML-DA carries item and property values as `<Value xsi:type="xsd:double">`
//! elements. [`XmlValue`] keeps the declared type and the lexical text as
//! received; [`XmlValue::typed`] interprets them.

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::parse_timestamp;

/// A scalar value with its XML Schema type.
///
/// Text decoded from a reply has leading and trailing whitespace removed,
/// so an `xsd:string` of `"  padded  "` arrives as `"padded"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlValue {
    /// Declared type, e.g. `xsd:double`.
    #[serde(
        rename = "@xsi:type",
        alias = "@type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub xsi_type: Option<String>,

    /// Lexical value.
    #[serde(rename = "$text", default)]
    pub text: String,
}

impl XmlValue {
    /// Creates a value with an explicit type name (without the `xsd:` prefix).
    pub fn new(type_name: &str, text: impl Into<String>) -> Self {
        Self {
            xsi_type: Some(format!("xsd:{type_name}")),
            text: text.into(),
        }
    }

    /// Creates an `xsd:double` value.
    pub fn double(value: f64) -> Self {
        Self::new("double", format_float(value, value.is_infinite(), value > 0.0))
    }

    /// Creates an `xsd:float` value.
    pub fn float(value: f32) -> Self {
        Self::new("float", format_float(value, value.is_infinite(), value > 0.0))
    }

    /// Creates an `xsd:int` value.
    pub fn int(value: i32) -> Self {
        Self::new("int", value.to_string())
    }

    /// Creates an `xsd:long` value.
    pub fn long(value: i64) -> Self {
        Self::new("long", value.to_string())
    }

    /// Creates an `xsd:unsignedInt` value.
    pub fn unsigned_int(value: u32) -> Self {
        Self::new("unsignedInt", value.to_string())
    }

    /// Creates an `xsd:boolean` value.
    pub fn boolean(value: bool) -> Self {
        Self::new("boolean", value.to_string())
    }

    /// Creates an `xsd:string` value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new("string", value)
    }

    /// Creates an `xsd:dateTime` value.
    pub fn date_time(value: DateTime<Utc>) -> Self {
        Self::new("dateTime", value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Returns the type name without its namespace prefix.
    pub fn type_name(&self) -> Option<&str> {
        self.xsi_type
            .as_deref()
            .map(|t| t.rsplit(':').next().unwrap_or(t))
    }

    /// Interprets the value according to its declared type.
    pub fn typed(&self) -> TypedValue {
        let text = self.text.trim();
        let parsed = match self.type_name() {
            Some("boolean") => parse_bool(text).map(TypedValue::Boolean),
            Some("byte" | "short" | "int" | "long" | "integer") => {
                text.parse().ok().map(TypedValue::Int)
            }
            Some("unsignedByte" | "unsignedShort" | "unsignedInt" | "unsignedLong") => {
                text.parse().ok().map(TypedValue::UnsignedInt)
            }
            Some("float" | "double" | "decimal") => parse_double(text).map(TypedValue::Double),
            Some("dateTime") => parse_date_time(text).map(TypedValue::DateTime),
            Some("string") | None => Some(TypedValue::String(self.text.clone())),
            Some(_) => None,
        };

        parsed.unwrap_or_else(|| TypedValue::Other {
            type_name: self.xsi_type.clone().unwrap_or_default(),
            text: self.text.clone(),
        })
    }

    /// Returns the value as `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self.typed() {
            TypedValue::Double(v) => Some(v),
            TypedValue::Int(v) => Some(v as f64),
            TypedValue::UnsignedInt(v) => Some(v as f64),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer type.
    pub fn as_i64(&self) -> Option<i64> {
        match self.typed() {
            TypedValue::Int(v) => Some(v),
            TypedValue::UnsignedInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Returns the value as `bool` if it is `xsd:boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self.typed() {
            TypedValue::Boolean(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the lexical text if the value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self.type_name() {
            Some("string") | None => Some(&self.text),
            _ => None,
        }
    }
}

impl fmt::Display for XmlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.xsi_type {
            Some(t) => write!(f, "{}({})", t, self.text),
            None => write!(f, "{}", self.text),
        }
    }
}

impl From<f64> for XmlValue {
    fn from(v: f64) -> Self {
        Self::double(v)
    }
}

impl From<i32> for XmlValue {
    fn from(v: i32) -> Self {
        Self::int(v)
    }
}

impl From<bool> for XmlValue {
    fn from(v: bool) -> Self {
        Self::boolean(v)
    }
}

impl From<&str> for XmlValue {
    fn from(v: &str) -> Self {
        Self::string(v)
    }
}

impl From<String> for XmlValue {
    fn from(v: String) -> Self {
        Self::string(v)
    }
}

// =============================================================================
// TypedValue
// =============================================================================

/// An interpreted [`XmlValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// `xsd:boolean`.
    Boolean(bool),
    /// Signed integer types.
    Int(i64),
    /// Unsigned integer types.
    UnsignedInt(u64),
    /// `xsd:float`, `xsd:double` and `xsd:decimal`.
    Double(f64),
    /// `xsd:string`, or an untyped value.
    String(String),
    /// `xsd:dateTime`.
    DateTime(DateTime<FixedOffset>),
    /// Unsupported type, or text that does not parse as its declared type.
    Other {
        /// Declared type.
        type_name: String,
        /// Lexical value.
        text: String,
    },
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// `xsd:float`/`xsd:double` spell infinities `INF` and `-INF`.
fn format_float(value: impl fmt::Display, infinite: bool, positive: bool) -> String {
    match (infinite, positive) {
        (true, true) => "INF".to_string(),
        (true, false) => "-INF".to_string(),
        (false, _) => value.to_string(),
    }
}

/// Keeps the offset when one is given; a value without one is UTC.
fn parse_date_time(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text).ok().or_else(|| {
        let utc = FixedOffset::east_opt(0)?;
        parse_timestamp(text).map(|dt| dt.with_timezone(&utc))
    })
}

fn parse_double(text: &str) -> Option<f64> {
    match text {
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ => text.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(XmlValue::double(50000.0).text, "50000");
        assert_eq!(XmlValue::double(1.5).xsi_type.as_deref(), Some("xsd:double"));
        assert_eq!(XmlValue::boolean(true).text, "true");
        assert_eq!(XmlValue::int(-7).type_name(), Some("int"));
    }

    #[test]
    fn test_accessors() {
        let v = XmlValue::new("double", "3.25");
        assert_eq!(v.as_f64(), Some(3.25));
        assert_eq!(v.as_i64(), None);
        assert_eq!(v.as_str(), None);

        let v = XmlValue::new("unsignedShort", "65535");
        assert_eq!(v.as_i64(), Some(65535));
        assert_eq!(v.as_f64(), Some(65535.0));

        let v = XmlValue::new("boolean", "1");
        assert_eq!(v.as_bool(), Some(true));

        let v = XmlValue::string("Running");
        assert_eq!(v.as_str(), Some("Running"));
    }

    #[test]
    fn test_untyped_is_string() {
        let v = XmlValue {
            xsi_type: None,
            text: "raw".into(),
        };
        assert_eq!(v.typed(), TypedValue::String("raw".into()));
    }

    #[test]
    fn test_unparseable_falls_back_to_other() {
        let v = XmlValue::new("int", "abc");
        assert!(matches!(v.typed(), TypedValue::Other { .. }));

        let v = XmlValue::new("ArrayOfDouble", "");
        assert!(matches!(
            v.typed(),
            TypedValue::Other { ref type_name, .. } if type_name == "xsd:ArrayOfDouble"
        ));
    }

    #[test]
    fn test_special_doubles() {
        assert_eq!(XmlValue::new("double", "INF").as_f64(), Some(f64::INFINITY));
        assert!(XmlValue::new("double", "NaN").as_f64().unwrap().is_nan());
    }

    #[test]
    fn test_infinite_values_use_schema_lexical_form() {
        assert_eq!(XmlValue::double(f64::INFINITY).text, "INF");
        assert_eq!(XmlValue::double(f64::NEG_INFINITY).text, "-INF");
        assert_eq!(XmlValue::float(f32::INFINITY).text, "INF");
        assert_eq!(XmlValue::float(f32::NEG_INFINITY).text, "-INF");
        assert_eq!(XmlValue::double(f64::NAN).text, "NaN");
        assert_eq!(XmlValue::float(1.1).text, "1.1");

        assert_eq!(
            XmlValue::double(f64::NEG_INFINITY).as_f64(),
            Some(f64::NEG_INFINITY)
        );
        assert_eq!(XmlValue::float(f32::INFINITY).as_f64(), Some(f64::INFINITY));
    }

    #[test]
    fn test_date_time() {
        let now = DateTime::parse_from_rfc3339("2024-05-01T12:00:00.250Z")
            .unwrap()
            .with_timezone(&Utc);
        let v = XmlValue::date_time(now);
        assert_eq!(v.text, "2024-05-01T12:00:00.250Z");
        match v.typed() {
            TypedValue::DateTime(dt) => assert_eq!(dt.with_timezone(&Utc), now),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_date_time_without_offset_is_utc() {
        let v = XmlValue::new("dateTime", "2024-01-02T03:04:05.123");
        let expected = parse_timestamp("2024-01-02T03:04:05.123Z").unwrap();
        match v.typed() {
            TypedValue::DateTime(dt) => {
                assert_eq!(dt.offset().local_minus_utc(), 0);
                assert_eq!(dt.with_timezone(&Utc), expected);
            }
            other => panic!("unexpected {other:?}"),
        }

        let v = XmlValue::new("dateTime", "2024-01-02T05:04:05+02:00");
        match v.typed() {
            TypedValue::DateTime(dt) => assert_eq!(dt.offset().local_minus_utc(), 7200),
            other => panic!("unexpected {other:?}"),
        }
    }
}
