//! Field value types and column kind inference

use std::fmt;

/// Kind of data held by a column, inferred from its leading rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnKind {
    /// TRUE/FALSE values
    Boolean,
    /// Whole numbers that fit in an `i64`
    Integer,
    /// Any other number
    Float,
    /// Anything else
    #[default]
    Text,
}

impl ColumnKind {
    /// Detect the kind of a single field, or `None` for an empty field
    pub fn detect(field: &str) -> Option<Self> {
        let field = field.trim();

        if field.is_empty() {
            return None;
        }

        if parse_bool(field).is_some() {
            return Some(ColumnKind::Boolean);
        }

        if field.parse::<i64>().is_ok() {
            return Some(ColumnKind::Integer);
        }

        // "inf" and "NaN" parse as f64 but are words in a sheet
        if field.bytes().any(|b| b.is_ascii_digit()) && field.parse::<f64>().is_ok() {
            return Some(ColumnKind::Float);
        }

        Some(ColumnKind::Text)
    }

    /// Combine two observed kinds into the narrowest kind that holds both
    pub fn widen(self, other: ColumnKind) -> ColumnKind {
        use ColumnKind::*;

        match (self, other) {
            (a, b) if a == b => a,
            (Integer, Float) | (Float, Integer) => Float,
            _ => Text,
        }
    }

    /// Infer a kind from a set of fields. Empty fields do not vote.
    pub fn infer<'a, I>(fields: I) -> ColumnKind
    where
        I: IntoIterator<Item = &'a str>,
    {
        fields
            .into_iter()
            .filter_map(ColumnKind::detect)
            .reduce(ColumnKind::widen)
            .unwrap_or(ColumnKind::Text)
    }

    /// Parse a raw field according to this kind
    ///
    /// Fields that do not parse as the column's kind fall back to
    /// [`FieldValue::Text`], so a mis-guessed column never loses data.
    pub fn parse(self, field: &str) -> FieldValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return FieldValue::Empty;
        }

        let parsed = match self {
            ColumnKind::Boolean => parse_bool(trimmed).map(FieldValue::Boolean),
            ColumnKind::Integer => trimmed.parse().ok().map(FieldValue::Integer),
            ColumnKind::Float => trimmed.parse().ok().map(FieldValue::Float),
            ColumnKind::Text => None,
        };

        parsed.unwrap_or_else(|| FieldValue::Text(field.to_string()))
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Boolean => "boolean",
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Text => "text",
        };
        f.write_str(name)
    }
}

fn parse_bool(field: &str) -> Option<bool> {
    if field.eq_ignore_ascii_case("true") {
        Some(true)
    } else if field.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// A typed view of a single table field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Empty field
    Empty,
    /// Boolean value
    Boolean(bool),
    /// Whole number
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Text value
    Text(String),
}

impl FieldValue {
    /// Check if the field is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(n) => Some(*n as f64),
            FieldValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a string slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Float(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}
