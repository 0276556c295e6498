//! Form sanitization and validation
//!
//! Every write form goes through a static [`Schema`]: each declared field is
//! trimmed, markup-escaped and checked against its rules in declaration
//! order. The sanitized values are always returned, valid or not, so a
//! rejected form can be shown again with what the operator typed.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use validator::ValidateLength;

/// Raw form body: name/value pairs in submission order. Names may repeat
/// (checkbox groups).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value submitted under `name`, in order
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

/// A single field check. Each carries the message reported when it fails.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// At least this many characters
    MinLength(u64, &'static str),
    /// At most this many characters
    MaxLength(u64, &'static str),
    /// ASCII letters and digits only (an empty value fails)
    Alphanumeric(&'static str),
    /// Parses as an ISO-8601 date or date-time
    IsoDate(&'static str),
    /// One of a fixed set of values
    OneOf(&'static [&'static str], &'static str),
}

impl Rule {
    fn check(&self, value: &str) -> Option<&'static str> {
        let ok = match self {
            Rule::MinLength(min, _) => value.to_string().validate_length(Some(*min), None, None),
            Rule::MaxLength(max, _) => value.to_string().validate_length(None, Some(*max), None),
            Rule::Alphanumeric(_) => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric()),
            Rule::IsoDate(_) => parse_date(value).is_some(),
            Rule::OneOf(allowed, _) => allowed.contains(&value),
        };
        if ok {
            None
        } else {
            Some(self.message())
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Rule::MinLength(_, msg)
            | Rule::MaxLength(_, msg)
            | Rule::Alphanumeric(msg)
            | Rule::IsoDate(msg)
            | Rule::OneOf(_, msg) => msg,
        }
    }
}

/// Declaration of one form field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Collect every submitted value into a set
    pub multiple: bool,
    /// An empty value means "not provided": rules are skipped
    pub optional: bool,
    pub rules: &'static [Rule],
}

impl FieldSpec {
    pub const fn required(name: &'static str, rules: &'static [Rule]) -> Self {
        Self { name, multiple: false, optional: false, rules }
    }

    pub const fn optional(name: &'static str, rules: &'static [Rule]) -> Self {
        Self { name, multiple: false, optional: true, rules }
    }

    pub const fn multiple(name: &'static str) -> Self {
        Self { name, multiple: true, optional: true, rules: &[] }
    }
}

/// Ordered set of field declarations for one form
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [FieldSpec],
}

/// A failed rule on a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
    /// Sanitized value that was rejected
    pub value: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

/// Sanitized form values, in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sanitized {
    values: Vec<(&'static str, FieldValue)>,
}

impl Sanitized {
    /// Single value of `name`, empty when absent
    pub fn text(&self, name: &str) -> &str {
        match self.lookup(name) {
            Some(FieldValue::Single(value)) => value,
            _ => "",
        }
    }

    /// Values of a multiple field, empty when absent
    pub fn list(&self, name: &str) -> &[String] {
        match self.lookup(name) {
            Some(FieldValue::Multiple(values)) => values,
            _ => &[],
        }
    }

    /// The sanitized values as a form body, as if submitted again
    pub fn to_form_data(&self) -> FormData {
        let mut form = FormData::new();
        for (name, value) in &self.values {
            match value {
                FieldValue::Single(v) => form = form.with(*name, v.clone()),
                FieldValue::Multiple(vs) => {
                    for v in vs {
                        form = form.with(*name, v.clone());
                    }
                }
            }
        }
        form
    }

    fn lookup(&self, name: &str) -> Option<&FieldValue> {
        self.values.iter().find(|(key, _)| *key == name).map(|(_, value)| value)
    }
}

/// Outcome of running a schema over a form
#[derive(Debug, Clone)]
pub struct Validated {
    pub values: Sanitized,
    pub errors: Vec<FieldError>,
}

impl Validated {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Schema {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    /// Sanitize every declared field and collect rule violations in
    /// declaration order. Undeclared fields are ignored.
    pub fn apply(&self, form: &FormData) -> Validated {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut errors = Vec::new();

        for spec in self.fields {
            if spec.multiple {
                let mut set: Vec<String> = Vec::new();
                for raw in form.get_all(spec.name) {
                    let value = sanitize(raw);
                    if !value.is_empty() && !set.contains(&value) {
                        set.push(value);
                    }
                }
                values.push((spec.name, FieldValue::Multiple(set)));
                continue;
            }

            let value = sanitize(form.get(spec.name).unwrap_or_default());
            if !(spec.optional && value.is_empty()) {
                for rule in spec.rules {
                    if let Some(message) = rule.check(&value) {
                        errors.push(FieldError::new(spec.name, message, value.clone()));
                    }
                }
            }
            values.push((spec.name, FieldValue::Single(value)));
        }

        Validated {
            values: Sanitized { values },
            errors,
        }
    }
}

/// Trim and escape a raw value
pub fn sanitize(raw: &str) -> String {
    escape(raw.trim())
}

/// Replace markup-significant characters with HTML entities. Entities that
/// are already well formed are kept as they are, so escaping twice is the
/// same as escaping once.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (idx, c) in input.char_indices() {
        match c {
            '&' if is_entity(&input[idx..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// `&name;`, `&#123;` or `&#x7B;` at the start of `s`
fn is_entity(s: &str) -> bool {
    let Some(end) = s.find(';') else {
        return false;
    };
    let body = &s[1..end];
    if let Some(num) = body.strip_prefix('#') {
        if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
        }
        return !num.is_empty() && num.chars().all(|c| c.is_ascii_digit());
    }
    let mut chars = body.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic()) && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Calendar date of an ISO-8601 date (`2024-01-15`) or date-time
/// (`2024-01-15T10:00:00Z`, `2024-01-15T10:00:00`)
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Parse an optional date field; empty means absent
pub fn optional_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        None
    } else {
        parse_date(value)
    }
}
