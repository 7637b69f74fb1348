//! Canonical parameter encodings.
//!
//! Two grammars are used when talking to the repository:
//!
//! - **Matrix parameters** (`key=v1;key=v2;other=x`), appended to deploy
//!   URLs. Nothing is escaped.
//! - **Property strings** (`key=v1,v2|other=x`), used to tag items with
//!   metadata. `=`, `|` and `,` inside values are backslash-escaped; the
//!   backslash itself is not.
//!
//! Keys are always emitted in ascending order, which [`Parameters`] (a
//! `BTreeMap`) guarantees.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Characters that must be escaped inside property values.
const PROPERTY_SPECIALS: [char; 3] = ['=', '|', ','];

/// A parameter value: one string or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A single value.
    Single(String),
    /// Several values for the same key, in order.
    Multi(Vec<String>),
}

impl ParamValue {
    /// The values as a slice, one element for [`ParamValue::Single`].
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multi(values.into_iter().map(str::to_string).collect())
    }
}

/// Key/value parameters, iterated in ascending key order.
pub type Parameters = BTreeMap<String, ParamValue>;

/// Build [`Parameters`] from `(key, value)` pairs.
///
/// # Examples
///
/// ```
/// use artpath::codec::{params, ParamValue};
///
/// let p = params([("foo", ParamValue::from("bar")), ("baz", vec!["a", "b"].into())]);
/// assert_eq!(p.keys().collect::<Vec<_>>(), ["baz", "foo"]);
/// ```
pub fn params<I, K>(pairs: I) -> Parameters
where
    I: IntoIterator<Item = (K, ParamValue)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Encode matrix parameters.
///
/// See <http://www.w3.org/DesignIssues/MatrixURIs.html>.
///
/// # Examples
///
/// ```
/// use artpath::codec::{encode_matrix_parameters, params, ParamValue};
///
/// let p = params([("foo", ParamValue::from("bar")), ("qux", "asdf".into())]);
/// assert_eq!(encode_matrix_parameters(&p), "foo=bar;qux=asdf");
///
/// let p = params([("baz", ParamValue::from(vec!["bar", "quux"])), ("foo", "asdf".into())]);
/// assert_eq!(encode_matrix_parameters(&p), "baz=bar;baz=quux;foo=asdf");
/// ```
#[must_use]
pub fn encode_matrix_parameters(parameters: &Parameters) -> String {
    parameters
        .iter()
        .map(|(key, value)| {
            let value = match value {
                ParamValue::Single(v) => v.clone(),
                ParamValue::Multi(vs) => vs.join(&format!(";{key}=")),
            };
            format!("{key}={value}")
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Backslash-escape `=`, `|` and `,`.
///
/// # Examples
///
/// ```
/// use artpath::codec::escape_chars;
///
/// assert_eq!(escape_chars("a,b|c=d"), r"a\,b\|c\=d");
/// assert_eq!(escape_chars(r"ba\r"), r"ba\r");
/// ```
#[must_use]
pub fn escape_chars(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        if PROPERTY_SPECIALS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Encode item properties.
///
/// # Examples
///
/// ```
/// use artpath::codec::{encode_properties, params, ParamValue};
///
/// let p = params([("foo", ParamValue::from("bar,baz")), ("qux", "as=df".into())]);
/// assert_eq!(encode_properties(&p), r"foo=bar\,baz|qux=as\=df");
/// ```
#[must_use]
pub fn encode_properties(parameters: &Parameters) -> String {
    parameters
        .iter()
        .map(|(key, value)| {
            let value = value
                .values()
                .iter()
                .map(|v| escape_chars(v))
                .collect::<Vec<_>>()
                .join(",");
            format!("{key}={value}")
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Split `s` on every unescaped `delimiter`, leaving escapes intact.
fn split_unescaped(s: &str, delimiter: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (idx, ch) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == delimiter {
            pieces.push(&s[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    pieces.push(&s[start..]);
    pieces
}

/// Undo [`escape_chars`]. Backslashes not followed by a special character
/// are kept.
#[must_use]
pub fn unescape_chars(s: &str) -> String {
    let mut unescaped = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(&next) = chars.peek() {
                if PROPERTY_SPECIALS.contains(&next) {
                    unescaped.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        unescaped.push(ch);
    }
    unescaped
}

/// Decode a property string produced by [`encode_properties`].
///
/// Entries without an `=` decode to an empty value. A key listing one value
/// decodes to [`ParamValue::Single`], several to [`ParamValue::Multi`].
///
/// # Examples
///
/// ```
/// use artpath::codec::{decode_properties, ParamValue};
///
/// let p = decode_properties(r"baz=a,b\,c|foo=x\=y");
/// assert_eq!(p["baz"], ParamValue::from(vec!["a", "b,c"]));
/// assert_eq!(p["foo"], ParamValue::from("x=y"));
/// ```
#[must_use]
pub fn decode_properties(encoded: &str) -> Parameters {
    if encoded.is_empty() {
        return Parameters::new();
    }

    split_unescaped(encoded, '|')
        .into_iter()
        .map(|entry| {
            let (key, raw_value) = match split_unescaped(entry, '=').as_slice() {
                [key] => (*key, ""),
                [key, ..] => (*key, &entry[key.len() + 1..]),
                [] => ("", ""),
            };
            let mut values: Vec<String> = split_unescaped(raw_value, ',')
                .into_iter()
                .map(unescape_chars)
                .collect();
            let value = if values.len() == 1 {
                ParamValue::Single(values.remove(0))
            } else {
                ParamValue::Multi(values)
            };
            (unescape_chars(key), value)
        })
        .collect()
}
