//! Query parameters passed through to resource URLs.
//!
//! The resource layer does not interpret keys. It only has to serialize them
//! so that parsing the query string gives back the same mapping:
//!
//! - scalars: `key=value`
//! - arrays: one `key[]=value` pair per element, or a bare `key[]` when empty
//!
//! Keys and values are percent-encoded, and keys are emitted in sorted order.
//!
//! # Example
//!
//! ```rust
//! use shopify_resources::rest::QueryParams;
//!
//! let query = QueryParams::new()
//!     .with("limit", 5)
//!     .with("ids", vec!["1", "2"]);
//!
//! let encoded = query.to_query_string();
//! assert_eq!(encoded, "ids[]=1&ids[]=2&limit=5");
//! assert_eq!(QueryParams::parse(&encoded), query);
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

const ARRAY_SUFFIX: &str = "[]";

/// A single query parameter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    /// `key=value`
    Scalar(String),
    /// `key[]=a&key[]=b`
    List(Vec<String>),
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Scalar(value.to_string())
    }
}

macro_rules! scalar_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from_integer!(i32, i64, u32, u64, usize);

impl<T: ToString> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.iter().map(ToString::to_string).collect())
    }
}

/// An ordered mapping of query parameter names to values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, QueryValue>);

impl QueryParams {
    /// Creates an empty set of parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a parameter, returning the previous value for the key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> Option<QueryValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &QueryValue)> {
        self.0.iter()
    }

    /// Builds parameters from any serializable struct or map.
    ///
    /// `null` fields are skipped, arrays become lists, nested objects are
    /// sent as their JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `params` cannot be serialized.
    pub fn from_serializable<T: Serialize + ?Sized>(params: &T) -> Result<Self, serde_json::Error> {
        let mut query = Self::new();

        if let Value::Object(map) = serde_json::to_value(params)? {
            for (key, value) in map {
                let value = match value {
                    Value::Null => continue,
                    Value::String(s) => QueryValue::Scalar(s),
                    Value::Array(items) => {
                        QueryValue::List(items.into_iter().map(scalar_text).collect())
                    }
                    other => QueryValue::Scalar(scalar_text(other)),
                };
                query.0.insert(key, value);
            }
        }

        Ok(query)
    }

    /// Serializes to `a=1&b[]=x&b[]=y`, without a leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::with_capacity(self.0.len());

        for (key, value) in &self.0 {
            let key = urlencoding::encode(key);
            match value {
                QueryValue::Scalar(v) => {
                    pairs.push(format!("{key}={}", urlencoding::encode(v)));
                }
                QueryValue::List(items) if items.is_empty() => {
                    pairs.push(format!("{key}{ARRAY_SUFFIX}"));
                }
                QueryValue::List(items) => {
                    for item in items {
                        pairs.push(format!("{key}{ARRAY_SUFFIX}={}", urlencoding::encode(item)));
                    }
                }
            }
        }

        pairs.join("&")
    }

    /// Parses a query string, with or without a leading `?`.
    ///
    /// `+` decodes to a space. Pairs that are not valid percent-encoded UTF-8
    /// are kept in their raw form. A repeated scalar key keeps the last value.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = match pair.split_once('=') {
                Some((k, v)) => (k, Some(v)),
                None => (pair, None),
            };

            // The suffix is emitted unencoded, so check it before decoding.
            if let Some(raw_key) = raw_key.strip_suffix(ARRAY_SUFFIX) {
                let key = decode(raw_key).into_owned();
                let entry = params
                    .0
                    .entry(key)
                    .or_insert_with(|| QueryValue::List(Vec::new()));
                if !matches!(entry, QueryValue::List(_)) {
                    *entry = QueryValue::List(Vec::new());
                }
                if let (QueryValue::List(items), Some(v)) = (entry, raw_value) {
                    items.push(decode(v).into_owned());
                }
            } else {
                let value = raw_value.map(decode).unwrap_or_default().into_owned();
                params
                    .0
                    .insert(decode(raw_key).into_owned(), QueryValue::Scalar(value));
            }
        }

        params
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn decode(raw: &str) -> Cow<'_, str> {
    if raw.contains('+') {
        let spaced = raw.replace('+', " ");
        let decoded = urlencoding::decode(&spaced).map(Cow::into_owned);
        return Cow::Owned(decoded.unwrap_or(spaced));
    }
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
