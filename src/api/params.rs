use crate::error::ApiError;

/// Default (and maximum) page size of the list endpoints.
pub const DEFAULT_LIMIT: u32 = 100;
pub const HISTORY_MIN_LIMIT: u32 = 20;
pub const HISTORY_MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    List(Vec<String>),
}

impl ParamValue {
    /// Flattened form sent over the wire. Lists are comma-joined.
    pub fn to_wire(&self) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            ParamValue::Int(n) => n.to_string(),
            ParamValue::List(items) => items.join(","),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<Ids> for ParamValue {
    fn from(value: Ids) -> Self {
        let mut items = value.0;
        if items.len() == 1 {
            ParamValue::Text(items.remove(0))
        } else {
            ParamValue::List(items)
        }
    }
}

/// One identifier or a list of identifiers (account, clan or member ids).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ids(Vec<String>);

impl Ids {
    /// True when there is no usable identifier at all.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|id| id.trim().is_empty())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    fn cleaned(self) -> Self {
        Ids(self
            .0
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect())
    }
}

impl From<&str> for Ids {
    fn from(value: &str) -> Self {
        Ids(vec![value.to_string()])
    }
}

impl From<String> for Ids {
    fn from(value: String) -> Self {
        Ids(vec![value])
    }
}

impl From<&String> for Ids {
    fn from(value: &String) -> Self {
        Ids(vec![value.clone()])
    }
}

impl From<u64> for Ids {
    fn from(value: u64) -> Self {
        Ids(vec![value.to_string()])
    }
}

impl From<i64> for Ids {
    fn from(value: i64) -> Self {
        Ids(vec![value.to_string()])
    }
}

impl<T: ToString> From<Vec<T>> for Ids {
    fn from(value: Vec<T>) -> Self {
        Ids(value.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for Ids {
    fn from(value: &[T]) -> Self {
        Ids(value.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for Ids {
    fn from(value: [T; N]) -> Self {
        Ids(value.iter().map(ToString::to_string).collect())
    }
}

/// Ordered parameter mapping. Re-inserting a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: Vec<(String, ParamValue)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Insert a required text argument, rejecting blank input.
    pub fn require_text(&mut self, key: &'static str, value: &str) -> Result<(), ApiError> {
        if value.trim().is_empty() {
            return Err(ApiError::MissingArgument(key));
        }
        self.insert(key, value);
        Ok(())
    }

    /// Insert a required identifier list, rejecting an empty one.
    pub fn require_ids(&mut self, key: &'static str, ids: Ids) -> Result<(), ApiError> {
        if ids.is_blank() {
            return Err(ApiError::MissingArgument(key));
        }
        self.insert(key, ids.cleaned());
        Ok(())
    }

    pub fn insert_fields(&mut self, fields: &[&str]) {
        let fields: Vec<String> = fields
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        if !fields.is_empty() {
            self.insert("fields", ParamValue::List(fields));
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `application/x-www-form-urlencoded` serialization.
    pub fn encode(&self) -> Result<String, ApiError> {
        let pairs: Vec<(&str, String)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.to_wire()))
            .collect();

        serde_urlencoded::to_string(&pairs).map_err(|e| ApiError::Encoding(e.to_string()))
    }
}

/// Limit for the list endpoints: capped at 100, omitted when it equals the default.
pub fn capped_limit(limit: u32) -> Option<u32> {
    match limit.min(DEFAULT_LIMIT) {
        0 | DEFAULT_LIMIT => None,
        n => Some(n),
    }
}

/// Limit for victory points history: 0 omits it, anything else lands in 20..=100.
pub fn history_limit(limit: u32) -> Option<u32> {
    if limit == 0 {
        return None;
    }
    Some(limit.clamp(HISTORY_MIN_LIMIT, HISTORY_MAX_LIMIT))
}

/// Optional page size for the ratings endpoints, capped at 100.
pub fn optional_limit(limit: Option<u32>) -> Option<u32> {
    limit.filter(|&n| n > 0).map(|n| n.min(DEFAULT_LIMIT))
}
