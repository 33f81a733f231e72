use url::Url;

use crate::error::ScrapeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Multi(Vec<String>),
}

impl ParamValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ParamValue::Single(v) => Some(v),
            ParamValue::Multi(_) => None,
        }
    }
}

/// Query parameters in first-seen order. Setting an existing key keeps its slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn set(&mut self, key: &str, value: impl ToString) {
        let value = ParamValue::Single(value.to_string());
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Flattened `(key, value)` pairs; multi-valued keys repeat.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::with_capacity(self.entries.len());
        for (k, v) in &self.entries {
            match v {
                ParamValue::Single(s) => out.push((k.as_str(), s.as_str())),
                ParamValue::Multi(vs) => out.extend(vs.iter().map(|s| (k.as_str(), s.as_str()))),
            }
        }
        out
    }

    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

/// Split a URL into its base (scheme, authority, path) and its query parameters.
///
/// Keys seen once collapse to [`ParamValue::Single`]; repeated keys stay a sequence.
/// Blank values (`key=`) are dropped, so such a key counts as absent.
pub fn decompose(raw: &str) -> Result<(String, QueryParams), ScrapeError> {
    let mut url = Url::parse(raw)?;

    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for (k, v) in url.query_pairs() {
        if v.is_empty() {
            continue;
        }
        match grouped.iter_mut().find(|(key, _)| *key == k) {
            Some((_, values)) => values.push(v.into_owned()),
            None => grouped.push((k.into_owned(), vec![v.into_owned()])),
        }
    }

    let entries = grouped
        .into_iter()
        .map(|(k, mut values)| {
            let value = if values.len() == 1 {
                ParamValue::Single(values.remove(0))
            } else {
                ParamValue::Multi(values)
            };
            (k, value)
        })
        .collect();

    url.set_query(None);
    url.set_fragment(None);

    Ok((url.to_string(), QueryParams { entries }))
}
