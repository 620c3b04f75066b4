//! Query-string assembly and the list/pagination shapes shared by every
//! collection endpoint.
//!
//! Optional request fields are described once, as a table of
//! [`QueryField`]s, instead of being copied by hand in every wrapper. A field
//! whose getter returns `None` never reaches the query string.

use serde::{Deserialize, Serialize};

use crate::Id;

/// Ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn extend(&mut self, other: Query) {
        self.0.extend(other.0);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` rendering, without the leading `?`.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// One row of a request-to-query mapping table.
pub struct QueryField<R> {
    pub key: &'static str,
    pub value: fn(&R) -> Option<String>,
}

pub fn build_query<R>(request: &R, fields: &[QueryField<R>]) -> Query {
    let mut q = Query::new();
    for field in fields {
        if let Some(v) = (field.value)(request) {
            q.push(field.key, v);
        }
    }
    q
}

/// Appends `?<query>` to `path` unless the query is empty.
pub fn with_query(path: &str, query: &Query) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    format!("{path}?{}", query.encode())
}

/// Percent-encodes one path segment (ids, names, scratchpad keys).
pub(crate) fn segment(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Cursor window for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}

impl Pagination {
    pub fn first(size: u32) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Query {
        build_query(self, PAGINATION_FIELDS)
    }
}

pub const PAGINATION_FIELDS: &[QueryField<Pagination>] = &[
    QueryField {
        key: "before",
        value: |p| p.before.clone(),
    },
    QueryField {
        key: "after",
        value: |p| p.after.clone(),
    },
    QueryField {
        key: "reverse",
        value: |p| p.reverse.map(|b| b.to_string()),
    },
    QueryField {
        key: "size",
        value: |p| p.size.map(|n| n.to_string()),
    },
];

/// Position returned by a list endpoint for the adjacent page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl Cursor {
    /// Pagination that requests the page this cursor points at.
    pub fn to_pagination(&self) -> Pagination {
        Pagination {
            after: self.after.clone(),
            before: self.before.clone(),
            size: self.size,
            reverse: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(default)]
    pub elements: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Cursor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Cursor>,
}
