//! List query options: pagination, `where` filters and ordering.
//!
//! Every `list_*` operation accepts a [`ListOptions`]. Pagination is a single
//! `page`/`per_page` pair; there is no cursor.
//!
//! # Examples
//!
//! ```
//! use qvo::query::{Filter, ListOptions};
//!
//! let options = ListOptions::new()
//!     .page(2, 25)
//!     .filter(Filter::new().like("email", "%@example.com"))
//!     .order_by("created_at DESC");
//!
//! let params = options.to_params().unwrap();
//! assert_eq!(params.get("page"), Some("2"));
//! assert_eq!(params.get("where"), Some(r#"{"email":{"like":"%@example.com"}}"#));
//! ```

use std::collections::BTreeMap;

use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

use crate::{
    error::{QvoError, Result},
    params::Params,
};

/// A single `operator: value` condition on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Comparison operator as understood by QVO (`=`, `like`, `>`, `<`, `>=`, `<=`, `!=`).
    pub operator: String,
    /// Value to compare against.
    pub value: Value,
}

/// Mapping from field name to a single condition, sent as the `where` parameter.
///
/// Serializes to `{"field": {"operator": value}}`. Setting the same field twice
/// keeps only the last condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: BTreeMap<String, Condition>,
}

impl Filter {
    /// Creates an empty filter.
    #[must_use]
    pub const fn new() -> Self {
        Self { conditions: BTreeMap::new() }
    }

    /// Adds (or replaces) the condition on `field`.
    #[must_use]
    pub fn with(
        mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.insert(field, operator, value);
        self
    }

    /// Adds (or replaces) the condition on `field` in place.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.conditions
            .insert(field.into(), Condition { operator: operator.into(), value: value.into() });
        self
    }

    /// Shorthand for an `=` condition.
    #[must_use]
    pub fn equals(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(field, "=", value)
    }

    /// Shorthand for a SQL-style `like` condition (`%` is the wildcard).
    #[must_use]
    pub fn like(self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.with(field, "like", pattern.into())
    }

    /// Returns the condition on `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Condition> {
        self.conditions.get(field)
    }

    /// Whether the filter has no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Serializes the filter to its compact JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Validation`] if a value cannot be represented as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| QvoError::Validation(format!("invalid where filter: {e}")))
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.conditions.len()))?;
        for (field, condition) in &self.conditions {
            let mut inner = serde_json::Map::with_capacity(1);
            inner.insert(condition.operator.clone(), condition.value.clone());
            map.serialize_entry(field, &inner)?;
        }
        map.end()
    }
}

/// Options shared by every list operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
    /// `where` filter.
    pub filter: Filter,
    /// Order clause, e.g. `created_at DESC`.
    pub order_by: Option<String>,
}

impl ListOptions {
    /// Options that list the first page with server defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page and page size.
    #[must_use]
    pub const fn page(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    /// Sets the `where` filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the order clause.
    #[must_use]
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Converts the options into query parameters.
    ///
    /// `page` and `per_page` are only sent together and only when both are
    /// positive. An empty filter or order clause is omitted.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Validation`] if the filter cannot be serialized.
    pub fn to_params(&self) -> Result<Params> {
        let mut params = Params::new();

        if let (Some(page), Some(per_page)) = (self.page, self.per_page)
            && page > 0
            && per_page > 0
        {
            params.push("page", page).push("per_page", per_page);
        }

        if !self.filter.is_empty() {
            params.push("where", self.filter.to_json()?);
        }

        if let Some(order_by) = self.order_by.as_deref()
            && !order_by.trim().is_empty()
        {
            params.push("order_by", order_by);
        }

        Ok(params)
    }
}
