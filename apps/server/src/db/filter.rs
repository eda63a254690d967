//! SQL filter construction
//!
//! Filters are collected as typed (column, comparison, value) entries
//! and rendered to a WHERE fragment with numbered placeholders plus a
//! parallel bind list. User input never reaches the SQL text; it only
//! ever travels through the bind list.

use crate::{Error, Result};

/// A value destined for a bind placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(i64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterOrEqual,
    LessThan,
    GreaterThan,
    Equals,
    /// Substring match; the bound value must already be LIKE-escaped.
    Contains,
}

#[derive(Debug, Clone)]
struct Filter {
    column: &'static str,
    comparison: Comparison,
    value: BindValue,
}

/// An ordered set of AND-combined filters.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    fn push(&mut self, column: &'static str, comparison: Comparison, value: BindValue) {
        self.filters.push(Filter {
            column,
            comparison,
            value,
        });
    }

    /// Apply a bucket's bounds to `column`. An unconstrained side adds
    /// no predicate; the lower bound is inclusive, the upper exclusive.
    pub fn range(&mut self, column: &'static str, bucket: &crate::conditions::Bucket) {
        if let Some(min) = bucket.min {
            self.push(column, Comparison::GreaterOrEqual, BindValue::Int(min));
        }
        if let Some(max) = bucket.max {
            self.push(column, Comparison::LessThan, BindValue::Int(max));
        }
    }

    pub fn equals(&mut self, column: &'static str, value: &str) {
        self.push(column, Comparison::Equals, BindValue::Text(value.to_string()));
    }

    pub fn greater_than(&mut self, column: &'static str, value: i64) {
        self.push(column, Comparison::GreaterThan, BindValue::Int(value));
    }

    /// Split a comma-separated feature list and require each entry as a
    /// substring match. Empty entries are kept, matching everything.
    pub fn feature_list(&mut self, column: &'static str, raw: &str) {
        for feature in raw.split(',') {
            self.push(
                column,
                Comparison::Contains,
                BindValue::Text(escape_like_pattern(feature)),
            );
        }
    }

    /// Render the filters to a WHERE fragment with placeholders starting
    /// at `$1` and the bind values in placeholder order.
    pub fn build(&self) -> Result<(String, Vec<BindValue>)> {
        if self.filters.is_empty() {
            return Err(Error::InvalidArgument(
                "no search condition supplied".to_string(),
            ));
        }

        let mut clauses = Vec::with_capacity(self.filters.len());
        let mut binds = Vec::with_capacity(self.filters.len());
        for (i, filter) in self.filters.iter().enumerate() {
            let n = i + 1;
            let clause = match filter.comparison {
                Comparison::GreaterOrEqual => format!("{} >= ${n}", filter.column),
                Comparison::LessThan => format!("{} < ${n}", filter.column),
                Comparison::GreaterThan => format!("{} > ${n}", filter.column),
                Comparison::Equals => format!("{} = ${n}", filter.column),
                Comparison::Contains => {
                    format!("{} LIKE '%' || ${n} || '%'", filter.column)
                }
            };
            clauses.push(clause);
            binds.push(filter.value.clone());
        }

        Ok((clauses.join(" AND "), binds))
    }
}

/// Escape LIKE metacharacters so the value matches literally.
pub fn escape_like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' | '%' | '_' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Bucket;

    #[test]
    fn empty_filter_set_is_rejected() {
        let filters = FilterSet::new();
        assert!(matches!(
            filters.build(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn bounded_bucket_produces_two_predicates() {
        let mut filters = FilterSet::new();
        filters.range(
            "price",
            &Bucket {
                id: 1,
                min: Some(3000),
                max: Some(6000),
            },
        );
        let (sql, binds) = filters.build().unwrap();
        assert_eq!(sql, "price >= $1 AND price < $2");
        assert_eq!(binds, vec![BindValue::Int(3000), BindValue::Int(6000)]);
    }

    #[test]
    fn open_lower_bound_omits_predicate() {
        let mut filters = FilterSet::new();
        filters.range(
            "price",
            &Bucket {
                id: 0,
                min: None,
                max: Some(3000),
            },
        );
        let (sql, binds) = filters.build().unwrap();
        assert_eq!(sql, "price < $1");
        assert_eq!(binds, vec![BindValue::Int(3000)]);
    }

    #[test]
    fn feature_list_splits_on_commas() {
        let mut filters = FilterSet::new();
        filters.feature_list("features", "reclining,footrest");
        let (sql, binds) = filters.build().unwrap();
        assert_eq!(
            sql,
            "features LIKE '%' || $1 || '%' AND features LIKE '%' || $2 || '%'"
        );
        assert_eq!(
            binds,
            vec![
                BindValue::Text("reclining".to_string()),
                BindValue::Text("footrest".to_string())
            ]
        );
    }

    #[test]
    fn feature_values_are_like_escaped() {
        let mut filters = FilterSet::new();
        filters.feature_list("features", "100%_wool");
        let (_, binds) = filters.build().unwrap();
        assert_eq!(binds, vec![BindValue::Text("100\\%\\_wool".to_string())]);
    }

    #[test]
    fn placeholders_are_numbered_across_comparisons() {
        let mut filters = FilterSet::new();
        filters.equals("color", "black");
        filters.greater_than("stock", 0);
        filters.feature_list("features", "washable");
        let (sql, binds) = filters.build().unwrap();
        assert_eq!(
            sql,
            "color = $1 AND stock > $2 AND features LIKE '%' || $3 || '%'"
        );
        assert_eq!(binds.len(), 3);
    }

    #[test]
    fn escape_handles_backslash_percent_underscore() {
        assert_eq!(escape_like_pattern(r"a\b"), r"a\\b");
        assert_eq!(escape_like_pattern("50%"), r"50\%");
        assert_eq!(escape_like_pattern("a_b"), r"a\_b");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }
}
