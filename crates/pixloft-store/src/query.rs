//! Query builder for document listing.
//!
//! The store takes queries as encoded strings in repeated `queries[]`
//! parameters, e.g. `equal("userId",["u1"])`. Attribute names and values are
//! JSON-quoted so embedded quotes cannot break the encoding.

use std::fmt;

/// One encoded query fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

fn json_str(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

impl Query {
    /// Equality filter on one attribute.
    pub fn equal(attribute: &str, value: &str) -> Self {
        Query(format!(
            "equal({},[{}])",
            json_str(attribute),
            json_str(value)
        ))
    }

    /// Descending order by attribute.
    pub fn order_desc(attribute: &str) -> Self {
        Query(format!("orderDesc({})", json_str(attribute)))
    }

    pub fn limit(count: usize) -> Self {
        Query(format!("limit({})", count))
    }

    pub fn offset(count: usize) -> Self {
        Query(format!("offset({})", count))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_encoding() {
        assert_eq!(
            Query::equal("userId", "u1").as_str(),
            r#"equal("userId",["u1"])"#
        );
        assert_eq!(
            Query::equal("fileId", "abc123").as_str(),
            r#"equal("fileId",["abc123"])"#
        );
    }

    #[test]
    fn test_order_desc_encoding() {
        assert_eq!(
            Query::order_desc("createdAt").as_str(),
            r#"orderDesc("createdAt")"#
        );
    }

    #[test]
    fn test_limit_and_offset_encoding() {
        assert_eq!(Query::limit(9).as_str(), "limit(9)");
        assert_eq!(Query::offset(18).as_str(), "offset(18)");
    }

    #[test]
    fn test_values_with_quotes_stay_wellformed() {
        let q = Query::equal("name", r#"say "cheese""#);
        assert_eq!(q.as_str(), r#"equal("name",["say \"cheese\""])"#);
    }
}
