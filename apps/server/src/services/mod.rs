//! Catalog services
//!
//! Services own the request semantics: condition resolution, filter
//! assembly, pagination, cache upkeep and bulk ingest. They talk to
//! storage only through the store traits.

pub mod chairs;
pub mod estates;
pub mod ingest;

pub use chairs::{ChairSearchParams, ChairService};
pub use estates::{EstateSearchParams, EstateService};

use crate::{Error, Result};

/// Parse the mandatory `page` / `perPage` pair.
///
/// Both must be integers; `page` may be zero, `perPage` must be at
/// least one. Anything else is a client error.
pub fn parse_paging(page: Option<&str>, per_page: Option<&str>) -> Result<(i64, i64)> {
    let page = parse_required("page", page)?;
    let per_page = parse_required("perPage", per_page)?;
    if page < 0 {
        return Err(Error::InvalidArgument(format!("page must not be negative: {page}")));
    }
    if per_page < 1 {
        return Err(Error::InvalidArgument(format!(
            "perPage must be at least 1: {per_page}"
        )));
    }
    Ok((page, per_page))
}

/// Row offset of a page window. `perPage` carries no upper bound, so
/// the multiplication can overflow on adversarial input; that is a
/// client error, not a panic.
pub fn page_offset(page: i64, per_page: i64) -> Result<i64> {
    page.checked_mul(per_page).ok_or_else(|| {
        Error::InvalidArgument(format!("page window out of range: {page} x {per_page}"))
    })
}

fn parse_required(name: &str, value: Option<&str>) -> Result<i64> {
    let raw = value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::InvalidArgument(format!("missing query parameter: {name}")))?;
    raw.parse()
        .map_err(|_| Error::InvalidArgument(format!("invalid {name}: {raw}")))
}

/// Treat an absent or empty query parameter as "not supplied".
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_paging_accepted() {
        assert_eq!(parse_paging(Some("0"), Some("20")).unwrap(), (0, 20));
        assert_eq!(parse_paging(Some("3"), Some("1")).unwrap(), (3, 1));
    }

    #[test]
    fn missing_paging_rejected() {
        assert!(parse_paging(None, Some("20")).is_err());
        assert!(parse_paging(Some("0"), None).is_err());
        assert!(parse_paging(Some(""), Some("20")).is_err());
    }

    #[test]
    fn non_integer_paging_rejected() {
        assert!(parse_paging(Some("abc"), Some("20")).is_err());
        assert!(parse_paging(Some("0"), Some("1.5")).is_err());
    }

    #[test]
    fn paging_bounds_enforced() {
        assert!(parse_paging(Some("-1"), Some("20")).is_err());
        assert!(parse_paging(Some("0"), Some("0")).is_err());
        assert!(parse_paging(Some("0"), Some("-5")).is_err());
    }

    #[test]
    fn page_offset_is_page_times_per_page() {
        assert_eq!(page_offset(0, 20).unwrap(), 0);
        assert_eq!(page_offset(3, 20).unwrap(), 60);
    }

    #[test]
    fn overflowing_page_window_rejected() {
        assert!(matches!(
            page_offset(i64::MAX, 2),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn empty_string_is_absent() {
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&Some("black".to_string())), Some("black"));
        assert_eq!(present(&None), None);
    }
}
