//! Page/sort parameter normalisation for list endpoints.

use std::fmt;

/// Default page size when `pageSize` is omitted.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound for `pageSize`.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided page number to `>= 1`.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a user-provided page size to `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(page_size: Option<i64>) -> i64 {
    page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Row offset for a (clamped) page.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page - 1).saturating_mul(page_size)
}

/// Number of pages needed for `total` rows (0 when there are no rows).
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A validated `field:dir` sort specification.
///
/// `field` is always one of the caller-supplied allowed columns, so it is
/// safe to interpolate into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction.as_sql())
    }
}

/// Parse `field[:asc|desc]` against a whitelist of sortable fields.
///
/// `None` or an empty string yields `default`. Direction defaults to `desc`.
pub fn parse_sort(
    raw: Option<&str>,
    allowed: &[&'static str],
    default: SortSpec,
) -> Result<SortSpec, String> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(r) => r,
    };

    let (field, dir) = match raw.split_once(':') {
        Some((f, d)) => (f.trim(), Some(d.trim())),
        None => (raw, None),
    };

    let field = allowed
        .iter()
        .copied()
        .find(|a| *a == field)
        .ok_or_else(|| format!("cannot sort by '{field}'"))?;

    let direction = match dir.map(str::to_ascii_lowercase).as_deref() {
        None | Some("desc") => SortDirection::Desc,
        Some("asc") => SortDirection::Asc,
        Some(other) => return Err(format!("invalid sort direction '{other}'")),
    };

    Ok(SortSpec { field, direction })
}
