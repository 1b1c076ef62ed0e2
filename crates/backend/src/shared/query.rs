//! Generic filter → sort → paginate pipeline over in-memory collections.
//!
//! Every mock entity builds a [`ListQuery`] from its query parameters using
//! field accessors and then calls [`ListQuery::run`]. Filters are conjunctive,
//! an absent parameter constrains nothing.

use std::cmp::Ordering;

use contracts::shared::list::ListResponse;

use crate::shared::error::{ApiError, ApiResult};

/// Rank used for records without an explicit order, so they sort last
pub const UNORDERED_RANK: i64 = 999;

/// Page size used when only `page` is supplied
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Parses raw `page`/`limit` query values.
    ///
    /// Returns `None` when neither is present (the caller gets the full list).
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> ApiResult<Option<Self>> {
        let page = page.map(str::trim).filter(|v| !v.is_empty());
        let limit = limit.map(str::trim).filter(|v| !v.is_empty());
        if page.is_none() && limit.is_none() {
            return Ok(None);
        }
        let page = match page {
            Some(raw) => parse_positive("page", raw)?,
            None => 1,
        };
        let limit = match limit {
            Some(raw) => parse_positive("limit", raw)?,
            None => DEFAULT_PAGE_LIMIT,
        };
        Ok(Some(Self { page, limit }))
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_positive(name: &str, raw: &str) -> ApiResult<usize> {
    match raw.parse::<usize>() {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err(ApiError::Validation(format!(
            "Invalid '{}' parameter: expected a positive integer, got '{}'",
            name, raw
        ))),
    }
}

/// Parses a boolean filter literal. Only `true` and `false` are accepted.
pub fn parse_flag(name: &str, raw: Option<&str>) -> ApiResult<Option<bool>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(ApiError::Validation(format!(
            "Invalid '{}' parameter: expected 'true' or 'false', got '{}'",
            name, other
        ))),
    }
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Conjunction of predicates over `T`
pub struct ListQuery<T> {
    predicates: Vec<Predicate<T>>,
}

impl<T: 'static> Default for ListQuery<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ListQuery<T> {
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Exact match on an optional string field
    pub fn eq_str(mut self, expected: Option<&str>, field: fn(&T) -> Option<&str>) -> Self {
        if let Some(expected) = expected.map(str::trim).filter(|v| !v.is_empty()) {
            let expected = expected.to_string();
            self.predicates
                .push(Box::new(move |item| field(item) == Some(expected.as_str())));
        }
        self
    }

    /// Exact match on a copyable field (enums, numbers)
    pub fn eq<V>(mut self, expected: Option<V>, field: fn(&T) -> V) -> Self
    where
        V: PartialEq + Send + Sync + 'static,
    {
        if let Some(expected) = expected {
            self.predicates.push(Box::new(move |item| field(item) == expected));
        }
        self
    }

    /// Boolean filter from a `"true"`/`"false"` literal
    pub fn flag(mut self, name: &str, raw: Option<&str>, field: fn(&T) -> bool) -> ApiResult<Self> {
        if let Some(expected) = parse_flag(name, raw)? {
            self.predicates.push(Box::new(move |item| field(item) == expected));
        }
        Ok(self)
    }

    /// Case-insensitive substring search, OR-ed across `fields`
    pub fn search(mut self, raw: Option<&str>, fields: fn(&T) -> Vec<Option<&str>>) -> Self {
        if let Some(needle) = raw.map(str::trim).filter(|v| !v.is_empty()) {
            let needle = needle.to_lowercase();
            self.predicates.push(Box::new(move |item| {
                fields(item)
                    .into_iter()
                    .flatten()
                    .any(|value| value.to_lowercase().contains(&needle))
            }));
        }
        self
    }

    /// Arbitrary predicate, applied only when `enabled`
    pub fn when(mut self, enabled: bool, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        if enabled {
            self.predicates.push(Box::new(predicate));
        }
        self
    }

    pub fn matches(&self, item: &T) -> bool {
        self.predicates.iter().all(|p| p(item))
    }

    /// Filters, sorts by `(order, name)` and paginates
    pub fn run(
        self,
        items: Vec<T>,
        order: fn(&T) -> Option<i32>,
        name: fn(&T) -> &str,
        page: Option<PageRequest>,
    ) -> ListResponse<T> {
        let mut filtered: Vec<T> = items.into_iter().filter(|i| self.matches(i)).collect();
        sort_by_order_then_name(&mut filtered, order, name);
        paginate(filtered, page)
    }
}

/// Ascending by explicit order (absent = [`UNORDERED_RANK`]), then by collated name
pub fn sort_by_order_then_name<T>(items: &mut [T], order: fn(&T) -> Option<i32>, name: fn(&T) -> &str) {
    items.sort_by(|a, b| {
        order_rank(order(a))
            .cmp(&order_rank(order(b)))
            .then_with(|| compare_names(name(a), name(b)))
    });
}

pub fn order_rank(order: Option<i32>) -> i64 {
    order.map(i64::from).unwrap_or(UNORDERED_RANK)
}

/// Slices a sorted list into the requested page
pub fn paginate<T>(items: Vec<T>, page: Option<PageRequest>) -> ListResponse<T> {
    let Some(page) = page else {
        return ListResponse::unpaged(items);
    };
    let total = items.len();
    let content: Vec<T> = items
        .into_iter()
        .skip(page.offset())
        .take(page.limit)
        .collect();
    ListResponse {
        content,
        total,
        page: Some(page.page),
        limit: Some(page.limit),
        total_pages: Some(total.div_ceil(page.limit)),
    }
}

/// Locale-aware name comparison: accents and case are ignored first, then
/// used as tie-breakers so the order stays total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Lowercased text with Latin diacritics folded to their base letter
pub fn collation_key(value: &str) -> String {
    value.to_lowercase().chars().map(fold_diacritic).collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
