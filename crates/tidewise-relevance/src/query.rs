use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category filter value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// A normalized search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// The raw text as supplied by the caller.
    pub text: String,
    /// Trimmed, lowercased text used for substring tests.
    pub normalized: String,
    /// Lowercase whitespace-separated tokens.
    pub tokens: Vec<String>,
}

impl Query {
    pub fn new(text: &str) -> Self {
        let normalized = text.trim().to_lowercase();
        let tokens = tokenize(text);

        Self {
            text: text.to_string(),
            normalized,
            tokens,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Splits on whitespace and lowercases each token.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Descending relevance score.
    #[default]
    Relevance,
    /// Ascending parsed price.
    Price,
    /// Descending rating, unrated counts as 0.
    Rating,
    /// Descending review count, missing counts as 0.
    Popularity,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relevance => write!(f, "relevance"),
            Self::Price => write!(f, "price"),
            Self::Rating => write!(f, "rating"),
            Self::Popularity => write!(f, "popularity"),
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "price" => Ok(Self::Price),
            "rating" => Ok(Self::Rating),
            "popularity" => Ok(Self::Popularity),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Filters, ordering and size of a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub category: Option<String>,
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub in_stock_only: bool,
    #[serde(default)]
    pub sort_by: SortBy,
    pub limit: Option<usize>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    pub fn with_in_stock_only(mut self, in_stock_only: bool) -> Self {
        self.in_stock_only = in_stock_only;
        self
    }

    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The category filter, unless absent or the `all` sentinel.
    pub fn effective_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES))
    }
}
