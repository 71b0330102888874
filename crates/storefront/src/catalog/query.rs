//! Client-side filtering, sorting and pagination over the catalog snapshot.
//!
//! The listing flow fetches the full catalog once, then runs everything
//! here in memory: filter predicates, sort orders, fixed-size pages, and
//! the derived data the filter sidebar needs (category list, global price
//! bounds).

use rust_decimal::Decimal;

use super::types::Product;

/// Products shown per listing page.
pub const PAGE_SIZE: usize = 12;

/// Products shown on the featured strip of the home view.
pub const FEATURED_COUNT: usize = 12;

/// How many page numbers the pager displays at once.
const PAGER_WINDOW: usize = 5;

/// Category predicate for a listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Match every category.
    #[default]
    All,
    /// Match a single category, case-insensitively.
    Named(String),
}

impl CategoryFilter {
    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(wanted) => category.eq_ignore_ascii_case(wanted),
        }
    }
}

/// Listing filter; all predicates must pass.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Category to match, or [`CategoryFilter::All`].
    pub category: CategoryFilter,
    /// Inclusive `[low, high]` price window; `None` disables the check.
    pub price_window: Option<(Decimal, Decimal)>,
    /// Minimum whole-star rating; 0 disables the check.
    pub min_rating: u8,
}

impl ProductFilter {
    /// Whether a product passes every predicate.
    ///
    /// The price check is an overlap test between the product's price
    /// range and the window, so a variation product matches when any of
    /// its variations could fall inside the window.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !self.category.matches(&product.category) {
            return false;
        }

        if let Some((low, high)) = self.price_window {
            let range = product.price_range();
            if !(range.min <= high && range.max >= low) {
                return false;
            }
        }

        if self.min_rating > 0 && product.rating.floor() < f64::from(self.min_rating) {
            return false;
        }

        true
    }
}

/// Listing sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Descending rating (the default).
    #[default]
    Popularity,
    /// Ascending by the cheapest purchasable price.
    PriceLowToHigh,
    /// Descending by the most expensive purchasable price.
    PriceHighToLow,
    /// Descending creation timestamp.
    Newest,
}

/// Filter and sort a catalog snapshot.
///
/// Filtering preserves the input order; only the sort reorders.
#[must_use]
pub fn apply(products: &[Product], filter: &ProductFilter, sort: SortKey) -> Vec<Product> {
    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();

    match sort {
        SortKey::PriceLowToHigh => {
            filtered.sort_by(|a, b| a.price_range().min.cmp(&b.price_range().min));
        }
        SortKey::PriceHighToLow => {
            filtered.sort_by(|a, b| b.price_range().max.cmp(&a.price_range().max));
        }
        SortKey::Newest => filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Popularity => filtered.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }

    filtered
}

/// One fixed-size page of a listing; 1-based page index.
///
/// An out-of-range page (including page 0) yields an empty slice - the
/// pager is responsible for keeping the current page valid.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    page_slice(items, page, PAGE_SIZE)
}

/// One page of `items` with an explicit page size.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1) * page_size;
    let end = start.saturating_add(page_size).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// The featured strip: the first products of the catalog snapshot.
#[must_use]
pub fn featured(products: &[Product]) -> &[Product] {
    products.get(..FEATURED_COUNT.min(products.len())).unwrap_or(&[])
}

/// Pager state for a filtered listing.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    total_items: usize,
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    /// Pager over `total_items` with the standard page size.
    #[must_use]
    pub const fn new(total_items: usize, current_page: usize) -> Self {
        Self {
            total_items,
            page_size: PAGE_SIZE,
            current_page,
        }
    }

    /// Total number of pages (zero for an empty listing).
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Whether `current_page` addresses an existing page.
    #[must_use]
    pub const fn is_valid_page(&self) -> bool {
        self.current_page >= 1 && self.current_page <= self.total_pages()
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// The window of page numbers the pager displays: up to five numbers
    /// centered on the current page, clamped to the ends.
    #[must_use]
    pub fn page_numbers(&self) -> Vec<usize> {
        let total = self.total_pages();
        if total == 0 {
            return Vec::new();
        }

        let mut start = self
            .current_page
            .saturating_sub(PAGER_WINDOW / 2)
            .clamp(1, total);
        let end = (start + PAGER_WINDOW - 1).min(total);
        if end + 1 - start < PAGER_WINDOW {
            start = end.saturating_sub(PAGER_WINDOW - 1).max(1);
        }

        (start..=end).collect()
    }
}

/// Unique categories of a catalog snapshot, in first-seen order.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for product in products {
        if seen.insert(product.category.clone()) {
            out.push(product.category.clone());
        }
    }
    out
}

/// Global `(floor(min), ceil(max))` price bounds over all product price
/// ranges; `None` for an empty catalog. This seeds the filter sidebar's
/// price slider.
#[must_use]
pub fn price_bounds(products: &[Product]) -> Option<(Decimal, Decimal)> {
    let mut bounds: Option<(Decimal, Decimal)> = None;
    for product in products {
        let range = product.price_range();
        bounds = Some(match bounds {
            Some((low, high)) => (low.min(range.min), high.max(range.max)),
            None => (range.min, range.max),
        });
    }
    bounds.map(|(low, high)| (low.floor(), high.ceil()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::super::types::test_fixtures::{simple_product, varied_product};
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    #[test]
    fn test_category_filter_matches_only_selected() {
        let mut catalog = vec![
            simple_product(1, dec(10)),
            simple_product(2, dec(20)),
            simple_product(3, dec(30)),
        ];
        catalog.get_mut(1).unwrap().category = "Home".to_string();

        let filter = ProductFilter {
            category: CategoryFilter::Named("electronics".to_string()),
            ..ProductFilter::default()
        };
        let result = apply(&catalog, &filter, SortKey::Popularity);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| p.category == "Electronics"));
    }

    #[test]
    fn test_filter_alone_preserves_order() {
        let catalog = vec![
            simple_product(3, dec(30)),
            simple_product(1, dec(10)),
            simple_product(2, dec(20)),
        ];
        let filtered: Vec<_> = catalog
            .iter()
            .filter(|p| ProductFilter::default().matches(p))
            .map(|p| p.id.as_i64())
            .collect();
        assert_eq!(filtered, vec![3, 1, 2]);
    }

    #[test]
    fn test_price_window_overlaps_variation_range() {
        let catalog = vec![
            varied_product(1, &[dec(100), dec(300)]),
            simple_product(2, dec(50)),
        ];
        let filter = ProductFilter {
            price_window: Some((dec(200), dec(400))),
            ..ProductFilter::default()
        };
        let result = apply(&catalog, &filter, SortKey::Popularity);
        // The variation product overlaps [200,400]; the 50 product does not.
        assert_eq!(result.len(), 1);
        assert_eq!(result.first().unwrap().id.as_i64(), 1);
    }

    #[test]
    fn test_min_rating_uses_floor() {
        let mut catalog = vec![simple_product(1, dec(10)), simple_product(2, dec(20))];
        catalog.first_mut().unwrap().rating = 3.9;
        catalog.get_mut(1).unwrap().rating = 4.1;

        let filter = ProductFilter {
            min_rating: 4,
            ..ProductFilter::default()
        };
        let result = apply(&catalog, &filter, SortKey::Popularity);
        assert_eq!(result.len(), 1);
        assert_eq!(result.first().unwrap().id.as_i64(), 2);
    }

    #[test]
    fn test_sort_price_low_to_high_uses_min() {
        let catalog = vec![
            simple_product(1, dec(30)),
            simple_product(2, dec(10)),
            simple_product(3, dec(20)),
        ];
        let result = apply(&catalog, &ProductFilter::default(), SortKey::PriceLowToHigh);
        let mins: Vec<_> = result.iter().map(|p| p.price_range().min).collect();
        assert_eq!(mins, vec![dec(10), dec(20), dec(30)]);
    }

    #[test]
    fn test_sort_price_high_to_low_uses_max() {
        let catalog = vec![
            varied_product(1, &[dec(10), dec(500)]),
            simple_product(2, dec(100)),
        ];
        let result = apply(&catalog, &ProductFilter::default(), SortKey::PriceHighToLow);
        assert_eq!(result.first().unwrap().id.as_i64(), 1);
    }

    #[test]
    fn test_sort_newest_descends_created_at() {
        let mut catalog = vec![simple_product(1, dec(10)), simple_product(2, dec(10))];
        catalog.first_mut().unwrap().created_at =
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        catalog.get_mut(1).unwrap().created_at =
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

        let result = apply(&catalog, &ProductFilter::default(), SortKey::Newest);
        assert_eq!(result.first().unwrap().id.as_i64(), 2);
    }

    #[test]
    fn test_sort_popularity_descends_rating() {
        let mut catalog = vec![simple_product(1, dec(10)), simple_product(2, dec(10))];
        catalog.first_mut().unwrap().rating = 2.0;
        catalog.get_mut(1).unwrap().rating = 4.8;

        let result = apply(&catalog, &ProductFilter::default(), SortKey::Popularity);
        assert_eq!(result.first().unwrap().id.as_i64(), 2);
    }

    #[test]
    fn test_pagination_fixed_page_size() {
        let items: Vec<usize> = (0..25).collect();
        assert_eq!(paginate(&items, 1), (0..12).collect::<Vec<_>>().as_slice());
        assert_eq!(paginate(&items, 3), &[24]);
        assert!(paginate(&items, 4).is_empty());
        assert!(paginate(&items, 0).is_empty());
    }

    #[test]
    fn test_featured_takes_leading_products() {
        let catalog: Vec<_> = (0..20).map(|i| simple_product(i, dec(10))).collect();
        assert_eq!(featured(&catalog).len(), FEATURED_COUNT);
        let short: Vec<_> = (0..3).map(|i| simple_product(i, dec(10))).collect();
        assert_eq!(featured(&short).len(), 3);
    }

    #[test]
    fn test_paginator_totals() {
        let pager = Paginator::new(25, 1);
        assert_eq!(pager.total_pages(), 3);
        assert!(pager.has_next());
        assert!(!pager.has_previous());
        assert!(Paginator::new(0, 1).page_numbers().is_empty());
    }

    #[test]
    fn test_paginator_window_clamps_to_ends() {
        // 120 items -> 10 pages.
        assert_eq!(Paginator::new(120, 1).page_numbers(), vec![1, 2, 3, 4, 5]);
        assert_eq!(Paginator::new(120, 5).page_numbers(), vec![3, 4, 5, 6, 7]);
        assert_eq!(Paginator::new(120, 9).page_numbers(), vec![6, 7, 8, 9, 10]);
        // Fewer pages than the window shows them all.
        assert_eq!(Paginator::new(25, 2).page_numbers(), vec![1, 2, 3]);
        // An out-of-range current page still yields a valid window.
        assert_eq!(Paginator::new(25, 50).page_numbers(), vec![1, 2, 3]);
        assert!(!Paginator::new(25, 50).is_valid_page());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let mut catalog = vec![
            simple_product(1, dec(10)),
            simple_product(2, dec(10)),
            simple_product(3, dec(10)),
        ];
        catalog.get_mut(1).unwrap().category = "Home".to_string();
        assert_eq!(categories(&catalog), vec!["Electronics", "Home"]);
    }

    #[test]
    fn test_price_bounds_floor_and_ceil() {
        let catalog = vec![
            simple_product(1, Decimal::new(1050, 2)), // 10.50
            varied_product(2, &[Decimal::new(9975, 2), Decimal::new(19999, 2)]),
        ];
        let (low, high) = price_bounds(&catalog).unwrap();
        assert_eq!(low, dec(10));
        assert_eq!(high, dec(200));
        assert_eq!(price_bounds(&[]), None);
    }
}
