// src/domain/logic.rs

use crate::domain::{FilterState, SortDirection, SortKey, SortState, STYLE_ALL};
use crate::domain::{Listing, NOT_AVAILABLE};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Rank used for floor ordering. Unknown labels sort after the known ones.
pub fn floor_rank(floor: Option<&str>) -> u8 {
    match floor {
        Some("First Floor") => 1,
        Some("Second Floor") => 2,
        Some("Third Floor") => 3,
        _ => 99,
    }
}

/// Output of one filter/sort pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredListings {
    /// Filtered and sorted.
    pub active: Vec<Listing>,
    /// Filtered only; keeps the order the API delivered.
    pub deleted: Vec<Listing>,
}

/// Filters both sets and sorts the active one.
///
/// The deleted set is never subject to the "updated only" flag.
pub fn apply(
    active: &[Listing],
    deleted: &[Listing],
    filters: &FilterState,
    sort: SortState,
) -> FilteredListings {
    let mut active: Vec<Listing> = active
        .iter()
        .filter(|l| matches_filters(l, filters, true))
        .cloned()
        .collect();

    // sort_by is stable, so ties keep their filter order.
    active.sort_by(|a, b| compare(a, b, sort));

    let deleted = deleted
        .iter()
        .filter(|l| matches_filters(l, filters, false))
        .cloned()
        .collect();

    FilteredListings { active, deleted }
}

pub fn matches_filters(listing: &Listing, filters: &FilterState, check_updated: bool) -> bool {
    let building_match = filters.buildings.is_empty()
        || listing
            .building_number()
            .is_some_and(|b| filters.buildings.contains(b));

    let floor_match = filters.floors.is_empty()
        || listing
            .floor
            .as_deref()
            .is_some_and(|f| filters.floors.contains(f));

    let style_match = filters.style == STYLE_ALL || listing.style_category() == filters.style;

    let updated_match =
        !check_updated || !filters.updated_only || listing.is_recently_updated();

    building_match && floor_match && style_match && updated_match
}

/// Full comparator for the active list, direction included.
pub fn compare(a: &Listing, b: &Listing, sort: SortState) -> Ordering {
    let ascending = match sort.key {
        SortKey::Price => compare_optional(a.price, b.price),
        SortKey::Updated => compare_optional(a.updated_at, b.updated_at),
        SortKey::Floor => floor_rank(a.floor.as_deref()).cmp(&floor_rank(b.floor.as_deref())),
        SortKey::Name => natural_cmp(&a.name, &b.name),
    };

    match sort.direction {
        SortDirection::Asc => ascending,
        SortDirection::Desc => ascending.reverse(),
    }
}

/// Ascending order with missing values last.
fn compare_optional<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+|\D+").expect("static run pattern"))
}

/// Natural ("alphanumeric") comparison: `Unit 2` < `Unit 10`.
///
/// Names are split into digit and non-digit runs and compared run by run.
/// Two digit runs compare as integers, anything else compares lexically
/// (case-sensitive). A name that runs out of runs first sorts first.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut runs_a = run_pattern().find_iter(a).map(|m| m.as_str());
    let mut runs_b = run_pattern().find_iter(b).map(|m| m.as_str());

    loop {
        match (runs_a.next(), runs_b.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ra), Some(rb)) => {
                let ord = if is_digits(ra) && is_digits(rb) {
                    compare_digit_runs(ra, rb)
                } else {
                    ra.cmp(rb)
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn is_digits(run: &str) -> bool {
    run.bytes().all(|b| b.is_ascii_digit())
}

/// Integer comparison of two digit runs of any length.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Choices offered by the building, floor and style selectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Building numbers, numerically ascending.
    pub buildings: Vec<String>,
    /// Floor labels in floor-rank order.
    pub floors: Vec<String>,
    /// Style categories, lexically sorted, always including `N/A`.
    pub styles: Vec<String>,
}

/// Derives selector choices from the active set.
pub fn filter_options(active: &[Listing]) -> FilterOptions {
    let mut buildings: Vec<String> = Vec::new();
    let mut floors: Vec<String> = Vec::new();
    let mut styles: BTreeSet<String> = BTreeSet::new();

    for listing in active {
        if let Some(building) = listing.building_number() {
            if !buildings.iter().any(|b| b == building) {
                buildings.push(building.to_string());
            }
        }
        if let Some(floor) = listing.floor.as_deref() {
            if !floors.iter().any(|f| f == floor) {
                floors.push(floor.to_string());
            }
        }
        styles.insert(listing.style_category().to_string());
    }
    styles.insert(NOT_AVAILABLE.to_string());

    buildings.sort_by(|a, b| compare_digit_runs(a, b));
    floors.sort_by_key(|f| floor_rank(Some(f)));

    FilterOptions {
        buildings,
        floors,
        styles: styles.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Listing {
        Listing {
            name: name.to_string(),
            ..Listing::default()
        }
    }

    fn names(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.name.as_str()).collect()
    }

    fn sort(token: &str) -> SortState {
        token.parse().unwrap()
    }

    #[test]
    fn natural_name_sort_compares_numeric_runs_as_integers() {
        let listings = vec![named("Unit 2"), named("Unit 10"), named("Unit 1")];

        let out = apply(&listings, &[], &FilterState::default(), sort("name-asc"));
        assert_eq!(names(&out.active), vec!["Unit 1", "Unit 2", "Unit 10"]);

        let out = apply(&listings, &[], &FilterState::default(), sort("name-desc"));
        assert_eq!(names(&out.active), vec!["Unit 10", "Unit 2", "Unit 1"]);
    }

    #[test]
    fn natural_cmp_edge_cases() {
        assert_eq!(natural_cmp("#3-1", "#3-1"), Ordering::Equal);
        assert_eq!(natural_cmp("#3", "#3-1"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
        assert_eq!(natural_cmp("007", "7"), Ordering::Equal);
        assert_eq!(natural_cmp("B", "a"), Ordering::Less);
        assert_eq!(
            natural_cmp("#2-99999999999999999999999", "#2-100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn floor_sort_puts_unknown_labels_last() {
        let floors = ["Third Floor", "First Floor", "Second Floor", "Penthouse"];
        let listings: Vec<Listing> = floors
            .iter()
            .map(|f| Listing {
                name: f.to_string(),
                floor: Some(f.to_string()),
                ..Listing::default()
            })
            .collect();

        let out = apply(&listings, &[], &FilterState::default(), sort("floor-asc"));
        assert_eq!(
            names(&out.active),
            vec!["First Floor", "Second Floor", "Third Floor", "Penthouse"]
        );
    }

    #[test]
    fn unknown_floors_keep_their_relative_order() {
        let listings = vec![
            Listing {
                name: "b".into(),
                floor: Some("Basement".into()),
                ..Listing::default()
            },
            Listing {
                name: "a".into(),
                floor: Some("Penthouse".into()),
                ..Listing::default()
            },
        ];

        let out = apply(&listings, &[], &FilterState::default(), sort("floor-asc"));
        assert_eq!(names(&out.active), vec!["b", "a"]);
    }

    #[test]
    fn missing_prices_sort_last_ascending_and_first_descending() {
        let priced = |name: &str, price: Option<f64>| Listing {
            name: name.to_string(),
            price,
            ..Listing::default()
        };
        let listings = vec![
            priced("none", None),
            priced("high", Some(2000.0)),
            priced("low", Some(900.0)),
        ];

        let out = apply(&listings, &[], &FilterState::default(), sort("price-asc"));
        assert_eq!(names(&out.active), vec!["low", "high", "none"]);

        let out = apply(&listings, &[], &FilterState::default(), sort("price-desc"));
        assert_eq!(names(&out.active), vec!["none", "high", "low"]);
    }

    #[test]
    fn building_filter_requires_hash_pattern() {
        let listings = vec![named("#3-101"), named("#4-201"), named("3-no-hash")];
        let filters = FilterState {
            buildings: ["3".to_string()].into_iter().collect(),
            ..FilterState::default()
        };

        let out = apply(&listings, &[], &filters, SortState::default());
        assert_eq!(names(&out.active), vec!["#3-101"]);
    }

    #[test]
    fn updated_only_is_strict_and_skips_the_deleted_list() {
        let stamped = |name: &str, created, updated| Listing {
            name: name.to_string(),
            created_at: Some(created),
            updated_at: Some(updated),
            ..Listing::default()
        };
        let active = vec![stamped("same", 100, 100), stamped("later", 100, 101)];
        let deleted = vec![Listing {
            deleted_at: Some(500),
            ..stamped("gone", 100, 100)
        }];
        let filters = FilterState {
            updated_only: true,
            ..FilterState::default()
        };

        let out = apply(&active, &deleted, &filters, SortState::default());
        assert_eq!(names(&out.active), vec!["later"]);
        assert_eq!(names(&out.deleted), vec!["gone"]);
    }

    #[test]
    fn style_filter_maps_missing_style_to_na() {
        let listings = vec![
            Listing {
                name: "loft".into(),
                style: Some("Loft".into()),
                ..Listing::default()
            },
            named("plain"),
        ];
        let only = |style: &str| FilterState {
            style: style.to_string(),
            ..FilterState::default()
        };

        let out = apply(&listings, &[], &only("N/A"), SortState::default());
        assert_eq!(names(&out.active), vec!["plain"]);

        let out = apply(&listings, &[], &only("Loft"), SortState::default());
        assert_eq!(names(&out.active), vec!["loft"]);
    }

    #[test]
    fn floor_filter_excludes_listings_without_floor() {
        let listings = vec![
            Listing {
                name: "a".into(),
                floor: Some("First Floor".into()),
                ..Listing::default()
            },
            named("b"),
        ];
        let filters = FilterState {
            floors: ["First Floor".to_string()].into_iter().collect(),
            ..FilterState::default()
        };

        let out = apply(&listings, &[], &filters, SortState::default());
        assert_eq!(names(&out.active), vec!["a"]);
    }

    #[test]
    fn deleted_list_is_filtered_but_not_sorted() {
        let deleted = vec![named("#2-9"), named("#5-1"), named("#2-1")];
        let filters = FilterState {
            buildings: ["2".to_string()].into_iter().collect(),
            ..FilterState::default()
        };

        let out = apply(&[], &deleted, &filters, sort("name-asc"));
        assert_eq!(names(&out.deleted), vec!["#2-9", "#2-1"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let listings = vec![
            Listing {
                name: "#1-1".into(),
                floor: Some("First Floor".into()),
                style: Some("Studio".into()),
                created_at: Some(1),
                updated_at: Some(2),
                ..Listing::default()
            },
            named("#1-2"),
            named("#2-1"),
            Listing {
                name: "#1-3".into(),
                floor: Some("Second Floor".into()),
                ..Listing::default()
            },
        ];
        let states = [
            FilterState::default(),
            FilterState {
                buildings: ["1".to_string()].into_iter().collect(),
                ..FilterState::default()
            },
            FilterState {
                floors: ["First Floor".to_string()].into_iter().collect(),
                updated_only: true,
                ..FilterState::default()
            },
            FilterState {
                style: "N/A".into(),
                ..FilterState::default()
            },
        ];

        for filters in &states {
            let once = apply(&listings, &[], filters, SortState::default());
            let twice = apply(&once.active, &[], filters, SortState::default());
            assert_eq!(once.active, twice.active);
        }
    }

    #[test]
    fn options_are_ordered_for_the_selectors() {
        let listings = vec![
            Listing {
                name: "#10-1".into(),
                floor: Some("Penthouse".into()),
                style: Some("Loft".into()),
                ..Listing::default()
            },
            Listing {
                name: "#2-1".into(),
                floor: Some("Second Floor".into()),
                ..Listing::default()
            },
            Listing {
                name: "#9-1".into(),
                floor: Some("First Floor".into()),
                style: Some("Studio".into()),
                ..Listing::default()
            },
            named("lobby"),
        ];

        let options = filter_options(&listings);
        assert_eq!(options.buildings, vec!["2", "9", "10"]);
        assert_eq!(
            options.floors,
            vec!["First Floor", "Second Floor", "Penthouse"]
        );
        assert_eq!(options.styles, vec!["Loft", "N/A", "Studio"]);
    }
}
