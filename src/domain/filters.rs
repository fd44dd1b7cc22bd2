// src/domain/filters.rs

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Style selection that lets every listing through.
pub const STYLE_ALL: &str = "all";

/// The active filter selection.
///
/// `buildings` and `floors` are allow-lists: an empty set means no
/// restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub buildings: BTreeSet<String>,
    pub floors: BTreeSet<String>,
    pub style: String,
    pub updated_only: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            buildings: BTreeSet::new(),
            floors: BTreeSet::new(),
            style: STYLE_ALL.to_string(),
            updated_only: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Price,
    Floor,
    Updated,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Floor => "floor",
            SortKey::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort key and direction, encoded together as one token such as `price-desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn token(&self) -> String {
        self.to_string()
    }

    /// Every selectable sort, in the order the sort selector lists them.
    pub fn choices() -> [(SortState, &'static str); 8] {
        use SortDirection::*;
        use SortKey::*;
        [
            (SortState::new(Name, Asc), "Name (A-Z)"),
            (SortState::new(Name, Desc), "Name (Z-A)"),
            (SortState::new(Price, Asc), "Price (Low to High)"),
            (SortState::new(Price, Desc), "Price (High to Low)"),
            (SortState::new(Floor, Asc), "Floor (Low to High)"),
            (SortState::new(Floor, Desc), "Floor (High to Low)"),
            (SortState::new(Updated, Desc), "Recently Updated"),
            (SortState::new(Updated, Asc), "Least Recently Updated"),
        ]
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.key.as_str(), self.direction.as_str())
    }
}

impl FromStr for SortState {
    type Err = String;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (key, direction) = token
            .split_once('-')
            .ok_or_else(|| format!("sort token {token:?} has no direction"))?;

        let key = match key {
            "name" => SortKey::Name,
            "price" => SortKey::Price,
            "floor" => SortKey::Floor,
            "updated" => SortKey::Updated,
            other => return Err(format!("unknown sort key {other:?}")),
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => return Err(format!("unknown sort direction {other:?}")),
        };

        Ok(SortState { key, direction })
    }
}

/// Everything the user selected; exactly what gets persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub filters: FilterState,
    pub sort: SortState,
}
