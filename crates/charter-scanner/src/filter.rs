#![allow(clippy::must_use_candidate)]

use charter_core::Boat;
use serde::{Deserialize, Serialize};

/// Region token meaning "every region".
pub const ALL_REGIONS: &str = "전체";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoatFilter {
    #[default]
    All,
    Regions(Vec<String>),
    Specific(Vec<String>),
}

impl BoatFilter {
    /// Filter from a region selection; empty or containing "전체" selects all.
    pub fn from_regions(regions: Vec<String>) -> Self {
        if regions.is_empty() || regions.iter().any(|r| r == ALL_REGIONS) {
            BoatFilter::All
        } else {
            BoatFilter::Regions(regions)
        }
    }

    pub fn matches(&self, boat: &Boat) -> bool {
        match self {
            BoatFilter::All => true,
            BoatFilter::Regions(regions) => {
                regions.is_empty()
                    || regions
                        .iter()
                        .any(|r| r == ALL_REGIONS || r.trim() == boat.city.trim())
            }
            BoatFilter::Specific(names) => names.iter().any(|name| name == &boat.name),
        }
    }
}
