//! Property records and foreign-ownership eligibility derivation.
//!
//! A [`PropertyListing`] carries the raw attributes an upstream parser
//! scraped from a listing page. [`PropertyRecord::derive`] applies the
//! eligibility decision table exactly once at construction, producing an
//! immutable record - there is no partially-derived state for a concurrent
//! reader to observe.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============= Listing Attributes =============

/// Kind of listed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// Detached villa, typically sold with its land plot.
    Villa,
    /// Condominium unit.
    Condo,
    /// Town/row house.
    House,
    /// Bare land.
    Land,
    /// Listing type could not be determined.
    #[default]
    Unknown,
}

impl FromStr for PropertyKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "villa" => Self::Villa,
            "condo" | "apartment" => Self::Condo,
            "house" => Self::House,
            "land" => Self::Land,
            _ => Self::Unknown,
        })
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Villa => "villa",
            Self::Condo => "condo",
            Self::House => "house",
            Self::Land => "land",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Registered ownership title of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipTitle {
    /// Hard title (ministry-registered, strongest form).
    HardTitle,
    /// Soft title (commune-level recognition).
    SoftTitle,
    /// Strata title (unit-level title in a co-owned building).
    StrataTitle,
}

/// Ownership structure a foreign buyer can use for a given listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipStructure {
    /// Long-term renewable lease over land the buyer cannot own outright.
    Leasehold,
    /// Landholding company with majority Cambodian shareholding.
    CompanyStructure,
    /// Direct strata-title ownership of a qualifying unit.
    StrataTitle,
}

impl fmt::Display for OwnershipStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Leasehold => "leasehold",
            Self::CompanyStructure => "company_structure",
            Self::StrataTitle => "strata_title",
        };
        write!(f, "{}", name)
    }
}

/// Raw listing attributes as produced by the upstream property parser.
///
/// The retrieval engine never cares how these were obtained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyListing {
    /// Listing identifier.
    pub id: String,
    /// Source listing URL, when known.
    pub url: Option<String>,
    /// Kind of property.
    pub kind: PropertyKind,
    /// Asking price in USD.
    pub price_usd: Option<f64>,
    /// Number of bedrooms.
    pub bedrooms: Option<u32>,
    /// Number of bathrooms.
    pub bathrooms: Option<u32>,
    /// Floor area in square meters.
    pub size_sqm: Option<f64>,
    /// Land plot size in square meters.
    pub land_size_sqm: Option<f64>,
    /// Registered ownership title, when stated.
    pub ownership_title: Option<OwnershipTitle>,
    /// Floor level (condos).
    pub floor_level: Option<u32>,
    /// Human-readable location.
    pub location: Option<String>,
}

// ============= Derived Record =============

/// A property listing with foreign-ownership eligibility derived.
///
/// Immutable for the remainder of a request once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// The raw listing attributes.
    pub listing: PropertyListing,
    /// Whether the purchase includes land (which foreigners cannot own
    /// directly under Cambodian law).
    pub has_land: bool,
    /// Whether a foreigner can hold this property directly in their name.
    pub is_foreign_eligible_direct: bool,
    /// Ownership structures worth recommending for this listing.
    pub recommended_structures: Vec<OwnershipStructure>,
}

impl PropertyRecord {
    /// Derive eligibility fields from raw listing attributes.
    ///
    /// Decision table:
    /// - condo on floor 2 or above: directly eligible, strata title;
    /// - villa, or condo on the ground floor: land is involved, so
    ///   leasehold or a company structure;
    /// - bare land: leasehold or a company structure;
    /// - anything else: not directly eligible, no recommendation.
    pub fn derive(listing: PropertyListing) -> Self {
        let mut has_land = false;
        let mut is_foreign_eligible_direct = false;
        let mut recommended_structures = Vec::new();

        match listing.kind {
            PropertyKind::Condo if matches!(listing.floor_level, Some(f) if f >= 2) => {
                is_foreign_eligible_direct = true;
                recommended_structures = vec![OwnershipStructure::StrataTitle];
            }
            PropertyKind::Villa => {
                has_land = true;
                recommended_structures = vec![
                    OwnershipStructure::Leasehold,
                    OwnershipStructure::CompanyStructure,
                ];
            }
            PropertyKind::Condo if listing.floor_level == Some(1) => {
                has_land = true;
                recommended_structures = vec![
                    OwnershipStructure::Leasehold,
                    OwnershipStructure::CompanyStructure,
                ];
            }
            PropertyKind::Land => {
                has_land = true;
                recommended_structures = vec![
                    OwnershipStructure::Leasehold,
                    OwnershipStructure::CompanyStructure,
                ];
            }
            _ => {}
        }

        Self {
            listing,
            has_land,
            is_foreign_eligible_direct,
            recommended_structures,
        }
    }

    /// Kind of the underlying listing.
    pub fn kind(&self) -> PropertyKind {
        self.listing.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(kind: PropertyKind, floor_level: Option<u32>) -> PropertyListing {
        PropertyListing {
            id: "258405".to_string(),
            kind,
            floor_level,
            ..Default::default()
        }
    }

    #[test]
    fn test_condo_upper_floor_is_directly_eligible() {
        let record = PropertyRecord::derive(listing(PropertyKind::Condo, Some(5)));

        assert!(record.is_foreign_eligible_direct);
        assert!(!record.has_land);
        assert_eq!(
            record.recommended_structures,
            vec![OwnershipStructure::StrataTitle]
        );
    }

    #[test]
    fn test_villa_implies_land() {
        let record = PropertyRecord::derive(listing(PropertyKind::Villa, None));

        assert!(!record.is_foreign_eligible_direct);
        assert!(record.has_land);
        assert_eq!(
            record.recommended_structures,
            vec![
                OwnershipStructure::Leasehold,
                OwnershipStructure::CompanyStructure
            ]
        );
    }

    #[test]
    fn test_ground_floor_condo_counts_as_land() {
        let record = PropertyRecord::derive(listing(PropertyKind::Condo, Some(1)));

        assert!(!record.is_foreign_eligible_direct);
        assert!(record.has_land);
    }

    #[test]
    fn test_condo_without_floor_level_gets_no_recommendation() {
        let record = PropertyRecord::derive(listing(PropertyKind::Condo, None));

        assert!(!record.is_foreign_eligible_direct);
        assert!(!record.has_land);
        assert!(record.recommended_structures.is_empty());
    }

    #[test]
    fn test_land_listing() {
        let record = PropertyRecord::derive(listing(PropertyKind::Land, None));

        assert!(record.has_land);
        assert!(!record.is_foreign_eligible_direct);
    }

    #[test]
    fn test_house_gets_defaults() {
        let record = PropertyRecord::derive(listing(PropertyKind::House, None));

        assert!(!record.has_land);
        assert!(!record.is_foreign_eligible_direct);
        assert!(record.recommended_structures.is_empty());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("villa".parse::<PropertyKind>().unwrap(), PropertyKind::Villa);
        assert_eq!(
            "apartment".parse::<PropertyKind>().unwrap(),
            PropertyKind::Condo
        );
        assert_eq!(
            "penthouse".parse::<PropertyKind>().unwrap(),
            PropertyKind::Unknown
        );
    }
}
