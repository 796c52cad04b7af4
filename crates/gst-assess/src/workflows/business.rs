use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary classification a business registers under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Msme,
    Exporter,
    Startup,
    Manufacturer,
    Trader,
    Restaurant,
}

impl BusinessType {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Msme,
            Self::Exporter,
            Self::Startup,
            Self::Manufacturer,
            Self::Trader,
            Self::Restaurant,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Msme => "msme",
            Self::Exporter => "exporter",
            Self::Startup => "startup",
            Self::Manufacturer => "manufacturer",
            Self::Trader => "trader",
            Self::Restaurant => "restaurant",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Msme => "MSME",
            Self::Exporter => "Exporter",
            Self::Startup => "Startup",
            Self::Manufacturer => "Manufacturer",
            Self::Trader => "Trader",
            Self::Restaurant => "Restaurant",
        }
    }
}

impl FromStr for BusinessType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.key() == needle)
            .ok_or_else(|| UnknownVariant {
                field: "business type",
                value: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessCategory {
    Goods,
    Services,
    Both,
}

impl FromStr for BusinessCategory {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "goods" => Ok(Self::Goods),
            "services" => Ok(Self::Services),
            "both" => Ok(Self::Both),
            _ => Err(UnknownVariant {
                field: "business category",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.field, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Identification and classification of the business being assessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub gstin: String,
    pub business_name: String,
    pub business_type: BusinessType,
    pub business_category: BusinessCategory,
    /// Kept as supplied so an unreadable value degrades scoring instead of
    /// rejecting the profile.
    pub incorporation_date: String,
    pub state: String,
}

impl BusinessProfile {
    pub fn incorporation(&self) -> IncorporationDate {
        IncorporationDate::parse(&self.incorporation_date)
    }
}

/// Outcome of reading the incorporation date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncorporationDate {
    Parsed(NaiveDate),
    Unreadable(String),
}

impl IncorporationDate {
    /// Accepts `YYYY-MM-DD`, or a timestamp starting with one. Day-first and
    /// month-first forms are ambiguous and read as unreadable.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        trimmed
            .get(..10)
            .filter(|_| {
                trimmed.len() == 10 || trimmed[10..].starts_with(|c: char| c == 'T' || c == ' ')
            })
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            .map(Self::Parsed)
            .unwrap_or_else(|| Self::Unreadable(raw.to_string()))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Parsed(date) => Some(*date),
            Self::Unreadable(_) => None,
        }
    }

    /// Fractional years elapsed at `today`, using a 365.25-day year.
    pub fn years_before(&self, today: NaiveDate) -> Option<f64> {
        self.date()
            .map(|date| (today - date).num_days() as f64 / 365.25)
    }
}
