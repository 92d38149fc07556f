//! Camp reference data shown by the camp-selection step.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::draft::RoomType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Premier,
    Classic,
    Adventure,
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PriceTier::Premier => "Premier",
            PriceTier::Classic => "Classic",
            PriceTier::Adventure => "Adventure",
        };
        f.write_str(label)
    }
}

/// A bookable camp as presented to the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camp {
    pub id: String,
    pub name: String,
    pub region: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub room_types: Vec<RoomType>,
    pub price_tier: PriceTier,
}

impl Camp {
    pub fn offers(&self, room_type: RoomType) -> bool {
        self.room_types.contains(&room_type)
    }

    /// One-line label used by selection lists.
    pub fn display_label(&self) -> String {
        format!("{} ({}, {})", self.name, self.region, self.price_tier)
    }
}
