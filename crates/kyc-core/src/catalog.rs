//! Camp catalog consumed by the camp-selection step.
//!
//! The wizard only needs lookup by id and the ordered list, so the catalog is
//! a trait: the built-in list and a catalog loaded from JSON both satisfy it.

use kyc_domain::{Camp, PriceTier, RoomType};

use crate::CoreError;

pub trait CampCatalog: Send + Sync {
    fn camps(&self) -> &[Camp];

    fn find(&self, camp_id: &str) -> Option<&Camp> {
        self.camps().iter().find(|camp| camp.id == camp_id)
    }

    fn contains(&self, camp_id: &str) -> bool {
        self.find(camp_id).is_some()
    }
}

/// In-memory catalog. `Default` carries the curated application-flow list.
#[derive(Debug, Clone)]
pub struct StaticCampCatalog {
    camps: Vec<Camp>,
}

impl StaticCampCatalog {
    pub fn new(camps: Vec<Camp>) -> Self {
        Self { camps }
    }

    /// Parses a JSON array of camps.
    pub fn from_json(data: &str) -> Result<Self, CoreError> {
        let camps: Vec<Camp> = serde_json::from_str(data)?;
        Ok(Self::new(camps))
    }
}

impl Default for StaticCampCatalog {
    fn default() -> Self {
        Self::new(builtin_camps())
    }
}

impl CampCatalog for StaticCampCatalog {
    fn camps(&self) -> &[Camp] {
        &self.camps
    }
}

fn camp(
    id: &str,
    name: &str,
    region: &str,
    description: &str,
    features: &[&str],
    room_types: &[RoomType],
    price_tier: PriceTier,
) -> Camp {
    Camp {
        id: id.into(),
        name: name.into(),
        region: region.into(),
        description: description.into(),
        image: format!("/images/camps/{id}.jpg"),
        features: features.iter().map(|f| f.to_string()).collect(),
        room_types: room_types.to_vec(),
        price_tier,
    }
}

fn builtin_camps() -> Vec<Camp> {
    vec![
        camp(
            "doro-nawas",
            "Doro Nawas",
            "Damaraland",
            "Perched on a rocky outcrop overlooking the Aba-Huab valley, a base for desert-adapted elephant tracking and ancient rock engravings.",
            &["desert-elephants", "rock-art", "star-bed"],
            &[RoomType::Standard, RoomType::Family],
            PriceTier::Classic,
        ),
        camp(
            "desert-rhino",
            "Desert Rhino Camp",
            "Palmwag Concession",
            "Tented camp in the heart of the largest free-roaming black rhino population in Africa.",
            &["rhino-tracking", "conservation", "remote"],
            &[RoomType::Standard],
            PriceTier::Adventure,
        ),
        camp(
            "hoanib-skeleton-coast",
            "Hoanib Skeleton Coast",
            "Kaokoveld",
            "Lightweight camp between the Hoanib riverbed and the coast, with fly-in excursions to seal colonies and shipwrecks.",
            &["scenic-flights", "coastline", "desert-lions"],
            &[RoomType::Standard, RoomType::Suite, RoomType::Family],
            PriceTier::Premier,
        ),
        camp(
            "little-kulala",
            "Little Kulala",
            "Sossusvlei",
            "Thatched villas with rooftop star beds, private access to the Sossusvlei dunes at first light.",
            &["dunes", "star-bed", "hot-air-ballooning"],
            &[RoomType::Standard, RoomType::Suite],
            PriceTier::Premier,
        ),
        camp(
            "ongava-lodge",
            "Ongava Lodge",
            "Etosha South",
            "Private reserve bordering Etosha National Park, known for floodlit waterholes and white rhino sightings.",
            &["game-drives", "waterhole", "white-rhino"],
            &[RoomType::Standard, RoomType::Suite, RoomType::Family],
            PriceTier::Classic,
        ),
        camp(
            "serra-cafema",
            "Serra Cafema",
            "Kunene River",
            "Remote riverside camp on the Angolan border, reached by light aircraft, with boating and Himba cultural visits.",
            &["boating", "cultural-visits", "quad-biking"],
            &[RoomType::Standard, RoomType::Family],
            PriceTier::Premier,
        ),
    ]
}
