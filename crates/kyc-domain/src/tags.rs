//! Fixed tag vocabularies offered by the optional preference steps.

pub const ACTIVITIES: &[&str] = &[
    "game-drives",
    "walking-safaris",
    "rhino-tracking",
    "desert-excursions",
    "scenic-flights",
    "cultural-visits",
    "star-gazing",
    "boating",
];

pub const WILDLIFE_INTERESTS: &[&str] = &[
    "desert-elephants",
    "black-rhino",
    "lions",
    "cheetahs",
    "birdlife",
    "marine-life",
    "small-creatures",
];

pub const DIETARY_RESTRICTIONS: &[&str] = &[
    "vegetarian",
    "vegan",
    "gluten-free",
    "lactose-free",
    "halal",
    "kosher",
    "nut-allergy",
];

pub const MOBILITY_NEEDS: &[&str] = &[
    "wheelchair-access",
    "limited-walking",
    "step-free-room",
    "assistance-boarding-vehicles",
];

/// Turns a tag slug into a display label (`game-drives` → `Game drives`).
pub fn label(tag: &str) -> String {
    let spaced = tag.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
