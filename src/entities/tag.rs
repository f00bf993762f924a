use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    #[default]
    Historical,
    Nature,
    Food,
    Shopping,
}

impl RouteType {
    pub const ALL: [RouteType; 4] = [
        RouteType::Historical,
        RouteType::Nature,
        RouteType::Food,
        RouteType::Shopping,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Historical => "historical",
            Self::Nature => "nature",
            Self::Food => "food",
            Self::Shopping => "shopping",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    Family,
    Accessible,
    Free,
    Parking,
    PublicTransport,
    PetFriendly,
    PhotoSpot,
    Wifi,
}

impl Tag {
    pub const ALL: [Tag; 8] = [
        Tag::Family,
        Tag::Accessible,
        Tag::Free,
        Tag::Parking,
        Tag::PublicTransport,
        Tag::PetFriendly,
        Tag::PhotoSpot,
        Tag::Wifi,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Accessible => "accessible",
            Self::Free => "free",
            Self::Parking => "parking",
            Self::PublicTransport => "public-transport",
            Self::PetFriendly => "pet-friendly",
            Self::PhotoSpot => "photo-spot",
            Self::Wifi => "wifi",
        }
    }

    pub fn from_name(name: &str) -> Option<Tag> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }
}

/// Reads a tag list, dropping names outside the vocabulary instead of failing.
pub fn deserialize_known_tags<'de, D>(deserializer: D) -> Result<BTreeSet<Tag>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;

    Ok(names
        .iter()
        .filter_map(|name| {
            let tag = Tag::from_name(name);
            if tag.is_none() {
                tracing::warn!("skipping unknown tag: {}", name);
            }
            tag
        })
        .collect())
}

#[test]
fn wire_names_test() {
    for tag in Tag::ALL {
        let encoded = serde_json::to_value(tag).unwrap();
        assert_eq!(encoded, serde_json::json!(tag.name()));
    }

    for route_type in RouteType::ALL {
        let encoded = serde_json::to_value(route_type).unwrap();
        assert_eq!(encoded, serde_json::json!(route_type.name()));
    }
}

#[test]
fn unknown_tag_rejected_test() {
    let result: Result<Tag, _> = serde_json::from_str("\"rooftop\"");
    assert!(result.is_err());
}

#[test]
fn from_name_test() {
    assert_eq!(Tag::from_name("public-transport"), Some(Tag::PublicTransport));
    assert_eq!(Tag::from_name("rooftop"), None);
}
