//! Static reference data from the assets service (ranks, heroes).

use serde::{Deserialize, Serialize};

/// Image URLs for a rank tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankImages {
    #[serde(default)]
    pub large: Option<String>,

    #[serde(default)]
    pub small: Option<String>,

    #[serde(default, rename = "small_subrank1_webp")]
    pub small_subrank1: Option<String>,

    #[serde(default, rename = "small_subrank2_webp")]
    pub small_subrank2: Option<String>,

    #[serde(default, rename = "small_subrank3_webp")]
    pub small_subrank3: Option<String>,

    #[serde(default, rename = "small_subrank4_webp")]
    pub small_subrank4: Option<String>,

    #[serde(default, rename = "small_subrank5_webp")]
    pub small_subrank5: Option<String>,

    #[serde(default, rename = "small_subrank6_webp")]
    pub small_subrank6: Option<String>,
}

impl RankImages {
    /// Image for a subtier. Subtier 0 (and anything without a dedicated
    /// image) falls back to the plain small image.
    pub fn subrank_image(&self, subtier: u8) -> Option<&str> {
        let image = match subtier {
            1 => self.small_subrank1.as_deref(),
            2 => self.small_subrank2.as_deref(),
            3 => self.small_subrank3.as_deref(),
            4 => self.small_subrank4.as_deref(),
            5 => self.small_subrank5.as_deref(),
            6 => self.small_subrank6.as_deref(),
            _ => None,
        };
        image.or(self.small.as_deref())
    }
}

/// One rank tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankAsset {
    pub tier: u32,
    pub name: String,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub images: RankImages,
}

/// Decoded rank badge.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeInfo<'a> {
    /// badge / 10
    pub tier: u32,

    /// badge % 10
    pub subtier: u8,

    pub rank: &'a RankAsset,
}

impl BadgeInfo<'_> {
    /// "Name 3", or just "Name" for subtier 0.
    pub fn display_name(&self) -> String {
        if self.subtier == 0 {
            self.rank.name.clone()
        } else {
            format!("{} {}", self.rank.name, self.subtier)
        }
    }

    pub fn image(&self) -> Option<&str> {
        self.rank.images.subrank_image(self.subtier)
    }
}

/// Hero reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroAsset {
    pub id: u32,
    pub name: String,

    #[serde(default)]
    pub images: Option<HeroImages>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroImages {
    #[serde(default)]
    pub icon_image_small: Option<String>,
}
