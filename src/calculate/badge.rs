//! Rank badge decoding and asset lookups.

use crate::models::{BadgeInfo, HeroAsset, RankAsset};

/// Decode a badge (`tier * 10 + subtier`) against the rank assets.
///
/// Missing, zero or negative badges and tiers without an asset yield `None`,
/// which callers render as unranked.
pub fn decode_badge(badge: Option<i64>, ranks: &[RankAsset]) -> Option<BadgeInfo<'_>> {
    let badge = badge.filter(|b| *b > 0)?;

    let tier = u32::try_from(badge / 10).ok()?;
    let subtier = (badge % 10) as u8;

    let rank = ranks.iter().find(|r| r.tier == tier)?;

    Some(BadgeInfo {
        tier,
        subtier,
        rank,
    })
}

pub fn find_hero(heroes: &[HeroAsset], hero_id: u32) -> Option<&HeroAsset> {
    heroes.iter().find(|h| h.id == hero_id)
}
