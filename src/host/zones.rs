use crate::core::AxisBounds;
use crate::render::Color;

/// One contiguous rating band shaded behind the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingTier {
    pub name: &'static str,
    /// Inclusive lower rating.
    pub from: i32,
    /// Exclusive upper rating.
    pub to: i32,
    pub color: Color,
}

pub const RATING_TIERS: [RatingTier; 10] = [
    tier("newbie", -9999, 1200, 0xeb, 0xeb, 0xeb),
    tier("pupil", 1200, 1400, 0xc8, 0xff, 0xc8),
    tier("specialist", 1400, 1600, 0xc8, 0xe8, 0xff),
    tier("expert", 1600, 1900, 0xd2, 0xd2, 0xff),
    tier("candidate master", 1900, 2100, 0xff, 0xc8, 0xff),
    tier("master", 2100, 2300, 0xff, 0xe0, 0xc8),
    tier("international master", 2300, 2400, 0xff, 0xd0, 0xa0),
    tier("grandmaster", 2400, 2600, 0xff, 0xb0, 0xb0),
    tier("international grandmaster", 2600, 3000, 0xff, 0x90, 0x90),
    tier("legendary grandmaster", 3000, 10000, 0xff, 0x70, 0x70),
];

const fn tier(name: &'static str, from: i32, to: i32, red: u8, green: u8, blue: u8) -> RatingTier {
    RatingTier {
        name,
        from,
        to,
        color: Color::rgb8(red, green, blue),
    }
}

/// Tier whose band contains `rating`, if any.
#[must_use]
pub fn tier_for_rating(rating: i32) -> Option<&'static RatingTier> {
    RATING_TIERS
        .iter()
        .find(|tier| rating >= tier.from && rating < tier.to)
}

/// A tier band clipped to the visible rating domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBand {
    pub from: f64,
    pub to: f64,
    pub color: Color,
}

/// Clips every tier to `bounds`, dropping tiers entirely outside it.
#[must_use]
pub fn visible_zone_bands(bounds: AxisBounds) -> Vec<ZoneBand> {
    RATING_TIERS
        .iter()
        .filter_map(|tier| {
            let from = f64::from(tier.from).max(bounds.min);
            let to = f64::from(tier.to).min(bounds.max);
            (to > from).then_some(ZoneBand {
                from,
                to,
                color: tier.color,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{RATING_TIERS, tier_for_rating, visible_zone_bands};
    use crate::core::AxisBounds;

    #[test]
    fn tiers_are_contiguous_and_ascending() {
        for pair in RATING_TIERS.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
    }

    #[test]
    fn tier_lookup_uses_half_open_bands() {
        assert_eq!(tier_for_rating(1199).map(|t| t.name), Some("newbie"));
        assert_eq!(tier_for_rating(1200).map(|t| t.name), Some("pupil"));
        assert_eq!(tier_for_rating(3500).map(|t| t.name), Some("legendary grandmaster"));
        assert_eq!(tier_for_rating(10_000), None);
    }

    #[test]
    fn zone_bands_are_clipped_to_visible_domain() {
        let bands = visible_zone_bands(AxisBounds::new(1300.0, 1600.0));
        assert_eq!(bands.len(), 2);
        assert_eq!((bands[0].from, bands[0].to), (1300.0, 1400.0));
        assert_eq!((bands[1].from, bands[1].to), (1400.0, 1600.0));
    }
}
