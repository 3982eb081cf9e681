// Time-of-day overlay: the hour bucket table and the gradient stop pair each
// bucket maps to. All stops share a fixed 0x33 (0.2) alpha so the wash stays
// translucent over the particles.

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DayPhase {
    Sunrise,
    Day,
    Sunset,
    Night,
}

impl DayPhase {
    /// Bucket a wall-clock hour (0-23): 5-9 sunrise, 10-16 day, 17-19
    /// sunset, everything else night.
    pub fn from_hour(hour: u32) -> DayPhase {
        match hour % 24 {
            5..=9 => DayPhase::Sunrise,
            10..=16 => DayPhase::Day,
            17..=19 => DayPhase::Sunset,
            _ => DayPhase::Night,
        }
    }

    /// Start and end stops for the diagonal overlay gradient.
    pub fn stops(&self) -> (Color, Color) {
        match self {
            DayPhase::Sunrise => (Color::from_u32(0xffa60033), Color::from_u32(0xff450033)),
            DayPhase::Day => (Color::from_u32(0x87ceeb33), Color::from_u32(0x00bfff33)),
            DayPhase::Sunset => (Color::from_u32(0xff450033), Color::from_u32(0x8a2be233)),
            DayPhase::Night => (Color::from_u32(0x19197033), Color::from_u32(0x483d8b33)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_buckets_match_table() {
        assert_eq!(DayPhase::from_hour(8), DayPhase::Sunrise);
        assert_eq!(DayPhase::from_hour(14), DayPhase::Day);
        assert_eq!(DayPhase::from_hour(18), DayPhase::Sunset);
        assert_eq!(DayPhase::from_hour(23), DayPhase::Night);
    }

    #[test]
    fn bucket_boundaries_are_exact() {
        assert_eq!(DayPhase::from_hour(4), DayPhase::Night);
        assert_eq!(DayPhase::from_hour(5), DayPhase::Sunrise);
        assert_eq!(DayPhase::from_hour(9), DayPhase::Sunrise);
        assert_eq!(DayPhase::from_hour(10), DayPhase::Day);
        assert_eq!(DayPhase::from_hour(16), DayPhase::Day);
        assert_eq!(DayPhase::from_hour(17), DayPhase::Sunset);
        assert_eq!(DayPhase::from_hour(19), DayPhase::Sunset);
        assert_eq!(DayPhase::from_hour(20), DayPhase::Night);
        assert_eq!(DayPhase::from_hour(0), DayPhase::Night);
    }

    #[test]
    fn out_of_range_hours_wrap_into_the_table() {
        assert_eq!(DayPhase::from_hour(24), DayPhase::Night);
        assert_eq!(DayPhase::from_hour(38), DayPhase::Day);
    }

    #[test]
    fn stops_carry_translucent_alpha() {
        for phase in [
            DayPhase::Sunrise,
            DayPhase::Day,
            DayPhase::Sunset,
            DayPhase::Night,
        ]
        .iter()
        {
            let (from, to) = phase.stops();
            assert_eq!(from.a, 0x33);
            assert_eq!(to.a, 0x33);
        }
    }

    #[test]
    fn sunrise_stops_are_orange() {
        let (from, to) = DayPhase::Sunrise.stops();
        assert_eq!(from, Color::from_u32(0xffa60033));
        assert_eq!(to, Color::from_u32(0xff450033));
    }
}
