//! Dice expressions like `2d6+1`.

use std::{fmt, str::FromStr};

use rand::Rng;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use util::RngExt;

use crate::Error;

/// Random integer generator of the form `<multiplier>d<sides>+<additional>`.
///
/// The single die is rolled once and the result is multiplied, so `3d6`
/// gives one of 3, 6, 9, ..., 18. Negative multipliers and additionals are
/// allowed and used for penalties.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Hash,
    Debug,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct Dice {
    pub multiplier: i32,
    pub sides: i32,
    pub additional: i32,
}

impl Dice {
    pub const fn new(multiplier: i32, sides: i32, additional: i32) -> Self {
        Dice {
            multiplier,
            sides,
            additional,
        }
    }

    /// Dice that don't need a random draw and always give `additional`.
    pub fn is_constant(&self) -> bool {
        self.multiplier == 0 || self.sides < 1
    }

    pub fn roll(&self, rng: &mut (impl Rng + ?Sized)) -> i32 {
        if self.is_constant() {
            return self.additional;
        }
        self.multiplier
            .saturating_mul(rng.d(self.sides))
            .saturating_add(self.additional)
    }

    /// Smallest possible roll.
    pub fn min(&self) -> i32 {
        if self.is_constant() {
            return self.additional;
        }
        let top = self.multiplier.saturating_mul(self.sides);
        self.multiplier.min(top).saturating_add(self.additional)
    }

    /// Largest possible roll.
    pub fn max(&self) -> i32 {
        if self.is_constant() {
            return self.additional;
        }
        let top = self.multiplier.saturating_mul(self.sides);
        self.multiplier.max(top).saturating_add(self.additional)
    }

    /// Whether every outcome fits in an `i32` without saturating.
    fn in_range(&self) -> bool {
        if self.is_constant() {
            return true;
        }
        let Some(top) = self.multiplier.checked_mul(self.sides) else {
            return false;
        };
        [self.multiplier, top]
            .iter()
            .all(|x| x.checked_add(self.additional).is_some())
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.multiplier, self.sides)?;
        if self.additional != 0 {
            write!(f, "+{}", self.additional)?;
        }
        Ok(())
    }
}

impl FromStr for Dice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Strict integer literal, `-?\d+` or `\d+`.
        fn int(s: &str, signed: bool) -> Option<i32> {
            let digits = match s.strip_prefix('-') {
                Some(rest) if signed => rest,
                _ => s,
            };
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit())
            {
                return None;
            }
            s.parse().ok()
        }

        let bad = || Error::MalformedDiceSpec(s.to_string());

        let mut parts = s.trim().split('d');
        let (Some(head), Some(tail), None) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(bad());
        };

        let multiplier = int(head, true).ok_or_else(bad)?;

        let (sides, additional) = match tail.split_once('+') {
            Some((sides, add)) => (
                int(sides.trim_end(), false).ok_or_else(bad)?,
                int(add.trim_start(), true).ok_or_else(bad)?,
            ),
            None => (int(tail, false).ok_or_else(bad)?, 0),
        };

        let ret = Dice::new(multiplier, sides, additional);
        if !ret.in_range() {
            return Err(bad());
        }
        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;
    use util::srng;

    use super::*;

    impl Arbitrary for Dice {
        fn arbitrary(g: &mut Gen) -> Self {
            Dice::new(
                i8::arbitrary(g) as i32,
                u8::arbitrary(g) as i32,
                i8::arbitrary(g) as i32,
            )
        }
    }

    #[test]
    fn parse() {
        assert_eq!("2d1+5".parse::<Dice>().unwrap(), Dice::new(2, 1, 5));
        assert_eq!("1d6".parse::<Dice>().unwrap(), Dice::new(1, 6, 0));
        assert_eq!("-1d4".parse::<Dice>().unwrap(), Dice::new(-1, 4, 0));
        assert_eq!("0d0".parse::<Dice>().unwrap(), Dice::new(0, 0, 0));
        assert_eq!(" 3d8 + -2 ".parse::<Dice>().unwrap(), Dice::new(3, 8, -2));

        for bad in [
            "sdfsfsf", "", "d6", "1d", "1d6+", "1d-6", "1d6d6", "1 d6", "1d6-2",
            "x1d6", "1d6+2+3",
        ] {
            assert!(
                matches!(bad.parse::<Dice>(), Err(Error::MalformedDiceSpec(_))),
                "{bad:?} parsed"
            );
        }
    }

    #[test]
    fn canonical_form() {
        assert_eq!("2d1+0".parse::<Dice>().unwrap().to_string(), "2d1");
        assert_eq!(" 1d6 +2".parse::<Dice>().unwrap().to_string(), "1d6+2");
        assert_eq!(Dice::new(1, 4, -2).to_string(), "1d4+-2");
    }

    #[test]
    fn single_sided_is_fixed() {
        let d: Dice = "2d1+5".parse().unwrap();
        let mut rng = srng("single sided");
        for _ in 0..100 {
            assert_eq!(d.roll(&mut rng), 7);
        }
    }

    #[test]
    fn degenerate_dice() {
        let mut rng = srng("degenerate");
        assert_eq!(Dice::new(0, 6, 3).roll(&mut rng), 3);
        assert_eq!(Dice::new(2, 0, -1).roll(&mut rng), -1);
        assert_eq!(Dice::new(0, 0, 0).max(), 0);
    }

    #[test]
    fn bounds() {
        assert_eq!(Dice::new(2, 6, 1).min(), 3);
        assert_eq!(Dice::new(2, 6, 1).max(), 13);
        assert_eq!(Dice::new(-1, 4, 0).min(), -4);
        assert_eq!(Dice::new(-1, 4, 0).max(), -1);
    }

    #[test]
    fn huge_dice() {
        for big in ["100000d100000", "2d2147483647", "1d10+2147483647"] {
            assert!(
                matches!(big.parse::<Dice>(), Err(Error::MalformedDiceSpec(_))),
                "{big:?} parsed"
            );
        }
        assert!("46340d46340".parse::<Dice>().is_ok());

        let d = Dice::new(i32::MAX, 2, 5);
        assert_eq!(d.max(), i32::MAX);
        assert_eq!(d.min(), i32::MAX);
        assert_eq!(d.roll(&mut srng("huge")), i32::MAX);
    }

    #[test]
    fn serde_as_string() {
        let d = Dice::new(1, 8, 2);
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"1d8+2\"");
        assert_eq!(serde_json::from_str::<Dice>("\"1d8+2\"").unwrap(), d);
        assert!(serde_json::from_str::<Dice>("\"eight\"").is_err());
    }

    #[quickcheck]
    fn display_round_trip(d: Dice) -> bool {
        d.to_string().parse::<Dice>().ok() == Some(d)
    }

    #[quickcheck]
    fn rolls_within_bounds(d: Dice, seed: u64) -> bool {
        let mut rng = srng(&seed);
        (0..20).all(|_| {
            let x = d.roll(&mut rng);
            x >= d.min() && x <= d.max()
        })
    }
}
