//! Phrase tables for combat messages.

use rand::{seq::SliceRandom, Rng};

use crate::DamageType;

/// Pick a random phrase from a list, empty string for an empty list.
pub fn pick_phrase<'a>(rng: &mut (impl Rng + ?Sized), list: &[&'a str]) -> &'a str {
    list.choose(rng).copied().unwrap_or("")
}

// Templates use the grammar tokens from `util::grammar`, `[weapon]` and
// `[severity]` are filled in before templating.

pub(crate) fn attack(damage_type: DamageType) -> &'static [&'static str] {
    match damage_type {
        DamageType::Slash => &[
            "[One] slash[es] [another] with [weapon]",
            "[One] cut[s] into [another] with [weapon]",
            "[One] swing[s] [weapon] at [another]",
        ],
        DamageType::Pierce => &[
            "[One] stab[s] [another] with [weapon]",
            "[One] thrust[s] [weapon] at [another]",
        ],
        DamageType::Blunt => &[
            "[One] smash[es] [another] with [weapon]",
            "[One] bash[es] [another] with [weapon]",
        ],
        DamageType::Bite => &[
            "[One] bite[s] [another]",
            "[One] sink[s] [one's] teeth into [another]",
        ],
        DamageType::Claw => &[
            "[One] claw[s] [another]",
            "[One] rake[s] [another] with [weapon]",
        ],
        DamageType::Punch => &[
            "[One] punch[es] [another]",
            "[One] hit[s] [another] with [weapon]",
        ],
    }
}

pub(crate) const MISS: &[&str] = &[
    "[One] miss[es] [another]",
    "[One] swing[s] wide of [another]",
    "[One] fail[s] to connect with [another]",
];

pub(crate) const HIT: &[&str] = &[
    "The blow leaves [them] [severity] wounded",
    "It leaves [them] [severity] wounded",
];

pub(crate) const FAIL: &[&str] = &[
    "The blow glances off harmlessly",
    "It fails to penetrate",
];

pub(crate) const DEAD: &[&str] =
    &["The blow is fatal", "It is a killing blow"];

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;
    use util::srng;

    use super::*;

    #[test]
    fn picks() {
        let mut rng = srng(&1);
        assert_eq!(pick_phrase(&mut rng, &[]), "");
        assert_eq!(pick_phrase(&mut rng, &["only"]), "only");
        for _ in 0..20 {
            assert!(MISS.contains(&pick_phrase(&mut rng, MISS)));
        }
        for t in DamageType::iter() {
            assert!(!attack(t).is_empty());
        }
    }

    #[test]
    fn seeded_picks_repeat() {
        let a: Vec<_> = {
            let mut rng = srng(&7);
            (0..10).map(|_| pick_phrase(&mut rng, HIT)).collect()
        };
        let b: Vec<_> = {
            let mut rng = srng(&7);
            (0..10).map(|_| pick_phrase(&mut rng, HIT)).collect()
        };
        assert_eq!(a, b);
    }
}
