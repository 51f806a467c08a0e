//! Deterministic credential strength scoring.
//!
//! A password is partitioned into five character classes in a single pass and
//! each class is weighted into a *credit*:
//!
//! | class        | weight |
//! |--------------|--------|
//! | digits       | 1      |
//! | `a-z`        | 1      |
//! | `A-Z`        | 2      |
//! | punctuation  | 3      |
//! | anything else| 5      |
//!
//! Punctuation is the 32-character ASCII set ``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~``.
//! Characters are counted per Unicode scalar value. Credit then maps onto five
//! half-open tiers starting at 0, 10, 15, 20, and 25.

use serde::Serialize;

const TIER_FLOORS: [u32; 4] = [10, 15, 20, 25];

/// Per-class character counts of a password.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CharacterClasses {
    /// `0-9`.
    pub digits: u32,
    /// `a-z`.
    pub lowercase: u32,
    /// `A-Z`.
    pub uppercase: u32,
    /// ASCII punctuation.
    pub punctuation: u32,
    /// Everything else (whitespace, non-ASCII, control characters).
    pub other: u32,
}

impl CharacterClasses {
    /// Partition `password` into classes.
    #[must_use]
    pub fn tally(password: &str) -> Self {
        password.chars().fold(Self::default(), |mut classes, ch| {
            let slot = match ch {
                '0'..='9' => &mut classes.digits,
                'a'..='z' => &mut classes.lowercase,
                'A'..='Z' => &mut classes.uppercase,
                ch if ch.is_ascii_punctuation() => &mut classes.punctuation,
                _ => &mut classes.other,
            };
            *slot = slot.saturating_add(1);
            classes
        })
    }

    /// Weighted credit of these counts.
    #[must_use]
    pub const fn credit(&self) -> u32 {
        self.digits
            .saturating_add(self.lowercase)
            .saturating_add(self.uppercase.saturating_mul(2))
            .saturating_add(self.punctuation.saturating_mul(3))
            .saturating_add(self.other.saturating_mul(5))
    }
}

/// Weighted credit of `password`.
#[must_use]
pub fn credit(password: &str) -> u32 {
    CharacterClasses::tally(password).credit()
}

/// Human-facing strength bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthDescriptor {
    /// Tier 0.
    TooWeak,
    /// Tier 1.
    Weak,
    /// Tier 2.
    Ok,
    /// Tier 3.
    Strong,
    /// Tier 4.
    VeryStrong,
}

impl StrengthDescriptor {
    /// Descriptor for a tier; tiers above 4 saturate to [`Self::VeryStrong`].
    #[must_use]
    pub const fn from_tier(tier: u8) -> Self {
        match tier {
            0 => Self::TooWeak,
            1 => Self::Weak,
            2 => Self::Ok,
            3 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }

    /// Translation key for the descriptor label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::TooWeak => "password.strength.too_weak",
            Self::Weak => "password.strength.weak",
            Self::Ok => "password.strength.ok",
            Self::Strong => "password.strength.strong",
            Self::VeryStrong => "password.strength.very_strong",
        }
    }

    /// English label used when no translation is available.
    #[must_use]
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::TooWeak => "Too weak",
            Self::Weak => "Weak",
            Self::Ok => "OK",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very strong",
        }
    }
}

/// Outcome of scoring a candidate password.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StrengthResult {
    /// Bucket in `0..=4`.
    pub tier: u8,
    /// Label matching the tier.
    pub descriptor: StrengthDescriptor,
    /// Weighted credit the tier was derived from.
    pub credit: u32,
}

impl StrengthResult {
    /// Map a credit onto its tier.
    #[must_use]
    pub fn from_credit(credit: u32) -> Self {
        let tier = TIER_FLOORS.iter().filter(|floor| credit >= **floor).count();
        let tier = u8::try_from(tier).unwrap_or(u8::MAX);
        Self {
            tier,
            descriptor: StrengthDescriptor::from_tier(tier),
            credit,
        }
    }

    /// Style hook for meters (`password-strength-level-0` ... `-4`).
    #[must_use]
    pub fn css_class(&self) -> String {
        format!("password-strength-level-{}", self.tier)
    }
}

/// Score `password` into a strength tier. Total and side-effect free.
#[must_use]
pub fn score(password: &str) -> StrengthResult {
    StrengthResult::from_credit(credit(password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_is_too_weak() {
        let result = score("");
        assert_eq!(result.tier, 0);
        assert_eq!(result.descriptor, StrengthDescriptor::TooWeak);
        assert_eq!(result.credit, 0);
    }

    #[test]
    fn ten_lowercase_sits_on_weak_boundary() {
        let result = score("aaaaaaaaaa");
        assert_eq!(result.credit, 10);
        assert_eq!(result.tier, 1);
        assert_eq!(result.descriptor, StrengthDescriptor::Weak);
        assert_eq!(score("aaaaaaaaa").descriptor, StrengthDescriptor::TooWeak);
    }

    #[test]
    fn mixed_classes_follow_the_weighting() {
        let password = "Aa1!Aa1!Aa";
        let classes = CharacterClasses::tally(password);
        assert_eq!(
            classes,
            CharacterClasses {
                digits: 2,
                lowercase: 3,
                uppercase: 3,
                punctuation: 2,
                other: 0,
            }
        );
        let expected = classes.digits
            + classes.lowercase
            + classes.uppercase * 2
            + classes.punctuation * 3
            + classes.other * 5;
        let result = score(password);
        assert_eq!(result.credit, expected);
        assert_eq!(result, StrengthResult::from_credit(expected));
    }

    #[test]
    fn tier_floors_are_inclusive() {
        let cases = [
            (0, StrengthDescriptor::TooWeak),
            (9, StrengthDescriptor::TooWeak),
            (10, StrengthDescriptor::Weak),
            (14, StrengthDescriptor::Weak),
            (15, StrengthDescriptor::Ok),
            (19, StrengthDescriptor::Ok),
            (20, StrengthDescriptor::Strong),
            (24, StrengthDescriptor::Strong),
            (25, StrengthDescriptor::VeryStrong),
            (u32::MAX, StrengthDescriptor::VeryStrong),
        ];
        for (credit, descriptor) in cases {
            let result = StrengthResult::from_credit(credit);
            assert_eq!(result.descriptor, descriptor, "credit {credit}");
            assert_eq!(StrengthDescriptor::from_tier(result.tier), descriptor);
        }
    }

    #[test]
    fn punctuation_covers_the_ascii_set() {
        let set = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;
        let classes = CharacterClasses::tally(set);
        assert_eq!(classes.punctuation, 32);
        assert_eq!(classes.other, 0);
    }

    #[test]
    fn spaces_and_non_ascii_count_as_other() {
        let classes = CharacterClasses::tally(" é€ß");
        assert_eq!(classes.other, 4);
        assert_eq!(classes.credit(), 20);
        assert_eq!(score(" é€ß").descriptor, StrengthDescriptor::Strong);
    }

    #[test]
    fn appending_never_lowers_the_score() {
        let extensions = ['a', 'Z', '7', '#', ' ', 'ü'];
        let mut password = String::new();
        let mut previous = score(&password);
        for round in 0..12 {
            let next_char = extensions[round % extensions.len()];
            password.push(next_char);
            let next = score(&password);
            assert!(next.credit > previous.credit);
            assert!(next.tier >= previous.tier);
            previous = next;
        }
    }

    #[test]
    fn css_class_and_labels_track_tier() {
        let result = score("Tr0ub4dor&3xyz!");
        assert_eq!(result.css_class(), format!("password-strength-level-{}", result.tier));
        assert_eq!(StrengthDescriptor::VeryStrong.default_label(), "Very strong");
        assert_eq!(
            StrengthDescriptor::Ok.label_key(),
            "password.strength.ok"
        );
    }
}
