//! History entry types.
//!
//! A [`ResetHistoryEntry`] is the shared base (timestamp and duration) plus
//! an [`EntryDetails`] variant carrying the fields of exactly one reset
//! kind. The kind is never stored on its own: it is read off the variant,
//! so an entry cannot claim one kind while carrying another kind's fields.
//!
//! The serialized shape is flat:
//!
//! ```json
//! { "date": 1700000000000, "seconds": 12.5, "kind": "prestige",
//!   "offerings": 3, "diamonds": "1.5e12" }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{Category, GainField, Kind};
use crate::number::BigNumber;

/// One completed reset, as recorded in a history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetHistoryEntry {
    /// When the reset completed.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    /// Elapsed seconds the reset covers. Never negative.
    #[serde(deserialize_with = "deserialize_seconds")]
    pub seconds: f64,
    /// Kind-specific payload.
    #[serde(flatten)]
    pub details: EntryDetails,
}

impl ResetHistoryEntry {
    /// Create an entry. Negative or non-finite durations are stored as 0.
    pub fn new(date: DateTime<Utc>, seconds: f64, details: impl Into<EntryDetails>) -> Self {
        Self {
            date,
            seconds: clamp_seconds(seconds),
            details: details.into(),
        }
    }

    /// The reset kind, derived from the payload variant.
    pub const fn kind(&self) -> Kind {
        self.details.kind()
    }

    /// The category this entry's kind routes to.
    pub const fn category(&self) -> Category {
        self.kind().category()
    }

    /// The value of `field`, if this entry's kind carries it.
    pub const fn gain(&self, field: GainField) -> Option<&BigNumber> {
        self.details.gain(field)
    }
}

/// Negative and non-finite durations become 0.
fn clamp_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    }
}

fn deserialize_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(clamp_seconds)
}

/// Kind-specific payload of a [`ResetHistoryEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryDetails {
    /// An ant sacrifice.
    AntSacrifice(AntSacrificeDetails),
    /// A prestige.
    Prestige(PrestigeDetails),
    /// A transcension.
    Transcend(TranscendDetails),
    /// A reincarnation.
    Reincarnate(ReincarnateDetails),
    /// An ascension.
    Ascend(AscendDetails),
}

impl EntryDetails {
    /// The reset kind this payload belongs to.
    pub const fn kind(&self) -> Kind {
        match self {
            Self::AntSacrifice(_) => Kind::AntSacrifice,
            Self::Prestige(_) => Kind::Prestige,
            Self::Transcend(_) => Kind::Transcend,
            Self::Reincarnate(_) => Kind::Reincarnate,
            Self::Ascend(_) => Kind::Ascend,
        }
    }

    /// The value of `field`, if this variant carries it.
    pub const fn gain(&self, field: GainField) -> Option<&BigNumber> {
        match (self, field) {
            (Self::AntSacrifice(d), GainField::Offerings) => Some(&d.offerings),
            (Self::AntSacrifice(d), GainField::Obtainium) => Some(&d.obtainium),
            (Self::Prestige(d), GainField::Offerings) => Some(&d.offerings),
            (Self::Prestige(d), GainField::Diamonds) => Some(&d.diamonds),
            (Self::Transcend(d), GainField::Offerings) => Some(&d.offerings),
            (Self::Transcend(d), GainField::Mythos) => Some(&d.mythos),
            (Self::Reincarnate(d), GainField::Offerings) => Some(&d.offerings),
            (Self::Reincarnate(d), GainField::Particles) => Some(&d.particles),
            (Self::Reincarnate(d), GainField::Obtainium) => Some(&d.obtainium),
            (Self::Ascend(d), GainField::WowCubes) => Some(&d.wow_cubes),
            (Self::Ascend(d), GainField::WowTesseracts) => Some(&d.wow_tesseracts),
            (Self::Ascend(d), GainField::WowHypercubes) => Some(&d.wow_hypercubes),
            (Self::Ascend(d), GainField::WowPlatonicCubes) => Some(&d.wow_platonic_cubes),
            _ => None,
        }
    }
}

/// Fields recorded for an ant sacrifice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntSacrificeDetails {
    /// Sacrifice points after the sacrifice.
    pub ant_sacrifice_points_after: f64,
    /// Sacrifice points before the sacrifice.
    pub ant_sacrifice_points_before: f64,
    /// Base ant rating at the time of the sacrifice.
    #[serde(rename = "baseELO")]
    pub base_elo: f64,
    /// Galactic crumbs held at the time of the sacrifice.
    pub crumbs: BigNumber,
    /// Crumb production rate at the time of the sacrifice.
    pub crumbs_per_second: BigNumber,
    /// Ant rating after all multipliers.
    #[serde(rename = "effectiveELO")]
    pub effective_elo: f64,
    /// Obtainium gained.
    pub obtainium: BigNumber,
    /// Offerings gained.
    pub offerings: BigNumber,
}

/// Fields recorded for a prestige.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrestigeDetails {
    /// Offerings gained.
    pub offerings: BigNumber,
    /// Diamonds gained.
    pub diamonds: BigNumber,
}

/// Fields recorded for a transcension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscendDetails {
    /// Offerings gained.
    pub offerings: BigNumber,
    /// Mythos gained.
    pub mythos: BigNumber,
}

/// Fields recorded for a reincarnation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReincarnateDetails {
    /// Offerings gained.
    pub offerings: BigNumber,
    /// Particles gained.
    pub particles: BigNumber,
    /// Obtainium gained.
    pub obtainium: BigNumber,
}

/// Fields recorded for an ascension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AscendDetails {
    /// Challenge 10 completions at the time of ascension.
    pub c10_completions: u32,
    /// Corruption levels in use. Index 0 is unused; corruption `i` (1-based)
    /// is stored at index `i`. Missing or `null` slots mean "not recorded".
    pub used_corruptions: Vec<Option<u32>>,
    /// Corruption score of the run.
    pub corruption_score: f64,
    /// Wow! Cubes gained.
    pub wow_cubes: BigNumber,
    /// Wow! Tesseracts gained.
    pub wow_tesseracts: BigNumber,
    /// Wow! Hypercubes gained.
    pub wow_hypercubes: BigNumber,
    /// Platonic Cubes gained.
    pub wow_platonic_cubes: BigNumber,
    /// The challenge in progress when the ascension happened, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_challenge: Option<u32>,
}

impl AscendDetails {
    /// The stored level at raw `index` of `used_corruptions`, if present.
    pub fn corruption_level(&self, index: usize) -> Option<u32> {
        self.used_corruptions.get(index).copied().flatten()
    }
}

macro_rules! impl_into_details {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for EntryDetails {
                fn from(details: $ty) -> Self {
                    Self::$variant(details)
                }
            }
        )*
    };
}

impl_into_details!(
    AntSacrificeDetails => AntSacrifice,
    PrestigeDetails => Prestige,
    TranscendDetails => Transcend,
    ReincarnateDetails => Reincarnate,
    AscendDetails => Ascend,
);

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreachable, clippy::float_cmp)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    #[test]
    fn kind_follows_variant() {
        let entry = ResetHistoryEntry::new(
            at(0),
            10.0,
            TranscendDetails {
                offerings: BigNumber::from_f64(1.0),
                mythos: BigNumber::from_f64(2.0),
            },
        );
        assert_eq!(entry.kind(), Kind::Transcend);
        assert_eq!(entry.category(), Category::Reset);
    }

    #[test]
    fn gains_only_exist_on_their_kind() {
        let entry = ResetHistoryEntry::new(
            at(0),
            1.0,
            PrestigeDetails {
                offerings: BigNumber::from_f64(4.0),
                diamonds: BigNumber::from_f64(9.0),
            },
        );
        let present: Vec<GainField> = GainField::ALL
            .into_iter()
            .filter(|f| entry.gain(*f).is_some())
            .collect();
        assert_eq!(present, vec![GainField::Offerings, GainField::Diamonds]);
    }

    #[test]
    fn negative_duration_is_clamped() {
        let entry = ResetHistoryEntry::new(
            at(0),
            -3.0,
            PrestigeDetails {
                offerings: BigNumber::ZERO,
                diamonds: BigNumber::ZERO,
            },
        );
        assert_eq!(entry.seconds, 0.0);
    }

    #[test]
    fn negative_duration_is_clamped_when_deserialized() {
        let json = r#"{"date":0,"seconds":-4,"kind":"prestige","offerings":1,"diamonds":2}"#;
        let entry: ResetHistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.seconds, 0.0);

        let json = r#"{"date":0,"seconds":2.5,"kind":"prestige","offerings":1,"diamonds":2}"#;
        let entry: ResetHistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.seconds, 2.5);
    }

    #[test]
    fn deserializes_flat_ascend_entry() {
        let json = r#"{
            "date": 1700000000000,
            "seconds": 5,
            "kind": "ascend",
            "c10Completions": 12,
            "usedCorruptions": [0, 5, null, 0, 11],
            "corruptionScore": 40000,
            "wowCubes": 10,
            "wowTesseracts": "2.5e3",
            "wowHypercubes": 0,
            "wowPlatonicCubes": 0,
            "currentChallenge": 11
        }"#;
        let entry: ResetHistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind(), Kind::Ascend);
        assert_eq!(entry.date, at(1_700_000_000_000));

        let EntryDetails::Ascend(details) = &entry.details else {
            unreachable!("parsed as ascend");
        };
        assert_eq!(details.c10_completions, 12);
        assert_eq!(details.corruption_level(1), Some(5));
        assert_eq!(details.corruption_level(2), None);
        assert_eq!(details.corruption_level(4), Some(11));
        assert_eq!(details.corruption_level(9), None);
        assert_eq!(details.wow_tesseracts.to_f64(), 2500.0);
        assert_eq!(details.current_challenge, Some(11));
    }

    #[test]
    fn deserializes_ant_sacrifice_with_rating_names() {
        let json = r#"{
            "date": 0, "seconds": 30, "kind": "antsacrifice",
            "antSacrificePointsAfter": 200, "antSacrificePointsBefore": 100,
            "baseELO": 1000, "effectiveELO": 1500,
            "crumbs": "2.5e1000", "crumbsPerSecond": "1e990",
            "obtainium": 7, "offerings": 8
        }"#;
        let entry: ResetHistoryEntry = serde_json::from_str(json).unwrap();
        let EntryDetails::AntSacrifice(details) = &entry.details else {
            unreachable!("parsed as antsacrifice");
        };
        assert_eq!(details.base_elo, 1000.0);
        assert_eq!(details.effective_elo, 1500.0);
        assert_eq!(details.crumbs.parts(), (2.5, 1000));
    }

    #[test]
    fn rejects_entry_missing_kind_fields() {
        // A prestige without diamonds is not a prestige.
        let json = r#"{"date": 0, "seconds": 1, "kind": "prestige", "offerings": 1}"#;
        assert!(serde_json::from_str::<ResetHistoryEntry>(json).is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let entry = ResetHistoryEntry::new(
            at(1_234),
            2.5,
            ReincarnateDetails {
                offerings: BigNumber::from_f64(3.0),
                particles: "4e400".parse().unwrap(),
                obtainium: BigNumber::from_f64(5.0),
            },
        );
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"kind\":\"reincarnate\""));
        let back: ResetHistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
