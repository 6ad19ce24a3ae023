//! Enumeration types for the reset history log.
//!
//! Reset kinds, the display categories they route into, the gain fields a
//! row can show, and the roles a rendered cell can play.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Reset kinds
// ---------------------------------------------------------------------------

/// The kind of progress reset that produced a history entry.
///
/// Every kind routes into exactly one [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Kind {
    /// Ants were sacrificed for a multiplier and offerings.
    AntSacrifice,
    /// The first-tier reset, yielding diamonds.
    Prestige,
    /// The second-tier reset, yielding mythos.
    Transcend,
    /// The third-tier reset, yielding particles and obtainium.
    Reincarnate,
    /// The fourth-tier reset, yielding cubes of every flavour.
    Ascend,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::AntSacrifice,
        Self::Prestige,
        Self::Transcend,
        Self::Reincarnate,
        Self::Ascend,
    ];

    /// The category whose table this kind's entries are routed to.
    pub const fn category(self) -> Category {
        match self {
            Self::AntSacrifice => Category::Ants,
            Self::Prestige | Self::Transcend | Self::Reincarnate => Category::Reset,
            Self::Ascend => Category::Ascend,
        }
    }

    /// The wire name of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AntSacrifice => "antsacrifice",
            Self::Prestige => "prestige",
            Self::Transcend => "transcend",
            Self::Reincarnate => "reincarnate",
            Self::Ascend => "ascend",
        }
    }
}

impl core::fmt::Display for Kind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// A table grouping that one or more reset kinds route into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Category {
    /// Ant sacrifices.
    Ants,
    /// Prestige, transcend and reincarnate resets.
    Reset,
    /// Ascensions.
    Ascend,
}

impl Category {
    /// Every category, in table order.
    pub const ALL: [Self; 3] = [Self::Ants, Self::Reset, Self::Ascend];

    /// The wire name of this category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ants => "ants",
            Self::Reset => "reset",
            Self::Ascend => "ascend",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Gain fields
// ---------------------------------------------------------------------------

/// A resource gain that a history row may display.
///
/// Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum GainField {
    /// Offerings.
    Offerings,
    /// Obtainium.
    Obtainium,
    /// Ant multiplier gains. No kind currently carries this field.
    AntMulti,
    /// Particles.
    Particles,
    /// Diamonds.
    Diamonds,
    /// Mythos.
    Mythos,
    /// Wow! Cubes.
    WowCubes,
    /// Wow! Tesseracts.
    WowTesseracts,
    /// Wow! Hypercubes.
    WowHypercubes,
    /// Platonic Cubes.
    WowPlatonicCubes,
}

impl GainField {
    /// Every gain field, in display order.
    pub const ALL: [Self; 10] = [
        Self::Offerings,
        Self::Obtainium,
        Self::AntMulti,
        Self::Particles,
        Self::Diamonds,
        Self::Mythos,
        Self::WowCubes,
        Self::WowTesseracts,
        Self::WowHypercubes,
        Self::WowPlatonicCubes,
    ];

    /// The field name as it appears on serialized entries.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Offerings => "offerings",
            Self::Obtainium => "obtainium",
            Self::AntMulti => "antMulti",
            Self::Particles => "particles",
            Self::Diamonds => "diamonds",
            Self::Mythos => "mythos",
            Self::WowCubes => "wowCubes",
            Self::WowTesseracts => "wowTesseracts",
            Self::WowHypercubes => "wowHypercubes",
            Self::WowPlatonicCubes => "wowPlatonicCubes",
        }
    }
}

// ---------------------------------------------------------------------------
// Cell roles
// ---------------------------------------------------------------------------

/// The part of a history row a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CellRole {
    /// The leading cell: kind icon and elapsed duration.
    Duration,
    /// One resource gain.
    Gain,
    /// A kind-specific derived value.
    Extra,
    /// Padding that keeps every row the same width.
    Filler,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_routes_to_one_category() {
        let ants: Vec<Kind> = Kind::ALL
            .into_iter()
            .filter(|k| k.category() == Category::Ants)
            .collect();
        let reset: Vec<Kind> = Kind::ALL
            .into_iter()
            .filter(|k| k.category() == Category::Reset)
            .collect();
        let ascend: Vec<Kind> = Kind::ALL
            .into_iter()
            .filter(|k| k.category() == Category::Ascend)
            .collect();

        assert_eq!(ants, vec![Kind::AntSacrifice]);
        assert_eq!(
            reset,
            vec![Kind::Prestige, Kind::Transcend, Kind::Reincarnate]
        );
        assert_eq!(ascend, vec![Kind::Ascend]);
    }

    #[test]
    fn wire_names_match_serde() {
        for kind in Kind::ALL {
            let json = serde_json::to_string(&kind).ok();
            assert_eq!(json, Some(format!("\"{}\"", kind.as_str())));
        }
        for category in Category::ALL {
            let json = serde_json::to_string(&category).ok();
            assert_eq!(json, Some(format!("\"{category}\"")));
        }
        for field in GainField::ALL {
            let json = serde_json::to_string(&field).ok();
            assert_eq!(json, Some(format!("\"{}\"", field.key())));
        }
    }
}
