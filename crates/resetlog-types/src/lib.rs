//! Shared type definitions for the reset history log.
//!
//! Types defined here are used by the core and the CLI, and the
//! presentation model flows downstream to `TypeScript` via `ts-rs` for the
//! game's web front end.
//!
//! # Modules
//!
//! - [`enums`] -- Reset kinds, categories, gain fields, cell roles
//! - [`number`] -- [`BigNumber`], the mantissa/exponent gain quantity
//! - [`structs`] -- [`ResetHistoryEntry`] and its per-kind payloads
//! - [`row`] -- [`Row`], [`Cell`] and [`Fragment`], the rendered table model

pub mod enums;
pub mod number;
pub mod row;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Category, CellRole, GainField, Kind};
pub use number::{BigNumber, NumberParseError};
pub use row::{Cell, Fragment, Row};
pub use structs::{
    AntSacrificeDetails, AscendDetails, EntryDetails, PrestigeDetails, ReincarnateDetails,
    ResetHistoryEntry, TranscendDetails,
};
