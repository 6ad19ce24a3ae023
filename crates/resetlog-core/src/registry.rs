//! The gain field registry.
//!
//! [`GAIN_FORMATTERS`] lists every gain a row can show, in display order,
//! with its icon, its title, how its value is formatted, and when it is
//! hidden. Cube gains are rate-conditional: while per-second display is on
//! they are divided by the entry's duration.

use resetlog_types::{BigNumber, GainField, ResetHistoryEntry};

use crate::render::RenderContext;

/// Challenge whose first completion reveals the hypercube column.
const HYPERCUBE_UNLOCK_CHALLENGE: u32 = 13;

/// Challenge whose first completion reveals the platonic cube column.
const PLATONIC_UNLOCK_CHALLENGE: u32 = 14;

/// Formats one gain value for display.
pub type GainFormatFn = fn(&BigNumber, &ResetHistoryEntry, &RenderContext<'_>) -> String;

/// Decides whether a gain column is shown for an entry.
pub type VisibilityFn = fn(&ResetHistoryEntry, &RenderContext<'_>) -> bool;

/// Display metadata for one gain field.
#[derive(Debug, Clone, Copy)]
pub struct GainFormatter {
    /// The field this formatter displays.
    pub field: GainField,
    /// Icon asset identifier.
    pub icon: &'static str,
    /// Hover title for the icon.
    pub title: &'static str,
    /// Value formatter.
    pub format: GainFormatFn,
    /// Optional visibility predicate; `None` means always shown.
    pub visible: Option<VisibilityFn>,
}

impl GainFormatter {
    /// Whether this field is shown for `entry` under `ctx`.
    pub fn is_visible(&self, entry: &ResetHistoryEntry, ctx: &RenderContext<'_>) -> bool {
        self.visible.is_none_or(|visible| visible(entry, ctx))
    }
}

/// Every gain field, in display order.
pub static GAIN_FORMATTERS: [GainFormatter; 10] = [
    GainFormatter {
        field: GainField::Offerings,
        icon: "Pictures/Offering.png",
        title: "Offerings",
        format: format_plain,
        visible: None,
    },
    GainFormatter {
        field: GainField::Obtainium,
        icon: "Pictures/Obtainium.png",
        title: "Obtainium",
        format: format_plain,
        visible: None,
    },
    GainFormatter {
        field: GainField::AntMulti,
        icon: "Pictures/AntSacrifice.png",
        title: "Ant Multiplier gains",
        format: format_plain,
        visible: None,
    },
    GainFormatter {
        field: GainField::Particles,
        icon: "Pictures/Particle.png",
        title: "Particles",
        format: format_plain,
        visible: None,
    },
    GainFormatter {
        field: GainField::Diamonds,
        icon: "Pictures/Diamond.png",
        title: "Diamonds",
        format: format_plain,
        visible: None,
    },
    GainFormatter {
        field: GainField::Mythos,
        icon: "Pictures/Mythos.png",
        title: "Mythos",
        format: format_plain,
        visible: None,
    },
    GainFormatter {
        field: GainField::WowCubes,
        icon: "Pictures/WowCube.png",
        title: "Wow! Cubes",
        format: format_rate_conditional,
        visible: None,
    },
    GainFormatter {
        field: GainField::WowTesseracts,
        icon: "Pictures/WowTessaract.png",
        title: "Wow! Tesseracts",
        format: format_rate_conditional,
        visible: None,
    },
    GainFormatter {
        field: GainField::WowHypercubes,
        icon: "Pictures/WowHypercube.png",
        title: "Wow! Hypercubes",
        format: format_rate_conditional,
        visible: Some(hypercubes_unlocked),
    },
    GainFormatter {
        field: GainField::WowPlatonicCubes,
        icon: "Pictures/Platonic Cube.png",
        title: "Platonic Cubes",
        format: format_rate_conditional,
        visible: Some(platonic_cubes_unlocked),
    },
];

/// Look up the formatter for `field`.
pub fn formatter_for(field: GainField) -> Option<&'static GainFormatter> {
    GAIN_FORMATTERS.iter().find(|f| f.field == field)
}

/// Render the value through the shared number formatter.
pub fn format_plain(value: &BigNumber, _entry: &ResetHistoryEntry, ctx: &RenderContext<'_>) -> String {
    ctx.numbers.format(value, 0, false)
}

/// Render as a per-second rate while per-second display is on, plainly
/// otherwise.
///
/// The duration is clamped to at least one second. Zero renders as
/// `0.000/s` so every rate in a column has the same shape.
pub fn format_rate_conditional(
    value: &BigNumber,
    entry: &ResetHistoryEntry,
    ctx: &RenderContext<'_>,
) -> String {
    if !ctx.per_second {
        return format_plain(value, entry, ctx);
    }
    if value.is_zero() {
        return "0.000/s".to_owned();
    }
    let rate = value.div_f64(entry.seconds.max(1.0));
    format!("{}/s", ctx.numbers.format(&rate, 3, true))
}

fn hypercubes_unlocked(_entry: &ResetHistoryEntry, ctx: &RenderContext<'_>) -> bool {
    ctx.game.challenge_completions(HYPERCUBE_UNLOCK_CHALLENGE) > 0
}

fn platonic_cubes_unlocked(_entry: &ResetHistoryEntry, ctx: &RenderContext<'_>) -> bool {
    ctx.game.challenge_completions(PLATONIC_UNLOCK_CHALLENGE) > 0
}
