//! Kind-specific cells appended after the gain cells.
//!
//! Ant sacrifices show the multiplier delta, the crumb total and the ant
//! rating. Ascensions show challenge 10 completions, the corruption score
//! and a per-corruption breakdown. Other kinds have no extras.

use std::fmt::Write as _;

use resetlog_types::{
    AntSacrificeDetails, AscendDetails, BigNumber, Cell, CellRole, EntryDetails, Fragment,
    ResetHistoryEntry,
};

use crate::format::strip_mantissa;
use crate::render::RenderContext;

/// Icon and title of each corruption, in breakdown order.
///
/// Corruption `i` here reads its level from `used_corruptions[i + 1]`.
pub const CORRUPTIONS: [(&str, &str); 9] = [
    ("Pictures/Divisiveness Level 7.png", "Divisiveness [Multipliers]"),
    ("Pictures/Maladaption Lvl 7.png", "Maladaption [Accelerators]"),
    ("Pictures/Laziness Lvl 7.png", "Spacial Dilation [Time]"),
    (
        "Pictures/Hyperchallenged Lvl 7.png",
        "Hyperchallenged [Challenge Requirements]",
    ),
    (
        "Pictures/Scientific Illiteracy Lvl 7.png",
        "Scientific Illiteracy [Obtainium]",
    ),
    ("Pictures/Deflation Lvl 7.png", "Market Deflation [Diamonds]"),
    ("Pictures/Extinction Lvl 7.png", "Extinction [Ants]"),
    ("Pictures/Drought Lvl 7.png", "Drought [Offering EXP]"),
    (
        "Pictures/Financial Collapse Lvl 7.png",
        "Financial Recession [Coins]",
    ),
];

const MULTIPLIER_ICON: &str = "Pictures/Multiplier.png";
const CRUMBS_ICON: &str = "Pictures/GalacticCrumbs.png";
const ELO_ICON: &str = "Pictures/Transparent Pics/ELO.png";
const CHALLENGE_TEN_ICON: &str = "Pictures/Transparent Pics/ChallengeTen.png";

/// Build the extra cells for `entry`.
pub fn build_extras(entry: &ResetHistoryEntry, ctx: &RenderContext<'_>) -> Vec<Cell> {
    match &entry.details {
        EntryDetails::AntSacrifice(details) => ant_sacrifice_extras(details, ctx),
        EntryDetails::Ascend(details) => ascend_extras(details, ctx),
        EntryDetails::Prestige(_) | EntryDetails::Transcend(_) | EntryDetails::Reincarnate(_) => {
            Vec::new()
        }
    }
}

fn ant_sacrifice_extras(details: &AntSacrificeDetails, ctx: &RenderContext<'_>) -> Vec<Cell> {
    let before = ctx
        .game
        .ant_sacrifice_multiplier(details.ant_sacrifice_points_before);
    let after = ctx
        .game
        .ant_sacrifice_multiplier(details.ant_sacrifice_points_after);
    let delta = after - before;
    let sign = if delta < 0.0 { "" } else { "+" };

    let multiplier = Cell::new(
        CellRole::Extra,
        vec![Fragment::icon(
            MULTIPLIER_ICON,
            "Ant Multiplier",
            format!("{sign}{}", ctx.numbers.format_f64(delta, 3, false)),
        )],
        Some(format!(
            "Ant Multiplier: {}-->{}",
            ctx.numbers.format_f64(before, 3, false),
            ctx.numbers.format_f64(after, 3, false),
        )),
    );

    let crumbs_full = ctx.numbers.format(&details.crumbs, 0, false);
    let crumbs = Cell::new(
        CellRole::Extra,
        vec![Fragment::icon(
            CRUMBS_ICON,
            "Crumbs",
            strip_mantissa(&crumbs_full),
        )],
        Some(format!(
            "{crumbs_full} crumbs (+{} crumbs/s)",
            ctx.numbers.format(&details.crumbs_per_second, 0, false),
        )),
    );

    let rating = Cell::new(
        CellRole::Extra,
        vec![Fragment::icon(
            ELO_ICON,
            "ELO",
            ctx.numbers.format_f64(details.effective_elo, 0, false),
        )],
        Some(format!(
            "{} base",
            ctx.numbers.format_f64(details.base_elo, 0, false)
        )),
    );

    vec![multiplier, crumbs, rating]
}

fn ascend_extras(details: &AscendDetails, ctx: &RenderContext<'_>) -> Vec<Cell> {
    let completions = Cell::new(
        CellRole::Extra,
        vec![Fragment::icon(
            CHALLENGE_TEN_ICON,
            "Challenge 10 completions",
            details.c10_completions.to_string(),
        )],
        None,
    );
    let score = Cell::new(
        CellRole::Extra,
        vec![Fragment::text(corruption_score(details, ctx))],
        None,
    );
    let breakdown = Cell::new(CellRole::Extra, corruption_breakdown(details), None);

    vec![completions, score, breakdown]
}

/// `Score: <score>`, plus ` / C<n>` when a challenge was in progress.
pub fn corruption_score(details: &AscendDetails, ctx: &RenderContext<'_>) -> String {
    let score = BigNumber::from_f64(details.corruption_score);
    let mut text = format!("Score: {}", ctx.numbers.format(&score, 0, true));
    if let Some(challenge) = details.current_challenge {
        let _ = write!(text, " / C{challenge}");
    }
    text
}

/// One fragment per corruption with a recorded, nonzero level.
///
/// Levels are read 1-based from `used_corruptions`; slot 0 is never read.
pub fn corruption_breakdown(details: &AscendDetails) -> Vec<Fragment> {
    CORRUPTIONS
        .iter()
        .zip(1usize..)
        .filter_map(|(&(icon, title), index)| {
            details
                .corruption_level(index)
                .filter(|&level| level != 0)
                .map(|level| Fragment::icon(icon, title, format!(" {level}")))
        })
        .collect()
}
