//! The per-second display mode and its on-screen indicator.

use serde::Serialize;

/// Color of the toggle indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    /// Shown while per-second display is on.
    Green,
    /// Shown while per-second display is off.
    Red,
}

/// Label and color for the toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleIndicator {
    /// Button label.
    pub label: &'static str,
    /// Border accent.
    pub accent: Accent,
}

/// Whether rate-conditional gains are shown per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayMode {
    per_second: bool,
}

impl DisplayMode {
    /// A mode with the given initial state.
    pub const fn new(per_second: bool) -> Self {
        Self { per_second }
    }

    /// Whether per-second display is on.
    pub const fn per_second(self) -> bool {
        self.per_second
    }

    /// Flip the mode. Returns the new state.
    pub const fn toggle(&mut self) -> bool {
        self.per_second = !self.per_second;
        self.per_second
    }

    /// The indicator matching the current state.
    pub const fn indicator(self) -> ToggleIndicator {
        if self.per_second {
            ToggleIndicator {
                label: "Per second: ON",
                accent: Accent::Green,
            }
        } else {
            ToggleIndicator {
                label: "Per second: OFF",
                accent: Accent::Red,
            }
        }
    }
}
