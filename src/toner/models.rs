use std::fmt::{Display, Formatter};

use serde_derive::{Deserialize, Serialize};

// ///////////// //
// Toner colours //
// ///////////// //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TonerColor {
    Black,
    Cyan,
    Magenta,
    Yellow,
}

impl TonerColor {
    pub const ALL: [TonerColor; 4] = [TonerColor::Black, TonerColor::Cyan, TonerColor::Magenta, TonerColor::Yellow];

    /// Lowercase name, used for metric labels and MQTT topics.
    pub fn name(self) -> &'static str {
        match self {
            TonerColor::Black => "black",
            TonerColor::Cyan => "cyan",
            TonerColor::Magenta => "magenta",
            TonerColor::Yellow => "yellow",
        }
    }

    /// Slot of this colour in a `[f64; 4]` laid out like [`TonerColor::ALL`].
    pub(super) fn index(self) -> usize {
        self as usize
    }
}

impl Display for TonerColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ///////////////// //
// Indicator layout  //
// ///////////////// //

/// Which toner colour each indicator position on the status page stands for.
///
/// The status page carries no labels next to its fill bars, so the colour of a
/// bar is known only from its position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TonerLayout {
    positions: [TonerColor; 4],
}

impl TonerLayout {
    /// Black, cyan, magenta, yellow: the order used by the Ricoh web status page.
    pub const RICOH: TonerLayout = TonerLayout { positions: TonerColor::ALL };

    /// Returns `None` unless every colour appears exactly once.
    pub fn new(positions: [TonerColor; 4]) -> Option<Self> {
        let mut seen = [false; 4];
        for color in positions {
            if std::mem::replace(&mut seen[color.index()], true) {
                return None;
            }
        }
        Some(Self { positions })
    }

    pub fn positions(&self) -> &[TonerColor; 4] {
        &self.positions
    }
}

impl Default for TonerLayout {
    fn default() -> Self {
        Self::RICOH
    }
}

// ////// //
// Record //
// ////// //

/// Toner levels of one printer, taken from one status page.
///
/// Levels are percentages and are not clamped: a malformed indicator can put
/// them outside of `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrinterRecord {
    printer_name: String,
    level_black: f64,
    level_cyan: f64,
    level_magenta: f64,
    level_yellow: f64,
}

impl PrinterRecord {
    pub fn new(printer_name: impl Into<String>, level_black: f64, level_cyan: f64, level_magenta: f64, level_yellow: f64) -> Self {
        Self {
            printer_name: printer_name.into(),
            level_black,
            level_cyan,
            level_magenta,
            level_yellow,
        }
    }

    pub(super) fn from_levels(printer_name: &str, levels: [f64; 4]) -> Self {
        let [black, cyan, magenta, yellow] = levels;
        Self::new(printer_name, black, cyan, magenta, yellow)
    }

    pub fn printer_name(&self) -> &str {
        &self.printer_name
    }

    pub fn level_black(&self) -> f64 {
        self.level_black
    }

    pub fn level_cyan(&self) -> f64 {
        self.level_cyan
    }

    pub fn level_magenta(&self) -> f64 {
        self.level_magenta
    }

    pub fn level_yellow(&self) -> f64 {
        self.level_yellow
    }

    pub fn level(&self, color: TonerColor) -> f64 {
        match color {
            TonerColor::Black => self.level_black,
            TonerColor::Cyan => self.level_cyan,
            TonerColor::Magenta => self.level_magenta,
            TonerColor::Yellow => self.level_yellow,
        }
    }

    pub fn levels(&self) -> [(TonerColor, f64); 4] {
        TonerColor::ALL.map(|color| (color, self.level(color)))
    }
}
