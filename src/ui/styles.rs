// UI Styles
// Color scheme for console output

use crossterm::style::{ContentStyle, Stylize};

/// Console color scheme and styles
pub struct Styles;

impl Styles {
    // === Diagnostics ===

    pub fn error() -> ContentStyle {
        ContentStyle::new().red().bold()
    }

    /// Failed check before anything was touched
    pub fn precondition() -> ContentStyle {
        ContentStyle::new().magenta().bold()
    }

    pub fn warning() -> ContentStyle {
        ContentStyle::new().yellow().bold()
    }

    pub fn hint() -> ContentStyle {
        ContentStyle::new().dark_grey()
    }

    // === Progress ===

    pub fn step() -> ContentStyle {
        ContentStyle::new().cyan().bold()
    }

    pub fn copied() -> ContentStyle {
        ContentStyle::new().green()
    }

    pub fn note() -> ContentStyle {
        ContentStyle::new().blue()
    }

    pub fn success() -> ContentStyle {
        ContentStyle::new().green().bold()
    }
}
