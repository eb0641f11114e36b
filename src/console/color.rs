// src/console/color.rs

//! Rotating color assignment.
//!
//! Every command run gets the next color from a [`ColorAllocator`], and all
//! lines of that command's output share it. One event that triggers a build
//! and two reloads therefore shows three consecutive colors. The allocator is
//! owned by the dispatcher; there is no process-wide counter.

use std::fmt;

/// An ANSI SGR color parameter (e.g. `31` for red, `0` for reset/neutral).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorCode(pub u8);

impl ColorCode {
    /// Neutral color used for banners ("Starting", "Detected change", "Done").
    /// Never produced by [`ColorAllocator::next_color`].
    pub const WHITE: ColorCode = ColorCode(0);

    /// First code of the rotating range (inclusive).
    pub const FIRST: u8 = 31;

    /// End of the rotating range (exclusive).
    pub const LAST: u8 = 37;

    /// The escape sequence that switches the terminal to this color.
    pub fn escape(self) -> String {
        format!("\u{1b}[{}m", self.0)
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cycles through `[ColorCode::FIRST, ColorCode::LAST)`.
///
/// The counter starts at `FIRST` and is advanced before being handed out, so
/// the first event is colored `FIRST + 1` and `FIRST` comes around on the
/// sixth call.
#[derive(Debug, Clone)]
pub struct ColorAllocator {
    current: u8,
}

impl ColorAllocator {
    pub fn new() -> Self {
        Self {
            current: ColorCode::FIRST,
        }
    }

    /// Advance the counter and return the new color.
    pub fn next_color(&mut self) -> ColorCode {
        self.current += 1;
        if self.current >= ColorCode::LAST {
            self.current = ColorCode::FIRST;
        }
        ColorCode(self.current)
    }

    /// Number of distinct colors handed out before the sequence repeats.
    pub fn period() -> usize {
        usize::from(ColorCode::LAST - ColorCode::FIRST)
    }
}

impl Default for ColorAllocator {
    fn default() -> Self {
        Self::new()
    }
}
