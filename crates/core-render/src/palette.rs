//! Board colors and their terminal mapping.
//!
//! Idle bars cycle through three grays by index so neighbours stay
//! distinguishable; highlighted bars are green (settled) or red (active).
//! Terminals without truecolor get the nearest xterm-256 entry.

use crate::Rgb;
use core_sort::Highlight;
use core_terminal::{ColorDepth, TerminalCapabilities};
use crossterm::style::Color;

pub const GRAYS: [Rgb; 3] = [Rgb(128, 128, 128), Rgb(160, 160, 160), Rgb(192, 192, 192)];
pub const GREEN: Rgb = Rgb(0, 255, 0);
pub const RED: Rgb = Rgb(255, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub text: Rgb,
    pub title: Rgb,
    pub settled: Rgb,
    pub active: Rgb,
    pub bars: [Rgb; 3],
    pub depth: ColorDepth,
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_depth(ColorDepth::TrueColor)
    }
}

impl Palette {
    pub fn for_depth(depth: ColorDepth) -> Self {
        Self {
            background: Rgb::WHITE,
            text: Rgb::BLACK,
            title: GREEN,
            settled: GREEN,
            active: RED,
            bars: GRAYS,
            depth,
        }
    }

    pub fn from_capabilities(caps: &TerminalCapabilities) -> Self {
        Self::for_depth(caps.color_depth)
    }

    /// Color of the bar at `index` given its highlight in the current step.
    pub fn bar_color(&self, index: usize, highlight: Option<Highlight>) -> Rgb {
        match highlight {
            Some(Highlight::Settled) => self.settled,
            Some(Highlight::Active) => self.active,
            None => self.bars[index % self.bars.len()],
        }
    }

    pub fn terminal_color(&self, rgb: Rgb) -> Color {
        match self.depth {
            ColorDepth::TrueColor => Color::Rgb {
                r: rgb.0,
                g: rgb.1,
                b: rgb.2,
            },
            ColorDepth::Ansi256 => Color::AnsiValue(ansi256(rgb)),
        }
    }
}

/// Nearest xterm-256 index: the gray ramp for neutral colors, the 6x6x6
/// cube otherwise. Never returns one of the 16 user-themable entries.
pub fn ansi256(Rgb(r, g, b): Rgb) -> u8 {
    if r == g && g == b {
        return match r {
            0..8 => 16,
            249.. => 231,
            v => 232 + ((f32::from(v) - 8.0) / 247.0 * 24.0).round() as u8,
        };
    }
    let q = |v: u8| (f32::from(v) / 255.0 * 5.0).round() as u8;
    16 + 36 * q(r) + 6 * q(g) + q(b)
}
