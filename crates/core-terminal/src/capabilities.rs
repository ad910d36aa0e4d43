//! Terminal color capability probing.
//!
//! Detection runs once at startup and only inspects the environment: terminals
//! that advertise 24-bit color set `COLORTERM=truecolor` (or `24bit`). Anything
//! else gets the 256-color palette, which every terminal crossterm supports.
//! Windows consoles since Windows 10 render truecolor regardless of the
//! variable.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    TrueColor,
    Ansi256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    pub color_depth: ColorDepth,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        let colorterm = std::env::var("COLORTERM").ok();
        let caps = Self::from_colorterm(colorterm.as_deref(), cfg!(windows));
        tracing::debug!(
            target: "runtime",
            colorterm = colorterm.as_deref(),
            depth = ?caps.color_depth,
            "terminal_capabilities"
        );
        caps
    }

    pub fn from_colorterm(colorterm: Option<&str>, is_windows: bool) -> Self {
        let truecolor = is_windows
            || colorterm
                .map(|v| {
                    let v = v.trim().to_ascii_lowercase();
                    v == "truecolor" || v == "24bit"
                })
                .unwrap_or(false);
        Self {
            color_depth: if truecolor {
                ColorDepth::TrueColor
            } else {
                ColorDepth::Ansi256
            },
        }
    }

    pub fn with_depth(color_depth: ColorDepth) -> Self {
        Self { color_depth }
    }

    pub fn supports_truecolor(&self) -> bool {
        self.color_depth == ColorDepth::TrueColor
    }
}
