//! core-keymap: key-to-command bindings.
//!
//! - Pure and deterministic: resolution depends only on the key and the table.
//! - One key maps to at most one command; a later binding for the same key
//!   replaces the earlier one (logged at TRACE).
//! - Printable keys are matched case-insensitively: `R` and `r` resolve alike.
//! - Keys with no binding resolve to `None` and are ignored by the runtime.
//!
//! Overrides come from the `[keys]` config table as `command = "key"` pairs.
//! Rebinding a command first drops every key previously bound to it.

use core_events::{CommandEvent, KeyCode, KeyEvent, KeyModifiers};
use core_model::{Algorithm, SortDirection};
use smallvec::SmallVec;
use std::fmt;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeySpecError {
    #[error("empty key specification")]
    Empty,
    #[error("unknown key `{0}`")]
    UnknownKey(String),
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
}

// -------------------------------------------------------------------------------------------------
// Mapping Specification
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSpec {
    pub key: KeyEvent,
    pub command: CommandEvent,
}

impl MappingSpec {
    pub const fn new(key: KeyEvent, command: CommandEvent) -> Self {
        Self { key, command }
    }
}

impl fmt::Display for MappingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.key, self.command.as_str())
    }
}

/// Bindings shipped with the tool: the key letters shown in the help lines.
pub fn baseline_specs() -> Vec<MappingSpec> {
    let ch = |c| KeyEvent::plain(KeyCode::Char(c));
    vec![
        MappingSpec::new(ch('r'), CommandEvent::Reset),
        MappingSpec::new(ch(' '), CommandEvent::Start),
        MappingSpec::new(ch('a'), CommandEvent::SetDirection(SortDirection::Ascending)),
        MappingSpec::new(ch('d'), CommandEvent::SetDirection(SortDirection::Descending)),
        MappingSpec::new(ch('i'), CommandEvent::SelectAlgorithm(Algorithm::Insertion)),
        MappingSpec::new(ch('s'), CommandEvent::SelectAlgorithm(Algorithm::Selection)),
        MappingSpec::new(ch('b'), CommandEvent::SelectAlgorithm(Algorithm::Bubble)),
        MappingSpec::new(ch('m'), CommandEvent::SelectAlgorithm(Algorithm::Merge)),
        MappingSpec::new(ch('q'), CommandEvent::SelectAlgorithm(Algorithm::Quick)),
        MappingSpec::new(ch('h'), CommandEvent::SelectAlgorithm(Algorithm::Heap)),
        MappingSpec::new(KeyEvent::plain(KeyCode::Esc), CommandEvent::Quit),
    ]
}

/// Lowercase printable keys and drop the shift bit they implied.
pub fn normalize_key(key: KeyEvent) -> KeyEvent {
    match key.code {
        KeyCode::Char(c) => KeyEvent::new(
            KeyCode::Char(c.to_ascii_lowercase()),
            key.mods - KeyModifiers::SHIFT,
        ),
        _ => key,
    }
}

// -------------------------------------------------------------------------------------------------
// Keymap
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: SmallVec<[MappingSpec; 16]>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::build(baseline_specs())
    }
}

impl Keymap {
    pub fn build(specs: impl IntoIterator<Item = MappingSpec>) -> Self {
        let mut map = Keymap {
            bindings: SmallVec::new(),
        };
        for spec in specs {
            map.bind(spec.key, spec.command);
        }
        map
    }

    /// Bind `key` to `command`, replacing whatever the key did before.
    pub fn bind(&mut self, key: KeyEvent, command: CommandEvent) {
        let key = normalize_key(key);
        if let Some(existing) = self.bindings.iter_mut().find(|b| b.key == key) {
            trace!(
                target: "input.map",
                key = %key,
                from = existing.command.as_str(),
                to = command.as_str(),
                "binding_override"
            );
            existing.command = command;
        } else {
            self.bindings.push(MappingSpec::new(key, command));
        }
    }

    /// Drop every key bound to `command`.
    pub fn unbind_command(&mut self, command: CommandEvent) {
        self.bindings.retain(|b| b.command != command);
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<CommandEvent> {
        let key = normalize_key(*key);
        let hit = self
            .bindings
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.command);
        trace!(target: "input.map", key = %key, command = hit.map(|c| c.as_str()), "resolve");
        hit
    }

    /// Keys currently bound to `command`, in binding order.
    pub fn keys_for(&self, command: CommandEvent) -> Vec<KeyEvent> {
        self.bindings
            .iter()
            .filter(|b| b.command == command)
            .map(|b| b.key)
            .collect()
    }

    pub fn bindings(&self) -> &[MappingSpec] {
        &self.bindings
    }

    /// Apply `command = key` overrides. Valid entries are applied; invalid ones are skipped and
    /// returned so the caller can report them.
    pub fn apply_overrides<'a, I>(&mut self, overrides: I) -> Vec<KeySpecError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut errors = Vec::new();
        for (name, spec) in overrides {
            let parsed = parse_command(name).and_then(|cmd| Ok((cmd, parse_key_spec(spec)?)));
            match parsed {
                Ok((command, key)) => {
                    self.unbind_command(command);
                    self.bind(key, command);
                    debug!(
                        target: "input.map",
                        command = command.as_str(),
                        key = %key,
                        "binding_override_applied"
                    );
                }
                Err(err) => errors.push(err),
            }
        }
        errors
    }
}

// -------------------------------------------------------------------------------------------------
// Parsing
// -------------------------------------------------------------------------------------------------

/// Parse a command name as used in the `[keys]` table.
pub fn parse_command(name: &str) -> Result<CommandEvent, KeySpecError> {
    let wanted = name.trim().to_ascii_lowercase();
    let command = match wanted.as_str() {
        "reset" => CommandEvent::Reset,
        "start" => CommandEvent::Start,
        "ascending" => CommandEvent::SetDirection(SortDirection::Ascending),
        "descending" => CommandEvent::SetDirection(SortDirection::Descending),
        "quit" => CommandEvent::Quit,
        other => match other.parse::<Algorithm>() {
            Ok(algorithm) => CommandEvent::SelectAlgorithm(algorithm),
            Err(_) => return Err(KeySpecError::UnknownCommand(name.to_string())),
        },
    };
    Ok(command)
}

/// Parse a key specification: a single character, a named key (`space`, `esc`, `enter`, `tab`,
/// `backspace`, arrows), optionally prefixed by `C-` / `A-` / `S-` modifiers.
pub fn parse_key_spec(spec: &str) -> Result<KeyEvent, KeySpecError> {
    let mut rest = spec.trim();
    if rest.is_empty() {
        return Err(KeySpecError::Empty);
    }
    let mut mods = KeyModifiers::empty();
    // A lone "-" is the minus key, not a dangling modifier.
    while rest.len() > 2
        && let Some((prefix, tail)) = rest.split_once('-')
    {
        let m = match prefix.to_ascii_lowercase().as_str() {
            "c" | "ctrl" => KeyModifiers::CTRL,
            "a" | "alt" => KeyModifiers::ALT,
            "s" | "shift" => KeyModifiers::SHIFT,
            _ => return Err(KeySpecError::UnknownModifier(prefix.to_string())),
        };
        mods |= m;
        rest = tail;
    }

    let mut chars = rest.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(c), None) => KeyCode::Char(c),
        _ => match rest.to_ascii_lowercase().as_str() {
            "space" => KeyCode::Char(' '),
            "esc" | "escape" => KeyCode::Esc,
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            _ => return Err(KeySpecError::UnknownKey(rest.to_string())),
        },
    };
    Ok(normalize_key(KeyEvent::new(code, mods)))
}
