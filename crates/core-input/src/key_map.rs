use core_events::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

/// Translate a crossterm key event into a runtime key press.
///
/// Returns `None` for releases, auto-repeats and keys the visualizer has no
/// use for (function keys, media keys, lone modifiers). Printable characters
/// are lowercased so `R` and `r` resolve to the same binding.
pub fn map_key_event(event: &CKeyEvent) -> Option<KeyEvent> {
    if event.kind != CKeyEventKind::Press {
        return None;
    }
    let code = map_key_code(&event.code)?;
    Some(KeyEvent::new(code, map_mods(event.modifiers)))
}

fn map_key_code(code: &CKeyCode) -> Option<KeyCode> {
    let code = match code {
        CKeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab | CKeyCode::BackTab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        _ => return None,
    };
    Some(code)
}

pub(crate) fn map_mods(m: CKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CKeyModifiers::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CKeyModifiers::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CKeyModifiers::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: CKeyCode, mods: CKeyModifiers, kind: CKeyEventKind) -> CKeyEvent {
        CKeyEvent {
            code,
            modifiers: mods,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn press_maps_and_lowercases() {
        let ev = key(CKeyCode::Char('R'), CKeyModifiers::SHIFT, CKeyEventKind::Press);
        assert_eq!(
            map_key_event(&ev),
            Some(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::SHIFT))
        );
        let ev = key(CKeyCode::Char(' '), CKeyModifiers::NONE, CKeyEventKind::Press);
        assert_eq!(map_key_event(&ev), Some(KeyEvent::plain(KeyCode::Char(' '))));
    }

    #[test]
    fn release_and_repeat_are_dropped() {
        let ev = key(CKeyCode::Char('b'), CKeyModifiers::NONE, CKeyEventKind::Release);
        assert_eq!(map_key_event(&ev), None);
        let ev = key(CKeyCode::Char('b'), CKeyModifiers::NONE, CKeyEventKind::Repeat);
        assert_eq!(map_key_event(&ev), None);
    }

    #[test]
    fn unsupported_keys_are_dropped() {
        let ev = key(CKeyCode::F(5), CKeyModifiers::NONE, CKeyEventKind::Press);
        assert_eq!(map_key_event(&ev), None);
        let ev = key(CKeyCode::BackTab, CKeyModifiers::SHIFT, CKeyEventKind::Press);
        assert_eq!(
            map_key_event(&ev),
            Some(KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT))
        );
    }

    #[test]
    fn modifier_bits_translate() {
        let m = map_mods(CKeyModifiers::CONTROL | CKeyModifiers::ALT);
        assert_eq!(m, KeyModifiers::CTRL | KeyModifiers::ALT);
    }
}
