//! Event types and async event sources for the sortvis runtime loop.

use core_model::{Algorithm, SortDirection};
use std::fmt;
use std::sync::atomic::AtomicU64;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

// -------------------------------------------------------------------------------------------------
// Channel Policy
// -------------------------------------------------------------------------------------------------
// The runtime consumes a single bounded mpsc channel sized by `EVENT_CHANNEL_CAP`. Producers (the
// async input task and the frame tick source) `send().await`, so a slow consumer parks them
// instead of growing memory. Frame ticks are the only high-rate producer; the tick source skips
// missed ticks, which keeps a stalled frame from turning into a burst of catch-up steps.
// -------------------------------------------------------------------------------------------------
pub const EVENT_CHANNEL_CAP: usize = 8192;

/// Default frame rate of the animation clock (ticks per second).
pub const DEFAULT_TICK_RATE: u32 = 120;

// -------------------------------------------------------------------------------------------------
// Telemetry
// -------------------------------------------------------------------------------------------------
// Relaxed atomic counters. Inspected by tests and summarized in the shutdown log.
// -------------------------------------------------------------------------------------------------
pub static CHANNEL_SEND_FAILURES: AtomicU64 = AtomicU64::new(0);
pub static KEYPRESS_TOTAL: AtomicU64 = AtomicU64::new(0); // key events forwarded by the input task
pub static TICKS_EMITTED: AtomicU64 = AtomicU64::new(0);
// Async input task lifecycle
pub static ASYNC_INPUT_STARTS: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_SIGNAL: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_CHANNEL: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_STREAM: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_ERROR: AtomicU64 = AtomicU64::new(0);

/// Top-level event enum consumed by the central event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(InputEvent),
    Command(CommandEvent),
    /// One frame of the animation clock.
    Tick,
    Shutdown,
}

/// Commands understood by the animation driver. Produced by the keymap from key events, or
/// injected directly (tests, startup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandEvent {
    /// Discard any running sort and load a freshly generated array.
    Reset,
    /// Begin animating the selected algorithm.
    Start,
    SetDirection(SortDirection),
    SelectAlgorithm(Algorithm),
    Quit,
}

impl CommandEvent {
    /// Stable name used in config files and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandEvent::Reset => "reset",
            CommandEvent::Start => "start",
            CommandEvent::SetDirection(SortDirection::Ascending) => "ascending",
            CommandEvent::SetDirection(SortDirection::Descending) => "descending",
            CommandEvent::SelectAlgorithm(a) => a.as_str(),
            CommandEvent::Quit => "quit",
        }
    }
}

/// Normalized input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key press (releases and repeats are filtered by the input task).
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
    /// Interrupt (Ctrl-C), surfaced distinctly so it quits regardless of bindings.
    CtrlC,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified key.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }
}

/// Logical keys the runtime distinguishes. Printable keys are normalized to lowercase by the
/// input task so bindings are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(KeyModifiers::CTRL) {
            f.write_str("C-")?;
        }
        if self.mods.contains(KeyModifiers::ALT) {
            f.write_str("A-")?;
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            f.write_str("S-")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Esc => f.write_str("esc"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::Up => f.write_str("up"),
            KeyCode::Down => f.write_str("down"),
            KeyCode::Left => f.write_str("left"),
            KeyCode::Right => f.write_str("right"),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Async Event Sources
// -------------------------------------------------------------------------------------------------

/// Trait implemented by any async event producer. Implementors hold their configuration and
/// spawn one background task that pushes `Event`s into the shared channel.
pub trait AsyncEventSource: Send + 'static {
    /// Stable identifier (used for logging).
    fn name(&self) -> &'static str;
    /// Consume self and spawn the background task. Implementors must stop when
    /// `tx.send(..).await` returns Err (channel closed) and must not busy loop.
    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()>;
}

/// Registry of event sources, spawned together at startup.
pub struct EventSourceRegistry {
    sources: Vec<Box<dyn AsyncEventSource>>,
}

impl Default for EventSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn register<S: AsyncEventSource>(&mut self, src: S) {
        self.sources.push(Box::new(src));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Spawn all registered sources, returning their JoinHandles. Each source receives its own
    /// clone of `tx`; the caller keeps the original.
    ///
    /// During shutdown the caller drops its last `Sender` before awaiting the handles so the
    /// sources observe the closed channel and exit.
    pub fn spawn_all(&mut self, tx: &Sender<Event>) -> Vec<JoinHandle<()>> {
        // Drain so a second call spawns nothing.
        let mut out = Vec::with_capacity(self.sources.len());
        for src in self.sources.drain(..) {
            let name = src.name();
            tracing::info!(target: "runtime.events", source = name, "spawning event source");
            out.push(src.spawn(tx.clone()));
        }
        out
    }
}

/// Animation clock. Emits `Event::Tick` every interval; ticks missed while the consumer was
/// busy are skipped, not replayed.
#[derive(Debug, Clone, Copy)]
pub struct TickEventSource {
    interval: Duration,
}

impl TickEventSource {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Clock running at `rate` ticks per second (a rate of zero is treated as one).
    pub fn per_second(rate: u32) -> Self {
        Self::new(Duration::from_secs(1) / rate.max(1))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl AsyncEventSource for TickEventSource {
    fn name(&self) -> &'static str {
        "tick"
    }

    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
        let dur = self.interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(dur);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(Event::Tick).await.is_err() {
                    break;
                }
                TICKS_EMITTED.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_display() {
        let k = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CTRL);
        assert_eq!(k.to_string(), "C-c");
        assert_eq!(KeyEvent::plain(KeyCode::Char(' ')).to_string(), "space");
        assert_eq!(KeyEvent::plain(KeyCode::Esc).to_string(), "esc");
    }

    #[test]
    fn command_names() {
        assert_eq!(CommandEvent::Start.as_str(), "start");
        assert_eq!(
            CommandEvent::SetDirection(SortDirection::Descending).as_str(),
            "descending"
        );
        assert_eq!(
            CommandEvent::SelectAlgorithm(Algorithm::Heap).as_str(),
            "heap"
        );
    }

    #[test]
    fn tick_rate_to_interval() {
        assert_eq!(
            TickEventSource::per_second(4).interval(),
            Duration::from_millis(250)
        );
        assert_eq!(
            TickEventSource::per_second(0).interval(),
            Duration::from_secs(1)
        );
    }
}
