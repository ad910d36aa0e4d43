//! Event loop: routes input, commands and frame ticks into the driver and
//! repaints the board when something visible changed.

use anyhow::Result;
use core_actions::{AnimationDriver, TickOutcome};
use core_events::{
    CHANNEL_SEND_FAILURES, CommandEvent, Event, InputEvent, KEYPRESS_TOTAL, KeyEvent,
    TICKS_EMITTED,
};
use core_input::AsyncInputShutdown;
use core_keymap::Keymap;
use core_model::Viewport;
use core_render::{BoardView, Surface, TerminalSurface, compose};
use std::fmt;
use std::io::Write;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, trace, warn};

enum LoopControl {
    Continue { dirty: bool },
    Break { reason: ShutdownReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownReason {
    CtrlC,
    CommandQuit,
    ShutdownEvent,
    ChannelClosed,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::CtrlC => "ctrl_c",
            ShutdownReason::CommandQuit => "command_quit",
            ShutdownReason::ShutdownEvent => "shutdown_event",
            ShutdownReason::ChannelClosed => "channel_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

pub(crate) struct SortvisRuntime<W: Write> {
    driver: AnimationDriver,
    keymap: Keymap,
    surface: TerminalSurface<W>,
    rx: mpsc::Receiver<Event>,
    tx: Option<mpsc::Sender<Event>>,
    source_handles: Vec<JoinHandle<()>>,
    input_task: Option<JoinHandle<()>>,
    input_shutdown: Option<AsyncInputShutdown>,
    frames: u64,
    shutdown_reason: Option<ShutdownReason>,
}

impl<W: Write> SortvisRuntime<W> {
    pub(crate) fn new(
        driver: AnimationDriver,
        keymap: Keymap,
        surface: TerminalSurface<W>,
        tx: mpsc::Sender<Event>,
        rx: mpsc::Receiver<Event>,
    ) -> Self {
        Self {
            driver,
            keymap,
            surface,
            rx,
            tx: Some(tx),
            source_handles: Vec::new(),
            input_task: None,
            input_shutdown: None,
            frames: 0,
            shutdown_reason: None,
        }
    }

    pub(crate) fn with_input(
        mut self,
        input_task: JoinHandle<()>,
        input_shutdown: AsyncInputShutdown,
    ) -> Self {
        self.input_task = Some(input_task);
        self.input_shutdown = Some(input_shutdown);
        self
    }

    pub(crate) fn with_sources(mut self, handles: Vec<JoinHandle<()>>) -> Self {
        self.source_handles = handles;
        self
    }

    pub(crate) async fn run(&mut self) -> Result<()> {
        self.render();

        let loop_span = tracing::debug_span!(target: "runtime", "event_loop");
        let shutdown_reason = self.event_loop().instrument(loop_span).await;

        self.rx.close();
        self.finalize_shutdown(shutdown_reason).await;
        Ok(())
    }

    async fn event_loop(&mut self) -> ShutdownReason {
        let mut shutdown_reason = ShutdownReason::ChannelClosed;
        while let Some(event) = self.rx.recv().await {
            let control = match event {
                Event::Input(input) => self.handle_input_event(input),
                Event::Command(cmd) => self.handle_command(cmd),
                Event::Tick => self.handle_tick(),
                Event::Shutdown => LoopControl::Break {
                    reason: ShutdownReason::ShutdownEvent,
                },
            };

            match control {
                LoopControl::Break { reason } => {
                    shutdown_reason = reason;
                    break;
                }
                LoopControl::Continue { dirty: true } => self.render(),
                LoopControl::Continue { dirty: false } => {}
            }
        }
        shutdown_reason
    }

    fn handle_input_event(&mut self, input: InputEvent) -> LoopControl {
        match input {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::CtrlC => {
                info!(target: "runtime", "ctrl_c");
                LoopControl::Break {
                    reason: ShutdownReason::CtrlC,
                }
            }
            InputEvent::Resize(columns, rows) => self.handle_resize(columns, rows),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> LoopControl {
        match self.keymap.resolve(&key) {
            Some(cmd) => {
                trace!(target: "runtime", key = %key, command = cmd.as_str(), "key_resolved");
                self.handle_command(cmd)
            }
            None => {
                trace!(target: "runtime", key = %key, "key_unbound");
                LoopControl::Continue { dirty: false }
            }
        }
    }

    fn handle_command(&mut self, cmd: CommandEvent) -> LoopControl {
        let result = self.driver.dispatch(cmd);
        if result.quit {
            return LoopControl::Break {
                reason: ShutdownReason::CommandQuit,
            };
        }
        if result.array_replaced {
            self.surface.force_full();
        }
        LoopControl::Continue {
            dirty: result.dirty,
        }
    }

    fn handle_tick(&mut self) -> LoopControl {
        let outcome = self.driver.tick();
        if let TickOutcome::Finished { steps } = outcome {
            debug!(target: "runtime", steps, frames = self.frames, "run_complete");
        }
        LoopControl::Continue {
            dirty: outcome.is_dirty(),
        }
    }

    fn handle_resize(&mut self, columns: u16, rows: u16) -> LoopControl {
        debug!(target: "runtime", columns, rows, "resize");
        self.driver.resize(Viewport::new(columns, rows));
        self.surface.resize(columns, rows);
        LoopControl::Continue { dirty: true }
    }

    fn render(&mut self) {
        let palette = *self.surface.palette();
        compose(
            &mut self.surface,
            &BoardView::from_driver(&self.driver),
            &palette,
        );
        match self.surface.present() {
            Ok(()) => self.frames += 1,
            Err(e) => error!(target: "render.engine", ?e, "present_failed"),
        }
    }

    async fn finalize_shutdown(&mut self, reason: ShutdownReason) {
        log_shutdown_stage(reason, "begin");
        self.shutdown_reason = Some(reason);
        if let Some(tx) = self.tx.take() {
            trace!(
                target: "runtime.shutdown",
                reason = reason.as_str(),
                "dropping_runtime_sender"
            );
            drop(tx);
        }

        while let Some(handle) = self.source_handles.pop() {
            match tokio::time::timeout(Duration::from_millis(200), handle).await {
                Ok(Ok(_)) => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "event_source_task_stopped"
                ),
                Ok(Err(err)) if err.is_cancelled() => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "event_source_task_cancelled"
                ),
                Ok(Err(err)) => error!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    ?err,
                    "event_source_task_error"
                ),
                Err(_) => warn!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "event_source_task_timeout"
                ),
            }
        }

        if let Some(shutdown) = self.input_shutdown.take() {
            trace!(
                target: "runtime.shutdown",
                reason = reason.as_str(),
                "input_task_shutdown_signal"
            );
            shutdown.signal();
        }

        if let Some(handle) = self.input_task.take() {
            match handle.await {
                Ok(_) => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_joined"
                ),
                Err(err) if err.is_cancelled() => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_cancelled"
                ),
                Err(err) => error!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    ?err,
                    "input_task_join_failed"
                ),
            }
        }

        let render = self.surface.engine().metrics_snapshot();
        info!(
            target: "runtime.shutdown",
            frames = self.frames,
            steps = self.driver.steps(),
            keypresses = KEYPRESS_TOTAL.load(Ordering::Relaxed),
            ticks = TICKS_EMITTED.load(Ordering::Relaxed),
            send_failures = CHANNEL_SEND_FAILURES.load(Ordering::Relaxed),
            full_frames = render.full_frames,
            partial_frames = render.partial_frames,
            rows_skipped = render.rows_skipped,
            "runtime_summary"
        );
        log_shutdown_stage(reason, "complete");
    }
}
