use crate::key_map::map_key_event;
use core_events::{
    ASYNC_INPUT_STARTS, ASYNC_INPUT_STOP_CHANNEL, ASYNC_INPUT_STOP_ERROR, ASYNC_INPUT_STOP_SIGNAL,
    ASYNC_INPUT_STOP_STREAM, CHANNEL_SEND_FAILURES, Event, InputEvent, KEYPRESS_TOTAL, KeyEvent,
};
use crossterm::event::{
    Event as CEvent, EventStream, KeyCode as CKeyCode, KeyEvent as CKeyEvent,
    KeyEventKind as CKind, KeyModifiers as CMods,
};
use std::io;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::sync::{Notify, mpsc::Sender};
use tokio::task;
use tokio_stream::StreamExt;
use tracing::{Instrument, info, trace, warn};

#[derive(Clone, Debug)]
pub struct AsyncInputShutdown {
    notify: Arc<Notify>,
}

impl AsyncInputShutdown {
    pub fn signal(&self) {
        self.notify.notify_one();
    }
}

#[derive(Clone, Debug)]
struct ShutdownListener {
    notify: Arc<Notify>,
}

impl ShutdownListener {
    fn new_pair() -> (AsyncInputShutdown, Self) {
        let notify = Arc::new(Notify::new());
        (
            AsyncInputShutdown {
                notify: notify.clone(),
            },
            ShutdownListener { notify },
        )
    }

    async fn wait(&self) {
        self.notify.notified().await;
    }
}

/// Spawn a Tokio task forwarding terminal events from `EventStream`.
pub(crate) fn spawn_async_event_task(
    sender: Sender<Event>,
) -> (task::JoinHandle<()>, AsyncInputShutdown) {
    let (shutdown, listener) = ShutdownListener::new_pair();
    let span = tracing::debug_span!(target: "input.thread", "input_async_task");
    let handle = task::spawn(
        AsyncEventStreamTask::new(sender, EventStream::new(), listener)
            .run()
            .instrument(span),
    );
    (handle, shutdown)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExitReason {
    ShutdownSignal,
    ChannelClosed,
    StreamEnded,
    StreamError,
}

impl ExitReason {
    fn as_str(&self) -> &'static str {
        match self {
            ExitReason::ShutdownSignal => "shutdown_signal",
            ExitReason::ChannelClosed => "channel_closed",
            ExitReason::StreamEnded => "stream_ended",
            ExitReason::StreamError => "stream_error",
        }
    }
}

struct AsyncEventStreamTask<S>
where
    S: tokio_stream::Stream<Item = io::Result<CEvent>> + Send + Unpin + 'static,
{
    sender: Sender<Event>,
    stream: S,
    shutdown: ShutdownListener,
    exit_reason: ExitReason,
    stream_error: Option<io::ErrorKind>,
}

impl<S> AsyncEventStreamTask<S>
where
    S: tokio_stream::Stream<Item = io::Result<CEvent>> + Send + Unpin + 'static,
{
    fn new(sender: Sender<Event>, stream: S, shutdown: ShutdownListener) -> Self {
        Self {
            sender,
            stream,
            shutdown,
            exit_reason: ExitReason::StreamEnded,
            stream_error: None,
        }
    }

    async fn run(mut self) {
        info!(target: "input.thread", "async_input_task_started");
        ASYNC_INPUT_STARTS.fetch_add(1, Ordering::Relaxed);
        loop {
            let maybe_result = tokio::select! {
                biased;
                _ = self.shutdown.wait() => {
                    self.exit_reason = ExitReason::ShutdownSignal;
                    break;
                }
                result = self.stream.next() => result,
            };

            let Some(result) = maybe_result else {
                break;
            };

            let keep_going = match result {
                Ok(CEvent::Key(key)) => self.handle_key_event(key).await,
                Ok(CEvent::Resize(w, h)) => {
                    trace!(target: "input.event", w, h, "resize");
                    self.send_event(Event::Input(InputEvent::Resize(w, h)))
                        .await
                }
                Ok(_) => true,
                Err(err) => {
                    self.exit_reason = ExitReason::StreamError;
                    self.stream_error = Some(err.kind());
                    false
                }
            };
            if !keep_going {
                break;
            }
        }

        let counter = match self.exit_reason {
            ExitReason::ShutdownSignal => &ASYNC_INPUT_STOP_SIGNAL,
            ExitReason::ChannelClosed => &ASYNC_INPUT_STOP_CHANNEL,
            ExitReason::StreamEnded => &ASYNC_INPUT_STOP_STREAM,
            ExitReason::StreamError => &ASYNC_INPUT_STOP_ERROR,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        // Without input the loop can never quit; ask it to stop.
        if matches!(
            self.exit_reason,
            ExitReason::StreamEnded | ExitReason::StreamError
        ) && self.sender.try_send(Event::Shutdown).is_err()
        {
            CHANNEL_SEND_FAILURES.fetch_add(1, Ordering::Relaxed);
        }

        if self.exit_reason == ExitReason::StreamError {
            warn!(
                target: "input.thread",
                error_kind = ?self.stream_error,
                "async_input_task_stream_error"
            );
        }
        info!(
            target: "input.thread",
            reason = self.exit_reason.as_str(),
            "async_input_task_stopped"
        );
    }

    async fn handle_key_event(&mut self, key: CKeyEvent) -> bool {
        if key.kind != CKind::Press {
            return true;
        }

        if matches!(key.code, CKeyCode::Char('c' | 'C')) && key.modifiers.contains(CMods::CONTROL)
        {
            trace!(target: "input.event", kind = "ctrl_c");
            return self.send_event(Event::Input(InputEvent::CtrlC)).await;
        }

        match map_key_event(&key) {
            Some(mapped) => self.emit_keypress(mapped).await,
            None => true,
        }
    }

    async fn emit_keypress(&mut self, key: KeyEvent) -> bool {
        trace!(target: "input.event", kind = "keypress", key = %key);
        let sent = self.send_event(Event::Input(InputEvent::Key(key))).await;
        if sent {
            KEYPRESS_TOTAL.fetch_add(1, Ordering::Relaxed);
        }
        sent
    }

    async fn send_event(&mut self, event: Event) -> bool {
        match self.sender.send(event).await {
            Ok(_) => true,
            Err(_) => {
                CHANNEL_SEND_FAILURES.fetch_add(1, Ordering::Relaxed);
                self.exit_reason = ExitReason::ChannelClosed;
                false
            }
        }
    }
}
