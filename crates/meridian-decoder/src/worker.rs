use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use meridian_types::{BatchMeta, DecodeBatch};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::config::DecodeConfig;
use crate::error::SessionError;
use crate::session::{BatchSink, RecordDecoder, SessionState, StreamingDecodeSession};

/// Outbound message from a session worker.
///
/// ```text
///   {"action":"add","data":[…],"meta":{"count":…,"vertexCount":…}}   zero or more
///   {"action":"end"}                                                 exactly once
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum SessionMessage<R> {
    Add { data: Vec<R>, meta: BatchMeta },
    End,
}

/// Inbound command to a session worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Chunk(String),
    Finish,
}

/// Receiving side of a session's output.
pub type SessionEvents<R> = mpsc::UnboundedReceiver<SessionMessage<R>>;

#[derive(Debug, Default)]
struct Control {
    terminated: AtomicBool,
    done: AtomicBool,
}

impl Control {
    fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }
}

struct Entry {
    id: u64,
    control: Arc<Control>,
    abort: AbortHandle,
}

impl Entry {
    /// Neither terminated (by key or through its handle) nor finished.
    fn is_live(&self) -> bool {
        !self.control.is_terminated() && !self.control.done.load(Ordering::Acquire)
    }

    fn terminate(&self) {
        self.control.terminated.store(true, Ordering::Release);
        self.abort.abort();
    }
}

/// Forwards session output to the consumer channel. Once the session is
/// terminated every emit is dropped.
struct ChannelSink<R> {
    events: mpsc::UnboundedSender<SessionMessage<R>>,
    control: Arc<Control>,
}

impl<R> ChannelSink<R> {
    fn emit(&self, message: SessionMessage<R>) {
        if self.control.is_terminated() {
            return;
        }
        if self.events.send(message).is_err() {
            debug!("session consumer went away");
        }
    }
}

impl<R> BatchSink<R> for ChannelSink<R> {
    fn on_batch(&mut self, batch: DecodeBatch<R>) {
        self.emit(SessionMessage::Add {
            data: batch.records,
            meta: batch.meta,
        });
    }

    fn on_complete(&mut self) {
        self.emit(SessionMessage::End);
    }
}

/// Caller's end of a running session.
///
/// Commands are queued on an unbounded channel, so [`feed`](Self::feed)
/// never waits on the decoder. Dropping the handle without calling
/// [`finish`](Self::finish) stops the worker without an `end` message.
pub struct SessionHandle {
    key: String,
    id: u64,
    commands: mpsc::UnboundedSender<SessionCommand>,
    finished: AtomicBool,
    control: Arc<Control>,
    abort: AbortHandle,
}

impl SessionHandle {
    /// Queue a chunk of source text.
    ///
    /// # Errors
    ///
    /// [`SessionError::Closed`] after [`finish`](Self::finish),
    /// [`SessionError::WorkerGone`] once the session is terminated.
    pub fn feed(&self, chunk: impl Into<String>) -> Result<(), SessionError> {
        if self.finished.load(Ordering::Acquire) {
            return Err(SessionError::Closed);
        }
        self.send(SessionCommand::Chunk(chunk.into()))
    }

    /// Signal end of input. The worker emits its final batch and `end`.
    ///
    /// # Errors
    ///
    /// Same as [`feed`](Self::feed).
    pub fn finish(&self) -> Result<(), SessionError> {
        if self.finished.swap(true, Ordering::AcqRel) {
            return Err(SessionError::Closed);
        }
        self.send(SessionCommand::Finish)
    }

    /// Stop the worker. Anything it has not emitted yet is discarded.
    pub fn terminate(&self) {
        self.control.terminated.store(true, Ordering::Release);
        self.abort.abort();
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.control.is_terminated()
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        if self.control.is_terminated() {
            return Err(SessionError::WorkerGone);
        }
        self.commands
            .send(command)
            .map_err(|_| SessionError::WorkerGone)
    }
}

/// Registry of running decode sessions, at most one per source key.
///
/// Starting a session for a key that already has one terminates the old
/// session first. Lookup, termination and registration happen under one
/// lock, so two concurrent starts for the same key cannot both survive.
///
/// Must be used from inside a tokio runtime.
#[derive(Default)]
pub struct SessionManager {
    active: Mutex<HashMap<String, Entry>>,
    next_id: AtomicU64,
}

impl SessionManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a worker for `key` and return its handle and output stream.
    pub fn start<D>(
        &self,
        key: impl Into<String>,
        decoder: D,
        config: DecodeConfig,
    ) -> (SessionHandle, SessionEvents<D::Record>)
    where
        D: RecordDecoder + Send + 'static,
        D::Record: Send + 'static,
    {
        let key = key.into();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let control = Arc::new(Control::default());
        let sink = ChannelSink {
            events: event_tx,
            control: Arc::clone(&control),
        };

        let mut active = self.active.lock();
        prune(&mut active);
        if let Some(previous) = active.remove(&key) {
            previous.terminate();
            info!(key = %key, id = previous.id, "terminated previous session");
        }
        let task = tokio::spawn(run(id, decoder, config, command_rx, sink));
        let abort = task.abort_handle();
        active.insert(
            key.clone(),
            Entry {
                id,
                control: Arc::clone(&control),
                abort: abort.clone(),
            },
        );
        drop(active);
        debug!(key = %key, id, "started session");

        let handle = SessionHandle {
            key,
            id,
            commands: command_tx,
            finished: AtomicBool::new(false),
            control,
            abort,
        };
        (handle, event_rx)
    }

    /// Terminate the session registered for `key`. Returns `false` when
    /// there was none.
    pub fn terminate(&self, key: &str) -> bool {
        let mut active = self.active.lock();
        prune(&mut active);
        match active.remove(key) {
            Some(entry) => {
                entry.terminate();
                true
            }
            None => false,
        }
    }

    /// Whether `key` has a session that is still decoding.
    #[must_use]
    pub fn is_active(&self, key: &str) -> bool {
        let mut active = self.active.lock();
        prune(&mut active);
        active.contains_key(key)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        let mut active = self.active.lock();
        prune(&mut active);
        active.len()
    }
}

// Entries of finished or handle-terminated sessions linger until the next
// registry access.
fn prune(active: &mut HashMap<String, Entry>) {
    active.retain(|_, entry| entry.is_live());
}

async fn run<D: RecordDecoder>(
    id: u64,
    decoder: D,
    config: DecodeConfig,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    mut sink: ChannelSink<D::Record>,
) {
    let session = StreamingDecodeSession::new(decoder, config);
    while let Some(command) = commands.recv().await {
        let result = match command {
            SessionCommand::Chunk(text) => session.feed_chunk(&text, &mut sink),
            SessionCommand::Finish => session.finish(&mut sink).map(|meta| {
                info!(id, records = meta.count, vertices = meta.vertex_count, "session finished");
            }),
        };
        if let Err(error) = result {
            warn!(id, %error, "session stopped");
            break;
        }
        if session.state() == SessionState::Completed || sink.control.is_terminated() {
            break;
        }
    }
    sink.control.done.store(true, Ordering::Release);
}

/// Consumer-side accumulator for a session's messages.
///
/// Batches are appended in arrival order; nothing already received is
/// replaced.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamedData<R> {
    records: Vec<R>,
    meta: BatchMeta,
    complete: bool,
}

impl<R> StreamedData<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            meta: BatchMeta::default(),
            complete: false,
        }
    }

    /// Fold one message in. Returns `true` once `end` has been seen.
    pub fn apply(&mut self, message: SessionMessage<R>) -> bool {
        match message {
            SessionMessage::Add { data, meta } => {
                self.records.extend(data);
                self.meta = meta;
            }
            SessionMessage::End => self.complete = true,
        }
        self.complete
    }

    /// Drain `events` until `end` arrives or the worker goes away.
    pub async fn collect(events: &mut SessionEvents<R>) -> Self {
        let mut data = Self::new();
        while let Some(message) = events.recv().await {
            if data.apply(message) {
                break;
            }
        }
        data
    }

    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    #[must_use]
    pub fn meta(&self) -> BatchMeta {
        self.meta
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

impl<R> Default for StreamedData<R> {
    fn default() -> Self {
        Self::new()
    }
}
