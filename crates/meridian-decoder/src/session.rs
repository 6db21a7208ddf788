use std::cell::{Cell, RefCell};

use meridian_types::{BatchMeta, DecodeBatch};
use tracing::{debug, warn};

use crate::config::DecodeConfig;
use crate::error::{DecodeError, SessionError};

/// How a source's text is divided into decodable units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Framing {
  /// One record per `\n`-terminated line. A trailing `\r` is dropped and
  /// blank lines are ignored.
  Lines,

  /// The whole input is a single unit, decoded when the session finishes.
  Document,
}

/// Turns one framed unit of text into zero or more records.
///
/// Implementations are driven by [`StreamingDecodeSession`], which owns
/// the buffering, batching and lifecycle. A decoder only sees complete
/// units.
pub trait RecordDecoder {
  type Record;

  fn framing(&self) -> Framing;

  /// Decode one unit.
  ///
  /// # Errors
  ///
  /// Any [`DecodeError`]. The session skips the unit and continues.
  fn decode(&mut self, unit: &str) -> Result<Vec<Self::Record>, DecodeError>;

  /// Vertices contributed by `record` to [`BatchMeta::vertex_count`].
  fn vertex_count(&self, record: &Self::Record) -> usize;
}

/// Receives the output of a session.
pub trait BatchSink<R> {
  fn on_batch(&mut self, batch: DecodeBatch<R>);

  /// Called exactly once, after the final batch.
  fn on_complete(&mut self);
}

/// Lifecycle of a [`StreamingDecodeSession`].
///
/// ```text
///   Idle ──feed──▶ Accumulating ──threshold──▶ Flushing
///                       ▲                         │
///                       └─────────────────────────┘
///   Idle | Accumulating ──finish──▶ Completed
/// ```
///
/// `Flushing` is only observable from inside [`BatchSink::on_batch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
  Idle,
  Accumulating,
  Flushing,
  Completed,
}

/// Incremental decoder for a chunked text source.
///
/// Chunks may split a record anywhere, including inside a digit group.
/// The session keeps the unterminated tail of the last chunk and prepends
/// it to the next one, so the records produced are the same however the
/// input is chunked.
///
/// Decoded records collect in a pending batch. When the batch reaches the
/// flush threshold it is handed to the sink together with the running
/// [`BatchMeta`]. [`finish`](Self::finish) decodes whatever is left, emits
/// a last (possibly empty) batch and then signals completion.
///
/// Malformed units are logged at `warn` and skipped.
///
/// # Example
///
/// ```rust
/// use meridian_decoder::{BatchSink, DecodeConfig, PolylineDecoder, StreamingDecodeSession};
/// use meridian_types::{DecodeBatch, Feature};
///
/// #[derive(Default)]
/// struct Collect(Vec<Feature>, bool);
///
/// impl BatchSink<Feature> for Collect {
///     fn on_batch(&mut self, batch: DecodeBatch<Feature>) {
///         self.0.extend(batch.records);
///     }
///     fn on_complete(&mut self) {
///         self.1 = true;
///     }
/// }
///
/// let config = DecodeConfig::default();
/// let session = StreamingDecodeSession::new(PolylineDecoder::new(&config), config);
/// let mut sink = Collect::default();
/// session.feed_chunk("0AAAA", &mut sink).unwrap();
/// session.feed_chunk("AAAA\n", &mut sink).unwrap();
/// session.finish(&mut sink).unwrap();
/// assert_eq!(sink.0.len(), 1);
/// assert!(sink.1);
/// ```
pub struct StreamingDecodeSession<D: RecordDecoder> {
  state: Cell<SessionState>,
  inner: RefCell<Inner<D>>,
}

struct Inner<D: RecordDecoder> {
  decoder: D,
  threshold: usize,
  /// Unconsumed input: the partial last line, or the whole document.
  buffer: String,
  pending: Vec<D::Record>,
  meta: BatchMeta,
  units: usize,
  skipped: usize,
}

impl<D: RecordDecoder> StreamingDecodeSession<D> {
  #[must_use]
  pub fn new(decoder: D, config: DecodeConfig) -> Self {
    Self {
      state: Cell::new(SessionState::Idle),
      inner: RefCell::new(Inner {
        decoder,
        threshold: config.effective_threshold(),
        buffer: String::new(),
        pending: Vec::new(),
        meta: BatchMeta::default(),
        units: 0,
        skipped: 0,
      }),
    }
  }

  /// Append a chunk and decode every unit it completes.
  ///
  /// # Errors
  ///
  /// - [`SessionError::Closed`] after [`finish`](Self::finish).
  /// - [`SessionError::ConcurrentMutation`] when called from a sink
  ///   callback of this same session.
  pub fn feed_chunk(
    &self,
    chunk: &str,
    sink: &mut impl BatchSink<D::Record>,
  ) -> Result<(), SessionError> {
    let mut inner = self.enter()?;
    if self.state.get() == SessionState::Idle {
      self.state.set(SessionState::Accumulating);
    }

    let mut buffer = std::mem::take(&mut inner.buffer);
    buffer.push_str(chunk);
    let consumed = match inner.decoder.framing() {
      Framing::Lines => {
        let mut start = 0;
        while let Some(len) = buffer[start..].find('\n') {
          let end = start + len;
          inner.accept(&buffer[start..end], &self.state, sink);
          start = end + 1;
        }
        start
      }
      Framing::Document => 0,
    };
    buffer.drain(..consumed);
    inner.buffer = buffer;
    Ok(())
  }

  /// Decode the remaining input, emit the final batch and complete.
  ///
  /// The final batch is emitted even when empty so the consumer always
  /// receives the closing meta. Returns that meta.
  ///
  /// # Errors
  ///
  /// Same as [`feed_chunk`](Self::feed_chunk).
  pub fn finish(&self, sink: &mut impl BatchSink<D::Record>) -> Result<BatchMeta, SessionError> {
    let mut inner = self.enter()?;

    let rest = std::mem::take(&mut inner.buffer);
    inner.accept(&rest, &self.state, sink);
    inner.flush(&self.state, sink);

    self.state.set(SessionState::Completed);
    debug!(
      records = inner.meta.count,
      vertices = inner.meta.vertex_count,
      skipped = inner.skipped,
      "decode session complete"
    );
    sink.on_complete();
    Ok(inner.meta)
  }

  #[must_use]
  pub fn state(&self) -> SessionState {
    self.state.get()
  }

  /// Bytes buffered but not yet decoded. `None` while a batch is being
  /// emitted.
  #[must_use]
  pub fn pending_len(&self) -> Option<usize> {
    self.inner.try_borrow().ok().map(|inner| inner.buffer.len())
  }

  /// Running totals. `None` while a batch is being emitted.
  #[must_use]
  pub fn meta(&self) -> Option<BatchMeta> {
    self.inner.try_borrow().ok().map(|inner| inner.meta)
  }

  /// Units skipped as malformed. `None` while a batch is being emitted.
  #[must_use]
  pub fn skipped(&self) -> Option<usize> {
    self.inner.try_borrow().ok().map(|inner| inner.skipped)
  }

  fn enter(&self) -> Result<std::cell::RefMut<'_, Inner<D>>, SessionError> {
    let inner = self
      .inner
      .try_borrow_mut()
      .map_err(|_| SessionError::ConcurrentMutation)?;
    if self.state.get() == SessionState::Completed {
      return Err(SessionError::Closed);
    }
    Ok(inner)
  }
}

impl<D: RecordDecoder> Inner<D> {
  fn accept(
    &mut self,
    unit: &str,
    state: &Cell<SessionState>,
    sink: &mut impl BatchSink<D::Record>,
  ) {
    let unit = unit.strip_suffix('\r').unwrap_or(unit);
    if unit.is_empty() {
      return;
    }
    self.units += 1;

    let records = match self.decoder.decode(unit) {
      Ok(records) => records,
      Err(error) => {
        self.skipped += 1;
        warn!(unit = self.units, %error, "skipping malformed record");
        return;
      }
    };

    for record in records {
      self.meta.count += 1;
      self.meta.vertex_count += self.decoder.vertex_count(&record);
      self.pending.push(record);
      if self.pending.len() >= self.threshold {
        self.flush(state, sink);
      }
    }
  }

  fn flush(&mut self, state: &Cell<SessionState>, sink: &mut impl BatchSink<D::Record>) {
    let batch = DecodeBatch {
      records: std::mem::take(&mut self.pending),
      meta: self.meta,
    };
    debug!(len = batch.len(), total = batch.meta.count, "emitting batch");

    let previous = state.replace(SessionState::Flushing);
    sink.on_batch(batch);
    state.set(previous);
  }
}
