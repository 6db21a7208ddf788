use serde::{Deserialize, Serialize};

/// Running totals for one decode session, attached to every batch.
///
/// Both counters cover every record emitted so far *including* the batch
/// they travel with, so the last batch's meta is the session total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMeta {
  pub count: usize,
  pub vertex_count: usize,
}

/// A run of decoded records handed from a session to its consumer.
///
/// Batches are created, filled to the flush threshold, emitted and
/// dropped by the session. Once emitted the consumer owns the records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecodeBatch<R> {
  pub records: Vec<R>,
  pub meta: BatchMeta,
}

impl<R> DecodeBatch<R> {
  #[must_use]
  pub fn len(&self) -> usize {
    self.records.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
}
