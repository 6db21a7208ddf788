use serde::{Deserialize, Serialize};

/// One directed entry of a feature's flow row: net flow towards `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowLink {
  /// Positional index of the other feature in the same collection.
  pub target: usize,
  /// Signed net flow. Positive and negative directions are mirrored
  /// between the two features of a pair after symmetrization.
  pub flow: i64,
}

/// A feature's sparse adjacency row, kept as an ordered sequence.
///
/// Order is decode order, followed by mirrored entries in the order the
/// symmetrization pass appended them. Lookups are linear; rows are short
/// (tens of entries) in practice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowLinks {
  links: Vec<FlowLink>,
}

impl FlowLinks {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, target: usize, flow: i64) {
    self.links.push(FlowLink { target, flow });
  }

  /// Flow towards `target`, if this row has an entry for it. With
  /// repeated targets (only possible through [`push`](Self::push)) the
  /// first entry wins.
  #[must_use]
  pub fn get(&self, target: usize) -> Option<i64> {
    self.links.iter().find(|l| l.target == target).map(|l| l.flow)
  }

  #[must_use]
  pub fn contains(&self, target: usize) -> bool {
    self.get(target).is_some()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.links.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.links.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &FlowLink> {
    self.links.iter()
  }

  /// Sum of every flow in the row, saturating at the `i64` bounds.
  #[must_use]
  pub fn total(&self) -> i64 {
    self
      .links
      .iter()
      .fold(0i64, |sum, l| sum.saturating_add(l.flow))
  }
}

impl FromIterator<(usize, i64)> for FlowLinks {
  fn from_iter<I: IntoIterator<Item = (usize, i64)>>(iter: I) -> Self {
    Self {
      links: iter
        .into_iter()
        .map(|(target, flow)| FlowLink { target, flow })
        .collect(),
    }
  }
}

impl<'a> IntoIterator for &'a FlowLinks {
  type Item = &'a FlowLink;
  type IntoIter = std::slice::Iter<'a, FlowLink>;

  fn into_iter(self) -> Self::IntoIter {
    self.links.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn preserves_insertion_order() {
    let links: FlowLinks = [(9, 4), (2, -1), (5, 0)].into_iter().collect();
    let targets: Vec<usize> = links.iter().map(|l| l.target).collect();
    assert_eq!(targets, vec![9, 2, 5]);
  }

  #[test]
  fn lookup_and_total() {
    let mut links = FlowLinks::new();
    links.push(3, 10);
    links.push(7, -4);
    assert_eq!(links.get(7), Some(-4));
    assert_eq!(links.get(1), None);
    assert!(links.contains(3));
    assert_eq!(links.total(), 6);
  }

  #[test]
  fn total_saturates() {
    let links: FlowLinks = [(1, i64::MAX), (2, 1)].into_iter().collect();
    assert_eq!(links.total(), i64::MAX);
    let links: FlowLinks = [(1, i64::MIN), (2, -5)].into_iter().collect();
    assert_eq!(links.total(), i64::MIN);
  }

  #[test]
  fn serializes_as_ordered_pairs() {
    let links: FlowLinks = [(1, -2)].into_iter().collect();
    assert_eq!(
      serde_json::to_string(&links).unwrap(),
      r#"[{"target":1,"flow":-2}]"#
    );
  }
}
