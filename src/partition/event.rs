use ordered_float::OrderedFloat;

use crate::pattern::Pattern;

slotmap::new_key_type! {
    /// Identifies a live pattern in the partition engine's working set.
    pub struct PatternId;
}

/// A candidate merge of two currently-live patterns, ordered in the
/// priority queue by ascending scheduled time (soonest-to-merge first).
///
/// Mirrors the lazy two-phase `PossibleMergeEvent` of
/// `partition_algorithm.cpp`: an event is first pushed with `final: false`
/// and `time` equal to the candidate's own cover radius (no delay yet);
/// when popped, its delay is computed once against the *current* state,
/// added to `time`, and the event is re-pushed as final. `base_time` keeps
/// the pre-delay cover radius around for `spec.md` §8 property 3
/// (cover-radius monotonicity).
#[derive(Debug, Clone)]
pub struct MergeEvent {
    pub a: PatternId,
    pub b: PatternId,
    pub result: Pattern,
    pub base_time: f64,
    pub time: f64,
    pub is_final: bool,
}

impl MergeEvent {
    #[must_use]
    pub fn new(a: PatternId, b: PatternId, result: Pattern, base_time: f64, time: f64, is_final: bool) -> Self {
        Self {
            a,
            b,
            result,
            base_time,
            time,
            is_final,
        }
    }

    fn sort_key(&self) -> OrderedFloat<f64> {
        OrderedFloat(self.time)
    }
}

impl PartialEq for MergeEvent {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}
impl Eq for MergeEvent {}

impl PartialOrd for MergeEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MergeEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed so a `BinaryHeap<MergeEvent>` behaves as a min-heap.
        other.sort_key().cmp(&self.sort_key())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pattern::{CatPoint, SinglePoint};
    use slotmap::SlotMap;

    fn single(x: f64) -> Pattern {
        Pattern::SinglePoint(SinglePoint::new(CatPoint::from_f64(0, x, 0.0)))
    }

    #[test]
    fn binary_heap_pops_smallest_time_first() {
        let mut ids: SlotMap<PatternId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let b = ids.insert(());
        let c = ids.insert(());
        let mut heap = std::collections::BinaryHeap::new();
        heap.push(MergeEvent::new(a, b, single(0.0), 5.0, 5.0, true));
        heap.push(MergeEvent::new(b, c, single(1.0), 1.0, 1.0, true));
        heap.push(MergeEvent::new(a, c, single(2.0), 3.0, 3.0, true));
        assert!((heap.pop().unwrap().time - 1.0).abs() < 1e-12);
        assert!((heap.pop().unwrap().time - 3.0).abs() < 1e-12);
        assert!((heap.pop().unwrap().time - 5.0).abs() < 1e-12);
    }
}
