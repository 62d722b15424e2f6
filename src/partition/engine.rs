//! Greedy, priority-queue-driven partition engine.
//!
//! Grounded on `partition()` in `partition_algorithm.cpp`: starts from one
//! [`SinglePoint`] per input point, then repeatedly commits the
//! cheapest-to-merge admissible pair of same-category patterns (a
//! [`Matching`], [`Bank`] or [`Island`]) until no candidate merge remains
//! under `max_time`. Every committed merge is lazily re-priced once (the
//! `PossibleMergeEvent::final` two-phase scheme) so the priority queue never
//! has to eagerly compute every candidate's intersection delay up front.

use std::collections::BinaryHeap;

use slotmap::SlotMap;

use crate::kernel::Point2;
use crate::pattern::{Bank, CatPoint, Island, Matching, Partition, Pattern, SinglePoint};
use crate::partition::delay::{intersection_delay, regularity_delay};
use crate::partition::event::{MergeEvent, PatternId};
use crate::partition::geom::{contours_intersect, distance_point_to_segment, distance_to_contour};
use crate::settings::{GeneralSettings, PartitionSettings};

/// Tie-breaking slack subtracted from a "too close" comparison, matching
/// `M_EPSILON` in `partition_algorithm.cpp`.
const EPSILON: f64 = 1e-9;

/// The sequence of partitions produced by a run, each paired with the time
/// it was committed at. Mirrors the `vector<pair<Number<Inexact>,
/// Partition>>` `partition()` returns; `entries[0]` is always `(0.0, <all
/// singletons>)`, matching `spec.md` §8 Testable Property 1 (the starting
/// partition has one pattern per point).
#[derive(Debug, Clone)]
pub struct PartitionHistory {
    pub entries: Vec<(f64, Partition)>,
}

impl PartitionHistory {
    /// The most-merged partition reached before `max_time` was exhausted.
    #[must_use]
    pub fn latest(&self) -> &Partition {
        &self.entries[self.entries.len() - 1].1
    }

    /// The partition at the largest recorded time `<= cover * dilation_radius`,
    /// matching `spec.md` §6's `cover` project-configuration key. Falls back to
    /// the first entry (the initial singletons) if `cover` precedes every
    /// recorded time.
    #[must_use]
    pub fn at_cover(&self, cover: f64, dilation_radius: f64) -> &Partition {
        let threshold = cover * dilation_radius;
        self.entries
            .iter()
            .rev()
            .find(|(t, _)| *t <= threshold)
            .map_or(&self.entries[0].1, |(_, p)| p)
    }
}

/// Runs the partition engine to completion (or until `max_time`), returning
/// every committed partition along the way.
///
/// `points` holds every category-point in the input, not just one
/// category's; candidate merges are only ever proposed between two patterns
/// of the same category, but the admissibility filter checks proximity
/// against *every* point regardless of category, matching the original's
/// single undivided `points` parameter.
#[must_use]
pub fn run(points: &[CatPoint], general: &GeneralSettings, settings: &PartitionSettings, max_time: f64) -> PartitionHistory {
    let dilation_radius = general.dilation_radius();

    let mut live: SlotMap<PatternId, Pattern> = SlotMap::with_key();
    for p in points {
        live.insert(Pattern::SinglePoint(SinglePoint::new(p.clone())));
    }

    let mut history = vec![(0.0_f64, Partition::new(live.values().cloned().collect()))];

    let mut events: BinaryHeap<MergeEvent> = BinaryHeap::new();
    seed_matching_events(&live, points, general, settings, max_time, &mut events);

    while let Some(event) = events.pop() {
        if event.time > max_time {
            break;
        }

        if !event.is_final {
            let Some(a) = live.get(event.a) else { continue };
            let Some(b) = live.get(event.b) else { continue };
            let delay = if settings.intersection_delay {
                match (a.dilate(dilation_radius), b.dilate(dilation_radius), event.result.dilate(dilation_radius)) {
                    (Ok(a_poly), Ok(b_poly), Ok(result_poly)) => {
                        let result_points = event.result.points();
                        let result_contour = event.result.contour();
                        let nearby: Vec<Point2> = points
                            .iter()
                            .filter(|pt| !result_points.iter().any(|rp| *rp == *pt))
                            .filter(|pt| distance_to_contour(&result_contour, pt.approx()) < 2.0 * dilation_radius)
                            .map(CatPoint::approx)
                            .collect();
                        intersection_delay(&result_poly, &a_poly, &b_poly, &nearby, dilation_radius)
                    }
                    _ => 0.0,
                }
            } else {
                0.0
            };
            let mut reprised = event;
            reprised.time += delay;
            reprised.is_final = true;
            events.push(reprised);
            continue;
        }

        if !live.contains_key(event.a) || !live.contains_key(event.b) {
            continue;
        }

        let new_contour = event.result.contour();
        let mut blocked = false;
        for (id, pattern) in &live {
            if id == event.a || id == event.b {
                continue;
            }
            if contours_intersect(&pattern.contour(), &new_contour) {
                blocked = true;
                break;
            }
        }
        if blocked {
            continue;
        }

        let result_points = event.result.points();
        let admissible_distance = settings.admissible_radius_factor * dilation_radius;
        let too_close = points.iter().any(|pt| {
            if result_points.iter().any(|rp| *rp == pt) {
                return false;
            }
            let poly_pt_dist = distance_to_contour(&new_contour, pt.approx());
            let point_pt_dist = result_points
                .iter()
                .map(|rp| nalgebra::distance(&rp.approx(), &pt.approx()))
                .fold(f64::INFINITY, f64::min);
            poly_pt_dist < admissible_distance && poly_pt_dist < point_pt_dist
        });
        if too_close {
            continue;
        }

        live.remove(event.a);
        live.remove(event.b);
        let result_id = live.insert(event.result.clone());
        history.push((event.time, Partition::new(live.values().cloned().collect())));

        generate_merge_events(&live, result_id, &event.result, general, settings, max_time, &mut events);
    }

    PartitionHistory { entries: history }
}

/// Seeds the priority queue with every admissible `SinglePoint`--`SinglePoint`
/// matching, mirroring the initial double loop in `partition()`.
fn seed_matching_events(
    live: &SlotMap<PatternId, Pattern>,
    points: &[CatPoint],
    general: &GeneralSettings,
    settings: &PartitionSettings,
    max_time: f64,
    events: &mut BinaryHeap<MergeEvent>,
) {
    let dilation_radius = general.dilation_radius();
    let ids: Vec<PatternId> = live.keys().collect();
    for i in 0..ids.len() {
        let Pattern::SinglePoint(p) = &live[ids[i]] else { continue };
        for &id_j in &ids[(i + 1)..] {
            let Pattern::SinglePoint(q) = &live[id_j] else { continue };
            if p.category() != q.category() {
                continue;
            }
            let (pa, qa) = (p.point.approx(), q.point.approx());
            if nalgebra::distance(&pa, &qa) > 2.0 * max_time {
                continue;
            }

            let admissible_distance = settings.admissible_radius_factor * dilation_radius;
            let too_close = points.iter().any(|pt| {
                if *pt == p.point || *pt == q.point {
                    return false;
                }
                let d = distance_point_to_segment(pt.approx(), pa, qa);
                let nearest_source = nalgebra::distance(&pa, &pt.approx()).min(nalgebra::distance(&qa, &pt.approx()));
                d < admissible_distance && d < nearest_source - EPSILON
            });
            if too_close {
                continue;
            }

            let matching = Pattern::Matching(Matching::new(p.point.clone(), q.point.clone()));
            let cover = matching.cover_radius();
            events.push(MergeEvent::new(ids[i], id_j, matching, cover, cover, false));
        }
    }
}

/// After committing `result` (now living at `result_id`), proposes new
/// Island and Bank merges between it and every other same-category pattern
/// still live, mirroring the event-generation block at the end of
/// `partition()`'s main loop.
fn generate_merge_events(
    live: &SlotMap<PatternId, Pattern>,
    result_id: PatternId,
    result: &Pattern,
    general: &GeneralSettings,
    settings: &PartitionSettings,
    max_time: f64,
    events: &mut BinaryHeap<MergeEvent>,
) {
    let result_points = result.points();
    for (other_id, other) in live {
        if other_id == result_id || other.category() != result.category() {
            continue;
        }

        if settings.islands {
            let min_dist = other
                .points()
                .iter()
                .flat_map(|p| result_points.iter().map(|q| nalgebra::distance(&p.approx(), &q.approx())))
                .fold(f64::INFINITY, f64::min);
            if min_dist <= 2.0 * max_time {
                let mut merged: Vec<CatPoint> = result_points.iter().map(|p| (**p).clone()).collect();
                merged.extend(other.points().into_iter().cloned());
                let island = Pattern::Island(Island::new(merged));
                let reg_delay = if settings.regularity_delay {
                    regularity_delay(island.cover_radius(), other.cover_radius(), result.cover_radius())
                } else {
                    0.0
                };
                let event_time = island.cover_radius() + reg_delay;
                if event_time <= max_time {
                    events.push(MergeEvent::new(result_id, other_id, island, event_time, event_time, false));
                }
            }
        }

        if settings.banks {
            if let (Some(other_pts), Some(result_pts)) = (bank_points_of(other), bank_points_of(result)) {
                for combined in bank_orderings(&other_pts, &result_pts) {
                    let bank = Bank::new(combined);
                    if !bank.is_valid(general.inflection_limit, general.max_bend_angle, general.max_turn_angle) {
                        continue;
                    }
                    let cover = bank.cover_radius();
                    let reg_delay = if settings.regularity_delay {
                        regularity_delay(cover, result.cover_radius(), other.cover_radius())
                    } else {
                        0.0
                    };
                    let event_time = cover + reg_delay;
                    if event_time <= max_time {
                        events.push(MergeEvent::new(result_id, other_id, Pattern::Bank(bank), event_time, event_time, false));
                    }
                }
            }
        }
    }
}

/// The ordered points a pattern contributes to a bank merge, or `None` if it
/// can't participate as one. Mirrors `to_bank_or_island`: a genuine
/// (non-degenerate-by-construction) `Island` never contributes, since the
/// original keeps it as an `Island` variant rather than converting it.
fn bank_points_of(pattern: &Pattern) -> Option<Vec<CatPoint>> {
    match pattern {
        Pattern::SinglePoint(p) => Some(vec![p.point.clone()]),
        Pattern::Matching(p) => Some(p.points.to_vec()),
        Pattern::Bank(p) => Some(p.points.clone()),
        Pattern::Island(_) => None,
    }
}

/// The four ways to concatenate two point chains end-to-end, matching the
/// `b1`..`b4` candidates built in `partition_algorithm.cpp`: forward+forward,
/// forward+reversed, reversed+reversed, reversed+forward.
fn bank_orderings(a: &[CatPoint], b: &[CatPoint]) -> [Vec<CatPoint>; 4] {
    let concat = |rev_a: bool, rev_b: bool| -> Vec<CatPoint> {
        let mut out = Vec::with_capacity(a.len() + b.len());
        if rev_a {
            out.extend(a.iter().rev().cloned());
        } else {
            out.extend(a.iter().cloned());
        }
        if rev_b {
            out.extend(b.iter().rev().cloned());
        } else {
            out.extend(b.iter().cloned());
        }
        out
    };
    [concat(false, false), concat(false, true), concat(true, true), concat(true, false)]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn general() -> GeneralSettings {
        GeneralSettings {
            point_size: 0.1,
            inflection_limit: 1,
            max_bend_angle: 1.2,
            max_turn_angle: 2.5,
        }
    }

    fn settings() -> PartitionSettings {
        PartitionSettings {
            banks: true,
            islands: true,
            regularity_delay: true,
            intersection_delay: true,
            admissible_radius_factor: 1.0,
        }
    }

    #[test]
    fn history_starts_with_one_pattern_per_point() {
        let points = vec![CatPoint::from_f64(0, 0.0, 0.0), CatPoint::from_f64(0, 5.0, 0.0)];
        let history = run(&points, &general(), &settings(), 10.0);
        assert_eq!(history.entries[0].0, 0.0);
        assert_eq!(history.entries[0].1.patterns.len(), 2);
    }

    #[test]
    fn two_nearby_points_merge_into_matching() {
        let points = vec![CatPoint::from_f64(0, 0.0, 0.0), CatPoint::from_f64(0, 0.5, 0.0)];
        let history = run(&points, &general(), &settings(), 10.0);
        let latest = history.latest();
        assert_eq!(latest.point_count(), 2);
        assert_eq!(latest.patterns.len(), 1);
        assert!(matches!(latest.patterns[0], Pattern::Matching(_)));
    }

    #[test]
    fn different_categories_never_merge() {
        let points = vec![CatPoint::from_f64(0, 0.0, 0.0), CatPoint::from_f64(1, 0.1, 0.0)];
        let history = run(&points, &general(), &settings(), 10.0);
        assert_eq!(history.latest().patterns.len(), 2);
    }

    #[test]
    fn far_apart_points_stay_as_single_points() {
        let points = vec![CatPoint::from_f64(0, 0.0, 0.0), CatPoint::from_f64(0, 100.0, 100.0)];
        let history = run(&points, &general(), &settings(), 1.0);
        assert_eq!(history.latest().patterns.len(), 2);
    }

    #[test]
    fn zero_max_time_only_yields_the_initial_singletons() {
        let points = vec![CatPoint::from_f64(0, 0.0, 0.0), CatPoint::from_f64(0, 0.1, 0.0)];
        let history = run(&points, &general(), &settings(), 0.0);
        assert_eq!(history.entries.len(), 1);
        assert_eq!(history.latest().patterns.len(), 2);
    }

    #[test]
    fn collinear_chain_merges_beyond_singletons() {
        let points = vec![
            CatPoint::from_f64(0, 0.0, 0.0),
            CatPoint::from_f64(0, 1.0, 0.0),
            CatPoint::from_f64(0, 2.0, 0.0),
            CatPoint::from_f64(0, 3.0, 0.0),
        ];
        let history = run(&points, &general(), &settings(), 10.0);
        let latest = history.latest();
        assert_eq!(latest.point_count(), 4);
        assert!(latest.patterns.len() < 4, "expected at least one merge, got {:?}", latest.patterns.len());
        assert!(latest.patterns.iter().any(|p| !matches!(p, Pattern::SinglePoint(_))));
    }

    #[test]
    fn at_cover_selects_largest_time_not_exceeding_threshold() {
        let points = vec![CatPoint::from_f64(0, 0.0, 0.0), CatPoint::from_f64(0, 0.5, 0.0)];
        let history = run(&points, &general(), &settings(), 10.0);
        assert!(history.entries.len() >= 2, "expected at least one merge to have committed");
        let dilation_radius = general().dilation_radius();

        // A cover of 0 can only reach the initial singletons.
        let initial = history.at_cover(0.0, dilation_radius);
        assert_eq!(initial.patterns.len(), 2);

        // A very large cover reaches the final, most-merged partition.
        let final_time = history.entries.last().map_or(0.0, |(t, _)| *t);
        let covered = history.at_cover((final_time / dilation_radius) + 1.0, dilation_radius);
        assert_eq!(covered.patterns.len(), history.latest().patterns.len());
    }

    #[test]
    fn a_point_in_the_way_blocks_a_distant_matching() {
        // The midpoint sits squarely on the segment between the outer two,
        // well within the admissible radius, so the far matching must not form.
        let points = vec![
            CatPoint::from_f64(0, 0.0, 0.0),
            CatPoint::from_f64(0, 0.5, 0.0),
            CatPoint::from_f64(0, 1.0, 0.0),
        ];
        let history = run(&points, &general(), &settings(), 10.0);
        let latest = history.latest();
        let has_matching_skipping_midpoint = latest.patterns.iter().any(|p| {
            matches!(p, Pattern::Matching(m) if (m.points[0].approx().x - 0.0).abs() < 1e-9 && (m.points[1].approx().x - 1.0).abs() < 1e-9)
        });
        assert!(!has_matching_skipping_midpoint);
    }
}
