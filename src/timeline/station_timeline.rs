//! The position history of a single station.
//!
//! A [`StationTimeline`] keeps its intervals keyed by start time and upholds two invariants
//! after every successful insertion:
//!
//! * no two intervals share an instant (`[start, end)` ranges never intersect, an open end
//!   extends forever);
//! * at most one interval is open, and only the chronologically latest one may be.
//!
//! Positions are often back-filled out of chronological order, so each insertion repairs
//! adjacency itself: a new interval without an end time runs up to the next known interval, and
//! an earlier interval that was still open (or ran right up to the next known interval) is
//! closed where the new one begins. The validation half of that work is [`plan_insertion`],
//! which only reads the existing intervals and can therefore run against any storage.

use crate::timeline::error::TimelineError;
use crate::types::geo_point::GeoPoint;
use crate::types::location_interval::LocationInterval;
use crate::types::station::StationInfo;
use crate::types::timestamp::IntoTimestamp;
use bon::Builder;
use chrono::{DateTime, Utc};
use log::debug;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A position to insert into a station's timeline.
///
/// # Examples
///
/// ```
/// use station_history::{GeoPoint, NewInterval};
/// use chrono::{TimeZone, Utc};
///
/// let new = NewInterval::builder()
///     .position(GeoPoint::new(41.0, -71.0).unwrap())
///     .start(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap())
///     .depth(25.0)
///     .comment("re-surveyed after winter storms")
///     .build();
/// assert_eq!(new.end(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct NewInterval {
    position: GeoPoint,
    start: DateTime<Utc>,
    /// Leave unset to run up to the next known location (or stay open).
    end: Option<DateTime<Utc>>,
    depth: Option<f64>,
    #[builder(into)]
    comment: Option<String>,
}

impl NewInterval {
    pub fn position(&self) -> GeoPoint {
        self.position
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }
}

/// The mutations an accepted insertion performs: the predecessors to close at the new start
/// time, and the interval to store.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertionPlan {
    closes: Vec<DateTime<Utc>>,
    interval: LocationInterval,
}

impl InsertionPlan {
    /// Start times of the earlier intervals whose end time becomes the new interval's start.
    pub fn closes(&self) -> &[DateTime<Utc>] {
        &self.closes
    }

    /// The interval to store, with its effective end time already derived.
    pub fn interval(&self) -> &LocationInterval {
        &self.interval
    }
}

/// Validates `new` against a station's `existing` intervals and derives the mutation plan.
///
/// Checks run before anything is changed, in this order:
///
/// 1. an interval starting at the same instant: [`TimelineError::DuplicateStart`];
/// 2. an explicit end not after the start: [`TimelineError::EndNotAfterStart`];
/// 3. the successor (earliest later start): without an explicit end the new interval ends where
///    the successor begins, an explicit end past that start is
///    [`TimelineError::OverlapsSuccessor`];
/// 4. a closed predecessor still running at the new start: when it runs exactly up to the
///    successor and the new interval also ends there, the new interval is spliced in and the
///    predecessor is scheduled to end at the new start, otherwise
///    [`TimelineError::OverlapsPredecessor`].
///
/// Every open predecessor is scheduled to close at the new start.
pub fn plan_insertion<'a, I>(
    station: &str,
    existing: I,
    new: NewInterval,
) -> Result<InsertionPlan, TimelineError>
where
    I: IntoIterator<Item = &'a LocationInterval>,
{
    let NewInterval {
        position,
        start,
        end,
        depth,
        comment,
    } = new;

    let mut successor_start: Option<DateTime<Utc>> = None;
    let mut running_predecessor: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
    let mut closes = Vec::new();

    for interval in existing {
        let existing_start = interval.start_time();
        match existing_start.cmp(&start) {
            Ordering::Equal => {
                return Err(TimelineError::DuplicateStart {
                    station: station.to_string(),
                    start,
                })
            }
            Ordering::Greater => {
                successor_start = Some(match successor_start {
                    Some(current) => current.min(existing_start),
                    None => existing_start,
                });
            }
            Ordering::Less => match interval.end_time() {
                None => closes.push(existing_start),
                Some(existing_end) if existing_end > start => {
                    running_predecessor.get_or_insert((existing_start, existing_end));
                }
                Some(_) => {}
            },
        }
    }

    if let Some(end) = end {
        if end <= start {
            return Err(TimelineError::EndNotAfterStart {
                station: station.to_string(),
                start,
                end,
            });
        }
    }

    let effective_end = match (end, successor_start) {
        (None, successor) => successor,
        (Some(end), Some(successor_start)) if end > successor_start => {
            return Err(TimelineError::OverlapsSuccessor {
                station: station.to_string(),
                end,
                successor_start,
            });
        }
        (Some(end), _) => Some(end),
    };

    if let Some((predecessor_start, predecessor_end)) = running_predecessor {
        // The new interval must take over the predecessor's whole tail.
        if successor_start != Some(predecessor_end) || effective_end != Some(predecessor_end) {
            return Err(TimelineError::OverlapsPredecessor {
                station: station.to_string(),
                start,
                predecessor_start,
                predecessor_end,
            });
        }
        closes.push(predecessor_start);
    }

    closes.sort();
    Ok(InsertionPlan {
        closes,
        interval: LocationInterval::new(
            station.to_string(),
            position,
            depth,
            comment,
            start,
            effective_end,
        ),
    })
}

/// The ordered, non-overlapping position history of one station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationTimeline {
    station: String,
    intervals: BTreeMap<DateTime<Utc>, LocationInterval>,
}

impl StationTimeline {
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            intervals: BTreeMap::new(),
        }
    }

    /// Rebuilds a timeline from stored intervals, checking that they belong to `station` and
    /// satisfy both timeline invariants. The input may be in any order.
    pub fn from_intervals(
        station: impl Into<String>,
        intervals: impl IntoIterator<Item = LocationInterval>,
    ) -> Result<Self, TimelineError> {
        let station = station.into();
        let station_key = StationInfo::key_for(&station);
        let mut by_start = BTreeMap::new();

        for interval in intervals {
            let start = interval.start_time();
            if StationInfo::key_for(interval.station()) != station_key {
                return Err(TimelineError::ForeignInterval {
                    station,
                    found: interval.station().to_string(),
                    start,
                });
            }
            if let Some(end) = interval.end_time() {
                if end <= start {
                    return Err(TimelineError::EndNotAfterStart {
                        station,
                        start,
                        end,
                    });
                }
            }
            if by_start.insert(start, interval).is_some() {
                return Err(TimelineError::DuplicateStart { station, start });
            }
        }

        let mut previous: Option<&LocationInterval> = None;
        for interval in by_start.values() {
            if let Some(prev) = previous {
                match (prev.end_time(), interval.end_time()) {
                    (None, None) => {
                        return Err(TimelineError::MultipleOpen {
                            station,
                            first: prev.start_time(),
                            second: interval.start_time(),
                        })
                    }
                    (None, Some(_)) => {
                        return Err(TimelineError::OpenNotLatest {
                            station,
                            open_start: prev.start_time(),
                            later_start: interval.start_time(),
                        })
                    }
                    (Some(prev_end), _) if prev_end > interval.start_time() => {
                        return Err(TimelineError::OverlapsPredecessor {
                            station,
                            start: interval.start_time(),
                            predecessor_start: prev.start_time(),
                            predecessor_end: prev_end,
                        })
                    }
                    _ => {}
                }
            }
            previous = Some(interval);
        }

        Ok(Self {
            station,
            intervals: by_start,
        })
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    /// Validates `new` against this timeline without changing it.
    pub fn plan(&self, new: NewInterval) -> Result<InsertionPlan, TimelineError> {
        plan_insertion(&self.station, self.intervals.values(), new)
    }

    /// Inserts a new position, closing the preceding position if it was still open or ran up
    /// to the next known position.
    ///
    /// Either the whole insertion applies or, on error, the timeline is left untouched.
    pub fn insert(&mut self, new: NewInterval) -> Result<&LocationInterval, TimelineError> {
        let plan = self.plan(new)?;
        Ok(self.apply(plan))
    }

    fn apply(&mut self, plan: InsertionPlan) -> &LocationInterval {
        let InsertionPlan { closes, interval } = plan;
        let start = interval.start_time();
        for predecessor_start in closes {
            if let Some(predecessor) = self.intervals.get_mut(&predecessor_start) {
                debug!(
                    "Ending location of station {} started at {} at {}",
                    self.station, predecessor_start, start
                );
                predecessor.close_at(start);
            }
        }
        debug!(
            "Inserted location of station {} at {} from {} until {:?}",
            self.station,
            interval.position(),
            start,
            interval.end_time()
        );
        self.intervals.entry(start).or_insert(interval)
    }

    /// The interval active at `timestamp`, if the station had a recorded position then.
    pub fn lookup(&self, timestamp: impl IntoTimestamp) -> Option<&LocationInterval> {
        let timestamp = timestamp.into_timestamp();
        // Intervals never overlap, so only the latest one starting at or before the
        // timestamp can contain it.
        self.intervals
            .range(..=timestamp)
            .next_back()
            .map(|(_, interval)| interval)
            .filter(|interval| interval.contains(timestamp))
    }

    /// The open (current) interval, if any.
    pub fn current(&self) -> Option<&LocationInterval> {
        self.intervals
            .values()
            .next_back()
            .filter(|interval| interval.is_open())
    }

    /// All intervals in chronological order.
    pub fn intervals(&self) -> impl Iterator<Item = &LocationInterval> {
        self.intervals.values()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn open_at(start: DateTime<Utc>, position: GeoPoint) -> NewInterval {
        NewInterval::builder().position(position).start(start).build()
    }

    fn closed(start: DateTime<Utc>, end: DateTime<Utc>, position: GeoPoint) -> NewInterval {
        NewInterval::builder()
            .position(position)
            .start(start)
            .end(end)
            .build()
    }

    fn assert_invariants(timeline: &StationTimeline) {
        let intervals: Vec<_> = timeline.intervals().collect();
        for (i, a) in intervals.iter().enumerate() {
            for b in &intervals[i + 1..] {
                assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
        }
        let open: Vec<_> = intervals.iter().filter(|i| i.is_open()).collect();
        assert!(open.len() <= 1, "more than one open interval: {:?}", open);
        if let Some(open) = open.first() {
            assert_eq!(
                open.start_time(),
                intervals.last().unwrap().start_time(),
                "open interval is not the latest"
            );
        }
    }

    #[test]
    fn test_out_of_order_insert_fills_to_successor() {
        let mut timeline = StationTimeline::new("A");
        timeline.insert(open_at(at(2023, 6, 1), point(41.5, -70.5))).unwrap();
        let inserted = timeline
            .insert(open_at(at(2023, 3, 1), point(41.0, -71.0)))
            .unwrap();
        assert_eq!(inserted.end_time(), Some(at(2023, 6, 1)));

        let later = timeline.lookup(at(2023, 6, 1)).unwrap();
        assert_eq!(later.start_time(), at(2023, 6, 1));
        assert!(later.is_open());
        assert_invariants(&timeline);
    }

    #[test]
    fn test_successor_filling() {
        let mut timeline = StationTimeline::new("A");
        timeline
            .insert(closed(at(2023, 9, 1), at(2023, 12, 1), point(41.5, -70.5)))
            .unwrap();
        let inserted = timeline
            .insert(open_at(at(2023, 2, 1), point(41.0, -71.0)))
            .unwrap();
        assert_eq!(inserted.end_time(), Some(at(2023, 9, 1)));
        assert_invariants(&timeline);
    }

    #[test]
    fn test_newer_insert_closes_open_predecessor() {
        let mut timeline = StationTimeline::new("A");
        timeline.insert(open_at(at(2023, 1, 1), point(41.0, -71.0))).unwrap();
        timeline.insert(open_at(at(2023, 6, 1), point(41.5, -70.5))).unwrap();

        let first = timeline.lookup(at(2023, 1, 1)).unwrap();
        assert_eq!(first.end_time(), Some(at(2023, 6, 1)));
        assert_eq!(timeline.current().unwrap().start_time(), at(2023, 6, 1));
        assert_invariants(&timeline);
    }

    #[test]
    fn test_rejects_overlap_with_successor_without_mutation() {
        let mut timeline = StationTimeline::new("A");
        timeline.insert(open_at(at(2023, 9, 1), point(41.5, -70.5))).unwrap();
        let before = timeline.clone();

        let err = timeline
            .insert(closed(at(2023, 1, 1), at(2023, 10, 1), point(41.0, -71.0)))
            .unwrap_err();
        assert!(err.is_invalid_range());
        assert_eq!(
            err,
            TimelineError::OverlapsSuccessor {
                station: "A".to_string(),
                end: at(2023, 10, 1),
                successor_start: at(2023, 9, 1),
            }
        );
        assert_eq!(timeline, before);
    }

    #[test]
    fn test_end_equal_to_successor_start_is_accepted() {
        let mut timeline = StationTimeline::new("A");
        timeline.insert(open_at(at(2023, 9, 1), point(41.5, -70.5))).unwrap();
        timeline
            .insert(closed(at(2023, 1, 1), at(2023, 9, 1), point(41.0, -71.0)))
            .unwrap();
        assert_eq!(timeline.len(), 2);
        assert_invariants(&timeline);
    }

    #[test]
    fn test_rejects_empty_and_reversed_ranges() {
        let mut timeline = StationTimeline::new("A");
        let equal = timeline
            .insert(closed(at(2023, 1, 1), at(2023, 1, 1), point(41.0, -71.0)))
            .unwrap_err();
        assert!(matches!(equal, TimelineError::EndNotAfterStart { .. }));
        let reversed = timeline
            .insert(closed(at(2023, 2, 1), at(2023, 1, 1), point(41.0, -71.0)))
            .unwrap_err();
        assert!(reversed.is_invalid_range());
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_start() {
        let mut timeline = StationTimeline::new("A");
        timeline.insert(open_at(at(2023, 1, 1), point(41.0, -71.0))).unwrap();
        let err = timeline
            .insert(open_at(at(2023, 1, 1), point(42.0, -70.0)))
            .unwrap_err();
        assert!(err.is_conflict());
        assert!(!err.is_invalid_range());
        assert_eq!(timeline.len(), 1);
        assert_eq!(
            timeline.lookup(at(2023, 1, 1)).unwrap().position(),
            point(41.0, -71.0)
        );
    }

    #[test]
    fn test_rejects_start_inside_closed_predecessor() {
        let mut timeline = StationTimeline::new("A");
        timeline
            .insert(closed(at(2023, 1, 1), at(2023, 6, 1), point(41.0, -71.0)))
            .unwrap();
        let before = timeline.clone();
        let err = timeline
            .insert(open_at(at(2023, 3, 1), point(41.5, -70.5)))
            .unwrap_err();
        assert!(matches!(err, TimelineError::OverlapsPredecessor { .. }));
        assert_eq!(timeline, before);
    }

    #[test]
    fn test_backfill_splits_interval_filled_to_successor() {
        let mut timeline = StationTimeline::new("A");
        timeline.insert(open_at(at(2023, 12, 1), point(41.5, -70.5))).unwrap();
        timeline.insert(open_at(at(2023, 1, 1), point(41.0, -71.0))).unwrap();
        let inserted = timeline
            .insert(open_at(at(2023, 2, 1), point(41.2, -70.8)))
            .unwrap();
        assert_eq!(inserted.end_time(), Some(at(2023, 12, 1)));
        assert_eq!(
            timeline.lookup(at(2023, 1, 1)).unwrap().end_time(),
            Some(at(2023, 2, 1))
        );
        assert_eq!(
            timeline.lookup(at(2023, 6, 1)).unwrap().position(),
            point(41.2, -70.8)
        );
        assert_invariants(&timeline);
    }

    #[test]
    fn test_backfill_must_cover_rest_of_filled_interval() {
        let mut timeline = StationTimeline::new("A");
        timeline.insert(open_at(at(2023, 6, 1), point(41.5, -70.5))).unwrap();
        timeline.insert(open_at(at(2023, 1, 1), point(41.0, -71.0))).unwrap();
        let before = timeline.clone();

        // Ending in April would leave April and May without a position.
        let err = timeline
            .insert(closed(at(2023, 3, 1), at(2023, 4, 1), point(41.2, -70.8)))
            .unwrap_err();
        assert!(matches!(
            err,
            TimelineError::OverlapsPredecessor {
                predecessor_end,
                ..
            } if predecessor_end == at(2023, 6, 1)
        ));
        assert_eq!(timeline, before);
        assert_eq!(
            timeline.lookup(at(2023, 5, 1)).unwrap().position(),
            point(41.0, -71.0)
        );

        // An explicit end at the successor takes over the whole tail.
        timeline
            .insert(closed(at(2023, 3, 1), at(2023, 6, 1), point(41.2, -70.8)))
            .unwrap();
        assert_eq!(
            timeline.lookup(at(2023, 1, 1)).unwrap().end_time(),
            Some(at(2023, 3, 1))
        );
        assert_eq!(
            timeline.lookup(at(2023, 5, 1)).unwrap().position(),
            point(41.2, -70.8)
        );
        assert_invariants(&timeline);
    }

    #[test]
    fn test_lookup() {
        let mut timeline = StationTimeline::new("A");
        timeline
            .insert(closed(at(2023, 1, 1), at(2023, 6, 1), point(41.0, -71.0)))
            .unwrap();
        timeline.insert(open_at(at(2023, 6, 1), point(41.5, -70.5))).unwrap();

        assert_eq!(
            timeline.lookup(at(2023, 3, 15)).unwrap().position(),
            point(41.0, -71.0)
        );
        assert_eq!(
            timeline.lookup(at(2023, 6, 1)).unwrap().position(),
            point(41.5, -70.5)
        );
        assert!(timeline.lookup(at(2022, 12, 31)).is_none());

        // Repeated reads see the same data.
        assert_eq!(timeline.lookup(at(2023, 3, 15)), timeline.lookup(at(2023, 3, 15)));
    }

    #[test]
    fn test_lookup_in_gap_is_none() {
        let mut timeline = StationTimeline::new("A");
        timeline
            .insert(closed(at(2023, 1, 1), at(2023, 2, 1), point(41.0, -71.0)))
            .unwrap();
        timeline
            .insert(closed(at(2023, 3, 1), at(2023, 4, 1), point(41.5, -70.5)))
            .unwrap();
        assert!(timeline.lookup(at(2023, 2, 15)).is_none());
        assert!(timeline.lookup(at(2023, 2, 1)).is_none());
        assert!(timeline.current().is_none());
    }

    #[test]
    fn test_invariants_hold_for_shuffled_inserts() {
        let months = [7u32, 2, 11, 5, 1, 9, 3, 12, 6, 4, 10, 8];
        let mut timeline = StationTimeline::new("A");
        for (i, month) in months.iter().enumerate() {
            let start = at(2022, *month, 1);
            let new = if i % 3 == 0 {
                closed(start, start + chrono::Duration::days(10), point(41.0, -71.0))
            } else {
                open_at(start, point(41.0 + i as f64 * 0.01, -71.0))
            };
            let covered: Vec<DateTime<Utc>> = timeline
                .intervals()
                .flat_map(|interval| {
                    let last = interval
                        .end_time()
                        .unwrap_or(interval.start_time() + chrono::Duration::days(400))
                        - chrono::Duration::seconds(1);
                    [interval.start_time(), last]
                })
                .collect();
            let before = timeline.clone();

            match timeline.insert(new) {
                Ok(_) => {}
                Err(TimelineError::OverlapsPredecessor { .. }) => {
                    // Short closed intervals may not cut into a back-filled position.
                    assert_eq!(i % 3, 0);
                    assert_eq!(timeline, before);
                }
                Err(e) => panic!("unexpected error for month {}: {}", month, e),
            }
            assert_invariants(&timeline);
            for t in covered {
                assert!(timeline.lookup(t).is_some(), "position at {} was lost", t);
            }
        }
        // May, March and April end short of an already known successor.
        assert_eq!(timeline.len(), 9);
        assert!(timeline.lookup(at(2022, 5, 1)).is_some());
        assert_eq!(timeline.current().unwrap().start_time(), at(2022, 12, 1));
    }

    #[test]
    fn test_plan_does_not_mutate() {
        let mut timeline = StationTimeline::new("A");
        timeline.insert(open_at(at(2023, 1, 1), point(41.0, -71.0))).unwrap();
        let plan = timeline
            .plan(open_at(at(2023, 6, 1), point(41.5, -70.5)))
            .unwrap();
        assert_eq!(plan.closes(), &[at(2023, 1, 1)]);
        assert_eq!(plan.interval().start_time(), at(2023, 6, 1));
        assert!(plan.interval().is_open());
        assert!(timeline.lookup(at(2023, 1, 1)).unwrap().is_open());
    }

    #[test]
    fn test_plan_insertion_accepts_unordered_slices() {
        let mut a = StationTimeline::new("A");
        a.insert(closed(at(2023, 9, 1), at(2023, 10, 1), point(41.0, -71.0)))
            .unwrap();
        a.insert(closed(at(2023, 5, 1), at(2023, 6, 1), point(41.0, -71.0)))
            .unwrap();
        let mut existing: Vec<LocationInterval> = a.intervals().cloned().collect();
        existing.reverse();

        let plan = plan_insertion("A", &existing, open_at(at(2023, 7, 1), point(41.0, -71.0)))
            .unwrap();
        assert_eq!(plan.interval().end_time(), Some(at(2023, 9, 1)));
        assert!(plan.closes().is_empty());
    }

    #[test]
    fn test_from_intervals_validates() {
        let mut timeline = StationTimeline::new("A");
        timeline
            .insert(closed(at(2023, 1, 1), at(2023, 6, 1), point(41.0, -71.0)))
            .unwrap();
        timeline.insert(open_at(at(2023, 6, 1), point(41.5, -70.5))).unwrap();

        let mut stored: Vec<LocationInterval> = timeline.intervals().cloned().collect();
        stored.reverse();
        let rebuilt = StationTimeline::from_intervals("a", stored).unwrap();
        assert_eq!(rebuilt.len(), 2);
        assert_invariants(&rebuilt);

        let two_open = vec![
            LocationInterval::new("A".into(), point(41.0, -71.0), None, None, at(2023, 1, 1), None),
            LocationInterval::new("A".into(), point(41.0, -71.0), None, None, at(2023, 2, 1), None),
        ];
        assert!(matches!(
            StationTimeline::from_intervals("A", two_open),
            Err(TimelineError::MultipleOpen { .. })
        ));

        let open_then_closed = vec![
            LocationInterval::new("A".into(), point(41.0, -71.0), None, None, at(2023, 1, 1), None),
            LocationInterval::new(
                "A".into(),
                point(41.5, -70.5),
                None,
                None,
                at(2023, 3, 1),
                Some(at(2023, 4, 1)),
            ),
        ];
        assert!(matches!(
            StationTimeline::from_intervals("A", open_then_closed),
            Err(TimelineError::OpenNotLatest { open_start, later_start, .. })
                if open_start == at(2023, 1, 1) && later_start == at(2023, 3, 1)
        ));

        let overlapping = vec![
            LocationInterval::new(
                "A".into(),
                point(41.0, -71.0),
                None,
                None,
                at(2023, 1, 1),
                Some(at(2023, 6, 1)),
            ),
            LocationInterval::new("A".into(), point(41.5, -70.5), None, None, at(2023, 3, 1), None),
        ];
        assert!(matches!(
            StationTimeline::from_intervals("A", overlapping),
            Err(TimelineError::OverlapsPredecessor { start, predecessor_end, .. })
                if start == at(2023, 3, 1) && predecessor_end == at(2023, 6, 1)
        ));

        let foreign = vec![LocationInterval::new(
            "B".into(),
            point(41.0, -71.0),
            None,
            None,
            at(2023, 1, 1),
            None,
        )];
        assert!(matches!(
            StationTimeline::from_intervals("A", foreign),
            Err(TimelineError::ForeignInterval { .. })
        ));
    }
}
