//! Partitioning of a day's events into overlap clusters.

use chrono::{DateTime, Local};
use std::cmp::Ordering;

use crate::models::event::Event;

/// A maximal set of events connected by direct or transitive overlap.
///
/// Members are kept in layout order (see [`sort_events`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster<'a> {
    events: Vec<&'a Event>,
    start: DateTime<Local>,
    end: DateTime<Local>,
}

impl<'a> Cluster<'a> {
    fn new(first: &'a Event) -> Self {
        Self {
            events: vec![first],
            start: first.start,
            end: first.end,
        }
    }

    pub fn events(&self) -> &[&'a Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Earliest start among the members.
    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    /// Latest end among the members.
    pub fn end(&self) -> DateTime<Local> {
        self.end
    }

    /// True if `event` overlaps any member, not just the most recent one.
    pub fn overlaps(&self, event: &Event) -> bool {
        self.events.iter().any(|member| overlaps(member, event))
    }

    fn push(&mut self, event: &'a Event) {
        self.start = self.start.min(event.start);
        self.end = self.end.max(event.end);
        self.events.push(event);
    }
}

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` overlap iff
/// `s1 < e2 && s2 < e1`.
pub fn overlaps(a: &Event, b: &Event) -> bool {
    a.start < b.end && b.start < a.end
}

/// Order events by start ascending, shorter events first on equal starts.
/// The sort is stable so complete ties keep their input order.
pub fn sort_events(events: &mut [&Event]) {
    events.sort_by(|a, b| layout_order(a, b));
}

fn layout_order(a: &Event, b: &Event) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| a.duration().cmp(&b.duration()))
}

/// Partition `events` into disjoint overlap clusters.
///
/// Input order does not matter. Clusters come back ordered by their first
/// member; an empty input yields no clusters.
pub fn group<'a, I>(events: I) -> Vec<Cluster<'a>>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut sorted: Vec<&'a Event> = events.into_iter().collect();
    sort_events(&mut sorted);

    let mut clusters: Vec<Cluster<'a>> = Vec::new();
    for event in sorted {
        // Events arrive in start order, so every earlier cluster ends at or
        // before the open one begins. Only the open cluster can overlap
        // `event`, and an event bridging two clusters cannot occur.
        match clusters.last_mut() {
            Some(open) if open.overlaps(event) => open.push(event),
            _ => clusters.push(Cluster::new(event)),
        }
    }

    clusters
}
