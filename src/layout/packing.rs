//! Greedy column assignment within an overlap cluster.

use serde::Serialize;

use super::grouping::{group, overlaps, sort_events, Cluster};
use crate::models::event::Event;

/// Placement of one event inside its cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEntry<'a> {
    pub event: &'a Event,
    pub column: usize,
    /// Number of columns used by this event's cluster.
    pub total_columns: usize,
}

/// Assign every event of `cluster` to the lowest column whose occupants it
/// does not overlap, opening a new column when none fits.
///
/// Entries are returned in layout order and all share the cluster's final
/// column count.
pub fn pack<'a>(cluster: &Cluster<'a>) -> Vec<LayoutEntry<'a>> {
    let mut ordered = cluster.events().to_vec();
    sort_events(&mut ordered);

    let mut columns: Vec<Vec<&'a Event>> = Vec::new();
    let mut placements: Vec<(&'a Event, usize)> = Vec::with_capacity(ordered.len());

    for event in ordered {
        let free = columns
            .iter()
            .position(|column| column.iter().all(|placed| !overlaps(placed, event)));

        let column = match free {
            Some(idx) => idx,
            None => {
                columns.push(Vec::new());
                columns.len() - 1
            }
        };

        columns[column].push(event);
        placements.push((event, column));
    }

    let total_columns = columns.len();
    placements
        .into_iter()
        .map(|(event, column)| LayoutEntry {
            event,
            column,
            total_columns,
        })
        .collect()
}

/// Group `events` into clusters and pack each one, flattened in cluster order.
pub fn layout_events<'a, I>(events: I) -> Vec<LayoutEntry<'a>>
where
    I: IntoIterator<Item = &'a Event>,
{
    let clusters = group(events);
    let entries: Vec<LayoutEntry<'a>> = clusters.iter().flat_map(|cluster| pack(cluster)).collect();

    log::debug!(
        "Laid out {} events in {} clusters",
        entries.len(),
        clusters.len()
    );
    entries
}
