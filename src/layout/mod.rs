//! Overlap-aware event layout.
//!
//! A day's events flow through three pure steps:
//! [`group`] partitions them into overlap clusters, [`pack`] assigns each event
//! a column within its cluster, and [`map_to_geometry`] turns the result into
//! fractional offsets inside a [`TimeWindow`]. [`layout_events`] runs the first
//! two steps in one call.

pub mod geometry;
pub mod grouping;
pub mod packing;
pub mod window;

pub use geometry::{map_to_geometry, Geometry, Rect};
pub use grouping::{group, overlaps, sort_events, Cluster};
pub use packing::{layout_events, pack, LayoutEntry};
pub use window::TimeWindow;
