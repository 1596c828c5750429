/**
 * tracker module
 * Slot assignment and occupancy reporting for a single lot
 */

pub mod slot_tracker;

pub use slot_tracker::{Occupancy, OccupancyReport, Release, SlotRef, SlotTracker};
