//! # Slot Tracker - parking lot occupancy core
//!
//! Tracks which vehicles occupy the numbered slots of a fixed-capacity lot.
//!
//! ## Key Features
//!
//! - Lowest-numbered-first slot assignment
//! - Release by slot number or by license
//! - Distinct, matchable error kinds for every rejected operation
//! - Occupancy reporting (available slots, pass-holders, pass-holder share)
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐
//! │   slotctl    │────▶│   Session    │  line commands
//! └──────────────┘     └──────┬───────┘
//!        │                    ▼
//!        │             ┌──────────────┐
//!        └────────────▶│ SlotTracker  │  slots 1..=capacity
//!          lot.yaml    └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use slot_tracker::{SlotTracker, TrackerError, Vehicle};
//!
//! let mut lot = SlotTracker::new(2, "fake street");
//! lot.add_vehicle(Vehicle::new("ABC123", true)).unwrap();
//! lot.add_vehicle(Vehicle::new("DEF456", false)).unwrap();
//!
//! let full = lot.add_vehicle(Vehicle::new("GHI789", true));
//! assert!(matches!(full, Err(TrackerError::CapacityExceeded { .. })));
//! assert_eq!(lot.passholder_percentage(), 50.0);
//! ```

pub mod errors;
pub mod vehicle;
pub mod tracker;
pub mod config;
pub mod session;

pub use errors::{Result, TrackerError};
pub use vehicle::Vehicle;
pub use tracker::{Occupancy, OccupancyReport, Release, SlotRef, SlotTracker};
pub use config::LotConfig;
pub use session::{Command, Outcome, OutputFormat, RunSummary, Session};

/// Crate version, as reported by `slotctl --version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
