/**
 * slot_tracker.rs
 * Fixed-capacity slot table for a parking lot
 *
 * Each lot has:
 * - Capacity: number of slots, fixed at construction
 * - Slots: numbered 1..=capacity, each empty or holding one vehicle
 *
 * Assignment strategy:
 * - Arriving vehicles take the lowest-numbered empty slot
 * - Released slots become eligible again immediately
 *
 * Example (capacity 3):
 * - ABC123 arrives → slot 1
 * - DEF456 arrives → slot 2
 * - slot 1 released, GHI789 arrives → slot 1
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{Result, TrackerError};
use crate::vehicle::Vehicle;

/// Contents of an occupied slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupancy {
    pub vehicle: Vehicle,
    pub parked_at: DateTime<Utc>,
}

/// Identifies the slot to release: either by number or by the parked license
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotRef {
    Number(i64),
    License(String),
}

impl From<i64> for SlotRef {
    fn from(slot: i64) -> Self {
        SlotRef::Number(slot)
    }
}

impl From<i32> for SlotRef {
    fn from(slot: i32) -> Self {
        SlotRef::Number(i64::from(slot))
    }
}

impl From<usize> for SlotRef {
    fn from(slot: usize) -> Self {
        SlotRef::Number(i64::try_from(slot).unwrap_or(i64::MAX))
    }
}

impl From<&str> for SlotRef {
    fn from(license: &str) -> Self {
        SlotRef::License(license.to_string())
    }
}

impl From<String> for SlotRef {
    fn from(license: String) -> Self {
        SlotRef::License(license)
    }
}

/// A vehicle handed back by a successful release
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub slot: usize,
    pub vehicle: Vehicle,
}

/// Point-in-time occupancy summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyReport {
    pub capacity: usize,
    pub address: String,
    pub occupied: usize,
    pub available: usize,
    pub passholders: Vec<String>,
    pub passholder_percentage: f32,
}

/// Slot Tracker - owns the slot table and enforces its invariants
#[derive(Debug, Clone)]
pub struct SlotTracker {
    capacity: usize,
    address: String,
    slots: Box<[Option<Occupancy>]>,
}

impl SlotTracker {
    /// Create a tracker with every slot empty
    ///
    /// # Arguments
    /// * `capacity` - Number of slots
    /// * `address` - Lot address (metadata only)
    ///
    /// # Example
    /// ```
    /// # use slot_tracker::SlotTracker;
    /// let tracker = SlotTracker::new(5, "fake street");
    /// assert_eq!(tracker.slots_available(), 5);
    /// ```
    pub fn new(capacity: usize, address: impl Into<String>) -> Self {
        SlotTracker {
            capacity,
            address: address.into(),
            slots: Self::empty_slots(capacity),
        }
    }

    fn empty_slots(capacity: usize) -> Box<[Option<Occupancy>]> {
        (0..capacity).map(|_| None).collect()
    }

    /// Reset every slot to empty, discarding parked vehicles
    pub fn generate_slots(&mut self) {
        let discarded = self.occupied_count();
        self.slots = Self::empty_slots(self.capacity);
        info!(capacity = self.capacity, discarded, "slots generated");
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Map a 1-based slot number to an index into `slots`
    fn index_of(&self, slot: i64) -> Result<usize> {
        let invalid = || TrackerError::InvalidSlotNumber {
            slot,
            capacity: self.capacity,
        };
        let number = usize::try_from(slot).map_err(|_| invalid())?;
        if number == 0 || number > self.capacity {
            return Err(invalid());
        }
        Ok(number - 1)
    }

    /// Park a vehicle in the lowest-numbered empty slot
    ///
    /// # Returns
    /// The assigned slot number
    ///
    /// # Errors
    /// - `VehicleAlreadyParked` if the license already occupies a slot
    /// - `CapacityExceeded` if every slot is occupied
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<usize> {
        if let Some(slot) = self.find_vehicle(vehicle.license()) {
            return Err(TrackerError::VehicleAlreadyParked {
                license: vehicle.license().to_string(),
                slot,
            });
        }

        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(TrackerError::CapacityExceeded {
                capacity: self.capacity,
            })?;

        let slot = index + 1;
        debug!(slot, license = vehicle.license(), "vehicle parked");
        self.slots[index] = Some(Occupancy {
            vehicle,
            parked_at: Utc::now(),
        });
        Ok(slot)
    }

    /// Release a slot by number or by license
    ///
    /// # Example
    /// ```
    /// # use slot_tracker::{SlotTracker, Vehicle};
    /// let mut tracker = SlotTracker::new(2, "fake street");
    /// tracker.add_vehicle(Vehicle::new("ABC123", false)).unwrap();
    /// tracker.add_vehicle(Vehicle::new("DEF456", false)).unwrap();
    ///
    /// tracker.remove_vehicle(1).unwrap();
    /// let released = tracker.remove_vehicle("DEF456").unwrap();
    /// assert_eq!(released.slot, 2);
    /// assert_eq!(tracker.slots_available(), 2);
    /// ```
    pub fn remove_vehicle(&mut self, target: impl Into<SlotRef>) -> Result<Release> {
        match target.into() {
            SlotRef::Number(slot) => self.remove_by_slot(slot),
            SlotRef::License(license) => self.remove_by_license(&license),
        }
    }

    /// Release the vehicle in a given slot
    ///
    /// # Errors
    /// - `InvalidSlotNumber` if `slot` is outside 1..=capacity
    /// - `SlotNotOccupied` if the slot is already empty
    pub fn remove_by_slot(&mut self, slot: i64) -> Result<Release> {
        let index = self.index_of(slot)?;
        let occupancy = self.slots[index]
            .take()
            .ok_or(TrackerError::SlotNotOccupied(index + 1))?;

        debug!(slot = index + 1, license = occupancy.vehicle.license(), "slot released");
        Ok(Release {
            slot: index + 1,
            vehicle: occupancy.vehicle,
        })
    }

    /// Release the slot holding the vehicle with this license
    ///
    /// # Errors
    /// - `VehicleNotFound` if no parked vehicle has the license
    pub fn remove_by_license(&mut self, license: &str) -> Result<Release> {
        let slot = self
            .find_vehicle(license)
            .ok_or_else(|| TrackerError::VehicleNotFound(license.to_string()))?;
        self.remove_by_slot(slot as i64)
    }

    /// Slot number currently holding `license`, if parked
    pub fn find_vehicle(&self, license: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|entry| {
                entry
                    .as_ref()
                    .is_some_and(|occupancy| occupancy.vehicle.license() == license)
            })
            .map(|index| index + 1)
    }

    /// Vehicle parked in a slot, `None` when empty
    pub fn occupant(&self, slot: i64) -> Result<Option<&Vehicle>> {
        let index = self.index_of(slot)?;
        Ok(self.slots[index].as_ref().map(|occupancy| &occupancy.vehicle))
    }

    /// Iterate `(slot number, occupancy)` in ascending slot order
    pub fn slots(&self) -> impl Iterator<Item = (usize, Option<&Occupancy>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, entry)| (index + 1, entry.as_ref()))
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|entry| entry.is_some()).count()
    }

    /// Number of empty slots, always `capacity - occupied_count()`
    pub fn slots_available(&self) -> usize {
        self.slots.iter().filter(|entry| entry.is_none()).count()
    }

    /// Parked vehicles holding a pass, in slot order
    pub fn parked_passholders(&self) -> Vec<&Vehicle> {
        self.slots
            .iter()
            .flatten()
            .map(|occupancy| &occupancy.vehicle)
            .filter(|vehicle| vehicle.has_pass())
            .collect()
    }

    /// Share of total capacity (not of occupied slots) taken by pass-holders
    ///
    /// Returns 0 for a zero-capacity lot.
    pub fn passholder_percentage(&self) -> f32 {
        if self.capacity == 0 {
            return 0.0;
        }
        let passholders = self.parked_passholders().len();
        100.0 * passholders as f32 / self.capacity as f32
    }

    pub fn report(&self) -> OccupancyReport {
        OccupancyReport {
            capacity: self.capacity,
            address: self.address.clone(),
            occupied: self.occupied_count(),
            available: self.slots_available(),
            passholders: self
                .parked_passholders()
                .into_iter()
                .map(|vehicle| vehicle.license().to_string())
                .collect(),
            passholder_percentage: self.passholder_percentage(),
        }
    }
}
