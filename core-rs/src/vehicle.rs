//! Vehicle records handed to the tracker by callers

use serde::{Deserialize, Serialize};
use std::fmt;

/// A vehicle identified by its license, optionally holding a parking pass.
///
/// Fields are private so a vehicle cannot change once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    license: String,
    has_pass: bool,
}

impl Vehicle {
    /// Create a vehicle
    ///
    /// # Example
    /// ```
    /// # use slot_tracker::Vehicle;
    /// let car = Vehicle::new("ABC123", true);
    /// assert_eq!(car.license(), "ABC123");
    /// assert!(car.has_pass());
    /// ```
    pub fn new(license: impl Into<String>, has_pass: bool) -> Self {
        Vehicle {
            license: license.into(),
            has_pass,
        }
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn has_pass(&self) -> bool {
        self.has_pass
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_pass {
            write!(f, "{} (pass)", self.license)
        } else {
            write!(f, "{}", self.license)
        }
    }
}
