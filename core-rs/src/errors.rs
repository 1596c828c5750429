//! Error types for the slot tracker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("All slots full: capacity {capacity} reached")]
    CapacityExceeded { capacity: usize },

    #[error("Invalid slot number: {slot} (valid range 1-{capacity})")]
    InvalidSlotNumber { slot: i64, capacity: usize },

    #[error("Slot not occupied: {0}")]
    SlotNotOccupied(usize),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Vehicle already parked: {license} (slot {slot})")]
    VehicleAlreadyParked { license: String, slot: usize },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
