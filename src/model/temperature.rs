//! Temperature classes and the storage units that serve them.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The temperature an order should be held at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    #[serde(alias = "HOT", alias = "Hot")]
    Hot,
    #[serde(alias = "COLD", alias = "Cold")]
    Cold,
    #[serde(alias = "ROOM", alias = "Room")]
    Room,
}

impl Temperature {
    /// The storage unit whose temperature matches this class.
    pub fn storage_kind(self) -> StorageKind {
        match self {
            Temperature::Hot => StorageKind::Heater,
            Temperature::Cold => StorageKind::Cooler,
            Temperature::Room => StorageKind::Shelf,
        }
    }
}

impl Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Temperature::Hot => "hot",
            Temperature::Cold => "cold",
            Temperature::Room => "room",
        };
        f.write_str(name)
    }
}

impl FromStr for Temperature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hot" => Ok(Temperature::Hot),
            "cold" => Ok(Temperature::Cold),
            "room" => Ok(Temperature::Room),
            other => Err(format!("Unknown temperature: {other}")),
        }
    }
}

/// One of the three compartments of the holding area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Heater,
    Cooler,
    Shelf,
}

impl StorageKind {
    pub const ALL: [StorageKind; 3] = [StorageKind::Heater, StorageKind::Cooler, StorageKind::Shelf];

    /// Temperature maintained by this compartment.
    pub fn temperature(self) -> Temperature {
        match self {
            StorageKind::Heater => Temperature::Hot,
            StorageKind::Cooler => Temperature::Cold,
            StorageKind::Shelf => Temperature::Room,
        }
    }
}

impl Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StorageKind::Heater => "heater",
            StorageKind::Cooler => "cooler",
            StorageKind::Shelf => "shelf",
        };
        f.write_str(name)
    }
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heater" => Ok(StorageKind::Heater),
            "cooler" => Ok(StorageKind::Cooler),
            "shelf" => Ok(StorageKind::Shelf),
            other => Err(format!("Unknown storage unit: {other}")),
        }
    }
}
