//! A small collection of embedded machine descriptions, available by name
//! to tests, demos, and front ends without touching the filesystem.

use crate::loader::{self, LoadedMachine};
use crate::types::SimulatorError;
use std::sync::RwLock;

// Embedded machine descriptions
const MACHINE_TEXTS: [(&str, &str); 3] = [
    ("ends-in-one", include_str!("../machines/ends-in-one.tm")),
    ("binary-increment", include_str!("../machines/binary-increment.tm")),
    ("endless-shuttle", include_str!("../machines/endless-shuttle.tm")),
];

/// One named entry of the embedded catalog.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub machine: LoadedMachine,
}

lazy_static::lazy_static! {
    pub static ref MACHINES: RwLock<Vec<CatalogEntry>> = RwLock::new(Vec::new());
}

pub struct Catalog;

impl Catalog {
    /// Parses the embedded machine descriptions into the shared registry.
    /// Calling it again reloads the registry from scratch.
    pub fn load() -> Result<(), SimulatorError> {
        let mut machines = Vec::new();

        for (name, text) in MACHINE_TEXTS {
            let machine = loader::parse(text)?;
            machines.push(CatalogEntry { name, machine });
        }

        if let Ok(mut write_guard) = MACHINES.write() {
            *write_guard = machines;
        }

        Ok(())
    }

    /// Looks up an entry by name, returning its own copy of the machine.
    pub fn get(name: &str) -> Option<LoadedMachine> {
        MACHINES
            .read()
            .ok()?
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.machine.clone())
    }

    /// The names of all registered machines, in registration order.
    pub fn names() -> Vec<&'static str> {
        MACHINES
            .read()
            .map(|guard| guard.iter().map(|entry| entry.name).collect())
            .unwrap_or_default()
    }
}
