//! Particle definitions and the table physics modules install them into
//!
//! Every definition receives a stable [`ParticleId`] when it is inserted.
//! Step data refers to particles by id, so the per-step path never compares
//! names.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Names of the definitions the classifiers care about
pub mod names {
    pub const GAMMA: &str = "gamma";
    pub const ELECTRON: &str = "e-";
    pub const POSITRON: &str = "e+";
    pub const PROTON: &str = "proton";
    pub const HYDROGEN: &str = "hydrogen";
    pub const ALPHA: &str = "alpha";
    pub const ALPHA_PLUS: &str = "alpha+";
    pub const HELIUM: &str = "helium";
    pub const GENERIC_ION: &str = "GenericIon";
}

/// Stable handle for a particle definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(u32);

impl ParticleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A particle species as defined by a physics module
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleDefinition {
    pub name: String,
    /// Charge in units of the elementary charge
    pub pdg_charge: f64,
    pub nucleons: u32,
    pub stable: bool,
}

impl ParticleDefinition {
    pub fn new(name: impl Into<String>, pdg_charge: f64, nucleons: u32) -> Self {
        Self {
            name: name.into(),
            pdg_charge,
            nucleons,
            stable: true,
        }
    }

    pub fn unstable(mut self) -> Self {
        self.stable = false;
        self
    }

    pub fn gamma() -> Self {
        Self::new(names::GAMMA, 0.0, 0)
    }

    pub fn electron() -> Self {
        Self::new(names::ELECTRON, -1.0, 0)
    }

    pub fn positron() -> Self {
        Self::new(names::POSITRON, 1.0, 0)
    }

    pub fn proton() -> Self {
        Self::new(names::PROTON, 1.0, 1)
    }

    pub fn hydrogen() -> Self {
        Self::new(names::HYDROGEN, 0.0, 1)
    }

    pub fn alpha() -> Self {
        Self::new(names::ALPHA, 2.0, 4)
    }

    pub fn alpha_plus() -> Self {
        Self::new(names::ALPHA_PLUS, 1.0, 4)
    }

    pub fn helium() -> Self {
        Self::new(names::HELIUM, 0.0, 4)
    }

    /// Template definition standing in for every ion heavier than alpha
    pub fn generic_ion() -> Self {
        Self::new(names::GENERIC_ION, 1.0, 1)
    }

    /// A concrete ion created on demand, e.g. `C12` with charge 6
    pub fn ion(name: impl Into<String>, charge: f64, nucleons: u32) -> Self {
        Self::new(name, charge, nucleons)
    }
}

/// Reference to a particle as carried by a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleRef {
    pub id: ParticleId,
    /// Charge in units of the elementary charge
    pub charge: f64,
}

impl ParticleRef {
    pub fn new(id: ParticleId, charge: f64) -> Self {
        Self { id, charge }
    }
}

/// The set of particle definitions known to a run
#[derive(Debug, Default, Clone)]
pub struct ParticleTable {
    definitions: Vec<ParticleDefinition>,
    by_name: HashMap<String, ParticleId>,
}

impl ParticleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, returning the existing id if the name is taken
    pub fn insert(&mut self, definition: ParticleDefinition) -> ParticleId {
        if let Some(id) = self.by_name.get(&definition.name) {
            return *id;
        }
        let id = ParticleId(self.definitions.len() as u32);
        self.by_name.insert(definition.name.clone(), id);
        self.definitions.push(definition);
        id
    }

    pub fn find(&self, name: &str) -> Option<ParticleId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: ParticleId) -> Option<&ParticleDefinition> {
        self.definitions.get(id.index())
    }

    /// Build a step reference carrying the definition's charge
    pub fn reference(&self, id: ParticleId) -> Option<ParticleRef> {
        self.get(id).map(|def| ParticleRef::new(id, def.pdg_charge))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &ParticleDefinition)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(i, def)| (ParticleId(i as u32), def))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent_by_name() {
        let mut table = ParticleTable::new();
        let a = table.insert(ParticleDefinition::proton());
        let b = table.insert(ParticleDefinition::proton());
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn reference_carries_definition_charge() {
        let mut table = ParticleTable::new();
        let alpha = table.insert(ParticleDefinition::alpha());
        let r = table.reference(alpha).unwrap();
        assert_eq!(r.id, alpha);
        assert_eq!(r.charge, 2.0);
    }
}
