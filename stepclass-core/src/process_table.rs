//! Per-particle process lists built by the physics modules
//!
//! This models the engine's process manager at the level this crate needs:
//! which named processes, with which subtype codes, are attached to which
//! particle.

use crate::particle::{ParticleId, ParticleTable};
use crate::tracking_cut::CaptureRule;
use std::collections::BTreeMap;
use thiserror::Error;

/// Failure to attach a process to a particle
#[derive(Debug, Error, PartialEq)]
pub enum RegistrationError {
    #[error("particle '{0}' is not defined")]
    UnknownParticle(String),
    #[error("process '{process}' is already registered for '{particle}'")]
    Duplicate { process: String, particle: String },
    #[error("no processes are installed for '{0}'")]
    NoTarget(String),
}

/// What a registered process does
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessKind {
    /// Geometric stepping, no physical interaction
    Transport,
    Physics,
    /// Kills the track below a kinetic energy limit inside a region
    Capture(CaptureRule),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessEntry {
    pub name: String,
    /// Engine subtype code; `None` when the process has no stable code
    pub subtype: Option<i32>,
    pub kind: ProcessKind,
}

impl ProcessEntry {
    pub fn physics(name: impl Into<String>, subtype: i32) -> Self {
        Self {
            name: name.into(),
            subtype: Some(subtype),
            kind: ProcessKind::Physics,
        }
    }

    pub fn transport(name: impl Into<String>, subtype: i32) -> Self {
        Self {
            name: name.into(),
            subtype: Some(subtype),
            kind: ProcessKind::Transport,
        }
    }

    /// A process the engine assigns no subtype to
    pub fn unnumbered(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subtype: None,
            kind: ProcessKind::Physics,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ProcessTable {
    processes: BTreeMap<ParticleId, Vec<ProcessEntry>>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a process to a particle defined in `particles`
    pub fn register(
        &mut self,
        particles: &ParticleTable,
        particle: ParticleId,
        entry: ProcessEntry,
    ) -> Result<(), RegistrationError> {
        let definition = particles
            .get(particle)
            .ok_or_else(|| RegistrationError::UnknownParticle(format!("#{}", particle.index())))?;

        let list = self.processes.entry(particle).or_default();
        if list.iter().any(|p| p.name == entry.name) {
            return Err(RegistrationError::Duplicate {
                process: entry.name,
                particle: definition.name.clone(),
            });
        }
        list.push(entry);
        Ok(())
    }

    /// Attach a process to a particle looked up by name
    pub fn register_by_name(
        &mut self,
        particles: &ParticleTable,
        particle: &str,
        entry: ProcessEntry,
    ) -> Result<(), RegistrationError> {
        let id = particles
            .find(particle)
            .ok_or_else(|| RegistrationError::UnknownParticle(particle.to_string()))?;
        self.register(particles, id, entry)
    }

    pub fn processes_for(&self, particle: ParticleId) -> &[ProcessEntry] {
        self.processes
            .get(&particle)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find(&self, particle: ParticleId, name: &str) -> Option<&ProcessEntry> {
        self.processes_for(particle).iter().find(|p| p.name == name)
    }

    pub fn find_mut(&mut self, particle: ParticleId, name: &str) -> Option<&mut ProcessEntry> {
        self.processes
            .get_mut(&particle)?
            .iter_mut()
            .find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &[ProcessEntry])> {
        self.processes.iter().map(|(id, list)| (*id, list.as_slice()))
    }

    /// Total number of registered (particle, process) pairs
    pub fn len(&self) -> usize {
        self.processes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
