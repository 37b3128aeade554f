//! One tabular record per physical step
//!
//! Positions are written in nanometres and energies in eV. Every quantity is
//! converted from engine units exactly once, before any derived value is
//! computed from it.

use crate::particle::{ParticleRef, ParticleTable};
use crate::process::{CategoryCode, Interaction, ProcessClassifier};
use crate::species::{ParticleClassifier, Species};
use crate::units::{EV, NANOMETER};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Process names that denote geometric stepping rather than an interaction
pub const TRANSPORT_PROCESS_NAMES: [&str; 2] = ["Transportation", "CoupledTransportation"];

/// Engine state at one end of a step, in engine units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepPoint {
    pub position: DVec3,
    /// Unit momentum direction
    pub direction: DVec3,
    pub kinetic_energy: f64,
}

/// Everything the engine exposes about a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepData {
    pub event_id: i32,
    pub track_id: i32,
    pub parent_id: i32,
    pub step_number: i32,
    pub particle: ParticleRef,
    pub pre: StepPoint,
    pub post: Option<StepPoint>,
    /// Interaction that limited the step
    pub process: Option<Interaction>,
    pub energy_deposit: f64,
}

/// A single output row
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub species: Species,
    pub category: CategoryCode,
    /// nm
    pub pre_position: DVec3,
    /// nm
    pub post_position: DVec3,
    /// eV
    pub energy_deposit: f64,
    /// nm
    pub displacement: f64,
    /// eV
    pub kinetic_energy_loss: f64,
    /// eV
    pub pre_kinetic_energy: f64,
    pub cos_theta: f64,
    pub event_id: i32,
    pub track_id: i32,
    pub parent_id: i32,
    pub step_number: i32,
}

pub fn is_transport(process_name: &str) -> bool {
    TRANSPORT_PROCESS_NAMES.contains(&process_name)
}

/// Turns step data into records using both classifiers
#[derive(Debug, Clone)]
pub struct StepRecordEncoder {
    particles: ParticleClassifier,
    processes: ProcessClassifier,
}

impl StepRecordEncoder {
    pub fn new(particles: ParticleClassifier, processes: ProcessClassifier) -> Self {
        Self {
            particles,
            processes,
        }
    }

    /// Encoder using the standard category table
    pub fn for_particles(particles: &ParticleTable) -> Self {
        Self::new(ParticleClassifier::new(particles), ProcessClassifier::new())
    }

    /// Classify a step without building a record
    pub fn classify(&self, step: &StepData) -> (Species, CategoryCode) {
        let species = self.particles.classify(&step.particle);
        let category = step
            .process
            .as_ref()
            .map(|interaction| self.processes.classify(species, interaction))
            .unwrap_or(CategoryCode::UNCLASSIFIED);
        (species, category)
    }

    /// Returns `None` for transport steps and for steps missing their
    /// post-step point or limiting process
    pub fn encode(&self, step: &StepData) -> Option<StepRecord> {
        let post = step.post.as_ref()?;
        let interaction = step.process.as_ref()?;
        if is_transport(&interaction.name) {
            return None;
        }

        let (species, category) = self.classify(step);

        let pre_position = step.pre.position / NANOMETER;
        let post_position = post.position / NANOMETER;

        Some(StepRecord {
            species,
            category,
            pre_position,
            post_position,
            energy_deposit: step.energy_deposit / EV,
            displacement: pre_position.distance(post_position),
            kinetic_energy_loss: (step.pre.kinetic_energy - post.kinetic_energy) / EV,
            pre_kinetic_energy: step.pre.kinetic_energy / EV,
            cos_theta: step.pre.direction.dot(post.direction),
            event_id: step.event_id,
            track_id: step.track_id,
            parent_id: step.parent_id,
            step_number: step.step_number,
        })
    }
}
