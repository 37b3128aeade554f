//! Test helper utilities for stepclass tests

use crate::encoder::{StepData, StepPoint, StepRecordEncoder};
use crate::particle::{ParticleDefinition, ParticleRef, ParticleTable};
use crate::physics_list::PhysicsList;
use crate::process::Interaction;
use crate::process_table::ProcessTable;
use glam::DVec3;

/// Check if two floating point values are approximately equal within tolerance
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Tables built by the default physics list (DNA_Opt2, no tracking cut)
pub fn default_tables() -> (ParticleTable, ProcessTable) {
    PhysicsList::default().build_tables()
}

/// Encoder over the default particle table
pub fn default_encoder() -> (ParticleTable, StepRecordEncoder) {
    let (particles, _) = default_tables();
    let encoder = StepRecordEncoder::for_particles(&particles);
    (particles, encoder)
}

/// Reference to a canonical particle, panicking if it is not defined
pub fn particle(particles: &ParticleTable, name: &str) -> ParticleRef {
    let id = particles
        .find(name)
        .unwrap_or_else(|| panic!("particle '{}' is not defined", name));
    particles.reference(id).unwrap()
}

/// Define (or reuse) a concrete ion, the way the engine creates them on demand
pub fn ion(particles: &mut ParticleTable, name: &str, charge: f64, nucleons: u32) -> ParticleRef {
    let id = particles.insert(ParticleDefinition::ion(name, charge, nucleons));
    particles.reference(id).unwrap()
}

/// Builder for step data in engine units
pub struct StepBuilder {
    step: StepData,
}

impl StepBuilder {
    /// A step along +z from the origin, 1 nm long, with no energy change
    pub fn new(particle: ParticleRef) -> Self {
        let point = StepPoint {
            position: DVec3::ZERO,
            direction: DVec3::Z,
            kinetic_energy: 0.0,
        };
        Self {
            step: StepData {
                event_id: 0,
                track_id: 1,
                parent_id: 0,
                step_number: 1,
                particle,
                pre: point,
                post: Some(StepPoint {
                    position: DVec3::new(0.0, 0.0, 1.0e-6),
                    ..point
                }),
                process: None,
                energy_deposit: 0.0,
            },
        }
    }

    pub fn process(mut self, name: &str, subtype: i32) -> Self {
        self.step.process = Some(Interaction::new(name, subtype));
        self
    }

    pub fn named_process(mut self, name: &str) -> Self {
        self.step.process = Some(Interaction::named(name));
        self
    }

    pub fn energies(mut self, pre: f64, post: f64) -> Self {
        self.step.pre.kinetic_energy = pre;
        if let Some(p) = self.step.post.as_mut() {
            p.kinetic_energy = post;
        }
        self
    }

    pub fn positions(mut self, pre: DVec3, post: DVec3) -> Self {
        self.step.pre.position = pre;
        if let Some(p) = self.step.post.as_mut() {
            p.position = post;
        }
        self
    }

    pub fn directions(mut self, pre: DVec3, post: DVec3) -> Self {
        self.step.pre.direction = pre;
        if let Some(p) = self.step.post.as_mut() {
            p.direction = post;
        }
        self
    }

    pub fn energy_deposit(mut self, edep: f64) -> Self {
        self.step.energy_deposit = edep;
        self
    }

    pub fn ids(mut self, event: i32, track: i32, parent: i32, step_number: i32) -> Self {
        self.step.event_id = event;
        self.step.track_id = track;
        self.step.parent_id = parent;
        self.step.step_number = step_number;
        self
    }

    pub fn without_post(mut self) -> Self {
        self.step.post = None;
        self
    }

    pub fn build(self) -> StepData {
        self.step
    }
}
