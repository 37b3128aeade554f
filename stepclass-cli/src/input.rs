//! JSON Lines step input
//!
//! One object per line, quantities in engine units (mm, MeV):
//!
//! ```json
//! {"event":0,"track":1,"parent":0,"step":1,"particle":"e-",
//!  "pre":{"position":[0,0,0],"direction":[0,0,1],"kinetic_energy":1e-4},
//!  "post":{"position":[0,0,1e-6],"direction":[0,0,1],"kinetic_energy":8e-5},
//!  "process":{"name":"e-_G4DNAIonisation","subtype":53},"edep":2e-5}
//! ```
//!
//! Particles not defined by the physics list are created as ions from the
//! optional `charge` and `nucleons` fields.

use serde::Deserialize;
use stepclass_core::{Interaction, ParticleDefinition, ParticleRef, ParticleTable, StepData, StepPoint};

#[derive(Debug, Deserialize)]
pub struct StepInput {
    #[serde(default)]
    pub event: i32,
    pub track: i32,
    #[serde(default)]
    pub parent: i32,
    pub step: i32,
    pub particle: String,
    #[serde(default)]
    pub charge: Option<f64>,
    #[serde(default)]
    pub nucleons: Option<u32>,
    pub pre: StepPoint,
    #[serde(default)]
    pub post: Option<StepPoint>,
    #[serde(default)]
    pub process: Option<Interaction>,
    #[serde(default)]
    pub edep: f64,
}

impl StepInput {
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    fn resolve_particle(&self, particles: &mut ParticleTable) -> ParticleRef {
        let id = match particles.find(&self.particle) {
            Some(id) => id,
            None => particles.insert(ParticleDefinition::ion(
                self.particle.clone(),
                self.charge.unwrap_or(0.0),
                self.nucleons.unwrap_or(0),
            )),
        };
        let defined = particles
            .get(id)
            .map(|def| def.pdg_charge)
            .unwrap_or_default();
        ParticleRef::new(id, self.charge.unwrap_or(defined))
    }

    pub fn into_step(self, particles: &mut ParticleTable) -> StepData {
        let particle = self.resolve_particle(particles);
        StepData {
            event_id: self.event,
            track_id: self.track,
            parent_id: self.parent,
            step_number: self.step,
            particle,
            pre: self.pre,
            post: self.post,
            process: self.process,
            energy_deposit: self.edep,
        }
    }
}
