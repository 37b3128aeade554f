//! Low-energy capture of heavy ions inside a region
//!
//! The cut attaches a `Capture` process to the generic ion template. It has
//! to run after every physics module has installed its processes, otherwise
//! there is nothing on the generic ion to attach to.

use crate::particle::{names, ParticleTable};
use crate::process::CAPTURE_PROCESS_NAME;
use crate::process_table::{ProcessEntry, ProcessKind, ProcessTable, RegistrationError};
use crate::units::MEV;

/// Kinetic energy per nucleon below which captured ions are killed
pub const TRACKING_CUT_THRESHOLD: f64 = 0.5 * MEV;

pub const DEFAULT_REGION: &str = "World";

/// Engine-side rule carried by the capture process
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRule {
    pub region: String,
    /// Kinetic energy limit per nucleon
    pub kin_energy_limit: f64,
}

impl CaptureRule {
    /// Whether an ion with `nucleons` and `kinetic_energy` in `region` is killed
    ///
    /// Killing also terminates the ion's secondaries.
    pub fn applies(&self, region: &str, kinetic_energy: f64, nucleons: u32) -> bool {
        if region != self.region {
            return false;
        }
        let per_nucleon = kinetic_energy / f64::from(nucleons.max(1));
        per_nucleon < self.kin_energy_limit
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackingCut {
    region: String,
    threshold: f64,
}

impl Default for TrackingCut {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

impl TrackingCut {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            threshold: TRACKING_CUT_THRESHOLD,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn rule(&self) -> CaptureRule {
        CaptureRule {
            region: self.region.clone(),
            kin_energy_limit: self.threshold,
        }
    }

    /// Find or build the capture process on the generic ion and restrict it
    /// to the region
    pub fn install(
        &self,
        particles: &ParticleTable,
        processes: &mut ProcessTable,
    ) -> Result<(), RegistrationError> {
        let ion = particles
            .find(names::GENERIC_ION)
            .ok_or_else(|| RegistrationError::UnknownParticle(names::GENERIC_ION.to_string()))?;
        if processes.processes_for(ion).is_empty() {
            return Err(RegistrationError::NoTarget(names::GENERIC_ION.to_string()));
        }

        if let Some(existing) = processes.find_mut(ion, CAPTURE_PROCESS_NAME) {
            existing.kind = ProcessKind::Capture(self.rule());
            return Ok(());
        }

        processes.register(
            particles,
            ion,
            ProcessEntry {
                name: CAPTURE_PROCESS_NAME.to_string(),
                subtype: None,
                kind: ProcessKind::Capture(self.rule()),
            },
        )
    }
}
