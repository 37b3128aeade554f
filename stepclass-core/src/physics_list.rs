//! The active physics configuration of a run
//!
//! Holds one electromagnetic module, the decay module, an optional
//! radioactive-decay module and the tracking-cut toggle. The EM slot can be
//! replaced by name before the process tables are built; nothing here may be
//! changed while stepping.

use crate::config::PhysicsConfig;
use crate::particle::ParticleTable;
use crate::physics::{
    add_transportation, DecayPhysics, EmPhysics, EmPreset, MultipleIonisation, PhysicsConstructor,
    RadioactiveDecayPhysics,
};
use crate::process_table::ProcessTable;
use crate::tracking_cut::TrackingCut;
use crate::units::{EV, GEV, MICROMETER, PICOSECOND};
use tracing::{info, warn};

/// Name that requests the additive radioactive-decay module
pub const RADIOACTIVE_DECAY_MODULE: &str = "raddecay";

/// Cut and range values fixed when the list is created
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsSettings {
    pub default_cut: f64,
    /// Production-cut energy range (low, high)
    pub cut_energy_range: (f64, f64),
    pub em_min_energy: f64,
    pub em_max_energy: f64,
    /// Nuclides with shorter half-lives are not tracked as ions
    pub half_life_threshold: f64,
    pub level_tolerance: f64,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            default_cut: 1.0 * MICROMETER,
            cut_energy_range: (100.0 * EV, 1.0 * GEV),
            em_min_energy: 100.0 * EV,
            em_max_energy: 1.0 * GEV,
            half_life_threshold: 0.1 * PICOSECOND,
            level_tolerance: 1.0 * EV,
        }
    }
}

/// Outcome of [`PhysicsList::select_module`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Already active, or radioactive decay already present
    Unchanged,
    Replaced { previous: EmPreset },
    AddedRadioactiveDecay,
    Rejected,
}

pub struct PhysicsList {
    settings: PhysicsSettings,
    em_preset: EmPreset,
    em_physics: Box<dyn PhysicsConstructor>,
    decay_physics: Box<dyn PhysicsConstructor>,
    rad_decay_physics: Option<Box<dyn PhysicsConstructor>>,
    multiple_ionisation: MultipleIonisation,
    tracking_cut: Option<TrackingCut>,
    tracking_cut_applied: bool,
}

impl Default for PhysicsList {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default())
    }
}

impl PhysicsList {
    pub fn new(config: &PhysicsConfig) -> Self {
        let mut list = Self {
            settings: PhysicsSettings::default(),
            em_preset: EmPreset::DEFAULT,
            em_physics: Box::new(EmPhysics::new(EmPreset::DEFAULT)),
            decay_physics: Box::new(DecayPhysics),
            rad_decay_physics: None,
            multiple_ionisation: MultipleIonisation {
                include_hydrogen: config.multiple_ionisation_hydrogen,
            },
            tracking_cut: None,
            tracking_cut_applied: false,
        };

        list.select_module(&config.em_module);
        if config.radioactive_decay {
            list.select_module(RADIOACTIVE_DECAY_MODULE);
        }
        if config.tracking_cut {
            list.tracking_cut = Some(TrackingCut::new(config.tracking_cut_region.clone()));
        }
        list
    }

    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    pub fn em_preset(&self) -> EmPreset {
        self.em_preset
    }

    /// Name of the active EM module
    pub fn em_name(&self) -> &str {
        self.em_physics.name()
    }

    pub fn has_radioactive_decay(&self) -> bool {
        self.rad_decay_physics.is_some()
    }

    pub fn tracking_cut(&self) -> Option<&TrackingCut> {
        self.tracking_cut.as_ref()
    }

    pub fn tracking_cut_applied(&self) -> bool {
        self.tracking_cut_applied
    }

    /// Select an EM preset by name, or add radioactive decay with `raddecay`
    ///
    /// Unknown names are logged and ignored.
    pub fn select_module(&mut self, name: &str) -> Selection {
        if name == self.em_name() {
            return Selection::Unchanged;
        }

        warn!(module = name, "physics list <{}> is requested", name);

        if name == RADIOACTIVE_DECAY_MODULE {
            if self.rad_decay_physics.is_some() {
                return Selection::Unchanged;
            }
            self.rad_decay_physics = Some(Box::new(RadioactiveDecayPhysics));
            info!("radioactive decay module added");
            return Selection::AddedRadioactiveDecay;
        }

        match EmPreset::from_name(name) {
            Some(preset) => {
                let previous = self.em_preset;
                self.em_physics = Box::new(EmPhysics::new(preset));
                self.em_preset = preset;
                info!(from = %previous, to = %preset, "EM module replaced");
                Selection::Replaced { previous }
            }
            None => {
                warn!(
                    module = name,
                    "physics list <{}> does not exist - the command is ignored", name
                );
                Selection::Rejected
            }
        }
    }

    /// Enable or disable the tracking cut
    ///
    /// Has no effect once the cut has been installed.
    pub fn set_tracking_cut(&mut self, enabled: bool) {
        if self.tracking_cut_applied {
            warn!("tracking cut already installed, toggle ignored");
            return;
        }
        self.tracking_cut = if enabled {
            Some(self.tracking_cut.take().unwrap_or_default())
        } else {
            None
        };
    }

    pub fn construct_particles(&self, particles: &mut ParticleTable) {
        self.em_physics.construct_particles(particles);
        self.decay_physics.construct_particles(particles);
    }

    /// Build every module's processes; the tracking cut goes last
    pub fn construct_processes(&mut self, particles: &ParticleTable, processes: &mut ProcessTable) {
        add_transportation(particles, processes);
        self.em_physics.construct_processes(particles, processes);
        self.decay_physics.construct_processes(particles, processes);
        self.multiple_ionisation.construct_processes(particles, processes);
        if let Some(rad_decay) = &self.rad_decay_physics {
            rad_decay.construct_processes(particles, processes);
        }
        self.apply_tracking_cut(particles, processes);
    }

    /// Installs into every table built, so rebuilt tables keep the cut
    fn apply_tracking_cut(&mut self, particles: &ParticleTable, processes: &mut ProcessTable) {
        let Some(cut) = &self.tracking_cut else {
            return;
        };
        match cut.install(particles, processes) {
            Ok(()) => {
                info!(region = cut.region(), "tracking cut installed");
                self.tracking_cut_applied = true;
            }
            Err(e) => warn!("failed to install tracking cut: {}", e),
        }
    }

    /// Convenience: build both tables from a fresh state
    pub fn build_tables(&mut self) -> (ParticleTable, ProcessTable) {
        let mut particles = ParticleTable::new();
        let mut processes = ProcessTable::new();
        self.construct_particles(&mut particles);
        self.construct_processes(&particles, &mut processes);
        (particles, processes)
    }
}
