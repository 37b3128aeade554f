//! Physics modules
//!
//! A module defines particles and attaches processes to them. The EM presets
//! differ in which interactions they make possible, and therefore in which
//! category codes can appear in the output.

use crate::particle::{names, ParticleDefinition, ParticleTable};
use crate::process::subtype::*;
use crate::process_table::{ProcessEntry, ProcessTable};
use std::fmt;
use tracing::warn;

/// A swappable bundle of particle definitions and processes
pub trait PhysicsConstructor {
    fn name(&self) -> &str;

    fn construct_particles(&self, particles: &mut ParticleTable);

    fn construct_processes(&self, particles: &ParticleTable, processes: &mut ProcessTable);
}

/// Register a process, logging and continuing on failure
pub(crate) fn register_or_warn(
    particles: &ParticleTable,
    processes: &mut ProcessTable,
    particle: &str,
    entry: ProcessEntry,
) -> bool {
    let process = entry.name.clone();
    match processes.register_by_name(particles, particle, entry) {
        Ok(()) => true,
        Err(e) => {
            warn!(process = %process, particle, "failed to register process: {}", e);
            false
        }
    }
}

/// Attach transportation to every defined particle
pub fn add_transportation(particles: &ParticleTable, processes: &mut ProcessTable) {
    for (id, definition) in particles.iter() {
        if let Err(e) = processes.register(
            particles,
            id,
            ProcessEntry::transport("Transportation", TRANSPORTATION),
        ) {
            warn!(particle = %definition.name, "failed to add transportation: {}", e);
        }
    }
}

// ============================================================================
// Electromagnetic presets
// ============================================================================

/// Closed set of electromagnetic physics presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmPreset {
    StandardOpt0,
    StandardOpt3,
    StandardOpt4,
    Livermore,
    Penelope,
    DnaOpt0,
    DnaOpt1,
    DnaOpt2,
    DnaOpt3,
    DnaOpt4,
    DnaOpt5,
    DnaOpt6,
    DnaOpt7,
    DnaOpt8,
}

impl EmPreset {
    pub const DEFAULT: EmPreset = EmPreset::DnaOpt2;

    pub const ALL: [EmPreset; 14] = [
        EmPreset::StandardOpt0,
        EmPreset::StandardOpt3,
        EmPreset::StandardOpt4,
        EmPreset::Livermore,
        EmPreset::Penelope,
        EmPreset::DnaOpt0,
        EmPreset::DnaOpt1,
        EmPreset::DnaOpt2,
        EmPreset::DnaOpt3,
        EmPreset::DnaOpt4,
        EmPreset::DnaOpt5,
        EmPreset::DnaOpt6,
        EmPreset::DnaOpt7,
        EmPreset::DnaOpt8,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EmPreset::StandardOpt0 => "emstandard_opt0",
            EmPreset::StandardOpt3 => "emstandard_opt3",
            EmPreset::StandardOpt4 => "emstandard_opt4",
            EmPreset::Livermore => "emlivermore",
            EmPreset::Penelope => "empenelope",
            EmPreset::DnaOpt0 => "DNA_Opt0",
            EmPreset::DnaOpt1 => "DNA_Opt1",
            EmPreset::DnaOpt2 => "DNA_Opt2",
            EmPreset::DnaOpt3 => "DNA_Opt3",
            EmPreset::DnaOpt4 => "DNA_Opt4",
            EmPreset::DnaOpt5 => "DNA_Opt5",
            EmPreset::DnaOpt6 => "DNA_Opt6",
            EmPreset::DnaOpt7 => "DNA_Opt7",
            EmPreset::DnaOpt8 => "DNA_Opt8",
        }
    }

    pub fn from_name(name: &str) -> Option<EmPreset> {
        EmPreset::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Track-structure presets model individual interactions in water
    pub fn is_dna(self) -> bool {
        !matches!(
            self,
            EmPreset::StandardOpt0
                | EmPreset::StandardOpt3
                | EmPreset::StandardOpt4
                | EmPreset::Livermore
                | EmPreset::Penelope
        )
    }

    /// Condensed-history presets that enable nuclear stopping for hadrons
    fn has_nuclear_stopping(self) -> bool {
        self.is_dna() || matches!(self, EmPreset::StandardOpt3 | EmPreset::StandardOpt4)
    }

    /// Options 4 and 6 use electron models without vibrational excitation
    /// and attachment
    fn has_low_energy_electron_channels(self) -> bool {
        self.is_dna() && !matches!(self, EmPreset::DnaOpt4 | EmPreset::DnaOpt6)
    }
}

impl fmt::Display for EmPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Electromagnetic physics built from a preset
#[derive(Debug, Clone)]
pub struct EmPhysics {
    preset: EmPreset,
}

impl EmPhysics {
    pub fn new(preset: EmPreset) -> Self {
        Self { preset }
    }

    fn construct_standard(&self, particles: &ParticleTable, processes: &mut ProcessTable) {
        let mut add = |particle: &str, name: &str, subtype: i32| {
            register_or_warn(particles, processes, particle, ProcessEntry::physics(name, subtype));
        };

        add(names::GAMMA, "phot", PHOTOELECTRIC);
        add(names::GAMMA, "compt", COMPTON);
        add(names::GAMMA, "conv", GAMMA_CONVERSION);
        add(names::GAMMA, "Rayl", RAYLEIGH);

        for lepton in [names::ELECTRON, names::POSITRON] {
            add(lepton, "msc", MULTIPLE_SCATTERING);
            add(lepton, "eIoni", IONISATION);
            add(lepton, "eBrem", BREMSSTRAHLUNG);
            add(lepton, "CoulombScat", COULOMB_SCATTERING);
        }
        add(names::POSITRON, "annihil", ANNIHILATION);

        add(names::PROTON, "msc", MULTIPLE_SCATTERING);
        add(names::PROTON, "hIoni", IONISATION);
        add(names::PROTON, "hBrems", BREMSSTRAHLUNG);
        add(names::PROTON, "hPairProd", PAIR_PRODUCTION);
        add(names::PROTON, "CoulombScat", COULOMB_SCATTERING);

        for ion in [names::ALPHA, names::GENERIC_ION] {
            add(ion, "msc", MULTIPLE_SCATTERING);
            add(ion, "ionIoni", IONISATION);
        }

        if self.preset.has_nuclear_stopping() {
            for hadron in [names::PROTON, names::ALPHA, names::GENERIC_ION] {
                add(hadron, "nuclearStopping", NUCLEAR_STOPPING);
            }
        }
    }

    fn construct_dna(&self, particles: &ParticleTable, processes: &mut ProcessTable) {
        let mut add = |particle: &str, name: &str, subtype: i32| {
            register_or_warn(particles, processes, particle, ProcessEntry::physics(name, subtype));
        };
        let dna = |particle: &str, kind: &str| format!("{}_G4DNA{}", particle, kind);

        add(names::GAMMA, "phot", PHOTOELECTRIC);
        add(names::GAMMA, "compt", COMPTON);
        add(names::GAMMA, "conv", GAMMA_CONVERSION);
        add(names::GAMMA, "Rayl", RAYLEIGH);

        // Condensed history above the track-structure range
        add(names::ELECTRON, "msc", MULTIPLE_SCATTERING);
        add(names::ELECTRON, "eIoni", IONISATION);
        add(names::ELECTRON, "eBrem", BREMSSTRAHLUNG);
        add(names::ELECTRON, "CoulombScat", COULOMB_SCATTERING);

        let e = names::ELECTRON;
        add(e, &dna(e, "ElectronSolvation"), DNA_ELECTRON_SOLVATION);
        add(e, &dna(e, "Elastic"), DNA_ELASTIC);
        add(e, &dna(e, "Excitation"), DNA_EXCITATION);
        add(e, &dna(e, "Ionisation"), DNA_IONISATION);
        if self.preset.has_low_energy_electron_channels() {
            add(e, &dna(e, "VibExcitation"), DNA_VIB_EXCITATION);
            add(e, &dna(e, "Attachment"), DNA_ATTACHMENT);
        }

        add(names::POSITRON, "msc", MULTIPLE_SCATTERING);
        add(names::POSITRON, "eIoni", IONISATION);
        add(names::POSITRON, "eBrem", BREMSSTRAHLUNG);
        add(names::POSITRON, "annihil", ANNIHILATION);

        let p = names::PROTON;
        add(p, "msc", MULTIPLE_SCATTERING);
        add(p, "hIoni", IONISATION);
        add(p, "CoulombScat", COULOMB_SCATTERING);
        add(p, "nuclearStopping", NUCLEAR_STOPPING);
        add(p, &dna(p, "Elastic"), DNA_ELASTIC);
        add(p, &dna(p, "Excitation"), DNA_EXCITATION);
        add(p, &dna(p, "Ionisation"), DNA_IONISATION);
        add(p, &dna(p, "ChargeDecrease"), DNA_CHARGE_DECREASE);

        for neutral in [names::HYDROGEN, names::HELIUM] {
            add(neutral, &dna(neutral, "Elastic"), DNA_ELASTIC);
            add(neutral, &dna(neutral, "Excitation"), DNA_EXCITATION);
            add(neutral, &dna(neutral, "Ionisation"), DNA_IONISATION);
            add(neutral, &dna(neutral, "ChargeIncrease"), DNA_CHARGE_INCREASE);
        }

        for helium_ion in [names::ALPHA, names::ALPHA_PLUS] {
            add(helium_ion, "msc", MULTIPLE_SCATTERING);
            add(helium_ion, "ionIoni", IONISATION);
            add(helium_ion, "nuclearStopping", NUCLEAR_STOPPING);
            add(helium_ion, &dna(helium_ion, "Elastic"), DNA_ELASTIC);
            add(helium_ion, &dna(helium_ion, "Excitation"), DNA_EXCITATION);
            add(helium_ion, &dna(helium_ion, "Ionisation"), DNA_IONISATION);
            add(helium_ion, &dna(helium_ion, "ChargeDecrease"), DNA_CHARGE_DECREASE);
        }
        add(
            names::ALPHA_PLUS,
            &dna(names::ALPHA_PLUS, "ChargeIncrease"),
            DNA_CHARGE_INCREASE,
        );

        let ion = names::GENERIC_ION;
        add(ion, "msc", MULTIPLE_SCATTERING);
        add(ion, "ionIoni", IONISATION);
        add(ion, "nuclearStopping", NUCLEAR_STOPPING);
        add(ion, &dna(ion, "Ionisation"), DNA_IONISATION);
    }
}

impl PhysicsConstructor for EmPhysics {
    fn name(&self) -> &str {
        self.preset.name()
    }

    fn construct_particles(&self, particles: &mut ParticleTable) {
        particles.insert(ParticleDefinition::gamma());
        particles.insert(ParticleDefinition::electron());
        particles.insert(ParticleDefinition::positron());
        particles.insert(ParticleDefinition::proton());
        particles.insert(ParticleDefinition::alpha());
        particles.insert(ParticleDefinition::generic_ion());
        if self.preset.is_dna() {
            particles.insert(ParticleDefinition::hydrogen());
            particles.insert(ParticleDefinition::alpha_plus());
            particles.insert(ParticleDefinition::helium());
        }
    }

    fn construct_processes(&self, particles: &ParticleTable, processes: &mut ProcessTable) {
        if self.preset.is_dna() {
            self.construct_dna(particles, processes);
        } else {
            self.construct_standard(particles, processes);
        }
    }
}

// ============================================================================
// Decay
// ============================================================================

/// Decay of unstable elementary particles
#[derive(Debug, Clone, Default)]
pub struct DecayPhysics;

impl PhysicsConstructor for DecayPhysics {
    fn name(&self) -> &str {
        "Decay"
    }

    fn construct_particles(&self, particles: &mut ParticleTable) {
        particles.insert(ParticleDefinition::new("mu-", -1.0, 0).unstable());
        particles.insert(ParticleDefinition::new("mu+", 1.0, 0).unstable());
        particles.insert(ParticleDefinition::new("pi-", -1.0, 0).unstable());
        particles.insert(ParticleDefinition::new("pi+", 1.0, 0).unstable());
        particles.insert(ParticleDefinition::new("neutron", 0.0, 1));
    }

    fn construct_processes(&self, particles: &ParticleTable, processes: &mut ProcessTable) {
        let unstable: Vec<_> = particles
            .iter()
            .filter(|(_, def)| !def.stable)
            .map(|(id, _)| id)
            .collect();
        for id in unstable {
            if let Err(e) = processes.register(particles, id, ProcessEntry::physics("Decay", DECAY)) {
                warn!("failed to register decay: {}", e);
            }
        }
    }
}

/// Radioactive decay of ions, attached to the generic ion template
#[derive(Debug, Clone, Default)]
pub struct RadioactiveDecayPhysics;

impl PhysicsConstructor for RadioactiveDecayPhysics {
    fn name(&self) -> &str {
        "raddecay"
    }

    fn construct_particles(&self, particles: &mut ParticleTable) {
        particles.insert(ParticleDefinition::generic_ion());
    }

    fn construct_processes(&self, particles: &ParticleTable, processes: &mut ProcessTable) {
        register_or_warn(
            particles,
            processes,
            names::GENERIC_ION,
            ProcessEntry::physics("RadioactiveDecay", RADIOACTIVE_DECAY),
        );
    }
}

// ============================================================================
// Multiple ionisation
// ============================================================================

/// Double, triple and quadruple ionisation for hadrons and ions
///
/// These processes carry no subtype code, so they never produce a
/// classified category.
#[derive(Debug, Clone)]
pub struct MultipleIonisation {
    pub include_hydrogen: bool,
}

impl Default for MultipleIonisation {
    fn default() -> Self {
        Self {
            include_hydrogen: true,
        }
    }
}

impl MultipleIonisation {
    pub const ORDERS: [&'static str; 3] = ["Double", "Triple", "Quadruple"];

    pub fn targets(&self) -> Vec<&'static str> {
        let mut targets = vec![names::PROTON, names::ALPHA, names::GENERIC_ION];
        if self.include_hydrogen {
            targets.push(names::HYDROGEN);
        }
        targets
    }

    /// Returns the number of processes that failed to register
    pub fn construct_processes(&self, particles: &ParticleTable, processes: &mut ProcessTable) -> usize {
        let mut failed = 0;
        for particle in self.targets() {
            for order in Self::ORDERS {
                let name = format!("{}_G4DNA{}Ionisation", particle, order);
                if !register_or_warn(particles, processes, particle, ProcessEntry::unnumbered(name)) {
                    failed += 1;
                }
            }
        }
        failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_names_round_trip() {
        for preset in EmPreset::ALL {
            assert_eq!(EmPreset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(EmPreset::from_name("DNA_Opt9"), None);
    }

    #[test]
    fn standard_presets_do_not_define_dna_ions() {
        let mut particles = ParticleTable::new();
        EmPhysics::new(EmPreset::StandardOpt0).construct_particles(&mut particles);
        assert!(particles.find(names::HYDROGEN).is_none());
        assert!(particles.find(names::GENERIC_ION).is_some());
    }
}
