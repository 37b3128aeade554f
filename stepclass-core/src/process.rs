//! Interaction category classification
//!
//! Each species owns a disjoint set of category codes. The decade of a code
//! identifies the species family (10s for electrons, 20s for protons, 70s for
//! heavy ions, 80s for photons) and the low digit identifies the interaction.
//! Condensed-history interactions shared by the charged species use a
//! three-digit code `species_decade * 10 + {10, 20, 30, 40}`:
//!
//! | suffix | interaction |
//! |--------|-------------|
//! | 10 | multiple scattering |
//! | 20 | single Coulomb scattering |
//! | 30 | ionisation |
//! | 40 | nuclear stopping |
//!
//! Dispatch is on the engine's numeric subtype, with one exception: the
//! heavy-ion capture process used by the tracking cut has no stable subtype,
//! so for heavy ions it is matched by its name before anything else.

use self::subtype::*;
use crate::particle::{names, ParticleRef, ParticleTable};
use crate::process_table::ProcessTable;
use crate::species::{ParticleClassifier, Species};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Engine subtype codes
pub mod subtype {
    pub const COULOMB_SCATTERING: i32 = 1;
    pub const IONISATION: i32 = 2;
    pub const BREMSSTRAHLUNG: i32 = 3;
    pub const PAIR_PRODUCTION: i32 = 4;
    pub const ANNIHILATION: i32 = 5;
    pub const NUCLEAR_STOPPING: i32 = 8;
    pub const MULTIPLE_SCATTERING: i32 = 10;
    pub const RAYLEIGH: i32 = 11;
    pub const PHOTOELECTRIC: i32 = 12;
    pub const COMPTON: i32 = 13;
    pub const GAMMA_CONVERSION: i32 = 14;

    pub const DNA_ELASTIC: i32 = 51;
    pub const DNA_EXCITATION: i32 = 52;
    pub const DNA_IONISATION: i32 = 53;
    pub const DNA_VIB_EXCITATION: i32 = 54;
    pub const DNA_ATTACHMENT: i32 = 55;
    pub const DNA_CHARGE_DECREASE: i32 = 56;
    pub const DNA_CHARGE_INCREASE: i32 = 57;
    pub const DNA_ELECTRON_SOLVATION: i32 = 58;

    pub const TRANSPORTATION: i32 = 91;
    pub const DECAY: i32 = 201;
    pub const RADIOACTIVE_DECAY: i32 = 210;
}

/// Name of the heavy-ion capture process installed by the tracking cut
pub const CAPTURE_PROCESS_NAME: &str = "Capture";

/// The interaction that ended a step, as reported by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub name: String,
    #[serde(default)]
    pub subtype: Option<i32>,
}

impl Interaction {
    pub fn new(name: impl Into<String>, subtype: i32) -> Self {
        Self {
            name: name.into(),
            subtype: Some(subtype),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subtype: None,
        }
    }
}

/// Interaction category as written to the category column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryCode(i32);

impl CategoryCode {
    /// No mapping exists for the (species, interaction) pair
    pub const UNCLASSIFIED: CategoryCode = CategoryCode(-1);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn is_classified(self) -> bool {
        self != Self::UNCLASSIFIED
    }

    /// True for the shared condensed-history codes (x10, x20, x30, x40)
    pub fn is_continuum(self) -> bool {
        self.0 >= 100 && self.0 % 10 == 0 && (1..=4).contains(&(self.0 % 100 / 10))
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const TABLE: &[(Species, i32, i32)] = &[
    (Species::Photon, PHOTOELECTRIC, 81),
    (Species::Photon, COMPTON, 82),
    (Species::Photon, GAMMA_CONVERSION, 83),
    (Species::Photon, RAYLEIGH, 84),
    (Species::Electron, DNA_ELECTRON_SOLVATION, 10),
    (Species::Electron, DNA_ELASTIC, 11),
    (Species::Electron, DNA_EXCITATION, 12),
    (Species::Electron, DNA_IONISATION, 13),
    (Species::Electron, DNA_ATTACHMENT, 14),
    (Species::Electron, DNA_VIB_EXCITATION, 15),
    (Species::Electron, MULTIPLE_SCATTERING, 110),
    (Species::Electron, COULOMB_SCATTERING, 120),
    (Species::Electron, IONISATION, 130),
    (Species::Proton, DNA_ELASTIC, 21),
    (Species::Proton, DNA_EXCITATION, 22),
    (Species::Proton, DNA_IONISATION, 23),
    (Species::Proton, DNA_CHARGE_DECREASE, 24),
    (Species::Proton, MULTIPLE_SCATTERING, 210),
    (Species::Proton, COULOMB_SCATTERING, 220),
    (Species::Proton, IONISATION, 230),
    (Species::Proton, NUCLEAR_STOPPING, 240),
    (Species::Hydrogen, DNA_ELASTIC, 31),
    (Species::Hydrogen, DNA_EXCITATION, 32),
    (Species::Hydrogen, DNA_IONISATION, 33),
    (Species::Hydrogen, DNA_CHARGE_INCREASE, 35),
    (Species::Alpha, DNA_ELASTIC, 41),
    (Species::Alpha, DNA_EXCITATION, 42),
    (Species::Alpha, DNA_IONISATION, 43),
    (Species::Alpha, DNA_CHARGE_DECREASE, 44),
    (Species::Alpha, MULTIPLE_SCATTERING, 410),
    (Species::Alpha, COULOMB_SCATTERING, 420),
    (Species::Alpha, IONISATION, 430),
    (Species::Alpha, NUCLEAR_STOPPING, 440),
    (Species::AlphaPlus, DNA_ELASTIC, 51),
    (Species::AlphaPlus, DNA_EXCITATION, 52),
    (Species::AlphaPlus, DNA_IONISATION, 53),
    (Species::AlphaPlus, DNA_CHARGE_DECREASE, 54),
    (Species::AlphaPlus, DNA_CHARGE_INCREASE, 55),
    (Species::AlphaPlus, MULTIPLE_SCATTERING, 510),
    (Species::AlphaPlus, COULOMB_SCATTERING, 520),
    (Species::AlphaPlus, IONISATION, 530),
    (Species::AlphaPlus, NUCLEAR_STOPPING, 540),
    (Species::Helium, DNA_ELASTIC, 61),
    (Species::Helium, DNA_EXCITATION, 62),
    (Species::Helium, DNA_IONISATION, 63),
    (Species::Helium, DNA_CHARGE_INCREASE, 65),
    (Species::HeavyIon, RADIOACTIVE_DECAY, 2),
    (Species::HeavyIon, DNA_IONISATION, 73),
    (Species::HeavyIon, MULTIPLE_SCATTERING, 710),
    (Species::HeavyIon, COULOMB_SCATTERING, 720),
    (Species::HeavyIon, IONISATION, 730),
    (Species::HeavyIon, NUCLEAR_STOPPING, 740),
];

/// Category assigned to heavy-ion capture
pub const CAPTURE_CATEGORY: CategoryCode = CategoryCode(1);

/// Maps (species, interaction) pairs to category codes
#[derive(Debug, Clone)]
pub struct ProcessClassifier {
    table: HashMap<(Species, i32), CategoryCode>,
}

impl Default for ProcessClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessClassifier {
    pub fn new() -> Self {
        let table = TABLE
            .iter()
            .map(|&(species, subtype, code)| ((species, subtype), CategoryCode(code)))
            .collect();
        Self { table }
    }

    pub fn classify(&self, species: Species, interaction: &Interaction) -> CategoryCode {
        if species == Species::HeavyIon && interaction.name == CAPTURE_PROCESS_NAME {
            return CAPTURE_CATEGORY;
        }
        match interaction.subtype {
            Some(code) => self.classify_subtype(species, code),
            None => CategoryCode::UNCLASSIFIED,
        }
    }

    /// Lookup by subtype alone, without the capture name rule
    pub fn classify_subtype(&self, species: Species, subtype: i32) -> CategoryCode {
        self.table
            .get(&(species, subtype))
            .copied()
            .unwrap_or(CategoryCode::UNCLASSIFIED)
    }

    /// Subtype-keyed entries for one species, ordered by code
    pub fn entries(&self, species: Species) -> Vec<(i32, CategoryCode)> {
        let mut entries: Vec<_> = self
            .table
            .iter()
            .filter(|((s, _), _)| *s == species)
            .map(|((_, subtype), code)| (*subtype, *code))
            .collect();
        entries.sort_by_key(|(_, code)| *code);
        entries
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Category codes that installed processes can produce
///
/// Processes attached to the generic ion template are attributed to
/// [`Species::HeavyIon`], since every concrete heavy ion shares them.
pub fn reachable_categories(
    particles: &ParticleTable,
    processes: &ProcessTable,
    particle_classifier: &ParticleClassifier,
    process_classifier: &ProcessClassifier,
) -> BTreeSet<(Species, CategoryCode)> {
    let mut reachable = BTreeSet::new();

    for (id, entries) in processes.iter() {
        let Some(definition) = particles.get(id) else {
            continue;
        };
        let species = if definition.name == names::GENERIC_ION {
            Species::HeavyIon
        } else {
            particle_classifier.classify(&ParticleRef::new(id, definition.pdg_charge))
        };

        for entry in entries {
            let interaction = Interaction {
                name: entry.name.clone(),
                subtype: entry.subtype,
            };
            let code = process_classifier.classify(species, &interaction);
            if code.is_classified() {
                reachable.insert((species, code));
            }
        }
    }

    reachable
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuum_digit_pattern() {
        assert!(CategoryCode::new(210).is_continuum());
        assert!(CategoryCode::new(740).is_continuum());
        assert!(!CategoryCode::new(13).is_continuum());
        assert!(!CategoryCode::new(84).is_continuum());
        assert!(!CategoryCode::UNCLASSIFIED.is_continuum());
    }

    #[test]
    fn entries_are_sorted_by_code() {
        let classifier = ProcessClassifier::new();
        let codes: Vec<i32> = classifier
            .entries(Species::Photon)
            .into_iter()
            .map(|(_, c)| c.value())
            .collect();
        assert_eq!(codes, vec![81, 82, 83, 84]);
    }
}
