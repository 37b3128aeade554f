//! Species classification
//!
//! Maps the particle carried by a step to a small [`Species`] code. Canonical
//! definitions are resolved to ids once, when the classifier is built, so the
//! per-step path is an id comparison followed by a charge check.

use crate::particle::{names, ParticleId, ParticleRef, ParticleTable};
use std::fmt;

/// Charge (in elementary charges) above which an unmatched particle is a heavy ion
pub const HEAVY_ION_CHARGE_THRESHOLD: f64 = 4.0;

/// Particle species as written to the species column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    Photon,
    Electron,
    Proton,
    /// Neutral hydrogen atom
    Hydrogen,
    /// Fully stripped helium (alpha++)
    Alpha,
    /// Singly charged helium
    AlphaPlus,
    /// Neutral helium atom
    Helium,
    HeavyIon,
    Unknown,
}

impl Species {
    pub const ALL: [Species; 9] = [
        Species::Photon,
        Species::Electron,
        Species::Proton,
        Species::Hydrogen,
        Species::Alpha,
        Species::AlphaPlus,
        Species::Helium,
        Species::HeavyIon,
        Species::Unknown,
    ];

    /// Species that are matched by identity against a canonical definition
    pub const CANONICAL: [Species; 7] = [
        Species::Photon,
        Species::Electron,
        Species::Proton,
        Species::Hydrogen,
        Species::Alpha,
        Species::AlphaPlus,
        Species::Helium,
    ];

    pub fn code(self) -> i32 {
        match self {
            Species::Photon => 0,
            Species::Electron => 1,
            Species::Proton => 2,
            Species::Hydrogen => 3,
            Species::Alpha => 4,
            Species::AlphaPlus => 5,
            Species::Helium => 6,
            Species::HeavyIon => 7,
            Species::Unknown => -1,
        }
    }

    pub fn from_code(code: i32) -> Option<Species> {
        Species::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Name of the canonical definition, if the species has one
    pub fn canonical_name(self) -> Option<&'static str> {
        match self {
            Species::Photon => Some(names::GAMMA),
            Species::Electron => Some(names::ELECTRON),
            Species::Proton => Some(names::PROTON),
            Species::Hydrogen => Some(names::HYDROGEN),
            Species::Alpha => Some(names::ALPHA),
            Species::AlphaPlus => Some(names::ALPHA_PLUS),
            Species::Helium => Some(names::HELIUM),
            Species::HeavyIon | Species::Unknown => None,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Species::HeavyIon => "heavy-ion",
            Species::Unknown => "unknown",
            other => other.canonical_name().unwrap_or("unknown"),
        };
        f.write_str(name)
    }
}

/// Classifies step particles into species
#[derive(Debug, Clone, Default)]
pub struct ParticleClassifier {
    canonical: Vec<(ParticleId, Species)>,
}

impl ParticleClassifier {
    /// Resolve canonical ids from the particle table
    ///
    /// Species whose definition is absent from the table never match by
    /// identity; they can still fall through to the heavy-ion rule.
    pub fn new(particles: &ParticleTable) -> Self {
        let canonical = Species::CANONICAL
            .into_iter()
            .filter_map(|species| {
                let name = species.canonical_name()?;
                particles.find(name).map(|id| (id, species))
            })
            .collect();
        Self { canonical }
    }

    pub fn classify(&self, particle: &ParticleRef) -> Species {
        if let Some((_, species)) = self.canonical.iter().find(|(id, _)| *id == particle.id) {
            return *species;
        }
        if particle.charge.abs() > HEAVY_ION_CHARGE_THRESHOLD {
            Species::HeavyIon
        } else {
            Species::Unknown
        }
    }

    /// Id registered for a canonical species
    pub fn canonical_id(&self, species: Species) -> Option<ParticleId> {
        self.canonical
            .iter()
            .find(|(_, s)| *s == species)
            .map(|(id, _)| *id)
    }
}
