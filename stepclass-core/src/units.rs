//! Unit constants for quantities reported by the transport engine
//!
//! The engine works in millimetres, MeV and nanoseconds. A quantity is
//! expressed in a unit by dividing by that unit's constant, and a literal is
//! given a unit by multiplying, e.g. `100.0 * EV`.

pub const MM: f64 = 1.0;
pub const MICROMETER: f64 = 1.0e-3 * MM;
pub const NANOMETER: f64 = 1.0e-6 * MM;

pub const MEV: f64 = 1.0;
pub const EV: f64 = 1.0e-6 * MEV;
pub const KEV: f64 = 1.0e-3 * MEV;
pub const GEV: f64 = 1.0e3 * MEV;

pub const NS: f64 = 1.0;
pub const PICOSECOND: f64 = 1.0e-3 * NS;
