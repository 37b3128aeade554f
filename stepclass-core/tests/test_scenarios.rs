//! End-to-end scenarios across physics configuration, classification and encoding

use std::io;
use std::sync::{Arc, Mutex};
use stepclass_core::particle::names;
use stepclass_core::process::{subtype, CAPTURE_PROCESS_NAME};
use stepclass_core::tests::test_helpers::{approx_eq, default_encoder, ion, particle, StepBuilder};
use stepclass_core::units::EV;
use stepclass_core::{PhysicsList, Selection, Species};

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn test_electron_ionisation_step() {
    let (particles, encoder) = default_encoder();
    let e = particle(&particles, names::ELECTRON);

    let step = StepBuilder::new(e)
        .process("e-_G4DNAIonisation", subtype::DNA_IONISATION)
        .energies(100.0 * EV, 80.0 * EV)
        .build();
    let record = encoder.encode(&step).expect("ionisation step is recorded");

    assert_eq!(record.species, Species::Electron);
    assert_eq!(record.category.value(), 13);
    assert!(approx_eq(record.kinetic_energy_loss, 20.0, 1e-9));
    assert!(approx_eq(record.pre_kinetic_energy, 100.0, 1e-9));
}

#[test]
fn test_proton_multiple_scattering_step() {
    let (particles, encoder) = default_encoder();
    let p = particle(&particles, names::PROTON);

    let step = StepBuilder::new(p)
        .process("msc", subtype::MULTIPLE_SCATTERING)
        .build();
    let record = encoder.encode(&step).unwrap();

    assert_eq!(record.species, Species::Proton);
    assert_eq!(record.category.value(), 210);
    assert!(record.category.is_continuum());
}

#[test]
fn test_heavy_ion_capture_step() {
    let (mut particles, encoder) = default_encoder();
    let carbon = ion(&mut particles, "C12", 6.0, 12);

    for sub in [None, Some(subtype::IONISATION), Some(subtype::DNA_IONISATION)] {
        let mut step = StepBuilder::new(carbon).named_process(CAPTURE_PROCESS_NAME).build();
        step.process.as_mut().unwrap().subtype = sub;
        let record = encoder.encode(&step).unwrap();
        assert_eq!(record.species, Species::HeavyIon);
        assert_eq!(record.category.value(), 1, "subtype {:?}", sub);
    }
}

#[test]
fn test_unknown_module_name_warns_and_keeps_active_module() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let mut list = PhysicsList::default();
    let before = list.em_name().to_string();

    let outcome = tracing::subscriber::with_default(subscriber, || list.select_module("unknown-name"));

    assert_eq!(outcome, Selection::Rejected);
    assert_eq!(list.em_name(), before);
    let output = logs.contents();
    assert!(output.contains("WARN"), "no warning emitted: {}", output);
    assert!(output.contains("unknown-name"));
    assert!(output.contains("does not exist"));
}

#[test]
fn test_accepted_module_request_is_logged_as_warning() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let mut list = PhysicsList::default();
    let outcome = tracing::subscriber::with_default(subscriber, || list.select_module("DNA_Opt6"));

    assert!(matches!(outcome, Selection::Replaced { .. }));
    let output = logs.contents();
    let request = output
        .lines()
        .find(|line| line.contains("physics list <DNA_Opt6> is requested"))
        .unwrap_or_else(|| panic!("request not logged: {}", output));
    assert!(request.contains("WARN"), "{}", request);
    assert!(!output.contains("does not exist"));
}

#[test]
fn test_transport_step_produces_no_record() {
    let (particles, encoder) = default_encoder();
    let e = particle(&particles, names::ELECTRON);

    let step = StepBuilder::new(e)
        .process("Transportation", subtype::TRANSPORTATION)
        .energies(100.0 * EV, 100.0 * EV)
        .build();
    assert!(encoder.encode(&step).is_none());
}
