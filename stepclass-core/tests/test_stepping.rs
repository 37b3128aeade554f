//! Stepping action tests

use stepclass_core::particle::names;
use stepclass_core::process::subtype;
use stepclass_core::sink::COLUMN_NAMES;
use stepclass_core::tests::test_helpers::{approx_eq, default_encoder, particle, StepBuilder};
use stepclass_core::units::EV;
use stepclass_core::{CsvSink, MemorySink, SinkError, StepRecord, SteppingAction, TableSink, TrackStatus};

#[test]
fn test_records_only_physical_steps() {
    let (particles, encoder) = default_encoder();
    let e = particle(&particles, names::ELECTRON);
    let mut action = SteppingAction::new(encoder, MemorySink::new());

    let steps = [
        StepBuilder::new(e).process("Transportation", subtype::TRANSPORTATION).build(),
        StepBuilder::new(e).process("e-_G4DNAElastic", subtype::DNA_ELASTIC).build(),
        StepBuilder::new(e).without_post().build(),
        StepBuilder::new(e).process("e-_G4DNAIonisation", subtype::DNA_IONISATION).build(),
    ];
    for step in &steps {
        assert_eq!(action.on_step(step), TrackStatus::Alive);
    }

    let stats = action.stats();
    assert_eq!(stats.recorded, 2);
    assert_eq!(stats.filtered, 1);
    assert_eq!(stats.malformed, 1);

    let rows = action.into_sink().rows;
    let codes: Vec<i32> = rows.iter().map(|r| r.category.value()).collect();
    assert_eq!(codes, vec![11, 13]);
}

#[test]
fn test_kill_after_first_step_still_records() {
    let (particles, encoder) = default_encoder();
    let p = particle(&particles, names::PROTON);
    let mut action = SteppingAction::new(encoder, MemorySink::new()).with_kill_after_first_step(true);

    let step = StepBuilder::new(p).process("proton_G4DNAIonisation", subtype::DNA_IONISATION).build();
    assert_eq!(action.on_step(&step), TrackStatus::KillTrackAndSecondaries);
    assert_eq!(action.sink().rows.len(), 1);

    let transport = StepBuilder::new(p).process("Transportation", subtype::TRANSPORTATION).build();
    assert_eq!(action.on_step(&transport), TrackStatus::KillTrackAndSecondaries);
    assert_eq!(action.sink().rows.len(), 1);
}

#[test]
fn test_malformed_step_is_not_killed() {
    let (particles, encoder) = default_encoder();
    let p = particle(&particles, names::PROTON);
    let mut action = SteppingAction::new(encoder, MemorySink::new()).with_kill_after_first_step(true);
    assert_eq!(action.on_step(&StepBuilder::new(p).without_post().build()), TrackStatus::Alive);
}

struct FailingSink;

impl TableSink for FailingSink {
    fn add_row(&mut self, _record: StepRecord) -> Result<(), SinkError> {
        Err(SinkError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")))
    }
}

#[test]
fn test_sink_errors_do_not_abort() {
    let (particles, encoder) = default_encoder();
    let e = particle(&particles, names::ELECTRON);
    let mut action = SteppingAction::new(encoder, FailingSink);

    let step = StepBuilder::new(e).process("e-_G4DNAElastic", subtype::DNA_ELASTIC).build();
    assert_eq!(action.on_step(&step), TrackStatus::Alive);
    assert_eq!(action.on_step(&step), TrackStatus::Alive);
    assert_eq!(action.stats().sink_errors, 2);
    assert_eq!(action.stats().recorded, 0);
}

#[test]
fn test_csv_rows_follow_column_order() {
    let (particles, encoder) = default_encoder();
    let e = particle(&particles, names::ELECTRON);
    let mut action = SteppingAction::new(encoder, CsvSink::new(Vec::new()));

    let step = StepBuilder::new(e)
        .process("e-_G4DNAIonisation", subtype::DNA_IONISATION)
        .energies(100.0 * EV, 80.0 * EV)
        .ids(3, 4, 1, 2)
        .build();
    action.on_step(&step);
    action.finish();

    let out = String::from_utf8(action.into_sink().into_inner()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], COLUMN_NAMES.join(","));

    let fields: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(fields.len(), 14);
    assert_eq!(fields[0], "1");
    assert_eq!(fields[1], "13");
    // scattering cosine precedes the pre-step kinetic energy
    assert!(approx_eq(fields[8].parse().unwrap(), 1.0, 1e-12));
    assert!(approx_eq(fields[9].parse().unwrap(), 100.0, 1e-9));
    assert_eq!(&fields[10..], &["3", "4", "1", "2"]);
}

#[test]
fn test_csv_header_written_even_without_rows() {
    let mut sink = CsvSink::new(Vec::new());
    sink.flush().unwrap();
    let out = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(out.trim_end(), COLUMN_NAMES.join(","));
}
