//! Destinations for step records
//!
//! Column order and units are part of the output format.

use crate::encoder::StepRecord;
use std::fmt;
use std::io::Write;
use thiserror::Error;

pub const COLUMN_NAMES: [&str; 14] = [
    "species",
    "category",
    "x",
    "y",
    "z",
    "edep_ev",
    "displacement_nm",
    "ke_loss_ev",
    "cos_theta",
    "ke_pre_ev",
    "event",
    "track",
    "parent",
    "step",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Column {
    Double(f64),
    Int(i32),
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Double(v) => write!(f, "{}", v),
            Column::Int(v) => write!(f, "{}", v),
        }
    }
}

impl StepRecord {
    /// The record as an ordered row, see [`COLUMN_NAMES`]
    pub fn columns(&self) -> [Column; 14] {
        [
            Column::Int(self.species.code()),
            Column::Int(self.category.value()),
            Column::Double(self.post_position.x),
            Column::Double(self.post_position.y),
            Column::Double(self.post_position.z),
            Column::Double(self.energy_deposit),
            Column::Double(self.displacement),
            Column::Double(self.kinetic_energy_loss),
            Column::Double(self.cos_theta),
            Column::Double(self.pre_kinetic_energy),
            Column::Int(self.event_id),
            Column::Int(self.track_id),
            Column::Int(self.parent_id),
            Column::Int(self.step_number),
        ]
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write row: {0}")]
    Io(#[from] std::io::Error),
}

/// Receives records in step order; ownership moves to the sink
pub trait TableSink {
    fn add_row(&mut self, record: StepRecord) -> Result<(), SinkError>;

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    pub rows: Vec<StepRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableSink for MemorySink {
    fn add_row(&mut self, record: StepRecord) -> Result<(), SinkError> {
        self.rows.push(record);
        Ok(())
    }
}

/// Comma-separated rows with a header line
pub struct CsvSink<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self) -> Result<(), SinkError> {
        writeln!(self.writer, "{}", COLUMN_NAMES.join(","))?;
        self.header_written = true;
        Ok(())
    }
}

impl<W: Write> TableSink for CsvSink<W> {
    fn add_row(&mut self, record: StepRecord) -> Result<(), SinkError> {
        if !self.header_written {
            self.write_header()?;
        }
        let row: Vec<String> = record.columns().iter().map(Column::to_string).collect();
        writeln!(self.writer, "{}", row.join(","))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        if !self.header_written {
            self.write_header()?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
