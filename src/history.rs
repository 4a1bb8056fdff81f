use crate::error::{Error, Result};
use crate::game::Actor;
use crate::nim::NimState;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

const HEADER: &str = "turn,before,description,actor,after";

/// One ply of a finished or ongoing match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub turn: usize,
    pub before: NimState,
    pub description: String,
    pub actor: Actor,
    pub after: NimState,
}

impl Record {
    /// The record as a CSV row, without the line terminator.
    pub fn to_row(&self) -> String {
        [
            self.turn.to_string(),
            pile_counts(&self.before),
            self.description.clone(),
            self.actor.to_string(),
            pile_counts(&self.after),
        ]
        .iter()
        .map(|field| csv_field(field))
        .collect::<Vec<_>>()
        .join(",")
    }
}

/// Appends records to a flat CSV table, header first.
pub struct HistoryWriter<W: Write> {
    out: W,
}

impl HistoryWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .map_err(|e| Error::io(format!("create {}", path.display()), e))?;
        HistoryWriter::new(BufWriter::new(file))
    }
}

impl<W: Write> HistoryWriter<W> {
    pub fn new(mut out: W) -> Result<Self> {
        writeln!(out, "{}", HEADER).map_err(|e| Error::io("write history header", e))?;
        Ok(HistoryWriter { out })
    }

    pub fn write(&mut self, record: &Record) -> Result<()> {
        writeln!(self.out, "{}", record.to_row())
            .map_err(|e| Error::io(format!("write history turn {}", record.turn), e))
    }

    pub fn finish(mut self) -> Result<W> {
        self.out
            .flush()
            .map_err(|e| Error::io("flush history", e))?;
        Ok(self.out)
    }
}

fn pile_counts(state: &NimState) -> String {
    state
        .piles()
        .iter()
        .map(|pile| pile.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
