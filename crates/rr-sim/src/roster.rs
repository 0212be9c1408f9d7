//! CSV roster loader.
//!
//! # CSV format
//!
//! One row per robot, with its starting position in metres.
//!
//! ```csv
//! name,x,y
//! robot_1,0.0,0.0
//! robot_2,4.5,0.0
//! remote,-3.0,2.0
//! ```
//!
//! Names must be non-empty and unique, and coordinates finite.  Row order is roster order: it fixes
//! the order robots act in each round and the slot each robot's RNG is
//! seeded from.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rr_core::{PeerId, Position};

use crate::SimError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RosterRecord {
    name: String,
    x:    f32,
    y:    f32,
}

/// One robot to place on the medium.
#[derive(Clone, Debug, PartialEq)]
pub struct RosterEntry {
    pub id:       PeerId,
    pub position: Position,
}

impl RosterEntry {
    pub fn new(id: impl Into<PeerId>, position: Position) -> Self {
        Self { id: id.into(), position }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a roster from a CSV file.
pub fn load_roster_csv(path: &Path) -> Result<Vec<RosterEntry>, SimError> {
    let file = std::fs::File::open(path)?;
    load_roster_reader(file)
}

/// Like [`load_roster_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedding a scenario in
/// a binary.
pub fn load_roster_reader<R: Read>(reader: R) -> Result<Vec<RosterEntry>, SimError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut seen: HashSet<String> = HashSet::new();
    let mut roster = Vec::new();

    for result in csv_reader.deserialize::<RosterRecord>() {
        let row = result.map_err(|e| SimError::Roster(e.to_string()))?;
        let position = Position::new(row.x, row.y);
        validate_name(&row.name)?;
        validate_position(&row.name, position)?;
        if !seen.insert(row.name.clone()) {
            return Err(SimError::Roster(format!("duplicate robot name {:?}", row.name)));
        }
        roster.push(RosterEntry::new(row.name, position));
    }

    Ok(roster)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn validate_name(name: &str) -> Result<(), SimError> {
    if name.is_empty() {
        return Err(SimError::Roster("robot name must not be empty".into()));
    }
    if name.contains(rr_message::DELIMITER) {
        return Err(SimError::Roster(format!(
            "robot name {name:?} contains the wire delimiter {:?}",
            rr_message::DELIMITER
        )));
    }
    Ok(())
}

fn validate_position(name: &str, position: Position) -> Result<(), SimError> {
    if !position.is_finite() {
        return Err(SimError::Roster(format!("robot {name:?} has non-finite position {position}")));
    }
    Ok(())
}

pub(crate) fn check_roster(roster: &[RosterEntry]) -> Result<(), SimError> {
    let mut seen = HashSet::new();
    for entry in roster {
        validate_name(entry.id.as_str())?;
        validate_position(entry.id.as_str(), entry.position)?;
        if !seen.insert(entry.id.as_str()) {
            return Err(SimError::Roster(format!("duplicate robot name {:?}", entry.id.as_str())));
        }
    }
    Ok(())
}
