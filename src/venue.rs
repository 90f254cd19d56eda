use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::{PitchCondition, parse_pitch};
use crate::player_data::DataError;

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawVenue {
    Venue: String,
    #[serde(default)]
    Typical_Pitch_Condition: String,
}

/// Venue name -> typical pitch, in table order.
#[derive(Debug, Clone, Default)]
pub struct VenueTable {
    names: Vec<String>,
    pitch: HashMap<String, PitchCondition>,
}

impl VenueTable {
    pub fn insert(&mut self, venue: &str, pitch: PitchCondition) {
        if !self.pitch.contains_key(venue) {
            self.names.push(venue.to_string());
        }
        self.pitch.insert(venue.to_string(), pitch);
    }

    /// `Flat` for venues the table does not know.
    pub fn pitch_condition(&self, venue: &str) -> PitchCondition {
        self.pitch
            .get(venue)
            .copied()
            .unwrap_or(PitchCondition::Flat)
    }

    pub fn venue_names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub fn parse_venues<R: Read>(rdr: R) -> Result<VenueTable, DataError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut table = VenueTable::default();
    for result in reader.deserialize::<RawVenue>() {
        match result {
            Ok(raw) => {
                let name = raw.Venue.trim();
                if name.is_empty() {
                    continue;
                }
                table.insert(name, parse_pitch(&raw.Typical_Pitch_Condition));
            }
            Err(e) => warn!("skipping malformed venue row: {e}"),
        }
    }
    Ok(table)
}

/// A missing file is an empty table, so every venue reads as `Flat`.
pub fn load_venues(path: &Path) -> Result<VenueTable> {
    if !path.exists() {
        debug!(path = %path.display(), "no venue table");
        return Ok(VenueTable::default());
    }
    let file = File::open(path).with_context(|| format!("open venue table {}", path.display()))?;
    parse_venues(file).with_context(|| format!("parse venue table {}", path.display()))
}
