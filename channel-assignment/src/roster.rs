use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use csv::Reader;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::{Instrument, Performer};
use crate::error::{Error, Result};

/// One talent assignment on a booking, as the booking system exports it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub full_name: String,
    #[serde(default)]
    pub artist_stage_name: Option<String>,
    #[serde(default)]
    pub musician_stage_name: Option<String>,
    #[serde(default)]
    pub primary_genre: Option<String>,
    /// Explicit instrument tags; these win over inference
    #[serde(default)]
    pub instruments: Vec<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl BookingRecord {
    /// Artist stage name, then musician stage name, then full name
    pub fn display_name(&self) -> String {
        non_empty(&self.artist_stage_name)
            .or_else(|| non_empty(&self.musician_stage_name))
            .unwrap_or_else(|| self.full_name.trim())
            .to_string()
    }
}

/// Guesses instruments from booking context.
/// Artists sing; musicians are read from their stage name; a known genre
/// with nothing else to go on falls back to vocals.
pub fn infer_instruments(record: &BookingRecord) -> BTreeSet<Instrument> {
    let mut instruments = BTreeSet::new();

    if non_empty(&record.artist_stage_name).is_some() {
        instruments.insert(Instrument::Vocals);
    }

    if let Some(stage_name) = non_empty(&record.musician_stage_name) {
        let name_lower = stage_name.to_lowercase();
        if name_lower.contains("bass") {
            instruments.insert(Instrument::Bass);
        } else if name_lower.contains("guitar") {
            instruments.insert(Instrument::Guitar);
        } else if name_lower.contains("drum") {
            instruments.insert(Instrument::Drums);
        } else if name_lower.contains("key") || name_lower.contains("piano") {
            instruments.insert(Instrument::Keyboard);
        }
    }

    if instruments.is_empty() && non_empty(&record.primary_genre).is_some() {
        instruments.insert(Instrument::Vocals);
    }

    instruments
}

fn parse_instrument_tags(name: &str, tags: &[String]) -> BTreeSet<Instrument> {
    let mut instruments = BTreeSet::new();
    for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        match tag.parse::<Instrument>() {
            Ok(instrument) => {
                instruments.insert(instrument);
            }
            Err(e) => warn!(performer = %name, "{}", e),
        }
    }
    instruments
}

/// Builds performers from booking records, keeping booking order.
/// Later records with an already-seen display name are dropped.
pub fn resolve_roster(records: &[BookingRecord]) -> Vec<Performer> {
    let mut seen = HashSet::new();
    let mut roster = Vec::with_capacity(records.len());

    for record in records {
        let name = record.display_name();
        if name.is_empty() {
            warn!("booking record without any name, skipping");
            continue;
        }
        if !seen.insert(name.clone()) {
            warn!(performer = %name, "performer booked twice, keeping first record");
            continue;
        }

        let mut instruments = parse_instrument_tags(&name, &record.instruments);
        if instruments.is_empty() {
            instruments = infer_instruments(record);
        }

        roster.push(Performer { name, instruments });
    }

    roster
}

fn split_tags(cell: &str) -> Vec<String> {
    cell.split([';', ',', '|'])
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn optional_cell(record: &csv::StringRecord, col: Option<usize>) -> Option<String> {
    col.and_then(|c| record.get(c))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads booking records from a CSV export. Columns are located by header text.
pub fn load_booking_records<P: AsRef<Path>>(csv_path: P) -> Result<Vec<BookingRecord>> {
    let mut reader = Reader::from_path(csv_path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let artist_col = headers.iter().position(|h| h.contains("artist") && h.contains("stage"));
    let musician_col = headers.iter().position(|h| h.contains("musician") && h.contains("stage"));
    let name_col = headers
        .iter()
        .position(|h| h == "name" || h.contains("full name") || h == "full_name");
    let genre_col = headers.iter().position(|h| h.contains("genre"));
    let instruments_col = headers.iter().position(|h| h.contains("instrument"));

    if name_col.is_none() && artist_col.is_none() && musician_col.is_none() {
        return Err(Error::InvalidInput(
            "roster CSV needs a name, artist stage name or musician stage name column".to_string(),
        ));
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;

        let record = BookingRecord {
            full_name: optional_cell(&row, name_col).unwrap_or_default(),
            artist_stage_name: optional_cell(&row, artist_col),
            musician_stage_name: optional_cell(&row, musician_col),
            primary_genre: optional_cell(&row, genre_col),
            instruments: optional_cell(&row, instruments_col)
                .map(|cell| split_tags(&cell))
                .unwrap_or_default(),
        };

        // Skip blank lines
        if record.display_name().is_empty() {
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

/// Loads a roster from `.json` (performer array) or `.csv` (booking records)
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<Performer>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let roster = match extension.as_deref() {
        Some("json") => {
            let content = fs::read_to_string(path)?;
            serde_json::from_str::<Vec<Performer>>(&content)?
        }
        Some("csv") => resolve_roster(&load_booking_records(path)?),
        _ => {
            return Err(Error::InvalidInput(format!(
                "unsupported roster file: {} (expected .json or .csv)",
                path.display()
            )))
        }
    };

    info!(path = %path.display(), performers = roster.len(), "loaded roster");
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn musician(stage_name: &str) -> BookingRecord {
        BookingRecord {
            full_name: "Someone".to_string(),
            musician_stage_name: Some(stage_name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_artist_sings() {
        let record = BookingRecord {
            full_name: "Lianne Letang".to_string(),
            artist_stage_name: Some("Lí-Lí Octave".to_string()),
            ..Default::default()
        };
        assert_eq!(infer_instruments(&record), BTreeSet::from([Instrument::Vocals]));
        assert_eq!(record.display_name(), "Lí-Lí Octave");
    }

    #[test]
    fn test_musician_stage_name_heuristic() {
        assert_eq!(infer_instruments(&musician("Maya Bass")), BTreeSet::from([Instrument::Bass]));
        assert_eq!(infer_instruments(&musician("Guitar Joe")), BTreeSet::from([Instrument::Guitar]));
        assert_eq!(infer_instruments(&musician("DrumLine Dre")), BTreeSet::from([Instrument::Drums]));
        assert_eq!(infer_instruments(&musician("Keys Kendra")), BTreeSet::from([Instrument::Keyboard]));
        assert_eq!(infer_instruments(&musician("Piano Man")), BTreeSet::from([Instrument::Keyboard]));
        // bass is checked before drums
        assert_eq!(infer_instruments(&musician("Bass Drum Bo")), BTreeSet::from([Instrument::Bass]));
    }

    #[test]
    fn test_genre_fallback_only_when_nothing_matched() {
        let mut record = musician("Mystery");
        assert!(infer_instruments(&record).is_empty());

        record.primary_genre = Some("Reggae".to_string());
        assert_eq!(infer_instruments(&record), BTreeSet::from([Instrument::Vocals]));
    }

    #[test]
    fn test_explicit_tags_win_and_duplicates_drop() {
        let records = vec![
            BookingRecord {
                full_name: "Maya Thompson".to_string(),
                musician_stage_name: Some("Maya Bass".to_string()),
                instruments: vec!["keys".to_string(), "theremin".to_string()],
                ..Default::default()
            },
            BookingRecord {
                full_name: "Maya T".to_string(),
                musician_stage_name: Some("Maya Bass".to_string()),
                ..Default::default()
            },
            BookingRecord {
                full_name: "Quiet Person".to_string(),
                ..Default::default()
            },
        ];

        let roster = resolve_roster(&records);

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0], Performer::new("Maya Bass", &[Instrument::Keyboard]));
        assert_eq!(roster[1].name, "Quiet Person");
        assert!(roster[1].instruments.is_empty());
    }

    #[test]
    fn test_load_roster_from_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Full Name,Artist Stage Name,Musician Stage Name,Primary Genre,Instruments").unwrap();
        writeln!(file, "Lianne Letang,Lí-Lí Octave,,Pop,").unwrap();
        writeln!(file, "Maya Thompson,,Maya Bass,,").unwrap();
        writeln!(file, "Sam Stone,,,,drums;vocals").unwrap();
        writeln!(file, ",,,,").unwrap();

        let roster = load_roster(file.path()).unwrap();

        assert_eq!(
            roster,
            vec![
                Performer::new("Lí-Lí Octave", &[Instrument::Vocals]),
                Performer::new("Maya Bass", &[Instrument::Bass]),
                Performer::new("Sam Stone", &[Instrument::Drums, Instrument::Vocals]),
            ]
        );
    }

    #[test]
    fn test_load_roster_from_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{ "name": "Dee", "instruments": ["drums"] }}]"#).unwrap();

        let roster = load_roster(file.path()).unwrap();
        assert_eq!(roster, vec![Performer::new("Dee", &[Instrument::Drums])]);
    }

    #[test]
    fn test_load_roster_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(matches!(load_roster(file.path()), Err(Error::InvalidInput(_))));
    }
}
