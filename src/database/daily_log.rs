use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::food::analysis::NutrientAmount;
use crate::food::units::Quantity;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No food logged for {0}")]
    NoEntries(NaiveDate),
    #[error("Log file error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to encode log entry: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One logged food, with nutrients already scaled to the amount eaten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub fdc_id: String,
    pub amount_with_unit: Quantity,
    pub meal_name: String,
    pub nutrients: BTreeMap<String, NutrientAmount>,
}

/// Append-only newline-delimited JSON logs, one file per calendar day.
#[derive(Debug, Clone)]
pub struct DailyLogStore {
    dir: PathBuf,
}

impl DailyLogStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.json", date.format("%Y-%m-%d")))
    }

    pub fn append(&self, date: NaiveDate, entry: &LogEntry) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(date);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(line.as_bytes())?;

        debug!("Appended entry for {} to {}", entry.fdc_id, path.display());
        Ok(())
    }

    /// Reads every entry logged on `date`. Lines that fail to parse are
    /// skipped with a warning.
    pub fn read_day(&self, date: NaiveDate) -> Result<Vec<LogEntry>, StoreError> {
        let path = self.path_for(date);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NoEntries(date))
            }
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<LogEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("Skipping corrupt line {} in {}: {}", idx + 1, path.display(), e),
            }
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn entry(fdc_id: &str, protein: f64) -> LogEntry {
        let mut nutrients = BTreeMap::new();
        nutrients.insert(
            "Protein".to_string(),
            NutrientAmount {
                amount: protein,
                unit: "G".to_string(),
            },
        );
        LogEntry {
            fdc_id: fdc_id.to_string(),
            amount_with_unit: Quantity {
                amount: 2.0,
                unit: "cup".to_string(),
            },
            meal_name: "Breakfast".to_string(),
            nutrients,
        }
    }

    #[test]
    fn test_path_uses_iso_date() {
        let store = DailyLogStore::new("/tmp/logs");
        assert_eq!(store.path_for(date()), PathBuf::from("/tmp/logs/2024-03-09.json"));
    }

    #[test]
    fn test_append_writes_one_json_line_per_entry() {
        let dir = TempDir::new().unwrap();
        let store = DailyLogStore::new(dir.path());

        store.append(date(), &entry("1", 10.0)).unwrap();
        store.append(date(), &entry("2", 5.0)).unwrap();

        let contents = fs::read_to_string(store.path_for(date())).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#"{"fdc_id":"1","amount_with_unit":[2.0,"cup"],"meal_name":"Breakfast","nutrients":{"Protein":[10.0,"G"]}}"#
        );

        let entries = store.read_day(date()).unwrap();
        assert_eq!(entries, vec![entry("1", 10.0), entry("2", 5.0)]);
    }

    #[test]
    fn test_missing_day_is_no_entries() {
        let dir = TempDir::new().unwrap();
        let store = DailyLogStore::new(dir.path());

        let err = store.read_day(date()).unwrap_err();
        assert!(matches!(err, StoreError::NoEntries(d) if d == date()));
    }

    #[test]
    fn test_corrupt_line_does_not_discard_the_day() {
        let dir = TempDir::new().unwrap();
        let store = DailyLogStore::new(dir.path());

        store.append(date(), &entry("1", 10.0)).unwrap();
        let mut file = OpenOptions::new()
            .append(true)
            .open(store.path_for(date()))
            .unwrap();
        file.write_all(b"{\"fdc_id\": trunc\n").unwrap();
        store.append(date(), &entry("3", 1.0)).unwrap();

        let entries = store.read_day(date()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].fdc_id, "3");
    }

    #[test]
    fn test_reads_entries_written_by_other_tools() {
        let dir = TempDir::new().unwrap();
        let store = DailyLogStore::new(dir.path());
        fs::write(
            store.path_for(date()),
            "{\"fdc_id\": \"2012128\", \"amount_with_unit\": [1, \"ONZ\"], \"meal_name\": \"snack\", \"nutrients\": {\"Protein\": [7.14, \"G\"]}}\n",
        )
        .unwrap();

        let entries = store.read_day(date()).unwrap();
        assert_eq!(entries[0].amount_with_unit.amount, 1.0);
        assert_eq!(entries[0].nutrients["Protein"].amount, 7.14);
    }
}
