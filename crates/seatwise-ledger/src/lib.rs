//! Seatwise Ledger — the durable flat-file log of reservation records.
//!
//! The ledger is the source of truth for "has this slot been claimed". It is
//! a CSV-format file with a fixed header row; one reservation per line,
//! append-only except for the single-row rollback truncation. Records are
//! line-oriented; appends with embedded newlines in fields are rejected.

mod csv;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info};

use seatwise_core::{Error, Reservation, Result};

const HEADER: &str = "name,contact,guest_count,date,time";

/// Flat-file reservation ledger.
///
/// All operations go through an internal mutex, so a check-then-append in
/// [`Ledger::append_if_available`] cannot interleave with another append from
/// the same process. Cross-process access is not coordinated.
pub struct Ledger {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Ledger {
    /// Open the ledger at `path`, creating it with the header row if absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, format!("{}\n", HEADER))?;
            info!("Created reservation ledger at {}", path.display());
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Append one reservation row.
    pub fn append(&self, reservation: &Reservation) -> Result<()> {
        let _guard = self.lock.lock();
        self.append_row(reservation)
    }

    /// Check the slot and append in one critical section.
    ///
    /// Returns `false` without writing when the (date, time) slot is already
    /// claimed, `true` after a successful append.
    pub fn append_if_available(&self, reservation: &Reservation) -> Result<bool> {
        let _guard = self.lock.lock();
        if self.slot_taken(&reservation.date, &reservation.time)? {
            debug!(
                "Slot {} {} already claimed, rejecting",
                reservation.date, reservation.time
            );
            return Ok(false);
        }
        self.append_row(reservation)?;
        Ok(true)
    }

    /// Full scan of all reservation rows.
    pub fn scan(&self) -> Result<Vec<Reservation>> {
        let _guard = self.lock.lock();
        self.read_rows()
    }

    /// True when no existing reservation claims the (date, time) slot.
    pub fn is_available(&self, date: &str, time: &str) -> Result<bool> {
        let _guard = self.lock.lock();
        Ok(!self.slot_taken(date, time)?)
    }

    /// Remove the most-recently-appended row (single-record rollback).
    ///
    /// No-op when only the header remains. Assumes sequential single-writer
    /// access during a request; it targets position, not identity.
    pub fn remove_last(&self) -> Result<()> {
        let _guard = self.lock.lock();
        let data = std::fs::read_to_string(&self.path)?;
        let lines: Vec<&str> = data.lines().collect();
        if lines.len() <= 1 {
            return Ok(());
        }
        let mut out = String::new();
        for line in &lines[..lines.len() - 1] {
            out.push_str(line);
            out.push('\n');
        }
        std::fs::write(&self.path, out)?;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Internals (callers hold the lock)
    // ---------------------------------------------------------------

    fn append_row(&self, reservation: &Reservation) -> Result<()> {
        let guest_count = reservation.guest_count.to_string();
        let fields = [
            reservation.name.as_str(),
            reservation.contact.as_str(),
            guest_count.as_str(),
            reservation.date.as_str(),
            reservation.time.as_str(),
        ];
        // Rows are line-oriented; an embedded newline would split the row and
        // corrupt every later scan.
        if fields.iter().any(|f| f.contains('\n') || f.contains('\r')) {
            return Err(Error::Ledger(
                "reservation fields must not contain newlines".into(),
            ));
        }
        let line = csv::encode_row(&fields);
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::Ledger(format!("failed to open ledger for append: {}", e)))?;
        writeln!(file, "{}", line)
            .map_err(|e| Error::Ledger(format!("failed to append reservation row: {}", e)))?;
        Ok(())
    }

    fn slot_taken(&self, date: &str, time: &str) -> Result<bool> {
        let rows = self.read_rows()?;
        Ok(rows.iter().any(|r| r.date == date && r.time == time))
    }

    fn read_rows(&self) -> Result<Vec<Reservation>> {
        let data = std::fs::read_to_string(&self.path)?;
        let mut rows = Vec::new();
        for (idx, line) in data.lines().enumerate() {
            if idx == 0 || line.is_empty() {
                continue;
            }
            rows.push(parse_reservation(line, idx + 1)?);
        }
        Ok(rows)
    }
}

fn parse_reservation(line: &str, line_no: usize) -> Result<Reservation> {
    let fields = csv::parse_row(line);
    if fields.len() != 5 {
        return Err(Error::Ledger(format!(
            "malformed ledger row at line {}: expected 5 fields, got {}",
            line_no,
            fields.len()
        )));
    }
    let guest_count = fields[2].parse().map_err(|_| {
        Error::Ledger(format!(
            "malformed guest_count '{}' at line {}",
            fields[2], line_no
        ))
    })?;
    Ok(Reservation {
        name: fields[0].clone(),
        contact: fields[1].clone(),
        guest_count,
        date: fields[3].clone(),
        time: fields[4].clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(name: &str, date: &str, time: &str) -> Reservation {
        Reservation {
            name: name.into(),
            contact: format!("{}@example.com", name.to_lowercase()),
            guest_count: 2,
            date: date.into(),
            time: time.into(),
        }
    }

    fn test_ledger(dir: &Path) -> Ledger {
        Ledger::open(dir.join("reservations.csv")).unwrap()
    }

    #[test]
    fn test_open_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.csv");
        let _ledger = Ledger::open(&path).unwrap();
        let data = std::fs::read_to_string(&path).unwrap();
        assert_eq!(data, "name,contact,guest_count,date,time\n");
    }

    #[test]
    fn test_open_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = test_ledger(dir.path());
        ledger.append(&reservation("Ann", "2024-06-01", "19:00")).unwrap();
        drop(ledger);

        let reopened = test_ledger(dir.path());
        assert_eq!(reopened.scan().unwrap().len(), 1);
    }

    #[test]
    fn test_append_and_scan() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = test_ledger(dir.path());

        let r = reservation("Ann", "2024-06-01", "19:00");
        ledger.append(&r).unwrap();

        let rows = ledger.scan().unwrap();
        assert_eq!(rows, vec![r]);
    }

    #[test]
    fn test_availability() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = test_ledger(dir.path());

        assert!(ledger.is_available("2024-06-01", "19:00").unwrap());
        ledger.append(&reservation("Ann", "2024-06-01", "19:00")).unwrap();
        assert!(!ledger.is_available("2024-06-01", "19:00").unwrap());
        assert!(ledger.is_available("2024-06-01", "20:00").unwrap());
        assert!(ledger.is_available("2024-06-02", "19:00").unwrap());
    }

    #[test]
    fn test_append_if_available_rejects_taken_slot() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = test_ledger(dir.path());

        assert!(ledger
            .append_if_available(&reservation("Ann", "2024-06-01", "19:00"))
            .unwrap());
        assert!(!ledger
            .append_if_available(&reservation("Bob", "2024-06-01", "19:00"))
            .unwrap());
        assert_eq!(ledger.scan().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_last() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = test_ledger(dir.path());

        ledger.append(&reservation("Ann", "2024-06-01", "19:00")).unwrap();
        ledger.append(&reservation("Bob", "2024-06-02", "20:00")).unwrap();
        ledger.remove_last().unwrap();

        let rows = ledger.scan().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ann");
    }

    #[test]
    fn test_remove_last_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.csv");
        let ledger = Ledger::open(&path).unwrap();

        ledger.remove_last().unwrap();
        ledger.remove_last().unwrap();

        let data = std::fs::read_to_string(&path).unwrap();
        assert_eq!(data, "name,contact,guest_count,date,time\n");
    }

    #[test]
    fn test_fields_with_commas_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = test_ledger(dir.path());

        let r = Reservation {
            name: "Doe, Jane".into(),
            contact: "\"jane\" <jane@x>".into(),
            guest_count: 4,
            date: "2024-06-01".into(),
            time: "19:00".into(),
        };
        ledger.append(&r).unwrap();
        assert_eq!(ledger.scan().unwrap(), vec![r]);
    }

    #[test]
    fn test_newline_in_field_rejected_without_corrupting_file() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = test_ledger(dir.path());

        ledger.append(&reservation("Ann", "2024-06-01", "19:00")).unwrap();

        let mut bad = reservation("Bob", "2024-06-02", "20:00");
        bad.name = "Ann\nBob".into();
        assert!(matches!(ledger.append(&bad), Err(Error::Ledger(_))));

        // earlier rows are still readable and the slot check still works
        let rows = ledger.scan().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!ledger.is_available("2024-06-01", "19:00").unwrap());
    }

    #[test]
    fn test_append_io_failure_is_a_ledger_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.csv");
        let ledger = Ledger::open(&path).unwrap();

        std::fs::remove_file(&path).unwrap();
        let err = ledger
            .append(&reservation("Ann", "2024-06-01", "19:00"))
            .unwrap_err();
        assert!(matches!(err, Error::Ledger(_)));
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.csv");
        let ledger = Ledger::open(&path).unwrap();

        std::fs::write(&path, "name,contact,guest_count,date,time\nAnn,ann@x,two,2024-06-01,19:00\n").unwrap();
        assert!(matches!(ledger.scan(), Err(Error::Ledger(_))));
    }
}
