//! The transaction ledger.
//!
//! The ledger owns its records behind an `Arc`, so a [`Snapshot`] taken for
//! reporting stays unchanged when the ledger is later appended to or replaced.

use crate::classifier::Classifier;
use crate::error::{EngineError, Result};
use crate::transaction::{Transaction, TransactionRecord};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::io::{BufWriter, Read, Write};
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Column order used when reading and writing ledger files.
pub const CSV_HEADER: [&str; 5] = ["date", "direction", "category", "amount", "note"];

/// What to do with a row that cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BadRow {
    /// Log at warn level and continue.
    Skip,
    /// Stop with [`EngineError::InvalidRecord`].
    Reject,
}

/// Ordered collection of transactions.
///
/// Insertion order is preserved and is not necessarily chronological.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Arc<Vec<Transaction>>,
}

/// Read-only, point-in-time view of a ledger.
#[derive(Debug, Clone)]
pub struct Snapshot(Arc<Vec<Transaction>>);

impl Deref for Snapshot {
    type Target = [Transaction];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Ledger {
    /// Creates a new empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    pub fn from_records(records: Vec<Transaction>) -> Self {
        Ledger {
            records: Arc::new(records),
        }
    }

    /// Adds one record at the end. No deduplication or category check.
    pub fn append(&mut self, transaction: Transaction) {
        debug!(
            "Appending {} {} {} ({})",
            transaction.date, transaction.direction, transaction.amount, transaction.category
        );
        Arc::make_mut(&mut self.records).push(transaction);
    }

    /// Swaps in a whole new set of records.
    ///
    /// Outstanding snapshots keep the previous contents.
    pub fn replace_all(&mut self, records: Vec<Transaction>) {
        debug!(
            "Replacing {} records with {}",
            self.records.len(),
            records.len()
        );
        self.records = Arc::new(records);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(Arc::clone(&self.records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reads a ledger from CSV, keeping rows exactly as stored.
    ///
    /// Rows without a category keep an empty category string.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        Ledger::read_csv_with(reader, None)
    }

    /// Reads a ledger from CSV in streaming fashion.
    ///
    /// Invalid rows are logged at warn level and skipped. Rows with a blank
    /// category are classified when a classifier is given. Suitable for
    /// reporting, never for a load that will be written back.
    pub fn read_csv_with<R: Read>(reader: R, classifier: Option<&Classifier>) -> Result<Self> {
        Ledger::read_rows(reader, classifier, BadRow::Skip)
    }

    /// Reads a ledger from CSV, failing on the first row that cannot be parsed.
    ///
    /// Use this before rewriting a ledger file so no stored row is lost.
    pub fn read_csv_strict<R: Read>(reader: R, classifier: Option<&Classifier>) -> Result<Self> {
        Ledger::read_rows(reader, classifier, BadRow::Reject)
    }

    fn read_rows<R: Read>(
        reader: R,
        classifier: Option<&Classifier>,
        policy: BadRow,
    ) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for (row_idx, result) in csv_reader.deserialize::<TransactionRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let parsed = result
                .map_err(|e| format!("CSV parse error: {}", e))
                .and_then(|record| record.parse());

            match parsed {
                Ok(parsed) => {
                    let tx = parsed.into_transaction(|direction, note| match classifier {
                        Some(c) => c.classify(direction, note).to_string(),
                        None => String::new(),
                    });
                    records.push(tx);
                }
                Err(message) if policy == BadRow::Skip => {
                    warn!("Row {}: {}", row_num, message);
                }
                Err(message) => {
                    return Err(EngineError::InvalidRecord {
                        row: row_num,
                        message,
                    });
                }
            }
        }

        debug!("Loaded {} ledger records", records.len());
        Ok(Ledger::from_records(records))
    }

    /// Writes the ledger to `path` without ever leaving a partial file.
    ///
    /// Records go to a temporary file in the same directory, which then
    /// replaces `path` in one rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let tmp = NamedTempFile::new_in(dir)?;

        self.write_csv(BufWriter::new(tmp.as_file()))?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        debug!("Saved {} records to {}", self.len(), path.display());
        Ok(())
    }

    /// Writes every record to CSV in insertion order.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(CSV_HEADER)?;
        for tx in self.records.iter() {
            csv_writer.write_record([
                tx.date.to_string(),
                tx.direction.to_string(),
                tx.category.clone(),
                tx.amount.to_string(),
                tx.note.clone(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use crate::transaction::Direction;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn tx(day: u32, category: &str, amount: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            Direction::Outflow,
            category,
            Amount::from_units(amount),
            "",
        )
    }

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let mut ledger = Ledger::new();
        ledger.append(tx(3, "办公费", 10));
        ledger.append(tx(1, "办公费", 10));
        ledger.append(tx(1, "办公费", 10));

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].date.to_string(), "2024-01-03");
        assert_eq!(snapshot[1], snapshot[2]);
    }

    #[test]
    fn test_append_accepts_unknown_category() {
        let mut ledger = Ledger::new();
        ledger.append(tx(1, "not a real category", 5));
        assert_eq!(ledger.snapshot()[0].category, "not a real category");
    }

    #[test]
    fn test_snapshot_survives_replace_all() {
        let mut ledger = Ledger::new();
        ledger.append(tx(1, "办公费", 10));
        let before = ledger.snapshot();

        ledger.replace_all(vec![tx(2, "差旅费", 20), tx(3, "差旅费", 30)]);

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].category, "办公费");
        assert_eq!(ledger.snapshot().len(), 2);
    }

    #[test]
    fn test_snapshot_survives_append() {
        let mut ledger = Ledger::new();
        ledger.append(tx(1, "办公费", 10));
        let before = ledger.snapshot();
        ledger.append(tx(2, "办公费", 10));

        assert_eq!(before.len(), 1);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_replace_all_with_empty_clears() {
        let mut ledger = Ledger::from_records(vec![tx(1, "办公费", 10)]);
        ledger.replace_all(Vec::new());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_read_csv_skips_invalid_rows() {
        let csv = "date,direction,category,amount,note
2024-01-05,outflow,办公费,12.5,打印纸
not-a-date,outflow,办公费,1,
2024-01-06,sideways,办公费,1,
2024-01-07,inflow,主营业务收入,-3,
2024-01-08,inflow,主营业务收入,100,销售";

        let ledger = Ledger::read_csv(Cursor::new(csv)).unwrap();
        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].amount.to_string(), "12.50");
        assert_eq!(snapshot[1].direction, Direction::Inflow);
    }

    #[test]
    fn test_read_csv_classifies_blank_categories() {
        let csv = "date,direction,category,amount,note
2024-01-05,outflow,,200,请客户吃饭
2024-01-06,outflow,差旅费,50,请客户吃饭";

        let classifier = Classifier::default();
        let ledger = Ledger::read_csv_with(Cursor::new(csv), Some(&classifier)).unwrap();
        let snapshot = ledger.snapshot();
        assert_eq!(snapshot[0].category, "业务招待费");
        // A stored category is never re-derived.
        assert_eq!(snapshot[1].category, "差旅费");
    }

    #[test]
    fn test_read_csv_strict_rejects_bad_row() {
        let csv = "date,direction,category,amount,note
2024-01-01,outflow,办公费,10,
2024/01/02,outflow,办公费,20,slash date";

        let err = Ledger::read_csv_strict(Cursor::new(csv), None).unwrap_err();
        match err {
            EngineError::InvalidRecord { row, message } => {
                assert_eq!(row, 3);
                assert!(message.contains("bad date"), "{}", message);
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_read_csv_strict_rejects_unknown_header() {
        let csv = "when,kind,bucket,value,memo
2024-01-01,outflow,办公费,10,";
        let err = Ledger::read_csv_strict(Cursor::new(csv), None).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRecord { row: 2, .. }));
    }

    #[test]
    fn test_read_csv_accepts_legacy_chinese_header() {
        let csv = "日期,类型,分类,金额,备注
2024-01-01,收入,主营业务收入,1000.0,销售3月货款
2024-01-02,支出,业务招待费,300.0,请客户吃饭";

        let ledger = Ledger::read_csv_strict(Cursor::new(csv), None).unwrap();
        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].direction, Direction::Inflow);
        assert_eq!(snapshot[1].category, "业务招待费");
        assert_eq!(snapshot[1].note, "请客户吃饭");
    }

    #[test]
    fn test_save_replaces_file_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        std::fs::write(&path, "old contents").unwrap();

        let ledger = Ledger::from_records(vec![tx(1, "办公费", 10)]);
        ledger.save(&path).unwrap();

        let reread = Ledger::read_csv_strict(std::fs::File::open(&path).unwrap(), None).unwrap();
        assert_eq!(&*reread.snapshot(), &*ledger.snapshot());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_then_read_preserves_records() {
        let ledger = Ledger::from_records(vec![tx(1, "办公费", 10), tx(2, "差旅费", 20)]);
        let mut out = Vec::new();
        ledger.write_csv(&mut out).unwrap();

        let text = String::from_utf8(out.clone()).unwrap();
        assert!(text.starts_with("date,direction,category,amount,note"));
        assert!(text.contains("2024-01-02,outflow,差旅费,20.00,"));

        let reread = Ledger::read_csv(Cursor::new(out)).unwrap();
        assert_eq!(&*reread.snapshot(), &*ledger.snapshot());
    }
}
