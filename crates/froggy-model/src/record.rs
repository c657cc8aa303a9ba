use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

static BLANK: CellValue = CellValue::Blank;

/// One species row, keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    name: String,
    pub cells: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            cells: BTreeMap::new(),
        }
    }

    /// Builder-style cell insertion, mostly for fixtures.
    #[must_use]
    pub fn with_cell(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cell for `column`, or `Blank` if the record has none.
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&BLANK)
    }

    pub fn set(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }
}

/// An ordered table of records with a name index.
///
/// Row order is preserved as loaded. When a name occurs more than once the
/// index points at the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    pub name_column: String,
    pub columns: Vec<String>,
    records: Vec<Record>,
    index: BTreeMap<String, usize>,
}

impl RecordTable {
    pub fn new(name_column: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name_column: name_column.into(),
            columns,
            records: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    /// Appends a record. Returns `false` if its name was already present.
    pub fn push(&mut self, record: Record) -> bool {
        let position = self.records.len();
        let is_new = !self.index.contains_key(record.name());
        if is_new {
            self.index.insert(record.name().to_string(), position);
        }
        self.records.push(record);
        is_new
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.index
            .get(name.trim())
            .and_then(|&position| self.records.get(position))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name.trim())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Mutable access to cells; names stay fixed so the index remains valid.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut BTreeMap<String, CellValue>> {
        self.records.iter_mut().map(|record| &mut record.cells)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(Record::name)
    }

    pub fn has_column(&self, column: &str) -> bool {
        column == self.name_column || self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keeps only records whose name is in `names`. Returns the number removed.
    pub fn retain_names(&mut self, names: &BTreeSet<String>) -> usize {
        let before = self.records.len();
        self.records.retain(|record| names.contains(record.name()));
        self.rebuild_index();
        before - self.records.len()
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, record) in self.records.iter().enumerate() {
            self.index
                .entry(record.name().to_string())
                .or_insert(position);
        }
    }
}

impl FromIterator<Record> for RecordTable {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut columns = BTreeSet::new();
        let mut table = RecordTable::new("Name", Vec::new());
        for record in iter {
            columns.extend(record.cells.keys().cloned());
            table.push(record);
        }
        table.columns = columns.into_iter().collect();
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_reads_as_missing() {
        let record = Record::new("Rana temporaria").with_cell("SVL Male (mm)", 70.0);
        assert_eq!(record.get("SVL Male (mm)").as_number(), Some(70.0));
        assert!(record.get("Max Egg Clutch").is_missing());
    }

    #[test]
    fn first_duplicate_wins_in_index() {
        let mut table = RecordTable::new("Name", vec!["A".to_string()]);
        assert!(table.push(Record::new("Bufo bufo").with_cell("A", 1.0)));
        assert!(!table.push(Record::new("Bufo bufo").with_cell("A", 2.0)));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Bufo bufo").unwrap().get("A").as_number(), Some(1.0));
    }

    #[test]
    fn retain_names_rebuilds_index() {
        let mut table: RecordTable = [
            Record::new("Bufo bufo"),
            Record::new("Hyla arborea"),
            Record::new("Rana temporaria"),
        ]
        .into_iter()
        .collect();
        let keep: BTreeSet<String> = ["Rana temporaria".to_string()].into();
        assert_eq!(table.retain_names(&keep), 2);
        assert_eq!(table.len(), 1);
        assert!(table.get("Rana temporaria").is_some());
        assert!(table.get("Bufo bufo").is_none());
    }

    #[test]
    fn names_are_trimmed() {
        let mut table = RecordTable::new("Name", Vec::new());
        table.push(Record::new("  Hyla arborea "));
        assert!(table.contains("Hyla arborea"));
        assert!(table.contains(" Hyla arborea"));
    }
}
