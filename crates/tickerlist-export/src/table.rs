use serde::Serialize;
use serde_json::{Map, Value};

use crate::ExportError;

/// Scalar spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(value) => Self::Bool(value),
            Value::Number(value) => value.as_f64().map_or(Self::Empty, Self::Number),
            Value::String(value) => Self::Text(value),
            nested @ (Value::Array(_) | Value::Object(_)) => Self::Text(nested.to_string()),
        }
    }
}

/// Column names plus rows of cells, the in-memory form of one worksheet.
///
/// Every row has exactly one cell per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from serializable records; field names become columns
    /// in the order they first appear.
    pub fn from_records<T: Serialize>(records: &[T]) -> Result<Self, ExportError> {
        let mut table = Self::default();
        for (index, record) in records.iter().enumerate() {
            match serde_json::to_value(record)? {
                Value::Object(fields) => table.push_object(fields),
                _ => return Err(ExportError::Record { index }),
            }
        }
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cell at `row` under column `name`.
    pub fn cell(&self, row: usize, name: &str) -> Option<&CellValue> {
        let column = self.column_index(name)?;
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Appends a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(cells);
    }

    fn push_object(&mut self, fields: Map<String, Value>) {
        let mut cells = vec![CellValue::Empty; self.columns.len()];
        for (name, value) in fields {
            let index = self.ensure_column(&name, &mut cells);
            cells[index] = CellValue::from(value);
        }
        self.rows.push(cells);
    }

    fn ensure_column(&mut self, name: &str, pending: &mut Vec<CellValue>) -> usize {
        if let Some(index) = self.column_index(name) {
            return index;
        }
        self.columns.push(name.to_owned());
        for row in &mut self.rows {
            row.push(CellValue::Empty);
        }
        pending.push(CellValue::Empty);
        self.columns.len() - 1
    }

    /// Appends `other` below `self`, aligning cells by column name.
    ///
    /// Columns only `other` has are added at the end; cells missing on either
    /// side stay empty.
    pub fn concat(mut self, other: Table) -> Table {
        let Table { columns, rows } = other;

        let mut positions = Vec::with_capacity(columns.len());
        let mut scratch = Vec::new();
        for name in &columns {
            positions.push(self.ensure_column(name, &mut scratch));
        }

        for row in rows {
            let mut cells = vec![CellValue::Empty; self.columns.len()];
            for (cell, &position) in row.into_iter().zip(&positions) {
                cells[position] = cell;
            }
            self.rows.push(cells);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        price: Option<f64>,
        active: bool,
    }

    #[test]
    fn records_keep_field_order_and_optional_gaps() {
        let table = Table::from_records(&[
            Row {
                name: "Acme",
                price: Some(12.5),
                active: true,
            },
            Row {
                name: "Beta",
                price: None,
                active: false,
            },
        ])
        .expect("records serialize");

        assert_eq!(table.columns(), ["name", "price", "active"]);
        assert_eq!(table.cell(0, "price"), Some(&CellValue::Number(12.5)));
        assert_eq!(table.cell(1, "price"), Some(&CellValue::Empty));
        assert_eq!(table.cell(1, "active"), Some(&CellValue::Bool(false)));
    }

    #[test]
    fn non_object_records_are_rejected() {
        let err = Table::from_records(&[1, 2]).expect_err("numbers are not records");
        assert!(matches!(err, ExportError::Record { index: 0 }));
    }

    #[test]
    fn concat_aligns_columns_by_name() {
        let mut left = Table::new(vec![String::from("a"), String::from("b")]);
        left.push_row(vec![CellValue::Number(1.0), CellValue::Number(2.0)]);

        let mut right = Table::new(vec![String::from("b"), String::from("c")]);
        right.push_row(vec![
            CellValue::Text(String::from("x")),
            CellValue::Text(String::from("y")),
        ]);

        let merged = left.concat(right);
        assert_eq!(merged.columns(), ["a", "b", "c"]);
        assert_eq!(merged.row_count(), 2);
        assert_eq!(merged.cell(0, "c"), Some(&CellValue::Empty));
        assert_eq!(merged.cell(1, "a"), Some(&CellValue::Empty));
        assert_eq!(
            merged.cell(1, "b").and_then(CellValue::as_text),
            Some("x")
        );
    }

    #[test]
    fn nested_values_are_written_as_json_text() {
        let cell = CellValue::from(serde_json::json!({"k": 1}));
        assert_eq!(cell.as_text(), Some("{\"k\":1}"));
    }
}
