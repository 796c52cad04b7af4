use serde::Serialize;
use std::collections::BTreeSet;

/// Single cell as read from a filing export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Interpret delimited-text input, preferring a numeric reading.
    pub fn from_text(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        match parse_amount(trimmed) {
            Some(number) => Some(Self::Number(number)),
            None => Some(Self::Text(trimmed.to_string())),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(_) => None,
        }
    }

    fn distinct_key(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Plain decimals, plus amounts with comma digit grouping in either Western
/// (`118,000`) or Indian (`1,18,000`) style.
fn parse_amount(text: &str) -> Option<f64> {
    let number = match text.parse::<f64>() {
        Ok(number) => number,
        Err(_) if is_grouped(text) => text.replace(',', "").parse::<f64>().ok()?,
        Err(_) => return None,
    };
    number.is_finite().then_some(number)
}

fn is_grouped(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let integer = unsigned.split_once('.').map_or(unsigned, |(integer, _)| integer);
    let mut groups = integer.split(',');
    let lead = groups.next().unwrap_or_default();

    integer.contains(',')
        && (1..=3).contains(&lead.len())
        && lead.bytes().all(|byte| byte.is_ascii_digit())
        && groups.all(|group| {
            (2..=3).contains(&group.len()) && group.bytes().all(|byte| byte.is_ascii_digit())
        })
}

/// Rows of a parsed filing, addressed by trimmed column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<CellValue>>>,
}

impl RawTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(headers: Vec<String>) -> Self {
        let headers = headers
            .into_iter()
            .map(|header| header.trim().to_string())
            .collect();
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row; short rows are padded with absent cells, extra cells dropped.
    pub fn push_row(&mut self, mut row: Vec<Option<CellValue>>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Optional accessor: `None` when the filing lacks the column.
    pub fn column(&self, name: &str) -> Option<Column<'_>> {
        self.column_index(name).map(|index| Column { table: self, index })
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

/// Borrowed view over one column of a [`RawTable`].
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    table: &'a RawTable,
    index: usize,
}

impl<'a> Column<'a> {
    pub fn cells(&self) -> impl Iterator<Item = Option<&'a CellValue>> + 'a {
        let index = self.index;
        self.table
            .rows
            .iter()
            .map(move |row| row.get(index).and_then(Option::as_ref))
    }

    /// Numeric reading per row, absent or non-numeric cells counting as zero.
    pub fn numbers_or_zero(&self) -> impl Iterator<Item = f64> + 'a {
        self.cells()
            .map(|cell| cell.and_then(CellValue::as_number).unwrap_or(0.0))
    }

    pub fn sum(&self) -> f64 {
        self.numbers_or_zero().sum()
    }

    /// Row-wise `Σ self[i] * other[i] / divisor`.
    pub fn weighted_sum(&self, other: &Column<'_>, divisor: f64) -> f64 {
        self.numbers_or_zero()
            .zip(other.numbers_or_zero())
            .map(|(left, right)| left * right / divisor)
            .sum()
    }

    /// Distinct numeric values, ignoring absent cells.
    pub fn distinct_numbers(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self
            .cells()
            .filter_map(|cell| cell.and_then(CellValue::as_number))
            .collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        values
    }

    /// Count of distinct present values.
    pub fn distinct_count(&self) -> usize {
        self.cells()
            .flatten()
            .map(CellValue::distinct_key)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawTable {
        let mut table = RawTable::new(vec![
            " Rate ".to_string(),
            "Taxable Value".to_string(),
            "GSTIN/UIN of Recipient".to_string(),
        ]);
        table.push_row(vec![
            CellValue::from_text("18"),
            CellValue::from_text("1000"),
            CellValue::from_text("27AAACB1234C1Z5"),
        ]);
        table.push_row(vec![
            CellValue::from_text("5"),
            CellValue::from_text(""),
            CellValue::from_text("27AAACB1234C1Z5"),
        ]);
        table.push_row(vec![CellValue::from_text("18")]);
        table
    }

    #[test]
    fn grouped_amounts_read_as_numbers() {
        assert_eq!(CellValue::from_text("1,18,000"), Some(CellValue::Number(118_000.0)));
        assert_eq!(CellValue::from_text("118,000.50"), Some(CellValue::Number(118_000.5)));
        assert_eq!(CellValue::from_text("-12,34,567"), Some(CellValue::Number(-1_234_567.0)));
        assert_eq!(
            CellValue::from_text("27AAACB1234C1Z5"),
            Some(CellValue::Text("27AAACB1234C1Z5".to_string()))
        );
        assert_eq!(CellValue::from_text("1,2"), Some(CellValue::Text("1,2".to_string())));
        assert_eq!(CellValue::from_text("12,,000"), Some(CellValue::Text("12,,000".to_string())));
    }

    #[test]
    fn grouped_invoice_values_are_summed() {
        let mut table = RawTable::new(vec!["Invoice Value".to_string()]);
        table.push_row(vec![CellValue::from_text("1,18,000")]);
        table.push_row(vec![CellValue::from_text("2,000")]);

        let invoices = table.column("Invoice Value").expect("column");
        assert_eq!(invoices.sum(), 120_000.0);
    }

    #[test]
    fn headers_are_trimmed_and_lookup_is_exact() {
        let table = sample();
        assert!(table.has_column("Rate"));
        assert!(!table.has_column("rate"));
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn missing_cells_sum_as_zero() {
        let table = sample();
        let taxable = table.column("Taxable Value").expect("column");
        assert_eq!(taxable.sum(), 1000.0);

        let rate = table.column("Rate").expect("column");
        assert_eq!(taxable.weighted_sum(&rate, 100.0), 180.0);
    }

    #[test]
    fn distinct_helpers_skip_absent_values() {
        let table = sample();
        let rate = table.column("Rate").expect("column");
        assert_eq!(rate.distinct_numbers(), vec![5.0, 18.0]);

        let recipients = table.column("GSTIN/UIN of Recipient").expect("column");
        assert_eq!(recipients.distinct_count(), 1);
    }
}
