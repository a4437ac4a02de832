use crate::{
    data::Cell,
    derive::PRICE_GBP_COLUMN,
    table::Table,
};

/// Inclusive numeric bounds on a single column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter<'a> {
    pub column: &'a str,
    pub min: f64,
    pub max: f64,
}

/// Listings priced outside this range are treated as outliers.
pub const PRICE_RANGE: RangeFilter<'static> = RangeFilter {
    column: PRICE_GBP_COLUMN,
    min: 10.0,
    max: 1000.0,
};

impl RangeFilter<'_> {
    /// Null and non-numeric cells never match.
    pub fn matches(&self, cell: &Cell) -> bool {
        cell.as_ref()
            .and_then(|value| value.as_f64())
            .is_some_and(|v| v >= self.min && v <= self.max)
    }

    /// Drops rows outside the range and returns how many were removed, or
    /// `None` without touching the table when the column is absent.
    pub fn apply(&self, table: &mut Table) -> Option<usize> {
        let column = table.column(self.column)?;
        let mask = column
            .cells
            .iter()
            .map(|cell| self.matches(cell))
            .collect::<Vec<_>>();
        let before = table.row_count();
        table.retain_rows(&mask);
        Some(before - table.row_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;

    #[test]
    fn matches_is_inclusive_and_rejects_null() {
        assert!(PRICE_RANGE.matches(&Some(Value::Float(10.0))));
        assert!(PRICE_RANGE.matches(&Some(Value::Float(1000.0))));
        assert!(PRICE_RANGE.matches(&Some(Value::Integer(500))));
        assert!(!PRICE_RANGE.matches(&Some(Value::Float(9.99))));
        assert!(!PRICE_RANGE.matches(&Some(Value::Float(1000.01))));
        assert!(!PRICE_RANGE.matches(&None));
        assert!(!PRICE_RANGE.matches(&Some(Value::Text("500".into()))));
    }

    #[test]
    fn apply_without_column_keeps_every_row() {
        let mut table = Table::from_raw(
            vec!["price".to_string()],
            vec![vec!["5".to_string()], vec![String::new()]],
        );
        assert_eq!(PRICE_RANGE.apply(&mut table), None);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn apply_drops_out_of_range_and_null_rows() {
        let mut table = Table::from_raw(vec!["id".to_string()], vec![vec!["a".to_string()]; 4]);
        table.set_column(
            PRICE_GBP_COLUMN,
            vec![
                Some(Value::Float(5.0)),
                Some(Value::Float(50.0)),
                None,
                Some(Value::Float(1000.0)),
            ],
        );
        assert_eq!(PRICE_RANGE.apply(&mut table), Some(2));
        let remaining = table.column(PRICE_GBP_COLUMN).unwrap();
        assert_eq!(
            remaining.cells,
            vec![Some(Value::Float(50.0)), Some(Value::Float(1000.0))]
        );
    }
}
