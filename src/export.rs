use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Transaction;

/// Write `transactions` to a CSV file, returning how many rows were written.
pub(crate) fn export_csv(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    wtr.write_record(["id", "date", "type", "category", "text", "amount"])?;
    for txn in transactions {
        wtr.write_record([
            txn.id.to_string(),
            txn.date.clone(),
            txn.kind.as_str().to_string(),
            txn.category.clone(),
            txn.text.clone(),
            txn.amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    tracing::info!(rows = transactions.len(), path = %path.display(), "exported csv");
    Ok(transactions.len())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::TxnType;

    #[test]
    fn test_export_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let txns = vec![
            Transaction {
                id: 1,
                text: "Salary".into(),
                amount: dec!(5000),
                kind: TxnType::Income,
                category: "Job".into(),
                date: "2024-01-05".into(),
            },
            Transaction {
                id: 2,
                text: "Fish, chips".into(),
                amount: dec!(-12.50),
                kind: TxnType::Expense,
                category: "Food".into(),
                date: "2024-01-06".into(),
            },
        ];
        assert_eq!(export_csv(&path, &txns).unwrap(), 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "id,date,type,category,text,amount");
        assert_eq!(lines[1], "1,2024-01-05,income,Job,Salary,5000");
        assert_eq!(lines[2], "2,2024-01-06,expense,Food,\"Fish, chips\",-12.50");
    }

    #[test]
    fn test_export_empty_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        assert_eq!(export_csv(&path, &[]).unwrap(), 0);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim(), "id,date,type,category,text,amount");
    }
}
