//! CSV file price adapter for offline use.
//!
//! One file per qualified ticker, `{dir}/{ticker}.csv`, with a header row
//! naming at least `date` and `close` columns.

use crate::domain::error::DashboardError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::domain::resolver::{Lookback, TRADING_DAYS_PER_YEAR};
use crate::domain::symbol::QualifiedTicker;
use crate::ports::data_port::PriceFetcher;
use chrono::{Months, NaiveDate};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &QualifiedTicker) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }

    fn parse(content: &str, path: &str) -> Result<Vec<PricePoint>, DashboardError> {
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| DashboardError::data_source(format!("{path}: CSV header error: {e}")))?
            .clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    DashboardError::data_source(format!("{path}: missing {name} column"))
                })
        };
        let date_col = column("date")?;
        let close_col = column("close")?;

        let mut points = Vec::new();
        for result in rdr.records() {
            let record = result
                .map_err(|e| DashboardError::data_source(format!("{path}: CSV parse error: {e}")))?;

            let date_str = record.get(date_col).unwrap_or_default().trim();
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                DashboardError::data_source(format!("{path}: invalid date {date_str:?}: {e}"))
            })?;

            let close_str = record.get(close_col).unwrap_or_default().trim();
            if close_str.is_empty() {
                log::warn!("{}: skipping {} with no close", path, date);
                continue;
            }
            let close: f64 = close_str.parse().map_err(|e| {
                DashboardError::data_source(format!("{path}: invalid close {close_str:?}: {e}"))
            })?;

            points.push(PricePoint { date, close });
        }
        Ok(points)
    }
}

impl PriceFetcher for CsvAdapter {
    /// Missing files read as empty. The lookback is measured back from the
    /// file's most recent row, so stale snapshots still fill the window.
    fn fetch_series(
        &self,
        ticker: &QualifiedTicker,
        lookback: Lookback,
    ) -> Result<PriceSeries, DashboardError> {
        let path = self.csv_path(ticker);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PriceSeries::empty()),
            Err(e) => {
                return Err(DashboardError::data_source(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let series = PriceSeries::from_unsorted(Self::parse(
            &content,
            &path.display().to_string(),
        )?);
        let Some(last) = series.last() else {
            return Ok(series);
        };

        let cutoff = last
            .date
            .checked_sub_months(Months::new(lookback.as_years() * 12))
            .unwrap_or(NaiveDate::MIN);
        let kept: Vec<PricePoint> = series
            .points()
            .iter()
            .filter(|p| p.date > cutoff)
            .copied()
            .collect();
        log::info!(
            "read {} points for {} from {} (~{} sessions requested)",
            kept.len(),
            ticker,
            path.display(),
            lookback.as_years() as usize * TRADING_DAYS_PER_YEAR
        );
        PriceSeries::new(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::symbol::Symbol;
    use tempfile::TempDir;

    fn ticker(code: &str, suffix: &str) -> QualifiedTicker {
        QualifiedTicker::new(Symbol::parse(code).unwrap(), suffix)
    }

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "date,open,high,low,close,volume\n\
            2024-01-17,110.0,120.0,105.0,115.0,55000\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000\n";
        fs::write(path.join("2330.TW.csv"), csv_content).unwrap();

        fs::write(
            path.join("6488.TWO.csv"),
            "Date,Close\n2021-06-01,10\n2022-06-01,20\n2023-06-01,30\n2024-06-01,40\n",
        )
        .unwrap();
        fs::write(path.join("EMPTY.TW.csv"), "date,close\n").unwrap();
        fs::write(path.join("BAD.TW.csv"), "date,close\n2024-01-01,abc\n").unwrap();
        fs::write(path.join("NOCLOSE.TW.csv"), "date,open\n2024-01-01,1\n").unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_returns_sorted_closes() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let series = adapter
            .fetch_series(&ticker("2330", ".TW"), Lookback::default())
            .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(
            series.points()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(series.points()[0].close, 105.0);
        assert_eq!(series.last().unwrap().close, 115.0);
    }

    #[test]
    fn fetch_applies_lookback_from_last_row() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let series = adapter
            .fetch_series(&ticker("6488", ".TWO"), Lookback::years(2).unwrap())
            .unwrap();
        let closes: Vec<f64> = series.points().iter().map(|p| p.close).collect();
        assert_eq!(closes, vec![30.0, 40.0]);
    }

    #[test]
    fn fetch_missing_file_is_empty() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let series = adapter
            .fetch_series(&ticker("2330", ".TWO"), Lookback::default())
            .unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn fetch_header_only_is_empty() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let series = adapter
            .fetch_series(&ticker("EMPTY", ".TW"), Lookback::default())
            .unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn fetch_bad_close_is_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let err = adapter
            .fetch_series(&ticker("BAD", ".TW"), Lookback::default())
            .unwrap_err();
        assert!(matches!(err, DashboardError::DataSource { .. }));
    }

    #[test]
    fn fetch_without_close_column_is_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let err = adapter
            .fetch_series(&ticker("NOCLOSE", ".TW"), Lookback::default())
            .unwrap_err();
        assert!(err.to_string().contains("missing close column"));
    }
}
