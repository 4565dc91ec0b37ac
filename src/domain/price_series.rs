//! Daily closing-price series.

use crate::domain::error::DashboardError;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Closing prices ordered by strictly increasing date.
///
/// Gaps between dates are expected (weekends, holidays) and are not checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, DashboardError> {
        for point in &points {
            if !point.close.is_finite() {
                return Err(DashboardError::data_source(format!(
                    "non-finite close on {}",
                    point.date
                )));
            }
        }
        if let Some(pair) = points.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(DashboardError::data_source(format!(
                "dates not strictly increasing: {} then {}",
                pair[0].date, pair[1].date
            )));
        }
        Ok(Self { points })
    }

    /// Sort by date, drop non-finite closes, and keep the last observation of
    /// any repeated date.
    pub fn from_unsorted(mut points: Vec<PricePoint>) -> Self {
        points.retain(|p| p.close.is_finite());
        // stable sort keeps provider order within a date
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self { points: deduped }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// The last `count` points, or the whole series when it is shorter.
    pub fn tail(&self, count: usize) -> PriceSeries {
        let start = self.points.len().saturating_sub(count);
        PriceSeries {
            points: self.points[start..].to_vec(),
        }
    }
}
