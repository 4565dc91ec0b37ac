//! Simple Moving Average over closing price.
//!
//! SMA(n)[i] = (P[i-n+1] + ... + P[i]) / n, summed per trailing slice with
//! Neumaier compensation. A window of identical closes yields that close
//! exactly, so a flat series never drifts above or below its own average.
//! Warmup: first (n-1) points are undefined.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries};
use crate::domain::price_series::PricePoint;

pub fn calculate_sma(points: &[PricePoint], window: usize) -> IndicatorSeries {
    if window == 0 {
        return IndicatorSeries {
            window,
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(points.len());
    // length of the run of identical closes ending at i
    let mut flat_run = 0usize;

    for (i, point) in points.iter().enumerate() {
        flat_run = if i > 0 && points[i - 1].close == point.close {
            flat_run + 1
        } else {
            1
        };

        let value = if i + 1 < window {
            None
        } else if flat_run >= window {
            Some(point.close)
        } else {
            Some(compensated_sum(&points[i + 1 - window..=i]) / window as f64)
        };

        values.push(IndicatorPoint {
            date: point.date,
            value,
        });
    }

    IndicatorSeries { window, values }
}

fn compensated_sum(points: &[PricePoint]) -> f64 {
    let mut sum = 0.0f64;
    let mut compensation = 0.0f64;
    for p in points {
        let t = sum + p.close;
        if sum.abs() >= p.close.abs() {
            compensation += (sum - t) + p.close;
        } else {
            compensation += (p.close - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}
