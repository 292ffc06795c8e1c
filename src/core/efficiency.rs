// FuelWiseLog - core/efficiency.rs
//
// Fuel consumption and running-cost maths.
//
// Every function expects a single vehicle's records ordered by mileage
// ascending. An interval is the stretch between two consecutive fill-ups:
// its distance is the odometer difference and the fuel/cost charged to it
// are those of the later fill-up. Intervals with a non-positive distance
// are ignored everywhere.

use crate::core::model::FuelRecord;
use serde::Serialize;

/// Metrics for one interval between consecutive fill-ups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntervalMetrics {
    pub distance_km: f64,
    pub litres_per_100km: f64,
    pub cost_per_km: f64,
}

/// Metrics for the interval ending at `cur`, or `None` when the odometer
/// did not advance.
pub fn interval_metrics(prev: &FuelRecord, cur: &FuelRecord) -> Option<IntervalMetrics> {
    let distance = cur.mileage_km - prev.mileage_km;
    if distance <= 0.0 {
        return None;
    }
    Some(IntervalMetrics {
        distance_km: distance,
        litres_per_100km: cur.volume_litres / distance * 100.0,
        cost_per_km: cur.cost / distance,
    })
}

/// Iterator over the metrics of every positive interval.
fn positive_intervals(records: &[FuelRecord]) -> impl Iterator<Item = IntervalMetrics> + '_ {
    records
        .windows(2)
        .filter_map(|pair| interval_metrics(&pair[0], &pair[1]))
}

// =============================================================================
// Per-record history
// =============================================================================

/// A record paired with the metrics of the interval it closes.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDisplay {
    pub record: FuelRecord,
    /// `None` for the first fill-up or when the odometer did not advance.
    pub metrics: Option<IntervalMetrics>,
}

/// Pair each record with the interval it closes.
///
/// Metrics are computed oldest to newest; `newest_first` reverses the
/// finished list for display.
pub fn record_history(records: &[FuelRecord], newest_first: bool) -> Vec<RecordDisplay> {
    let mut out: Vec<RecordDisplay> = records
        .iter()
        .enumerate()
        .map(|(i, r)| RecordDisplay {
            record: r.clone(),
            metrics: i
                .checked_sub(1)
                .and_then(|p| interval_metrics(&records[p], r)),
        })
        .collect();
    if newest_first {
        out.reverse();
    }
    out
}

// =============================================================================
// Distance-weighted totals
// =============================================================================

/// Totals over all positive intervals, with distance-weighted averages.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FuelSummary {
    pub total_distance_km: f64,
    pub total_litres: f64,
    pub total_cost: f64,
    /// `None` until at least one positive interval exists.
    pub avg_litres_per_100km: Option<f64>,
    pub avg_cost_per_km: Option<f64>,
}

impl FuelSummary {
    pub fn from_records(records: &[FuelRecord]) -> Self {
        if records.len() < 2 {
            return Self::default();
        }

        let mut summary = Self::default();
        for pair in records.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            let distance = cur.mileage_km - prev.mileage_km;
            if distance > 0.0 {
                summary.total_distance_km += distance;
                summary.total_litres += cur.volume_litres;
                summary.total_cost += cur.cost;
            }
        }

        if summary.total_distance_km > 0.0 {
            summary.avg_litres_per_100km =
                Some(summary.total_litres / summary.total_distance_km * 100.0);
            summary.avg_cost_per_km = Some(summary.total_cost / summary.total_distance_km);
        }
        summary
    }
}

// =============================================================================
// Mean of per-interval ratios
// =============================================================================

/// Arithmetic mean of the per-interval ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AverageEfficiency {
    pub avg_cost_per_km: f64,
    pub avg_litres_per_100km: f64,
    /// Number of positive intervals averaged.
    pub intervals: usize,
}

impl AverageEfficiency {
    /// `None` when fewer than two records exist or no interval is positive.
    pub fn from_records(records: &[FuelRecord]) -> Option<Self> {
        if records.len() < 2 {
            return None;
        }
        let (mut sum_cost, mut sum_litres, mut n) = (0.0, 0.0, 0usize);
        for m in positive_intervals(records) {
            sum_cost += m.cost_per_km;
            sum_litres += m.litres_per_100km;
            n += 1;
        }
        if n == 0 {
            return None;
        }
        Some(Self {
            avg_cost_per_km: sum_cost / n as f64,
            avg_litres_per_100km: sum_litres / n as f64,
            intervals: n,
        })
    }
}

/// Dashboard card for the selected vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HomeSummary {
    /// Last odometer reading minus the first.
    pub total_distance_km: f64,
    /// Sum of every fill-up's cost, including the first.
    pub total_cost: f64,
    pub avg_cost_per_km: f64,
    pub avg_litres_per_100km: f64,
}

impl HomeSummary {
    /// `None` when there is not enough history to say anything useful.
    pub fn from_records(records: &[FuelRecord]) -> Option<Self> {
        let (first, last) = match records {
            [first, .., last] => (first, last),
            _ => return None,
        };
        let total_distance_km = last.mileage_km - first.mileage_km;
        if total_distance_km <= 0.0 {
            return None;
        }
        let average = AverageEfficiency::from_records(records)?;
        Some(Self {
            total_distance_km,
            total_cost: records.iter().map(|r| r.cost).sum(),
            avg_cost_per_km: average.avg_cost_per_km,
            avg_litres_per_100km: average.avg_litres_per_100km,
        })
    }
}
