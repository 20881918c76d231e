//! Weighted moving average.
//!
//! Linear weights, oldest lightest: a full window of n uses 1..=n.
//! WMA(n)[i] = Σ w_j·P_j / Σ w_j over the trailing k = min(n, i+1) prices.
//! When the window is partial at the start of the series the low weights
//! are dropped, so the k prices carry weights (n-k+1)..=n.

use crate::domain::observation::Observation;
use crate::domain::smoothing::SmoothedPoint;

pub fn calculate_wma(data: &[Observation], window: usize) -> Vec<SmoothedPoint> {
    if window == 0 || data.is_empty() {
        return Vec::new();
    }

    let mut points = Vec::with_capacity(data.len());

    for (i, obs) in data.iter().enumerate() {
        let start = (i + 1).saturating_sub(window);
        let slice = &data[start..=i];
        let offset = window - slice.len();

        let mut weighted_sum = 0.0_f64;
        let mut weight_sum = 0.0_f64;
        for (j, o) in slice.iter().enumerate() {
            let weight = (offset + j + 1) as f64;
            weighted_sum += weight * o.price;
            weight_sum += weight;
        }

        points.push(SmoothedPoint::from_observation(obs, weighted_sum / weight_sum));
    }

    points
}
