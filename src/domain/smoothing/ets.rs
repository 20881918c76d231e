//! Single exponential smoothing.
//!
//! S[0] = P[0]
//! S[i] = alpha·P[i] + (1 − alpha)·S[i−1]

use crate::domain::observation::Observation;
use crate::domain::smoothing::SmoothedPoint;

pub fn calculate_ets(data: &[Observation], alpha: f64) -> Vec<SmoothedPoint> {
    let Some(first) = data.first() else {
        return Vec::new();
    };

    let mut points = Vec::with_capacity(data.len());
    let mut level = first.price;
    points.push(SmoothedPoint::from_observation(first, level));

    for obs in &data[1..] {
        level = alpha * obs.price + (1.0 - alpha) * level;
        points.push(SmoothedPoint::from_observation(obs, level));
    }

    points
}
