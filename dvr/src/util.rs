use crate::router::INF;
use std::cmp::min;

/// Adds two metrics, saturating at INF
///
/// # Arguments
///
/// * `cost_a`: First metric
/// * `cost_b`: Second metric
///
/// returns: u16, never greater than INF
///
/// # Examples
///
/// ```
/// use dvr::router::INF;
/// assert_eq!(dvr::util::sum_inf(3, 4), 7);
/// assert_eq!(dvr::util::sum_inf(INF - 1, 1), INF);
/// assert_eq!(dvr::util::sum_inf(50, 0xFFFF), INF);
/// ```
pub fn sum_inf(cost_a: u16, cost_b: u16) -> u16 {
    min(INF as u32, cost_a as u32 + cost_b as u32) as u16
}

/// Clamps a metric into [0, INF]
///
/// ```
/// use dvr::router::INF;
/// assert_eq!(dvr::util::clamp_inf(12), 12);
/// assert_eq!(dvr::util::clamp_inf(INF + 20), INF);
/// ```
pub fn clamp_inf(metric: u16) -> u16 {
    min(INF, metric)
}
