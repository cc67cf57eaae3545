//! Vertical floor bands.
//!
//! Storey elevations are turned into half-open bands
//! `[elevation, elevation + height)` that decide which 2D grid a piece of
//! 3D geometry lands on.

use serde::{Deserialize, Serialize};

/// Bands lower than this are dropped as mezzanine or noise artifacts.
pub const MIN_FLOOR_HEIGHT: f64 = 1.5;

/// One floor of the building.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorBand {
    pub elevation: f64,
    pub height: f64,
}

impl FloorBand {
    pub fn new(elevation: f64, height: f64) -> Self {
        Self { elevation, height }
    }

    /// Top of the band (exclusive).
    #[inline]
    pub fn ceiling(&self) -> f64 {
        self.elevation + self.height
    }

    /// Does the open interval `(lower, upper)` overlap this band?
    #[inline]
    pub fn overlaps(&self, lower: f64, upper: f64) -> bool {
        lower < self.ceiling() && upper > self.elevation
    }
}

/// Derive floor bands from storey elevations.
///
/// Each elevation reaches up to the next one; the topmost reaches `max_z`.
/// Bands shorter than `min_height` are dropped. If nothing survives, a
/// single band spanning `[min_z, max_z]` is returned, so the result is never
/// empty.
pub fn segment_floors(elevations: &[f64], min_z: f64, max_z: f64, min_height: f64) -> Vec<FloorBand> {
    let mut sorted: Vec<f64> = elevations.iter().copied().filter(|e| e.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();

    let bands: Vec<FloorBand> = sorted
        .iter()
        .enumerate()
        .filter_map(|(i, &elevation)| {
            let next = sorted.get(i + 1).copied().unwrap_or(max_z);
            let height = next - elevation;
            (height >= min_height).then(|| FloorBand::new(elevation, height))
        })
        .collect();

    if bands.is_empty() {
        log::warn!(
            "No storey band reaches {:.2} units; using one floor over [{:.2}, {:.2}]",
            min_height,
            min_z,
            max_z
        );
        return vec![FloorBand::new(min_z, max_z - min_z)];
    }

    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bands_reach_next_elevation() {
        let bands = segment_floors(&[3.0, 0.0], -0.2, 6.5, MIN_FLOOR_HEIGHT);
        assert_eq!(bands.len(), 2);
        assert_relative_eq!(bands[0].elevation, 0.0);
        assert_relative_eq!(bands[0].height, 3.0);
        assert_relative_eq!(bands[1].elevation, 3.0);
        assert_relative_eq!(bands[1].height, 3.5);
    }

    #[test]
    fn test_short_bands_dropped() {
        // 0.0 -> 1.0 is a 1 unit mezzanine and the roof band is 0.4
        let bands = segment_floors(&[0.0, 1.0, 4.0], 0.0, 4.4, MIN_FLOOR_HEIGHT);
        assert_eq!(bands, vec![FloorBand::new(1.0, 3.0)]);
    }

    #[test]
    fn test_fallback_single_band() {
        let bands = segment_floors(&[], -1.0, 5.0, MIN_FLOOR_HEIGHT);
        assert_eq!(bands, vec![FloorBand::new(-1.0, 6.0)]);

        let bands = segment_floors(&[2.0, 2.5], 0.0, 3.0, MIN_FLOOR_HEIGHT);
        assert_eq!(bands.len(), 1);
        assert_relative_eq!(bands[0].elevation, 0.0);
    }

    #[test]
    fn test_bands_never_overlap() {
        let bands = segment_floors(&[0.0, 3.0, 3.0, 6.0, 9.5], 0.0, 12.0, MIN_FLOOR_HEIGHT);
        for pair in bands.windows(2) {
            assert!(pair[0].ceiling() <= pair[1].elevation);
        }
    }

    #[test]
    fn test_overlap_is_open_interval() {
        let band = FloorBand::new(0.0, 3.0);
        assert!(band.overlaps(-1.0, 0.1));
        assert!(!band.overlaps(-1.0, 0.0));
        assert!(!band.overlaps(3.0, 4.0));
        assert!(band.overlaps(2.9, 4.0));
    }
}
