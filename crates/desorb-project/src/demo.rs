//! Built-in demonstration data set.

use desorb_reduce::RawTrial;

use crate::schema::Experiment;
use crate::validate::LATEST_VERSION;

/// Packed height of the demonstration rig [m]
pub const DEMO_PACKED_HEIGHT_M: f64 = 0.8;

const DEMO_SERIES_I: [[f64; 5]; 5] = [
    [15.0, 20.0, 25.0, 20.5, 9.0],
    [30.0, 20.0, 25.0, 22.0, 9.5],
    [45.0, 20.0, 25.0, 24.0, 10.0],
    [60.0, 20.0, 25.0, 26.0, 10.5],
    [75.0, 20.0, 25.0, 28.0, 11.0],
];

const DEMO_SERIES_II: [[f64; 5]; 5] = [
    [45.0, 10.0, 25.0, 22.0, 9.0],
    [45.0, 15.0, 25.0, 22.0, 9.5],
    [45.0, 20.0, 25.0, 22.0, 10.0],
    [45.0, 25.0, 25.0, 22.0, 10.5],
    [45.0, 30.0, 25.0, 22.0, 11.0],
];

fn rows(data: &[[f64; 5]]) -> Vec<RawTrial> {
    data.iter()
        .map(|&[l, g, t, c1, c2]| RawTrial::new(l, g, t, c1, c2))
        .collect()
}

/// Five-point liquid and gas sweeps at 25 °C on a 0.8 m bed.
pub fn demo_experiment() -> Experiment {
    Experiment {
        version: LATEST_VERSION,
        name: "Oxygen desorption demo".to_string(),
        packed_height_m: DEMO_PACKED_HEIGHT_M,
        series_i: rows(&DEMO_SERIES_I),
        series_ii: rows(&DEMO_SERIES_II),
        notes: None,
    }
}
