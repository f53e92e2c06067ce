//! Raw table entries, (°C, value).

/// Equilibrium liquid-phase O2 mole fraction.
pub const EQUILIBRIUM_X: [(i32, f64); 31] = [
    (0, 8.23e-6),
    (1, 8.01e-6),
    (2, 7.79e-6),
    (3, 7.58e-6),
    (4, 7.38e-6),
    (5, 7.19e-6),
    (6, 7.01e-6),
    (7, 6.83e-6),
    (8, 6.66e-6),
    (9, 6.50e-6),
    (10, 6.35e-6),
    (11, 6.20e-6),
    (12, 6.06e-6),
    (13, 5.92e-6),
    (14, 5.79e-6),
    (15, 5.67e-6),
    (16, 5.55e-6),
    (17, 5.44e-6),
    (18, 5.33e-6),
    (19, 5.22e-6),
    (20, 5.12e-6),
    (21, 5.02e-6),
    (22, 4.92e-6),
    (23, 4.83e-6),
    (24, 4.74e-6),
    (25, 4.65e-6),
    (26, 4.57e-6),
    (27, 4.48e-6),
    (28, 4.40e-6),
    (29, 4.33e-6),
    (30, 4.25e-6),
];

/// Saturation O2 concentration in water [mg/L].
pub const SATURATION_C: [(i32, f64); 31] = [
    (0, 14.62),
    (1, 14.22),
    (2, 13.83),
    (3, 13.46),
    (4, 13.11),
    (5, 12.77),
    (6, 12.44),
    (7, 12.13),
    (8, 11.83),
    (9, 11.55),
    (10, 11.27),
    (11, 11.01),
    (12, 10.76),
    (13, 10.52),
    (14, 10.29),
    (15, 10.07),
    (16, 9.86),
    (17, 9.66),
    (18, 9.46),
    (19, 9.27),
    (20, 9.09),
    (21, 8.92),
    (22, 8.74),
    (23, 8.58),
    (24, 8.42),
    (25, 8.26),
    (26, 8.11),
    (27, 7.96),
    (28, 7.82),
    (29, 7.68),
    (30, 7.54),
];
