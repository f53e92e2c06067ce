// desorb-core/src/units.rs

use uom::si::f64::Length as UomLength;

// Public canonical unit types (SI, f64)
pub type Length = UomLength;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

/// Length in millimetres, for human-facing summaries.
#[inline]
pub fn to_mm(l: Length) -> f64 {
    use uom::si::length::millimeter;
    l.get::<millimeter>()
}
