//! Folding a Pauli coefficient into a rotation angle.

use gadgetry_ir::Angle;
use num_complex::Complex64;

use crate::error::{SynthError, SynthResult};

/// Fold `coeff` into `angle`: −1 negates, +1 passes through.
///
/// `exp(-i θ/2 · (−P)) = exp(-i (−θ)/2 · P)`, so a negative sign moves onto
/// the angle. Any other coefficient is rejected.
pub fn convert_angle(coeff: Complex64, angle: &Angle) -> SynthResult<Angle> {
    if coeff == Complex64::new(-1.0, 0.0) {
        Ok((-angle.clone()).simplify())
    } else if coeff == Complex64::new(1.0, 0.0) {
        Ok(angle.clone())
    } else {
        Err(SynthError::MalformedOperator { coeff })
    }
}
