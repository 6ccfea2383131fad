//! Vitrinite reflectance equivalent from a modified Lopatin time temperature index
//! (Stainforth, 1986):
//!
//! `tau += dt * 5.1^((T - 378.15) / 10)`, `VRE = tau^0.0821 * 0.53526`
//!
//! with `dt` in Ma and `T` in K.
use crate::Utils::physical_constants::ZERO_CELSIUS;
use serde::{Deserialize, Serialize};

const LOPATIN_FACTOR: f64 = 5.1;
const LOPATIN_REFERENCE_TEMPERATURE: f64 = 105.0 + ZERO_CELSIUS;
const LOPATIN_TEMPERATURE_SCALE: f64 = 10.0;
const LOPATIN_EXPONENT: f64 = 0.0821;
const LOPATIN_SCALE: f64 = 0.53526;

/// Accumulated Lopatin index of one location.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VreAccumulator {
    tau: f64,
}

impl VreAccumulator {
    pub fn new() -> Self {
        VreAccumulator { tau: 0.0 }
    }
    pub fn tau(&self) -> f64 {
        self.tau
    }
    pub fn vre(&self) -> f64 {
        self.tau.powf(LOPATIN_EXPONENT) * LOPATIN_SCALE
    }
    /// Advances the index by one time step and returns the new VRE.
    pub fn advance(&mut self, delta_time: f64, temperature: f64) -> f64 {
        self.tau += delta_time
            * LOPATIN_FACTOR.powf(
                (temperature - LOPATIN_REFERENCE_TEMPERATURE) / LOPATIN_TEMPERATURE_SCALE,
            );
        self.vre()
    }
}

/// Single step form working on a bare tau value.
pub fn geological_vre(delta_time: f64, temperature: f64, tau: &mut f64) -> f64 {
    let mut accumulator = VreAccumulator { tau: *tau };
    let vre = accumulator.advance(delta_time, temperature);
    *tau = accumulator.tau;
    vre
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_step_keeps_tau() {
        let mut acc = VreAccumulator::new();
        acc.advance(10.0, 120.0 + ZERO_CELSIUS);
        let tau = acc.tau();
        let vre = acc.vre();
        let again = acc.advance(0.0, 200.0 + ZERO_CELSIUS);
        assert_eq!(acc.tau(), tau);
        assert_eq!(again, vre);
    }

    #[test]
    fn one_ma_at_reference_temperature() {
        let mut tau = 0.0;
        let vre = geological_vre(1.0, 105.0 + ZERO_CELSIUS, &mut tau);
        assert_relative_eq!(tau, 1.0, epsilon = 1e-12);
        assert_relative_eq!(vre, 0.53526, epsilon = 1e-12);
    }

    #[test]
    fn vre_increases_with_heating() {
        let mut acc = VreAccumulator::new();
        let mut last = 0.0;
        for step in 0..20 {
            let vre = acc.advance(2.0, 60.0 + ZERO_CELSIUS + 6.0 * step as f64);
            assert!(vre > last);
            last = vre;
        }
    }
}
