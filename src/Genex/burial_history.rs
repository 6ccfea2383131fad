//! Temperature and pressure a source rock location sees over geological time.
use crate::Thermodynamics::fluid_properties::{depth_from_temperature, lithostatic_pressure};
use crate::errors::GenexError;
use crate::settings::PhysicsSettings;
use serde::{Deserialize, Serialize};

/// One point of the history: time (model time unit), temperature (K), pressure (Pa).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub time: f64,
    pub temperature: f64,
    pub pressure: f64,
}

/// Piecewise linear history, clamped to the first and last point outside its range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePressureHistory {
    points: Vec<HistoryPoint>,
}

impl TemperaturePressureHistory {
    pub fn new(points: Vec<HistoryPoint>) -> Result<Self, GenexError> {
        if points.len() < 2 {
            return Err(GenexError::Argument(format!(
                "a history needs at least 2 points, got {}",
                points.len()
            )));
        }
        if points.windows(2).any(|w| w[1].time <= w[0].time) {
            return Err(GenexError::Argument(
                "history times must increase strictly".to_string(),
            ));
        }
        if points
            .iter()
            .any(|p| !p.temperature.is_finite() || p.temperature <= 0.0 || !p.pressure.is_finite())
        {
            return Err(GenexError::Argument(
                "history temperatures must be positive and pressures finite".to_string(),
            ));
        }
        Ok(TemperaturePressureHistory { points })
    }

    /// Pressures from the lithostatic pressure at the depth where the constant gradient
    /// reaches each temperature.
    pub fn from_temperatures(
        times: &[f64],
        temperatures: &[f64],
        physics: &PhysicsSettings,
    ) -> Result<Self, GenexError> {
        if times.len() != temperatures.len() {
            return Err(GenexError::Argument(format!(
                "{} times for {} temperatures",
                times.len(),
                temperatures.len()
            )));
        }
        let points = times
            .iter()
            .zip(temperatures)
            .map(|(&time, &temperature)| {
                let depth = depth_from_temperature(
                    temperature,
                    physics.temperature_gradient,
                    physics.surface_temperature,
                );
                HistoryPoint {
                    time,
                    temperature,
                    pressure: lithostatic_pressure(depth, physics.overburden_density),
                }
            })
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[HistoryPoint] {
        &self.points
    }
    pub fn start_time(&self) -> f64 {
        self.points[0].time
    }
    pub fn end_time(&self) -> f64 {
        self.points[self.points.len() - 1].time
    }

    fn interpolate(&self, time: f64, value: impl Fn(&HistoryPoint) -> f64) -> f64 {
        let first = &self.points[0];
        let last = &self.points[self.points.len() - 1];
        if time <= first.time {
            return value(first);
        }
        if time >= last.time {
            return value(last);
        }
        // first point strictly after `time`; lies in 1..len by the checks above
        let upper = self.points.partition_point(|p| p.time <= time);
        let (a, b) = (&self.points[upper - 1], &self.points[upper]);
        let w = (time - a.time) / (b.time - a.time);
        value(a) + w * (value(b) - value(a))
    }

    pub fn temperature_at(&self, time: f64) -> f64 {
        self.interpolate(time, |p| p.temperature)
    }
    pub fn pressure_at(&self, time: f64) -> f64 {
        self.interpolate(time, |p| p.pressure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Utils::physical_constants::GRAVITY;
    use approx::assert_relative_eq;

    fn point(time: f64, temperature: f64, pressure: f64) -> HistoryPoint {
        HistoryPoint {
            time,
            temperature,
            pressure,
        }
    }

    #[test]
    fn linear_between_points_and_clamped_outside() {
        let history = TemperaturePressureHistory::new(vec![
            point(0.0, 300.0, 1.0e6),
            point(10.0, 400.0, 3.0e6),
            point(30.0, 420.0, 5.0e6),
        ])
        .unwrap();
        assert_eq!(history.start_time(), 0.0);
        assert_eq!(history.end_time(), 30.0);
        assert_relative_eq!(history.temperature_at(5.0), 350.0, epsilon = 1e-12);
        assert_relative_eq!(history.pressure_at(20.0), 4.0e6, epsilon = 1e-6);
        assert_eq!(history.temperature_at(10.0), 400.0);
        assert_eq!(history.temperature_at(-5.0), 300.0);
        assert_eq!(history.pressure_at(100.0), 5.0e6);
    }

    #[test]
    fn rejects_bad_series() {
        assert!(TemperaturePressureHistory::new(vec![point(0.0, 300.0, 0.0)]).is_err());
        assert!(
            TemperaturePressureHistory::new(vec![point(0.0, 300.0, 0.0), point(0.0, 310.0, 0.0)])
                .is_err()
        );
        assert!(
            TemperaturePressureHistory::new(vec![point(0.0, 300.0, 0.0), point(1.0, -1.0, 0.0)])
                .is_err()
        );
    }

    #[test]
    fn pressure_from_temperature() {
        let physics = PhysicsSettings::default();
        let surface = physics.surface_temperature;
        let history = TemperaturePressureHistory::from_temperatures(
            &[0.0, 50.0],
            &[surface - 5.0, surface + 38.0],
            &physics,
        )
        .unwrap();
        // below the surface temperature the depth is clamped to 0
        assert_eq!(history.points()[0].pressure, 0.0);
        // 38 K at 0.038 K/m is 1000 m
        assert_relative_eq!(
            history.points()[1].pressure,
            1000.0 * physics.overburden_density * GRAVITY,
            max_relative = 1e-9
        );
        assert!(TemperaturePressureHistory::from_temperatures(&[0.0], &[300.0, 310.0], &physics).is_err());
    }
}
