//! Physical constants in SI units.

/// universal gas constant, J/(mol K)
pub const R: f64 = 8.314511;
/// Avogadro number, 1/mol
pub const AVOGADRO: f64 = 6.0221367e23;
/// Planck constant, J s
pub const PLANCK: f64 = 6.6260755e-34;
/// gravitational acceleration, m/s^2
pub const GRAVITY: f64 = 9.81;
/// 0 degC in K
pub const ZERO_CELSIUS: f64 = 273.15;
/// scf/bbl per m3/m3
pub const GOR_CONVERSION: f64 = 5.615;
/// seconds per million years
pub const SECONDS_PER_MA: f64 = 3.15576e13;
