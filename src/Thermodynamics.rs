/// API gravity, GOR/CGR correlations, gas solubility in water, pressures, field type
pub mod fluid_properties;
/// Lopatin type vitrinite reflectance accumulator
pub mod maturity;
