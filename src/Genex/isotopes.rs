//! # Isotope fractionation
//!
//! The isotope signature (delta, per mil) of each generated species is tracked per time
//! step as a side computation of the generation engine. For every (reaction, product)
//! pair a method is configured:
//!
//! | method | value |
//! |--------|-------|
//! | `NotSpecified`, `None` | pair is skipped |
//! | `RayleighKerogen` | source rock Rayleigh value |
//! | `RayleighC1` | C1 Rayleigh value |
//! | `RayleighCn` | `(-1/n)(SR - C1) + SR`, `n = |species - c1| + 1` |
//! | `History` | value of the reactant in the current step |
//!
//! The Rayleigh values use the asphaltene conversion `X`. At and above `X = 0.995` the
//! power law is replaced by the value the asphaltene had one step earlier.
//!
//! The fractionation factor is linear in temperature between the two calibration
//! points, `alpha(T) = A + B (T - 273.15)`, and stays between 1 and `alpha_low`.
use crate::Utils::physical_constants::ZERO_CELSIUS;
use crate::errors::GenexError;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Conversion above which the Rayleigh power law is frozen.
pub const MAX_CONVERSION: f64 = 0.995;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, Display,
)]
pub enum IsoFractMethod {
    #[default]
    NotSpecified,
    None,
    RayleighKerogen,
    RayleighC1,
    RayleighCn,
    History,
}

impl IsoFractMethod {
    pub fn is_active(self) -> bool {
        !matches!(self, IsoFractMethod::NotSpecified | IsoFractMethod::None)
    }
}

/// Calibration of the fractionation factor. Temperatures in degC.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsoFactorInput {
    /// alpha at and below `temp_low`
    pub alpha_low: f64,
    pub temp_low: f64,
    pub temp_high: f64,
    /// share of `alpha_low - 1` still present at `temp_high`, in percent
    pub high_percentage: f64,
}

impl Default for IsoFactorInput {
    fn default() -> Self {
        IsoFactorInput {
            alpha_low: 1.03,
            temp_low: 50.0,
            temp_high: 200.0,
            high_percentage: 10.0,
        }
    }
}

/// Linear fractionation factor `alpha(T) = a + b (T - 273.15)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoFactor {
    alpha_low: f64,
    a: f64,
    b: f64,
}

impl IsoFactor {
    pub fn new(input: &IsoFactorInput) -> Result<Self, GenexError> {
        if input.temp_low == input.temp_high {
            return Err(GenexError::config(
                "isotope calibration needs two different temperatures",
            ));
        }
        let high = 1.0 + (input.alpha_low - 1.0) * input.high_percentage / 100.0;
        let b = (input.alpha_low - high) / (input.temp_low - input.temp_high);
        let a = high - b * input.temp_high;
        Ok(IsoFactor {
            alpha_low: input.alpha_low,
            a,
            b,
        })
    }
    pub fn constants(&self) -> (f64, f64) {
        (self.a, self.b)
    }

    /// alpha at `temperature` (K)
    pub fn fractionation_factor(&self, temperature: f64) -> f64 {
        let mut alpha = self.a + self.b * (temperature - ZERO_CELSIUS);
        let normal = self.alpha_low >= 1.0;
        if (normal && alpha > self.alpha_low) || (!normal && alpha < self.alpha_low) {
            alpha = self.alpha_low;
        }
        if (normal && alpha < 1.0) || (!normal && alpha > 1.0) {
            alpha = 1.0;
        }
        alpha
    }
}

/// Inputs shared by every Rayleigh evaluation in one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayleighState {
    pub asphaltene_conversion: f64,
    pub initial_fractionation: f64,
    /// asphaltene value one step earlier
    pub asphaltene_history: f64,
    pub temperature: f64,
}

pub fn source_rock_fractionation(state: &RayleighState, factor: &IsoFactor) -> f64 {
    let alpha = factor.fractionation_factor(state.temperature);
    if state.asphaltene_conversion < MAX_CONVERSION {
        let remaining = (1.0 - state.asphaltene_conversion).powf(1.0 / alpha - 1.0);
        ((state.initial_fractionation / 1000.0 + 1.0) * remaining - 1.0) * 1000.0
    } else {
        state.asphaltene_history
    }
}

pub fn c1_fractionation(state: &RayleighState, factor: &IsoFactor) -> f64 {
    let alpha = factor.fractionation_factor(state.temperature);
    if state.asphaltene_conversion < MAX_CONVERSION {
        let remaining = (1.0 - state.asphaltene_conversion).powf(1.0 / alpha - 1.0);
        ((1.0 / alpha) * (state.initial_fractionation / 1000.0 + 1.0) * remaining - 1.0) * 1000.0
    } else {
        (1.0 / alpha) * state.asphaltene_history
    }
}

/// Interpolation between the source rock and the C1 value by carbon number.
pub fn cn_fractionation(
    species: usize,
    c1_index: usize,
    state: &RayleighState,
    factor: &IsoFactor,
) -> f64 {
    let carbon_number = species.abs_diff(c1_index) as f64 + 1.0;
    let source_rock = source_rock_fractionation(state, factor);
    let c1 = c1_fractionation(state, factor);
    (-1.0 / carbon_number) * (source_rock - c1) + source_rock
}

/// Value contributed by one producing reaction; 0 for inactive methods.
pub fn isotope_fractionation(
    method: IsoFractMethod,
    species: usize,
    c1_index: usize,
    reactant_fractionation: f64,
    state: &RayleighState,
    factor: &IsoFactor,
) -> f64 {
    match method {
        IsoFractMethod::RayleighKerogen => source_rock_fractionation(state, factor),
        IsoFractMethod::RayleighC1 => c1_fractionation(state, factor),
        IsoFractMethod::RayleighCn => cn_fractionation(species, c1_index, state, factor),
        IsoFractMethod::History => reactant_fractionation,
        IsoFractMethod::NotSpecified | IsoFractMethod::None => 0.0,
    }
}

/// One configured (reaction, product) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionationEntry {
    pub reaction: usize,
    pub product: usize,
    pub method: IsoFractMethod,
}

/// Method per (reaction, species); everything not configured is `NotSpecified`.
#[derive(Debug, Clone, PartialEq)]
pub struct IsotopeFractionation {
    methods: Vec<Vec<IsoFractMethod>>,
}

impl IsotopeFractionation {
    pub fn new(
        n_reactions: usize,
        n_species: usize,
        entries: &[FractionationEntry],
    ) -> Result<Self, GenexError> {
        let mut methods = vec![vec![IsoFractMethod::NotSpecified; n_species]; n_reactions];
        for entry in entries {
            if entry.reaction >= n_reactions || entry.product >= n_species {
                return Err(GenexError::config(format!(
                    "isotope method for reaction {} and species {} is outside the model",
                    entry.reaction, entry.product
                )));
            }
            methods[entry.reaction][entry.product] = entry.method;
        }
        Ok(IsotopeFractionation { methods })
    }
    pub fn method(&self, reaction: usize, species: usize) -> IsoFractMethod {
        self.methods[reaction][species]
    }
    pub fn n_reactions(&self) -> usize {
        self.methods.len()
    }
}

/// Isotope values per time step (rows, step 0 included) and species (columns).
#[derive(Debug, Clone, PartialEq)]
pub struct IsotopeHistory {
    values: DMatrix<f64>,
}

impl IsotopeHistory {
    pub fn new(n_steps: usize, n_species: usize) -> Self {
        IsotopeHistory {
            values: DMatrix::zeros(n_steps + 1, n_species),
        }
    }
    pub fn get(&self, step: usize, species: usize) -> f64 {
        self.values[(step, species)]
    }
    pub fn set(&mut self, step: usize, species: usize, value: f64) {
        self.values[(step, species)] = value;
    }
    pub fn add(&mut self, step: usize, species: usize, value: f64) {
        self.values[(step, species)] += value;
    }
    pub fn n_steps(&self) -> usize {
        self.values.nrows() - 1
    }
    pub fn species_history(&self, species: usize) -> Vec<f64> {
        self.values.column(species).iter().copied().collect()
    }
}

/// Cumulative flux weighted isotope value. Entry `k` belongs to step `begin + k`; step 0
/// carries no flux and stays 0, as does every step before the first nonzero flux.
pub fn flux_weighted_history(fluxes: &[f64], isotopes: &[f64], begin: usize, end: usize) -> Vec<f64> {
    let end = end.min(fluxes.len().saturating_sub(1)).min(isotopes.len().saturating_sub(1));
    if begin > end {
        return Vec::new();
    }
    let mut result = vec![0.0; end - begin + 1];
    let mut total_flux = 0.0;
    let mut weighted = 0.0;
    for step in begin.max(1)..=end {
        total_flux += fluxes[step];
        weighted += fluxes[step] * isotopes[step];
        result[step - begin] = if total_flux == 0.0 {
            0.0
        } else {
            weighted / total_flux
        };
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strum::IntoEnumIterator;

    fn factor() -> IsoFactor {
        IsoFactor::new(&IsoFactorInput::default()).unwrap()
    }

    fn state(conversion: f64) -> RayleighState {
        RayleighState {
            asphaltene_conversion: conversion,
            initial_fractionation: -28.0,
            asphaltene_history: -25.5,
            temperature: 120.0 + ZERO_CELSIUS,
        }
    }

    #[test]
    fn factor_constants_and_clamping() {
        let f = factor();
        let (a, b) = f.constants();
        // 1.003 at 200 degC, 1.03 at 50 degC
        assert_relative_eq!(a + b * 200.0, 1.003, epsilon = 1e-12);
        assert_relative_eq!(a + b * 50.0, 1.03, epsilon = 1e-12);
        assert_relative_eq!(f.fractionation_factor(20.0 + ZERO_CELSIUS), 1.03);
        assert_relative_eq!(f.fractionation_factor(500.0 + ZERO_CELSIUS), 1.0);
        let mid = f.fractionation_factor(125.0 + ZERO_CELSIUS);
        assert!(mid > 1.003 && mid < 1.03);

        let inverse = IsoFactor::new(&IsoFactorInput {
            alpha_low: 0.98,
            ..IsoFactorInput::default()
        })
        .unwrap();
        assert_relative_eq!(inverse.fractionation_factor(0.0 + ZERO_CELSIUS), 0.98);
        assert_relative_eq!(inverse.fractionation_factor(900.0 + ZERO_CELSIUS), 1.0);

        let flat = IsoFactorInput {
            temp_high: 50.0,
            ..IsoFactorInput::default()
        };
        assert!(IsoFactor::new(&flat).is_err());
    }

    #[test]
    fn rayleigh_switches_exactly_at_the_threshold() {
        let f = factor();
        let at = state(MAX_CONVERSION);
        assert_eq!(source_rock_fractionation(&at, &f), -25.5);
        let alpha = f.fractionation_factor(at.temperature);
        assert_eq!(c1_fractionation(&at, &f), (1.0 / alpha) * -25.5);
        assert_eq!(source_rock_fractionation(&state(0.999), &f), -25.5);

        let below = state(0.9949);
        let expected =
            ((-28.0 / 1000.0 + 1.0) * (1.0f64 - 0.9949).powf(1.0 / alpha - 1.0) - 1.0) * 1000.0;
        let value = source_rock_fractionation(&below, &f);
        assert_eq!(value, expected);
        assert!(value != -25.5);
    }

    #[test]
    fn unconverted_source_rock_keeps_its_initial_value() {
        let f = factor();
        assert_relative_eq!(source_rock_fractionation(&state(0.0), &f), -28.0, epsilon = 1e-12);
        // residue gets heavier as conversion proceeds
        assert!(source_rock_fractionation(&state(0.5), &f) > -28.0);
    }

    #[test]
    fn cn_lies_between_source_rock_and_c1() {
        let f = factor();
        let s = state(0.4);
        let sr = source_rock_fractionation(&s, &f);
        let c1 = c1_fractionation(&s, &f);
        assert_relative_eq!(cn_fractionation(5, 5, &s, &f), c1, epsilon = 1e-12);
        let c3 = cn_fractionation(3, 5, &s, &f);
        assert_relative_eq!(c3, sr - (sr - c1) / 3.0, epsilon = 1e-12);
        assert!(c3 < sr && c3 > c1);
    }

    #[test]
    fn method_dispatch() {
        let f = factor();
        let s = state(0.3);
        for method in IsoFractMethod::iter() {
            let value = isotope_fractionation(method, 4, 5, -31.0, &s, &f);
            match method {
                IsoFractMethod::History => assert_eq!(value, -31.0),
                IsoFractMethod::NotSpecified | IsoFractMethod::None => {
                    assert!(!method.is_active());
                    assert_eq!(value, 0.0)
                }
                _ => assert!(method.is_active()),
            }
        }
    }

    #[test]
    fn fractionation_table() {
        let entries = vec![FractionationEntry {
            reaction: 1,
            product: 5,
            method: IsoFractMethod::RayleighC1,
        }];
        let table = IsotopeFractionation::new(2, 6, &entries).unwrap();
        assert_eq!(table.method(1, 5), IsoFractMethod::RayleighC1);
        assert_eq!(table.method(0, 5), IsoFractMethod::NotSpecified);
        let outside = vec![FractionationEntry {
            reaction: 2,
            product: 5,
            method: IsoFractMethod::History,
        }];
        assert!(IsotopeFractionation::new(2, 6, &outside).is_err());
    }

    #[test]
    fn flux_weighting() {
        let fluxes = [0.0, 0.0, 1.0, 3.0];
        let isotopes = [9.0, -40.0, -30.0, -20.0];
        let history = flux_weighted_history(&fluxes, &isotopes, 0, 3);
        assert_eq!(history.len(), 4);
        assert_eq!(history[0], 0.0);
        assert_eq!(history[1], 0.0);
        assert_relative_eq!(history[2], -30.0);
        assert_relative_eq!(history[3], (-30.0 - 60.0) / 4.0);
        let tail = flux_weighted_history(&fluxes, &isotopes, 3, 3);
        assert_eq!(tail, vec![-20.0]);
    }
}
