//! # Generation engine
//!
//! Advances the concentration of one species over all slices by one time step.
//!
//! * [`generation`]: no transport. Production from the precursors is explicit, the
//!   species' own cracking implicit:
//!   `c' = (c + dt * sum_j k_j s_j c_j) / (1 + k dt)`
//! * [`generation_diffusion`]: the same reaction terms plus diffusion between the
//!   slices and convective loss through the upper and lower surfaces, solved as a
//!   tri-diagonal system with the Thomas algorithm.
//!
//! Precursors are the reacting species with a lower index, so species must be advanced
//! in increasing index order within a step. Afterwards the positive (production) and
//! negative (own cracking) generation rates and, if requested, the isotope sum of the
//! species are rebuilt from the new concentrations.
use crate::Genex::concentration::{ConcentrationField, GenerationRates, LumpedConcentration, conc_factor};
use crate::Genex::isotopes::{
    IsoFactor, IsotopeFractionation, IsotopeHistory, RayleighState, isotope_fractionation,
};
use crate::Kinetics::stoichiometry::StoichiometryTable;
use crate::Utils::linear_solvers::solve_tri_diagonal;
use crate::errors::GenexError;

/// Reaction data of one time step, shared by all species.
#[derive(Debug, Clone, Copy)]
pub struct GenerationStep<'a> {
    pub stoichiometry: &'a StoichiometryTable,
    pub cracking_rates: &'a [f64],
    pub delta_time: f64,
    pub n_reactions: usize,
}

impl GenerationStep<'_> {
    fn check(&self, species: usize, field: &ConcentrationField) -> Result<(), GenexError> {
        if self.delta_time <= 0.0 {
            return Err(GenexError::Argument(format!(
                "time step must be positive, got {}",
                self.delta_time
            )));
        }
        if species >= field.n_species() || self.cracking_rates.len() < field.n_species() {
            return Err(GenexError::Argument(format!(
                "species {} outside a model of {} species with {} cracking rates",
                species,
                field.n_species(),
                self.cracking_rates.len()
            )));
        }
        if self.n_reactions > self.stoichiometry.n_reactions()
            || self.stoichiometry.n_species() != field.n_species()
        {
            return Err(GenexError::Argument(
                "stoichiometry does not match the concentration field".to_string(),
            ));
        }
        Ok(())
    }

    fn precursors(&self, species: usize) -> usize {
        species.min(self.n_reactions)
    }

    fn production(&self, species: usize, slice: usize, field: &ConcentrationField) -> f64 {
        (0..self.precursors(species))
            .map(|j| self.cracking_rates[j] * self.stoichiometry.get(j, species) * field.get(slice, j))
            .sum()
    }
}

/// Diffusion data of one species for one time step.
#[derive(Debug, Clone, Copy)]
pub struct DiffusionStep<'a> {
    pub lumped: &'a LumpedConcentration,
    pub fourier_number: f64,
    pub upper_conv: f64,
    pub lower_conv: f64,
    pub slice_thickness: f64,
}

/// Exclusive view of the isotope history plus what the fractionation formulas need.
#[derive(Debug)]
pub struct IsotopeStep<'a> {
    pub history: &'a mut IsotopeHistory,
    pub methods: &'a IsotopeFractionation,
    pub factor: &'a IsoFactor,
    /// current step, at least 1
    pub time_step: usize,
    pub asphaltene_index: usize,
    pub c1_index: usize,
    pub asphaltene_conversion: f64,
    pub initial_fractionation: f64,
    pub temperature: f64,
}

impl IsotopeStep<'_> {
    fn check(&self) -> Result<(), GenexError> {
        if self.time_step == 0 || self.time_step > self.history.n_steps() {
            return Err(GenexError::Argument(format!(
                "isotope step {} outside history of {} steps",
                self.time_step,
                self.history.n_steps()
            )));
        }
        Ok(())
    }

    fn rayleigh_state(&self) -> RayleighState {
        RayleighState {
            asphaltene_conversion: self.asphaltene_conversion,
            initial_fractionation: self.initial_fractionation,
            asphaltene_history: self.history.get(self.time_step - 1, self.asphaltene_index),
            temperature: self.temperature,
        }
    }
}

fn record_slice(
    species: usize,
    slice: usize,
    step: &GenerationStep,
    field: &ConcentrationField,
    rates: &mut GenerationRates,
    isotopes: &mut Option<&mut IsotopeStep>,
) {
    let mut positive = 0.0;
    for j in 0..step.precursors(species) {
        let slice_gen = step.cracking_rates[j] * step.stoichiometry.get(j, species) * field.get(slice, j);
        positive += slice_gen;
        if let Some(iso) = isotopes.as_mut() {
            let method = iso.methods.method(j, species);
            if method.is_active() {
                let value = isotope_fractionation(
                    method,
                    species,
                    iso.c1_index,
                    iso.history.get(iso.time_step, j),
                    &iso.rayleigh_state(),
                    iso.factor,
                );
                iso.history.add(iso.time_step, species, value * slice_gen);
            }
        }
    }
    let negative = -step.cracking_rates[species] * field.get(slice, species);
    rates.set(slice, species, positive, negative);
}

fn prepare_isotopes(
    species: usize,
    step: &GenerationStep,
    isotopes: &mut Option<&mut IsotopeStep>,
) -> Result<(), GenexError> {
    if let Some(iso) = isotopes.as_mut() {
        iso.check()?;
        if iso.methods.n_reactions() < step.precursors(species) {
            return Err(GenexError::Argument(
                "isotope methods do not cover all reactions".to_string(),
            ));
        }
        iso.history.set(iso.time_step, species, 0.0);
    }
    Ok(())
}

/// Generation without transport (immobile species).
pub fn generation(
    species: usize,
    step: &GenerationStep,
    field: &mut ConcentrationField,
    rates: &mut GenerationRates,
    mut isotopes: Option<&mut IsotopeStep>,
) -> Result<(), GenexError> {
    step.check(species, field)?;
    prepare_isotopes(species, step, &mut isotopes)?;
    let dt = step.delta_time;
    let own_rate = step.cracking_rates[species];
    for slice in 0..field.n_slices() {
        let produced = step.production(species, slice, field);
        let updated = (field.get(slice, species) + produced * dt) / (1.0 + own_rate * dt);
        field.set(slice, species, updated);
        record_slice(species, slice, step, field, rates, &mut isotopes);
    }
    Ok(())
}

/// Generation plus diffusion between the slices (mobile species).
///
/// Interface `i|i+1` gets the coefficient `-F * conc_factor(i, i+1)`. The end slices are
/// half slices, so their single interface counts twice and they lose
/// `2 conv / thickness * dt` through the outer surface.
pub fn generation_diffusion(
    species: usize,
    step: &GenerationStep,
    diffusion: &DiffusionStep,
    field: &mut ConcentrationField,
    rates: &mut GenerationRates,
    mut isotopes: Option<&mut IsotopeStep>,
) -> Result<(), GenexError> {
    step.check(species, field)?;
    let n = field.n_slices();
    if n < 2 {
        return Err(GenexError::Argument(format!(
            "diffusion needs at least 2 slices, got {}",
            n
        )));
    }
    if diffusion.lumped.len() != n {
        return Err(GenexError::Argument(format!(
            "{} lumped slices for {} slices",
            diffusion.lumped.len(),
            n
        )));
    }
    if diffusion.slice_thickness <= 0.0 {
        return Err(GenexError::Argument(format!(
            "slice thickness must be positive, got {}",
            diffusion.slice_thickness
        )));
    }
    let dt = step.delta_time;
    let own = step.cracking_rates[species] * dt;
    let f = diffusion.fourier_number;
    let lumped = diffusion.lumped;

    let mut lower = vec![0.0; n];
    let mut diag = vec![0.0; n];
    let mut upper = vec![0.0; n];

    let mut factor_below = conc_factor(&lumped[0], &lumped[1]);
    upper[0] = -2.0 * f * factor_below;
    diag[0] = 1.0 - upper[0] + 2.0 * diffusion.upper_conv / diffusion.slice_thickness * dt + own;
    for i in 1..n - 1 {
        let factor_above = factor_below;
        factor_below = conc_factor(&lumped[i], &lumped[i + 1]);
        upper[i] = -f * factor_below;
        lower[i] = -f * factor_above;
        diag[i] = 1.0 - (lower[i] + upper[i]) + own;
    }
    lower[n - 1] = -2.0 * f * factor_below;
    diag[n - 1] =
        1.0 - lower[n - 1] + 2.0 * diffusion.lower_conv / diffusion.slice_thickness * dt + own;

    let current: &ConcentrationField = field;
    let rhs: Vec<f64> = (0..n)
        .map(|i| current.get(i, species) + step.production(species, i, current) * dt)
        .collect();
    let solved = solve_tri_diagonal(&lower, &diag, &upper, &rhs);

    prepare_isotopes(species, step, &mut isotopes)?;
    for (slice, value) in solved.into_iter().enumerate() {
        field.set(slice, species, value);
        record_slice(species, slice, step, field, rates, &mut isotopes);
    }
    Ok(())
}
