//! # Source rock column
//!
//! One simulated source rock location: a column of `n_slices` nodes across the net
//! thickness, stepped through a temperature and pressure history.
//!
//! Per step:
//! 1. transformation ratios of kerogen and asphaltene at the reference node
//! 2. cracking rates (the kerogen uses the kerogen ratio, every other species the
//!    asphaltene ratio; all use the kerogen ratio if there is no asphaltene)
//! 3. lumped concentrations of the slices
//! 4. every species in increasing index order: generation and diffusion for mobile
//!    species, generation only for immobile ones
//! 5. fluxes through the upper and lower surface, reference node concentration,
//!    generation and isotope histories
//!
//! Histories are stored per step with step 0 holding the initial state.
//!
//! | history | unit |
//! |---------|------|
//! | concentration | kg/m3 at the reference node |
//! | generation | kg/m2/time unit over the net thickness |
//! | upward and downward flux | kg/m2/time unit |
//! | isotopes | per mil |
use crate::Genex::burial_history::{HistoryPoint, TemperaturePressureHistory};
use crate::Genex::concentration::{ConcentrationField, GenerationRates, LumpedConcentration};
use crate::Genex::generation::{
    DiffusionStep, GenerationStep, IsotopeStep, generation, generation_diffusion,
};
use crate::Genex::isotopes::{
    IsotopeHistory, RayleighState, flux_weighted_history, source_rock_fractionation,
};
use crate::Genex::kernel::GenexKernel;
use crate::Kinetics::rates::{
    asphaltene_transformation, conv_mass_transfer, cracking_rate, fourier_number,
    kerogen_transformation,
};
use crate::Kinetics::species::{ATOMIC_WEIGHTS, Element, Species, SpeciesTable};
use crate::Thermodynamics::fluid_properties::{AtomicRatios, api_gravity, atomic_ratios};
use crate::Thermodynamics::maturity::VreAccumulator;
use crate::errors::GenexError;
use crate::settings::SourceRockSettings;
use log::{info, warn};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Expelled fluid classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum ExpelledFluid {
    /// mobile species of oil composition
    Oil,
    /// hydrocarbon gas
    Gas,
    N2,
}

impl ExpelledFluid {
    pub fn contains(self, species: &Species) -> bool {
        match self {
            ExpelledFluid::Oil => species.mobile() && species.has_oil_composition(),
            ExpelledFluid::Gas => species.is_hc_gas(),
            ExpelledFluid::N2 => species.is_n2_gas(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum FluxDirection {
    Up,
    Down,
    UpAndDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExpelledAmount {
    /// kg
    pub mass: f64,
    /// m3
    pub volume: f64,
}

/// Initial concentrations (kg/m3 rock): everything 0 but the kerogen, which follows
/// from the TOC weight fraction and the densities of kerogen and inorganic matrix.
pub fn initial_concentrations(
    species: &SpeciesTable,
    toc: f64,
    inorganic_density: f64,
) -> Result<Vec<f64>, GenexError> {
    if !(toc > 0.0 && toc <= 1.0) {
        return Err(GenexError::Argument(format!(
            "TOC must lie in (0, 1], got {}",
            toc
        )));
    }
    if inorganic_density <= 0.0 {
        return Err(GenexError::Argument(format!(
            "inorganic density must be positive, got {}",
            inorganic_density
        )));
    }
    let kerogen = species.kerogen();
    // weight fraction of kerogen in the rock
    let wori = kerogen.formula_weight() * toc / ATOMIC_WEIGHTS[Element::C.index()];
    let vio = kerogen.density() / inorganic_density * (1.0 / wori - 1.0);
    let vori = 1.0 / (vio + 1.0);
    let mut initial = vec![0.0; species.len()];
    initial[0] = kerogen.density() * vori;
    Ok(initial)
}

/// Slice nearest to the relative `position` (0 top, 1 bottom).
pub fn reference_node(position: f64, n_slices: usize) -> usize {
    let node = (position.clamp(0.0, 1.0) * (n_slices.saturating_sub(1)) as f64).round() as usize;
    node.min(n_slices.saturating_sub(1))
}

#[derive(Debug, Clone)]
pub struct SourceRockColumn<'a> {
    kernel: &'a GenexKernel,
    settings: SourceRockSettings,
    field: ConcentrationField,
    rates: GenerationRates,
    initial: Vec<f64>,
    reference_node: usize,
    n_steps: usize,
    current_step: usize,
    vre: VreAccumulator,

    time: Vec<f64>,
    delta_time: Vec<f64>,
    temperature: Vec<f64>,
    pressure: Vec<f64>,
    kerogen_conversion: Vec<f64>,
    asphaltene_conversion: Vec<f64>,
    vre_history: Vec<f64>,
    concentration_history: DMatrix<f64>,
    generation_history: DMatrix<f64>,
    upward_flux: DMatrix<f64>,
    downward_flux: DMatrix<f64>,
    isotope_history: Option<IsotopeHistory>,
}

impl<'a> SourceRockColumn<'a> {
    /// Column with room for `n_steps` steps, starting at `start` with the initial
    /// concentrations in every slice.
    pub fn new(
        kernel: &'a GenexKernel,
        settings: &SourceRockSettings,
        n_steps: usize,
        start: HistoryPoint,
    ) -> Result<Self, GenexError> {
        if settings.n_slices < 2 {
            return Err(GenexError::Argument(format!(
                "a column needs at least 2 slices, got {}",
                settings.n_slices
            )));
        }
        if settings.char_length <= 0.0 {
            return Err(GenexError::Argument(format!(
                "characteristic length must be positive, got {}",
                settings.char_length
            )));
        }
        if !(0.0..=1.0).contains(&settings.reference_position) {
            return Err(GenexError::Argument(format!(
                "reference position must lie in [0, 1], got {}",
                settings.reference_position
            )));
        }
        let species = kernel.species();
        let n_species = species.len();
        let initial =
            initial_concentrations(species, settings.toc, kernel.physics().inorganic_density)?;
        let n = settings.n_slices;

        let mut concentration_history = DMatrix::zeros(n_steps + 1, n_species);
        for (i, value) in initial.iter().enumerate() {
            concentration_history[(0, i)] = *value;
        }
        let isotope_history = kernel.isotopes().map(|iso| {
            let mut history = IsotopeHistory::new(n_steps, n_species);
            history.set(0, 0, iso.initial_fractionation);
            history
        });
        let mut vre = VreAccumulator::new();
        let vre0 = vre.advance(0.0, start.temperature);

        let mut time = vec![0.0; n_steps + 1];
        time[0] = start.time;
        let mut temperature = vec![0.0; n_steps + 1];
        temperature[0] = start.temperature;
        let mut pressure = vec![0.0; n_steps + 1];
        pressure[0] = start.pressure;
        let mut vre_history = vec![0.0; n_steps + 1];
        vre_history[0] = vre0;

        if settings.net_thickness <= 0.0 {
            warn!("net thickness is {}, the column will not be stepped", settings.net_thickness);
        }
        Ok(SourceRockColumn {
            kernel,
            settings: settings.clone(),
            field: ConcentrationField::uniform(n, &initial),
            rates: GenerationRates::zeros(n, n_species),
            initial,
            reference_node: reference_node(settings.reference_position, n),
            n_steps,
            current_step: 0,
            vre,
            time,
            delta_time: vec![0.0; n_steps + 1],
            temperature,
            pressure,
            kerogen_conversion: vec![0.0; n_steps + 1],
            asphaltene_conversion: vec![0.0; n_steps + 1],
            vre_history,
            concentration_history,
            generation_history: DMatrix::zeros(n_steps + 1, n_species),
            upward_flux: DMatrix::zeros(n_steps + 1, n_species),
            downward_flux: DMatrix::zeros(n_steps + 1, n_species),
            isotope_history,
        })
    }

    /// Advances the column by `delta_time` to the given temperature (K) and pressure (Pa).
    pub fn step(&mut self, temperature: f64, pressure: f64, delta_time: f64) -> Result<(), GenexError> {
        if self.current_step >= self.n_steps {
            return Err(GenexError::Argument(format!(
                "all {} steps of the column have been taken",
                self.n_steps
            )));
        }
        if delta_time <= 0.0 || !delta_time.is_finite() {
            return Err(GenexError::Argument(format!(
                "time step must be positive, got {}",
                delta_time
            )));
        }
        if temperature <= 0.0 || pressure < 0.0 {
            return Err(GenexError::Argument(format!(
                "temperature must be positive and pressure non-negative, got {} K and {} Pa",
                temperature, pressure
            )));
        }
        let t = self.current_step + 1;
        self.time[t] = self.time[t - 1] + delta_time;
        self.delta_time[t] = delta_time;
        self.temperature[t] = temperature;
        self.pressure[t] = pressure;
        self.vre_history[t] = self.vre.advance(delta_time, temperature);
        self.current_step = t;

        if self.settings.net_thickness <= 0.0 {
            let previous = self.concentration_history.row(t - 1).clone_owned();
            self.concentration_history.set_row(t, &previous);
            self.kerogen_conversion[t] = self.kerogen_conversion[t - 1];
            self.asphaltene_conversion[t] = self.asphaltene_conversion[t - 1];
            return Ok(());
        }

        let kernel = self.kernel;
        let species = kernel.species();
        let has_asphaltene = species.has_asphaltene();
        let n = self.settings.n_slices;
        let net = self.settings.net_thickness;
        let char_length = self.settings.char_length;
        let slice_thickness = char_length / (n - 1) as f64;

        // transformation ratios
        let node = self.reference_node;
        let initial_kerogen = self.initial[0];
        let kerogen = self.field.get(node, 0);
        let (kerogen_tr, asphaltene_tr) = if has_asphaltene {
            let asphaltene = self.field.get(node, 1);
            (
                kerogen_transformation(initial_kerogen, kerogen, asphaltene),
                asphaltene_transformation(
                    initial_kerogen,
                    kerogen,
                    asphaltene,
                    kernel.kerogen_to_asphaltene(),
                ),
            )
        } else {
            (kerogen_transformation(initial_kerogen, kerogen, 0.0), 0.0)
        };
        self.kerogen_conversion[t] = kerogen_tr;
        self.asphaltene_conversion[t] = asphaltene_tr;

        let conditions = kernel.rate_conditions(temperature, pressure);
        let cracking_rates: Vec<f64> = species
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let tr = if i == 0 || !has_asphaltene {
                    kerogen_tr
                } else {
                    asphaltene_tr
                };
                cracking_rate(s, &conditions, tr)
            })
            .collect();

        let lumped = LumpedConcentration::from_field(species, &self.field);
        let generation_step = GenerationStep {
            stoichiometry: kernel.stoichiometry(),
            cracking_rates: &cracking_rates,
            delta_time,
            n_reactions: kernel.scheme().len(),
        };
        if let (Some(iso), Some(history)) = (kernel.isotopes(), self.isotope_history.as_mut()) {
            history.set(0, 0, iso.initial_fractionation);
        }

        for i in 0..species.len() {
            let s = &species[i];
            let mut isotope_step = match (kernel.isotopes(), self.isotope_history.as_mut()) {
                (Some(iso), Some(history)) => Some(IsotopeStep {
                    history,
                    methods: &iso.methods,
                    factor: &iso.factor,
                    time_step: t,
                    asphaltene_index: kernel.asphaltene_index(),
                    c1_index: iso.c1_index,
                    asphaltene_conversion: asphaltene_tr,
                    initial_fractionation: iso.initial_fractionation,
                    temperature,
                }),
                _ => None,
            };
            let (upward, downward) = if s.mobile() {
                let upper_conv =
                    conv_mass_transfer(self.settings.upper_biot, kernel.reference_diffusivity(i), char_length);
                let lower_conv =
                    conv_mass_transfer(self.settings.lower_biot, kernel.reference_diffusivity(i), char_length);
                let diffusion = DiffusionStep {
                    lumped: &lumped,
                    fourier_number: fourier_number(
                        s,
                        kernel.aromatic_chains(),
                        &conditions,
                        delta_time,
                        slice_thickness,
                    ),
                    upper_conv,
                    lower_conv,
                    slice_thickness,
                };
                generation_diffusion(
                    i,
                    &generation_step,
                    &diffusion,
                    &mut self.field,
                    &mut self.rates,
                    isotope_step.as_mut(),
                )?;
                (
                    upper_conv * self.field.get(0, i) * net / char_length,
                    lower_conv * self.field.get(n - 1, i) * net / char_length,
                )
            } else {
                generation(
                    i,
                    &generation_step,
                    &mut self.field,
                    &mut self.rates,
                    isotope_step.as_mut(),
                )?;
                (0.0, 0.0)
            };

            self.upward_flux[(t, i)] = upward;
            self.downward_flux[(t, i)] = downward;
            self.concentration_history[(t, i)] = self.field.get(node, i);
            let slice_share = net / n as f64;
            // end slices count in full
            let generated: f64 = (0..n)
                .map(|j| (self.rates.negative(j, i) + self.rates.positive(j, i)) * slice_share)
                .sum();
            self.generation_history[(t, i)] = generated;

            self.update_isotopes(i, t, delta_time, asphaltene_tr, temperature);
        }
        Ok(())
    }

    /// Turns the generation weighted isotope sum of species `i` into the isotope value of
    /// the retained amount.
    fn update_isotopes(
        &mut self,
        i: usize,
        t: usize,
        delta_time: f64,
        asphaltene_conversion: f64,
        temperature: f64,
    ) {
        let (Some(iso), Some(history)) = (self.kernel.isotopes(), self.isotope_history.as_mut())
        else {
            return;
        };
        let n = self.settings.n_slices;
        let new_generation: f64 = (0..n).map(|j| self.rates.positive(j, i)).sum::<f64>() * delta_time;
        let new_cracking: f64 = -(0..n).map(|j| self.rates.negative(j, i)).sum::<f64>() * delta_time;
        let old_amount = self.concentration_history[(t - 1, i)] * self.settings.net_thickness;

        let is_asphaltene = self.kernel.species()[i].is_asphaltene();
        let state = RayleighState {
            asphaltene_conversion,
            initial_fractionation: iso.initial_fractionation,
            asphaltene_history: history.get(t - 1, i),
            temperature,
        };

        // step 0 takes the value generated in step 1
        if new_generation != 0.0 && t == 1 {
            history.set(0, i, history.get(t, i) * delta_time / new_generation);
        }
        let value = if new_generation != 0.0 && old_amount + new_generation != 0.0 {
            if is_asphaltene {
                source_rock_fractionation(&state, &iso.factor)
            } else {
                (history.get(t, i) * delta_time + old_amount * history.get(t - 1, i))
                    / (old_amount + new_generation)
            }
        } else if new_cracking > 0.0 && is_asphaltene {
            source_rock_fractionation(&state, &iso.factor)
        } else {
            history.get(t - 1, i)
        };
        history.set(t, i, value);
    }

    /// Uniform steps between the first and last time of `history`; the column must have
    /// room for `n_steps` more steps.
    pub fn run(&mut self, history: &TemperaturePressureHistory, n_steps: usize) -> Result<(), GenexError> {
        if n_steps == 0 {
            return Err(GenexError::Argument("a run needs at least one step".to_string()));
        }
        let start = history.start_time();
        let delta_time = (history.end_time() - start) / n_steps as f64;
        info!(
            "running source rock column: {} steps of {:.4} from {} to {}",
            n_steps,
            delta_time,
            start,
            history.end_time()
        );
        for k in 1..=n_steps {
            let time = start + k as f64 * delta_time;
            self.step(history.temperature_at(time), history.pressure_at(time), delta_time)?;
        }
        info!(
            "run completed! kerogen conversion {:.4}, asphaltene conversion {:.4}, VRE {:.3}",
            self.kerogen_conversion[self.current_step],
            self.asphaltene_conversion[self.current_step],
            self.vre_history[self.current_step]
        );
        Ok(())
    }

    ////////////////////////ACCESSORS/////////////////////////////
    pub fn kernel(&self) -> &GenexKernel {
        self.kernel
    }
    pub fn settings(&self) -> &SourceRockSettings {
        &self.settings
    }
    pub fn concentrations(&self) -> &ConcentrationField {
        &self.field
    }
    pub fn generation_rates(&self) -> &GenerationRates {
        &self.rates
    }
    pub fn initial_concentrations(&self) -> &[f64] {
        &self.initial
    }
    pub fn reference_node(&self) -> usize {
        self.reference_node
    }
    /// Number of steps taken so far.
    pub fn current_step(&self) -> usize {
        self.current_step
    }
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }
    pub fn time_history(&self) -> &[f64] {
        &self.time[..=self.current_step]
    }
    pub fn temperature_history(&self) -> &[f64] {
        &self.temperature[..=self.current_step]
    }
    pub fn pressure_history(&self) -> &[f64] {
        &self.pressure[..=self.current_step]
    }
    pub fn kerogen_conversion_history(&self) -> &[f64] {
        &self.kerogen_conversion[..=self.current_step]
    }
    pub fn asphaltene_conversion_history(&self) -> &[f64] {
        &self.asphaltene_conversion[..=self.current_step]
    }
    pub fn vre_history(&self) -> &[f64] {
        &self.vre_history[..=self.current_step]
    }
    pub fn concentration_history(&self, species: usize) -> Vec<f64> {
        self.species_column(&self.concentration_history, species)
    }
    pub fn generation_history(&self, species: usize) -> Vec<f64> {
        self.species_column(&self.generation_history, species)
    }
    pub fn flux_history(&self, species: usize, direction: FluxDirection) -> Vec<f64> {
        (0..=self.current_step)
            .map(|t| self.flux(t, species, direction))
            .collect()
    }
    pub fn isotope_history(&self, species: usize) -> Option<Vec<f64>> {
        self.isotope_history.as_ref().map(|h| {
            let mut values = h.species_history(species);
            values.truncate(self.current_step + 1);
            values
        })
    }

    /// Retained mass per unit area (kg/m2) of a species at every step.
    pub fn masses_history(&self, species: usize) -> Vec<f64> {
        self.concentration_history(species)
            .into_iter()
            .map(|c| c * self.settings.net_thickness)
            .collect()
    }

    fn species_column(&self, matrix: &DMatrix<f64>, species: usize) -> Vec<f64> {
        matrix
            .column(species)
            .iter()
            .take(self.current_step + 1)
            .copied()
            .collect()
    }

    fn flux(&self, step: usize, species: usize, direction: FluxDirection) -> f64 {
        match direction {
            FluxDirection::Up => self.upward_flux[(step, species)],
            FluxDirection::Down => self.downward_flux[(step, species)],
            FluxDirection::UpAndDown => {
                self.upward_flux[(step, species)] + self.downward_flux[(step, species)]
            }
        }
    }

    ////////////////////////EXPULSION/////////////////////////////
    /// Mass and volume of `fluid` expelled from `area` (m2) during `step`. A surface only
    /// counts as expelling when its Biot number is at least 1.
    pub fn expelled_mass_volume(
        &self,
        fluid: ExpelledFluid,
        step: usize,
        area: f64,
    ) -> Result<ExpelledAmount, GenexError> {
        self.check_step(step)?;
        let mut amount = ExpelledAmount::default();
        if self.settings.net_thickness <= 0.0 {
            return Ok(amount);
        }
        let dt = self.delta_time[step];
        for (i, s) in self.kernel.species().iter().enumerate() {
            if !fluid.contains(s) {
                continue;
            }
            let mut expulsion = 0.0;
            if self.settings.upper_biot >= 1.0 {
                expulsion += area * dt * self.upward_flux[(step, i)];
            }
            if self.settings.lower_biot >= 1.0 {
                expulsion += area * dt * self.downward_flux[(step, i)];
            }
            amount.mass += expulsion;
            amount.volume += expulsion / s.density();
        }
        Ok(amount)
    }

    /// Expelled amount of one species per step, optionally accumulated.
    pub fn expulsion_history(
        &self,
        species: usize,
        direction: FluxDirection,
        cumulative: bool,
    ) -> Result<Vec<f64>, GenexError> {
        self.check_species(species)?;
        let mut history: Vec<f64> = (0..=self.current_step)
            .map(|t| self.flux(t, species, direction) * self.delta_time[t])
            .collect();
        if cumulative {
            for t in 1..history.len() {
                history[t] += history[t - 1];
            }
        }
        Ok(history)
    }

    /// Cumulative flux weighted isotope value of the expelled species for the steps
    /// `begin..=end`.
    pub fn expelled_isotope_history(
        &self,
        species: usize,
        direction: FluxDirection,
        begin: usize,
        end: usize,
    ) -> Result<Vec<f64>, GenexError> {
        self.check_species(species)?;
        let isotopes = self.isotope_history(species).ok_or_else(|| {
            GenexError::Argument("isotopes are not modeled in this kernel".to_string())
        })?;
        let fluxes = self.flux_history(species, direction);
        Ok(flux_weighted_history(&fluxes, &isotopes, begin, end))
    }

    /// API gravity of the oil expelled up to each step, 0 before any oil is expelled.
    pub fn api_history(&self) -> Result<Vec<f64>, GenexError> {
        let mut mass = 0.0;
        let mut volume = 0.0;
        let mut api = Vec::with_capacity(self.current_step + 1);
        for t in 0..=self.current_step {
            let oil = self.expelled_mass_volume(ExpelledFluid::Oil, t, 1.0)?;
            mass += oil.mass;
            volume += oil.volume;
            api.push(if volume > f32::MIN_POSITIVE as f64 {
                api_gravity(mass / volume)?
            } else {
                0.0
            });
        }
        Ok(api)
    }

    /// Atomic ratios of the solid organic matter (immobile species and asphaltene) at the
    /// reference node for every step.
    pub fn van_krevelen_history(&self) -> Vec<AtomicRatios> {
        let species = self.kernel.species();
        (0..=self.current_step)
            .map(|t| {
                let solid: Vec<f64> = species
                    .iter()
                    .enumerate()
                    .map(|(i, s)| {
                        if !s.mobile() || s.is_asphaltene() {
                            self.concentration_history[(t, i)]
                        } else {
                            0.0
                        }
                    })
                    .collect();
                atomic_ratios(species, &solid)
            })
            .collect()
    }

    fn check_step(&self, step: usize) -> Result<(), GenexError> {
        if step > self.current_step {
            return Err(GenexError::Argument(format!(
                "step {} has not been taken, the column is at step {}",
                step, self.current_step
            )));
        }
        Ok(())
    }

    fn check_species(&self, species: usize) -> Result<(), GenexError> {
        if species >= self.kernel.species().len() {
            return Err(GenexError::Argument(format!(
                "species {} outside a model of {} species",
                species,
                self.kernel.species().len()
            )));
        }
        Ok(())
    }

    ////////////////////////PRETTY PRINTING/////////////////////////////
    pub fn pretty_print(&self) {
        use prettytable::{Table, row};

        let t = self.current_step;
        println!("\n=== SOURCE ROCK COLUMN SUMMARY ===");
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value", "Units"]);
        table.add_row(row!["Steps taken", t, "-"]);
        table.add_row(row!["Time", format!("{:.3}", self.time[t]), "time unit"]);
        table.add_row(row!["Temperature", format!("{:.2}", self.temperature[t]), "K"]);
        table.add_row(row!["Pressure", format!("{:.3e}", self.pressure[t]), "Pa"]);
        table.add_row(row![
            "Kerogen conversion",
            format!("{:.4}", self.kerogen_conversion[t]),
            "-"
        ]);
        table.add_row(row![
            "Asphaltene conversion",
            format!("{:.4}", self.asphaltene_conversion[t]),
            "-"
        ]);
        table.add_row(row!["VRE", format!("{:.3}", self.vre_history[t]), "%Ro"]);
        table.add_row(row!["Reference node", self.reference_node, "-"]);
        table.printstd();

        println!("\nSpecies at the reference node:");
        let mut table = Table::new();
        table.add_row(row![
            "Species",
            "Initial, kg/m3",
            "Current, kg/m3",
            "Expelled up, kg/m2",
            "Expelled down, kg/m2",
            "Isotopes"
        ]);
        for (i, s) in self.kernel.species().iter().enumerate() {
            let up = self
                .expulsion_history(i, FluxDirection::Up, true)
                .ok()
                .and_then(|h| h.last().copied())
                .unwrap_or(0.0);
            let down = self
                .expulsion_history(i, FluxDirection::Down, true)
                .ok()
                .and_then(|h| h.last().copied())
                .unwrap_or(0.0);
            let isotopes = self
                .isotope_history
                .as_ref()
                .map(|h| format!("{:.2}", h.get(t, i)))
                .unwrap_or_else(|| "-".to_string());
            table.add_row(row![
                s.name(),
                format!("{:.4}", self.initial[i]),
                format!("{:.4}", self.concentration_history[(t, i)]),
                format!("{:.4e}", up),
                format!("{:.4e}", down),
                isotopes
            ]);
        }
        table.printstd();
    }
}
