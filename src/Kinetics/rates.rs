//! # Cracking and diffusion rates
//!
//! Both processes are activated and share the transition state rate law
//!
//! `k = R T / (N_A h) * tuf * exp(S / R - (U + P V) / (R T))`
//!
//! where `tuf` converts 1/s into 1/time unit of the model (1/Ma by default).
//!
//! | process | U | S | V |
//! |---------|---|---|---|
//! | cracking | `E_low + tr (E_high - E_low)` | species input | species input |
//! | diffusion | `E_diff / (1 - aromchain)` | `4 expansivity U` | `4 compressibility U` |
//!
//! The diffusion entropy and volume are estimated from the energy, they are not measured.
use crate::Kinetics::species::{Species, SpeciesTable};
use crate::Utils::physical_constants::{AVOGADRO, PLANCK, R, ZERO_CELSIUS};

/// Conditions the rates are evaluated at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateConditions {
    /// K
    pub temperature: f64,
    /// Pa
    pub pressure: f64,
    /// 1/K
    pub expansivity: f64,
    /// 1/Pa
    pub compressibility: f64,
    /// seconds per model time unit
    pub time_unit_factor: f64,
}

/// Reference state for the boundary mass transfer: 140 degC, 98 MPa, 50 % bitumen.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReferenceConditions {
    pub temperature: f64,
    pub pressure: f64,
    pub wbo: f64,
}

impl Default for ReferenceConditions {
    fn default() -> Self {
        ReferenceConditions {
            temperature: 140.0 + ZERO_CELSIUS,
            pressure: 98.0e6,
            wbo: 0.5,
        }
    }
}

pub fn arrhenius_rate_factor(
    internal_energy: f64,
    volume: f64,
    entropy: f64,
    temperature: f64,
    pressure: f64,
    time_unit_factor: f64,
) -> f64 {
    let rt = R * temperature;
    let frequency = rt / (AVOGADRO * PLANCK) * time_unit_factor;
    frequency * (entropy / R - (internal_energy + pressure * volume) / rt).exp()
}

pub fn activation_energy_reaction(energy_low: f64, energy_high: f64, transformation_ratio: f64) -> f64 {
    energy_low + transformation_ratio.clamp(0.0, 1.0) * (energy_high - energy_low)
}

pub fn activation_energy_diffusion(energy_ref: f64, aromatic_chains: f64) -> f64 {
    energy_ref / (1.0 - aromatic_chains)
}

pub fn diffusion_entropy(diffusion_energy: f64, expansivity: f64) -> f64 {
    4.0 * expansivity * diffusion_energy
}

pub fn diffusion_volume(diffusion_energy: f64, compressibility: f64) -> f64 {
    4.0 * compressibility * diffusion_energy
}

/// Cracking rate of a species, 0 if it does not react.
pub fn cracking_rate(species: &Species, conditions: &RateConditions, transformation_ratio: f64) -> f64 {
    if !species.reactive() {
        return 0.0;
    }
    let energy = activation_energy_reaction(
        species.cracking_energy_low(),
        species.cracking_energy_high(),
        transformation_ratio,
    );
    arrhenius_rate_factor(
        energy,
        species.cracking_volume(),
        species.cracking_entropy(),
        conditions.temperature,
        conditions.pressure,
        conditions.time_unit_factor,
    )
}

/// Diffusion jump rate of a species, 0 if it is immobile.
pub fn diffusion_rate(species: &Species, aromatic_chains: f64, conditions: &RateConditions) -> f64 {
    if !species.mobile() {
        return 0.0;
    }
    let energy = activation_energy_diffusion(species.diffusion_energy(), aromatic_chains);
    arrhenius_rate_factor(
        energy,
        diffusion_volume(energy, conditions.compressibility),
        diffusion_entropy(energy, conditions.expansivity),
        conditions.temperature,
        conditions.pressure,
        conditions.time_unit_factor,
    )
}

/// `jump^2 dt / dz^2 * rate`
pub fn fourier_number(
    species: &Species,
    aromatic_chains: f64,
    conditions: &RateConditions,
    delta_time: f64,
    slice_thickness: f64,
) -> f64 {
    let jump = species.jump_length();
    jump * jump * delta_time / (slice_thickness * slice_thickness)
        * diffusion_rate(species, aromatic_chains, conditions)
}

/// Concentration dependence of the diffusivity from the solid (`waso`) and
/// bitumen (`wbo`) weight fractions.
pub fn aromaticity_dependence(waso: f64, wbo: f64) -> f64 {
    wbo * (1.0 - waso) * (1.0 - waso)
}

/// Diffusivity of `species` at the reference state, with the kerogen aromaticity
/// standing in for the solid fraction.
pub fn reference_diffusivity(
    species: &SpeciesTable,
    species_index: usize,
    aromatic_chains: f64,
    reference: &ReferenceConditions,
    conditions: &RateConditions,
) -> f64 {
    let s = &species[species_index];
    let at_reference = RateConditions {
        temperature: reference.temperature,
        pressure: reference.pressure,
        ..*conditions
    };
    s.jump_length()
        * s.jump_length()
        * aromaticity_dependence(species.kerogen().aromaticity(), reference.wbo)
        * diffusion_rate(s, aromatic_chains, &at_reference)
}

/// Convective mass transfer coefficient at a boundary of the source rock.
pub fn conv_mass_transfer(biot_number: f64, reference_diffusivity: f64, char_length: f64) -> f64 {
    2.0 * biot_number * reference_diffusivity / char_length
}

pub fn kerogen_transformation(initial_conc: f64, kerogen_conc: f64, asphaltene_conc: f64) -> f64 {
    if initial_conc <= 0.0 {
        return 0.0;
    }
    (1.0 - (asphaltene_conc + kerogen_conc) / initial_conc).clamp(0.0, 1.0)
}

/// Share of the asphaltene that the kerogen could have produced which has cracked.
pub fn asphaltene_transformation(
    initial_conc: f64,
    kerogen_conc: f64,
    asphaltene_conc: f64,
    kerogen_to_asphaltene: f64,
) -> f64 {
    if initial_conc <= 0.0 || kerogen_to_asphaltene <= 0.0 {
        return 0.0;
    }
    (1.0 - (kerogen_conc + asphaltene_conc / kerogen_to_asphaltene) / initial_conc).clamp(0.0, 1.0)
}
