//! # Fluid property correlations
//!
//! Closed form correlations evaluated on the state of the source rock and of the
//! secondary migration system. All functions are pure; units are SI (K, Pa, kg/m3)
//! unless stated otherwise.
//!
//! | function | what |
//! |----------|------|
//! | [`api_gravity`] | `141.5/rho*1000 - 131.5`, floored at 0.001 |
//! | [`bubble_point_gor`] | Glaso correlation for North Sea oils, m3/m3 |
//! | [`gas_in_water`], [`n2_in_water`], [`calc_free_gas`] | solubility in the formation water |
//! | [`overpressure`] | expelled masses over water mass |
//! | [`lithostatic_pressure`], [`fail_pressure`], [`depth_from_temperature`] | burial |
//! | [`saturation_cgr`], [`determine_field_type`] | field classification |
//! | [`water_density`], [`total_organic_carbon`], [`volume_fraction_om`], [`atomic_ratios`] | rock bookkeeping |
use crate::Kinetics::species::{ATOMIC_WEIGHTS, Element, SpeciesTable};
use crate::Utils::linear_solvers::solve_quadratic;
use crate::Utils::physical_constants::{GOR_CONVERSION, GRAVITY, ZERO_CELSIUS};
use crate::errors::GenexError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

const API_FLOOR: f64 = 0.001;
const MAX_GAS_SALINITY: f64 = 0.28;
const MIN_OM_DENSITY: f64 = 500.0;

/// API gravity of an oil of the given density. Negative values (denser than about
/// 1076 kg/m3) are replaced by 0.001.
pub fn api_gravity(density: f64) -> Result<f64, GenexError> {
    if density <= 0.0 {
        return Err(GenexError::Argument(format!(
            "density must be positive, got {}",
            density
        )));
    }
    let api = 141.5 / density * 1000.0 - 131.5;
    Ok(if api < 0.0 { API_FLOOR } else { api })
}

/// Gas oil ratio at bubble point (Glaso), in m3/m3.
///
/// The saturation pressure is taken from the quadratic fit in `log10(P / MPa)`,
/// temperature enters in degF.
pub fn bubble_point_gor(
    oil_density: f64,
    gas_density: f64,
    temperature: f64,
    pressure: f64,
) -> Result<f64, GenexError> {
    if gas_density <= 0.0 || pressure <= 0.0 || temperature < 0.0 {
        return Err(GenexError::Argument(format!(
            "bubble point GOR needs positive gas density and pressure, got {} and {}",
            gas_density, pressure
        )));
    }
    let c = -0.394581 - (pressure / 1.0e6).log10();
    let pbs = 10f64.powf(solve_quadratic(-0.30218, 1.7447, c));
    let api = api_gravity(oil_density)?;
    let fahrenheit = (temperature - ZERO_CELSIUS) * 1.8 + 32.0;
    let gor_scf = (gas_density / 1.223) * pbs.powf(1.2255) * api.powf(1.212)
        / fahrenheit.powf(0.2107);
    Ok(gor_scf / GOR_CONVERSION)
}

/// Volume of HC gas the water can hold; zero above a salinity of 0.28.
pub fn hc_gas_water_saturation(salinity: f64, pressure: f64, water_volume: f64) -> f64 {
    if salinity < MAX_GAS_SALINITY {
        (1.05 + 0.08 * pressure / 1.0e6) * (1.0 - salinity / MAX_GAS_SALINITY) * water_volume
    } else {
        0.0
    }
}

/// HC gas dissolved in water. When oil and water together can take all of the gas,
/// the gas is shared in proportion to their capacities.
pub fn gas_in_water(
    gor: f64,
    pressure: f64,
    salinity: f64,
    gas_volume: f64,
    oil_volume: f64,
    water_volume: f64,
) -> f64 {
    let water_capacity = hc_gas_water_saturation(salinity, pressure, water_volume);
    let oil_capacity = gor * oil_volume;
    let total = oil_capacity + water_capacity;
    if gas_volume <= total {
        if total > 0.0 {
            gas_volume * water_capacity / total
        } else {
            0.0
        }
    } else {
        water_capacity
    }
}

pub fn n2_in_water(pressure: f64, salinity: f64, n2_volume: f64, water_volume: f64) -> f64 {
    let saturation = hc_gas_water_saturation(salinity, pressure, water_volume)
        * (0.5465 + 0.00465 * pressure / 1.0e6);
    n2_volume.min(saturation)
}

/// Gas volume left after the formation water has taken its share.
#[allow(clippy::too_many_arguments)]
pub fn calc_free_gas(
    oil_volume: f64,
    oil_density: f64,
    gas_volume: f64,
    gas_density: f64,
    water_volume: f64,
    temperature: f64,
    salinity: f64,
    pressure: f64,
) -> Result<f64, GenexError> {
    let saturation = bubble_point_gor(oil_density, gas_density, temperature, pressure)?;
    let dissolved = if saturation > 0.0 {
        gas_in_water(
            saturation,
            pressure,
            salinity,
            gas_volume,
            oil_volume,
            water_volume,
        )
    } else {
        0.0
    };
    Ok(gas_volume - dissolved)
}

pub fn lithostatic_pressure(depth: f64, overburden_density: f64) -> f64 {
    depth * overburden_density * GRAVITY
}

pub fn fail_pressure(failure_criterion: f64, lithostatic_pressure: f64) -> f64 {
    failure_criterion * lithostatic_pressure
}

/// Overpressure in the migration system from expelled oil, gas and N2 masses.
pub fn overpressure(oil_mass: f64, gas_mass: f64, n2_mass: f64, water_mass: f64) -> f64 {
    1.0e6 * (800.0 * oil_mass + 2000.0 * gas_mass + 2000.0 * n2_mass) / water_mass
}

/// Depth at which a constant gradient reaches `temperature`, never negative.
pub fn depth_from_temperature(temperature: f64, gradient: f64, surface_temperature: f64) -> f64 {
    ((temperature - surface_temperature) / gradient).max(0.0)
}

/// Condensate gas ratio at saturation.
pub fn saturation_cgr(temperature: f64, pressure: f64) -> f64 {
    0.000097 * 10f64.powf(1.3e-8 * pressure + 0.0035 * (temperature - 100.0 - ZERO_CELSIUS))
}

/// Weight fraction of organic carbon from the atomic carbon per unit volume.
pub fn total_organic_carbon(atomic_carbon: f64, density: f64) -> f64 {
    atomic_carbon * ATOMIC_WEIGHTS[Element::C.index()] / density
}

/// Volume fraction of organic matter; densities below 500 kg/m3 count as 500.
pub fn volume_fraction_om(species: &SpeciesTable, concentrations: &[f64]) -> f64 {
    species
        .iter()
        .zip(concentrations)
        .map(|(s, conc)| conc / s.density().max(MIN_OM_DENSITY))
        .sum()
}

/// Schowalter (1979) water density around 93 degC.
pub fn water_density(temperature: f64, pressure: f64, salinity: f64) -> f64 {
    966.0 + 648.0 * salinity - 0.72 * (temperature - 93.0 - ZERO_CELSIUS) + 0.483e-6 * pressure
}

/// Atomic carbon and the H/C and O/C ratios of a mixture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AtomicRatios {
    pub atomic_carbon: f64,
    pub h_over_c: f64,
    pub o_over_c: f64,
}

pub fn atomic_ratios(species: &SpeciesTable, concentrations: &[f64]) -> AtomicRatios {
    let (mut c, mut h, mut o) = (0.0, 0.0, 0.0);
    for (s, conc) in species.iter().zip(concentrations) {
        let moles = conc / s.formula_weight();
        c += moles * s.count(Element::C);
        h += moles * s.count(Element::H);
        o += moles * s.count(Element::O);
    }
    let (h_over_c, o_over_c) = if c > f32::MIN_POSITIVE as f64 {
        (h / c, o / c)
    } else {
        (0.0, 0.0)
    };
    AtomicRatios {
        atomic_carbon: c,
        h_over_c,
        o_over_c,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Display)]
pub enum FieldType {
    DryHole,
    OilShows,
    GasShows,
    OilField,
    OilGasField,
    GasField,
}

/// Classifies a trap from its charge, the water volume and the gas oil ratios.
pub fn determine_field_type(
    oil_volume: f64,
    gas_volume: f64,
    water_volume: f64,
    gor: f64,
    saturation_gor: f64,
    saturation_cgr: f64,
) -> FieldType {
    if oil_volume < water_volume * 1.0e-5 && gas_volume < water_volume * 0.01 {
        FieldType::DryHole
    } else if oil_volume < water_volume * 1.0e-4 && gor < 1000.0 {
        FieldType::OilShows
    } else if gas_volume < water_volume && gor > 1000.0 {
        FieldType::GasShows
    } else if gor < saturation_gor {
        FieldType::OilField
    } else if gor < 1.0 / saturation_cgr {
        FieldType::OilGasField
    } else {
        FieldType::GasField
    }
}
