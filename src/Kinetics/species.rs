//! # Species
//!
//! Chemical entities of the source-rock model: kerogen, asphaltene, the oil and gas
//! lumps, water, COx, coke. A species is given by its elemental composition (atoms per
//! carbon atom for organic lumps) in the fixed element order `C, H, O, N, S`.
//!
//! ## Derived data
//! | quantity | how |
//! |----------|-----|
//! | formula weight | sum of atomic weights times atom counts of the modeled elements |
//! | aromaticity | root of a quadratic in the corrected H/C ratio, clamped to [0, 1] |
//! | density | given for mobile species, van Krevelen ring condensation estimate for solids and asphaltene |
//!
//! The derived fields are computed once in [`Species::new`] and never change afterwards.
//!
//! ## Classification
//! | predicate | criterion |
//! |-----------|-----------|
//! | hydrocarbon | H >= 0.01, O <= 0.5, N <= 0.5, S <= 1.0 |
//! | HC gas | C >= 1.0, H >= 2.35 |
//! | HC wet gas | HC gas and H < 4.0 |
//! | N2 gas | N >= 2.0, every other element <= 0.01 |
//! | oil composition | C >= 1.0, 0.5 <= H < 2.35 |
//! | asphaltene | role tag [`SpeciesRole::Asphaltene`] |
use crate::errors::GenexError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::ops::Index;
use strum_macros::{Display, EnumIter};

pub const N_ELEMENTS: usize = 5;
/// atoms per molecule (or per carbon atom for lumps), indexed by [`Element`]
pub type Composition = [f64; N_ELEMENTS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum Element {
    C,
    H,
    O,
    N,
    S,
}

/// g/mol in element order
pub const ATOMIC_WEIGHTS: [f64; N_ELEMENTS] = [12.011, 1.0079, 15.9994, 14.0067, 32.06];

impl Element {
    pub fn index(self) -> usize {
        self as usize
    }
    pub fn atomic_weight(self) -> f64 {
        ATOMIC_WEIGHTS[self.index()]
    }
}

const C: usize = 0;
const H: usize = 1;
const O: usize = 2;
const N: usize = 3;
const S: usize = 4;

const C_MIN_HC: f64 = 1.0;
const H_MIN_GAS: f64 = 2.35;
const H_MIN_HC: f64 = 0.01;
const H_MIN_OIL: f64 = 0.5;
const H_MIN_DRY_GAS: f64 = 4.0;
const N_MAX_HC: f64 = 0.5;
const O_MAX_HC: f64 = 0.5;
const S_MAX_HC: f64 = 1.0;
const N_MIN_N2: f64 = 2.0;
const OTHER_MAX_N2: f64 = 0.01;

// aromaticity correlation
const AROMATICITY_X: f64 = 6.9;
const AROMATICITY_A: f64 = 5.2;

/// Role of a species in the reaction network. Kerogen and asphaltene drive the
/// transformation ratios; water, COx and NH4 may come out of the kerogen reaction
/// with a negative stoichiometric factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, Display)]
pub enum SpeciesRole {
    Kerogen,
    Asphaltene,
    Water,
    COx,
    NH4,
    #[default]
    Generic,
}

pub fn formula_weight(n_elements: usize, composition: &Composition) -> f64 {
    composition
        .iter()
        .zip(ATOMIC_WEIGHTS.iter())
        .take(n_elements.min(N_ELEMENTS))
        .map(|(count, weight)| count * weight)
        .sum()
}

/// H/C plus half of O/C
pub fn corrected_hc(composition: &Composition) -> f64 {
    (composition[H] + 0.5 * composition[O]) / composition[C]
}

pub fn is_hydrocarbon(composition: &Composition) -> bool {
    composition[H] >= H_MIN_HC
        && composition[O] <= O_MAX_HC
        && composition[N] <= N_MAX_HC
        && composition[S] <= S_MAX_HC
}

pub fn is_hc_gas(composition: &Composition) -> bool {
    composition[C] >= C_MIN_HC && composition[H] >= H_MIN_GAS
}

pub fn is_hc_wet_gas(composition: &Composition) -> bool {
    is_hc_gas(composition) && composition[H] < H_MIN_DRY_GAS
}

pub fn is_n2_gas(composition: &Composition) -> bool {
    composition[N] >= N_MIN_N2
        && composition[C] <= OTHER_MAX_N2
        && composition[H] <= OTHER_MAX_N2
        && composition[O] <= OTHER_MAX_N2
        && composition[S] <= OTHER_MAX_N2
}

pub fn has_oil_composition(composition: &Composition) -> bool {
    composition[C] >= C_MIN_HC && composition[H] >= H_MIN_OIL && composition[H] < H_MIN_GAS
}

/// Fraction of aromatic carbon. Zero for anything that is not a hydrocarbon or has no carbon.
pub fn aromaticity(composition: &Composition) -> f64 {
    if !is_hydrocarbon(composition) || composition[C] <= 0.0 {
        return 0.0;
    }
    let y = 2.0 - corrected_hc(composition);
    let a = AROMATICITY_A;
    let b = -(AROMATICITY_X + a * y);
    let c = AROMATICITY_X * y - 1.0;
    // b^2 - 4ac = 27.04 y^2 - 71.76 y + 68.41 > 0 for every y
    let root = (-b - (b * b - 4.0 * a * c).sqrt()) / (2.0 * a);
    root.clamp(0.0, 1.0)
}

/// Density of a solid organic species from its ring condensation index (van Krevelen).
pub fn immobile_density(aromaticity: f64, composition: &Composition, formula_weight: f64) -> f64 {
    let rdash = (2.0 - aromaticity - corrected_hc(composition)).max(0.0);
    let ring_ratio = rdash / 2.0;
    let ring_volume = 9.1 - 3.65 * composition[H];
    let formula_volume =
        9.9 + 3.1 * composition[H] + 3.75 * composition[O] - ring_volume * ring_ratio;
    formula_weight / formula_volume * 1000.0
}

/// Asphaltene composition as a fixed linear map of the kerogen composition.
pub fn asphaltene_composition(n_elements: usize, kerogen: &Composition) -> Composition {
    let mut asphaltene = [0.0; N_ELEMENTS];
    asphaltene[C] = 1.0;
    asphaltene[H] = 0.95 * kerogen[H];
    asphaltene[O] = 0.7 * kerogen[O] - 0.03;
    if asphaltene[O] < 0.0 {
        warn!(
            "kerogen O/C {} too low for the asphaltene map, asphaltene oxygen set to 0",
            kerogen[O]
        );
        asphaltene[O] = 0.0;
    }
    if n_elements > N {
        asphaltene[N] = 0.009 + 0.3 * kerogen[N];
    }
    asphaltene
}

/// Species as it appears in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    #[serde(default)]
    pub role: SpeciesRole,
    #[serde(default)]
    pub composition: Composition,
    pub mobile: bool,
    pub reactive: bool,
    /// J/mol, at transformation ratio 0
    #[serde(default)]
    pub cracking_energy_low: f64,
    /// J/mol, at transformation ratio 1
    #[serde(default)]
    pub cracking_energy_high: f64,
    /// J/(mol K)
    #[serde(default)]
    pub cracking_entropy: f64,
    /// m3/mol
    #[serde(default)]
    pub cracking_volume: f64,
    /// J/mol
    #[serde(default)]
    pub diffusion_energy: f64,
    /// m
    #[serde(default)]
    pub jump_length: f64,
    /// kg/m3, used for mobile species only
    #[serde(default)]
    pub density: f64,
}

impl SpeciesData {
    pub fn new(name: &str, role: SpeciesRole, composition: Composition) -> Self {
        SpeciesData {
            name: name.to_string(),
            role,
            composition,
            mobile: false,
            reactive: false,
            cracking_energy_low: 0.0,
            cracking_energy_high: 0.0,
            cracking_entropy: 0.0,
            cracking_volume: 0.0,
            diffusion_energy: 0.0,
            jump_length: 0.0,
            density: 0.0,
        }
    }
    pub fn reactive(mut self, energy_low: f64, energy_high: f64) -> Self {
        self.reactive = true;
        self.cracking_energy_low = energy_low;
        self.cracking_energy_high = energy_high;
        self
    }
    pub fn mobile(mut self, diffusion_energy: f64, jump_length: f64, density: f64) -> Self {
        self.mobile = true;
        self.diffusion_energy = diffusion_energy;
        self.jump_length = jump_length;
        self.density = density;
        self
    }
}

/// Source-rock dependent kerogen data. The kerogen carbon count is always 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KerogenInput {
    /// H/C
    pub hydrogen: f64,
    /// O/C
    pub oxygen: f64,
    /// N/C, used when nitrogen is modeled
    #[serde(default)]
    pub nitrogen: f64,
    /// S/C, used when sulfur is modeled
    #[serde(default)]
    pub sulfur: f64,
    pub kerogen_energy_low: f64,
    pub kerogen_energy_high: f64,
    pub asphaltene_energy_low: f64,
    pub asphaltene_energy_high: f64,
}

impl Default for KerogenInput {
    /// marine type II kerogen
    fn default() -> Self {
        KerogenInput {
            hydrogen: 1.2,
            oxygen: 0.08,
            nitrogen: 0.0,
            sulfur: 0.0,
            kerogen_energy_low: 215.0e3,
            kerogen_energy_high: 235.0e3,
            asphaltene_energy_low: 220.0e3,
            asphaltene_energy_high: 240.0e3,
        }
    }
}

/// Species with its derived data.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    data: SpeciesData,
    formula_weight: f64,
    aromaticity: f64,
    density: f64,
}

impl Species {
    /// Validates the input and computes the derived fields. Elements beyond
    /// `n_elements` are not modeled and are set to zero.
    pub fn new(mut data: SpeciesData, n_elements: usize) -> Result<Self, GenexError> {
        for (i, value) in data.composition.iter_mut().enumerate() {
            if !value.is_finite() || *value < 0.0 {
                return Err(GenexError::config(format!(
                    "species '{}': composition must be non-negative, got {:?}",
                    data.name, data.composition
                )));
            }
            if i >= n_elements {
                *value = 0.0;
            }
        }
        let fw = formula_weight(n_elements, &data.composition);
        if fw <= 0.0 {
            return Err(GenexError::config(format!(
                "species '{}': formula weight must be positive",
                data.name
            )));
        }
        if data.cracking_volume < 0.0 {
            return Err(GenexError::config(format!(
                "species '{}': negative activation volume {}",
                data.name, data.cracking_volume
            )));
        }
        if data.reactive && (data.cracking_energy_low <= 0.0 || data.cracking_energy_high <= 0.0)
        {
            return Err(GenexError::config(format!(
                "species '{}': reactive species needs positive cracking energies",
                data.name
            )));
        }
        let aro = aromaticity(&data.composition);
        let uses_immobile_density = !data.mobile || data.role == SpeciesRole::Asphaltene;
        let density = if uses_immobile_density {
            if data.composition[C] <= 0.0 {
                return Err(GenexError::config(format!(
                    "species '{}': immobile species must contain carbon",
                    data.name
                )));
            }
            immobile_density(aro, &data.composition, fw)
        } else {
            data.density
        };
        if density <= 0.0 || !density.is_finite() {
            return Err(GenexError::config(format!(
                "species '{}': density must be positive, got {}",
                data.name, density
            )));
        }
        if data.mobile && (data.diffusion_energy <= 0.0 || data.jump_length <= 0.0) {
            return Err(GenexError::config(format!(
                "species '{}': mobile species needs positive diffusion energy and jump length",
                data.name
            )));
        }
        Ok(Species {
            data,
            formula_weight: fw,
            aromaticity: aro,
            density,
        })
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }
    pub fn role(&self) -> SpeciesRole {
        self.data.role
    }
    pub fn composition(&self) -> &Composition {
        &self.data.composition
    }
    pub fn count(&self, element: Element) -> f64 {
        self.data.composition[element.index()]
    }
    pub fn mobile(&self) -> bool {
        self.data.mobile
    }
    pub fn reactive(&self) -> bool {
        self.data.reactive
    }
    pub fn cracking_energy_low(&self) -> f64 {
        self.data.cracking_energy_low
    }
    pub fn cracking_energy_high(&self) -> f64 {
        self.data.cracking_energy_high
    }
    pub fn cracking_entropy(&self) -> f64 {
        self.data.cracking_entropy
    }
    pub fn cracking_volume(&self) -> f64 {
        self.data.cracking_volume
    }
    pub fn diffusion_energy(&self) -> f64 {
        self.data.diffusion_energy
    }
    pub fn jump_length(&self) -> f64 {
        self.data.jump_length
    }
    pub fn formula_weight(&self) -> f64 {
        self.formula_weight
    }
    pub fn aromaticity(&self) -> f64 {
        self.aromaticity
    }
    pub fn density(&self) -> f64 {
        self.density
    }
    pub fn data(&self) -> &SpeciesData {
        &self.data
    }

    pub fn is_hydrocarbon(&self) -> bool {
        is_hydrocarbon(&self.data.composition)
    }
    pub fn is_hc_gas(&self) -> bool {
        is_hc_gas(&self.data.composition)
    }
    pub fn is_hc_wet_gas(&self) -> bool {
        is_hc_wet_gas(&self.data.composition)
    }
    pub fn is_n2_gas(&self) -> bool {
        is_n2_gas(&self.data.composition)
    }
    pub fn has_oil_composition(&self) -> bool {
        has_oil_composition(&self.data.composition)
    }
    pub fn is_asphaltene(&self) -> bool {
        self.data.role == SpeciesRole::Asphaltene
    }
    pub fn is_kerogen(&self) -> bool {
        self.data.role == SpeciesRole::Kerogen
    }
}

/// All species of a model, kerogen first and asphaltene (if any) second.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesTable {
    n_elements: usize,
    species: Vec<Species>,
}

impl SpeciesTable {
    /// Builds the table: kerogen gets its composition and energies from `kerogen`, the
    /// asphaltene composition follows from the kerogen one.
    pub fn new(
        n_elements: usize,
        data: &[SpeciesData],
        kerogen: &KerogenInput,
    ) -> Result<Self, GenexError> {
        if !(3..=N_ELEMENTS).contains(&n_elements) {
            return Err(GenexError::config(format!(
                "number of modeled elements must be 3, 4 or 5, got {}",
                n_elements
            )));
        }
        if data.is_empty() || data[0].role != SpeciesRole::Kerogen {
            return Err(GenexError::config("the first species must be the kerogen"));
        }
        for (i, d) in data.iter().enumerate() {
            if i > 0 && d.role == SpeciesRole::Kerogen {
                return Err(GenexError::config(format!(
                    "species '{}': only one kerogen allowed",
                    d.name
                )));
            }
            if i != 1 && d.role == SpeciesRole::Asphaltene {
                return Err(GenexError::config(format!(
                    "species '{}': asphaltene must directly follow the kerogen",
                    d.name
                )));
            }
            if data[..i].iter().any(|other| other.name == d.name) {
                return Err(GenexError::config(format!(
                    "species '{}' defined twice",
                    d.name
                )));
            }
        }

        let mut kerogen_data = data[0].clone();
        kerogen_data.composition = [1.0, kerogen.hydrogen, kerogen.oxygen, 0.0, 0.0];
        if n_elements > N {
            kerogen_data.composition[N] = kerogen.nitrogen;
        }
        if n_elements > S {
            kerogen_data.composition[S] = kerogen.sulfur;
        }
        kerogen_data.cracking_energy_low = kerogen.kerogen_energy_low;
        kerogen_data.cracking_energy_high = kerogen.kerogen_energy_high;
        let kerogen_composition = kerogen_data.composition;

        let mut species = Vec::with_capacity(data.len());
        species.push(Species::new(kerogen_data, n_elements)?);
        for d in &data[1..] {
            let mut d = d.clone();
            if d.role == SpeciesRole::Asphaltene {
                d.composition = asphaltene_composition(n_elements, &kerogen_composition);
                d.cracking_energy_low = kerogen.asphaltene_energy_low;
                d.cracking_energy_high = kerogen.asphaltene_energy_high;
            }
            species.push(Species::new(d, n_elements)?);
        }
        Ok(SpeciesTable {
            n_elements,
            species,
        })
    }

    pub fn n_elements(&self) -> usize {
        self.n_elements
    }
    pub fn len(&self) -> usize {
        self.species.len()
    }
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
    pub fn get(&self, i: usize) -> Option<&Species> {
        self.species.get(i)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Species> {
        self.species.iter()
    }
    pub fn as_slice(&self) -> &[Species] {
        &self.species
    }
    pub fn kerogen(&self) -> &Species {
        &self.species[0]
    }
    pub fn has_asphaltene(&self) -> bool {
        self.species.get(1).is_some_and(|s| s.is_asphaltene())
    }
    pub fn asphaltene(&self) -> Option<&Species> {
        self.species.get(1).filter(|s| s.is_asphaltene())
    }
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.species.iter().position(|s| s.name() == name)
    }
}

impl Index<usize> for SpeciesTable {
    type Output = Species;
    fn index(&self, i: usize) -> &Species {
        &self.species[i]
    }
}

