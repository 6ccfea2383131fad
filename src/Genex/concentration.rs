//! State arrays of one source-rock column: species concentrations per slice, the lumped
//! organic matter classes that drive the diffusivity, and the generation rates of the
//! last step.
use crate::Kinetics::rates::aromaticity_dependence;
use crate::Kinetics::species::SpeciesTable;
use nalgebra::DMatrix;

/// Concentrations, rows are slices and columns species.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentrationField {
    values: DMatrix<f64>,
}

impl ConcentrationField {
    pub fn zeros(n_slices: usize, n_species: usize) -> Self {
        ConcentrationField {
            values: DMatrix::zeros(n_slices, n_species),
        }
    }
    /// Every slice set to `initial`.
    pub fn uniform(n_slices: usize, initial: &[f64]) -> Self {
        ConcentrationField {
            values: DMatrix::from_fn(n_slices, initial.len(), |_, s| initial[s]),
        }
    }
    pub fn n_slices(&self) -> usize {
        self.values.nrows()
    }
    pub fn n_species(&self) -> usize {
        self.values.ncols()
    }
    pub fn get(&self, slice: usize, species: usize) -> f64 {
        self.values[(slice, species)]
    }
    pub fn set(&mut self, slice: usize, species: usize, value: f64) {
        self.values[(slice, species)] = value;
    }
    /// Concentrations of all species in one slice.
    pub fn slice(&self, slice: usize) -> Vec<f64> {
        self.values.row(slice).iter().copied().collect()
    }
    /// Concentration profile of one species over the slices.
    pub fn profile(&self, species: usize) -> Vec<f64> {
        self.values.column(species).iter().copied().collect()
    }
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.values
    }
    pub fn min_value(&self) -> f64 {
        self.values.min()
    }
}

/// Total organic matter, bitumen (mobile species) and aromatic solid carbon of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LumpedSlice {
    pub total_om: f64,
    pub bitumen: f64,
    pub solid: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LumpedConcentration {
    slices: Vec<LumpedSlice>,
}

impl LumpedConcentration {
    pub fn from_field(species: &SpeciesTable, field: &ConcentrationField) -> Self {
        let slices = (0..field.n_slices())
            .map(|i| {
                let mut lumped = LumpedSlice::default();
                for (j, s) in species.iter().enumerate() {
                    let conc = field.get(i, j);
                    lumped.total_om += conc;
                    if s.mobile() {
                        lumped.bitumen += conc;
                    } else {
                        lumped.solid += s.aromaticity() * conc;
                    }
                }
                lumped
            })
            .collect();
        LumpedConcentration { slices }
    }
    pub fn from_slices(slices: Vec<LumpedSlice>) -> Self {
        LumpedConcentration { slices }
    }
    pub fn len(&self) -> usize {
        self.slices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
    pub fn slices(&self) -> &[LumpedSlice] {
        &self.slices
    }
}

impl std::ops::Index<usize> for LumpedConcentration {
    type Output = LumpedSlice;
    fn index(&self, i: usize) -> &LumpedSlice {
        &self.slices[i]
    }
}

/// Concentration dependence of the diffusivity across the interface of two slices.
pub fn conc_factor(upper: &LumpedSlice, lower: &LumpedSlice) -> f64 {
    let total = upper.total_om + lower.total_om;
    if total <= 0.0 {
        return 0.0;
    }
    let waso = (upper.solid + lower.solid) / total;
    let wbo = (upper.bitumen + lower.bitumen) / total;
    aromaticity_dependence(waso, wbo)
}

/// Production (positive) and own cracking (negative) rates per slice and species.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRates {
    positive: DMatrix<f64>,
    negative: DMatrix<f64>,
}

impl GenerationRates {
    pub fn zeros(n_slices: usize, n_species: usize) -> Self {
        GenerationRates {
            positive: DMatrix::zeros(n_slices, n_species),
            negative: DMatrix::zeros(n_slices, n_species),
        }
    }
    pub fn positive(&self, slice: usize, species: usize) -> f64 {
        self.positive[(slice, species)]
    }
    pub fn negative(&self, slice: usize, species: usize) -> f64 {
        self.negative[(slice, species)]
    }
    pub fn set(&mut self, slice: usize, species: usize, positive: f64, negative: f64) {
        self.positive[(slice, species)] = positive;
        self.negative[(slice, species)] = negative;
    }
    pub fn n_slices(&self) -> usize {
        self.positive.nrows()
    }
}
