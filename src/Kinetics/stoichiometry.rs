//! # Stoichiometry of the cracking reactions
//!
//! For every reaction of the scheme a square linear system is set up whose unknowns are
//! the molar stoichiometric factors of the products:
//!
//! * one atom balance per element the reactant contains
//!   `sum_k composition(product_k, e) * x_k = composition(reactant, e)`
//! * one equation per ratio constraint
//!   `x_p1 - ratio * x_p2 = 0`, or `x_p1 + aro/(aro - 1) * x_p2 = 0` for a calculated
//!   ratio with `aro` the kerogen aromaticity
//!
//! The system is solved by Gaussian elimination with partial pivoting. Molar factors are
//! converted into mass factors `x * fw(product) / fw(reactant)`. A negative mass factor
//! means the scheme consumes a product, which is only tolerated for water and COx, and
//! for NH4 out of the kerogen reaction.
use crate::Kinetics::reaction_scheme::{ReactionScheme, StoichRatio, reacting_elements};
use crate::Kinetics::species::{Species, SpeciesRole, SpeciesTable};
use crate::Utils::linear_solvers::solve_linear_equations;
use crate::errors::GenexError;
use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use prettytable::{Cell, Row, Table};

/// Mass based stoichiometric factors, rows are reactions and columns species.
#[derive(Debug, Clone, PartialEq)]
pub struct StoichiometryTable {
    factors: DMatrix<f64>,
}

impl StoichiometryTable {
    pub fn zeros(n_reactions: usize, n_species: usize) -> Self {
        StoichiometryTable {
            factors: DMatrix::zeros(n_reactions, n_species),
        }
    }
    pub fn from_matrix(factors: DMatrix<f64>) -> Self {
        StoichiometryTable { factors }
    }
    pub fn get(&self, reaction: usize, species: usize) -> f64 {
        self.factors[(reaction, species)]
    }
    pub fn n_reactions(&self) -> usize {
        self.factors.nrows()
    }
    pub fn n_species(&self) -> usize {
        self.factors.ncols()
    }
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.factors
    }

    pub fn pretty_print(&self, species: &SpeciesTable) {
        let mut table = Table::new();
        let mut header = vec![Cell::new("reactant \\ product")];
        header.extend(species.iter().map(|s| Cell::new(s.name())));
        table.add_row(Row::new(header));
        for r in 0..self.n_reactions() {
            let mut row = vec![Cell::new(species[r].name())];
            row.extend((0..self.n_species()).map(|s| {
                let value = self.get(r, s);
                if value == 0.0 {
                    Cell::new("")
                } else {
                    Cell::new(&format!("{:.4}", value))
                }
            }));
            table.add_row(Row::new(row));
        }
        table.printstd();
    }
}

pub fn mass_stoich_factor(reactant: &Species, product: &Species, molar_factor: f64) -> f64 {
    molar_factor * product.formula_weight() / reactant.formula_weight()
}

/// Products that may carry a negative factor without invalidating the scheme.
pub fn may_be_consumed(reaction: usize, product: &Species) -> bool {
    match product.role() {
        SpeciesRole::Water | SpeciesRole::COx => true,
        SpeciesRole::NH4 => reaction == 0,
        _ => false,
    }
}

/// Molar factors of one reaction, in the order of its product list.
pub fn molar_factors(
    species: &SpeciesTable,
    scheme: &ReactionScheme,
    reaction: usize,
) -> Result<DVector<f64>, GenexError> {
    let r = scheme
        .get(reaction)
        .ok_or_else(|| GenexError::scheme(reaction, "reaction does not exist"))?;
    let n_products = r.products.len();
    let n_equations = reacting_elements(species, r.reactant) + r.ratios.len();
    if n_equations != n_products {
        return Err(GenexError::scheme(
            reaction,
            format!(
                "{} equations for {} products, the system is not exactly determined",
                n_equations, n_products
            ),
        ));
    }

    let mut system = DMatrix::<f64>::zeros(n_products, n_products + 1);
    let mut row = 0;
    let reactant = &species[r.reactant];
    for e in 0..species.n_elements() {
        let target = reactant.composition()[e];
        if target == 0.0 {
            continue;
        }
        for (k, &p) in r.products.iter().enumerate() {
            system[(row, k)] = species[p].composition()[e];
        }
        system[(row, n_products)] = target;
        row += 1;
    }
    let kerogen_aromaticity = species.kerogen().aromaticity();
    for ratio in &r.ratios {
        let (p1, p2) = ratio.products();
        if p1 >= n_products || p2 >= n_products {
            return Err(GenexError::scheme(
                reaction,
                format!("ratio refers to product position {} or {}", p1, p2),
            ));
        }
        system[(row, p1)] = 1.0;
        system[(row, p2)] = match *ratio {
            StoichRatio::Specified { ratio, .. } => -ratio,
            StoichRatio::Calculated { .. } => kerogen_aromaticity / (kerogen_aromaticity - 1.0),
        };
        row += 1;
    }

    solve_linear_equations(system).map_err(|e| match e {
        GenexError::SingularSystem { column } => GenexError::scheme(
            reaction,
            format!("singular stoichiometry system, no pivot for product position {}", column),
        ),
        other => other,
    })
}

/// Solves every reaction of the scheme and returns the mass based factors.
pub fn solve_stoichiometry(
    species: &SpeciesTable,
    scheme: &ReactionScheme,
) -> Result<StoichiometryTable, GenexError> {
    let mut table = StoichiometryTable::zeros(scheme.len(), species.len());
    for (i, reaction) in scheme.reactions().iter().enumerate() {
        if reaction.reactant >= species.len()
            || reaction.products.iter().any(|&p| p >= species.len())
        {
            return Err(GenexError::scheme(i, "species index out of range"));
        }
        let molar = molar_factors(species, scheme, i)?;
        let reactant = &species[reaction.reactant];
        for (k, &p) in reaction.products.iter().enumerate() {
            let product = &species[p];
            let factor = mass_stoich_factor(reactant, product, molar[k]);
            if factor < 0.0 {
                if may_be_consumed(i, product) {
                    warn!(
                        "reaction {} ('{}') consumes '{}': factor {:.5}",
                        i,
                        reactant.name(),
                        product.name(),
                        factor
                    );
                } else {
                    return Err(GenexError::scheme(
                        i,
                        format!(
                            "negative stoichiometric factor {:.5} for product '{}' of '{}'",
                            factor,
                            product.name(),
                            reactant.name()
                        ),
                    ));
                }
            }
            table.factors[(i, p)] = factor;
        }
    }
    info!(
        "stoichiometry solved for {} reactions",
        table.n_reactions()
    );
    Ok(table)
}

/// Aromatic fraction of the mobile hydrocarbons generated by the primary reaction
/// (asphaltene cracking if asphaltene is modeled, kerogen cracking otherwise). Only
/// products with aromaticity above 0.1 count as aromatic.
pub fn aromaticity_of_chains(species: &SpeciesTable, stoichiometry: &StoichiometryTable) -> f64 {
    let reactant = if species.has_asphaltene() { 1 } else { 0 };
    if reactant >= stoichiometry.n_reactions() {
        return 0.0;
    }
    let mut aromatic_part = 0.0;
    let mut total_mobile_hc = 0.0;
    for (i, s) in species.iter().enumerate().skip(reactant + 1) {
        if s.mobile() && s.is_hydrocarbon() {
            let factor = stoichiometry.get(reactant, i);
            total_mobile_hc += factor;
            if s.aromaticity() > 0.1 {
                aromatic_part += s.aromaticity() * factor;
            }
        }
    }
    if total_mobile_hc > 0.0 {
        (aromatic_part / total_mobile_hc).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
