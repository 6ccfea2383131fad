//! Reaction scheme: which species cracks into which products.
//!
//! Reaction `k` cracks species `k`, so the reacting species are the first
//! `n_reactions` entries of the species table and every product sits at a higher
//! index than the reactants that feed it. The generation engine relies on this when
//! it walks the species in increasing order.
use crate::Kinetics::species::{N_ELEMENTS, SpeciesRole, SpeciesTable};
use crate::errors::GenexError;
use log::info;
use serde::{Deserialize, Serialize};

/// Extra equation fixing the ratio of two product coefficients. `product1` and
/// `product2` are positions in the product list of the reaction, not species indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StoichRatio {
    /// coeff(product1) = ratio * coeff(product2)
    Specified {
        product1: usize,
        product2: usize,
        ratio: f64,
    },
    /// coeff(product1) = aro / (1 - aro) * coeff(product2), aro the kerogen aromaticity
    Calculated { product1: usize, product2: usize },
}

impl StoichRatio {
    pub fn products(&self) -> (usize, usize) {
        match *self {
            StoichRatio::Specified {
                product1, product2, ..
            } => (product1, product2),
            StoichRatio::Calculated { product1, product2 } => (product1, product2),
        }
    }
    pub fn is_calculated(&self) -> bool {
        matches!(self, StoichRatio::Calculated { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub reactant: usize,
    pub products: Vec<usize>,
    #[serde(default)]
    pub ratios: Vec<StoichRatio>,
}

impl Reaction {
    pub fn new(reactant: usize, products: Vec<usize>, ratios: Vec<StoichRatio>) -> Self {
        Reaction {
            reactant,
            products,
            ratios,
        }
    }
    /// position of `species` in the product list
    pub fn product_position(&self, species: usize) -> Option<usize> {
        self.products.iter().position(|&p| p == species)
    }
}

/// Number of modeled elements the reactant actually contains.
pub fn reacting_elements(species: &SpeciesTable, reactant: usize) -> usize {
    species[reactant]
        .composition()
        .iter()
        .take(species.n_elements().min(N_ELEMENTS))
        .filter(|&&count| count != 0.0)
        .count()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReactionScheme {
    reactions: Vec<Reaction>,
}

impl ReactionScheme {
    pub fn new(reactions: Vec<Reaction>) -> Self {
        ReactionScheme { reactions }
    }
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }
    pub fn len(&self) -> usize {
        self.reactions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }
    pub fn get(&self, reaction: usize) -> Option<&Reaction> {
        self.reactions.get(reaction)
    }

    /// true when elements with nonzero reactant composition plus ratio constraints
    /// give exactly one equation per product
    pub fn is_exactly_determined(&self, species: &SpeciesTable, reaction: usize) -> bool {
        let r = &self.reactions[reaction];
        reacting_elements(species, r.reactant) + r.ratios.len() == r.products.len()
    }

    /// Structural checks done once before the stoichiometry is solved.
    pub fn check(&self, species: &SpeciesTable) -> Result<(), GenexError> {
        if self.reactions.is_empty() {
            return Err(GenexError::scheme(0, "reaction scheme has no reactions"));
        }
        if self.reactions.len() > species.len() {
            return Err(GenexError::scheme(
                self.reactions.len() - 1,
                "more reactions than species",
            ));
        }
        for (k, reaction) in self.reactions.iter().enumerate() {
            if reaction.reactant != k {
                return Err(GenexError::scheme(
                    k,
                    format!(
                        "reaction {} must crack species {}, found reactant {}",
                        k, k, reaction.reactant
                    ),
                ));
            }
            let reactant = &species[k];
            if !reactant.reactive() {
                return Err(GenexError::scheme(
                    k,
                    format!("reactant '{}' is not reactive", reactant.name()),
                ));
            }
            if reaction.products.len() < 2 {
                return Err(GenexError::scheme(
                    k,
                    format!("reactant '{}' needs at least 2 products", reactant.name()),
                ));
            }
            for (i, &product) in reaction.products.iter().enumerate() {
                if product >= species.len() {
                    return Err(GenexError::scheme(
                        k,
                        format!("product index {} out of range", product),
                    ));
                }
                if product <= k {
                    return Err(GenexError::scheme(
                        k,
                        format!(
                            "product '{}' must come after reactant '{}'",
                            species[product].name(),
                            reactant.name()
                        ),
                    ));
                }
                if reaction.products[..i].contains(&product) {
                    return Err(GenexError::scheme(
                        k,
                        format!("product '{}' listed twice", species[product].name()),
                    ));
                }
            }
            if k > 0 {
                let produced_earlier = self.reactions[..k]
                    .iter()
                    .any(|earlier| earlier.products.contains(&k));
                if !produced_earlier {
                    return Err(GenexError::scheme(
                        k,
                        format!(
                            "reactant '{}' is not generated by an earlier reaction",
                            reactant.name()
                        ),
                    ));
                }
            }
            for ratio in &reaction.ratios {
                let (p1, p2) = ratio.products();
                if p1 >= reaction.products.len() || p2 >= reaction.products.len() || p1 == p2 {
                    return Err(GenexError::scheme(
                        k,
                        format!("ratio refers to invalid product positions {} and {}", p1, p2),
                    ));
                }
                if ratio.is_calculated() && reactant.role() != SpeciesRole::Asphaltene {
                    return Err(GenexError::scheme(
                        k,
                        "calculated ratios are only allowed for the asphaltene reaction",
                    ));
                }
                if let StoichRatio::Specified { ratio, .. } = ratio {
                    if !ratio.is_finite() || *ratio < 0.0 {
                        return Err(GenexError::scheme(
                            k,
                            format!("ratio {} must be non-negative", ratio),
                        ));
                    }
                }
            }
            if !self.is_exactly_determined(species, k) {
                return Err(GenexError::scheme(
                    k,
                    format!(
                        "{} reacting elements + {} ratios do not match {} products",
                        reacting_elements(species, k),
                        reaction.ratios.len(),
                        reaction.products.len()
                    ),
                ));
            }
        }
        info!(
            "reaction scheme checked: {} reactions over {} species",
            self.reactions.len(),
            species.len()
        );
        Ok(())
    }
}
