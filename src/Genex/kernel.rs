//! # Kernel setup
//!
//! Everything that depends only on the configuration and not on the state of a source
//! rock location is computed once here and shared read-only by all columns:
//!
//! 1. range checks of the configuration
//! 2. species table with the derived fields (formula weight, aromaticity, density)
//! 3. reaction scheme check and mass based stoichiometry
//! 4. aromaticity of the chains produced by the primary cracking
//! 5. diffusivity of every mobile species at the reference state
//! 6. isotope methods and fractionation factor, if isotopes are configured
use crate::Genex::isotopes::{IsoFactor, IsotopeFractionation};
use crate::Kinetics::rates::{RateConditions, ReferenceConditions, reference_diffusivity};
use crate::Kinetics::reaction_scheme::ReactionScheme;
use crate::Kinetics::species::SpeciesTable;
use crate::Kinetics::stoichiometry::{StoichiometryTable, aromaticity_of_chains, solve_stoichiometry};
use crate::errors::GenexError;
use crate::settings::{GenexConfig, PhysicsSettings};
use log::info;

/// Isotope tables of the kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct IsotopeSetup {
    pub methods: IsotopeFractionation,
    pub factor: IsoFactor,
    /// per mil
    pub initial_fractionation: f64,
    pub c1_index: usize,
}

#[derive(Debug, Clone)]
pub struct GenexKernel {
    species: SpeciesTable,
    scheme: ReactionScheme,
    stoichiometry: StoichiometryTable,
    aromatic_chains: f64,
    reference_diffusivity: Vec<f64>,
    /// mass of asphaltene per mass of cracked kerogen, 0 without asphaltene
    kerogen_to_asphaltene: f64,
    isotopes: Option<IsotopeSetup>,
    physics: PhysicsSettings,
    reference: ReferenceConditions,
}

impl GenexKernel {
    pub fn new(config: &GenexConfig) -> Result<Self, GenexError> {
        config.validate()?;
        info!("configuration checked!");
        let species = config.species_table()?;
        let scheme = config.reaction_scheme();
        scheme.check(&species)?;
        info!("species and reaction scheme processed!");

        let stoichiometry = solve_stoichiometry(&species, &scheme)?;
        let aromatic_chains = aromaticity_of_chains(&species, &stoichiometry);
        if !(0.0..1.0).contains(&aromatic_chains) {
            return Err(GenexError::config(format!(
                "aromaticity of chains must lie in [0, 1), got {}",
                aromatic_chains
            )));
        }
        info!("stoichiometry processed!");

        let physics = config.physics.clone();
        let reference = config.reference;
        let conditions = RateConditions {
            temperature: reference.temperature,
            pressure: reference.pressure,
            expansivity: physics.expansivity,
            compressibility: physics.compressibility,
            time_unit_factor: physics.time_unit_factor,
        };
        let reference_diffusivity = (0..species.len())
            .map(|i| {
                if species[i].mobile() {
                    reference_diffusivity(&species, i, aromatic_chains, &reference, &conditions)
                } else {
                    0.0
                }
            })
            .collect();
        info!("reference diffusivities calculated");

        let kerogen_to_asphaltene = if species.has_asphaltene() {
            stoichiometry.get(0, 1)
        } else {
            0.0
        };

        let isotopes = match &config.isotopes {
            Some(settings) => {
                let methods =
                    IsotopeFractionation::new(scheme.len(), species.len(), &settings.methods)?;
                let factor = IsoFactor::new(&settings.factor)?;
                let c1_index = species.index_of(&settings.c1_species).ok_or_else(|| {
                    GenexError::config(format!(
                        "isotope C1 species '{}' is not defined",
                        settings.c1_species
                    ))
                })?;
                info!("isotope tables created");
                Some(IsotopeSetup {
                    methods,
                    factor,
                    initial_fractionation: settings.initial_fractionation,
                    c1_index,
                })
            }
            None => None,
        };
        info!("kernel setup completed!");
        Ok(GenexKernel {
            species,
            scheme,
            stoichiometry,
            aromatic_chains,
            reference_diffusivity,
            kerogen_to_asphaltene,
            isotopes,
            physics,
            reference,
        })
    }

    pub fn species(&self) -> &SpeciesTable {
        &self.species
    }
    pub fn scheme(&self) -> &ReactionScheme {
        &self.scheme
    }
    pub fn stoichiometry(&self) -> &StoichiometryTable {
        &self.stoichiometry
    }
    pub fn aromatic_chains(&self) -> f64 {
        self.aromatic_chains
    }
    pub fn reference_diffusivity(&self, species: usize) -> f64 {
        self.reference_diffusivity[species]
    }
    pub fn kerogen_to_asphaltene(&self) -> f64 {
        self.kerogen_to_asphaltene
    }
    pub fn isotopes(&self) -> Option<&IsotopeSetup> {
        self.isotopes.as_ref()
    }
    pub fn physics(&self) -> &PhysicsSettings {
        &self.physics
    }
    pub fn reference(&self) -> &ReferenceConditions {
        &self.reference
    }
    /// Index of the asphaltene, or of the kerogen in a scheme without asphaltene.
    pub fn asphaltene_index(&self) -> usize {
        if self.species.has_asphaltene() { 1 } else { 0 }
    }

    pub fn rate_conditions(&self, temperature: f64, pressure: f64) -> RateConditions {
        RateConditions {
            temperature,
            pressure,
            expansivity: self.physics.expansivity,
            compressibility: self.physics.compressibility,
            time_unit_factor: self.physics.time_unit_factor,
        }
    }

    ////////////////////////PRETTY PRINTING/////////////////////////////
    pub fn pretty_print(&self) {
        use prettytable::{Table, row};

        println!("\n=== GENEX KERNEL SUMMARY ===");
        let mut table = Table::new();
        table.add_row(row![
            "#",
            "Species",
            "Role",
            "Mobile",
            "Reactive",
            "FW, g/mol",
            "Aromaticity",
            "Density, kg/m3",
            "Ref. diffusivity"
        ]);
        for (i, s) in self.species.iter().enumerate() {
            table.add_row(row![
                i,
                s.name(),
                format!("{:?}", s.role()),
                s.mobile(),
                s.reactive(),
                format!("{:.3}", s.formula_weight()),
                format!("{:.4}", s.aromaticity()),
                format!("{:.1}", s.density()),
                format!("{:.4e}", self.reference_diffusivity[i])
            ]);
        }
        table.printstd();
        println!("Aromaticity of chains: {:.6}", self.aromatic_chains);
        println!("Kerogen to asphaltene: {:.6}", self.kerogen_to_asphaltene);
        println!("\nStoichiometry (mass factors):");
        self.stoichiometry.pretty_print(&self.species);
        if let Some(iso) = &self.isotopes {
            let (a, b) = iso.factor.constants();
            println!(
                "\nIsotopes: initial {:.2} per mil, alpha(T) = {:.6} + {:.3e} (T - 273.15), C1 = {}",
                iso.initial_fractionation,
                a,
                b,
                self.species[iso.c1_index].name()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kinetics::species::SpeciesRole;
    use approx::assert_relative_eq;

    #[test]
    fn demo_kernel() {
        let kernel = GenexKernel::new(&GenexConfig::default()).unwrap();
        assert_relative_eq!(kernel.aromatic_chains(), 0.17642753364280675, epsilon = 1e-6);
        assert_relative_eq!(kernel.kerogen_to_asphaltene(), 0.81525, epsilon = 1e-4);
        assert_eq!(kernel.asphaltene_index(), 1);
        let species = kernel.species();
        for i in 0..species.len() {
            if species[i].mobile() {
                assert!(kernel.reference_diffusivity(i) > 0.0);
            } else {
                assert_eq!(kernel.reference_diffusivity(i), 0.0);
            }
        }
        // lighter species diffuse faster
        assert!(kernel.reference_diffusivity(5) > kernel.reference_diffusivity(2));
        let iso = kernel.isotopes().unwrap();
        assert_eq!(iso.c1_index, 5);
        assert_eq!(iso.initial_fractionation, -28.0);
    }

    #[test]
    fn kernel_without_isotopes() {
        let mut config = GenexConfig::default();
        config.isotopes = None;
        let kernel = GenexKernel::new(&config).unwrap();
        assert!(kernel.isotopes().is_none());
        let conditions = kernel.rate_conditions(400.0, 1.0e7);
        assert_eq!(conditions.temperature, 400.0);
        assert_eq!(conditions.time_unit_factor, config.physics.time_unit_factor);
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let mut config = GenexConfig::default();
        config.source_rock.toc = 0.0;
        assert!(matches!(
            GenexKernel::new(&config),
            Err(GenexError::InvalidConfiguration(_))
        ));

        let mut config = GenexConfig::default();
        config.species[0].role = SpeciesRole::Generic;
        assert!(GenexKernel::new(&config).is_err());
    }
}
