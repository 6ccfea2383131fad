//! # Settings Module
//!
//! ## Purpose
//! Holds everything a Genex run is set up from: the species and reaction scheme, the
//! kerogen of the source rock, the isotope calibration, the physical constants of the
//! rock and the run control. The whole configuration is one serde document.
//!
//! ## Key Features
//! - **Built-in default**: a marine type II source rock with asphaltene, three oil and
//!   gas lumps, COx, water and coke
//! - **File handling**: [`GenexConfig::load_config`] falls back to the default when the
//!   file does not exist, [`GenexConfig::save_config`] writes pretty JSON
//! - **Validation**: range checks on every numeric setting before the kernel is built
//!
//! ## Default species
//! | index | name | role | mobile | reactive |
//! |-------|------|------|--------|----------|
//! | 0 | kerogen | Kerogen | no | yes |
//! | 1 | asphaltene | Asphaltene | no | yes |
//! | 2 | C15+ | | yes | yes |
//! | 3 | C6-14 | | yes | yes |
//! | 4 | C2-C5 | | yes | no |
//! | 5 | C1 | | yes | no |
//! | 6 | COx | COx | yes | no |
//! | 7 | H2O | Water | yes | no |
//! | 8 | precoke | | no | no |

use crate::Genex::isotopes::{FractionationEntry, IsoFactorInput, IsoFractMethod};
use crate::Kinetics::rates::ReferenceConditions;
use crate::Kinetics::reaction_scheme::{Reaction, ReactionScheme, StoichRatio};
use crate::Kinetics::species::{KerogenInput, SpeciesData, SpeciesRole, SpeciesTable};
use crate::Utils::load_from_file::LoadData;
use crate::Utils::physical_constants::{SECONDS_PER_MA, ZERO_CELSIUS};
use crate::errors::GenexError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Section header used when the configuration sits in a multi-section document.
pub const CONFIG_HEADER: &str = "GENEX";

/// Rock and unit constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsSettings {
    /// 1/K
    pub expansivity: f64,
    /// 1/Pa
    pub compressibility: f64,
    /// seconds per model time unit
    pub time_unit_factor: f64,
    /// kg/m3
    pub inorganic_density: f64,
    /// kg/m3
    pub overburden_density: f64,
    /// K
    pub surface_temperature: f64,
    /// K/m
    pub temperature_gradient: f64,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        PhysicsSettings {
            expansivity: 1.5e-4,
            compressibility: 1.0e-10,
            time_unit_factor: SECONDS_PER_MA,
            inorganic_density: 2650.0,
            overburden_density: 2300.0,
            surface_temperature: 20.0 + ZERO_CELSIUS,
            temperature_gradient: 0.038,
        }
    }
}

/// Geometry and organic content of the modeled source rock interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRockSettings {
    /// initial TOC, weight fraction
    pub toc: f64,
    /// m
    pub net_thickness: f64,
    /// characteristic length of the diffusion problem, m
    pub char_length: f64,
    pub upper_biot: f64,
    pub lower_biot: f64,
    pub n_slices: usize,
    /// relative position of the reference node, 0 top and 1 bottom
    pub reference_position: f64,
}

impl Default for SourceRockSettings {
    fn default() -> Self {
        SourceRockSettings {
            toc: 0.05,
            net_thickness: 20.0,
            char_length: 20.0,
            upper_biot: 1.0,
            lower_biot: 1.0,
            n_slices: 10,
            reference_position: 0.5,
        }
    }
}

/// Run control of the built-in example: linear heating between two times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    pub n_steps: usize,
    /// Ma
    pub start_time: f64,
    /// Ma
    pub end_time: f64,
    /// K
    pub start_temperature: f64,
    /// K
    pub end_temperature: f64,
}

impl Default for RunSettings {
    fn default() -> Self {
        RunSettings {
            n_steps: 400,
            start_time: 0.0,
            end_time: 100.0,
            start_temperature: 20.0 + ZERO_CELSIUS,
            end_temperature: 180.0 + ZERO_CELSIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsotopeSettings {
    pub factor: IsoFactorInput,
    /// delta of the unconverted source rock, per mil
    pub initial_fractionation: f64,
    /// species the carbon numbers of the Cn formula count from
    pub c1_species: String,
    pub methods: Vec<FractionationEntry>,
}

impl Default for IsotopeSettings {
    fn default() -> Self {
        let entry = |reaction, product, method| FractionationEntry {
            reaction,
            product,
            method,
        };
        IsotopeSettings {
            factor: IsoFactorInput::default(),
            initial_fractionation: -28.0,
            c1_species: "C1".to_string(),
            methods: vec![
                entry(0, 1, IsoFractMethod::RayleighKerogen),
                entry(0, 2, IsoFractMethod::RayleighCn),
                entry(1, 2, IsoFractMethod::RayleighCn),
                entry(1, 4, IsoFractMethod::RayleighCn),
                entry(1, 5, IsoFractMethod::RayleighC1),
                entry(2, 3, IsoFractMethod::History),
                entry(2, 4, IsoFractMethod::History),
                entry(2, 5, IsoFractMethod::History),
                entry(3, 4, IsoFractMethod::History),
                entry(3, 5, IsoFractMethod::History),
            ],
        }
    }
}

/// Complete configuration of a Genex run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenexConfig {
    /// 3 (C, H, O), 4 (+N) or 5 (+S)
    pub n_elements: usize,
    pub species: Vec<SpeciesData>,
    pub reactions: Vec<Reaction>,
    pub kerogen: KerogenInput,
    #[serde(default)]
    pub isotopes: Option<IsotopeSettings>,
    #[serde(default)]
    pub physics: PhysicsSettings,
    #[serde(default)]
    pub reference: ReferenceConditions,
    #[serde(default)]
    pub source_rock: SourceRockSettings,
    #[serde(default)]
    pub run: RunSettings,
}

fn default_species() -> Vec<SpeciesData> {
    let generic = SpeciesRole::Generic;
    vec![
        // composition and energies come from the kerogen input
        SpeciesData::new("kerogen", SpeciesRole::Kerogen, [0.0; 5]).reactive(215.0e3, 235.0e3),
        SpeciesData::new("asphaltene", SpeciesRole::Asphaltene, [0.0; 5])
            .reactive(220.0e3, 240.0e3),
        SpeciesData::new("C15+", generic, [1.0, 1.6, 0.0, 0.0, 0.0])
            .reactive(240.0e3, 240.0e3)
            .mobile(60.0e3, 5.0e-10, 850.0),
        SpeciesData::new("C6-14", generic, [1.0, 2.1, 0.0, 0.0, 0.0])
            .reactive(245.0e3, 245.0e3)
            .mobile(55.0e3, 5.0e-10, 750.0),
        SpeciesData::new("C2-C5", generic, [1.0, 2.5, 0.0, 0.0, 0.0]).mobile(50.0e3, 5.0e-10, 550.0),
        SpeciesData::new("C1", generic, [1.0, 4.0, 0.0, 0.0, 0.0]).mobile(45.0e3, 5.0e-10, 300.0),
        SpeciesData::new("COx", SpeciesRole::COx, [1.0, 0.0, 2.0, 0.0, 0.0])
            .mobile(45.0e3, 5.0e-10, 800.0),
        SpeciesData::new("H2O", SpeciesRole::Water, [0.0, 2.0, 1.0, 0.0, 0.0])
            .mobile(45.0e3, 5.0e-10, 1000.0),
        SpeciesData::new("precoke", generic, [1.0, 0.3, 0.0, 0.0, 0.0]),
    ]
}

fn default_reactions() -> Vec<Reaction> {
    let specified = |product1, product2, ratio| StoichRatio::Specified {
        product1,
        product2,
        ratio,
    };
    vec![
        Reaction::new(0, vec![1, 2, 6, 7], vec![specified(0, 1, 8.0)]),
        Reaction::new(
            1,
            vec![2, 4, 5, 6, 8],
            vec![
                StoichRatio::Calculated {
                    product1: 4,
                    product2: 0,
                },
                specified(1, 2, 1.5),
            ],
        ),
        Reaction::new(
            2,
            vec![3, 4, 5, 8],
            vec![specified(0, 1, 2.0), specified(1, 2, 1.0)],
        ),
        Reaction::new(3, vec![4, 5, 8], vec![specified(0, 1, 1.0)]),
    ]
}

impl Default for GenexConfig {
    fn default() -> Self {
        GenexConfig {
            n_elements: 3,
            species: default_species(),
            reactions: default_reactions(),
            kerogen: KerogenInput::default(),
            isotopes: Some(IsotopeSettings::default()),
            physics: PhysicsSettings::default(),
            reference: ReferenceConditions::default(),
            source_rock: SourceRockSettings::default(),
            run: RunSettings::default(),
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), GenexError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GenexError::config(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), GenexError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GenexError::config(format!(
            "{} must not be negative, got {}",
            name, value
        )))
    }
}

impl GenexConfig {
    /// Reads the configuration, or returns the default one if `config_file` does not exist.
    pub fn load_config(config_file: &str) -> Result<Self, GenexError> {
        if Path::new(config_file).exists() {
            info!("loading configuration from '{}'", config_file);
            LoadData::new(config_file.to_string()).load_section(CONFIG_HEADER)
        } else {
            warn!(
                "configuration file '{}' not found, using the built-in default",
                config_file
            );
            Ok(GenexConfig::default())
        }
    }

    pub fn save_config(&self, config_file: &str) -> Result<(), GenexError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_file, content)?;
        info!("configuration written to '{}'", config_file);
        Ok(())
    }

    pub fn species_table(&self) -> Result<SpeciesTable, GenexError> {
        SpeciesTable::new(self.n_elements, &self.species, &self.kerogen)
    }

    pub fn reaction_scheme(&self) -> ReactionScheme {
        ReactionScheme::new(self.reactions.clone())
    }

    /// Range checks of the numeric settings. Species and scheme rules are checked when
    /// the kernel builds its tables.
    pub fn validate(&self) -> Result<(), GenexError> {
        let p = &self.physics;
        non_negative("expansivity", p.expansivity)?;
        non_negative("compressibility", p.compressibility)?;
        positive("time unit factor", p.time_unit_factor)?;
        positive("inorganic density", p.inorganic_density)?;
        positive("overburden density", p.overburden_density)?;
        positive("surface temperature", p.surface_temperature)?;
        positive("temperature gradient", p.temperature_gradient)?;

        let r = &self.reference;
        positive("reference temperature", r.temperature)?;
        non_negative("reference pressure", r.pressure)?;
        if !(0.0..=1.0).contains(&r.wbo) {
            return Err(GenexError::config(format!(
                "reference bitumen fraction must lie in [0, 1], got {}",
                r.wbo
            )));
        }

        let s = &self.source_rock;
        if !(s.toc > 0.0 && s.toc <= 1.0) {
            return Err(GenexError::config(format!(
                "TOC must lie in (0, 1], got {}",
                s.toc
            )));
        }
        non_negative("net thickness", s.net_thickness)?;
        positive("characteristic length", s.char_length)?;
        non_negative("upper Biot number", s.upper_biot)?;
        non_negative("lower Biot number", s.lower_biot)?;
        if s.n_slices < 2 {
            return Err(GenexError::config(format!(
                "at least 2 slices are needed, got {}",
                s.n_slices
            )));
        }
        if !(0.0..=1.0).contains(&s.reference_position) {
            return Err(GenexError::config(format!(
                "reference position must lie in [0, 1], got {}",
                s.reference_position
            )));
        }

        let run = &self.run;
        if run.n_steps == 0 || run.end_time <= run.start_time {
            return Err(GenexError::config(format!(
                "run needs at least one step and end time after start time, got {} steps from {} to {}",
                run.n_steps, run.start_time, run.end_time
            )));
        }
        positive("start temperature", run.start_temperature)?;
        positive("end temperature", run.end_temperature)?;

        if let Some(iso) = &self.isotopes {
            if !self.species.iter().any(|d| d.name == iso.c1_species) {
                return Err(GenexError::config(format!(
                    "isotope C1 species '{}' is not defined",
                    iso.c1_species
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_is_valid() {
        let config = GenexConfig::default();
        config.validate().unwrap();
        let table = config.species_table().unwrap();
        assert_eq!(table.len(), 9);
        config.reaction_scheme().check(&table).unwrap();
    }

    #[test]
    fn round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("genex.json");
        let path = path.to_str().unwrap();
        let mut config = GenexConfig::default();
        config.source_rock.toc = 0.08;
        config.isotopes = None;
        config.save_config(path).unwrap();
        let loaded = GenexConfig::load_config(path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let loaded = GenexConfig::load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, GenexConfig::default());
    }

    #[test]
    fn section_in_a_larger_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("project.txt");
        let json = serde_json::to_string_pretty(&GenexConfig::default()).unwrap();
        let document = format!("NOTES\n\"ignored\"\n{}\n{}\nEND\n", CONFIG_HEADER, json);
        fs::write(&path, document).unwrap();
        let loaded = GenexConfig::load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, GenexConfig::default());
    }

    #[test]
    fn out_of_range_settings() {
        let mut config = GenexConfig::default();
        config.source_rock.toc = 1.5;
        assert!(matches!(
            config.validate(),
            Err(GenexError::InvalidConfiguration(_))
        ));

        let mut config = GenexConfig::default();
        config.source_rock.n_slices = 1;
        assert!(config.validate().is_err());

        let mut config = GenexConfig::default();
        config.run.end_time = config.run.start_time;
        assert!(config.validate().is_err());

        let mut config = GenexConfig::default();
        if let Some(iso) = config.isotopes.as_mut() {
            iso.c1_species = "methane".to_string();
        }
        assert!(config.validate().is_err());
    }
}
