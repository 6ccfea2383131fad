/// Concentrations per slice and species, lumped organic matter classes, generation rates
pub mod concentration;
/// Isotope fractionation methods, fractionation factor and isotope histories
pub mod isotopes;
/// One time step of generation (immobile species) and generation with diffusion
/// (mobile species) for a single species over all slices
pub mod generation;
/// Everything computed once from the configuration: species table, stoichiometry,
/// aromaticity of chains, reference diffusivities, isotope tables
///
///  # Examples
/// ```
/// use Genex::Genex::kernel::GenexKernel;
/// use Genex::settings::GenexConfig;
/// let kernel = GenexKernel::new(&GenexConfig::default()).unwrap();
/// assert!(kernel.aromatic_chains() > 0.0 && kernel.aromatic_chains() < 1.0);
/// kernel.pretty_print();
/// ```
pub mod kernel;
/// Temperature and pressure history of a location, linear between the points
pub mod burial_history;
/// A source rock location stepped through its burial history, with concentration,
/// generation, flux, conversion, maturity and isotope histories
///
///  # Examples
/// ```
/// use Genex::Genex::burial_history::TemperaturePressureHistory;
/// use Genex::Genex::column_model::{ExpelledFluid, SourceRockColumn};
/// use Genex::Genex::kernel::GenexKernel;
/// use Genex::settings::GenexConfig;
/// let config = GenexConfig::default();
/// let kernel = GenexKernel::new(&config).unwrap();
/// let history = TemperaturePressureHistory::from_temperatures(
///     &[0.0, 50.0],
///     &[300.0, 430.0],
///     &config.physics,
/// )
/// .unwrap();
/// let mut column =
///     SourceRockColumn::new(&kernel, &config.source_rock, 100, history.points()[0]).unwrap();
/// column.run(&history, 100).unwrap();
/// let oil = column.expelled_mass_volume(ExpelledFluid::Oil, 100, 1.0).unwrap();
/// assert!(oil.mass >= 0.0);
/// column.pretty_print();
/// ```
pub mod column_model;

mod column_model_tests;
