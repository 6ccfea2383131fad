/// Species of the source-rock model: composition, formula weight, aromaticity, density and
/// the classification predicates
pub mod species;
/// Reactions cracking one species into several products, with ratio constraints
pub mod reaction_scheme;
/// Mass based stoichiometric factors from atom balances and ratio constraints
///
///  # Examples
/// ```
/// use Genex::settings::GenexConfig;
/// use Genex::Kinetics::stoichiometry::solve_stoichiometry;
/// let config = GenexConfig::default();
/// let species = config.species_table().unwrap();
/// let scheme = config.reaction_scheme();
/// let table = solve_stoichiometry(&species, &scheme).unwrap();
/// let sum: f64 = (0..table.n_species()).map(|s| table.get(0, s)).sum();
/// assert!((sum - 1.0).abs() < 1e-10);
/// table.pretty_print(&species);
/// ```
pub mod stoichiometry;
/// Arrhenius rates of cracking and diffusion, transformation ratios
pub mod rates;

mod stoichiometry_tests;
