/// Thomas algorithm, partial-pivot Gaussian elimination and the quadratic root
pub mod linear_solvers;
/// JSON configuration documents with header sections
pub mod load_from_file;
/// simplelog setup
pub mod logger;
pub mod physical_constants;
