/// Runnable demonstrations of the kernel on the built-in source rock
pub mod genex_examples;
