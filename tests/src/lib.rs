//! End to end tests for chanlint, run against the Go files in `test_data/go`.

#[cfg(test)]
mod utils;

#[cfg(test)]
mod ast;
#[cfg(test)]
mod type_checker;
#[cfg(test)]
mod analyzer;
#[cfg(test)]
mod fixtures;
