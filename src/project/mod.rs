//! Solution metadata and discovery.
//!
//! A [`Solution`] is the input of an indexing run. Build one by hand, or let
//! [`SolutionLoader`] discover projects and sources from a directory.

mod loader;
mod solution;

pub use loader::SolutionLoader;
pub use solution::{Project, ReadError, Solution, SourceDocument, solution_name};

#[cfg(test)]
mod tests;
