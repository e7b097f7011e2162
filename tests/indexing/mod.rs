//! Whole indexing runs: solutions, loaders, skipped documents, references.

mod tests_indexer;
mod tests_loader;
mod tests_references;
