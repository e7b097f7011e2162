#[path = "helpers/mod.rs"]
mod helpers;

#[path = "fixtures/mod.rs"]
mod fixtures;

#[path = "indexing/mod.rs"]
mod indexing;
