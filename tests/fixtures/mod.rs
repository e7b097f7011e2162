//! Document-level behaviour on small C# fixtures:
//! - Token counts and classes
//! - Links for methods, parameters, locals and extension methods
//! - Reconstruction, overloads and scoping

mod tests_links;
mod tests_properties;
