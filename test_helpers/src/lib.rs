//! Test helpers shared across the workspace crates.
//!
//! [`tree::ConfigTree`] builds throwaway directory trees holding candidate
//! configuration files, and [`cwd`] serialises tests that change the process
//! working directory.

pub mod cwd;
pub mod tree;
