//! Demand partner adapters.

pub mod playgroundxyz;
