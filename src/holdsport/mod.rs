//! Holdsport registration service integration

pub mod messages;
pub mod rest;

pub use rest::HoldsportRestClient;
