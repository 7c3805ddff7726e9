//! Account-level composition of the chain API and resource accounting.

pub mod facade;

pub use facade::AccountFacade;
