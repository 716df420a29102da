//! Multi-panel charts of the thermodynamic observables produced by an Ising
//! Monte Carlo sweep: load header-less tables, lay panels out on a fixed
//! grid, bind columns to panels, then show or export the figures.

pub mod app;
pub mod binder;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod figures;
pub mod layout;
pub mod render;
pub mod state;
pub mod ui;
