//! Statistical primitives for sample-size calculation.
//!
//! This module provides:
//! - Normal, Student t and noncentral t distribution helpers
//! - Closed-form single-test power analysis and its inversion
//! - The Benjamini-Hochberg false-discovery-rate correction
//! - Counter-seeded generators for reproducible parallel simulation

mod distributions;
mod fdr;
mod power;
mod rng;

pub use distributions::{
    noncentral_t_cdf, noncentral_t_sf, normal_cdf, normal_isf, normal_sf, sample_noncentral_t,
    student_t_isf, student_t_sf,
};
pub use fdr::{benjamini_hochberg, BenjaminiHochberg, FdrProcedure};
pub use power::{Alternative, PowerFamily};
pub use rng::{counter_rng_seed, task_rng};
