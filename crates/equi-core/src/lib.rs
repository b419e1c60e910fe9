//! Basis-interaction integral assembly and coordinate-axis construction
//! for the spectral equilibrium solver.
//!
//! `assembly` builds the volume-integrated basis/metric interaction
//! tensors consumed by the outer force/Hessian evaluator; `axis` derives
//! the coordinate-axis geometry from a bounding interface and propagates
//! its sensitivity to the interface harmonics.

pub mod assembly;
pub mod axis;
pub mod coords;
pub mod metric;
