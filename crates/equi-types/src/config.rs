// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{EquiError, EquiResult};

/// Dimensionality of the configuration-space geometry. Slab and
/// cylindrical geometries have no toroidal curvature, so the coordinate
/// axis degenerates to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    Slab,
    Cylindrical,
    Toroidal,
}

/// Strategy for deriving the coordinate axis from the innermost
/// interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisMethod {
    /// Arc-length-weighted poloidal centroid of the interface.
    Centroid,
    /// Eliminate the m = 1 poloidal harmonic of the surface Jacobian via
    /// a small dense solve over the low-order toroidal harmonics.
    JacobianElimination,
}

/// Radial discretization of a single sub-volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Radial polynomial order.
    pub lrad: usize,
    /// Gauss-Legendre quadrature count for the radial integral.
    pub lquad: usize,
}

/// Discretization parameters shared by the integral assembler and the
/// axis constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquilibriumConfig {
    pub geometry: GeometryKind,
    pub stellarator_symmetric: bool,
    /// Poloidal truncation of the base mode table.
    pub mpol: usize,
    /// Toroidal truncation of the base mode table, per field period.
    pub ntor: usize,
    /// Number of field periods.
    pub nfp: usize,
    /// Poloidal grid resolution of the angular transforms.
    pub n_theta: usize,
    /// Toroidal grid resolution of the angular transforms.
    pub n_zeta: usize,
    /// Per-volume radial discretization, innermost first.
    pub volumes: Vec<VolumeConfig>,
    pub axis_method: AxisMethod,
}

impl EquilibriumConfig {
    pub fn from_file(path: &str) -> EquiResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EquiResult<()> {
        if self.nfp < 1 {
            return Err(EquiError::ConfigError("nfp must be >= 1".to_string()));
        }
        if self.volumes.is_empty() {
            return Err(EquiError::ConfigError(
                "at least one volume is required".to_string(),
            ));
        }
        if self.n_theta <= 2 * self.mpol {
            return Err(EquiError::ConfigError(format!(
                "n_theta={} aliases mpol={}; require n_theta > 2*mpol",
                self.n_theta, self.mpol
            )));
        }
        if self.n_zeta <= 2 * self.ntor {
            return Err(EquiError::ConfigError(format!(
                "n_zeta={} aliases ntor={}; require n_zeta > 2*ntor",
                self.n_zeta, self.ntor
            )));
        }
        for (v, vol) in self.volumes.iter().enumerate() {
            if vol.lquad < 1 {
                return Err(EquiError::ConfigError(format!(
                    "volume {v}: lquad must be >= 1"
                )));
            }
            if vol.lrad < 1 {
                return Err(EquiError::ConfigError(format!(
                    "volume {v}: lrad must be >= 1"
                )));
            }
        }
        // the innermost volume carries the coordinate singularity and its
        // Zernike basis needs degrees up to the poloidal truncation
        if self.volumes[0].lrad < self.mpol {
            return Err(EquiError::ConfigError(format!(
                "innermost lrad={} < mpol={}; Zernike basis would truncate",
                self.volumes[0].lrad, self.mpol
            )));
        }
        Ok(())
    }
}
