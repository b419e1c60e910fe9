// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Interface Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fourier representation of the nested interfaces and the coordinate
//! axis. Column 0 of every coefficient array is the reserved axis slot;
//! column v bounds sub-volume v.

use ndarray::{Array1, Array2};

/// Fourier coefficients of a single closed surface (or of the axis,
/// where only the m = 0 family is populated).
#[derive(Debug, Clone, PartialEq)]
pub struct FourierSurface {
    pub r_cos: Array1<f64>,
    pub r_sin: Array1<f64>,
    pub z_cos: Array1<f64>,
    pub z_sin: Array1<f64>,
}

impl FourierSurface {
    pub fn zeros(mn: usize) -> Self {
        FourierSurface {
            r_cos: Array1::zeros(mn),
            r_sin: Array1::zeros(mn),
            z_cos: Array1::zeros(mn),
            z_sin: Array1::zeros(mn),
        }
    }

    pub fn mn(&self) -> usize {
        self.r_cos.len()
    }
}

/// All interface coefficients of one equilibrium, shape (mn, nvol + 1).
#[derive(Debug, Clone)]
pub struct SurfaceGeometry {
    pub mn: usize,
    pub nvol: usize,
    pub r_cos: Array2<f64>,
    pub r_sin: Array2<f64>,
    pub z_cos: Array2<f64>,
    pub z_sin: Array2<f64>,
}

impl SurfaceGeometry {
    pub fn new(mn: usize, nvol: usize) -> Self {
        SurfaceGeometry {
            mn,
            nvol,
            r_cos: Array2::zeros((mn, nvol + 1)),
            r_sin: Array2::zeros((mn, nvol + 1)),
            z_cos: Array2::zeros((mn, nvol + 1)),
            z_sin: Array2::zeros((mn, nvol + 1)),
        }
    }

    /// Clone out one column; v = 0 is the axis slot.
    pub fn surface(&self, v: usize) -> FourierSurface {
        FourierSurface {
            r_cos: self.r_cos.column(v).to_owned(),
            r_sin: self.r_sin.column(v).to_owned(),
            z_cos: self.z_cos.column(v).to_owned(),
            z_sin: self.z_sin.column(v).to_owned(),
        }
    }

    pub fn set_surface(&mut self, v: usize, s: &FourierSurface) {
        self.r_cos.column_mut(v).assign(&s.r_cos);
        self.r_sin.column_mut(v).assign(&s.r_sin);
        self.z_cos.column_mut(v).assign(&s.z_cos);
        self.z_sin.column_mut(v).assign(&s.z_sin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_roundtrip_through_column() {
        let mut geom = SurfaceGeometry::new(5, 2);
        let mut s = FourierSurface::zeros(5);
        s.r_cos[0] = 3.0;
        s.z_sin[2] = -0.25;
        geom.set_surface(1, &s);
        assert_eq!(geom.surface(1), s);
        // the axis slot stays untouched
        assert_eq!(geom.surface(0), FourierSurface::zeros(5));
    }
}
