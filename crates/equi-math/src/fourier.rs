// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Angular Transform Pair
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Forward/inverse transforms between the uniform poloidal-toroidal grid
//! and mode-table harmonic pairs.
//!
//! Fields live on the flattened grid p = i_theta * n_zeta + i_zeta with
//! theta_i = 2π i / n_theta and the per-period toroidal angle
//! zeta_j = 2π j / n_zeta. Harmonic k multiplies cos/sin of
//! alpha_k = m_k θ - n_k ζ. The forward transform is the exact inverse
//! of the inverse transform for fields band-limited to the table
//! (n_theta > 2 mpol, n_zeta > 2 ntor, enforced by config validation).
//!
//! Convention: the (0,0) cosine amplitude is the grid mean; every other
//! amplitude is a plain cos/sin amplitude.

use equi_types::modes::ModeTable;
use ndarray::{Array1, Array2, ArrayView1};

/// Cosine/sine amplitude pair over one mode table.
#[derive(Debug, Clone, PartialEq)]
pub struct Harmonics {
    pub cos: Array1<f64>,
    pub sin: Array1<f64>,
}

impl Harmonics {
    pub fn zeros(mn: usize) -> Self {
        Harmonics {
            cos: Array1::zeros(mn),
            sin: Array1::zeros(mn),
        }
    }

    pub fn mn(&self) -> usize {
        self.cos.len()
    }
}

/// Precomputed trig tables for one (mode table, grid) pairing.
#[derive(Debug, Clone)]
pub struct AngularTransform {
    pub n_theta: usize,
    pub n_zeta: usize,
    cos_table: Array2<f64>,
    sin_table: Array2<f64>,
}

impl AngularTransform {
    pub fn new(modes: &ModeTable, n_theta: usize, n_zeta: usize) -> Self {
        let ntz = n_theta * n_zeta;
        let mn = modes.len();
        let mut cos_table = Array2::zeros((ntz, mn));
        let mut sin_table = Array2::zeros((ntz, mn));

        for it in 0..n_theta {
            let theta = 2.0 * std::f64::consts::PI * it as f64 / n_theta as f64;
            for iz in 0..n_zeta {
                let zeta = 2.0 * std::f64::consts::PI * iz as f64 / n_zeta as f64;
                let p = it * n_zeta + iz;
                for k in 0..mn {
                    let alpha = modes.m(k) as f64 * theta - modes.n(k) as f64 * zeta;
                    cos_table[[p, k]] = alpha.cos();
                    sin_table[[p, k]] = alpha.sin();
                }
            }
        }

        AngularTransform {
            n_theta,
            n_zeta,
            cos_table,
            sin_table,
        }
    }

    pub fn grid_len(&self) -> usize {
        self.n_theta * self.n_zeta
    }

    pub fn mn(&self) -> usize {
        self.cos_table.ncols()
    }

    /// cos(alpha_k) on the grid, one column of the internal table.
    pub fn mode_cos(&self, k: usize) -> ArrayView1<'_, f64> {
        self.cos_table.column(k)
    }

    /// sin(alpha_k) on the grid.
    pub fn mode_sin(&self, k: usize) -> ArrayView1<'_, f64> {
        self.sin_table.column(k)
    }

    /// Forward transform: grid field to harmonic amplitudes.
    pub fn analyze(&self, field: &Array1<f64>) -> Harmonics {
        let ntz = self.grid_len();
        debug_assert_eq!(field.len(), ntz);
        let mn = self.mn();
        let mut h = Harmonics::zeros(mn);

        for k in 0..mn {
            let mut c = 0.0;
            let mut s = 0.0;
            for p in 0..ntz {
                c += field[p] * self.cos_table[[p, k]];
                s += field[p] * self.sin_table[[p, k]];
            }
            let factor = if k == 0 { 1.0 } else { 2.0 } / ntz as f64;
            h.cos[k] = c * factor;
            h.sin[k] = s * factor;
        }
        h.sin[0] = 0.0;
        h
    }

    /// Inverse transform: harmonic amplitudes to grid field.
    pub fn synthesize(&self, h: &Harmonics) -> Array1<f64> {
        let ntz = self.grid_len();
        let mn = self.mn();
        debug_assert_eq!(h.mn(), mn);
        let mut field = Array1::zeros(ntz);

        for p in 0..ntz {
            let mut v = 0.0;
            for k in 0..mn {
                v += h.cos[k] * self.cos_table[[p, k]] + h.sin[k] * self.sin_table[[p, k]];
            }
            field[p] = v;
        }
        field
    }
}
