// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Fourier Mode Tables
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ordered (poloidal, toroidal) mode tables and the convolution index
//! tables that reduce products of two angular harmonics to sum and
//! difference harmonics.
//!
//! Every Fourier-coefficient array in the solver is indexed by one fixed
//! table order: m = 0 with n = 0..ntor first, then m = 1..mpol each with
//! n = -ntor..ntor. Mode 0 is always (0, 0). Toroidal mode numbers are
//! stored per field period.

use crate::constants::PI2;
use crate::error::{EquiError, EquiResult};
use ndarray::{Array1, Array2};

#[derive(Debug, Clone)]
pub struct ModeTable {
    pub mpol: usize,
    pub ntor: usize,
    m: Vec<usize>,
    n: Vec<i64>,
}

impl ModeTable {
    pub fn new(mpol: usize, ntor: usize) -> Self {
        let mut m = Vec::new();
        let mut n = Vec::new();
        for nn in 0..=ntor as i64 {
            m.push(0);
            n.push(nn);
        }
        for mm in 1..=mpol {
            for nn in -(ntor as i64)..=ntor as i64 {
                m.push(mm);
                n.push(nn);
            }
        }
        ModeTable { mpol, ntor, m, n }
    }

    /// Doubled-truncation table indexing the metric Fourier fields, so the
    /// sum and difference of any two base modes always resolves.
    pub fn extended(&self) -> ModeTable {
        ModeTable::new(2 * self.mpol, 2 * self.ntor)
    }

    pub fn len(&self) -> usize {
        self.m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.m.is_empty()
    }

    pub fn m(&self, k: usize) -> usize {
        self.m[k]
    }

    pub fn n(&self, k: usize) -> i64 {
        self.n[k]
    }

    /// Table position of (m, n); closed-form, no search.
    pub fn index_of(&self, m: i64, n: i64) -> Option<usize> {
        let ntor = self.ntor as i64;
        if m < 0 || m > self.mpol as i64 {
            return None;
        }
        if m == 0 {
            if !(0..=ntor).contains(&n) {
                return None;
            }
            return Some(n as usize);
        }
        if !(-ntor..=ntor).contains(&n) {
            return None;
        }
        let base = self.ntor + 1 + (m as usize - 1) * (2 * self.ntor + 1);
        Some(base + (n + ntor) as usize)
    }

    /// Poloidal integration weights: 2π on the m = 0 family, zero
    /// elsewhere. Multiplying a harmonic array by these weights performs
    /// the poloidal-average extraction used by the axis constructor.
    pub fn poloidal_weights(&self) -> Array1<f64> {
        Array1::from_iter(self.m.iter().map(|&mm| if mm == 0 { PI2 } else { 0.0 }))
    }
}

/// Sum/difference convolution indices for every ordered base-mode pair,
/// resolved on the extended table, with signed normalizations.
///
/// The normalization magnitude is 2 (each double-angle identity splits a
/// product into two half-weight harmonics); the sign records whether the
/// difference mode had to be reflected through the origin, which flips
/// its sine channel.
#[derive(Debug, Clone)]
pub struct ConvolutionTable {
    pub sum_index: Array2<usize>,
    pub diff_index: Array2<usize>,
    pub sum_norm: Array2<f64>,
    pub diff_norm: Array2<f64>,
}

impl ConvolutionTable {
    pub fn build(base: &ModeTable, extended: &ModeTable) -> EquiResult<Self> {
        let mn = base.len();
        let mut sum_index = Array2::zeros((mn, mn));
        let mut diff_index = Array2::zeros((mn, mn));
        let mut sum_norm = Array2::zeros((mn, mn));
        let mut diff_norm = Array2::zeros((mn, mn));

        for ii in 0..mn {
            let (mi, ni) = (base.m(ii) as i64, base.n(ii));
            for jj in 0..mn {
                let (mj, nj) = (base.m(jj) as i64, base.n(jj));

                let (ms, ns) = (mi + mj, ni + nj);
                sum_index[[ii, jj]] = extended
                    .index_of(ms, ns)
                    .ok_or(EquiError::ModeOutOfRange { m: ms, n: ns })?;
                sum_norm[[ii, jj]] = 2.0;

                let (md, nd) = (mi - mj, ni - nj);
                let reflected = md < 0 || (md == 0 && nd < 0);
                let (md, nd) = if reflected { (-md, -nd) } else { (md, nd) };
                diff_index[[ii, jj]] = extended
                    .index_of(md, nd)
                    .ok_or(EquiError::ModeOutOfRange { m: md, n: nd })?;
                diff_norm[[ii, jj]] = if reflected { -2.0 } else { 2.0 };
            }
        }

        Ok(ConvolutionTable {
            sum_index,
            diff_index,
            sum_norm,
            diff_norm,
        })
    }
}
