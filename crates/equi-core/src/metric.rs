// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Metric Harmonic Fields
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fourier amplitudes of the Jacobian-normalized metric elements,
//! supplied per volume and per radial quadrature point by the geometry
//! pipeline. Read-only to the integral assembler.

use equi_types::error::{EquiError, EquiResult};
use ndarray::Array2;

/// The seven physically distinct metric combinations entering the
/// interaction integrals: the inverse-Jacobian volume element and the
/// six independent metric-tensor components, each divided by the
/// Jacobian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricComponent {
    VolumeElement,
    Gss,
    Gst,
    Gsz,
    Gtt,
    Gtz,
    Gzz,
}

impl MetricComponent {
    pub const ALL: [MetricComponent; 7] = [
        MetricComponent::VolumeElement,
        MetricComponent::Gss,
        MetricComponent::Gst,
        MetricComponent::Gsz,
        MetricComponent::Gtt,
        MetricComponent::Gtz,
        MetricComponent::Gzz,
    ];

    pub fn index(self) -> usize {
        match self {
            MetricComponent::VolumeElement => 0,
            MetricComponent::Gss => 1,
            MetricComponent::Gst => 2,
            MetricComponent::Gsz => 3,
            MetricComponent::Gtt => 4,
            MetricComponent::Gtz => 5,
            MetricComponent::Gzz => 6,
        }
    }
}

/// Even (cosine) and odd (sine) metric amplitudes on the extended mode
/// table, shape (mne, lquad) per component.
#[derive(Debug, Clone)]
pub struct MetricHarmonics {
    pub mne: usize,
    pub lquad: usize,
    even: Vec<Array2<f64>>,
    odd: Vec<Array2<f64>>,
}

impl MetricHarmonics {
    pub fn zeros(mne: usize, lquad: usize) -> Self {
        MetricHarmonics {
            mne,
            lquad,
            even: (0..7).map(|_| Array2::zeros((mne, lquad))).collect(),
            odd: (0..7).map(|_| Array2::zeros((mne, lquad))).collect(),
        }
    }

    pub fn even(&self, c: MetricComponent) -> &Array2<f64> {
        &self.even[c.index()]
    }

    pub fn odd(&self, c: MetricComponent) -> &Array2<f64> {
        &self.odd[c.index()]
    }

    pub fn even_mut(&mut self, c: MetricComponent) -> &mut Array2<f64> {
        &mut self.even[c.index()]
    }

    pub fn odd_mut(&mut self, c: MetricComponent) -> &mut Array2<f64> {
        &mut self.odd[c.index()]
    }
}

/// Per-volume cache of metric harmonics. Geometry updates invalidate a
/// volume; the assembler refreshes it through the supplier on demand.
#[derive(Debug, Default)]
pub struct MetricCache {
    slots: Vec<Option<MetricHarmonics>>,
}

impl MetricCache {
    pub fn new(nvol: usize) -> Self {
        MetricCache {
            slots: (0..=nvol).map(|_| None).collect(),
        }
    }

    pub fn invalidate(&mut self, lvol: usize) {
        self.slots[lvol] = None;
    }

    pub fn invalidate_all(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// Return the cached harmonics for a volume, computing them through
    /// `supplier` if stale.
    pub fn ensure<F>(&mut self, lvol: usize, supplier: F) -> EquiResult<&MetricHarmonics>
    where
        F: FnOnce() -> EquiResult<MetricHarmonics>,
    {
        if lvol >= self.slots.len() {
            return Err(EquiError::GeometryViolation(format!(
                "metric cache has {} volumes, requested {lvol}",
                self.slots.len().saturating_sub(1)
            )));
        }
        if self.slots[lvol].is_none() {
            self.slots[lvol] = Some(supplier()?);
        }
        Ok(self.slots[lvol].as_ref().unwrap())
    }
}
