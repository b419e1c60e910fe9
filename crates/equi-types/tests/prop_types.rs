// ─────────────────────────────────────────────────────────────────────
// SCPN Spectral Equilibrium — Property-Based Tests (proptest) for equi-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for equi-types using proptest.
//!
//! Covers: mode-table ordering and closed-form lookup, convolution-table
//! index/normalization invariants.

use equi_types::modes::{ConvolutionTable, ModeTable};
use proptest::prelude::*;

proptest! {
    /// index_of is the exact inverse of the table enumeration.
    #[test]
    fn mode_lookup_roundtrip(mpol in 1usize..6, ntor in 0usize..5) {
        let modes = ModeTable::new(mpol, ntor);
        prop_assert_eq!(modes.len(), ntor + 1 + mpol * (2 * ntor + 1));
        prop_assert_eq!((modes.m(0), modes.n(0)), (0, 0));
        for k in 0..modes.len() {
            prop_assert_eq!(modes.index_of(modes.m(k) as i64, modes.n(k)), Some(k));
        }
    }

    /// Every sum/difference of two base modes resolves on the extended
    /// table, with |norm| = 2 and the correct reflection semantics.
    #[test]
    fn convolution_table_is_total_and_signed(mpol in 1usize..5, ntor in 0usize..4) {
        let modes = ModeTable::new(mpol, ntor);
        let ext = modes.extended();
        let conv = ConvolutionTable::build(&modes, &ext).unwrap();

        for ii in 0..modes.len() {
            for jj in 0..modes.len() {
                let (mi, ni) = (modes.m(ii) as i64, modes.n(ii));
                let (mj, nj) = (modes.m(jj) as i64, modes.n(jj));

                let ks = conv.sum_index[[ii, jj]];
                prop_assert_eq!(ext.m(ks) as i64, mi + mj);
                prop_assert_eq!(ext.n(ks), ni + nj);
                prop_assert_eq!(conv.sum_norm[[ii, jj]], 2.0);

                let kd = conv.diff_index[[ii, jj]];
                let (md, nd) = (mi - mj, ni - nj);
                if md < 0 || (md == 0 && nd < 0) {
                    prop_assert_eq!(ext.m(kd) as i64, -md);
                    prop_assert_eq!(ext.n(kd), -nd);
                    prop_assert_eq!(conv.diff_norm[[ii, jj]], -2.0);
                } else {
                    prop_assert_eq!(ext.m(kd) as i64, md);
                    prop_assert_eq!(ext.n(kd), nd);
                    prop_assert_eq!(conv.diff_norm[[ii, jj]], 2.0);
                }

                // transposing the pair maps to the same difference mode
                prop_assert_eq!(conv.diff_index[[jj, ii]], kd);
            }
        }
    }
}
