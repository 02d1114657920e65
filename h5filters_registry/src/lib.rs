//! The HDF5 filter registry for the `h5filters` crate.
//!
//! Lists the names and HDF5 filter identifiers of every filter plugin `h5filters` knows how to configure and register.
//!
//! ## Licence
//! `h5filters_registry` is licensed under either of
//!  - the Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> or
//!  - the MIT license <http://opensource.org/licenses/MIT>, at your option.

pub mod filter;

use filter::{
    BLOSC, BLOSC2, BLOSC2_ID, BLOSC_ID, BSHUF, BSHUF_ID, BZIP2, BZIP2_ID, FCIDECOMP, FCIDECOMP_ID,
    LZ4, LZ4_ID, SPERR, SPERR_ID, SZ, SZ3, SZ3_ID, SZ_ID, ZFP, ZFP_ID, ZSTD, ZSTD_ID,
};

/// Every known filter as `(name, filter_id)`, in registration order.
pub const FILTERS: &[(&str, u32)] = &[
    (BSHUF, BSHUF_ID),
    (BLOSC, BLOSC_ID),
    (BLOSC2, BLOSC2_ID),
    (BZIP2, BZIP2_ID),
    (FCIDECOMP, FCIDECOMP_ID),
    (LZ4, LZ4_ID),
    (SPERR, SPERR_ID),
    (SZ, SZ_ID),
    (SZ3, SZ3_ID),
    (ZFP, ZFP_ID),
    (ZSTD, ZSTD_ID),
];

/// Return the HDF5 filter identifier of the filter named `name`.
#[must_use]
pub fn filter_id(name: &str) -> Option<u32> {
    FILTERS
        .iter()
        .find_map(|(filter_name, id)| (*filter_name == name).then_some(*id))
}

/// Return the name of the filter with the HDF5 filter identifier `filter_id`.
#[must_use]
pub fn filter_name(filter_id: u32) -> Option<&'static str> {
    FILTERS
        .iter()
        .find_map(|(name, id)| (*id == filter_id).then_some(*name))
}

/// Return an iterator over the names of all known filters.
pub fn filter_names() -> impl Iterator<Item = &'static str> {
    FILTERS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn filters_unique() {
        let names: HashSet<_> = FILTERS.iter().map(|(name, _)| name).collect();
        let ids: HashSet<_> = FILTERS.iter().map(|(_, id)| id).collect();
        assert_eq!(names.len(), FILTERS.len());
        assert_eq!(ids.len(), FILTERS.len());
    }

    #[test]
    fn filter_lookup() {
        assert_eq!(filter_id("blosc"), Some(32001));
        assert_eq!(filter_id("bzip2"), Some(307));
        assert_eq!(filter_id("unknown"), None);
        assert_eq!(filter_name(32024), Some("sz3"));
        assert_eq!(filter_name(1), None);
        assert_eq!(filter_names().count(), 11);
    }
}
