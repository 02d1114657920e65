//! HDF5 filter names and identifiers.
//!
//! Filter identifiers are registered with The HDF Group and persisted inside every file written with the filter.
//! They must never change.

/// Name of the `blosc` filter.
pub const BLOSC: &str = "blosc";
/// Identifier of the `blosc` filter.
pub const BLOSC_ID: u32 = 32001;

/// Name of the `blosc2` filter.
pub const BLOSC2: &str = "blosc2";
/// Identifier of the `blosc2` filter.
pub const BLOSC2_ID: u32 = 32026;

/// Name of the bitshuffle filter.
pub const BSHUF: &str = "bshuf";
/// Identifier of the bitshuffle filter.
pub const BSHUF_ID: u32 = 32008;

/// Name of the `bzip2` filter.
pub const BZIP2: &str = "bzip2";
/// Identifier of the `bzip2` filter.
pub const BZIP2_ID: u32 = 307;

/// Name of the `fcidecomp` filter.
pub const FCIDECOMP: &str = "fcidecomp";
/// Identifier of the `fcidecomp` filter.
pub const FCIDECOMP_ID: u32 = 32018;

/// Name of the `lz4` filter.
pub const LZ4: &str = "lz4";
/// Identifier of the `lz4` filter.
pub const LZ4_ID: u32 = 32004;

/// Name of the `sperr` filter.
pub const SPERR: &str = "sperr";
/// Identifier of the `sperr` filter.
pub const SPERR_ID: u32 = 32028;

/// Name of the `sz` filter.
pub const SZ: &str = "sz";
/// Identifier of the `sz` filter.
pub const SZ_ID: u32 = 32017;

/// Name of the `sz3` filter.
pub const SZ3: &str = "sz3";
/// Identifier of the `sz3` filter.
pub const SZ3_ID: u32 = 32024;

/// Name of the `zfp` filter.
pub const ZFP: &str = "zfp";
/// Identifier of the `zfp` filter.
pub const ZFP_ID: u32 = 32013;

/// Name of the `zstd` filter.
pub const ZSTD: &str = "zstd";
/// Identifier of the `zstd` filter.
pub const ZSTD_ID: u32 = 32015;
