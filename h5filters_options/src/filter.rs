//! Filter configurations.
//!
//! | Filter | Identifier | `compression_opts` |
//! |---|---|---|
//! | [`blosc`] | 32001 | `0, 0, 0, 0, clevel, shuffle, compressor` |
//! | [`blosc2`] | 32026 | `0, 0, 0, 0, clevel, filters, compressor` |
//! | [`bitshuffle`] | 32008 | `nelems, compressor[, clevel]` |
//! | [`lz4`] | 32004 | `nbytes` |
//! | [`bzip2`] | 307 | `blocksize` |
//! | [`zfp`] | 32013 | `mode, 0, a, b, c, d` |
//! | [`sz`] | 32017 | `mode, absolute, relative, pointwise_relative, psnr` (packed doubles) |
//! | [`sz3`] | 32024 | `mode, absolute, relative, norm2, psnr` (packed doubles) |
//! | [`sperr`] | 32028 | fixed-point packed mode and quality |
//! | [`fcidecomp`] | 32018 | none |
//! | [`zstd`] | 32015 | `clevel` |

pub mod bitshuffle;
pub mod blosc;
pub mod blosc2;
pub mod bzip2;
pub mod fcidecomp;
pub mod lz4;
pub mod sperr;
pub mod sz;
pub mod sz3;
pub mod zfp;
pub mod zstd;
