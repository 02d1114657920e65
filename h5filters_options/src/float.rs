//! Packing of IEEE-754 doubles into pairs of `u32` option words.

/// Pack a double into `[high, low]` words of its big-endian representation.
///
/// This is the layout used by the SZ and SZ3 filters.
#[must_use]
pub fn pack_f64_be(value: f64) -> [u32; 2] {
    let b = value.to_be_bytes();
    [
        u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
        u32::from_be_bytes([b[4], b[5], b[6], b[7]]),
    ]
}

/// Unpack a double packed with [`pack_f64_be`].
#[must_use]
pub fn unpack_f64_be(words: [u32; 2]) -> f64 {
    let [h0, h1, h2, h3] = words[0].to_be_bytes();
    let [l0, l1, l2, l3] = words[1].to_be_bytes();
    f64::from_be_bytes([h0, h1, h2, h3, l0, l1, l2, l3])
}

/// Pack a double into two words holding its in-memory representation.
///
/// The first word holds the first four bytes of the double in memory, so the word order depends on the target endianness.
/// This matches a `memcpy` of a `double` into an `unsigned int[2]`, the layout used by the zfp filter.
#[must_use]
pub fn pack_f64_ne(value: f64) -> [u32; 2] {
    let b = value.to_ne_bytes();
    [
        u32::from_ne_bytes([b[0], b[1], b[2], b[3]]),
        u32::from_ne_bytes([b[4], b[5], b[6], b[7]]),
    ]
}

/// Unpack a double packed with [`pack_f64_ne`].
#[must_use]
pub fn unpack_f64_ne(words: [u32; 2]) -> f64 {
    let [a0, a1, a2, a3] = words[0].to_ne_bytes();
    let [b0, b1, b2, b3] = words[1].to_ne_bytes();
    f64::from_ne_bytes([a0, a1, a2, a3, b0, b1, b2, b3])
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: [f64; 12] = [
        0.0,
        -0.0,
        1.0,
        -1.5,
        1e-5,
        1e-4,
        f64::MIN_POSITIVE,
        5e-324, // smallest subnormal
        -2.225_073_858_507_201e-308, // largest negative subnormal
        f64::MAX,
        f64::MIN,
        f64::EPSILON,
    ];

    #[test]
    fn pack_be_known_value() {
        // 1.0 is 0x3FF0_0000_0000_0000
        assert_eq!(pack_f64_be(1.0), [0x3FF0_0000, 0]);
        // 0.1 is 0x3FB9_9999_9999_999A
        assert_eq!(pack_f64_be(0.1), [0x3FB9_9999, 0x9999_999A]);
        assert_eq!(pack_f64_be(-0.0), [0x8000_0000, 0]);
    }

    #[test]
    fn pack_be_bit_exact() {
        for value in VALUES {
            let unpacked = unpack_f64_be(pack_f64_be(value));
            assert_eq!(unpacked.to_bits(), value.to_bits(), "{value:e}");
        }
    }

    #[test]
    fn pack_ne_bit_exact() {
        for value in VALUES {
            let unpacked = unpack_f64_ne(pack_f64_ne(value));
            assert_eq!(unpacked.to_bits(), value.to_bits(), "{value:e}");
        }
    }

    #[test]
    fn pack_be_bit_patterns() {
        let mut bits: u64 = 0;
        for _ in 0..100_000 {
            bits = bits.wrapping_add(0x0001_A3C5_F1E2_D3B7);
            let value = f64::from_bits(bits);
            if value.is_finite() {
                assert_eq!(unpack_f64_be(pack_f64_be(value)).to_bits(), bits);
            }
        }
    }

    #[test]
    fn pack_ne_word_order() {
        let [high, low] = pack_f64_be(10.0);
        if cfg!(target_endian = "little") {
            assert_eq!(pack_f64_ne(10.0), [low, high]);
        } else {
            assert_eq!(pack_f64_ne(10.0), [high, low]);
        }
    }
}
