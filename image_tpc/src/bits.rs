const LOG2_TABLE: [u32; 32] = [
    0, 9, 1, 10, 13, 21, 2, 29, 11, 14, 16, 18, 22, 25, 3, 30, 8, 12, 20, 28, 15, 17, 24, 7, 19,
    27, 23, 6, 26, 5, 4, 31,
];

/// The base 2 logarithm of `value` rounded down.
///
/// Returns `0` for both `0` and `1`.
pub fn int_log2(mut value: u32) -> u32 {
    // Set all bits below the highest set bit.
    value |= value >> 1;
    value |= value >> 2;
    value |= value >> 4;
    value |= value >> 8;
    value |= value >> 16;
    LOG2_TABLE[(value.wrapping_mul(0x07C4ACDD) >> 27) as usize]
}

/// Interleave the low `x_bits` bits of `x` with the low `y_bits` bits of `y`.
///
/// Bits alternate starting with `x` at bit 0.
/// Once either input runs out of bits, the remaining bits come from the other input.
pub fn interleave_bits(mut x: u32, mut y: u32, mut x_bits: u32, mut y_bits: u32) -> u32 {
    let mut value = 0;
    let mut shift = 0;

    while (x_bits | y_bits) != 0 {
        if x_bits != 0 {
            value |= (x & 0x01) << shift;
            x >>= 1;
            shift += 1;
            x_bits -= 1;
        }

        if y_bits != 0 {
            value |= (y & 0x01) << shift;
            y >>= 1;
            shift += 1;
            y_bits -= 1;
        }
    }

    value
}
