use std::fmt;

/// A 128-bit fingerprint, as a `(low, high)` pair of 64-bit words.
///
/// Ordering compares `high` first, so it agrees with the ordering of the
/// equivalent `u128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Uint128 {
    pub low: u64,
    pub high: u64,
}

impl Uint128 {
    pub const fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    pub const fn to_u128(self) -> u128 {
        ((self.high as u128) << 64) | self.low as u128
    }

    pub fn to_le_bytes(self) -> [u8; 16] {
        self.to_u128().to_le_bytes()
    }
}

impl PartialOrd for Uint128 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uint128 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.high, self.low).cmp(&(other.high, other.low))
    }
}

impl From<u128> for Uint128 {
    fn from(n: u128) -> Self {
        Self::new(n as u64, (n >> 64) as u64)
    }
}

impl From<Uint128> for u128 {
    fn from(n: Uint128) -> Self {
        n.to_u128()
    }
}

impl From<(u64, u64)> for Uint128 {
    fn from((low, high): (u64, u64)) -> Self {
        Self::new(low, high)
    }
}

impl From<Uint128> for (u64, u64) {
    fn from(n: Uint128) -> Self {
        (n.low, n.high)
    }
}

impl fmt::Display for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.high, self.low)
    }
}

impl fmt::LowerHex for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.to_u128(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u128_round_trip_keeps_word_order() {
        let n = Uint128::new(0x1111, 0x2222);
        let wide: u128 = n.into();
        assert_eq!(wide, (0x2222u128 << 64) | 0x1111);
        assert_eq!(Uint128::from(wide), n);
    }

    #[test]
    fn tuple_conversion() {
        let n = Uint128::from((3, 4));
        assert_eq!(n.low, 3);
        assert_eq!(n.high, 4);
        assert_eq!(<(u64, u64)>::from(n), (3, 4));
    }

    #[test]
    fn ordering_matches_u128() {
        let a = Uint128::new(u64::MAX, 0);
        let b = Uint128::new(0, 1);
        assert!(a < b);
        assert_eq!(a.cmp(&b), a.to_u128().cmp(&b.to_u128()));
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn display_is_zero_padded_high_then_low() {
        let n = Uint128::new(0xab, 0x1);
        assert_eq!(
            n.to_string(),
            "000000000000000100000000000000ab"
        );
        assert_eq!(format!("{:x}", n), "100000000000000ab");
    }

    #[test]
    fn le_bytes_put_low_word_first() {
        let bytes = Uint128::new(0x0807060504030201, 0x100f0e0d0c0b0a09).to_le_bytes();
        assert_eq!(bytes, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]);
    }
}
