//! Allowed character set
//!
//! A 256-bit membership bitmap evaluated at compile time. The protocol
//! allow-list is a `static`, so lookups never lock.

/// Byte membership set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSet {
    bits: [u64; 4],
}

/// Latin-1 letters and symbols the client font can draw
const LATIN1_EXTRAS: &[u8] = &[
    0xC7, 0xFC, 0xE9, 0xE2, 0xE4, 0xE0, 0xE5, 0xE7, 0xEA, 0xEB, 0xE8, 0xEF, 0xEE, 0xEC, 0xC4, 0xC5,
    0xC9, 0xE6, 0xC6, 0xF4, 0xF6, 0xF2, 0xFB, 0xF9, 0xFF, 0xD6, 0xDC, 0xF8, 0xA3, 0xD8, 0xD7, 0xE1,
    0xED, 0xF3, 0xFA, 0xF1, 0xD1, 0xAA, 0xBA, 0xBF, 0xAE, 0xAC, 0xBD, 0xBC, 0xA1, 0xAB, 0xBB,
];

/// Characters permitted in protocol strings: printable ASCII except the
/// backtick (0x60), plus `LATIN1_EXTRAS`
pub static ALLOWED: CharSet = CharSet::empty()
    .with_range(0x20, 0x5F)
    .with_range(0x61, 0x7E)
    .with_bytes(LATIN1_EXTRAS);

impl CharSet {
    pub const fn empty() -> Self {
        Self { bits: [0; 4] }
    }

    /// Add every byte in `lo..=hi`
    pub const fn with_range(self, lo: u8, hi: u8) -> Self {
        let mut bits = self.bits;
        let mut b = lo as usize;
        while b <= hi as usize {
            bits[b >> 6] |= 1 << (b & 63);
            b += 1;
        }
        Self { bits }
    }

    /// Add each byte of `bytes`
    pub const fn with_bytes(self, bytes: &[u8]) -> Self {
        let mut bits = self.bits;
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i] as usize;
            bits[b >> 6] |= 1 << (b & 63);
            i += 1;
        }
        Self { bits }
    }

    #[inline]
    pub const fn contains(&self, byte: u8) -> bool {
        let b = byte as usize;
        self.bits[b >> 6] & (1 << (b & 63)) != 0
    }

    /// Offset and value of the first byte outside the set
    pub fn first_invalid(&self, bytes: &[u8]) -> Option<(usize, u8)> {
        bytes
            .iter()
            .position(|&b| !self.contains(b))
            .map(|offset| (offset, bytes[offset]))
    }
}
