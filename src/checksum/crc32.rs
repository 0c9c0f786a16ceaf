//! Table-driven CRC-32 (reflected, polynomial 0xEDB88320)
//!
//! The classic construction: a 256-entry table where entry `n` is `n` run
//! through 8 rounds of the shift/xor step, and a running state kept in
//! complemented form while a slice is processed. Bit-exact with any
//! standard CRC-32 implementation; the tests cross-validate against
//! `crc32fast`.

/// Reflected CRC-32 polynomial.
const POLYNOMIAL: u32 = 0xedb8_8320;

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 { POLYNOMIAL ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

/// Shared read-only table, built once at compile time.
static CRC_TABLE: [u32; 256] = build_table();

/// Incremental CRC-32 accumulator.
///
/// State starts at 0; [`Crc32::value`] of an empty input is 0. The
/// pre/post complement is folded into every update, so the state is always
/// a valid checksum of the bytes fed so far.
#[derive(Debug, Default, Clone)]
pub struct Crc32 {
    crc: u32,
}

impl Crc32 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the running state to the initial value (0).
    pub fn reset(&mut self) {
        self.crc = 0;
    }

    /// Feeds a single byte into the checksum.
    pub fn update_byte(&mut self, b: u8) {
        let c = !self.crc;
        let c = CRC_TABLE[((c ^ b as u32) & 0xff) as usize] ^ (c >> 8);
        self.crc = !c;
    }

    /// Feeds a slice of bytes into the checksum.
    ///
    /// The complemented accumulator is hoisted out of the loop and the
    /// complement restored once at the end.
    pub fn update(&mut self, bytes: &[u8]) {
        let mut c = !self.crc;
        for &b in bytes {
            c = CRC_TABLE[((c ^ b as u32) & 0xff) as usize] ^ (c >> 8);
        }
        self.crc = !c;
    }

    /// Returns the checksum of all bytes fed since creation or last reset.
    pub fn value(&self) -> u32 {
        self.crc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(bytes: &[u8]) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(bytes);
        hasher.finalize()
    }

    #[test]
    fn test_table_known_entries() {
        assert_eq!(CRC_TABLE[0], 0x0000_0000);
        assert_eq!(CRC_TABLE[1], 0x7707_3096);
        assert_eq!(CRC_TABLE[255], 0x2d02_ef8d);
    }

    #[test]
    fn test_empty_input_is_zero() {
        let crc = Crc32::new();
        assert_eq!(crc.value(), 0);
    }

    #[test]
    fn test_hello_world_known_value() {
        let mut crc = Crc32::new();
        crc.update(b"hello world");
        assert_eq!(crc.value(), 0x0d4a_1185);
    }

    #[test]
    fn test_single_byte_matches_reference() {
        for b in [0x00u8, 0x01, 0x7f, 0xff] {
            let mut crc = Crc32::new();
            crc.update_byte(b);
            assert_eq!(crc.value(), reference(&[b]), "byte {b:#04x}");
        }
    }

    #[test]
    fn test_slice_matches_reference() {
        let data: Vec<u8> = (0..1024u32).map(|i| (i * 31 % 251) as u8).collect();
        let mut crc = Crc32::new();
        crc.update(&data);
        assert_eq!(crc.value(), reference(&data));
    }

    #[test]
    fn test_byte_at_a_time_equals_slice() {
        let data = b"incremental update must not depend on call granularity";
        let mut whole = Crc32::new();
        whole.update(data);

        let mut split = Crc32::new();
        for &b in data.iter() {
            split.update_byte(b);
        }
        assert_eq!(whole.value(), split.value());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut crc = Crc32::new();
        crc.update(b"stale bytes");
        crc.reset();
        assert_eq!(crc.value(), 0);

        crc.update(b"hello world");
        assert_eq!(crc.value(), 0x0d4a_1185);
    }

    #[test]
    fn test_detects_single_bit_flip() {
        let mut data = vec![0x00u8, 0x01, 0x02, 0x03, 0x04];
        let mut original = Crc32::new();
        original.update(&data);

        data[2] ^= 0x01;
        let mut corrupted = Crc32::new();
        corrupted.update(&data);

        assert_ne!(original.value(), corrupted.value());
    }
}
