/// Fletcher-32 over a byte slice.
///
/// Both running sums are reduced modulo 65535 after every byte and the result
/// is `(sum2 << 16) | sum1`. This is the checksum stored in the file header.
pub fn fletcher32(data: &[u8]) -> u32 {
    const MODULUS: u32 = u16::MAX as u32;

    let mut sum1: u32 = 0;
    let mut sum2: u32 = 0;

    for &byte in data {
        sum1 = (sum1 + byte as u32) % MODULUS;
        sum2 = (sum2 + sum1) % MODULUS;
    }

    (sum2 << 16) | sum1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_zeroed_input() {
        assert_eq!(fletcher32(&[]), 0);
        assert_eq!(fletcher32(&[0; 4096]), 0);
    }

    #[test]
    fn test_known_values() {
        // sum1 = 1+2+3 = 6, sum2 = 1+3+6 = 10
        assert_eq!(fletcher32(&[1, 2, 3]), (10 << 16) | 6);
        // sum1 = 495, sum2 = 1475
        assert_eq!(fletcher32(b"abcde"), 0x05C3_01EF);
    }

    #[test]
    fn test_sums_wrap_at_65535() {
        let data = vec![0xFF; 1024];
        let checksum = fletcher32(&data);
        assert!(checksum & 0xFFFF < 65535);
        assert!(checksum >> 16 < 65535);
    }

    #[test]
    fn test_single_byte_flip_is_detected() {
        let mut data = vec![0x5A; 512];
        let before = fletcher32(&data);
        data[300] ^= 0x01;
        assert_ne!(fletcher32(&data), before);
    }
}
