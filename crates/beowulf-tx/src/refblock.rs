//! Reference-block fields.
//!
//! A transaction embeds the low 16 bits of a recent, already-final block
//! height plus a 32-bit slice of that block's hash. Together they bind the
//! transaction to observed chain state: it cannot replay against a fork or
//! stale history that never produced that block.

use crate::TxError;

/// Low 16 bits of the referenced block height.
pub fn ref_block_num(head_block_num: u32) -> u16 {
    (head_block_num & 0xFFFF) as u16
}

/// Bytes 4..8 of the hex block id, read as a little-endian u32.
pub fn ref_block_prefix(block_id: &str) -> Result<u32, TxError> {
    let raw = hex::decode(block_id).map_err(|_| TxError::InvalidBlockId(block_id.to_string()))?;
    if raw.len() < 8 {
        return Err(TxError::InvalidBlockId(block_id.to_string()));
    }
    let mut prefix = [0u8; 4];
    prefix.copy_from_slice(&raw[4..8]);
    Ok(u32::from_le_bytes(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_block_num_masks_low_16_bits() {
        assert_eq!(ref_block_num(0), 0);
        assert_eq!(ref_block_num(0xFFFF), 0xFFFF);
        assert_eq!(ref_block_num(0x1_0000), 0);
        assert_eq!(ref_block_num(0xABCD_1234), 0x1234);
    }

    #[test]
    fn test_ref_block_prefix_reads_bytes_4_to_8() {
        // 00010203 04050607 ...
        let block_id = "000102030405060708090a0b0c0d0e0f";
        assert_eq!(ref_block_prefix(block_id).unwrap(), 0x07060504);
    }

    #[test]
    fn test_ref_block_prefix_rejects_bad_input() {
        assert!(matches!(
            ref_block_prefix("zzzz"),
            Err(TxError::InvalidBlockId(_))
        ));
        assert!(matches!(
            ref_block_prefix("0011223344"),
            Err(TxError::InvalidBlockId(_))
        ));
    }
}
