/// Single operand field of an opcode.
pub type Idx = u8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("jump distance {0} does not fit in two operand fields")]
    DistanceTooLarge(usize),
}

/// Combines a high/low operand pair into one forward distance.
#[inline(always)]
pub fn decode_distance(hi: Idx, lo: Idx) -> usize {
    ((hi as usize) << 8) | lo as usize
}

/// Splits a forward distance into its high/low operand pair.
pub fn encode_distance(distance: usize) -> Result<(Idx, Idx), EncodeError> {
    if distance > u16::MAX as usize {
        return Err(EncodeError::DistanceTooLarge(distance));
    }
    Ok(((distance >> 8) as Idx, (distance & 0xff) as Idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_distances_use_low_field_only() {
        assert_eq!(encode_distance(0), Ok((0, 0)));
        assert_eq!(encode_distance(7), Ok((0, 7)));
        assert_eq!(encode_distance(256), Ok((1, 0)));
    }

    #[test]
    fn oversized_distance_is_rejected() {
        assert_eq!(
            encode_distance(70_000),
            Err(EncodeError::DistanceTooLarge(70_000))
        );
    }

    #[test]
    fn largest_distance_fills_both_fields() {
        assert_eq!(encode_distance(u16::MAX as usize), Ok((0xff, 0xff)));
        assert_eq!(decode_distance(0xff, 0xff), u16::MAX as usize);
        assert_eq!(decode_distance(2, 3), 515);
    }
}
