//! Cell marks and their single-byte encoding

/// Byte stored for an empty cell
pub const EMPTY_BYTE: u8 = b'.';
/// Byte stored for a nought
pub const NOUGHT_BYTE: u8 = b'O';
/// Byte stored for a cross
pub const CROSS_BYTE: u8 = b'X';

/// Content of one board cell
///
/// Stored as a single byte both in the shared segment and in each
/// instance's local mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Placed with the primary pointer button
    Nought,
    /// Placed with the secondary pointer button
    Cross,
}

impl Cell {
    /// Decode a segment byte. Unknown bytes (including the zero fill of a
    /// segment that has not been initialized yet) read as empty.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            NOUGHT_BYTE => Cell::Nought,
            CROSS_BYTE => Cell::Cross,
            _ => Cell::Empty,
        }
    }

    /// Encode for the segment
    pub fn to_byte(self) -> u8 {
        match self {
            Cell::Empty => EMPTY_BYTE,
            Cell::Nought => NOUGHT_BYTE,
            Cell::Cross => CROSS_BYTE,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_byte() as char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_match_the_shared_layout() {
        assert_eq!(Cell::Empty.to_byte(), b'.');
        assert_eq!(Cell::Nought.to_byte(), b'O');
        assert_eq!(Cell::Cross.to_byte(), b'X');
        assert_eq!(Cell::from_byte(b'X'), Cell::Cross);
        assert_eq!(Cell::from_byte(b'O'), Cell::Nought);
    }

    #[test]
    fn unknown_bytes_decode_as_empty() {
        for byte in [0u8, b'.', b'x', b'o', 0xFF] {
            assert_eq!(Cell::from_byte(byte), Cell::Empty, "byte {byte:#x}");
        }
    }
}
