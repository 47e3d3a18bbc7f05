use crate::dct::Block;

/// Per-frequency step sizes, indexed `[vertical][horizontal]` frequency.
pub type QuantizationTable = Block<u16>;

/// The MPEG-1 default intra quantizer matrix.
pub const DEFAULT_INTRA_TABLE: QuantizationTable = [
    [8, 16, 19, 22, 26, 27, 29, 34],
    [16, 16, 22, 24, 27, 29, 34, 37],
    [19, 22, 26, 27, 29, 34, 34, 38],
    [22, 22, 26, 27, 29, 34, 37, 40],
    [22, 26, 27, 29, 32, 35, 40, 48],
    [26, 27, 29, 32, 35, 40, 48, 58],
    [26, 27, 29, 34, 38, 46, 56, 69],
    [27, 29, 35, 38, 46, 56, 69, 83],
];

/// A flat table, every frequency weighted alike.
pub const FLAT_TABLE: QuantizationTable = [[16; 8]; 8];
