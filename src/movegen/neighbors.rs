//! Neighborhood window for seeded generation.

/// Offsets of the square-radius-2, line-radius-4 window: the full 5x5
/// square around the seed plus the 8 ray directions extended to distance
/// 3 and 4.
pub const RANGE_SQUARE2_LINE4: [(i32, i32); 40] = [
    // square radius 2
    (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
    (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
    (-2, 0), (-1, 0), (1, 0), (2, 0),
    (-2, 1), (-1, 1), (0, 1), (1, 1), (2, 1),
    (-2, 2), (-1, 2), (0, 2), (1, 2), (2, 2),
    // line extensions, distance 3
    (-3, -3), (0, -3), (3, -3), (-3, 0), (3, 0), (-3, 3), (0, 3), (3, 3),
    // line extensions, distance 4
    (-4, -4), (0, -4), (4, -4), (-4, 0), (4, 0), (-4, 4), (0, 4), (4, 4),
];

const _: () = {
    assert!(RANGE_SQUARE2_LINE4.len() == 40);
};
