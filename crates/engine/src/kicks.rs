//! SRS kick tables for piece rotation, in grid coordinates (y grows downward).
//! Quarter turns follow standard SRS; 180 turns use the SRS+ extension.

use stacker_core::{Piece, Rotation};

/// Get kick offsets for a rotation transition.
/// Returns slice of (dx, dy) offsets to try in order, after the unkicked test.
pub fn get_kicks(piece: Piece, from: Rotation, to: Rotation) -> &'static [(i8, i8)] {
    let key = rotation_key(from, to);

    match piece {
        Piece::I => get_i_kicks(key),
        Piece::O => &[], // O piece doesn't kick
        _ => get_jlstz_kicks(key),
    }
}

fn rotation_key(from: Rotation, to: Rotation) -> u8 {
    from.index() as u8 * 10 + to.index() as u8
}

/// JLSTZ kick table
#[allow(clippy::zero_prefixed_literal)]
fn get_jlstz_kicks(key: u8) -> &'static [(i8, i8)] {
    match key {
        // CW rotations
        01 => &[(-1, 0), (-1, -1), (0, 2), (-1, 2)], // N -> E
        12 => &[(1, 0), (1, 1), (0, -2), (1, -2)],   // E -> S
        23 => &[(1, 0), (1, -1), (0, 2), (1, 2)],    // S -> W
        30 => &[(-1, 0), (-1, 1), (0, -2), (-1, -2)], // W -> N

        // CCW rotations
        10 => &[(1, 0), (1, 1), (0, -2), (1, -2)], // E -> N
        21 => &[(-1, 0), (-1, -1), (0, 2), (-1, 2)], // S -> E
        32 => &[(-1, 0), (-1, 1), (0, -2), (-1, -2)], // W -> S
        03 => &[(1, 0), (1, -1), (0, 2), (1, 2)],  // N -> W

        // 180 rotations (SRS+ extension)
        02 => &[(0, -1), (1, -1), (-1, -1), (1, 0), (-1, 0)], // N -> S
        20 => &[(0, 1), (-1, 1), (1, 1), (-1, 0), (1, 0)],    // S -> N
        13 => &[(1, 0), (1, -2), (1, -1), (0, -2), (0, -1)],  // E -> W
        31 => &[(-1, 0), (-1, -2), (-1, -1), (0, -2), (0, -1)], // W -> E

        _ => &[],
    }
}

/// I piece kick table
#[allow(clippy::zero_prefixed_literal)]
fn get_i_kicks(key: u8) -> &'static [(i8, i8)] {
    match key {
        // CW rotations
        01 => &[(-2, 0), (1, 0), (-2, 1), (1, -2)], // N -> E
        12 => &[(-1, 0), (2, 0), (-1, -2), (2, 1)], // E -> S
        23 => &[(2, 0), (-1, 0), (2, -1), (-1, 2)], // S -> W
        30 => &[(1, 0), (-2, 0), (1, 2), (-2, -1)], // W -> N

        // CCW rotations
        10 => &[(2, 0), (-1, 0), (2, -1), (-1, 2)], // E -> N
        21 => &[(1, 0), (-2, 0), (1, 2), (-2, -1)], // S -> E
        32 => &[(-2, 0), (1, 0), (-2, 1), (1, -2)], // W -> S
        03 => &[(-1, 0), (2, 0), (-1, -2), (2, 1)], // N -> W

        // 180 rotations: plain side and upward nudges
        02 | 20 | 13 | 31 => &[(1, 0), (-1, 0), (0, -1), (1, -1), (-1, -1)],

        _ => &[],
    }
}
