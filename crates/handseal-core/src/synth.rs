//! Synthetic hands for tests and the headless replay driver.
//!
//! Hands are upright (fingers towards -y) with the wrist at `wrist` and a
//! wrist-to-fingertip length of roughly `size`, both in normalized units.

use glam::{Vec2, Vec3};

use crate::constants::LANDMARK_COUNT;
use crate::landmarks::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HandShape {
    /// All five fingers extended and spread.
    Open,
    /// Index and middle extended with tips `gap` apart (as a fraction of
    /// `size`); ring, pinky and thumb folded.
    Seal { gap: f32 },
    /// Every finger curled, index and middle tips nearly touching.
    Fist,
}

// Column x offsets per finger (thumb..pinky), as a fraction of size.
const COLUMNS: [f32; 5] = [-0.38, -0.2, 0.0, 0.14, 0.27];
const MCP_Y: f32 = 0.45;
const PIP_Y: f32 = 0.62;
const DIP_Y: f32 = 0.78;
const TIP_Y: f32 = 0.95;
const SEAL_X: f32 = -0.05;
const CURLED_TIP_Y: f32 = 0.5;

pub fn seal_hand(shape: HandShape, wrist: Vec2, size: f32) -> Hand {
    let mut pts = vec![Vec3::ZERO; LANDMARK_COUNT];
    let at = |dx: f32, dy: f32| Vec3::new(wrist.x + dx * size, wrist.y - dy * size, 0.0);
    pts[WRIST] = at(0.0, 0.0);

    // thumb
    let tx = COLUMNS[0];
    pts[THUMB_CMC] = at(tx * 0.4, 0.15);
    pts[THUMB_MCP] = at(tx * 0.7, 0.3);
    match shape {
        HandShape::Open => {
            pts[THUMB_IP] = at(tx * 0.9, 0.45);
            pts[THUMB_TIP] = at(tx, 0.58);
        }
        _ => {
            pts[THUMB_IP] = at(tx * 0.5, 0.42);
            pts[THUMB_TIP] = at(-0.08, 0.46);
        }
    }

    let fingers = [
        (INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP, COLUMNS[1]),
        (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP, COLUMNS[2]),
        (RING_MCP, RING_PIP, RING_DIP, RING_TIP, COLUMNS[3]),
        (PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP, COLUMNS[4]),
    ];
    for (n, (mcp, pip, dip, tip, x)) in fingers.into_iter().enumerate() {
        pts[mcp] = at(x, MCP_Y);
        let extended = match shape {
            HandShape::Open => true,
            HandShape::Seal { .. } => n < 2,
            HandShape::Fist => false,
        };
        if extended {
            pts[pip] = at(x, PIP_Y);
            pts[dip] = at(x, DIP_Y);
            pts[tip] = at(x, TIP_Y);
        } else {
            pts[pip] = at(x, PIP_Y);
            pts[dip] = at(x, PIP_Y - 0.04);
            pts[tip] = at(x * 0.5, CURLED_TIP_Y);
        }
    }

    match shape {
        HandShape::Seal { gap } => {
            pts[INDEX_TIP] = at(SEAL_X - gap * 0.5, TIP_Y);
            pts[MIDDLE_TIP] = at(SEAL_X + gap * 0.5, TIP_Y);
            pts[INDEX_DIP] = at((COLUMNS[1] + SEAL_X) * 0.5, DIP_Y);
            pts[MIDDLE_DIP] = at(SEAL_X * 0.5, DIP_Y);
        }
        HandShape::Fist => {
            pts[INDEX_TIP] = at(SEAL_X - 0.01, CURLED_TIP_Y);
            pts[MIDDLE_TIP] = at(SEAL_X + 0.01, CURLED_TIP_Y);
        }
        HandShape::Open => {}
    }

    Hand::new(pts, None)
}

/// A seal whose fingertip midpoint lands exactly on `anchor`.
pub fn seal_at(anchor: Vec2, size: f32, gap: f32) -> Hand {
    let wrist = Vec2::new(anchor.x - SEAL_X * size, anchor.y + TIP_Y * size);
    seal_hand(HandShape::Seal { gap }, wrist, size)
}
