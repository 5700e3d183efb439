// Copyright (c) 2026 matrixdeck contributors

/// One falling-trail unit, bound to a single grid column.
///
/// `position` is the row of the top of the trail and may sit above the grid
/// (negative) or below it (>= row count) while the trail is entering or
/// leaving the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stream {
    pub position: i16,
    pub active: bool,
    /// Gradient stop picked for the trail head at the last recycle.
    #[allow(dead_code)]
    pub head_stop: u8,
}

/// Chance that a recycled stream comes back active.
pub const SPAWN_CHANCE: f32 = 0.4;

/// Recycled streams restart this far above the grid.
pub const RESET_MIN: i16 = -6;
pub const RESET_MAX: i16 = -1;

impl Stream {
    pub fn new(position: i16, active: bool, head_stop: u8) -> Self {
        Self {
            position,
            active,
            head_stop,
        }
    }

    /// True once the whole trail has fallen past the last row.
    pub fn off_bottom(&self, rows: i16) -> bool {
        self.position >= rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_bottom_at_row_count() {
        let s = Stream::new(14, true, 0);
        assert!(!s.off_bottom(15));
        let s = Stream::new(15, true, 0);
        assert!(s.off_bottom(15));
    }
}
