// Copyright (c) 2026 matrixdeck contributors

use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
    Rng, SeedableRng,
};

use crate::palette::{SCHEME_COUNT, TRAIL_LEN};
use crate::stream::{self, Stream};

pub const ROWS: usize = 15;

/// Approximate viewport units per terminal cell, used to feed the pixel
/// breakpoints from a terminal width.
pub const UNITS_PER_CELL: u16 = 10;

/// Column count for a given viewport width.
pub fn columns_for_width(width: u16) -> usize {
    if width <= 480 {
        12
    } else if width <= 768 {
        16
    } else {
        20
    }
}

pub fn viewport_width(term_cols: u16) -> u16 {
    term_cols.saturating_mul(UNITS_PER_CELL)
}

/// The rain engine. Owns one stream per column and the painted grid; the
/// grid is rebuilt from scratch on every tick, never patched in place.
///
/// A cell is either background (`None`) or a trail gradient stop index in
/// `0..TRAIL_LEN`.
pub struct RainGrid<R: Rng = StdRng> {
    columns: usize,
    scheme_idx: usize,
    cells: Vec<Option<u8>>,
    streams: Vec<Stream>,

    rng: R,
    rand_chance: Uniform<f32>,
    rand_reset_pos: Uniform<i16>,
    rand_init_pos: Uniform<i16>,
    rand_stop: Uniform<u8>,
}

impl RainGrid<StdRng> {
    pub fn new(width: u16, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(width, rng)
    }
}

impl<R: Rng> RainGrid<R> {
    pub fn with_rng(width: u16, rng: R) -> Self {
        let mut grid = Self {
            columns: columns_for_width(width),
            scheme_idx: 0,
            cells: Vec::new(),
            streams: Vec::new(),
            rng,
            rand_chance: Uniform::new(0.0, 1.0).expect("valid range"),
            rand_reset_pos: Uniform::new_inclusive(stream::RESET_MIN, stream::RESET_MAX)
                .expect("valid range"),
            rand_init_pos: Uniform::new_inclusive(stream::RESET_MIN, ROWS as i16 - 1)
                .expect("valid range"),
            rand_stop: Uniform::new_inclusive(0, TRAIL_LEN as u8 - 1).expect("valid range"),
        };
        grid.reset();
        grid
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn scheme_index(&self) -> usize {
        self.scheme_idx
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        if row >= ROWS || col >= self.columns {
            return None;
        }
        self.cells[row * self.columns + col]
    }

    #[allow(dead_code)]
    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    /// Discards all animation state and deals fresh random streams for the
    /// current column count.
    pub fn reset(&mut self) {
        self.cells = vec![None; ROWS * self.columns];
        self.streams.clear();
        for _ in 0..self.columns {
            let position = self.rand_init_pos.sample(&mut self.rng);
            let active = self.rand_chance.sample(&mut self.rng) < stream::SPAWN_CHANCE;
            let head_stop = self.rand_stop.sample(&mut self.rng);
            self.streams.push(Stream::new(position, active, head_stop));
        }
    }

    /// Applies a new viewport width. Returns true when the column count
    /// changed and the grid was reallocated.
    pub fn handle_resize(&mut self, width: u16) -> bool {
        let columns = columns_for_width(width);
        if columns == self.columns {
            return false;
        }
        self.columns = columns;
        self.reset();
        true
    }

    /// Advances the palette rotation without touching stream state.
    pub fn rotate_scheme(&mut self) {
        self.scheme_idx = (self.scheme_idx + 1) % SCHEME_COUNT;
    }

    /// One animation step: paint the trails from the current stream state,
    /// then advance every stream and recycle the ones that fell off.
    pub fn tick(&mut self) {
        let mut next = vec![None; ROWS * self.columns];
        for (col, s) in self.streams.iter().enumerate() {
            if !s.active {
                continue;
            }
            for stop in 0..TRAIL_LEN {
                let row = s.position + stop as i16;
                if (0..ROWS as i16).contains(&row) {
                    next[row as usize * self.columns + col] = Some(stop as u8);
                }
            }
        }
        self.cells = next;

        // Inactive streams fall too; that is what brings a dormant column
        // back around to a fresh activation draw.
        for s in &mut self.streams {
            s.position += 1;
            if s.off_bottom(ROWS as i16) {
                s.position = self.rand_reset_pos.sample(&mut self.rng);
                s.active = self.rand_chance.sample(&mut self.rng) < stream::SPAWN_CHANCE;
                s.head_stop = self.rand_stop.sample(&mut self.rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn make_grid(width: u16) -> RainGrid {
        RainGrid::with_rng(width, StdRng::seed_from_u64(7))
    }

    fn painted_rows(grid: &RainGrid, col: usize) -> Vec<usize> {
        (0..ROWS).filter(|&r| grid.cell(r, col).is_some()).collect()
    }

    #[test]
    fn breakpoints_pick_column_counts() {
        assert_eq!(columns_for_width(320), 12);
        assert_eq!(columns_for_width(480), 12);
        assert_eq!(columns_for_width(481), 16);
        assert_eq!(columns_for_width(768), 16);
        assert_eq!(columns_for_width(769), 20);
        assert_eq!(columns_for_width(1200), 20);
    }

    #[test]
    fn grid_dimensions_track_the_viewport() {
        let mut grid = make_grid(1000);
        assert_eq!(grid.columns(), 20);
        assert_eq!(grid.streams().len(), 20);

        assert!(grid.handle_resize(400));
        assert_eq!(grid.columns(), 12);
        assert_eq!(grid.streams().len(), 12);

        // Same breakpoint bucket: nothing reallocated.
        assert!(!grid.handle_resize(380));
        assert_eq!(grid.columns(), 12);
    }

    #[test]
    fn active_streams_advance_one_row_per_tick() {
        let mut grid = make_grid(1000);
        grid.streams[0] = Stream::new(2, true, 0);
        grid.tick();
        assert_eq!(grid.streams()[0].position, 3);
        grid.tick();
        assert_eq!(grid.streams()[0].position, 4);
    }

    #[test]
    fn trail_is_at_most_six_contiguous_rows() {
        let mut grid = make_grid(1000);
        for _ in 0..40 {
            grid.tick();
            for col in 0..grid.columns() {
                let rows = painted_rows(&grid, col);
                assert!(rows.len() <= TRAIL_LEN);
                if let (Some(&first), Some(&last)) = (rows.first(), rows.last()) {
                    assert_eq!(last - first + 1, rows.len(), "trail must be contiguous");
                }
            }
        }
    }

    #[test]
    fn trail_clips_at_both_edges() {
        let mut grid = make_grid(1000);
        for s in &mut grid.streams {
            s.active = false;
        }
        grid.streams[0] = Stream::new(-3, true, 0);
        grid.tick();
        // Painted before the advance: rows -3..3 clip to 0, 1, 2.
        assert_eq!(painted_rows(&grid, 0), vec![0, 1, 2]);

        grid.streams[5] = Stream::new(12, true, 0);
        grid.tick();
        // Rows 12..18 clip to 12, 13, 14.
        assert_eq!(painted_rows(&grid, 5), vec![12, 13, 14]);
    }

    #[test]
    fn inactive_columns_stay_background() {
        let mut grid = make_grid(1000);
        for s in &mut grid.streams {
            s.active = false;
        }
        grid.tick();
        for col in 0..grid.columns() {
            assert!(painted_rows(&grid, col).is_empty());
        }
    }

    #[test]
    fn stream_recycles_after_the_last_row() {
        let mut grid = make_grid(1000);
        for _ in 0..20 {
            grid.streams[0] = Stream::new(14, true, 0);
            grid.tick();
            let s = grid.streams()[0];
            assert!(
                (stream::RESET_MIN..=stream::RESET_MAX).contains(&s.position),
                "recycled position {} out of range",
                s.position
            );
            assert!((s.head_stop as usize) < TRAIL_LEN);
        }
    }

    #[test]
    fn recycling_eventually_reactivates_a_dormant_stream() {
        let mut grid = make_grid(1000);
        grid.streams[0] = Stream::new(14, false, 0);
        let mut activated = false;
        for _ in 0..500 {
            grid.tick();
            if grid.streams()[0].active {
                activated = true;
                break;
            }
        }
        assert!(activated, "activation draw never hit within 500 ticks");
    }

    #[test]
    fn scheme_rotation_wraps_after_twelve_steps() {
        let mut grid = make_grid(1000);
        let start = grid.scheme_index();
        for _ in 0..SCHEME_COUNT {
            grid.rotate_scheme();
        }
        assert_eq!(grid.scheme_index(), start);
    }

    #[test]
    fn rotation_does_not_touch_streams() {
        let mut grid = make_grid(1000);
        let before = grid.streams().to_vec();
        grid.rotate_scheme();
        assert_eq!(grid.streams(), &before[..]);
    }

    #[test]
    fn seeded_grids_agree() {
        let mut a = RainGrid::new(1000, Some(42));
        let mut b = RainGrid::new(1000, Some(42));
        for _ in 0..50 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.streams(), b.streams());
    }
}
