// Copyright (c) 2026 matrixdeck contributors

use crossterm::style::Color;

use crate::cell::Cell;

/// Cell buffer for one screen. Writes that change a cell are recorded in a
/// dirty list so the terminal writer only repaints what moved.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
    blank: Cell,
    dirty_all: bool,
    dirty_map: Vec<bool>,
    dirty: Vec<usize>,
}

impl Frame {
    pub fn new(width: u16, height: u16, bg: Option<Color>) -> Self {
        let len = width as usize * height as usize;
        let blank = Cell::blank_with_bg(bg);
        Self {
            width,
            height,
            cells: vec![blank; len],
            blank,
            dirty_all: true,
            dirty_map: vec![false; len],
            dirty: Vec::new(),
        }
    }

    pub fn is_dirty_all(&self) -> bool {
        self.dirty_all
    }

    pub fn dirty_indices(&self) -> &[usize] {
        &self.dirty
    }

    pub fn clear_dirty(&mut self) {
        if self.dirty_all {
            self.dirty_all = false;
            self.dirty_map.fill(false);
            self.dirty.clear();
            return;
        }
        for &i in &self.dirty {
            if let Some(v) = self.dirty_map.get_mut(i) {
                *v = false;
            }
        }
        self.dirty.clear();
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[allow(dead_code)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_at_index(&self, i: usize) -> Cell {
        self.cells.get(i).copied().unwrap_or(self.blank)
    }

    /// Writes outside the frame are dropped, matching writes by zealous
    /// painters on a terminal smaller than the layout.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            if self.cells[i] == cell {
                return;
            }
            self.cells[i] = cell;
            if !self.dirty_all && !self.dirty_map[i] {
                self.dirty_map[i] = true;
                self.dirty.push(i);
            }
        }
    }

    pub fn fill_row(&mut self, y: u16, cell: Cell) {
        for x in 0..self.width {
            self.set(x, y, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_records_changed_cells_as_dirty() {
        let mut f = Frame::new(4, 2, None);
        f.clear_dirty();

        f.set(1, 0, Cell::styled('x', None, None));
        assert_eq!(f.get(1, 0).unwrap().ch, 'x');
        assert_eq!(f.dirty_indices(), &[1]);

        // Writing the same cell again is not a change.
        f.clear_dirty();
        f.set(1, 0, Cell::styled('x', None, None));
        assert!(f.dirty_indices().is_empty());
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut f = Frame::new(2, 2, None);
        f.clear_dirty();
        f.set(5, 5, Cell::styled('x', None, None));
        assert!(f.dirty_indices().is_empty());
    }

    #[test]
    fn new_frame_starts_fully_dirty() {
        let mut f = Frame::new(2, 2, None);
        assert!(f.is_dirty_all());
        f.clear_dirty();
        assert!(!f.is_dirty_all());
    }
}
