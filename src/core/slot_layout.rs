//! Persisted station grid.
//!
//! Every station owns exactly one slot of a dense grid (`0..slot_count`).
//! The mapping is stored in `device_layout.json` as a list of
//! `{station_id, slot}` pairs and rewritten whole on every change. Slot
//! indices are turned into canvas positions by [`SlotGrid`], which is
//! recomputed whenever the canvas is resized.

use crate::errors::{AppError, AppResult};
use crate::models::geometry::clamp_axis;
use crate::models::{Point, Size};
use crate::store::{read_json, write_json};
use crate::ui::messages::warning;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Right-hand overflow column: row order used once the main block is full.
const OVERFLOW_ROWS: [usize; 5] = [1, 3, 0, 2, 4];

/// Screen geometry of the slot grid.
#[derive(Debug, Clone)]
pub struct SlotGrid {
    pub margin: f32,
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub icon_size: f32,
    /// Share of the canvas width used by the main block.
    pub main_ratio: f32,
    /// Column count of each row of the main block.
    pub rows: Vec<usize>,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            margin: 24.0,
            spacing_x: 110.0,
            spacing_y: 110.0,
            icon_size: 64.0,
            main_ratio: 0.75,
            rows: vec![3, 3, 3, 3, 4],
        }
    }
}

impl SlotGrid {
    pub fn main_capacity(&self) -> usize {
        self.rows.iter().sum()
    }

    /// Centers of `count` slots on a canvas of `size`.
    ///
    /// The main block fills the left part row by row, each row centered;
    /// further slots go to columns on the right.
    pub fn compute(&self, size: Size, count: usize) -> Vec<Point> {
        if size.is_zero() || count == 0 {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(count);
        let main_width = size.width * self.main_ratio;
        let left = self.margin;
        let top = self.margin + self.icon_size / 2.0;

        'rows: for (r, &cols) in self.rows.iter().enumerate() {
            let y = top + r as f32 * self.spacing_y;
            let row_width = cols.saturating_sub(1) as f32 * self.spacing_x;
            let start_x = left + (main_width - row_width) / 2.0;
            for c in 0..cols {
                if out.len() == count {
                    break 'rows;
                }
                out.push(Point::new(start_x + c as f32 * self.spacing_x, y));
            }
        }

        let right = main_width + self.margin * 2.0;
        let mut k = 0usize;
        while out.len() < count {
            let col = k / OVERFLOW_ROWS.len();
            let row = OVERFLOW_ROWS[k % OVERFLOW_ROWS.len()];
            out.push(Point::new(
                right + col as f32 * self.spacing_x,
                top + row as f32 * self.spacing_y,
            ));
            k += 1;
        }

        out
    }

    /// Keep a dragged icon fully inside the canvas margins.
    pub fn clamp(&self, size: Size, p: Point) -> Point {
        let half = self.icon_size / 2.0;
        Point::new(
            clamp_axis(p.x, self.margin + half, size.width - self.margin - half),
            clamp_axis(p.y, self.margin + half, size.height - self.margin - half),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct SlotEntry {
    station_id: u32,
    slot: usize,
}

/// A station grabbed by the pointer.
#[derive(Debug, Clone, Copy)]
struct StationDrag {
    station_id: u32,
    offset: Point,
    current: Point,
}

#[derive(Debug)]
pub struct SlotLayoutStore {
    path: PathBuf,
    preferred: Vec<u32>,
    mapping: BTreeMap<u32, usize>,
    slot_count: usize,
    grid: SlotGrid,
    canvas: Size,
    positions: Vec<Point>,
    drag: Option<StationDrag>,
}

impl SlotLayoutStore {
    /// Load the persisted mapping for the given station pool.
    ///
    /// Missing, corrupt or non-injective data is replaced by a mapping
    /// synthesized from `preferred`, which is saved right away.
    pub fn load(path: impl Into<PathBuf>, preferred: &[u32], known_station_ids: &[u32]) -> Self {
        let mut store = Self {
            path: path.into(),
            preferred: preferred.to_vec(),
            mapping: BTreeMap::new(),
            slot_count: known_station_ids.len(),
            grid: SlotGrid::default(),
            canvas: Size::default(),
            positions: Vec::new(),
            drag: None,
        };

        match store.read_valid(known_station_ids) {
            Some(mapping) => {
                store.mapping = mapping;
                if let Err(e) = store.ensure_complete(known_station_ids) {
                    warning(format!("Failed to save layout: {}", e));
                }
            }
            None => {
                store.mapping.clear();
                store.fill_missing(known_station_ids);
                if let Err(e) = store.save() {
                    warning(format!("Failed to save layout: {}", e));
                }
            }
        }

        store
    }

    fn read_valid(&self, known: &[u32]) -> Option<BTreeMap<u32, usize>> {
        let entries = match read_json::<Vec<SlotEntry>>(&self.path) {
            Ok(Some(entries)) => entries,
            Ok(None) => return None,
            Err(e) => {
                warning(format!(
                    "Layout file {} is unreadable ({}); rebuilding it.",
                    self.path.display(),
                    e
                ));
                return None;
            }
        };

        let mut mapping = BTreeMap::new();
        let mut used = BTreeSet::new();
        for e in entries.into_iter().filter(|e| known.contains(&e.station_id)) {
            if e.slot >= self.slot_count || !used.insert(e.slot) {
                warning(format!(
                    "Layout file {} has an invalid slot for station {}; rebuilding it.",
                    self.path.display(),
                    e.station_id
                ));
                return None;
            }
            mapping.insert(e.station_id, e.slot);
        }
        Some(mapping)
    }

    /// Give every unmapped known station the lowest free slot. Existing
    /// entries are never moved. Saves when something was added.
    pub fn ensure_complete(&mut self, known_station_ids: &[u32]) -> AppResult<bool> {
        self.slot_count = self
            .slot_count
            .max(known_station_ids.len())
            .max(self.mapping.len());

        if !self.fill_missing(known_station_ids) {
            return Ok(false);
        }
        self.recompute_positions();
        self.save()?;
        Ok(true)
    }

    fn fill_missing(&mut self, known: &[u32]) -> bool {
        let mut order: Vec<u32> = self
            .preferred
            .iter()
            .copied()
            .filter(|id| known.contains(id))
            .collect();
        let mut rest: Vec<u32> = known
            .iter()
            .copied()
            .filter(|id| !self.preferred.contains(id))
            .collect();
        rest.sort_unstable();
        order.extend(rest);

        let mut changed = false;
        for id in order {
            if self.mapping.contains_key(&id) {
                continue;
            }
            let Some(slot) = self.lowest_free_slot() else {
                self.slot_count += 1;
                self.mapping.insert(id, self.slot_count - 1);
                changed = true;
                continue;
            };
            self.mapping.insert(id, slot);
            changed = true;
        }
        changed
    }

    fn lowest_free_slot(&self) -> Option<usize> {
        let used: BTreeSet<usize> = self.mapping.values().copied().collect();
        (0..self.slot_count).find(|s| !used.contains(s))
    }

    // ------------------------------------------------
    // Mapping
    // ------------------------------------------------

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn slot_of(&self, station_id: u32) -> Option<usize> {
        self.mapping.get(&station_id).copied()
    }

    pub fn station_in_slot(&self, slot: usize) -> Option<u32> {
        self.mapping
            .iter()
            .find(|(_, s)| **s == slot)
            .map(|(id, _)| *id)
    }

    /// `(station_id, slot)` pairs ordered by station id.
    pub fn mapping(&self) -> Vec<(u32, usize)> {
        self.mapping.iter().map(|(id, s)| (*id, *s)).collect()
    }

    /// Move `station_id` into `target_slot`, exchanging with its owner if any.
    /// Returns whether the mapping changed.
    pub fn swap(&mut self, station_id: u32, target_slot: usize) -> AppResult<bool> {
        let current = self
            .slot_of(station_id)
            .ok_or(AppError::UnknownStation(station_id))?;
        if target_slot >= self.slot_count {
            return Err(AppError::InvalidSlot(target_slot));
        }
        if current == target_slot {
            return Ok(false);
        }

        if let Some(other) = self.station_in_slot(target_slot) {
            self.mapping.insert(other, current);
        }
        self.mapping.insert(station_id, target_slot);

        self.save()?;
        Ok(true)
    }

    /// Drop `station_id` onto the slot closest to `target`.
    pub fn swap_to_point(&mut self, station_id: u32, target: Point) -> AppResult<bool> {
        match self.nearest_slot(target) {
            Some(slot) => self.swap(station_id, slot),
            None => Ok(false),
        }
    }

    fn save(&self) -> AppResult<()> {
        let entries: Vec<SlotEntry> = self
            .mapping
            .iter()
            .map(|(id, slot)| SlotEntry {
                station_id: *id,
                slot: *slot,
            })
            .collect();
        write_json(&self.path, &entries)
    }

    // ------------------------------------------------
    // Geometry
    // ------------------------------------------------

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn set_canvas(&mut self, size: Size) {
        if self.canvas != size {
            self.canvas = size;
            self.recompute_positions();
        }
    }

    fn recompute_positions(&mut self) {
        self.positions = self.grid.compute(self.canvas, self.slot_count);
    }

    pub fn slot_position(&self, slot: usize) -> Option<Point> {
        self.positions.get(slot).copied()
    }

    /// Rendered center of a station; follows the pointer while it is dragged.
    pub fn station_position(&self, station_id: u32) -> Option<Point> {
        if let Some(drag) = self.drag
            && drag.station_id == station_id
        {
            return Some(drag.current);
        }
        self.slot_of(station_id)
            .and_then(|slot| self.slot_position(slot))
    }

    /// Slot whose center is closest to `p` (squared Euclidean distance).
    pub fn nearest_slot(&self, p: Point) -> Option<usize> {
        if self.mapping.is_empty() {
            return None;
        }
        self.positions
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.distance_sq(p).total_cmp(&b.distance_sq(p)))
            .map(|(i, _)| i)
    }

    /// Station whose icon square contains `p`.
    pub fn station_at(&self, p: Point) -> Option<u32> {
        let half = self.grid.icon_size / 2.0;
        self.mapping.keys().copied().find(|id| {
            self.station_position(*id).is_some_and(|c| {
                p.x >= c.x - half && p.x <= c.x + half && p.y >= c.y - half && p.y <= c.y + half
            })
        })
    }

    // ------------------------------------------------
    // Drag & drop
    // ------------------------------------------------

    pub fn dragging(&self) -> Option<u32> {
        self.drag.map(|d| d.station_id)
    }

    /// Grab the station under the pointer, if any.
    pub fn begin_drag(&mut self, p: Point) -> Option<u32> {
        if self.drag.is_some() {
            return self.dragging();
        }
        let id = self.station_at(p)?;
        let center = self.station_position(id)?;
        self.drag = Some(StationDrag {
            station_id: id,
            offset: Point::new(p.x - center.x, p.y - center.y),
            current: center,
        });
        Some(id)
    }

    pub fn drag_to(&mut self, p: Point) {
        let (grid, canvas) = (&self.grid, self.canvas);
        if let Some(drag) = self.drag.as_mut() {
            let wanted = Point::new(p.x - drag.offset.x, p.y - drag.offset.y);
            drag.current = grid.clamp(canvas, wanted);
        }
    }

    /// Release the dragged station into the nearest slot; returns that slot.
    pub fn end_drag(&mut self) -> AppResult<Option<usize>> {
        let Some(drag) = self.drag.take() else {
            return Ok(None);
        };
        let Some(slot) = self.nearest_slot(drag.current) else {
            return Ok(None);
        };
        self.swap(drag.station_id, slot)?;
        Ok(Some(slot))
    }
}
