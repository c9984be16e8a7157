//! Radial placement of active occupant markers.
//!
//! The earliest arrival sits at the canvas center; everybody else is put on
//! concentric rings around it. Positions are sticky: a new arrival never
//! moves an existing marker, and a departure only frees its spot. Each ring
//! starts at a random angle so two sessions don't look the same.

use crate::models::geometry::clamp_axis;
use crate::models::{Occupant, Point, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::f32::consts::TAU;

#[derive(Debug, Clone)]
pub struct PlacerConfig {
    pub icon: Size,
    pub card: Size,
    pub card_gap: f32,
    pub margin: f32,
    pub base_radius: f32,
    pub ring_step: f32,
    /// Share of a ring's circumference markers may fill.
    pub packing: f32,
    /// Two markers closer than this share of the footprint width overlap.
    pub overlap_factor: f32,
    /// Angle nudge on retry, as a share of the ring's angular step.
    pub angle_nudge: f32,
    pub radius_nudge: f32,
    pub max_attempts: usize,
    /// Canvas changes below this (px, per axis) keep the current layout.
    pub resize_threshold: f32,
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            icon: Size::new(48.0, 48.0),
            card: Size::new(150.0, 96.0),
            card_gap: 8.0,
            margin: 12.0,
            base_radius: 140.0,
            ring_step: 110.0,
            packing: 0.95,
            overlap_factor: 0.7,
            angle_nudge: 0.35,
            radius_nudge: 12.0,
            max_attempts: 24,
            resize_threshold: 4.0,
        }
    }
}

impl PlacerConfig {
    /// Marker icon plus its detail card, side by side.
    pub fn footprint_width(&self) -> f32 {
        self.icon.width + self.card_gap + self.card.width
    }

    pub fn footprint_height(&self) -> f32 {
        self.icon.height.max(self.card.height)
    }

    fn first_radius(&self) -> f32 {
        self.base_radius.max(self.footprint_width())
    }

    fn radius_step(&self) -> f32 {
        self.ring_step.max(0.75 * self.footprint_width())
    }

    fn ring_capacity(&self, radius: f32) -> usize {
        let per_marker = self.footprint_width() * self.packing;
        ((TAU * radius / per_marker).floor() as usize).max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Right,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub point: Point,
    pub card: CardSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Center,
    Ring { ring: usize, index: usize },
    /// Dropped by the user; not bound to any ring slot.
    Free,
}

#[derive(Debug, Clone)]
struct Ring {
    radius: f32,
    offset: f32,
    taken: Vec<bool>,
}

impl Ring {
    fn step(&self) -> f32 {
        TAU / self.taken.len() as f32
    }

    fn angle(&self, index: usize) -> f32 {
        self.offset + index as f32 * self.step()
    }
}

pub struct RadialPlacer {
    cfg: PlacerConfig,
    canvas: Size,
    rng: StdRng,
    rings: Vec<Ring>,
    placed: HashMap<String, (Placement, Anchor)>,
    order: Vec<String>,
    drag: Option<(String, Point)>,
}

impl RadialPlacer {
    pub fn new(cfg: PlacerConfig, canvas: Size) -> Self {
        Self::with_rng(cfg, canvas, StdRng::from_entropy())
    }

    /// Reproducible layout, for tests and snapshots.
    pub fn with_seed(cfg: PlacerConfig, canvas: Size, seed: u64) -> Self {
        Self::with_rng(cfg, canvas, StdRng::seed_from_u64(seed))
    }

    fn with_rng(cfg: PlacerConfig, canvas: Size, rng: StdRng) -> Self {
        Self {
            cfg,
            canvas,
            rng,
            rings: Vec::new(),
            placed: HashMap::new(),
            order: Vec::new(),
            drag: None,
        }
    }

    pub fn config(&self) -> &PlacerConfig {
        &self.cfg
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Marker centers closer than `overlap_factor * footprint_width`.
    pub fn overlaps(&self, a: Point, b: Point) -> bool {
        a.distance(b) < self.cfg.overlap_factor * self.cfg.footprint_width()
    }

    // ------------------------------------------------
    // Placement
    // ------------------------------------------------

    /// Bring the layout in line with the active occupants (arrival order).
    /// Returns whether any marker was added or removed.
    pub fn sync(&mut self, occupants: &[Occupant]) -> bool {
        let ids: Vec<String> = occupants.iter().map(|o| o.id.clone()).collect();

        let gone: Vec<String> = self
            .placed
            .keys()
            .filter(|id| !ids.contains(id))
            .cloned()
            .collect();
        for id in &gone {
            self.forget(id);
        }

        self.order = ids;
        let added = self.place_missing();
        !gone.is_empty() || added > 0
    }

    /// Resize the canvas. Beyond the threshold every marker is placed again
    /// around the new center; returns whether that happened.
    pub fn resize(&mut self, size: Size) -> bool {
        let dw = (size.width - self.canvas.width).abs();
        let dh = (size.height - self.canvas.height).abs();
        if dw <= self.cfg.resize_threshold && dh <= self.cfg.resize_threshold {
            return false;
        }

        self.canvas = size;
        self.rings.clear();
        self.placed.clear();
        self.drag = None;
        self.place_missing();
        true
    }

    /// Drop every placement (the "reset layout" action).
    pub fn reset(&mut self) {
        self.rings.clear();
        self.placed.clear();
        self.drag = None;
        self.place_missing();
    }

    fn forget(&mut self, id: &str) {
        if let Some((_, Anchor::Ring { ring, index })) = self.placed.remove(id)
            && let Some(r) = self.rings.get_mut(ring)
        {
            r.taken[index] = false;
        }
        if self.drag.as_ref().is_some_and(|(d, _)| d == id) {
            self.drag = None;
        }
    }

    fn place_missing(&mut self) -> usize {
        if self.canvas.is_zero() {
            return 0;
        }

        let pending: Vec<String> = self
            .order
            .iter()
            .filter(|id| !self.placed.contains_key(*id))
            .cloned()
            .collect();

        for id in &pending {
            let is_first = self.order.first() == Some(id);
            if is_first && self.try_center(id) {
                continue;
            }
            self.place_on_ring(id);
        }
        pending.len()
    }

    fn try_center(&mut self, id: &str) -> bool {
        let placement = self.fit(self.canvas.center());
        if self.collides(placement.point) {
            return false;
        }
        self.placed
            .insert(id.to_string(), (placement, Anchor::Center));
        true
    }

    fn place_on_ring(&mut self, id: &str) {
        let (ring, index) = self.claim_ring_slot();
        let center = self.canvas.center();
        let (mut angle, mut radius, step) = {
            let r = &self.rings[ring];
            (r.angle(index), r.radius, r.step())
        };

        let mut placement = self.fit(polar(center, radius, angle));
        for attempt in 0..self.cfg.max_attempts {
            if !self.collides(placement.point) {
                break;
            }
            if attempt % 2 == 0 {
                angle += step * self.cfg.angle_nudge;
            } else {
                radius += self.cfg.radius_nudge;
            }
            placement = self.fit(polar(center, radius, angle));
        }

        self.placed
            .insert(id.to_string(), (placement, Anchor::Ring { ring, index }));
    }

    /// First free angular slot, innermost ring first; opens a ring when all are full.
    fn claim_ring_slot(&mut self) -> (usize, usize) {
        for (ri, ring) in self.rings.iter_mut().enumerate() {
            if let Some(i) = ring.taken.iter().position(|t| !t) {
                ring.taken[i] = true;
                return (ri, i);
            }
        }

        let radius = match self.rings.last() {
            Some(last) => last.radius + self.cfg.radius_step(),
            None => self.cfg.first_radius(),
        };
        let capacity = self.cfg.ring_capacity(radius);
        let slot_width = TAU / capacity as f32;
        let mut ring = Ring {
            radius,
            offset: self.rng.gen_range(0.0..slot_width),
            taken: vec![false; capacity],
        };
        ring.taken[0] = true;
        self.rings.push(ring);
        (self.rings.len() - 1, 0)
    }

    fn collides(&self, p: Point) -> bool {
        self.placed
            .values()
            .any(|(other, _)| self.overlaps(p, other.point))
    }

    /// Clamp a marker center so icon and card stay on the canvas, flipping
    /// the card to the left when it would run off the right edge.
    fn fit(&self, p: Point) -> Placement {
        let half_w = self.cfg.icon.width / 2.0;
        let half_h = self.cfg.footprint_height() / 2.0;
        let card_reach = half_w + self.cfg.card_gap + self.cfg.card.width;
        let m = self.cfg.margin;

        let card = if p.x + card_reach > self.canvas.width - m {
            CardSide::Left
        } else {
            CardSide::Right
        };
        let (left, right) = match card {
            CardSide::Right => (half_w, card_reach),
            CardSide::Left => (card_reach, half_w),
        };

        Placement {
            point: Point::new(
                clamp_axis(p.x, m + left, self.canvas.width - m - right),
                clamp_axis(p.y, m + half_h, self.canvas.height - m - half_h),
            ),
            card,
        }
    }

    fn clamp_pointer(&self, p: Point) -> Point {
        let half_w = self.cfg.icon.width / 2.0;
        let half_h = self.cfg.icon.height / 2.0;
        Point::new(
            clamp_axis(p.x, half_w, self.canvas.width - half_w),
            clamp_axis(p.y, half_h, self.canvas.height - half_h),
        )
    }

    // ------------------------------------------------
    // Lookups & drag
    // ------------------------------------------------

    pub fn placement(&self, id: &str) -> Option<Placement> {
        self.placed.get(id).map(|(p, _)| *p)
    }

    /// Rendered marker center; follows the pointer during a drag.
    pub fn position(&self, id: &str) -> Option<Point> {
        if let Some((dragged, p)) = &self.drag
            && dragged == id
        {
            return Some(*p);
        }
        self.placement(id).map(|p| p.point)
    }

    pub fn positions(&self) -> Vec<(String, Point)> {
        self.order
            .iter()
            .filter_map(|id| self.position(id).map(|p| (id.clone(), p)))
            .collect()
    }

    pub fn dragging(&self) -> Option<&str> {
        self.drag.as_ref().map(|(id, _)| id.as_str())
    }

    /// Track the pointer; the stored placement is untouched until release.
    pub fn drag(&mut self, id: &str, pointer: Point) -> bool {
        if !self.placed.contains_key(id) {
            return false;
        }
        let p = self.clamp_pointer(pointer);
        self.drag = Some((id.to_string(), p));
        true
    }

    /// Commit the final clamped pointer position. No snapping back to a ring.
    pub fn release(&mut self, id: &str, pointer: Point) -> bool {
        if !self.placed.contains_key(id) {
            return false;
        }
        let p = self.clamp_pointer(pointer);
        let card = self.fit(p).card;
        if let Some((_, Anchor::Ring { ring, index })) = self.placed.get(id)
            && let Some(r) = self.rings.get_mut(*ring)
        {
            r.taken[*index] = false;
        }
        self.placed.insert(
            id.to_string(),
            (Placement { point: p, card }, Anchor::Free),
        );
        self.drag = None;
        true
    }
}

fn polar(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}
