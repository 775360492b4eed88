// Target placement: rejection sampling of target positions on the wall

use crate::types::Point;
use log::warn;
use rand::Rng;
use std::fmt;

/// Source of uniformly distributed floats.
///
/// Placement draws through this trait so callers can swap the process RNG
/// for a seeded or scripted one.
pub trait RandomSource {
    /// Returns a value in the closed interval `[min, max]`
    fn range(&mut self, min: f64, max: f64) -> f64;
}

/// Adapter exposing any `rand::Rng` as a `RandomSource`
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn range(&mut self, min: f64, max: f64) -> f64 {
        // gen_range panics on an empty range; a zero-width interval has only one value anyway
        if min >= max {
            return min;
        }
        self.0.gen_range(min..=max)
    }
}

fn finite_extent(extent: f64) -> f64 {
    if extent.is_finite() { extent.max(0.0) } else { 0.0 }
}

/// Axis-aligned rectangle centered on the origin, stored as half-extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    horizontal: f64,
    vertical: f64,
}

impl Region {
    /// Creates a region; negative or non-finite extents collapse to zero
    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Region {
            horizontal: finite_extent(horizontal),
            vertical: finite_extent(vertical),
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.horizontal
    }

    pub fn vertical(&self) -> f64 {
        self.vertical
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x.abs() <= self.horizontal && point.y.abs() <= self.vertical
    }

    /// Draws a uniform point inside the region, x first then y
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Point {
        let x = rng.range(-self.horizontal, self.horizontal);
        let y = rng.range(-self.vertical, self.vertical);
        Point { x, y }
    }
}

/// Minimum spacing between targets and the retry budget per placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementPolicy {
    pub min_distance: f64,
    pub max_attempts: u32,
}

impl PlacementPolicy {
    pub fn new(min_distance: f64, max_attempts: u32) -> Self {
        PlacementPolicy {
            min_distance,
            max_attempts,
        }
    }
}

/// Identity of a target within its placement set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTarget {
    pub id: TargetId,
    pub position: Point,
}

/// Targets currently on the wall, in spawn order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementSet {
    targets: Vec<PlacedTarget>,
    next_id: u32,
}

impl PlacementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a target and returns its freshly assigned id
    pub fn insert(&mut self, position: Point) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.targets.push(PlacedTarget { id, position });
        id
    }

    pub fn get(&self, id: TargetId) -> Option<&PlacedTarget> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TargetId) -> bool {
        self.get(id).is_some()
    }

    /// Moves an existing target. Returns false if the id is unknown.
    pub fn set_position(&mut self, id: TargetId, position: Point) -> bool {
        match self.targets.iter_mut().find(|t| t.id == id) {
            Some(target) => {
                target.position = position;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedTarget> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Removes every target and restarts id assignment
    pub fn clear(&mut self) {
        self.targets.clear();
        self.next_id = 0;
    }
}

/// Places targets inside a region while keeping them apart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPlacer {
    pub region: Region,
    pub policy: PlacementPolicy,
}

impl TargetPlacer {
    pub fn new(region: Region, policy: PlacementPolicy) -> Self {
        TargetPlacer { region, policy }
    }

    /// Finds a position for a target.
    ///
    /// Samples until a candidate is at least `min_distance` away from every
    /// member of `existing` (ignoring `exclude`). Once the attempt count
    /// exceeds `max_attempts` the latest sample is returned without being
    /// checked, so `max_attempts == 0` yields a single unchecked sample.
    pub fn place<R: RandomSource + ?Sized>(
        &self,
        existing: &PlacementSet,
        exclude: Option<TargetId>,
        rng: &mut R,
    ) -> Point {
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            let candidate = self.region.sample(rng);

            if attempts > self.policy.max_attempts {
                warn!(
                    target: "placement",
                    "No clear position after {} attempts, using ({:.2}, {:.2})",
                    self.policy.max_attempts,
                    candidate.x,
                    candidate.y
                );
                return candidate;
            }

            if self.is_clear(candidate, existing, exclude) {
                crate::debug_placement!(
                    "Accepted ({:.2}, {:.2}) on attempt {}",
                    candidate.x,
                    candidate.y,
                    attempts
                );
                return candidate;
            }
            crate::debug_placement!("Rejected ({:.2}, {:.2})", candidate.x, candidate.y);
        }
    }

    /// Builds a new set of `count` targets, each placed around the ones before it
    pub fn populate<R: RandomSource + ?Sized>(&self, count: usize, rng: &mut R) -> PlacementSet {
        let mut set = PlacementSet::new();
        for _ in 0..count {
            let position = self.place(&set, None, rng);
            set.insert(position);
        }
        set
    }

    /// Moves the target `id` to a fresh position and returns it.
    /// Unknown ids leave the set untouched and yield `None`.
    pub fn reposition<R: RandomSource + ?Sized>(
        &self,
        set: &mut PlacementSet,
        id: TargetId,
        rng: &mut R,
    ) -> Option<Point> {
        if !set.contains(id) {
            crate::debug_placement!("Reposition ignored, target {} not in set", id);
            return None;
        }
        let position = self.place(set, Some(id), rng);
        set.set_position(id, position);
        Some(position)
    }

    fn is_clear(&self, candidate: Point, existing: &PlacementSet, exclude: Option<TargetId>) -> bool {
        // Only a distance strictly below the minimum rejects
        !existing
            .iter()
            .filter(|t| Some(t.id) != exclude)
            .any(|t| candidate.distance(t.position) < self.policy.min_distance)
    }
}
