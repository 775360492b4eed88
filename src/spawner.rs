use crate::config::*;
use crate::error::SettingsError;
use crate::placement::{PlacementPolicy, PlacementSet, RandomSource, Region, TargetId, TargetPlacer};
use crate::types::{Point, Size};
use log::info;

/// Wall and target parameters for a spawn session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentSettings {
    pub wall: Size,
    pub wall_distance: u32,
    pub target_size: f64, // Diameter
    pub target_count: usize,
    pub min_distance: f64,
    pub max_attempts: u32,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        EnvironmentSettings {
            wall: Size::new(DEFAULT_WALL_WIDTH, DEFAULT_WALL_HEIGHT),
            wall_distance: DEFAULT_WALL_DISTANCE,
            target_size: DEFAULT_TARGET_SIZE,
            target_count: DEFAULT_TARGET_COUNT,
            min_distance: DEFAULT_MIN_DISTANCE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), SettingsError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

fn check_wall(wall: Size) -> Result<(), SettingsError> {
    check_range("wall width", wall.width, MIN_WALL_WIDTH, MAX_WALL_WIDTH)?;
    check_range("wall height", wall.height, MIN_WALL_HEIGHT, MAX_WALL_HEIGHT)
}

fn check_wall_distance(distance: u32) -> Result<(), SettingsError> {
    check_range(
        "wall distance",
        distance as f64,
        MIN_WALL_DISTANCE as f64,
        MAX_WALL_DISTANCE as f64,
    )
}

fn check_target_size(size: f64) -> Result<(), SettingsError> {
    check_range("target size", size, MIN_TARGET_SIZE, MAX_TARGET_SIZE)
}

fn check_target_count(count: usize) -> Result<(), SettingsError> {
    check_range(
        "target count",
        count as f64,
        MIN_TARGET_COUNT as f64,
        MAX_TARGET_COUNT as f64,
    )
}

fn check_min_distance(distance: f64) -> Result<(), SettingsError> {
    // Written this way so NaN is rejected too
    if distance >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::InvalidMinDistance(distance))
    }
}

fn check_max_attempts(attempts: u32) -> Result<(), SettingsError> {
    check_range("max attempts", attempts as f64, 0.0, MAX_MAX_ATTEMPTS as f64)
}

impl EnvironmentSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_wall(self.wall)?;
        check_wall_distance(self.wall_distance)?;
        check_target_size(self.target_size)?;
        check_target_count(self.target_count)?;
        check_min_distance(self.min_distance)?;
        check_max_attempts(self.max_attempts)
    }

    /// Area available to target centers: half the wall, shrunk by one target size
    pub fn region(&self) -> Region {
        Region::new(
            self.wall.width / 2.0 - self.target_size,
            self.wall.height / 2.0 - self.target_size,
        )
    }

    pub fn policy(&self) -> PlacementPolicy {
        PlacementPolicy::new(self.min_distance, self.max_attempts)
    }

    pub fn placer(&self) -> TargetPlacer {
        TargetPlacer::new(self.region(), self.policy())
    }
}

/// Owns the targets on the wall and the settings they were spawned with.
///
/// Setting changes are staged and only reach the wall on the next `spawn`.
/// While overrides are locked, setters are ignored until that spawn.
#[derive(Debug)]
pub struct TargetSpawner<R> {
    settings: EnvironmentSettings,
    placer: TargetPlacer,     // Layout used for the current set
    target_radius: f64,       // Radius of the targets currently on the wall
    targets: PlacementSet,
    rng: R,
    overrides_locked: bool,
}

impl<R: RandomSource> TargetSpawner<R> {
    pub fn new(settings: EnvironmentSettings, rng: R) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(TargetSpawner {
            settings,
            placer: settings.placer(),
            target_radius: settings.target_size / 2.0,
            targets: PlacementSet::new(),
            rng,
            overrides_locked: false,
        })
    }

    pub fn settings(&self) -> &EnvironmentSettings {
        &self.settings
    }

    pub fn targets(&self) -> &PlacementSet {
        &self.targets
    }

    /// Placer in effect for the targets currently on the wall
    pub fn placer(&self) -> &TargetPlacer {
        &self.placer
    }

    pub fn target_radius(&self) -> f64 {
        self.target_radius
    }

    /// Freezes the current settings; setters become no-ops until the next spawn
    pub fn lock_overrides(&mut self) {
        self.overrides_locked = true;
    }

    pub fn overrides_locked(&self) -> bool {
        self.overrides_locked
    }

    /// Clears the wall and places a fresh set of targets from the current settings
    pub fn spawn(&mut self) -> &PlacementSet {
        self.placer = self.settings.placer();
        self.target_radius = self.settings.target_size / 2.0;
        self.targets = self
            .placer
            .populate(self.settings.target_count, &mut self.rng);
        self.overrides_locked = false;

        info!(
            target: "spawner",
            "Spawned {} targets on a {}x{} wall (region {:.2}x{:.2})",
            self.targets.len(),
            self.settings.wall.width,
            self.settings.wall.height,
            self.placer.region.horizontal(),
            self.placer.region.vertical()
        );
        &self.targets
    }

    /// Moves a hit target somewhere else on the wall
    pub fn hit(&mut self, id: TargetId) -> Option<Point> {
        let moved = self.placer.reposition(&mut self.targets, id, &mut self.rng);
        if let Some(position) = moved {
            crate::debug_spawner!("Target {} moved to ({:.2}, {:.2})", id, position.x, position.y);
        }
        moved
    }

    /// First target (in spawn order) whose circle contains `point`
    pub fn target_at(&self, point: Point) -> Option<TargetId> {
        self.targets
            .iter()
            .find(|t| t.position.distance(point) <= self.target_radius)
            .map(|t| t.id)
    }

    /// Replaces all settings at once
    pub fn apply(&mut self, settings: EnvironmentSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.stage(|s| *s = settings);
        Ok(())
    }

    pub fn set_wall_size(&mut self, wall: Size) -> Result<(), SettingsError> {
        check_wall(wall)?;
        self.stage(|s| s.wall = wall);
        Ok(())
    }

    pub fn set_wall_distance(&mut self, distance: u32) -> Result<(), SettingsError> {
        check_wall_distance(distance)?;
        self.stage(|s| s.wall_distance = distance);
        Ok(())
    }

    pub fn set_target_size(&mut self, size: f64) -> Result<(), SettingsError> {
        check_target_size(size)?;
        self.stage(|s| s.target_size = size);
        Ok(())
    }

    pub fn set_target_count(&mut self, count: usize) -> Result<(), SettingsError> {
        check_target_count(count)?;
        self.stage(|s| s.target_count = count);
        Ok(())
    }

    pub fn set_min_distance(&mut self, distance: f64) -> Result<(), SettingsError> {
        check_min_distance(distance)?;
        self.stage(|s| s.min_distance = distance);
        Ok(())
    }

    pub fn set_max_attempts(&mut self, attempts: u32) -> Result<(), SettingsError> {
        check_max_attempts(attempts)?;
        self.stage(|s| s.max_attempts = attempts);
        Ok(())
    }

    fn stage(&mut self, update: impl FnOnce(&mut EnvironmentSettings)) {
        if self.overrides_locked {
            crate::debug_spawner!("Settings are locked until the next spawn, change ignored");
            return;
        }
        update(&mut self.settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::testing::ScriptedSource;
    use crate::placement::RngSource;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(seed: u64) -> RngSource<StdRng> {
        RngSource(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_region_from_default_wall() {
        let region = EnvironmentSettings::default().region();
        assert_approx_eq!(region.horizontal(), 9.0);
        assert_approx_eq!(region.vertical(), 6.5);
    }

    #[test]
    fn test_region_collapses_when_targets_are_larger_than_wall() {
        let settings = EnvironmentSettings {
            wall: Size::new(3.0, 3.0),
            target_size: 5.0,
            ..Default::default()
        };
        let region = settings.region();
        assert_eq!(region.horizontal(), 0.0);
        assert_eq!(region.vertical(), 0.0);
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let settings = EnvironmentSettings {
            target_count: 0,
            ..Default::default()
        };
        let err = TargetSpawner::new(settings, seeded(1)).unwrap_err();
        assert_eq!(
            err,
            SettingsError::OutOfRange {
                name: "target count",
                value: 0.0,
                min: 1.0,
                max: 30.0,
            }
        );
    }

    #[test]
    fn test_setters_validate_bounds() {
        let mut spawner = TargetSpawner::new(EnvironmentSettings::default(), seeded(1)).unwrap();

        assert!(spawner.set_wall_size(Size::new(41.0, 10.0)).is_err());
        assert!(spawner.set_wall_distance(14).is_err());
        assert!(spawner.set_target_size(0.05).is_err());
        assert!(spawner.set_target_count(31).is_err());
        assert_eq!(
            spawner.set_min_distance(-1.0),
            Err(SettingsError::InvalidMinDistance(-1.0))
        );
        assert!(spawner.set_min_distance(f64::NAN).is_err());
        assert!(spawner.set_max_attempts(31).is_err());
        assert_eq!(*spawner.settings(), EnvironmentSettings::default());

        spawner.set_wall_size(Size::new(40.0, 30.0)).unwrap();
        spawner.set_max_attempts(0).unwrap();
        assert_eq!(spawner.settings().wall, Size::new(40.0, 30.0));
        assert_eq!(spawner.settings().max_attempts, 0);
    }

    #[test]
    fn test_spawn_places_configured_count() {
        let mut spawner = TargetSpawner::new(EnvironmentSettings::default(), seeded(3)).unwrap();
        let region = spawner.settings().region();

        let set = spawner.spawn();
        assert_eq!(set.len(), DEFAULT_TARGET_COUNT);
        assert!(set.iter().all(|t| region.contains(t.position)));
    }

    #[test]
    fn test_changes_apply_on_next_spawn() {
        let mut spawner = TargetSpawner::new(EnvironmentSettings::default(), seeded(5)).unwrap();
        spawner.spawn();

        spawner.set_target_count(3).unwrap();
        spawner.set_target_size(2.0).unwrap();
        assert_eq!(spawner.targets().len(), DEFAULT_TARGET_COUNT);
        assert_approx_eq!(spawner.target_radius(), 0.5);

        spawner.spawn();
        assert_eq!(spawner.targets().len(), 3);
        assert_approx_eq!(spawner.target_radius(), 1.0);
        assert_approx_eq!(spawner.placer().region.horizontal(), 8.0);
    }

    #[test]
    fn test_locked_overrides_ignore_setters_until_spawn() {
        let mut spawner = TargetSpawner::new(EnvironmentSettings::default(), seeded(9)).unwrap();
        spawner.lock_overrides();

        spawner.set_target_count(4).unwrap();
        assert_eq!(spawner.settings().target_count, DEFAULT_TARGET_COUNT);

        spawner.spawn();
        assert!(!spawner.overrides_locked());

        spawner.set_target_count(4).unwrap();
        assert_eq!(spawner.settings().target_count, 4);
    }

    #[test]
    fn test_apply_replaces_settings_unless_locked() {
        let mut spawner = TargetSpawner::new(EnvironmentSettings::default(), seeded(13)).unwrap();
        let custom = EnvironmentSettings {
            wall: Size::new(10.0, 8.0),
            target_count: 5,
            min_distance: 1.5,
            ..Default::default()
        };

        spawner.lock_overrides();
        spawner.apply(custom).unwrap();
        assert_eq!(*spawner.settings(), EnvironmentSettings::default());

        let invalid = EnvironmentSettings {
            max_attempts: 99,
            ..custom
        };
        assert!(spawner.apply(invalid).is_err());

        spawner.spawn();
        spawner.apply(custom).unwrap();
        assert_eq!(*spawner.settings(), custom);

        spawner.spawn();
        assert_eq!(spawner.targets().len(), 5);
        assert_approx_eq!(spawner.placer().region.horizontal(), 4.0);
    }

    #[test]
    fn test_hit_moves_only_the_hit_target() {
        let settings = EnvironmentSettings {
            target_count: 2,
            ..Default::default()
        };
        let rng = ScriptedSource::points(&[(0.0, 0.0), (5.0, 0.0), (-3.0, 2.0)]);
        let mut spawner = TargetSpawner::new(settings, rng).unwrap();
        spawner.spawn();

        let first = spawner.target_at(Point::new(0.2, 0.2)).unwrap();
        assert_eq!(spawner.hit(first), Some(Point::new(-3.0, 2.0)));

        let positions: Vec<Point> = spawner.targets().iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![Point::new(-3.0, 2.0), Point::new(5.0, 0.0)]);
    }

    #[test]
    fn test_target_at_misses_outside_radius() {
        let settings = EnvironmentSettings {
            target_count: 1,
            ..Default::default()
        };
        let rng = ScriptedSource::points(&[(1.0, 1.0)]);
        let mut spawner = TargetSpawner::new(settings, rng).unwrap();
        spawner.spawn();

        assert!(spawner.target_at(Point::new(1.5, 1.0)).is_some());
        assert!(spawner.target_at(Point::new(1.6, 1.0)).is_none());
        assert_eq!(spawner.hit(TargetId(7)), None);
    }
}
