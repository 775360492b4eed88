use crate::config::{MAX_TARGET_COUNT, MIN_TARGET_COUNT};
use crate::placement::{RandomSource, TargetId};
use crate::render::{Renderer, WallView};
use crate::spawner::TargetSpawner;
use crate::types::Point;
use log::{info, warn};
use macroquad::prelude::{
    KeyCode, MouseButton, is_key_pressed, is_mouse_button_pressed, mouse_position, next_frame,
    screen_height, screen_width, show_mouse, vec2,
};

/// Hit/miss counters for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub hits: u32,
    pub misses: u32,
}

impl Score {
    /// Percentage of shots that hit, 0 when nothing was fired yet
    pub fn accuracy(&self) -> f64 {
        let shots = self.hits + self.misses;
        if shots == 0 {
            return 0.0;
        }
        self.hits as f64 * 100.0 / shots as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    Hit { target: TargetId, moved_to: Point },
    Miss,
}

/// The Game struct drives a spawn session from player input
pub struct Game<R> {
    pub spawner: TargetSpawner<R>,
    pub score: Score,
}

impl<R: RandomSource> Game<R> {
    /// Wraps a session and puts the first set of targets on the wall
    pub fn new(mut spawner: TargetSpawner<R>) -> Self {
        spawner.spawn();
        Game {
            spawner,
            score: Score::default(),
        }
    }

    /// Resolves a shot at a wall position
    pub fn shoot(&mut self, at: Point) -> ShotOutcome {
        let hit = self
            .spawner
            .target_at(at)
            .and_then(|id| self.spawner.hit(id).map(|moved_to| (id, moved_to)));

        match hit {
            Some((target, moved_to)) => {
                self.score.hits += 1;
                crate::debug_game!("Hit target {} at ({:.2}, {:.2})", target, at.x, at.y);
                ShotOutcome::Hit { target, moved_to }
            }
            None => {
                self.score.misses += 1;
                crate::debug_game!("Miss at ({:.2}, {:.2})", at.x, at.y);
                ShotOutcome::Miss
            }
        }
    }

    /// Rebuilds the wall and resets the score
    pub fn respawn(&mut self) {
        self.spawner.spawn();
        self.score = Score::default();
    }

    /// Changes the target count by `delta` within bounds and respawns
    pub fn adjust_target_count(&mut self, delta: i32) {
        let current = self.spawner.settings().target_count as i64;
        let wanted = (current + delta as i64).clamp(MIN_TARGET_COUNT as i64, MAX_TARGET_COUNT as i64);
        if wanted == current {
            return;
        }
        match self.spawner.set_target_count(wanted as usize) {
            Ok(()) => self.respawn(),
            Err(e) => warn!("Could not change target count: {}", e),
        }
    }

    fn view(&self) -> WallView {
        let settings = self.spawner.settings();
        WallView::fit(
            settings.wall,
            settings.wall_distance,
            screen_width(),
            screen_height(),
        )
    }

    /// Run the main loop until Escape is pressed
    pub async fn run(&mut self, renderer: &Renderer) {
        info!("Starting main loop...");
        show_mouse(false);

        while !is_key_pressed(KeyCode::Escape) {
            let view = self.view();

            if is_mouse_button_pressed(MouseButton::Left) {
                let (mx, my) = mouse_position();
                self.shoot(view.to_wall(vec2(mx, my)));
            }
            if is_key_pressed(KeyCode::R) {
                self.respawn();
            }
            if is_key_pressed(KeyCode::Up) {
                self.adjust_target_count(1);
            }
            if is_key_pressed(KeyCode::Down) {
                self.adjust_target_count(-1);
            }

            renderer.draw_frame(
                &view,
                self.spawner.settings(),
                self.spawner.targets(),
                self.spawner.target_radius(),
                &self.score,
            );
            next_frame().await;
        }

        info!(
            "Session over: {} hits, {} misses ({:.1}% accuracy)",
            self.score.hits,
            self.score.misses,
            self.score.accuracy()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::testing::ScriptedSource;
    use crate::spawner::EnvironmentSettings;
    use assert_approx_eq::assert_approx_eq;

    fn scripted_game(points: &[(f64, f64)], count: usize) -> Game<ScriptedSource> {
        let settings = EnvironmentSettings {
            target_count: count,
            ..Default::default()
        };
        let spawner = TargetSpawner::new(settings, ScriptedSource::points(points)).unwrap();
        Game::new(spawner)
    }

    #[test]
    fn test_accuracy() {
        assert_approx_eq!(Score::default().accuracy(), 0.0);
        let score = Score { hits: 3, misses: 1 };
        assert_approx_eq!(score.accuracy(), 75.0);
    }

    #[test]
    fn test_shot_on_target_counts_hit_and_moves_it() {
        let mut game = scripted_game(&[(0.0, 0.0), (4.0, 4.0), (-6.0, -3.0)], 2);

        let outcome = game.shoot(Point::new(0.1, -0.1));
        assert_eq!(
            outcome,
            ShotOutcome::Hit {
                target: TargetId(0),
                moved_to: Point::new(-6.0, -3.0),
            }
        );
        assert_eq!(game.score, Score { hits: 1, misses: 0 });
        assert_eq!(game.spawner.targets().len(), 2);
    }

    #[test]
    fn test_shot_off_target_counts_miss() {
        let mut game = scripted_game(&[(0.0, 0.0)], 1);
        assert_eq!(game.shoot(Point::new(3.0, 3.0)), ShotOutcome::Miss);
        assert_eq!(game.score, Score { hits: 0, misses: 1 });
        assert_eq!(
            game.spawner.targets().get(TargetId(0)).map(|t| t.position),
            Some(Point::new(0.0, 0.0))
        );
    }

    #[test]
    fn test_adjust_target_count_respawns_within_bounds() {
        let mut game = scripted_game(&[(0.0, 0.0), (-8.0, 6.0), (8.0, -6.0), (1.0, 1.0)], 1);
        game.score.misses = 4;

        game.adjust_target_count(1);
        assert_eq!(game.spawner.targets().len(), 2);
        assert_eq!(game.score, Score::default());

        game.adjust_target_count(-1);
        assert_eq!(game.spawner.targets().len(), 1);

        // At the lower bound the second step does nothing, so the script is not drawn from
        game.adjust_target_count(-1);
        assert_eq!(game.spawner.settings().target_count, MIN_TARGET_COUNT);
        assert_eq!(game.spawner.targets().len(), 1);
    }
}
