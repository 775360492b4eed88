use crate::config::{HUD_HEIGHT, MIN_WALL_DISTANCE, WALL_MARGIN};
use crate::game::Score;
use crate::placement::PlacementSet;
use crate::spawner::EnvironmentSettings;
use crate::types::{Point, Size};
use macroquad::prelude::*;

const WALL_COLOR: Color = Color::new(0.18, 0.19, 0.22, 1.0);
const BACKGROUND_COLOR: Color = Color::new(0.08, 0.08, 0.10, 1.0);
const TARGET_COLOR: Color = Color::new(0.92, 0.26, 0.26, 1.0);

/// Maps wall coordinates (origin at the center, y up) onto the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallView {
    pub center: Vec2,
    pub pixels_per_unit: f32,
}

impl WallView {
    /// Fits the wall into the screen below the HUD. A farther wall is drawn
    /// proportionally smaller; at the minimum distance it fills the view.
    pub fn fit(wall: Size, wall_distance: u32, screen_width: f32, screen_height: f32) -> Self {
        let hud = HUD_HEIGHT as f32;
        let avail_w = (screen_width - 2.0 * WALL_MARGIN).max(1.0);
        let avail_h = (screen_height - hud - 2.0 * WALL_MARGIN).max(1.0);
        let fit = (avail_w / wall.width as f32).min(avail_h / wall.height as f32);
        let perspective = MIN_WALL_DISTANCE as f32 / wall_distance.max(1) as f32;

        WallView {
            center: vec2(screen_width / 2.0, hud + (screen_height - hud) / 2.0),
            pixels_per_unit: fit * perspective,
        }
    }

    pub fn to_screen(&self, p: Point) -> Vec2 {
        vec2(
            self.center.x + p.x as f32 * self.pixels_per_unit,
            self.center.y - p.y as f32 * self.pixels_per_unit,
        )
    }

    pub fn to_wall(&self, screen: Vec2) -> Point {
        Point {
            x: ((screen.x - self.center.x) / self.pixels_per_unit) as f64,
            y: ((self.center.y - screen.y) / self.pixels_per_unit) as f64,
        }
    }
}

// Draws the trainer with macroquad
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Renderer
    }

    pub fn draw_frame(
        &self,
        view: &WallView,
        settings: &EnvironmentSettings,
        targets: &PlacementSet,
        target_radius: f64,
        score: &Score,
    ) {
        clear_background(BACKGROUND_COLOR);
        Self::draw_wall(view, settings.wall);
        Self::draw_targets(view, targets, target_radius);
        Self::draw_hud(settings, score);
        Self::draw_crosshair();
    }

    fn draw_wall(view: &WallView, wall: Size) {
        let top_left = view.to_screen(Point::new(-wall.width / 2.0, wall.height / 2.0));
        let w = wall.width as f32 * view.pixels_per_unit;
        let h = wall.height as f32 * view.pixels_per_unit;
        draw_rectangle(top_left.x, top_left.y, w, h, WALL_COLOR);
        draw_rectangle_lines(top_left.x, top_left.y, w, h, 2.0, DARKGRAY);
    }

    fn draw_targets(view: &WallView, targets: &PlacementSet, target_radius: f64) {
        let radius = target_radius as f32 * view.pixels_per_unit;
        for target in targets.iter() {
            let pos = view.to_screen(target.position);
            draw_circle(pos.x, pos.y, radius, TARGET_COLOR);
            draw_circle_lines(pos.x, pos.y, radius, 1.5, WHITE);
        }
    }

    fn draw_hud(settings: &EnvironmentSettings, score: &Score) {
        let text = format!(
            "Hits: {}  Misses: {}  Accuracy: {:.1}%  Targets: {}",
            score.hits,
            score.misses,
            score.accuracy(),
            settings.target_count
        );
        draw_text(&text, 10.0, 26.0, 24.0, WHITE);

        let help = "LMB shoot | R respawn | Up/Down targets | Esc quit";
        draw_text(help, screen_width() - 420.0, 26.0, 18.0, LIGHTGRAY);
    }

    fn draw_crosshair() {
        let (mx, my) = mouse_position();
        let size = 8.0;
        draw_line(mx - size, my, mx + size, my, 2.0, GREEN);
        draw_line(mx, my - size, mx, my + size, 2.0, GREEN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_fit_at_min_distance_fills_available_area() {
        // 800 - 40 margin = 760 wide, 600 - 40 hud - 40 margin = 520 high
        let view = WallView::fit(Size::new(20.0, 10.0), MIN_WALL_DISTANCE, 800.0, 600.0);
        assert_approx_eq!(view.pixels_per_unit, 38.0);
        assert_approx_eq!(view.center.x, 400.0);
        assert_approx_eq!(view.center.y, 320.0);
    }

    #[test]
    fn test_farther_wall_is_smaller() {
        let near = WallView::fit(Size::new(20.0, 10.0), MIN_WALL_DISTANCE, 800.0, 600.0);
        let far = WallView::fit(Size::new(20.0, 10.0), MIN_WALL_DISTANCE * 2, 800.0, 600.0);
        assert_approx_eq!(far.pixels_per_unit * 2.0, near.pixels_per_unit);
    }

    #[test]
    fn test_screen_mapping_flips_y() {
        let view = WallView {
            center: vec2(100.0, 100.0),
            pixels_per_unit: 10.0,
        };
        let screen = view.to_screen(Point::new(2.0, 3.0));
        assert_approx_eq!(screen.x, 120.0);
        assert_approx_eq!(screen.y, 70.0);

        let back = view.to_wall(vec2(90.0, 110.0));
        assert_approx_eq!(back.x, -1.0);
        assert_approx_eq!(back.y, -1.0);
    }
}
