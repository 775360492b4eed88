//! Mouse sensitivity presets for carrying a setting over from other shooters.

use crate::error::SensitivityError;

/// Multipliers from a game's sensitivity value to the trainer's own.
/// The first entry is the fallback for unknown titles.
pub const GAME_MULTIPLIERS: [(&str, f64); 3] = [
    ("Default", 1.0),
    ("CS2", 0.44),
    ("Valorant", 1.399999),
];

/// Known game titles, in table order
pub fn game_titles() -> impl Iterator<Item = &'static str> {
    GAME_MULTIPLIERS.iter().map(|(title, _)| *title)
}

pub fn multiplier(game: &str) -> Option<f64> {
    GAME_MULTIPLIERS
        .iter()
        .find(|(title, _)| *title == game)
        .map(|(_, mult)| *mult)
}

/// Looks up a title, failing with the list of valid ones
pub fn parse_game(game: &str) -> Result<&'static str, SensitivityError> {
    game_titles().find(|title| *title == game).ok_or_else(|| {
        SensitivityError::UnknownGame(game.to_string(), game_titles().collect::<Vec<_>>().join(", "))
    })
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Converts `value` from `source` to `target`. An unknown target leaves the value as is.
pub fn convert_between(source: &str, target: &str, value: f64) -> f64 {
    match multiplier(target) {
        Some(target_mult) => to_trainer(source, value) / target_mult,
        None => value,
    }
}

fn to_trainer(game: &str, value: f64) -> f64 {
    match multiplier(game) {
        Some(mult) => value * mult,
        None => value,
    }
}

/// A sensitivity expressed in some game's units
#[derive(Debug, Clone, PartialEq)]
pub struct MouseSensitivity {
    source_game: &'static str,
    value: f64,
}

impl MouseSensitivity {
    /// Unknown titles fall back to the first preset; the value is rounded to 3 decimals
    pub fn new(game: &str, value: f64) -> Self {
        let source_game = parse_game(game).unwrap_or(GAME_MULTIPLIERS[0].0);
        MouseSensitivity {
            source_game,
            value: round3(value),
        }
    }

    pub fn source_game(&self) -> &'static str {
        self.source_game
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sensitivity the trainer's camera should use
    pub fn trainer_sensitivity(&self) -> f64 {
        to_trainer(self.source_game, self.value)
    }

    /// Re-expresses this sensitivity in another game's units
    pub fn convert_to(&mut self, game: &str) {
        if let (Ok(title), Some(mult)) = (parse_game(game), multiplier(game)) {
            self.value = self.trainer_sensitivity() / mult;
            self.source_game = title;
        }
    }
}
