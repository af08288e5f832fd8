//! Mapping raw key names onto `Direction`.
//!
//! Recognised keys (case-insensitive):
//! - `w`, `up`, `arrowup` → `Up`
//! - `d`, `right`, `arrowright` → `Right`
//! - `s`, `down`, `arrowdown` → `Down`
//! - `a`, `left`, `arrowleft` → `Left`
//!
//! Anything else is ignored by callers rather than treated as an error.

use std::fmt;
use std::str::FromStr;

use crate::engine::Direction;
use crate::error::ParseError;

impl Direction {
    /// Map a key name to a direction, `None` for keys the game does not use.
    ///
    /// ```
    /// use puzzle_2048::engine::Direction;
    /// assert_eq!(Direction::from_key("W"), Some(Direction::Up));
    /// assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
    /// assert_eq!(Direction::from_key("q"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Direction> {
        match key.trim().to_ascii_lowercase().as_str() {
            "w" | "up" | "arrowup" => Some(Direction::Up),
            "d" | "right" | "arrowright" => Some(Direction::Right),
            "s" | "down" | "arrowdown" => Some(Direction::Down),
            "a" | "left" | "arrowleft" => Some(Direction::Left),
            _ => None,
        }
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::from_key(s).ok_or_else(|| ParseError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "UP",
            Direction::Right => "RIGHT",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_keys() {
        assert_eq!(Direction::from_key("w"), Some(Direction::Up));
        assert_eq!(Direction::from_key("d"), Some(Direction::Right));
        assert_eq!(Direction::from_key("s"), Some(Direction::Down));
        assert_eq!(Direction::from_key("a"), Some(Direction::Left));
    }

    #[test]
    fn arrows_and_case() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("RIGHT"), Some(Direction::Right));
        assert_eq!(Direction::from_key(" S \n"), Some(Direction::Down));
        assert_eq!(Direction::from_key("arrowleft"), Some(Direction::Left));
    }

    #[test]
    fn unknown_keys() {
        assert_eq!(Direction::from_key(""), None);
        assert_eq!(Direction::from_key("x"), None);
        assert_eq!(
            "enter".parse::<Direction>(),
            Err(ParseError::UnknownKey("enter".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
        assert_eq!(Direction::Down.to_string(), "DOWN");
    }
}
