//! Pitch grid. The pitch is discretized into 6 columns along the attacking
//! axis and 5 rows across its width; every ball position maps to exactly one
//! zone at all times.

use serde::{Deserialize, Serialize};

use crate::models::team::TeamSide;

pub const GRID_COLS: u8 = 6;
pub const GRID_ROWS: u8 = 5;

/// Signals that a horizontal move tried to leave the grid over a byline.
/// Lateral (row) overflow clamps silently; byline overflow becomes a
/// restart, never an invalid zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BylineOverflow {
    None,
    /// Past column 0.
    Low,
    /// Past column 5.
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zone {
    pub x: u8,
    pub y: u8,
}

impl Zone {
    /// Kickoff spot. The 6-column axis has no exact centre column; restarts
    /// use the middle row of column 2.
    pub const CENTER: Zone = Zone { x: 2, y: 2 };

    pub fn new(x: u8, y: u8) -> Option<Zone> {
        (x < GRID_COLS && y < GRID_ROWS).then_some(Zone { x, y })
    }

    pub fn in_bounds(self) -> bool {
        self.x < GRID_COLS && self.y < GRID_ROWS
    }

    /// Apply a signed displacement, clamping rows and reporting byline
    /// overflow on the column axis.
    pub fn offset(self, dx: i16, dy: i16) -> (Zone, BylineOverflow) {
        let nx = self.x as i16 + dx;
        let ny = (self.y as i16 + dy).clamp(0, GRID_ROWS as i16 - 1);
        let overflow = if nx < 0 {
            BylineOverflow::Low
        } else if nx >= GRID_COLS as i16 {
            BylineOverflow::High
        } else {
            BylineOverflow::None
        };
        let nx = nx.clamp(0, GRID_COLS as i16 - 1);
        (Zone { x: nx as u8, y: ny as u8 }, overflow)
    }

    /// Column band in the attacking frame of `side`: 0 is the side's own
    /// goal line, 5 is the opponent's.
    pub fn attacking_band(self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.x,
            TeamSide::Away => GRID_COLS - 1 - self.x,
        }
    }

    /// True for the touchline rows, where crosses originate.
    pub fn is_wide(self) -> bool {
        self.y == 0 || self.y == GRID_ROWS - 1
    }

    /// The zone in front of `side`'s own goal, where the keeper restarts.
    pub fn keeper_spot(side: TeamSide) -> Zone {
        match side {
            TeamSide::Home => Zone { x: 0, y: 2 },
            TeamSide::Away => Zone { x: GRID_COLS - 1, y: 2 },
        }
    }

    /// Central zone in front of the goal `side` is attacking.
    pub fn attacking_box(side: TeamSide) -> Zone {
        Zone::keeper_spot(side.opponent())
    }

    /// Midfield zone on `side`'s own half, the landing area for clearances
    /// and goal kicks.
    pub fn own_midfield(side: TeamSide) -> Zone {
        match side {
            TeamSide::Home => Zone { x: 1, y: 2 },
            TeamSide::Away => Zone { x: GRID_COLS - 2, y: 2 },
        }
    }

    /// Convert a displacement expressed in the attacking frame of `side`
    /// (positive dx = toward the opponent's goal) into grid coordinates.
    pub fn to_grid_frame(side: TeamSide, dx: i16) -> i16 {
        match side {
            TeamSide::Home => dx,
            TeamSide::Away => -dx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_center_in_bounds() {
        assert!(Zone::CENTER.in_bounds());
    }

    #[test]
    fn test_new_rejects_out_of_grid() {
        assert!(Zone::new(6, 0).is_none());
        assert!(Zone::new(0, 5).is_none());
        assert!(Zone::new(5, 4).is_some());
    }

    #[test]
    fn test_offset_clamps_rows() {
        let (zone, overflow) = Zone { x: 3, y: 4 }.offset(0, 2);
        assert_eq!(zone, Zone { x: 3, y: 4 });
        assert_eq!(overflow, BylineOverflow::None);
    }

    #[test]
    fn test_offset_reports_byline_overflow() {
        let (zone, overflow) = Zone { x: 5, y: 2 }.offset(1, 0);
        assert_eq!(zone, Zone { x: 5, y: 2 });
        assert_eq!(overflow, BylineOverflow::High);

        let (zone, overflow) = Zone { x: 0, y: 2 }.offset(-2, 0);
        assert_eq!(zone, Zone { x: 0, y: 2 });
        assert_eq!(overflow, BylineOverflow::Low);
    }

    #[test]
    fn test_attacking_band_mirrors_for_away() {
        let zone = Zone { x: 5, y: 2 };
        assert_eq!(zone.attacking_band(TeamSide::Home), 5);
        assert_eq!(zone.attacking_band(TeamSide::Away), 0);
    }

    #[test]
    fn test_keeper_and_box_spots() {
        assert_eq!(Zone::keeper_spot(TeamSide::Home), Zone { x: 0, y: 2 });
        assert_eq!(Zone::attacking_box(TeamSide::Home), Zone { x: 5, y: 2 });
        assert_eq!(Zone::attacking_box(TeamSide::Away), Zone { x: 0, y: 2 });
    }

    proptest! {
        #[test]
        fn prop_offset_never_leaves_grid(
            x in 0u8..GRID_COLS,
            y in 0u8..GRID_ROWS,
            dx in -6i16..=6,
            dy in -6i16..=6,
        ) {
            let (zone, _) = Zone { x, y }.offset(dx, dy);
            prop_assert!(zone.in_bounds());
        }
    }
}
