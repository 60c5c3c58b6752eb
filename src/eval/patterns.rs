//! Line pattern detection and pattern weights
//!
//! A run is a maximal line of one side's stones along one of the four axes.
//! It is classified from its length and how many of its two ends are open
//! (in bounds and empty).

use crate::board::{Board, Pos, Stone, WIN_LENGTH};
use crate::engine::ConfigError;

/// Classification of a run of stones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Five or more in a row
    Five,
    /// A live four that is one move from five at an open end: `_OOOO_`
    /// (only produced by the evaluator)
    OpenFour,
    /// Four with both ends open
    LiveFour,
    /// Four with exactly one end open: `XOOOO_`
    DeadFour,
    LiveThree,
    DeadThree,
    LiveTwo,
    DeadTwo,
}

impl Pattern {
    /// Classify a run from its length and open ends.
    /// Runs shorter than two, or closed at both ends, have no pattern.
    pub fn classify(len: usize, open_start: bool, open_end: bool) -> Option<Pattern> {
        let live = open_start && open_end;
        let dead = open_start != open_end;
        match len {
            n if n >= WIN_LENGTH => Some(Pattern::Five),
            4 if live => Some(Pattern::LiveFour),
            4 if dead => Some(Pattern::DeadFour),
            3 if live => Some(Pattern::LiveThree),
            3 if dead => Some(Pattern::DeadThree),
            2 if live => Some(Pattern::LiveTwo),
            2 if dead => Some(Pattern::DeadTwo),
            _ => None,
        }
    }
}

/// Full description of a run scanned from its canonical start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: Pos,
    pub len: usize,
    /// The cell before `start` is on the board and empty
    pub open_start: bool,
    /// The cell after the last stone is on the board and empty
    pub open_end: bool,
    pub pattern: Option<Pattern>,
}

impl Run {
    /// Last stone of the run
    pub fn end(&self, dir: (i32, i32), size: usize) -> Option<Pos> {
        self.start.offset(dir.0, dir.1, self.len as i32 - 1, size)
    }
}

#[inline]
fn is_open(board: &Board, pos: Option<Pos>) -> bool {
    pos.map_or(false, |p| board.get(p) == Stone::Empty)
}

/// Scan the run of `side` that starts at `pos` and extends along `dir`.
///
/// Returns `None` unless `pos` holds `side` and is the canonical start of
/// its run (the cell behind it does not hold `side`).
pub fn scan_run(board: &Board, pos: Pos, dir: (i32, i32), side: Stone) -> Option<Run> {
    let (dr, dc) = dir;
    let size = board.size();
    if side == Stone::Empty || board.get(pos) != side {
        return None;
    }
    let behind = pos.offset(dr, dc, -1, size);
    if behind.map_or(false, |p| board.get(p) == side) {
        return None;
    }

    let len = 1 + (1..)
        .map_while(|step| pos.offset(dr, dc, step, size))
        .take_while(|&p| board.get(p) == side)
        .count();

    let open_start = is_open(board, behind);
    let open_end = is_open(board, pos.offset(dr, dc, len as i32, size));

    Some(Run {
        start: pos,
        len,
        open_start,
        open_end,
        pattern: Pattern::classify(len, open_start, open_end),
    })
}

/// Classify the run of `side` starting at `pos` along `dir`.
#[inline]
pub fn detect(board: &Board, pos: Pos, dir: (i32, i32), side: Stone) -> Option<Pattern> {
    scan_run(board, pos, dir, side).and_then(|run| run.pattern)
}

/// Score assigned to each pattern by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternWeights {
    pub dead_two: i64,
    pub live_two: i64,
    pub dead_three: i64,
    pub live_three: i64,
    pub dead_four: i64,
    pub live_four: i64,
    pub open_four: i64,
    pub five: i64,
}

impl Default for PatternWeights {
    fn default() -> Self {
        Self {
            dead_two: 1,
            live_two: 10,
            dead_three: 10,
            live_three: 100,
            dead_four: 100,
            live_four: 10_000,
            open_four: 100_000,
            five: 1_000_000,
        }
    }
}

/// Minimum factor by which OPEN_FOUR must exceed LIVE_THREE and DEAD_FOUR
const OPEN_FOUR_MARGIN: i64 = 10;

impl PatternWeights {
    #[inline]
    pub fn weight(&self, pattern: Pattern) -> i64 {
        match pattern {
            Pattern::Five => self.five,
            Pattern::OpenFour => self.open_four,
            Pattern::LiveFour => self.live_four,
            Pattern::DeadFour => self.dead_four,
            Pattern::LiveThree => self.live_three,
            Pattern::DeadThree => self.dead_three,
            Pattern::LiveTwo => self.live_two,
            Pattern::DeadTwo => self.dead_two,
        }
    }

    /// Check the weight ordering
    /// `DEAD_TWO < LIVE_TWO <= DEAD_THREE < LIVE_THREE <= DEAD_FOUR < LIVE_FOUR < OPEN_FOUR < FIVE`
    /// and the OPEN_FOUR margin over LIVE_THREE and DEAD_FOUR.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // (lower, higher, strict)
        let chain = [
            (("DEAD_TWO", self.dead_two), ("LIVE_TWO", self.live_two), true),
            (("LIVE_TWO", self.live_two), ("DEAD_THREE", self.dead_three), false),
            (("DEAD_THREE", self.dead_three), ("LIVE_THREE", self.live_three), true),
            (("LIVE_THREE", self.live_three), ("DEAD_FOUR", self.dead_four), false),
            (("DEAD_FOUR", self.dead_four), ("LIVE_FOUR", self.live_four), true),
            (("LIVE_FOUR", self.live_four), ("OPEN_FOUR", self.open_four), true),
            (("OPEN_FOUR", self.open_four), ("FIVE", self.five), true),
        ];
        for ((lower, lower_value), (higher, higher_value), strict) in chain {
            let ok = if strict {
                lower_value < higher_value
            } else {
                lower_value <= higher_value
            };
            if !ok {
                return Err(ConfigError::WeightOrder {
                    lower,
                    lower_value,
                    higher,
                    higher_value,
                });
            }
        }

        for (name, value) in [("LIVE_THREE", self.live_three), ("DEAD_FOUR", self.dead_four)] {
            if self.open_four < value.saturating_mul(OPEN_FOUR_MARGIN) {
                return Err(ConfigError::OpenFourMargin {
                    open_four: self.open_four,
                    pattern: name,
                    value,
                });
            }
        }
        Ok(())
    }
}
