use crate::{GameEngine, Status};
use arcade_board::{Connectivity, Grid};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

pub const SIZE: usize = 5;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct LightsOnMove(pub usize, pub usize);

/// 5x5 grid of lights. Toggling a cell also toggles its in-bounds
/// orthogonal neighbors; the round is won when every light is off.
#[derive(Debug, Clone)]
pub struct LightsOnState {
    lights: Grid<bool>,
}

impl LightsOnState {
    /// A random board, rerolled until it is not already solved.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let state = LightsOnState {
                lights: Grid::from_fn(SIZE, SIZE, |_, _| rng.gen_bool(0.5)),
            };
            if state.status() == Status::InProgress {
                return state;
            }
        }
    }

    /// A board with the given lit cells. For scripted rounds.
    pub fn with_lit(cells: &[(usize, usize)]) -> Self {
        let mut lights = Grid::new(SIZE, SIZE, false);
        for &(r, c) in cells {
            lights[(r, c)] = true;
        }
        LightsOnState { lights }
    }

    pub fn is_lit(&self, row: usize, col: usize) -> Option<bool> {
        self.lights.get(row, col).ok().copied()
    }

    pub fn lit_count(&self) -> usize {
        self.lights.iter().filter(|(_, &on)| on).count()
    }
}

impl Default for LightsOnState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine for LightsOnState {
    type Move = LightsOnMove;

    /// Any in-bounds cell is clickable.
    fn is_legal(&self, mv: &Self::Move) -> bool {
        self.lights.in_bounds(mv.0, mv.1)
    }

    fn apply(&mut self, mv: &Self::Move) {
        let &LightsOnMove(row, col) = mv;
        self.lights[(row, col)] = !self.lights[(row, col)];
        let cross: Vec<(usize, usize)> = self
            .lights
            .neighbors(row, col, Connectivity::Orthogonal)
            .collect();
        for cell in cross {
            self.lights[cell] = !self.lights[cell];
        }
    }

    fn status(&self) -> Status {
        if self.lights.iter().all(|(_, &on)| !on) {
            Status::Win(1)
        } else {
            Status::InProgress
        }
    }

    fn fresh(&self) -> Self {
        Self::new()
    }
}

impl fmt::Display for LightsOnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..SIZE {
            for c in 0..SIZE {
                write!(f, "{} ", if self.lights[(r, c)] { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for LightsOnMove {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
        if parts.len() != 2 {
            return Err("expected format: row,col".to_string());
        }
        let r = parts[0].parse::<usize>().map_err(|e| e.to_string())?;
        let c = parts[1].parse::<usize>().map_err(|e| e.to_string())?;
        Ok(LightsOnMove(r, c))
    }
}
