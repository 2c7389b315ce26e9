//! Placement enumeration: valid tiles, roster subsets, and tile assignments.

use std::collections::BTreeSet;

use tactics_core::{GameEnv, Position, Puzzle};

/// Tiles a character may start on, in row-major order.
///
/// Excludes void, walls, enemy tiles (dormant enemies included, since a plate
/// may spawn them there), and tiles whose custom type or collectible blocks
/// placement.
pub fn placement_tiles(puzzle: &Puzzle, env: &GameEnv<'_>) -> Vec<Position> {
    let enemy_tiles: BTreeSet<Position> = puzzle.enemies.iter().map(|e| e.position()).collect();
    let blocked_by_collectible: BTreeSet<Position> = puzzle
        .collectibles
        .iter()
        .filter(|c| {
            env.collectible(&c.collectible_id)
                .is_some_and(|d| d.blocks_placement)
        })
        .map(|c| c.position())
        .collect();

    puzzle
        .grid
        .tiles()
        .filter(|(_, tile)| !tile.is_wall())
        .filter(|(_, tile)| {
            !tile
                .custom
                .as_deref()
                .and_then(|id| env.tile_type(id))
                .is_some_and(|t| t.blocks_placement)
        })
        .map(|(position, _)| position)
        .filter(|p| !enemy_tiles.contains(p) && !blocked_by_collectible.contains(p))
        .collect()
}

/// Lexicographic `k`-subsets of `0..n`.
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] < self.n - k + i {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }
        Some(current)
    }
}

/// Lexicographic `k`-permutations of `0..n` (injective assignments).
#[derive(Clone, Debug)]
pub struct Arrangements {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Arrangements {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }

    /// Smallest unused index strictly above `floor` among the first `len` slots.
    fn next_free(&self, len: usize, floor: Option<usize>) -> Option<usize> {
        let used = &self.indices[..len];
        let start = floor.map_or(0, |f| f + 1);
        (start..self.n).find(|candidate| !used.contains(candidate))
    }
}

impl Iterator for Arrangements {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if let Some(bumped) = self.next_free(i, Some(self.indices[i])) {
                self.indices[i] = bumped;
                let mut filled = true;
                for j in i + 1..k {
                    match self.next_free(j, None) {
                        Some(free) => self.indices[j] = free,
                        None => {
                            filled = false;
                            break;
                        }
                    }
                }
                if filled {
                    break;
                }
            }
        }
        Some(current)
    }
}

/// `n! / (n-k)!`, saturating.
pub fn arrangement_count(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    (n - k + 1..=n).fold(1u64, |acc, f| acc.saturating_mul(f as u64))
}
