//! Circuit propagation: which hexes are powered from the seed.
//!
//! Starting at the seed, every side with a connector is checked against the
//! hex abutting it. When the facing connector carries the same channel value
//! both hexes light up and the neighbour is explored in turn. A hex that is
//! already lit is never revisited, so each pass touches every hex at most once.

use std::collections::HashMap;

use crate::components::hex::{Hex, HexCoord, SIDES};

/// Result of one connectivity pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectivityReport {
    /// Number of lit hexes, seed included.
    pub lit: usize,
    /// Whether the goal hex ended up lit.
    pub goal_lit: bool,
    /// Hexes in the order they were lit. The seed comes last when nothing matched it.
    pub visited: Vec<HexCoord>,
}

/// Run a full pass over `hexes`, clearing and recomputing every `lit` flag.
///
/// `index` maps each coordinate to its position in `hexes`. The seed is always
/// lit afterwards, whether or not it connects to anything.
pub fn propagate(
    hexes: &mut [Hex],
    index: &HashMap<HexCoord, usize>,
    seed: usize,
    goal: usize,
) -> ConnectivityReport {
    for hex in hexes.iter_mut() {
        hex.lit = false;
    }

    let mut visited = Vec::with_capacity(hexes.len());
    let mut stack = Vec::with_capacity(hexes.len());
    stack.push(seed);

    while let Some(current) = stack.pop() {
        for side in 0..SIDES {
            let value = hexes[current].connectors()[side].value;
            if value == 0 {
                continue;
            }
            let (there, opposite) = hexes[current].neighbor(side);
            let Some(&next) = index.get(&there) else {
                continue;
            };
            if hexes[next].lit || hexes[next].connectors()[opposite].value != value {
                continue;
            }

            if !hexes[current].lit {
                hexes[current].lit = true;
                visited.push(hexes[current].coord());
            }
            hexes[next].lit = true;
            visited.push(there);
            stack.push(next);
        }
    }

    // The seed is the power source.
    if !hexes[seed].lit {
        hexes[seed].lit = true;
        visited.push(hexes[seed].coord());
    }

    ConnectivityReport {
        lit: visited.len(),
        goal_lit: hexes[goal].lit,
        visited,
    }
}
