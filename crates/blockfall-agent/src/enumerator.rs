use std::collections::HashSet;
use std::iter::repeat_n;

use arrayvec::ArrayVec;
use blockfall_engine::{Action, GameState, Symmetry};

/// A candidate placement: the action script and the state it leads to.
///
/// The state is the simulation result of playing `actions` from the turn
/// start, with the placed piece locked and its successor already spawned.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub actions: Vec<Action>,
    pub state: GameState,
}

/// Setup tokens played before the horizontal shift: an optional hold and up
/// to two rotations.
type Prefix = ArrayVec<Action, 3>;

fn rotation_scripts(symmetry: Symmetry) -> Vec<Prefix> {
    let mut scripts = Vec::new();
    if symmetry.orientations() >= 2 {
        scripts.push(Prefix::from_iter([Action::RotateCcw]));
    }
    if symmetry.orientations() == 4 {
        scripts.push(Prefix::from_iter([Action::RotateCw]));
        scripts.push(Prefix::from_iter([Action::RotateCw, Action::RotateCw]));
    }
    scripts
}

/// Enumerates every distinct resting placement reachable this turn.
///
/// Each script follows the same template: setup prefix (hold and/or
/// rotations, bounded by the piece's symmetry class), push fully left, shift
/// right to the target column, hard drop. A script is kept only if every
/// setup and shift token succeeds; the wall bumps from the left push are
/// expected and ignored. Placements whose boards end up cell-for-cell
/// identical are deduplicated, first writer wins.
#[must_use]
pub fn enumerate_moves(state: &GameState) -> Vec<Candidate> {
    if state.is_defeated() {
        return Vec::new();
    }
    let Some(active) = state.active() else {
        return Vec::new();
    };
    let width = state.grid().width();

    let mut prefixes = vec![Prefix::new(), Prefix::from_iter([Action::Hold])];
    for script in rotation_scripts(active.kind().symmetry()) {
        prefixes.push(script);
    }
    // after a hold the piece in play is the saved one, or the preview if the
    // slot is still empty
    let held_kind = state.saved_piece().unwrap_or(state.next_piece());
    for script in rotation_scripts(held_kind.symmetry()) {
        let mut with_hold = Prefix::from_iter([Action::Hold]);
        with_hold.extend(script);
        prefixes.push(with_hold);
    }

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for x in 0..width {
        for prefix in &prefixes {
            let mut script = Vec::with_capacity(prefix.len() + width + x + 1);
            script.extend_from_slice(prefix);
            script.extend(repeat_n(Action::Left, width));
            script.extend(repeat_n(Action::Right, x));
            script.push(Action::HardDrop);

            let mut sim = state.clone();
            let results = sim.apply(&script);
            let setup_ok = results[..prefix.len()].iter().all(|&r| r);
            let shift_ok = results[prefix.len() + width..].iter().all(|&r| r);
            if !setup_ok || !shift_ok {
                continue;
            }
            if seen.insert(sim.grid().occupancy()) {
                candidates.push(Candidate {
                    actions: script,
                    state: sim,
                });
            }
        }
    }
    candidates
}
