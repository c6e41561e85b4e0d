use rand::Rng;

/// The game's pure state machine: where the mole is and whether it has
/// been whacked. All I/O lives in [`Game`](super::Game).
pub(super) struct GameState {
    total_cells: usize,
    target: usize,
    phase: Phase,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Phase {
    Pending,
    Running,
    Won,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) enum ClickOutcome {
    /// The game is not running; nothing happens.
    Ignored,
    /// A filler cell; only worth a cosmetic reaction.
    Miss,
    /// The target cell. Granted to exactly one click.
    Win,
}

impl GameState {
    pub fn new(total_cells: usize) -> Self {
        Self {
            total_cells,
            target: 0,
            phase: Phase::Pending,
        }
    }

    /// Transition to `running` and pick the first target cell.
    pub fn start(&mut self, rng: &mut impl Rng) -> usize {
        debug_assert_eq!(self.phase, Phase::Pending);

        self.phase = Phase::Running;

        self.relocate_target(rng)
    }

    /// Pick a new target cell for the next tick, or `None` once the
    /// game is over.
    pub fn relocate(&mut self, rng: &mut impl Rng) -> Option<usize> {
        (self.phase == Phase::Running).then(|| self.relocate_target(rng))
    }

    fn relocate_target(&mut self, rng: &mut impl Rng) -> usize {
        self.target = rng.gen_range(0..self.total_cells);

        self.target
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn register_click(&mut self, cell: usize) -> ClickOutcome {
        if self.phase != Phase::Running {
            return ClickOutcome::Ignored;
        }

        if cell != self.target {
            return ClickOutcome::Miss;
        }

        self.phase = Phase::Won;

        ClickOutcome::Win
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;

    fn rng() -> StepRng {
        StepRng::new(0, 0x1357_9BDF_0246_8ACE)
    }

    #[test]
    fn clicks_before_start_are_ignored() {
        let mut state = GameState::new(48);

        assert_eq!(state.register_click(0), ClickOutcome::Ignored);
    }

    #[test]
    fn target_click_wins_exactly_once() {
        let mut state = GameState::new(48);
        let target = state.start(&mut rng());

        assert_eq!(state.register_click(target), ClickOutcome::Win);

        // the game is over; nothing moves it anymore
        assert_eq!(state.register_click(target), ClickOutcome::Ignored);
        assert_eq!(state.register_click((target + 1) % 48), ClickOutcome::Ignored);
        assert_eq!(state.relocate(&mut rng()), None);
    }

    #[test]
    fn filler_click_changes_nothing() {
        let mut state = GameState::new(48);
        let target = state.start(&mut rng());
        let filler = (target + 1) % 48;

        assert_eq!(state.register_click(filler), ClickOutcome::Miss);
        assert_eq!(state.target(), target);

        // still winnable afterwards
        assert_eq!(state.register_click(target), ClickOutcome::Win);
    }

    #[test]
    fn relocate_stays_in_bounds() {
        let mut state = GameState::new(6);
        let mut rng = rng();
        state.start(&mut rng);

        for _ in 0..100 {
            let target = state.relocate(&mut rng).expect("game over");
            assert!(target < 6);
        }
    }
}
