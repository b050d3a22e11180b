//! Set-based simulation of an [`Nfa`] over input text.
//!
//! Each step keeps the full set of active states instead of backtracking,
//! so matching costs at most `|states|` work per input character.

use super::nfa::{Cursor, Label, Nfa, StateId};
use sparse::SparseSet;

mod sparse;

impl Nfa {
    /// Returns `true` if the automaton accepts the whole of `text`.
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        let mut current = SparseSet::new(self.len());
        let mut next = SparseSet::new(self.len());
        let mut stack = Vec::new();

        let mut chars = text.chars().peekable();
        let at = Cursor {
            prev: None,
            next: chars.peek().copied(),
        };
        self.close(self.start(), at, &mut current, &mut stack);

        while let Some(c) = chars.next() {
            let at = Cursor {
                prev: Some(c),
                next: chars.peek().copied(),
            };

            next.clear();
            for id in current.iter() {
                let state = &self.states()[id];
                if let Some(label) = &state.label
                    && label.matches(c)
                    && let Some(target) = state.edge1
                {
                    self.close(target, at, &mut next, &mut stack);
                }
            }

            log::trace!("'{}' leaves {} active states", c.escape_debug(), next.len());
            if next.is_empty() {
                return false;
            }
            std::mem::swap(&mut current, &mut next);
        }

        current.contains(self.accept().index())
    }

    /// Returns every state reachable from `seed` through epsilon edges,
    /// `seed` included, in visiting order. Assertions are evaluated as if
    /// the text were empty.
    #[must_use]
    pub fn epsilon_closure(&self, seed: StateId) -> Vec<StateId> {
        let mut set = SparseSet::new(self.len());
        self.close(seed, Cursor::default(), &mut set, &mut Vec::new());
        set.iter().map(StateId).collect()
    }

    /// Adds the epsilon closure of `seed` at text position `at` to `set`.
    fn close(&self, seed: StateId, at: Cursor, set: &mut SparseSet, stack: &mut Vec<StateId>) {
        stack.push(seed);
        while let Some(id) = stack.pop() {
            if !set.insert(id.index()) {
                continue;
            }

            let state = self.state(id);
            let passable = match &state.label {
                None => true,
                Some(Label::Look(look)) => look.holds(at),
                Some(_) => false,
            };
            if passable {
                stack.extend(state.edge2);
                stack.extend(state.edge1);
            }
        }
    }
}
