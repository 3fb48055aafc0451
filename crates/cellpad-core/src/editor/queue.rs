use std::collections::VecDeque;

use cellpad_engine::SheetEngine;

use super::{FormulaEditor, UserAction};

/// FIFO of user actions waiting for the editor.
///
/// Input that arrives while an action is being applied is queued here and
/// replayed in submission order, one action at a time.
#[derive(Debug, Default)]
pub struct ActionQueue {
    pending: VecDeque<UserAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, action: UserAction) {
        self.pending.push_back(action);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply every pending action in order. Returns how many were applied.
    pub fn drain_into<E: SheetEngine>(&mut self, editor: &mut FormulaEditor<E>) -> usize {
        let mut applied = 0;
        while let Some(action) = self.pending.pop_front() {
            editor.dispatch(action);
            applied += 1;
        }
        applied
    }
}

impl Extend<UserAction> for ActionQueue {
    fn extend<T: IntoIterator<Item = UserAction>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}
