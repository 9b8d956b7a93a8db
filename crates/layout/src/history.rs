use crate::model::LayoutModel;
use crate::LayoutError;

/// Committed layout values for an editing session.
///
/// Since every edit yields a new [`LayoutModel`], undo is just dropping the newest
/// value and discard is returning to the last persisted snapshot.
#[derive(Debug, Clone)]
pub struct LayoutHistory {
    persisted: LayoutModel,
    edits: Vec<LayoutModel>,
}

impl LayoutHistory {
    pub fn new(persisted: LayoutModel) -> Self {
        Self {
            persisted,
            edits: Vec::new(),
        }
    }

    pub fn current(&self) -> &LayoutModel {
        self.edits.last().unwrap_or(&self.persisted)
    }

    /// Applies an edit to the current model. A failed edit leaves the history as it was.
    pub fn apply(
        &mut self,
        edit: impl FnOnce(&LayoutModel) -> Result<LayoutModel, LayoutError>,
    ) -> Result<&LayoutModel, LayoutError> {
        let next = edit(self.current())?;
        self.edits.push(next);
        Ok(self.current())
    }

    /// Drops the newest edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.edits.pop().is_some()
    }

    pub fn discard(&mut self) {
        self.edits.clear();
    }

    pub fn is_dirty(&self) -> bool {
        self.edits.last().is_some_and(|m| *m != self.persisted)
    }

    /// Records the current model as persisted and clears the edit stack.
    pub fn mark_persisted(&mut self) {
        if let Some(latest) = self.edits.pop() {
            self.persisted = latest;
        }
        self.edits.clear();
    }
}
