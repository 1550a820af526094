use crate::map::addressing::WaypointHandle;
use crate::mission::Coordinate3;

/// One committed waypoint drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaypointMove {
    pub handle: WaypointHandle,
    pub before: Coordinate3,
    pub after: Coordinate3,
}

#[derive(Clone, Debug)]
pub struct UndoStack {
    pub history: Vec<WaypointMove>,
    /// Number of moves currently applied.
    pub current_index: usize,
    pub max_records: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self {
            history: Vec::new(),
            current_index: 0,
            max_records: 1000,
        }
    }
}

impl UndoStack {
    pub fn new(max_records: usize) -> Self {
        Self {
            max_records,
            ..Self::default()
        }
    }

    pub fn push(&mut self, record: WaypointMove) {
        // If we are not at the end, truncate future
        self.history.truncate(self.current_index);

        self.history.push(record);
        self.current_index = self.history.len();

        if self.history.len() > self.max_records {
            self.history.remove(0);
            self.current_index = self.current_index.saturating_sub(1);
        }
    }

    /// The move to revert, if any.
    pub fn undo(&mut self) -> Option<WaypointMove> {
        if self.current_index > 0 {
            self.current_index -= 1;
            self.history.get(self.current_index).copied()
        } else {
            None
        }
    }

    /// The move to re-apply, if any.
    pub fn redo(&mut self) -> Option<WaypointMove> {
        let record = self.history.get(self.current_index).copied()?;
        self.current_index += 1;
        Some(record)
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index < self.history.len()
    }
}
