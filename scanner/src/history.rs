use std::collections::{VecDeque, vec_deque::Iter};

use serde::Serialize;

use crate::status::Status;

pub const HISTORY_CAPACITY: usize = 10;

#[derive(Serialize, Clone, Copy, Debug, Eq, PartialEq)]
pub struct Transition {
    pub from: Status,
    pub to: Status,
}

impl Transition {
    pub fn is_recovery(&self) -> bool {
        self.to == Status::Deployed
    }
}

/// The last few distinct statuses, oldest first.
#[derive(Serialize, Clone, Debug, Default)]
pub struct StatusHistory {
    entries: VecDeque<Status>,
}

impl StatusHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Appends `status` if it differs from the latest entry. Returns the
    /// transition when one happened; the very first status is not one.
    pub fn record(&mut self, status: Status) -> Option<Transition> {
        let previous = self.latest();
        if previous == Some(status) {
            return None;
        }

        if self.entries.len() >= HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(status);

        previous.map(|from| Transition { from, to: status })
    }

    pub fn latest(&self) -> Option<Status> {
        self.entries.back().copied()
    }

    pub fn iter(&self) -> Iter<'_, Status> {
        self.entries.iter()
    }
}
