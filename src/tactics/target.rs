//! Remembered target: a weak handle to a level object kept across ticks

use crate::core::types::ObjectId;
use crate::tactics::level::{LevelObject, LevelView};

/// Object a policy is moving toward, checked for liveness each think-tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RememberedTarget(Option<ObjectId>);

impl RememberedTarget {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn id(&self) -> Option<ObjectId> {
        self.0
    }

    pub fn remember(&mut self, object: &LevelObject) {
        self.0 = Some(object.id);
    }

    pub fn forget(&mut self) {
        self.0 = None;
    }

    /// Drop the handle if its object is gone or marked removed
    pub fn invalidate_removed(&mut self, level: &dyn LevelView) {
        if let Some(id) = self.0 {
            let live = level.object(id).is_some_and(|o| o.is_live());
            if !live {
                tracing::debug!(?id, "remembered target removed");
                self.0 = None;
            }
        }
    }

    /// The live object behind the handle
    pub fn resolve<'a>(&self, level: &'a dyn LevelView) -> Option<&'a LevelObject> {
        self.0
            .and_then(|id| level.object(id))
            .filter(|o| o.is_live())
    }
}
