use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Why an overlay went away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// The user accepted the sub-picker's choice
    Confirm,
    Cancel,
    Backdrop,
    Escape,
}

pub type DismissCallback = Box<dyn FnMut(DismissReason)>;

/// Presents and dismisses the time sub-picker on behalf of the engine.
///
/// The engine only reacts to dismissal notifications; it never decides
/// where or how the overlay is shown.
pub trait OverlayController {
    fn present(&mut self);
    fn dismiss(&mut self, reason: DismissReason);
    /// Register the callback fired whenever the overlay is dismissed,
    /// whether by `dismiss` or by the user
    fn on_dismissed(&mut self, callback: DismissCallback);
}

/// Queue of dismissals waiting to be processed by the engine.
///
/// Callbacks only enqueue; the engine drains the queue at the start of its
/// next operation, so a dismissal can never mutate picker state in the
/// middle of another transition.
#[derive(Debug, Clone, Default)]
pub struct DismissInbox {
    queue: Rc<RefCell<VecDeque<DismissReason>>>,
}

impl DismissInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback that feeds this inbox
    pub fn callback(&self) -> DismissCallback {
        let queue = Rc::clone(&self.queue);
        Box::new(move |reason| queue.borrow_mut().push_back(reason))
    }

    pub fn pop(&self) -> Option<DismissReason> {
        self.queue.borrow_mut().pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}
