use datetime_engine::io::{DismissCallback, DismissReason, OverlayController};
use log::info;
use std::cell::RefCell;
use std::rc::Rc;

/// Overlay that only logs. Clones share the dismissal callback, so the
/// runner keeps one to play the user dismissing the time picker.
#[derive(Clone, Default)]
pub struct ConsoleOverlay {
    callback: Rc<RefCell<Option<DismissCallback>>>,
    presented: Rc<RefCell<bool>>,
}

impl ConsoleOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_presented(&self) -> bool {
        *self.presented.borrow()
    }

    /// Dismissal that did not come from the engine (backdrop tap, escape key)
    pub fn user_dismiss(&self, reason: DismissReason) {
        if !self.is_presented() {
            return;
        }
        info!("User dismissed the time picker ({:?})", reason);
        self.notify(reason);
    }

    fn notify(&self, reason: DismissReason) {
        *self.presented.borrow_mut() = false;
        if let Some(callback) = self.callback.borrow_mut().as_mut() {
            callback(reason);
        }
    }
}

impl OverlayController for ConsoleOverlay {
    fn present(&mut self) {
        info!("Presenting time picker");
        *self.presented.borrow_mut() = true;
    }

    fn dismiss(&mut self, reason: DismissReason) {
        info!("Dismissing time picker ({:?})", reason);
        self.notify(reason);
    }

    fn on_dismissed(&mut self, callback: DismissCallback) {
        *self.callback.borrow_mut() = Some(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_dismiss_reaches_callback_once_presented() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut overlay = ConsoleOverlay::new();
        overlay.on_dismissed(Box::new(move |reason| sink.borrow_mut().push(reason)));

        overlay.user_dismiss(DismissReason::Escape);
        assert!(seen.borrow().is_empty());

        overlay.present();
        overlay.clone().user_dismiss(DismissReason::Backdrop);
        assert_eq!(*seen.borrow(), vec![DismissReason::Backdrop]);
        assert!(!overlay.is_presented());
    }
}
