use serde::{Deserialize, Serialize};

/// One normalized event of a horizontal swipe.
///
/// Wheel and trackpad input arrive as `Move`. A negative delta is a
/// leftward gesture (towards the previous month), a positive delta a
/// rightward one (towards the next month).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureEvent {
    Start,
    Move { delta: f64 },
    End,
    Cancel,
}

/// Source of normalized gesture events
pub trait GestureSource {
    /// Next pending event, `None` once the source is drained for now
    fn poll_gesture(&mut self) -> Option<GestureEvent>;
}

impl<I> GestureSource for I
where
    I: Iterator<Item = GestureEvent>,
{
    fn poll_gesture(&mut self) -> Option<GestureEvent> {
        self.next()
    }
}
