pub mod datetime_parts;
pub mod tentative;

pub use datetime_parts::*;
pub use tentative::*;
