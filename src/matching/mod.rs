// Segment matching: finds the concrete text spans two documents share.

pub mod consumed;
pub mod matcher;
pub mod segment;
