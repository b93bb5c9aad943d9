//! Output rendering: public markup fragment and CLI report text.

pub mod markup;
pub mod report;
