// docsim: document similarity scoring and shared-passage detection
//
// This is the library root. Each module corresponds to a stage of a
// comparison run: text -> similarity / matching -> report.

pub mod config;
pub mod matching;
pub mod pipeline;
pub mod report;
pub mod similarity;
pub mod text;
