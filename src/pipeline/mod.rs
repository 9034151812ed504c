// Pipelines: end-to-end workflows that wire the engine modules together.

pub mod compare;
