//! High-level entry point binding a position to its pool.

mod position_analyzer;

pub use position_analyzer::PositionAnalyzer;
