pub mod comparator;
pub mod engine;
pub mod equality;
pub mod pattern;
pub mod render;
pub mod scan;
