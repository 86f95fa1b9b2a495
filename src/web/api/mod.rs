pub mod dashboard;
pub mod error;
pub mod map;
pub mod navigation;
