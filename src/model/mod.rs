pub mod category;
pub mod grouping;
pub mod item;
pub mod minimap;
pub mod scale;
pub mod timeline;

pub use category::CategoryFilter;
pub use grouping::YearGroup;
pub use item::{Item, Track};
pub use timeline::TimelineViewport;
