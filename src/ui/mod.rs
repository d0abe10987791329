pub mod dialogs;
pub mod image_pool;
pub mod item_details;
pub mod minimap;
pub mod painter_surface;
pub mod theme;
pub mod timeline_canvas;
pub mod toolbar;
