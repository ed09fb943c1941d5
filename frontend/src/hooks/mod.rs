pub mod use_countdown;
pub mod use_hub_image;
pub mod use_redraw;
pub mod use_window_resize;

pub use use_countdown::*;
pub use use_hub_image::*;
pub use use_redraw::*;
pub use use_window_resize::*;
