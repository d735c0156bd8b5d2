pub mod freehand;
pub mod hit_testing;
pub mod resize;

pub use freehand::{freehand_outline, InkOptions, InkOutline};
pub use hit_testing::{
    cursor_for_position, distance_to_line_segment, element_at_position, on_line,
    position_within_element, Handle,
};
pub use resize::{adjust_element_coordinates, resized_coordinates};
