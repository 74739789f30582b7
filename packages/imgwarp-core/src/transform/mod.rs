pub mod apply;
pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod geometry;
pub mod orientation;
pub mod params;
pub mod resize;

pub use apply::apply_transform;
pub use decode::decode_image;
pub use dimensions::calculate_scaled_dimensions;
pub use encode::encode_image;
pub use orientation::{Orientation, apply_orientation, read_orientation};
pub use params::{OutputFormat, TransformKind, TransformParams, TransformRequest};
pub use resize::{resize_image, scale_image};
