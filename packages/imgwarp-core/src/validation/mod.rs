pub mod key;
pub mod params;

pub use key::{sanitize_upload_key, validate_file_name};
pub use params::{CropRect, validate_crop_bounds, validate_quality, validate_scale_factors};
