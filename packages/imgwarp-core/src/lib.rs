pub mod constants;
pub mod errors;
pub mod storage;
pub mod transform;
pub mod validation;

// 公開API
pub use constants::{DEFAULT_QUALITY, MAX_DIMENSION, MAX_PIXELS};
pub use errors::{StorageError, TransformError};
pub use storage::LocalStorage;
pub use transform::{
    OutputFormat, TransformKind, TransformParams, TransformRequest, apply_transform, decode_image,
    encode_image,
};
pub use validation::{sanitize_upload_key, validate_file_name, validate_quality};
