pub mod local;

pub use local::LocalStorage;
// StorageError は errors モジュールで定義済み
pub use crate::errors::StorageError;
