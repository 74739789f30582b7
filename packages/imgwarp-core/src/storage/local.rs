use crate::errors::StorageError;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// ローカルファイルシステム上のストレージ
///
/// アップロード画像と変換済み画像をそれぞれ別のフラットなディレクトリに保存する。
/// 同名ファイルへの書き込みは後勝ちで上書きする。
#[derive(Debug, Clone)]
pub struct LocalStorage {
    upload_dir: PathBuf,
    processed_dir: PathBuf,
}

impl LocalStorage {
    /// 新しい LocalStorage を作成する
    pub fn new(upload_dir: impl Into<PathBuf>, processed_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            processed_dir: processed_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn processed_dir(&self) -> &Path {
        &self.processed_dir
    }

    /// 両ディレクトリがなければ作成する
    pub async fn ensure_dirs(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::create_dir_all(&self.processed_dir).await?;
        Ok(())
    }

    /// アップロード画像を保存し、保存先のパスを返す
    pub async fn save_upload(&self, key: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.upload_dir.join(key);
        write_replace(&path, data).await?;
        tracing::debug!(key = %key, size = data.len(), "upload saved");
        Ok(path)
    }

    /// アップロード画像を読み込む
    pub async fn read_upload(&self, key: &str) -> Result<Bytes, StorageError> {
        read(&self.upload_dir.join(key), key).await
    }

    /// 変換済み画像を書き込む
    pub async fn write_processed(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.processed_dir.join(file_name);
        write_replace(&path, data).await?;
        tracing::debug!(file_name = %file_name, size = data.len(), "processed image written");
        Ok(path)
    }

    /// 変換済み画像を読み込む
    pub async fn read_processed(&self, file_name: &str) -> Result<Bytes, StorageError> {
        read(&self.processed_dir.join(file_name), file_name).await
    }
}

async fn read(path: &Path, key: &str) -> Result<Bytes, StorageError> {
    match tokio::fs::read(path).await {
        Ok(data) => Ok(Bytes::from(data)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound {
            key: key.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// 一時ファイルに書いてから rename し、書きかけのファイルを読ませない
async fn write_replace(path: &Path, data: &[u8]) -> Result<(), StorageError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("object");
    let tmp = path.with_file_name(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()));

    tokio::fs::write(&tmp, data).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path().join("uploads"), dir.path().join("processed"))
    }

    #[tokio::test]
    async fn test_ensure_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);

        storage.ensure_dirs().await.unwrap();
        assert!(storage.upload_dir().is_dir());
        assert!(storage.processed_dir().is_dir());

        // 2 回目もエラーにならない
        storage.ensure_dirs().await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        storage.ensure_dirs().await.unwrap();

        let path = storage.save_upload("abc.png", b"data").await.unwrap();
        assert_eq!(path, storage.upload_dir().join("abc.png"));
        assert_eq!(storage.read_upload("abc.png").await.unwrap(), Bytes::from_static(b"data"));
    }

    #[tokio::test]
    async fn test_write_processed_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        storage.ensure_dirs().await.unwrap();

        storage.write_processed("Rotated.jpg", b"first").await.unwrap();
        storage.write_processed("Rotated.jpg", b"second").await.unwrap();

        let data = storage.read_processed("Rotated.jpg").await.unwrap();
        assert_eq!(data, Bytes::from_static(b"second"));

        // 一時ファイルは残らない
        let entries: Vec<_> = std::fs::read_dir(storage.processed_dir())
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_read_processed_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        storage.ensure_dirs().await.unwrap();

        match storage.read_processed("Missing.jpg").await.unwrap_err() {
            StorageError::NotFound { key } => assert_eq!(key, "Missing.jpg"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
