use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use bytes::Bytes;

const IMAGE_FIELD: &str = "image";
const TRANSFORMATIONS_FIELD: &str = "transformations";

/// アップロードされたファイル
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// クライアントが送ったファイル名。サニタイズしてから保存キーにする
    pub file_name: String,
    pub data: Bytes,
}

/// `/process` の multipart フォーム
#[derive(Debug, Default)]
pub struct UploadForm {
    pub image: Option<UploadedImage>,
    pub transformations: Vec<String>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// multipart ボディをすべて読み込む
    ///
    /// ファイル名を持たない `image` パートはファイルとして扱わない。
    /// 同名のテキストフィールドは最初の値を採用する。
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                IMAGE_FIELD => {
                    let Some(file_name) = field.file_name().map(str::to_string) else {
                        continue;
                    };
                    let data = field.bytes().await?;
                    if form.image.is_none() {
                        form.image = Some(UploadedImage { file_name, data });
                    }
                }
                TRANSFORMATIONS_FIELD => {
                    form.transformations.push(field.text().await?);
                }
                _ => {
                    let value = field.text().await?;
                    form.fields.entry(name).or_insert(value);
                }
            }
        }

        Ok(form)
    }
}
