use std::collections::{BTreeSet, HashMap};

use crate::errors::TransformError;
use crate::validation::validate_scale_factors;

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// 文字列から OutputFormat を作成
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// ファイル名の拡張子から OutputFormat を推定
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        Self::from_str(ext)
    }

    /// 保存時の拡張子
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    /// Content-Type を取得
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// 変換の種類
///
/// 宣言順がそのまま評価順（translate → ... → perspective）になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransformKind {
    Translate,
    Rotate,
    Scale,
    Shear,
    Flip,
    Crop,
    Perspective,
}

impl TransformKind {
    /// 評価順に並んだ全種別
    pub const ALL: [TransformKind; 7] = [
        Self::Translate,
        Self::Rotate,
        Self::Scale,
        Self::Shear,
        Self::Flip,
        Self::Crop,
        Self::Perspective,
    ];

    /// フォームの `transformations` 値から TransformKind を作成
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == s)
    }

    /// フォーム上の名前
    pub fn name(&self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Rotate => "rotate",
            Self::Scale => "scale",
            Self::Shear => "shear",
            Self::Flip => "flip",
            Self::Crop => "crop",
            Self::Perspective => "perspective",
        }
    }

    /// 結果ページの表示名。出力ファイル名にも使われる
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Translate => "Translated",
            Self::Rotate => "Rotated",
            Self::Scale => "Scaled",
            Self::Shear => "Sheared",
            Self::Flip => "Flipped",
            Self::Crop => "Cropped",
            Self::Perspective => "Perspective",
        }
    }

    /// パラメータ不正時にクライアントへ返すメッセージ
    pub fn invalid_params_message(&self) -> &'static str {
        match self {
            Self::Translate => "Invalid translation values.",
            Self::Rotate => "Invalid rotation angle.",
            Self::Scale => "Invalid scale values.",
            Self::Shear => "Invalid shearing values.",
            Self::Crop => "Invalid crop coordinates.",
            // flip / perspective はユーザーパラメータを持たない
            Self::Flip => "Invalid flip parameters.",
            Self::Perspective => "Invalid perspective parameters.",
        }
    }
}

/// 1 つの変換に必要なパラメータ
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformParams {
    Translate { tx: i32, ty: i32 },
    Rotate { angle: i32 },
    Scale { scale_x: f32, scale_y: f32 },
    Shear { shear_x: f32, shear_y: f32 },
    Flip,
    Crop { x1: i32, y1: i32, x2: i32, y2: i32 },
    Perspective,
}

impl TransformParams {
    pub fn kind(&self) -> TransformKind {
        match self {
            Self::Translate { .. } => TransformKind::Translate,
            Self::Rotate { .. } => TransformKind::Rotate,
            Self::Scale { .. } => TransformKind::Scale,
            Self::Shear { .. } => TransformKind::Shear,
            Self::Flip => TransformKind::Flip,
            Self::Crop { .. } => TransformKind::Crop,
            Self::Perspective => TransformKind::Perspective,
        }
    }
}

/// 選択された変換とフォームの数値フィールド
#[derive(Debug, Clone, Default)]
pub struct TransformRequest {
    submitted: usize,
    selected: BTreeSet<TransformKind>,
    fields: HashMap<String, String>,
}

impl TransformRequest {
    /// 未知の変換名は無視するが、送信数には数える
    pub fn new<I, S>(names: I, fields: HashMap<String, String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut submitted = 0;
        let mut selected = BTreeSet::new();
        for name in names {
            submitted += 1;
            if let Some(kind) = TransformKind::from_str(name.as_ref()) {
                selected.insert(kind);
            }
        }

        Self {
            submitted,
            selected,
            fields,
        }
    }

    /// `transformations` が 1 つも送信されていない
    pub fn is_empty(&self) -> bool {
        self.submitted == 0
    }

    /// 選択された変換を評価順に返す
    pub fn selected(&self) -> impl Iterator<Item = TransformKind> + '_ {
        self.selected.iter().copied()
    }

    /// 指定した変換のパラメータをフォームから取り出す
    pub fn params(&self, kind: TransformKind) -> Result<TransformParams, TransformError> {
        let invalid = || TransformError::InvalidParams(kind);

        let params = match kind {
            TransformKind::Translate => TransformParams::Translate {
                tx: self.int_field("tx").ok_or_else(invalid)?,
                ty: self.int_field("ty").ok_or_else(invalid)?,
            },
            TransformKind::Rotate => TransformParams::Rotate {
                angle: self.int_field("angle").ok_or_else(invalid)?,
            },
            TransformKind::Scale => {
                let scale_x = self.float_field("scale_x").ok_or_else(invalid)?;
                let scale_y = self.float_field("scale_y").ok_or_else(invalid)?;
                validate_scale_factors(scale_x, scale_y)?;
                TransformParams::Scale { scale_x, scale_y }
            }
            TransformKind::Shear => TransformParams::Shear {
                shear_x: self.float_field("shear_x").ok_or_else(invalid)?,
                shear_y: self.float_field("shear_y").ok_or_else(invalid)?,
            },
            TransformKind::Flip => TransformParams::Flip,
            TransformKind::Crop => TransformParams::Crop {
                x1: self.int_field("crop_x1").ok_or_else(invalid)?,
                y1: self.int_field("crop_y1").ok_or_else(invalid)?,
                x2: self.int_field("crop_x2").ok_or_else(invalid)?,
                y2: self.int_field("crop_y2").ok_or_else(invalid)?,
            },
            TransformKind::Perspective => TransformParams::Perspective,
        };

        Ok(params)
    }

    fn int_field(&self, key: &str) -> Option<i32> {
        self.fields.get(key)?.trim().parse().ok()
    }

    fn float_field(&self, key: &str) -> Option<f32> {
        self.fields
            .get(key)?
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("jpeg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_str("JPG"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_str("png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_str("webp"), None);
    }

    #[test]
    fn test_output_format_from_file_name() {
        assert_eq!(
            OutputFormat::from_file_name("Rotated.jpg"),
            Some(OutputFormat::Jpeg)
        );
        assert_eq!(OutputFormat::from_file_name("Flipped.png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_file_name("README"), None);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(TransformKind::from_str("rotate"), Some(TransformKind::Rotate));
        assert_eq!(
            TransformKind::from_str("perspective"),
            Some(TransformKind::Perspective)
        );
        assert_eq!(TransformKind::from_str("Rotate"), None);
        assert_eq!(TransformKind::from_str("blur"), None);
    }

    #[test]
    fn test_selected_in_fixed_order() {
        // 送信順に関係なく評価順で返る
        let request = TransformRequest::new(
            ["perspective", "flip", "translate", "rotate", "flip"],
            HashMap::new(),
        );
        let kinds: Vec<_> = request.selected().collect();
        assert_eq!(
            kinds,
            vec![
                TransformKind::Translate,
                TransformKind::Rotate,
                TransformKind::Flip,
                TransformKind::Perspective,
            ]
        );
    }

    #[test]
    fn test_unknown_names_count_as_submitted() {
        let request = TransformRequest::new(["blur"], HashMap::new());
        assert!(!request.is_empty());
        assert_eq!(request.selected().count(), 0);

        let request = TransformRequest::new(Vec::<String>::new(), HashMap::new());
        assert!(request.is_empty());
    }

    #[test]
    fn test_params_translate() {
        let request = TransformRequest::new(
            ["translate"],
            fields(&[("tx", " 15 "), ("ty", "-4")]),
        );
        assert_eq!(
            request.params(TransformKind::Translate).unwrap(),
            TransformParams::Translate { tx: 15, ty: -4 }
        );
    }

    #[test]
    fn test_params_rotate_invalid() {
        let request = TransformRequest::new(["rotate"], fields(&[("angle", "abc")]));
        let err = request.params(TransformKind::Rotate).unwrap_err();
        assert_eq!(err.to_string(), "Invalid rotation angle.");

        // 小数は整数フィールドとして受け付けない
        let request = TransformRequest::new(["rotate"], fields(&[("angle", "45.5")]));
        assert!(request.params(TransformKind::Rotate).is_err());
    }

    #[test]
    fn test_params_missing_field() {
        let request = TransformRequest::new(["translate"], fields(&[("tx", "10")]));
        let err = request.params(TransformKind::Translate).unwrap_err();
        assert_eq!(err.to_string(), "Invalid translation values.");
    }

    #[test]
    fn test_params_scale() {
        let request = TransformRequest::new(
            ["scale"],
            fields(&[("scale_x", "2.0"), ("scale_y", "1")]),
        );
        assert_eq!(
            request.params(TransformKind::Scale).unwrap(),
            TransformParams::Scale {
                scale_x: 2.0,
                scale_y: 1.0
            }
        );

        let request = TransformRequest::new(
            ["scale"],
            fields(&[("scale_x", "inf"), ("scale_y", "1")]),
        );
        assert!(request.params(TransformKind::Scale).is_err());

        let request = TransformRequest::new(
            ["scale"],
            fields(&[("scale_x", "-1"), ("scale_y", "1")]),
        );
        let err = request.params(TransformKind::Scale).unwrap_err();
        assert_eq!(err.to_string(), "Invalid scale values.");
    }

    #[test]
    fn test_params_without_user_fields() {
        let request = TransformRequest::new(["flip", "perspective"], HashMap::new());
        assert_eq!(
            request.params(TransformKind::Flip).unwrap(),
            TransformParams::Flip
        );
        assert_eq!(
            request.params(TransformKind::Perspective).unwrap(),
            TransformParams::Perspective
        );
    }

    #[test]
    fn test_params_kind_roundtrip() {
        let request = TransformRequest::new(
            ["crop"],
            fields(&[
                ("crop_x1", "10"),
                ("crop_y1", "10"),
                ("crop_x2", "60"),
                ("crop_y2", "40"),
            ]),
        );
        let params = request.params(TransformKind::Crop).unwrap();
        assert_eq!(params.kind(), TransformKind::Crop);
    }
}
