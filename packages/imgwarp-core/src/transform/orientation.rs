use image::RgbImage;
use image::imageops::{flip_horizontal, flip_vertical, rotate90, rotate180, rotate270};

/// EXIF Orientation タグの値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Orientation {
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    Transpose = 5,
    Rotate90 = 6,
    Transverse = 7,
    Rotate270 = 8,
}

impl Orientation {
    /// u16 値から Orientation を作成
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::FlipHorizontal),
            3 => Some(Self::Rotate180),
            4 => Some(Self::FlipVertical),
            5 => Some(Self::Transpose),
            6 => Some(Self::Rotate90),
            7 => Some(Self::Transverse),
            8 => Some(Self::Rotate270),
            _ => None,
        }
    }
}

/// EXIF Orientation に基づいて画像を正立させる
pub fn apply_orientation(img: RgbImage, orientation: Orientation) -> RgbImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => flip_horizontal(&img),
        Orientation::Rotate180 => rotate180(&img),
        Orientation::FlipVertical => flip_vertical(&img),
        Orientation::Transpose => flip_horizontal(&rotate90(&img)),
        Orientation::Rotate90 => rotate90(&img),
        Orientation::Transverse => flip_horizontal(&rotate270(&img)),
        Orientation::Rotate270 => rotate270(&img),
    }
}

/// バイト列から EXIF Orientation タグを読み取る。タグがなければ None
pub fn read_orientation(data: &[u8]) -> Option<Orientation> {
    let mut cursor = std::io::Cursor::new(data);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;

    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    let value = field.value.get_uint(0)?;

    u16::try_from(value).ok().and_then(Orientation::from_u16)
}
