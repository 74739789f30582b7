/// 保存ファイル名の最大長
const MAX_FILE_NAME_LEN: usize = 255;

/// 保存済みファイル名を検証する
///
/// サブディレクトリを持たないフラットな名前のみ許可し、パストラバーサルを防止する
pub fn validate_file_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("file name is empty".to_string());
    }

    if name.len() > MAX_FILE_NAME_LEN {
        return Err(format!("file name is too long (max {MAX_FILE_NAME_LEN})"));
    }

    if name.starts_with('.') || name.contains("..") {
        return Err("path traversal detected".to_string());
    }

    if !name.chars().all(is_allowed_char) {
        return Err("invalid characters in file name".to_string());
    }

    Ok(())
}

/// クライアントのファイル名からアップロード画像の保存キーを作る
///
/// ディレクトリ部分を捨て、許可されない文字は `_` に置き換える。
/// 同じファイル名のアップロードは同じキーになり、後勝ちで上書きされる。
/// 使える文字が残らなければランダムなキーを生成する。
pub fn sanitize_upload_key(client_file_name: &str) -> String {
    let base = client_file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let mut key: String = base
        .chars()
        .map(|c| if is_allowed_char(c) { c } else { '_' })
        .collect();
    while key.contains("..") {
        key = key.replace("..", ".");
    }
    let key = key.trim_start_matches('.');
    let key: String = key.chars().take(MAX_FILE_NAME_LEN).collect();

    if key.chars().all(|c| c == '_' || c == '.') {
        return format!("upload-{}", uuid::Uuid::new_v4());
    }
    key
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'
}
