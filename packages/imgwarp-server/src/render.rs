use serde::Serialize;

/// 1 つの変換結果（表示名と取得 URL）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedResult {
    pub name: String,
    pub url: String,
}

/// JSON で返す結果一覧
#[derive(Debug, Serialize)]
pub struct ResultManifest<'a> {
    pub results: &'a [ProcessedResult],
}

/// アップロードフォーム
pub const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Image Transformations</title>
</head>
<body>
  <h1>Image Transformations</h1>
  <form action="/process" method="post" enctype="multipart/form-data">
    <p><input type="file" name="image" accept="image/*" required></p>
    <fieldset>
      <legend>Transformations</legend>
      <p>
        <label><input type="checkbox" name="transformations" value="translate"> Translate</label>
        tx <input type="number" name="tx" value="50">
        ty <input type="number" name="ty" value="50">
      </p>
      <p>
        <label><input type="checkbox" name="transformations" value="rotate"> Rotate</label>
        angle <input type="number" name="angle" value="45">
      </p>
      <p>
        <label><input type="checkbox" name="transformations" value="scale"> Scale</label>
        scale_x <input type="number" step="any" name="scale_x" value="1.5">
        scale_y <input type="number" step="any" name="scale_y" value="1.5">
      </p>
      <p>
        <label><input type="checkbox" name="transformations" value="shear"> Shear</label>
        shear_x <input type="number" step="any" name="shear_x" value="0.2">
        shear_y <input type="number" step="any" name="shear_y" value="0.2">
      </p>
      <p><label><input type="checkbox" name="transformations" value="flip"> Flip</label></p>
      <p>
        <label><input type="checkbox" name="transformations" value="crop"> Crop</label>
        x1 <input type="number" name="crop_x1" value="0">
        y1 <input type="number" name="crop_y1" value="0">
        x2 <input type="number" name="crop_x2" value="100">
        y2 <input type="number" name="crop_y2" value="100">
      </p>
      <p><label><input type="checkbox" name="transformations" value="perspective"> Perspective</label></p>
    </fieldset>
    <p><button type="submit">Process</button></p>
  </form>
</body>
</html>
"#;

/// 結果ページを組み立てる。変換を適用した順に並べる
///
/// 名前と URL は固定の表示名と出力ファイル名から作られ、利用者の入力を含まない
pub fn render_results_page(results: &[ProcessedResult]) -> String {
    let mut items = String::new();
    for ProcessedResult { name, url } in results {
        items.push_str(&format!(
            "    <li>\n      <h2>{name}</h2>\n      <a href=\"{url}\"><img src=\"{url}\" alt=\"{name}\"></a>\n    </li>\n"
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <title>Processed Images</title>\n</head>\n<body>\n  <h1>Processed Images</h1>\n  <ul>\n{items}  </ul>\n  <p><a href=\"/\">Upload another image</a></p>\n</body>\n</html>\n"
    )
}
