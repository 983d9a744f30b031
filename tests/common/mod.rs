use std::collections::HashMap;
use std::path::{Path, PathBuf};

use furniscan::{Detection, model::RecordedModel};

/// 写出一张可以正常解码的 PNG
pub fn write_image(dir: &Path, name: &str) -> PathBuf {
  let path = dir.join(name);
  image::RgbImage::from_pixel(8, 6, image::Rgb([120, 160, 90]))
    .save(&path)
    .unwrap();
  path
}

/// 写出一个扩展名是 PNG 但内容无法解码的文件
pub fn write_corrupt_image(dir: &Path, name: &str) -> PathBuf {
  let path = dir.join(name);
  std::fs::write(&path, b"\x89PNG\r\n\x1a\n truncated").unwrap();
  path
}

pub fn recorded_model(records: &[(&str, &[(&str, f64)])]) -> RecordedModel {
  let records: HashMap<String, Vec<Detection>> = records
    .iter()
    .map(|(name, detections)| {
      (
        name.to_string(),
        detections
          .iter()
          .map(|&(category, score)| Detection::new(category, score))
          .collect(),
      )
    })
    .collect();
  RecordedModel::from_records(records).unwrap()
}
