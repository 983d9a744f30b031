// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/input/read_image_file.rs - 图像文件输入
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::path::{Path, PathBuf};

use image::ImageReader;
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

use crate::{decoded_path, frame::Frame};

#[derive(Error, Debug)]
pub enum ImageFileInputError {
  #[error("URI scheme mismatch: expected 'image' or 'file', found '{0}'")]
  SchemeMismatch(String),
  #[error("Invalid path encoding: {0}")]
  PathEncoding(#[from] std::string::FromUtf8Error),
  #[error("I/O error on {}: {source}", .path.display())]
  IoError {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("Image loading error on {}: {source}", .path.display())]
  ImageLoadError {
    path: PathBuf,
    source: image::ImageError,
  },
}

const FILE_SCHEME: &str = "file";

/// 图像文件输入：`image://` 或 `file://` URL，以及普通文件路径
pub struct ImageFileInput;

impl ImageFileInput {
  pub const SCHEME: &'static str = "image";

  pub(crate) fn path_from_url(url: &Url) -> Result<PathBuf, ImageFileInputError> {
    if url.scheme() != Self::SCHEME && url.scheme() != FILE_SCHEME {
      error!(
        "URI scheme mismatch: expected '{}', found '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(ImageFileInputError::SchemeMismatch(url.scheme().to_string()));
    }
    Ok(decoded_path(url)?)
  }

  /// 读取并解码图像文件
  pub fn load_frame(path: impl AsRef<Path>) -> Result<Frame, ImageFileInputError> {
    let path = path.as_ref();
    debug!("读取图像文件: {}", path.display());

    let image = ImageReader::open(path)
      .and_then(|reader| reader.with_guessed_format())
      .map_err(|source| ImageFileInputError::IoError {
        path: path.to_path_buf(),
        source,
      })?
      .decode()
      .map_err(|source| ImageFileInputError::ImageLoadError {
        path: path.to_path_buf(),
        source,
      })?;

    debug!("图像尺寸: {}x{}", image.width(), image.height());
    Ok(Frame::new(path, image.into_rgb8()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("desk.png");
    image::RgbImage::new(3, 2).save(&path).unwrap();

    let frame = ImageFileInput::load_frame(&path).unwrap();
    assert_eq!((frame.width(), frame.height()), (3, 2));
    assert_eq!(frame.file_name(), Some("desk.png"));
    assert_eq!(frame.source(), path.as_path());
  }

  #[test]
  fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ImageFileInput::load_frame(dir.path().join("missing.png"));
    assert!(matches!(result, Err(ImageFileInputError::IoError { .. })));
  }

  #[test]
  fn corrupt_file_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("busted_couch.jpg");
    std::fs::write(&path, b"\xff\xd8\xff\xe0 definitely not a jpeg").unwrap();

    let result = ImageFileInput::load_frame(&path);
    assert!(matches!(result, Err(ImageFileInputError::ImageLoadError { .. })));
  }

  #[test]
  fn path_from_url_checks_scheme() {
    let url = Url::parse("video:///tmp/a.mp4").unwrap();
    assert!(matches!(
      ImageFileInput::path_from_url(&url),
      Err(ImageFileInputError::SchemeMismatch(_))
    ));

    let url = Url::parse("image:///tmp/a.png").unwrap();
    assert_eq!(
      ImageFileInput::path_from_url(&url).unwrap(),
      PathBuf::from("/tmp/a.png")
    );
  }
}
