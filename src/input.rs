// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/input.rs - 图像输入
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

use std::path::PathBuf;

mod read_image_file;
pub use self::read_image_file::{ImageFileInput, ImageFileInputError};

/// 把命令行给出的输入解析为文件路径
///
/// 支持普通路径，以及 `image://` 与 `file://` URL。
pub fn source_path(source: &str) -> Result<PathBuf, ImageFileInputError> {
  match url::Url::parse(source) {
    Ok(url) if url.scheme().len() > 1 => ImageFileInput::path_from_url(&url),
    // 解析失败或 Windows 盘符（如 `C:`）都按普通路径处理
    _ => Ok(PathBuf::from(source)),
  }
}
