// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/output/console.rs - 控制台输出
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

use std::error::Error as StdError;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use url::Url;

use crate::{FromUrl, FromUrlWithScheme, output::Render, pipeline::Verdict};

/// 每张图像输出一行，以制表符分隔
///
/// `<来源>\tfurniture=<bool>\tcategory=<类别>`，失败时为 `<来源>\terror=<原因>`。
pub struct ConsoleOutput<W> {
  writer: Mutex<W>,
}

impl ConsoleOutput<io::Stdout> {
  pub fn stdout() -> Self {
    Self::new(io::stdout())
  }
}

impl<W: Write> ConsoleOutput<W> {
  pub fn new(writer: W) -> Self {
    Self {
      writer: Mutex::new(writer),
    }
  }

  pub fn into_inner(self) -> W {
    self
      .writer
      .into_inner()
      .unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  fn write_line(&self, line: std::fmt::Arguments<'_>) -> io::Result<()> {
    let mut writer = self
      .writer
      .lock()
      .map_err(|_| io::Error::other("控制台输出锁已损坏"))?;
    writer.write_fmt(line)?;
    writer.write_all(b"\n")
  }
}

impl FromUrlWithScheme for ConsoleOutput<io::Stdout> {
  const SCHEME: &'static str = "console";
}

impl FromUrl for ConsoleOutput<io::Stdout> {
  type Error = io::Error;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("URI 方案不匹配: {}", url.scheme()),
      ));
    }
    Ok(Self::stdout())
  }
}

impl<W: Write> Render<Verdict> for ConsoleOutput<W> {
  type Error = io::Error;

  fn render_result(&self, source: &Path, result: &Verdict) -> Result<(), Self::Error> {
    self.write_line(format_args!(
      "{}\tfurniture={}\tcategory={}",
      source.display(),
      result.is_furniture(),
      result.category()
    ))
  }

  fn render_failure(
    &self,
    source: &Path,
    error: &(dyn StdError + 'static),
  ) -> Result<(), Self::Error> {
    self.write_line(format_args!("{}\terror={}", source.display(), error))
  }

  fn finish(&self) -> Result<(), Self::Error> {
    let mut writer = self
      .writer
      .lock()
      .map_err(|_| io::Error::other("控制台输出锁已损坏"))?;
    writer.flush()
  }
}
