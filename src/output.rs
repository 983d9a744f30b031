// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/output.rs - 结果输出
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
use std::path::Path;

use thiserror::Error;
use url::Url;

use crate::{FromUrl, FromUrlWithScheme, pipeline::Verdict};

pub trait Render<Output> {
  type Error;

  fn render_result(&self, source: &Path, result: &Output) -> Result<(), Self::Error>;

  fn render_failure(
    &self,
    source: &Path,
    error: &(dyn StdError + 'static),
  ) -> Result<(), Self::Error>;

  fn finish(&self) -> Result<(), Self::Error> {
    Ok(())
  }
}

mod console;
pub use self::console::ConsoleOutput;

#[cfg(feature = "jsonl_output")]
mod json_lines;
#[cfg(feature = "jsonl_output")]
pub use self::json_lines::{JsonLinesOutput, JsonLinesOutputError};

#[derive(Error, Debug)]
pub enum OutputError {
  #[error("控制台输出错误: {0}")]
  ConsoleError(#[from] std::io::Error),
  #[cfg(feature = "jsonl_output")]
  #[error("JSON Lines 输出错误: {0}")]
  JsonLinesOutputError(#[from] JsonLinesOutputError),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

pub enum OutputWrapper {
  Console(ConsoleOutput<std::io::Stdout>),
  #[cfg(feature = "jsonl_output")]
  JsonLines(JsonLinesOutput),
}

impl FromUrl for OutputWrapper {
  type Error = OutputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    match url.scheme() {
      ConsoleOutput::<std::io::Stdout>::SCHEME => {
        let output = ConsoleOutput::from_url(url)?;
        Ok(OutputWrapper::Console(output))
      }
      #[cfg(feature = "jsonl_output")]
      JsonLinesOutput::SCHEME => {
        let output = JsonLinesOutput::from_url(url)?;
        Ok(OutputWrapper::JsonLines(output))
      }
      other => Err(OutputError::SchemeMismatch(other.to_string())),
    }
  }
}

impl Render<Verdict> for OutputWrapper {
  type Error = OutputError;

  fn render_result(&self, source: &Path, result: &Verdict) -> Result<(), Self::Error> {
    match self {
      OutputWrapper::Console(output) => output
        .render_result(source, result)
        .map_err(OutputError::from),
      #[cfg(feature = "jsonl_output")]
      OutputWrapper::JsonLines(output) => output
        .render_result(source, result)
        .map_err(OutputError::from),
    }
  }

  fn render_failure(
    &self,
    source: &Path,
    error: &(dyn StdError + 'static),
  ) -> Result<(), Self::Error> {
    match self {
      OutputWrapper::Console(output) => output
        .render_failure(source, error)
        .map_err(OutputError::from),
      #[cfg(feature = "jsonl_output")]
      OutputWrapper::JsonLines(output) => output
        .render_failure(source, error)
        .map_err(OutputError::from),
    }
  }

  fn finish(&self) -> Result<(), Self::Error> {
    match self {
      OutputWrapper::Console(output) => output
        .finish()
        .map_err(OutputError::from),
      #[cfg(feature = "jsonl_output")]
      OutputWrapper::JsonLines(output) => output
        .finish()
        .map_err(OutputError::from),
    }
  }
}
