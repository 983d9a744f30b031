// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/output/json_lines.rs - JSON Lines 输出
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
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::{FromUrl, FromUrlWithScheme, decoded_path, output::Render, pipeline::Verdict};

#[derive(Error, Debug)]
pub enum JsonLinesOutputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("路径编码错误: {0}")]
  PathEncoding(#[from] std::string::FromUtf8Error),
  #[error("I/O 错误: {0}")]
  IoError(#[from] io::Error),
  #[error("JSON 序列化错误: {0}")]
  JsonError(#[from] serde_json::Error),
  #[error("输出锁已损坏")]
  Poisoned,
}

/// 写到标准输出的主机名: `jsonl://stdout` 或 `jsonl://-`
const STDOUT_HOSTS: [&str; 2] = ["stdout", "-"];

/// 每张图像写出一个 JSON 对象
pub struct JsonLinesOutput {
  writer: Mutex<Box<dyn Write + Send>>,
}

impl FromUrlWithScheme for JsonLinesOutput {
  const SCHEME: &'static str = "jsonl";
}

impl FromUrl for JsonLinesOutput {
  type Error = JsonLinesOutputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(JsonLinesOutputError::SchemeMismatch);
    }

    if url.host_str().is_some_and(|host| STDOUT_HOSTS.contains(&host)) {
      return Ok(Self::new(io::stdout()));
    }

    let path = decoded_path(url)?;
    info!("结果写入文件: {}", path.display());
    let file = File::create(&path)?;
    Ok(Self::new(BufWriter::new(file)))
  }
}

impl JsonLinesOutput {
  pub fn new(writer: impl Write + Send + 'static) -> Self {
    Self {
      writer: Mutex::new(Box::new(writer)),
    }
  }

  fn write_record(&self, record: &Value) -> Result<(), JsonLinesOutputError> {
    let mut writer = self
      .writer
      .lock()
      .map_err(|_| JsonLinesOutputError::Poisoned)?;
    serde_json::to_writer(&mut *writer, record)?;
    writer.write_all(b"\n")?;
    Ok(())
  }
}

fn timestamp() -> String {
  Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Render<Verdict> for JsonLinesOutput {
  type Error = JsonLinesOutputError;

  fn render_result(&self, source: &Path, result: &Verdict) -> Result<(), Self::Error> {
    self.write_record(&json!({
      "source": source.display().to_string(),
      "detected": result.is_detected(),
      "is_furniture": result.is_furniture(),
      "category": result.category(),
      "timestamp": timestamp(),
    }))
  }

  fn render_failure(
    &self,
    source: &Path,
    error: &(dyn StdError + 'static),
  ) -> Result<(), Self::Error> {
    self.write_record(&json!({
      "source": source.display().to_string(),
      "error": error.to_string(),
      "timestamp": timestamp(),
    }))
  }

  fn finish(&self) -> Result<(), Self::Error> {
    let mut writer = self
      .writer
      .lock()
      .map_err(|_| JsonLinesOutputError::Poisoned)?;
    writer.flush()?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::classify::classify;

  #[test]
  fn stdout_hosts_do_not_touch_files() {
    for source in ["jsonl://stdout", "jsonl://-"] {
      let url = Url::parse(source).unwrap();
      assert!(JsonLinesOutput::from_url(&url).is_ok(), "{source}");
    }
  }

  #[test]
  fn writes_records_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verdicts.jsonl");
    let url = Url::parse(&format!("jsonl://{}", path.display())).unwrap();

    let output = JsonLinesOutput::from_url(&url).unwrap();
    let lamp = Verdict::Classified(classify("lamp", "car"));
    output
      .render_result(Path::new("white_lamp.png"), &lamp)
      .unwrap();
    let error = io::Error::other("truncated");
    output
      .render_failure(Path::new("busted_couch.jpg"), &error)
      .unwrap();
    output.finish().unwrap();
    drop(output);

    let text = std::fs::read_to_string(&path).unwrap();
    let records: Vec<Value> = text
      .lines()
      .map(|line| serde_json::from_str(line).unwrap())
      .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["source"], "white_lamp.png");
    assert_eq!(records[0]["detected"], true);
    assert_eq!(records[0]["is_furniture"], false);
    assert_eq!(records[0]["category"], "lamp");
    assert_eq!(records[1]["error"], "truncated");
    assert!(records[1]["timestamp"].is_string());
  }
}
