// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/model/recorded.rs - 回放检测结果的模型
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

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme, decoded_path,
  detection::{Detection, DetectionSet},
  frame::Frame,
  model::{DEFAULT_MAX_RESULTS, Model},
  query_param,
};

#[derive(Error, Debug)]
pub enum RecordedModelError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("路径编码错误: {0}")]
  PathEncoding(#[from] std::string::FromUtf8Error),
  #[error("无效参数 {0}: {1}")]
  InvalidParam(&'static str, String),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("记录文件格式错误: {0}")]
  JsonError(#[from] serde_json::Error),
  #[error("图像 {image} 的检测结果 {category} 置信度 {confidence} 超出 [0, 1]")]
  InvalidConfidence {
    image: String,
    category: String,
    confidence: f64,
  },
}

/// 按图像文件名回放预先记录的检测结果
///
/// 记录文件是一个 JSON 对象，键为图像文件名，值为按检测器原始顺序
/// 排列的检测结果列表：
///
/// ```json
/// { "green_couch.png": [ { "category": "couch", "score": 0.81 } ] }
/// ```
///
/// 没有记录的图像得到空结果。
#[derive(Debug, Clone)]
pub struct RecordedModel {
  records: HashMap<String, Vec<Detection>>,
  max_results: usize,
}

impl FromUrlWithScheme for RecordedModel {
  const SCHEME: &'static str = "recorded";
}

impl FromUrl for RecordedModel {
  type Error = RecordedModelError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(RecordedModelError::SchemeMismatch);
    }

    let model = Self::from_path(decoded_path(url)?)?;
    match query_param::<usize>(url, "max_results") {
      Some(Ok(max_results)) => Ok(model.with_max_results(max_results)),
      Some(Err(value)) => Err(RecordedModelError::InvalidParam("max_results", value)),
      None => Ok(model),
    }
  }
}

impl RecordedModel {
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RecordedModelError> {
    let path = path.as_ref();
    info!("加载检测记录: {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let model = Self::from_json(&content)?;
    debug!("检测记录数量: {}", model.records.len());
    Ok(model)
  }

  pub fn from_json(content: &str) -> Result<Self, RecordedModelError> {
    let records = serde_json::from_str(content)?;
    Self::from_records(records)
  }

  /// 置信度必须位于 [0, 1]；NaN 留给选择阶段跳过
  pub fn from_records(
    records: HashMap<String, Vec<Detection>>,
  ) -> Result<Self, RecordedModelError> {
    for (image, detections) in &records {
      let invalid = detections
        .iter()
        .find(|det| !det.confidence().is_nan() && !(0.0..=1.0).contains(&det.confidence()));
      if let Some(det) = invalid {
        error!(
          "图像 {} 的检测结果 {} 置信度无效: {}",
          image,
          det.category(),
          det.confidence()
        );
        return Err(RecordedModelError::InvalidConfidence {
          image: image.clone(),
          category: det.category().to_string(),
          confidence: det.confidence(),
        });
      }
    }

    Ok(Self {
      records,
      max_results: DEFAULT_MAX_RESULTS,
    })
  }

  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }
}

impl Model for RecordedModel {
  type Input = Frame;
  type Output = DetectionSet;
  type Error = RecordedModelError;

  fn infer(&self, input: &Frame) -> Result<DetectionSet, RecordedModelError> {
    let Some(detections) = input.file_name().and_then(|name| self.records.get(name)) else {
      warn!("没有图像 {} 的检测记录", input.source().display());
      return Ok(DetectionSet::empty());
    };

    Ok(detections.iter().take(self.max_results).cloned().collect())
  }
}
