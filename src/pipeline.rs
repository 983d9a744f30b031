// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/pipeline.rs - 图像分类流程
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

use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::{
  classify::{ClassificationResult, classify},
  detection::DetectionSet,
  frame::Frame,
  input::{ImageFileInput, ImageFileInputError},
  model::Model,
  select::{EmptyResultError, select_best},
};

/// 一次分类的结论
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
  Classified(ClassificationResult),
  /// 检测器正常运行但没有发现任何对象
  NothingDetected,
}

impl Verdict {
  /// 未检测到对象时报告的类别
  pub const NOTHING_CATEGORY: &'static str = "none";

  pub fn is_furniture(&self) -> bool {
    matches!(self, Verdict::Classified(result) if result.is_furniture)
  }

  pub fn category(&self) -> &str {
    match self {
      Verdict::Classified(result) => &result.category,
      Verdict::NothingDetected => Self::NOTHING_CATEGORY,
    }
  }

  pub fn is_detected(&self) -> bool {
    matches!(self, Verdict::Classified(_))
  }
}

impl fmt::Display for Verdict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "furniture={} category={}", self.is_furniture(), self.category())
  }
}

#[derive(Error, Debug)]
pub enum PipelineError<E> {
  #[error("图像加载失败: {0}")]
  ImageLoad(#[from] ImageFileInputError),
  #[error("模型推理失败: {0}")]
  Model(#[source] E),
}

/// 在已有的检测结果上做出判定
pub fn classify_detections(detections: &DetectionSet, user_choice: &str) -> Verdict {
  match select_best(detections) {
    Ok(best) => {
      debug!(
        "最高置信度结果: {} ({:.4})",
        best.category(),
        best.confidence()
      );
      Verdict::Classified(classify(best.category(), user_choice))
    }
    Err(EmptyResultError) => {
      info!("未检测到任何对象");
      Verdict::NothingDetected
    }
  }
}

/// 对已解码的图像运行检测并判定
pub fn classify_frame<M>(model: &M, frame: &Frame, user_choice: &str) -> Result<Verdict, M::Error>
where
  M: Model<Input = Frame, Output = DetectionSet>,
{
  let now = std::time::Instant::now();
  let detections = model.infer(frame)?;
  debug!(
    "推理完成，耗时: {:.2?}, 结果数量: {}",
    now.elapsed(),
    detections.len()
  );

  let verdict = classify_detections(&detections, user_choice);
  info!("{}: {}", frame.source().display(), verdict);
  Ok(verdict)
}

/// 读取图像文件，运行检测并判定
///
/// 图像无法读取或解码时返回 [`PipelineError::ImageLoad`]，检测器自身的
/// 错误返回 [`PipelineError::Model`]。
pub fn classify_image<M>(
  model: &M,
  image: impl AsRef<Path>,
  user_choice: &str,
) -> Result<Verdict, PipelineError<M::Error>>
where
  M: Model<Input = Frame, Output = DetectionSet>,
{
  let frame = ImageFileInput::load_frame(image)?;
  classify_frame(model, &frame, user_choice).map_err(PipelineError::Model)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::detection::Detection;

  fn set(items: &[(&str, f64)]) -> DetectionSet {
    items.iter().map(|&(c, s)| Detection::new(c, s)).collect()
  }

  #[test]
  fn tie_resolves_to_first_seen_couch() {
    let detections = set(&[("couch", 0.81), ("table", 0.81), ("chair", 0.40)]);
    assert_eq!(
      classify_detections(&detections, "couch"),
      Verdict::Classified(ClassificationResult {
        is_furniture: true,
        category: "couch".to_string(),
      })
    );
  }

  #[test]
  fn empty_set_is_nothing_detected() {
    let verdict = classify_detections(&DetectionSet::empty(), "couch");
    assert_eq!(verdict, Verdict::NothingDetected);
    assert!(!verdict.is_furniture());
    assert_eq!(verdict.category(), "none");
  }

  #[test]
  fn display_reports_category() {
    let verdict = classify_detections(&set(&[("car", 0.9)]), "couch");
    assert_eq!(verdict.to_string(), "furniture=false category=car");
  }
}
