// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/model/tract_ssd.rs - 基于 tract 的 SSD 风格检测模型
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

use image::imageops::FilterType;
use thiserror::Error;
use tracing::{debug, error, info};
use tract_onnx::prelude::*;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme, decoded_path,
  detection::{Detection, DetectionSet},
  frame::Frame,
  model::{DEFAULT_MAX_RESULTS, Model, labels::coco_label},
  query_param,
};

/// EfficientDet-Lite2 的输入边长
const DEFAULT_INPUT_SIZE: u32 = 448;
const DEFAULT_SCORE_THRESHOLD: f32 = 0.0;
// TF 目标检测导出的输出顺序: boxes, classes, scores, num_detections
const DEFAULT_CLASSES_OUTPUT: usize = 1;
const DEFAULT_SCORES_OUTPUT: usize = 2;

#[derive(Error, Debug)]
pub enum TractSsdError {
  #[error("模型路径必须使用 {0} 方案")]
  SchemeMismatch(&'static str),
  #[error("路径编码错误: {0}")]
  PathEncoding(#[from] std::string::FromUtf8Error),
  #[error("无效参数 {0}: {1}")]
  InvalidParam(&'static str, String),
  #[error("模型加载失败 {}: {error:#}", .path.display())]
  ModelLoadError { path: PathBuf, error: TractError },
  #[error("推理失败: {0:#}")]
  InferenceError(TractError),
  #[error("模型输出无效: {0}")]
  InvalidOutput(String),
}

pub struct TractSsdBuilder {
  model_path: PathBuf,
  input_size: u32,
  score_threshold: f32,
  max_results: usize,
  classes_output: usize,
  scores_output: usize,
}

impl FromUrlWithScheme for TractSsdBuilder {
  const SCHEME: &'static str = "tract";
}

fn param<T: std::str::FromStr>(url: &Url, key: &'static str, default: T) -> Result<T, TractSsdError> {
  match query_param(url, key) {
    Some(Ok(value)) => Ok(value),
    Some(Err(value)) => Err(TractSsdError::InvalidParam(key, value)),
    None => Ok(default),
  }
}

impl FromUrl for TractSsdBuilder {
  type Error = TractSsdError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(TractSsdError::SchemeMismatch(Self::SCHEME));
    }

    Ok(TractSsdBuilder {
      model_path: decoded_path(url)?,
      input_size: param(url, "size", DEFAULT_INPUT_SIZE)?,
      score_threshold: param(url, "threshold", DEFAULT_SCORE_THRESHOLD)?,
      max_results: param(url, "max_results", DEFAULT_MAX_RESULTS)?,
      classes_output: param(url, "classes", DEFAULT_CLASSES_OUTPUT)?,
      scores_output: param(url, "scores", DEFAULT_SCORES_OUTPUT)?,
    })
  }
}

impl TractSsdBuilder {
  pub fn new(model_path: impl Into<PathBuf>) -> Self {
    Self {
      model_path: model_path.into(),
      input_size: DEFAULT_INPUT_SIZE,
      score_threshold: DEFAULT_SCORE_THRESHOLD,
      max_results: DEFAULT_MAX_RESULTS,
      classes_output: DEFAULT_CLASSES_OUTPUT,
      scores_output: DEFAULT_SCORES_OUTPUT,
    }
  }

  pub fn input_size(mut self, input_size: u32) -> Self {
    self.input_size = input_size;
    self
  }

  pub fn score_threshold(mut self, score_threshold: f32) -> Self {
    self.score_threshold = score_threshold;
    self
  }

  pub fn build(self) -> Result<TractSsd, TractSsdError> {
    info!("加载模型文件: {}", self.model_path.display());
    let size = self.input_size as usize;
    let load_error = |error| TractSsdError::ModelLoadError {
      path: self.model_path.clone(),
      error,
    };

    let plan = tract_onnx::onnx()
      .model_for_path(&self.model_path)
      .and_then(|model| {
        model.with_input_fact(0, InferenceFact::dt_shape(u8::datum_type(), tvec!(1, size, size, 3)))
      })
      .and_then(|model| model.into_optimized())
      .and_then(|model| model.into_runnable())
      .map_err(load_error)?;

    let num_outputs = plan.model().outputs.len();
    debug!("模型输出数量: {}", num_outputs);
    for index in [self.classes_output, self.scores_output] {
      if index >= num_outputs {
        error!("模型只有 {} 个输出, 无法读取第 {} 个", num_outputs, index);
        return Err(TractSsdError::InvalidOutput(format!(
          "输出索引 {} 超出范围 (共 {} 个输出)",
          index, num_outputs
        )));
      }
    }
    info!("模型加载完成");

    Ok(TractSsd {
      plan,
      input_size: self.input_size,
      score_threshold: self.score_threshold,
      max_results: self.max_results,
      classes_output: self.classes_output,
      scores_output: self.scores_output,
    })
  }
}

/// SSD / EfficientDet 风格的 ONNX 检测模型
///
/// 输入为 `[1, size, size, 3]` 的 u8 RGB 张量，输出中包含按置信度排列的
/// 类别编号与置信度。
pub struct TractSsd {
  plan: TypedRunnableModel<TypedModel>,
  input_size: u32,
  score_threshold: f32,
  max_results: usize,
  classes_output: usize,
  scores_output: usize,
}

impl TractSsd {
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }

  fn build_input(&self, frame: &Frame) -> Tensor {
    let resized = image::imageops::resize(
      frame.image(),
      self.input_size,
      self.input_size,
      FilterType::Triangle,
    );
    let size = self.input_size as usize;
    tract_ndarray::Array4::from_shape_fn((1, size, size, 3), |(_, y, x, c)| {
      resized.get_pixel(x as u32, y as u32)[c]
    })
    .into_tensor()
  }

  fn decode(&self, outputs: &TVec<TValue>) -> Result<DetectionSet, TractSsdError> {
    let view = |index: usize| {
      outputs[index]
        .to_array_view::<f32>()
        .map_err(|e| TractSsdError::InvalidOutput(format!("输出 {} 不是 f32 张量: {:#}", index, e)))
    };
    let classes = view(self.classes_output)?;
    let scores = view(self.scores_output)?;

    if classes.len() != scores.len() {
      return Err(TractSsdError::InvalidOutput(format!(
        "类别数量 {} 与置信度数量 {} 不一致",
        classes.len(),
        scores.len()
      )));
    }

    Ok(
      classes
        .iter()
        .zip(scores.iter())
        .filter(|&(_, &score)| score >= self.score_threshold)
        .take(self.max_results)
        .map(|(&class_id, &score)| {
          let label = if class_id >= 0.0 {
            coco_label(class_id as usize)
          } else {
            coco_label(usize::MAX)
          };
          Detection::new(label, f64::from(score.clamp(0.0, 1.0)))
        })
        .collect(),
    )
  }
}

impl Model for TractSsd {
  type Input = Frame;
  type Output = DetectionSet;
  type Error = TractSsdError;

  fn infer(&self, input: &Frame) -> Result<DetectionSet, TractSsdError> {
    let tensor = self.build_input(input);
    let outputs = self
      .plan
      .run(tvec!(tensor.into()))
      .map_err(TractSsdError::InferenceError)?;
    let detections = self.decode(&outputs)?;
    debug!("检测到 {} 个对象", detections.len());
    Ok(detections)
  }
}
