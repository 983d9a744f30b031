// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/model.rs - 检测模型
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

use thiserror::Error;
use url::Url;

use crate::{FromUrl, detection::DetectionSet, frame::Frame};

/// 检测器门面
///
/// 对一帧图像给出一组（类别, 置信度）结果。实现只读取输入，
/// 不保留任何跨调用的可变状态。
pub trait Model {
  type Input;
  type Output;
  type Error;

  fn infer(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// 默认最多返回的检测结果数量
pub const DEFAULT_MAX_RESULTS: usize = 15;

pub mod labels;

#[cfg(not(any(feature = "model_recorded", feature = "model_tract")))]
compile_error!("至少需要启用一个模型特性: model_recorded 或 model_tract");

#[cfg(feature = "model_recorded")]
mod recorded;
#[cfg(feature = "model_recorded")]
pub use self::recorded::{RecordedModel, RecordedModelError};

#[cfg(feature = "model_tract")]
mod tract_ssd;
#[cfg(feature = "model_tract")]
pub use self::tract_ssd::{TractSsd, TractSsdBuilder, TractSsdError};

#[derive(Error, Debug)]
pub enum ModelError {
  #[cfg(feature = "model_recorded")]
  #[error("回放模型错误: {0}")]
  RecordedModelError(#[from] RecordedModelError),
  #[cfg(feature = "model_tract")]
  #[error("Tract 模型错误: {0}")]
  TractSsdError(#[from] TractSsdError),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

/// 按 URL 方案选择的检测模型
pub enum ModelWrapper {
  #[cfg(feature = "model_recorded")]
  Recorded(RecordedModel),
  #[cfg(feature = "model_tract")]
  TractSsd(TractSsd),
}

impl FromUrl for ModelWrapper {
  type Error = ModelError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    #[cfg(feature = "model_recorded")]
    {
      use crate::FromUrlWithScheme;

      if url.scheme() == RecordedModel::SCHEME {
        return Ok(ModelWrapper::Recorded(RecordedModel::from_url(url)?));
      }
    }
    #[cfg(feature = "model_tract")]
    {
      use crate::FromUrlWithScheme;

      if url.scheme() == TractSsdBuilder::SCHEME {
        let model = TractSsdBuilder::from_url(url)?.build()?;
        return Ok(ModelWrapper::TractSsd(model));
      }
    }
    Err(ModelError::SchemeMismatch(url.scheme().to_string()))
  }
}

impl ModelWrapper {
  /// 覆盖最多返回的检测结果数量
  pub fn with_max_results(self, max_results: usize) -> Self {
    match self {
      #[cfg(feature = "model_recorded")]
      ModelWrapper::Recorded(model) => ModelWrapper::Recorded(model.with_max_results(max_results)),
      #[cfg(feature = "model_tract")]
      ModelWrapper::TractSsd(model) => ModelWrapper::TractSsd(model.with_max_results(max_results)),
    }
  }
}

impl Model for ModelWrapper {
  type Input = Frame;
  type Output = DetectionSet;
  type Error = ModelError;

  fn infer(&self, input: &Frame) -> Result<DetectionSet, ModelError> {
    match self {
      #[cfg(feature = "model_recorded")]
      ModelWrapper::Recorded(model) => model.infer(input).map_err(ModelError::from),
      #[cfg(feature = "model_tract")]
      ModelWrapper::TractSsd(model) => model.infer(input).map_err(ModelError::from),
    }
  }
}

#[cfg(all(test, feature = "model_recorded"))]
mod tests {
  use std::collections::HashMap;

  use super::*;
  use crate::detection::Detection;

  fn wrapper() -> ModelWrapper {
    let records = HashMap::from([(
      "green_couch.png".to_string(),
      vec![
        Detection::new("couch", 0.81),
        Detection::new("table", 0.81),
        Detection::new("chair", 0.40),
      ],
    )]);
    ModelWrapper::Recorded(RecordedModel::from_records(records).unwrap())
  }

  fn frame() -> Frame {
    Frame::new("/photos/green_couch.png", image::RgbImage::new(1, 1))
  }

  #[test]
  fn max_results_override_reaches_inner_model() {
    assert_eq!(wrapper().infer(&frame()).unwrap().len(), 3);

    let detections = wrapper().with_max_results(1).infer(&frame()).unwrap();
    assert_eq!(detections.len(), 1);
    assert_eq!(detections.as_slice()[0].category(), "couch");
  }

  #[test]
  fn unknown_scheme_is_rejected() {
    let url = Url::parse("yolo:///tmp/model.bin").unwrap();
    assert!(matches!(
      ModelWrapper::from_url(&url),
      Err(ModelError::SchemeMismatch(scheme)) if scheme == "yolo"
    ));
  }
}
