// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/detection.rs - 检测结果定义
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

use serde::Deserialize;

/// 单个检测结果：类别标签与置信度
///
/// 置信度取值于 [0, 1]，创建后不可修改。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Detection {
  category: String,
  #[serde(alias = "score")]
  confidence: f64,
}

impl Detection {
  pub fn new(category: impl Into<String>, confidence: f64) -> Self {
    Self {
      category: category.into(),
      confidence,
    }
  }

  pub fn category(&self) -> &str {
    &self.category
  }

  pub fn confidence(&self) -> f64 {
    self.confidence
  }
}

/// 一张图像的全部检测结果
///
/// 保留检测器给出的原始枚举顺序，允许为空。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionSet {
  items: Box<[Detection]>,
}

impl DetectionSet {
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
    self.items.iter()
  }

  pub fn as_slice(&self) -> &[Detection] {
    &self.items
  }
}

impl From<Vec<Detection>> for DetectionSet {
  fn from(items: Vec<Detection>) -> Self {
    Self {
      items: items.into_boxed_slice(),
    }
  }
}

impl FromIterator<Detection> for DetectionSet {
  fn from_iter<I: IntoIterator<Item = Detection>>(iter: I) -> Self {
    iter.into_iter().collect::<Vec<_>>().into()
  }
}

impl<'a> IntoIterator for &'a DetectionSet {
  type Item = &'a Detection;
  type IntoIter = std::slice::Iter<'a, Detection>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keeps_native_order() {
    let set: DetectionSet = [("couch", 0.81), ("table", 0.81), ("chair", 0.4)]
      .into_iter()
      .map(|(c, s)| Detection::new(c, s))
      .collect();

    let categories: Vec<_> = set.iter().map(Detection::category).collect();
    assert_eq!(categories, ["couch", "table", "chair"]);
  }

  #[test]
  fn deserializes_score_alias() {
    let det: Detection = serde_json::from_str(r#"{"category": "lamp", "score": 0.5}"#).unwrap();
    assert_eq!(det, Detection::new("lamp", 0.5));
  }
}
