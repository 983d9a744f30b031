// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/classify.rs - 家具判定
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

use crate::taxonomy::is_furniture_label;

/// 判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
  pub is_furniture: bool,
  /// 最高置信度检测结果的类别，与判定结果无关，始终返回
  pub category: String,
}

/// 检测类别与用户声明的类别都属于家具时，判定为家具
pub fn classify(top_category: &str, user_choice: &str) -> ClassificationResult {
  ClassificationResult {
    is_furniture: is_furniture_label(top_category) && is_furniture_label(user_choice),
    category: top_category.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn result(is_furniture: bool, category: &str) -> ClassificationResult {
    ClassificationResult {
      is_furniture,
      category: category.to_string(),
    }
  }

  #[test]
  fn both_furniture() {
    assert_eq!(classify("couch", "couch"), result(true, "couch"));
    assert_eq!(classify("lamp", "desk"), result(true, "lamp"));
  }

  #[test]
  fn user_choice_not_furniture() {
    assert_eq!(classify("couch", "car"), result(false, "couch"));
  }

  #[test]
  fn detection_not_furniture() {
    assert_eq!(classify("car", "couch"), result(false, "car"));
  }

  #[test]
  fn neither_furniture() {
    assert_eq!(classify("car", "car"), result(false, "car"));
  }
}
