// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/taxonomy.rs - 家具类别表
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

use std::collections::HashSet;
use std::sync::LazyLock;

/// 被视为家具的类别标签
pub const FURNITURE_LABELS: [&str; 16] = [
  "chair",
  "couch",
  "table",
  "desk",
  "lamp",
  "bed",
  "bench",
  "stool",
  "sofa",
  "furniture",
  "furnishing",
  "cabinet",
  "shelf",
  "cupboard",
  "dresser",
  "drawer",
];

static FURNITURE_TAXONOMY: LazyLock<HashSet<&'static str>> =
  LazyLock::new(|| FURNITURE_LABELS.into_iter().collect());

/// 标签是否属于家具类别（区分大小写，精确匹配）
pub fn is_furniture_label(label: &str) -> bool {
  FURNITURE_TAXONOMY.contains(label)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_listed_label_is_furniture() {
    for label in FURNITURE_LABELS {
      assert!(is_furniture_label(label), "{label}");
    }
  }

  #[test]
  fn matching_is_exact() {
    assert!(!is_furniture_label("Couch"));
    assert!(!is_furniture_label("dining table"));
    assert!(!is_furniture_label(""));
    assert!(!is_furniture_label("car"));
  }
}
