// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/select.rs - 最高置信度检测结果选择
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
use tracing::warn;

use crate::detection::{Detection, DetectionSet};

/// 检测器正常运行但没有给出任何可用结果
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("检测结果为空")]
pub struct EmptyResultError;

/// 选出置信度最高的检测结果
///
/// 线性扫描，按数值比较置信度。置信度相同时保留先出现的一项，
/// 只有严格更大的置信度才会替换当前结果。置信度为 NaN 的项被跳过。
pub fn select_best(detections: &DetectionSet) -> Result<&Detection, EmptyResultError> {
  let mut best: Option<&Detection> = None;

  for detection in detections {
    let score = detection.confidence();
    if score.is_nan() {
      warn!("忽略置信度为 NaN 的检测结果: {}", detection.category());
      continue;
    }

    match best {
      Some(current) if score <= current.confidence() => {}
      _ => best = Some(detection),
    }
  }

  best.ok_or(EmptyResultError)
}
