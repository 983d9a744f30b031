// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/args.rs - 项目参数配置
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

use clap::Parser;
use url::Url;

/// Furniscan 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 检测模型
  /// 支持格式:
  /// - 回放记录: recorded:///path/detections.json
  /// - ONNX 模型: tract:///path/model.onnx?size=448&threshold=0.3
  #[arg(long, value_name = "MODEL")]
  pub model: Url,

  /// 用户声明的图像类别
  #[arg(long, value_name = "LABEL")]
  pub choice: String,

  /// 输出位置
  /// 支持格式:
  /// - 控制台: console:
  /// - JSON Lines: jsonl:///path/out.jsonl、jsonl://stdout 或 jsonl://-
  #[arg(long, default_value = "console:", value_name = "OUTPUT")]
  pub output: Url,

  /// 最多保留的检测结果数量，覆盖模型 URL 中的设置
  #[arg(long, value_name = "COUNT")]
  pub max_results: Option<usize>,

  /// 只处理第一张图像，出错时直接退出
  #[arg(long)]
  pub one_shot: bool,

  /// 输入图像（文件路径或 image:// URL）
  #[arg(required = true, value_name = "IMAGE")]
  pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_defaults() {
    let args = Args::try_parse_from([
      "furniscan",
      "--model",
      "recorded:///tmp/records.json",
      "--choice",
      "couch",
      "green_couch.png",
      "blue_couch.png",
    ])
    .unwrap();

    assert_eq!(args.output.scheme(), "console");
    assert_eq!(args.max_results, None);
    assert!(!args.one_shot);
    assert_eq!(args.images, ["green_couch.png", "blue_couch.png"]);
  }

  #[test]
  fn requires_images() {
    let result = Args::try_parse_from([
      "furniscan",
      "--model",
      "recorded:///tmp/records.json",
      "--choice",
      "couch",
    ]);
    assert!(result.is_err());
  }
}
