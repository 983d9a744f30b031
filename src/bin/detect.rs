// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/bin/detect.rs - 输出每张图像的最高置信度检测结果
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

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use url::Url;

use furniscan::{
  FromUrl,
  input::{ImageFileInput, source_path},
  model::{Model, ModelWrapper},
  select::select_best,
};

/// 输出每张图像的最高置信度检测结果
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 检测模型
  #[arg(long, value_name = "MODEL")]
  pub model: Url,
  /// 输入图像
  #[arg(required = true, value_name = "IMAGE")]
  pub images: Vec<String>,
}

fn main() -> Result<()> {
  // 标准输出只留给检测结果
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  info!("模型: {}", args.model);

  let model = ModelWrapper::from_url(&args.model).context("无法加载模型")?;

  for source in &args.images {
    let path = source_path(source)?;
    let frame = match ImageFileInput::load_frame(&path) {
      Ok(frame) => frame,
      Err(e) => {
        error!("{}", e);
        println!("{}\terror={}", path.display(), e);
        continue;
      }
    };

    let detections = model.infer(&frame)?;
    match select_best(&detections) {
      Ok(best) => println!(
        "{}\t{}\t{:.4}",
        path.display(),
        best.category(),
        best.confidence()
      ),
      Err(e) => println!("{}\tnone\t({})", path.display(), e),
    }
  }

  Ok(())
}
