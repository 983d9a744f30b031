// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/main.rs - 项目主程序
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

mod args;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use furniscan::{
  FromUrl,
  input::source_path,
  model::ModelWrapper,
  output::OutputWrapper,
  task::{BatchTask, OneShotTask, Task},
};

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let args = args::Args::parse();

  info!("模型: {}", args.model);
  info!("用户类别: {}", args.choice);
  info!("输出: {}", args.output);

  let images = args
    .images
    .iter()
    .map(|source| source_path(source).with_context(|| format!("无效的输入: {}", source)))
    .collect::<Result<Vec<_>>>()?;

  let mut model = ModelWrapper::from_url(&args.model).context("无法加载模型")?;
  if let Some(max_results) = args.max_results {
    model = model.with_max_results(max_results);
  }
  let output = OutputWrapper::from_url(&args.output).context("无法创建输出")?;

  if args.one_shot {
    let verdict = OneShotTask::new(&args.choice).run_task(images, model, output)?;
    info!("判定结果: {}", verdict);
  } else {
    let summary = BatchTask::new(&args.choice)
      .with_interrupt(true)
      .run_task(images, model, output)?;
    info!("共处理 {} 张图像", summary.total());
  }

  Ok(())
}
