// 该文件是 Furniscan （家具识别） 项目的一部分。
// src/task.rs - 分类任务
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
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use tracing::{error, info, warn};

use crate::{
  detection::DetectionSet,
  frame::Frame,
  model::Model,
  output::Render,
  pipeline::{PipelineError, Verdict, classify_image},
};

pub trait Task<I, M, O>: Sized {
  type Output;
  type Error;
  fn run_task(self, input: I, model: M, output: O) -> Result<Self::Output, Self::Error>;
}

/// 只分类第一张图像，任何错误都直接返回
pub struct OneShotTask {
  user_choice: String,
}

impl OneShotTask {
  pub fn new(user_choice: impl Into<String>) -> Self {
    Self {
      user_choice: user_choice.into(),
    }
  }
}

impl<
  ME: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: IntoIterator<Item = PathBuf>,
  M: Model<Input = Frame, Output = DetectionSet, Error = ME>,
  O: Render<Verdict, Error = RE>,
> Task<I, M, O> for OneShotTask
{
  type Output = Verdict;
  type Error = anyhow::Error;

  fn run_task(self, input: I, model: M, output: O) -> Result<Self::Output, Self::Error> {
    info!("开始任务...");
    let path = input
      .into_iter()
      .next()
      .ok_or_else(|| anyhow::anyhow!("没有输入图像"))?;
    let verdict = classify_image(&model, &path, &self.user_choice)
      .with_context(|| format!("无法分类图像: {}", path.display()))?;
    output.render_result(&path, &verdict)?;
    output.finish()?;
    Ok(verdict)
  }
}

/// 批量任务的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
  pub furniture: usize,
  pub not_furniture: usize,
  pub nothing_detected: usize,
  pub failed: usize,
}

impl BatchSummary {
  fn record(&mut self, verdict: &Verdict) {
    match verdict {
      Verdict::Classified(result) if result.is_furniture => self.furniture += 1,
      Verdict::Classified(_) => self.not_furniture += 1,
      Verdict::NothingDetected => self.nothing_detected += 1,
    }
  }

  pub fn total(&self) -> usize {
    self.furniture + self.not_furniture + self.nothing_detected + self.failed
  }
}

/// 依次分类每张图像
///
/// 图像无法加载时记录失败并继续处理下一张；模型错误会终止任务。
#[derive(Debug)]
pub struct BatchTask {
  user_choice: String,
  interruptible: bool,
}

impl BatchTask {
  pub fn new(user_choice: impl Into<String>) -> Self {
    Self {
      user_choice: user_choice.into(),
      interruptible: false,
    }
  }

  /// 收到 Ctrl-C 后在两张图像之间停止
  ///
  /// 一个进程只能注册一次中断处理函数。
  pub fn with_interrupt(mut self, interruptible: bool) -> Self {
    self.interruptible = interruptible;
    self
  }

  fn install_interrupt(&self) -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));
    if self.interruptible {
      let flag = stop.clone();
      if let Err(e) = ctrlc::set_handler(move || {
        info!("收到中断信号，处理完当前图像后退出...");
        flag.store(true, Ordering::SeqCst);
      }) {
        warn!("无法注册中断处理函数: {}", e);
      }
    }
    stop
  }
}

impl<
  ME: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: IntoIterator<Item = PathBuf>,
  M: Model<Input = Frame, Output = DetectionSet, Error = ME>,
  O: Render<Verdict, Error = RE>,
> Task<I, M, O> for BatchTask
{
  type Output = BatchSummary;
  type Error = anyhow::Error;

  fn run_task(self, input: I, model: M, output: O) -> Result<Self::Output, Self::Error> {
    info!("开始任务...");
    let stop = self.install_interrupt();
    let mut summary = BatchSummary::default();

    for path in input {
      if stop.load(Ordering::SeqCst) {
        warn!("中断信号接收，退出任务循环");
        break;
      }

      match classify_image(&model, &path, &self.user_choice) {
        Ok(verdict) => {
          summary.record(&verdict);
          output.render_result(&path, &verdict)?;
        }
        Err(PipelineError::ImageLoad(e)) => {
          error!("图像加载失败: {}", e);
          summary.failed += 1;
          output.render_failure(&path, &e)?;
        }
        Err(PipelineError::Model(e)) => {
          let context = format!("模型推理失败: {}", path.display());
          return Err(anyhow::Error::new(e).context(context));
        }
      }
    }

    output.finish()?;
    info!(
      "任务完成: 家具 {}, 非家具 {}, 未检测到对象 {}, 失败 {}",
      summary.furniture, summary.not_furniture, summary.nothing_detected, summary.failed
    );
    Ok(summary)
  }
}
