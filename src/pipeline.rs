// 该文件是 Kuiying （盔影） 项目的一部分。
// src/pipeline.rs - 检测流水线
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

pub mod decode;
pub mod preprocess;
pub mod suppress;

pub use decode::{decode, Candidate, Candidates};
pub use preprocess::preprocess;
pub use suppress::{suppress, Detection};

use tracing::debug;

use crate::error::DetectError;
use crate::frame::Frame;
use crate::labels::LabelTable;
use crate::model::Model;

/// 默认置信度阈值
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.35;
/// 默认 NMS IOU 阈值
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.45;

/// 检测流水线
///
/// 按固定顺序编排预处理、推理、解码与抑制，对外只暴露
/// `run(帧) -> 检测结果` 一个操作。跨调用无内部状态，仅持有
/// 外部注入的模型句柄，可对不同帧反复同步调用。
/// 单帧出错即整帧失败，不返回部分结果。
pub struct DetectionPipeline<M> {
  model: M,
  labels: LabelTable,
  confidence_threshold: f32,
  iou_threshold: f32,
}

impl<M: Model> DetectionPipeline<M> {
  /// 创建检测流水线，阈值取默认值
  pub fn new(model: M, labels: LabelTable) -> Self {
    Self {
      model,
      labels,
      confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
      iou_threshold: DEFAULT_IOU_THRESHOLD,
    }
  }

  /// 设置置信度阈值
  pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
    self.confidence_threshold = threshold;
    self
  }

  /// 设置 NMS IOU 阈值
  pub fn with_iou_threshold(mut self, threshold: f32) -> Self {
    self.iou_threshold = threshold;
    self
  }

  /// 标签表
  pub fn labels(&self) -> &LabelTable {
    &self.labels
  }

  /// 对一帧执行完整检测
  pub fn run(&self, frame: &Frame) -> Result<Vec<Detection>, DetectError> {
    let width = self.model.input_width();
    let height = self.model.input_height();

    let input = preprocess(frame, width, height)?;

    debug!("执行模型推理");
    let output = self
      .model
      .infer(&input)
      .map_err(|e| DetectError::InferenceFailure(Box::new(e)))?;

    let candidates = decode(
      &output,
      width as f32,
      height as f32,
      self.confidence_threshold,
      &self.labels,
    )?
    .collect::<Result<Vec<_>, _>>()?;
    debug!("置信度过滤后剩余 {} 个候选框", candidates.len());

    suppress(candidates, self.iou_threshold, &self.labels)
  }
}
