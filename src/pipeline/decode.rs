// 该文件是 Kuiying （盔影） 项目的一部分。
// src/pipeline/decode.rs - 输出张量解码
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

use crate::error::DetectError;
use crate::labels::LabelTable;
use crate::tensor::{OutputTensor, OUTPUT_COLS, OUTPUT_ROWS};

/// 候选框
///
/// 解码器产出、抑制器消费的中间结果。角点已换算并截断到模型输入
/// 坐标范围内；column 记录来源列号，供 NMS 平分时稳定排序。
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
  pub left: f32,
  pub top: f32,
  pub right: f32,
  pub bottom: f32,
  pub class_id: usize,
  pub score: f32,
  pub column: usize,
}

/// 候选框惰性序列
///
/// 按列号顺序产出，未排序。迭代器只借用张量与标签表，
/// 重新调用 [`decode`] 即可重放。
pub struct Candidates<'a> {
  tensor: &'a OutputTensor,
  labels: &'a LabelTable,
  model_width: f32,
  model_height: f32,
  confidence_threshold: f32,
  column: usize,
}

impl Iterator for Candidates<'_> {
  type Item = Result<Candidate, DetectError>;

  fn next(&mut self) -> Option<Self::Item> {
    while self.column < self.tensor.cols() {
      let i = self.column;
      self.column += 1;

      let objectness = sigmoid(self.tensor.at(4, i));
      if objectness < self.confidence_threshold {
        continue;
      }

      // 类别编号以浮点形式编码，四舍五入（.5 远离零）后截断到标签表范围
      let class_id = (self.tensor.at(5, i).round().max(0.0) as usize).min(self.labels.len() - 1);
      if self.labels.get(class_id).is_none() {
        return Some(Err(DetectError::UnknownClass(class_id)));
      }

      let cx = self.tensor.at(0, i);
      let cy = self.tensor.at(1, i);
      let w = self.tensor.at(2, i);
      let h = self.tensor.at(3, i);

      let left = (cx - w / 2.0).max(0.0);
      let top = (cy - h / 2.0).max(0.0);
      let right = (cx + w / 2.0).min(self.model_width);
      let bottom = (cy + h / 2.0).min(self.model_height);

      return Some(Ok(Candidate {
        left,
        top,
        right,
        bottom,
        class_id,
        score: objectness,
        column: i,
      }));
    }

    None
  }
}

/// 解码模型输出张量为候选框序列
///
/// 行语义固定：行 0-3 为框中心与宽高（模型输入像素坐标，无需再缩放），
/// 行 4 为 objectness logit（经 sigmoid 得到分数），行 5 为浮点编码的
/// 类别编号。objectness 低于置信度阈值的列被跳过。
pub fn decode<'a>(
  tensor: &'a OutputTensor,
  model_width: f32,
  model_height: f32,
  confidence_threshold: f32,
  labels: &'a LabelTable,
) -> Result<Candidates<'a>, DetectError> {
  if tensor.rows() != OUTPUT_ROWS || tensor.cols() != OUTPUT_COLS {
    return Err(DetectError::ShapeMismatch(format!(
      "期望 {}x{}, 实际 {}x{}",
      OUTPUT_ROWS,
      OUTPUT_COLS,
      tensor.rows(),
      tensor.cols()
    )));
  }

  Ok(Candidates {
    tensor,
    labels,
    model_width,
    model_height,
    confidence_threshold,
    column: 0,
  })
}

fn sigmoid(x: f32) -> f32 {
  1.0 / (1.0 + (-x).exp())
}
