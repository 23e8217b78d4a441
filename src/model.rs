// 该文件是 Kuiying （盔影） 项目的一部分。
// src/model.rs - 模型边界
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

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::tensor::{InputTensor, OutputTensor, OUTPUT_COLS, OUTPUT_ROWS};

/// 模型边界
///
/// 推理后端对流水线是不透明能力：张量进、张量出，除计算开销外无副作用。
/// 句柄由调用方创建并管理生命周期，按引用注入流水线，退出时由持有方释放。
pub trait Model {
  type Error: std::error::Error + Send + Sync + 'static;

  /// 执行一次推理
  fn infer(&self, input: &InputTensor) -> Result<OutputTensor, Self::Error>;

  /// 模型输入宽度（像素）
  fn input_width(&self) -> u32;

  /// 模型输入高度（像素）
  fn input_height(&self) -> u32;
}

#[derive(Error, Debug)]
pub enum ReplayModelError {
  #[error("录制文件读取失败: {0}")]
  Io(#[from] std::io::Error),
  #[error("录制张量长度不匹配: 期望 {expected} 个浮点数, 实际 {actual}")]
  LengthMismatch { expected: usize, actual: usize },
}

/// 回放模型
///
/// 从磁盘加载一份预先录制的输出张量（小端 f32 原始转储，6×8400 个值），
/// 每次推理原样返回。用于在没有推理硬件的环境下联调后处理流水线。
pub struct ReplayModel {
  output: OutputTensor,
  input_width: u32,
  input_height: u32,
}

impl ReplayModel {
  /// 从录制文件加载回放模型
  pub fn from_file<P: AsRef<Path>>(
    path: P,
    input_width: u32,
    input_height: u32,
  ) -> Result<Self, ReplayModelError> {
    info!("加载录制张量: {}", path.as_ref().display());
    let bytes = std::fs::read(path)?;

    let expected = OUTPUT_ROWS * OUTPUT_COLS;
    if bytes.len() != expected * 4 {
      return Err(ReplayModelError::LengthMismatch {
        expected,
        actual: bytes.len() / 4,
      });
    }

    let values: Vec<f32> = bytes
      .chunks_exact(4)
      .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
      .collect();
    debug!("录制张量加载完成: {} 个值", values.len());

    // 长度已按 6×8400 校验，构造不会失败
    let output = OutputTensor::new(OUTPUT_ROWS, OUTPUT_COLS, values)
      .map_err(|_| ReplayModelError::LengthMismatch {
        expected,
        actual: 0,
      })?;

    Ok(Self {
      output,
      input_width,
      input_height,
    })
  }

  /// 直接由张量构造回放模型
  pub fn from_tensor(output: OutputTensor, input_width: u32, input_height: u32) -> Self {
    Self {
      output,
      input_width,
      input_height,
    }
  }
}

impl Model for ReplayModel {
  type Error = std::convert::Infallible;

  fn infer(&self, _input: &InputTensor) -> Result<OutputTensor, Self::Error> {
    Ok(self.output.clone())
  }

  fn input_width(&self) -> u32 {
    self.input_width
  }

  fn input_height(&self) -> u32 {
    self.input_height
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn replay_model_returns_recorded_tensor() {
    let data: Vec<f32> = (0..OUTPUT_ROWS * OUTPUT_COLS).map(|i| i as f32).collect();
    let tensor = OutputTensor::new(OUTPUT_ROWS, OUTPUT_COLS, data).unwrap();
    let model = ReplayModel::from_tensor(tensor, 640, 640);

    let input = InputTensor::new(1, 1, vec![0.0; 3]);
    let output = model.infer(&input).unwrap();
    assert_eq!(output.rows(), OUTPUT_ROWS);
    assert_eq!(output.cols(), OUTPUT_COLS);
    assert_eq!(output.at(1, 0), OUTPUT_COLS as f32);
  }

  #[test]
  fn from_file_rejects_truncated_dump() {
    let dir = std::env::temp_dir();
    let path = dir.join("kuiying-truncated-dump.bin");
    std::fs::write(&path, [0u8; 16]).unwrap();
    let result = ReplayModel::from_file(&path, 640, 640);
    std::fs::remove_file(&path).ok();
    assert!(matches!(
      result,
      Err(ReplayModelError::LengthMismatch { .. })
    ));
  }
}
