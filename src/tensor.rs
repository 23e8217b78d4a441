// 该文件是 Kuiying （盔影） 项目的一部分。
// src/tensor.rs - 张量定义
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

/// 输出张量的固定行数: cx, cy, w, h, objectness, class_id
pub const OUTPUT_ROWS: usize = 6;
/// 输出张量的候选框列数
pub const OUTPUT_COLS: usize = 8400;

/// 模型输入张量
///
/// 扁平的 f32 序列，长度为 3 × 宽 × 高，NHWC 通道交错排列（每像素 R、G、B），
/// 各分量已归一化到 [0, 1]。由预处理器按帧创建，推理后即弃。
#[derive(Debug, Clone)]
pub struct InputTensor {
  width: u32,
  height: u32,
  data: Box<[f32]>,
}

impl InputTensor {
  pub(crate) fn new(width: u32, height: u32, data: Vec<f32>) -> Self {
    debug_assert_eq!(data.len(), 3 * width as usize * height as usize);
    Self {
      width,
      height,
      data: data.into_boxed_slice(),
    }
  }

  /// 张量宽度（像素）
  pub fn width(&self) -> u32 {
    self.width
  }

  /// 张量高度（像素）
  pub fn height(&self) -> u32 {
    self.height
  }

  /// 元素个数
  pub fn len(&self) -> usize {
    self.data.len()
  }

  /// 是否为空
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// 底层数据切片
  pub fn as_slice(&self) -> &[f32] {
    &self.data
  }
}

/// 模型输出张量
///
/// 行主序的二维 f32 数组。行列数在构造时固定，解码器再按 6×8400 的
/// 约定校验形状。对解码器只读，不跨帧保留。
#[derive(Debug, Clone)]
pub struct OutputTensor {
  rows: usize,
  cols: usize,
  data: Box<[f32]>,
}

impl OutputTensor {
  /// 创建输出张量，数据长度必须等于行数 × 列数
  pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self, DetectError> {
    let expected = rows * cols;
    if data.len() != expected {
      return Err(DetectError::ShapeMismatch(format!(
        "数据长度 {} 与 {}x{}={} 不符",
        data.len(),
        rows,
        cols,
        expected
      )));
    }

    Ok(Self {
      rows,
      cols,
      data: data.into_boxed_slice(),
    })
  }

  /// 行数
  pub fn rows(&self) -> usize {
    self.rows
  }

  /// 列数
  pub fn cols(&self) -> usize {
    self.cols
  }

  /// 读取指定行列的元素
  pub fn at(&self, row: usize, col: usize) -> f32 {
    self.data[row * self.cols + col]
  }

  /// 指定行的切片
  pub fn row(&self, row: usize) -> &[f32] {
    &self.data[row * self.cols..(row + 1) * self.cols]
  }
}
