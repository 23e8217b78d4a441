// 该文件是 Kuiying （盔影） 项目的一部分。
// src/pipeline/preprocess.rs - 图像预处理
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

use image::imageops::FilterType;
use tracing::debug;

use crate::error::DetectError;
use crate::frame::Frame;
use crate::tensor::InputTensor;

/// 将输入帧预处理为模型输入张量
///
/// 双线性（Triangle）插值直接拉伸到目标尺寸，不保持宽高比、不加边；
/// 每个像素的 R、G、B 字节除以 255.0 后按行主序、通道交错写入张量。
/// 除 RGB 提取与 [0, 1] 归一化外不做任何色彩空间或均值方差变换。
/// 每次调用只分配一个张量缓冲区，不修改源帧。
pub fn preprocess(
  frame: &Frame,
  target_width: u32,
  target_height: u32,
) -> Result<InputTensor, DetectError> {
  if target_width == 0 || target_height == 0 {
    return Err(DetectError::InvalidFrame(format!(
      "目标尺寸无效: {}x{}",
      target_width, target_height
    )));
  }

  debug!(
    "预处理: {}x{} -> {}x{}",
    frame.width(),
    frame.height(),
    target_width,
    target_height
  );

  let resized = image::imageops::resize(
    frame.image(),
    target_width,
    target_height,
    FilterType::Triangle,
  );

  let mut data = Vec::with_capacity(3 * target_width as usize * target_height as usize);
  for pixel in resized.pixels() {
    data.push(pixel[0] as f32 / 255.0);
    data.push(pixel[1] as f32 / 255.0);
    data.push(pixel[2] as f32 / 255.0);
  }

  Ok(InputTensor::new(target_width, target_height, data))
}
