// 该文件是 Kuiying （盔影） 项目的一部分。
// src/frame.rs - 输入帧定义
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

use image::RgbImage;

use crate::error::DetectError;

const RGB_CHANNELS: usize = 3;

/// 输入帧
///
/// 一帧 RGB 图像，构造时校验尺寸与数据长度，构造后不可变。
/// 帧由调用方持有，流水线在单次调用期间只读访问。
#[derive(Debug, Clone)]
pub struct Frame {
  image: RgbImage,
}

impl Frame {
  /// 从原始 RGB 字节数据创建帧
  ///
  /// 数据按行主序排列，每像素 R、G、B 三字节。
  pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, DetectError> {
    if width == 0 || height == 0 {
      return Err(DetectError::InvalidFrame(format!(
        "帧尺寸无效: {}x{}",
        width, height
      )));
    }

    let expected = RGB_CHANNELS * width as usize * height as usize;
    if data.len() != expected {
      return Err(DetectError::InvalidFrame(format!(
        "像素数据长度不匹配: 期望 {}, 实际 {}",
        expected,
        data.len()
      )));
    }

    let image = RgbImage::from_raw(width, height, data).ok_or_else(|| {
      DetectError::InvalidFrame(format!("无法从原始数据构造 {}x{} 图像", width, height))
    })?;

    Ok(Self { image })
  }

  /// 帧宽度
  pub fn width(&self) -> u32 {
    self.image.width()
  }

  /// 帧高度
  pub fn height(&self) -> u32 {
    self.image.height()
  }

  /// 读取指定位置的像素，返回 [R, G, B]
  pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
    self.image.get_pixel(x, y).0
  }

  /// 底层 RGB 图像
  pub fn image(&self) -> &RgbImage {
    &self.image
  }
}

impl TryFrom<RgbImage> for Frame {
  type Error = DetectError;

  fn try_from(image: RgbImage) -> Result<Self, Self::Error> {
    if image.width() == 0 || image.height() == 0 {
      return Err(DetectError::InvalidFrame(format!(
        "帧尺寸无效: {}x{}",
        image.width(),
        image.height()
      )));
    }
    Ok(Self { image })
  }
}
