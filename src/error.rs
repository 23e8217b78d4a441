// 该文件是 Kuiying （盔影） 项目的一部分。
// src/error.rs - 错误定义
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

use thiserror::Error;

/// 检测流水线错误
///
/// 三类错误均不可重试：单帧出错后调用方应跳过该帧，继续处理下一帧。
#[derive(Error, Debug)]
pub enum DetectError {
  /// 输入帧无效（尺寸为零或像素数据长度不匹配）
  #[error("无效帧: {0}")]
  InvalidFrame(String),
  /// 张量形状与约定不符
  #[error("张量形状不匹配: {0}")]
  ShapeMismatch(String),
  /// 类别编号超出标签表范围
  #[error("未知类别编号: {0}")]
  UnknownClass(usize),
  /// 模型推理失败，原样透传模型侧错误
  #[error("推理失败: {0}")]
  InferenceFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
}
