// 该文件是 Kuiying （盔影） 项目的一部分。
// src/args.rs - 项目参数配置
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

use clap::Parser;

/// Kuiying 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 输入图片路径
  /// 支持格式: *.jpg, *.jpeg, *.png
  #[arg(long, value_name = "IMAGE")]
  pub image: String,

  /// 录制输出张量路径（小端 f32 原始转储，6×8400 个值）
  #[arg(long, value_name = "TENSOR")]
  pub tensor: String,

  /// 模型输入边长（像素，常见取值 320 或 640）
  #[arg(long, default_value = "640", value_name = "SIZE")]
  pub size: u32,

  /// 置信度阈值 (0.0 - 1.0)
  #[arg(long, default_value = "0.35", value_name = "THRESHOLD")]
  pub confidence: f32,

  /// NMS IOU 阈值 (0.0 - 1.0)
  #[arg(long, default_value = "0.45", value_name = "THRESHOLD")]
  pub nms_threshold: f32,

  /// 类别标签文件（每行一个名称，省略时使用安全帽默认标签）
  #[arg(long, value_name = "FILE")]
  pub labels: Option<String>,

  /// 检测结果 JSON 输出路径（省略时仅打印日志）
  #[arg(long, value_name = "FILE")]
  pub record: Option<String>,
}
