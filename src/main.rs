// 该文件是 Kuiying （盔影） 项目的一部分。
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
use image::ImageReader;
use serde_json::json;
use tracing::info;

use kuiying::{DetectionPipeline, Frame, LabelTable, ReplayModel};

fn load_labels(path: Option<&str>) -> Result<LabelTable> {
  match path {
    Some(path) => {
      let content =
        std::fs::read_to_string(path).with_context(|| format!("无法读取标签文件: {}", path))?;
      let names: Vec<String> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect();
      Ok(LabelTable::from_names(names)?)
    }
    None => Ok(LabelTable::helmet()),
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = args::Args::parse();

  info!("输入图片: {}", args.image);
  info!("录制张量: {}", args.tensor);
  info!("模型输入尺寸: {}x{}", args.size, args.size);
  info!("置信度阈值: {}", args.confidence);
  info!("NMS 阈值: {}", args.nms_threshold);

  let labels = load_labels(args.labels.as_deref())?;
  info!("标签表: {} 个类别", labels.len());

  let image = ImageReader::open(&args.image)
    .with_context(|| format!("无法打开图片文件: {}", args.image))?
    .decode()
    .with_context(|| format!("无法解码图片文件: {}", args.image))?
    .to_rgb8();
  let frame = Frame::try_from(image)?;
  info!("图片已加载: {}x{}", frame.width(), frame.height());

  let model = ReplayModel::from_file(&args.tensor, args.size, args.size)?;
  let pipeline = DetectionPipeline::new(model, labels)
    .with_confidence_threshold(args.confidence)
    .with_iou_threshold(args.nms_threshold);

  info!("开始检测...");
  let now = std::time::Instant::now();
  let detections = pipeline.run(&frame)?;
  info!("检测完成，耗时: {:.2?}", now.elapsed());

  info!("检测到 {} 个对象", detections.len());
  for det in &detections {
    info!(
      "  - {}: {:.2}% at ({:.0}, {:.0})-({:.0}, {:.0})",
      det.label,
      det.score * 100.0,
      det.left,
      det.top,
      det.right,
      det.bottom
    );
  }

  if let Some(record) = &args.record {
    let report = json!({
      "image": args.image,
      "model_input_size": args.size,
      "detections": detections,
    });
    std::fs::write(record, serde_json::to_string_pretty(&report)?)
      .with_context(|| format!("无法写入结果文件: {}", record))?;
    info!("结果已写入: {}", record);
  }

  Ok(())
}
