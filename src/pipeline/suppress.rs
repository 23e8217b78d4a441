// 该文件是 Kuiying （盔影） 项目的一部分。
// src/pipeline/suppress.rs - 非极大值抑制
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

use serde::Serialize;
use tracing::debug;

use crate::error::DetectError;
use crate::labels::LabelTable;
use crate::pipeline::decode::Candidate;

const IOU_EPSILON: f32 = 1e-6;

/// 检测结果
///
/// 对外输出的最终值：左上/右下角点、类别名称与置信度分数。
/// 满足 left <= right、top <= bottom、score ∈ [0, 1]。
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
  pub left: f32,
  pub top: f32,
  pub right: f32,
  pub bottom: f32,
  pub label: String,
  pub score: f32,
}

/// 贪心非极大值抑制
///
/// 按分数降序稳定排序（同分按列号保持确定性），反复取最高分者入选，
/// 并剔除与之同类且 IOU 超过阈值的其余候选。不同类别的候选互不抑制。
/// 结果按分数降序返回；对自身输出重复执行得到相同集合。
pub fn suppress(
  mut candidates: Vec<Candidate>,
  iou_threshold: f32,
  labels: &LabelTable,
) -> Result<Vec<Detection>, DetectError> {
  candidates.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.column.cmp(&b.column)));

  let mut accepted = Vec::new();
  while !candidates.is_empty() {
    let best = candidates.remove(0);
    candidates.retain(|c| c.class_id != best.class_id || iou(&best, c) <= iou_threshold);

    let label = labels
      .get(best.class_id)
      .ok_or(DetectError::UnknownClass(best.class_id))?
      .to_string();
    accepted.push(Detection {
      left: best.left,
      top: best.top,
      right: best.right,
      bottom: best.bottom,
      label,
      score: best.score,
    });
  }

  debug!("NMS 保留 {} 个检测结果", accepted.len());
  Ok(accepted)
}

/// 交并比
///
/// 分母加 1e-6，零面积退化框不会触发除零。
fn iou(a: &Candidate, b: &Candidate) -> f32 {
  let x1 = a.left.max(b.left);
  let y1 = a.top.max(b.top);
  let x2 = a.right.min(b.right);
  let y2 = a.bottom.min(b.bottom);

  let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
  let area_a = (a.right - a.left) * (a.bottom - a.top);
  let area_b = (b.right - b.left) * (b.bottom - b.top);
  let union = area_a + area_b - intersection + IOU_EPSILON;

  intersection / union
}

#[cfg(test)]
mod tests {
  use super::*;

  fn candidate(
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    class_id: usize,
    score: f32,
    column: usize,
  ) -> Candidate {
    Candidate {
      left,
      top,
      right,
      bottom,
      class_id,
      score,
      column,
    }
  }

  #[test]
  fn identical_boxes_same_class_keep_highest() {
    let labels = LabelTable::helmet();
    let candidates = vec![
      candidate(10.0, 10.0, 50.0, 50.0, 0, 0.8, 0),
      candidate(10.0, 10.0, 50.0, 50.0, 0, 0.9, 1),
    ];

    let detections = suppress(candidates, 0.45, &labels).unwrap();
    assert_eq!(detections.len(), 1);
    assert!((detections[0].score - 0.9).abs() < 1e-6);
  }

  #[test]
  fn identical_boxes_different_classes_both_survive() {
    let labels = LabelTable::helmet();
    let candidates = vec![
      candidate(10.0, 10.0, 50.0, 50.0, 0, 0.8, 0),
      candidate(10.0, 10.0, 50.0, 50.0, 1, 0.9, 1),
    ];

    let detections = suppress(candidates, 0.45, &labels).unwrap();
    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0].label, "person_with_helmet");
    assert_eq!(detections[1].label, "person_no_helmet");
  }

  #[test]
  fn disjoint_boxes_same_class_both_survive() {
    let labels = LabelTable::helmet();
    let candidates = vec![
      candidate(0.0, 0.0, 10.0, 10.0, 0, 0.7, 0),
      candidate(100.0, 100.0, 110.0, 110.0, 0, 0.6, 1),
    ];

    let detections = suppress(candidates, 0.45, &labels).unwrap();
    assert_eq!(detections.len(), 2);
  }

  #[test]
  fn output_is_sorted_by_descending_score() {
    let labels = LabelTable::helmet();
    let candidates = vec![
      candidate(0.0, 0.0, 10.0, 10.0, 0, 0.5, 0),
      candidate(100.0, 0.0, 110.0, 10.0, 1, 0.9, 1),
      candidate(0.0, 100.0, 10.0, 110.0, 0, 0.7, 2),
    ];

    let detections = suppress(candidates, 0.45, &labels).unwrap();
    let scores: Vec<f32> = detections.iter().map(|d| d.score).collect();
    assert_eq!(scores, vec![0.9, 0.7, 0.5]);
  }

  #[test]
  fn score_ties_break_by_column_order() {
    let labels = LabelTable::helmet();
    let candidates = vec![
      candidate(100.0, 100.0, 110.0, 110.0, 0, 0.8, 9),
      candidate(0.0, 0.0, 10.0, 10.0, 0, 0.8, 2),
    ];

    let detections = suppress(candidates, 0.45, &labels).unwrap();
    assert_eq!(detections.len(), 2);
    // 列号小者优先
    assert_eq!(detections[0].left, 0.0);
  }

  #[test]
  fn suppression_is_idempotent() {
    let labels = LabelTable::helmet();
    let candidates = vec![
      candidate(10.0, 10.0, 50.0, 50.0, 0, 0.9, 0),
      candidate(12.0, 12.0, 52.0, 52.0, 0, 0.8, 1),
      candidate(100.0, 100.0, 140.0, 140.0, 1, 0.7, 2),
    ];

    let first = suppress(candidates, 0.45, &labels).unwrap();
    let rerun: Vec<Candidate> = first
      .iter()
      .enumerate()
      .map(|(i, d)| {
        candidate(
          d.left,
          d.top,
          d.right,
          d.bottom,
          if d.label == "person_no_helmet" { 0 } else { 1 },
          d.score,
          i,
        )
      })
      .collect();

    let second = suppress(rerun, 0.45, &labels).unwrap();
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
      assert_eq!(a.left, b.left);
      assert_eq!(a.label, b.label);
      assert_eq!(a.score, b.score);
    }
  }

  #[test]
  fn zero_area_boxes_do_not_divide_by_zero() {
    let labels = LabelTable::helmet();
    let candidates = vec![
      candidate(10.0, 10.0, 10.0, 10.0, 0, 0.9, 0),
      candidate(10.0, 10.0, 10.0, 10.0, 0, 0.8, 1),
    ];

    // 退化框 IOU 为 0，不互相抑制
    let detections = suppress(candidates, 0.45, &labels).unwrap();
    assert_eq!(detections.len(), 2);
  }

  #[test]
  fn empty_input_yields_empty_output() {
    let labels = LabelTable::helmet();
    let detections = suppress(vec![], 0.45, &labels).unwrap();
    assert!(detections.is_empty());
  }

  #[test]
  fn iou_of_identical_boxes_is_near_one() {
    let a = candidate(0.0, 0.0, 10.0, 10.0, 0, 0.9, 0);
    let b = candidate(0.0, 0.0, 10.0, 10.0, 0, 0.8, 1);
    assert!((iou(&a, &b) - 1.0).abs() < 1e-4);
  }

  #[test]
  fn iou_of_disjoint_boxes_is_zero() {
    let a = candidate(0.0, 0.0, 10.0, 10.0, 0, 0.9, 0);
    let b = candidate(20.0, 20.0, 30.0, 30.0, 0, 0.8, 1);
    assert_eq!(iou(&a, &b), 0.0);
  }
}
