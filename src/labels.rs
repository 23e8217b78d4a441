// 该文件是 Kuiying （盔影） 项目的一部分。
// src/labels.rs - 类别标签表
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

/// 安全帽检测的默认类别
pub const HELMET_CLASSES: [&str; 2] = ["person_no_helmet", "person_with_helmet"];

/// 类别标签表
///
/// 启动时加载的有序、定长类别名称表，下标即类别编号。表不可为空。
#[derive(Debug, Clone)]
pub struct LabelTable {
  names: Box<[String]>,
}

impl LabelTable {
  /// 安全帽检测的默认标签表
  pub fn helmet() -> Self {
    Self {
      names: HELMET_CLASSES
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .into_boxed_slice(),
    }
  }

  /// 从名称列表创建标签表，空表视为配置错误
  pub fn from_names(names: Vec<String>) -> Result<Self, DetectError> {
    if names.is_empty() {
      return Err(DetectError::UnknownClass(0));
    }

    Ok(Self {
      names: names.into_boxed_slice(),
    })
  }

  /// 按类别编号查找名称
  pub fn get(&self, id: usize) -> Option<&str> {
    self.names.get(id).map(|s| s.as_str())
  }

  /// 类别数量
  pub fn len(&self) -> usize {
    self.names.len()
  }

  /// 是否为空（构造保证非空，恒为 false）
  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn helmet_table_has_two_classes() {
    let labels = LabelTable::helmet();
    assert_eq!(labels.len(), 2);
    assert_eq!(labels.get(0), Some("person_no_helmet"));
    assert_eq!(labels.get(1), Some("person_with_helmet"));
    assert_eq!(labels.get(2), None);
  }

  #[test]
  fn from_names_rejects_empty_table() {
    assert!(matches!(
      LabelTable::from_names(vec![]),
      Err(DetectError::UnknownClass(0))
    ));
  }

  #[test]
  fn from_names_keeps_order() {
    let labels = LabelTable::from_names(vec!["a".into(), "b".into(), "c".into()]).unwrap();
    assert_eq!(labels.get(1), Some("b"));
    assert_eq!(labels.len(), 3);
  }
}
