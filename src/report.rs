// 该文件是 Qianli （千里眼） 项目的一部分。
// src/report.rs - 检测结果汇报
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

use std::collections::BTreeMap;

use crate::detector::Detection;

/// 表格列，顺序固定
pub const TABLE_COLUMNS: [&str; 7] = [
  "xmin",
  "ymin",
  "xmax",
  "ymax",
  "confidence",
  "class",
  "name",
];

/// 单张输入图像的检测结果组
#[derive(Debug)]
pub struct DetectionGroup {
  /// 输入图像路径
  pub source: String,
  /// 原始图像宽度
  pub width: u32,
  /// 原始图像高度
  pub height: u32,
  /// 检测结果（检测器输出顺序）
  pub detections: Vec<Detection>,
}

/// 结果容器: 按输入图像分组的检测结果序列
#[derive(Debug)]
pub struct Results {
  pub groups: Vec<DetectionGroup>,
}

impl DetectionGroup {
  /// 单行文字摘要，如 `720x1280 2 persons, 1 tie`
  pub fn summary(&self) -> String {
    if self.detections.is_empty() {
      return format!("{}x{} (no detections)", self.height, self.width);
    }

    // 按类别号升序统计
    let mut counts: BTreeMap<usize, (usize, &str)> = BTreeMap::new();
    for det in &self.detections {
      let entry = counts.entry(det.class_id).or_insert((0, &det.class_name));
      entry.0 += 1;
    }

    let parts: Vec<String> = counts
      .values()
      .map(|(count, name)| {
        if *count > 1 {
          format!("{} {}s", count, name)
        } else {
          format!("{} {}", count, name)
        }
      })
      .collect();

    format!("{}x{} {}", self.height, self.width, parts.join(", "))
  }

  /// 表格视图: 表头加每个检测一行
  pub fn table(&self) -> String {
    let mut lines = Vec::with_capacity(self.detections.len() + 1);
    lines.push(format!(
      "{:>10} {:>10} {:>10} {:>10} {:>11} {:>6}  {}",
      TABLE_COLUMNS[0],
      TABLE_COLUMNS[1],
      TABLE_COLUMNS[2],
      TABLE_COLUMNS[3],
      TABLE_COLUMNS[4],
      TABLE_COLUMNS[5],
      TABLE_COLUMNS[6],
    ));

    for det in &self.detections {
      lines.push(format!(
        "{:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>11.6} {:>6}  {}",
        det.xmin, det.ymin, det.xmax, det.ymax, det.confidence, det.class_id, det.class_name,
      ));
    }

    lines.join("\n")
  }

  /// JSON 视图: 每个检测一个对象的数组
  pub fn to_json(&self) -> serde_json::Value {
    serde_json::Value::Array(
      self
        .detections
        .iter()
        .map(|det| {
          serde_json::json!({
            "xmin": det.xmin,
            "ymin": det.ymin,
            "xmax": det.xmax,
            "ymax": det.ymax,
            "confidence": det.confidence,
            "class": det.class_id,
            "name": det.class_name,
          })
        })
        .collect(),
    )
  }
}

impl Results {
  /// 向标准输出打印每张图像的摘要和表格
  pub fn print(&self) {
    let total = self.groups.len();
    for (idx, group) in self.groups.iter().enumerate() {
      println!(
        "image {}/{} {}: {}",
        idx + 1,
        total,
        group.source,
        group.summary()
      );
      if !group.detections.is_empty() {
        println!("{}", group.table());
      }
    }
  }

  /// 全部分组的 JSON 视图，按输入图像路径索引
  pub fn to_json(&self) -> serde_json::Value {
    serde_json::Value::Object(
      self
        .groups
        .iter()
        .map(|group| (group.source.clone(), group.to_json()))
        .collect(),
    )
  }

  /// 所有分组的检测总数
  pub fn total_detections(&self) -> usize {
    self.groups.iter().map(|g| g.detections.len()).sum()
  }
}
