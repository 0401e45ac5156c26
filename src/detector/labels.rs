// 该文件是 Qianli （千里眼） 项目的一部分。
// src/detector/labels.rs - 类别标签
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::io;
use std::path::Path;

/// COCO 数据集类别名称
pub const COCO_CLASSES: [&str; 80] = [
  "person",
  "bicycle",
  "car",
  "motorcycle",
  "airplane",
  "bus",
  "train",
  "truck",
  "boat",
  "traffic light",
  "fire hydrant",
  "stop sign",
  "parking meter",
  "bench",
  "bird",
  "cat",
  "dog",
  "horse",
  "sheep",
  "cow",
  "elephant",
  "bear",
  "zebra",
  "giraffe",
  "backpack",
  "umbrella",
  "handbag",
  "tie",
  "suitcase",
  "frisbee",
  "skis",
  "snowboard",
  "sports ball",
  "kite",
  "baseball bat",
  "baseball glove",
  "skateboard",
  "surfboard",
  "tennis racket",
  "bottle",
  "wine glass",
  "cup",
  "fork",
  "knife",
  "spoon",
  "bowl",
  "banana",
  "apple",
  "sandwich",
  "orange",
  "broccoli",
  "carrot",
  "hot dog",
  "pizza",
  "donut",
  "cake",
  "chair",
  "couch",
  "potted plant",
  "bed",
  "dining table",
  "toilet",
  "tv",
  "laptop",
  "mouse",
  "remote",
  "keyboard",
  "cell phone",
  "microwave",
  "oven",
  "toaster",
  "sink",
  "refrigerator",
  "book",
  "clock",
  "vase",
  "scissors",
  "teddy bear",
  "hair drier",
  "toothbrush",
];

/// 内置 COCO 标签表
pub fn default_labels() -> Vec<String> {
  COCO_CLASSES.iter().map(|s| s.to_string()).collect()
}

/// 从文本文件载入标签表（每行一个类别名称，忽略空行）
pub fn load_label_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
  let content = std::fs::read_to_string(path)?;
  Ok(
    content
      .lines()
      .map(str::trim)
      .filter(|line| !line.is_empty())
      .map(str::to_string)
      .collect(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn coco_labels_have_80_classes() {
    let labels = default_labels();
    assert_eq!(labels.len(), 80);
    assert_eq!(labels[0], "person");
    assert_eq!(labels[27], "tie");
    assert_eq!(labels[79], "toothbrush");
  }

  #[test]
  fn load_label_file_skips_blank_lines() {
    let path = std::env::temp_dir().join("qianli_test_labels.txt");
    std::fs::write(&path, "person\n\ncat\n dog \n").unwrap();
    let labels = load_label_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(labels, vec!["person", "cat", "dog"]);
  }

  #[test]
  fn load_label_file_missing_path_fails() {
    assert!(load_label_file("/nonexistent/qianli/labels.txt").is_err());
  }
}
