// 该文件是 Qianli （千里眼） 项目的一部分。
// src/detector.rs - 目标检测器模块
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

mod labels;
mod yolo;

pub use labels::{COCO_CLASSES, default_labels, load_label_file};
pub use yolo::{YoloDetector, YoloError};

/// 检测结果
///
/// 坐标为原始图像像素空间中的左上/右下角，满足
/// `0 <= xmin < xmax` 且 `0 <= ymin < ymax`，置信度在 [0, 1] 内。
#[derive(Clone, Debug)]
pub struct Detection {
  /// 边界框左上角 x 坐标
  pub xmin: f32,
  /// 边界框左上角 y 坐标
  pub ymin: f32,
  /// 边界框右下角 x 坐标
  pub xmax: f32,
  /// 边界框右下角 y 坐标
  pub ymax: f32,
  /// 置信度
  pub confidence: f32,
  /// 类别索引
  pub class_id: usize,
  /// 类别名称
  pub class_name: String,
}

impl Detection {
  /// 边界框宽度
  pub fn width(&self) -> f32 {
    self.xmax - self.xmin
  }

  /// 边界框高度
  pub fn height(&self) -> f32 {
    self.ymax - self.ymin
  }
}
