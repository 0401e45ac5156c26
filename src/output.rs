// 该文件是 Qianli （千里眼） 项目的一部分。
// src/output.rs - 输出模块
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

mod image_output;
mod visualizer;

use anyhow::Result;
use image::RgbImage;

pub use image_output::ImageOutput;
pub use visualizer::Visualizer;

use crate::detector::Detection;

/// 输出写入器 trait
pub trait OutputWriter {
  /// 写入一帧及其检测结果
  fn write_frame(&mut self, image: &RgbImage, detections: &[Detection]) -> Result<()>;
}
