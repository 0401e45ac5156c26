// 该文件是 Qianli （千里眼） 项目的一部分。
// src/input.rs - 输入源模块
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

mod image_source;

use image::RgbImage;

pub use image_source::{ImageSource, ImageSourceError};

/// 帧数据
pub struct Frame {
  /// RGB 图像数据
  pub image: RgbImage,
  /// 帧索引
  pub index: u64,
}

/// 输入源 trait
///
/// 输入源是一个帧序列；图片输入源恰好产生一帧。
pub trait InputSource: Iterator<Item = Frame> {
  /// 获取帧宽度
  fn width(&self) -> u32;

  /// 获取帧高度
  fn height(&self) -> u32;
}
