// 该文件是 Qianli （千里眼） 项目的一部分。
// src/input/image_source.rs - 图片输入源
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use image::{ImageReader, RgbImage};
use thiserror::Error;
use tracing::debug;

use super::{Frame, InputSource};

#[derive(Error, Debug)]
pub enum ImageSourceError {
  #[error("无法打开图片文件 {0}: {1}")]
  IoError(String, std::io::Error),
  #[error("无法解码图片文件 {0}: {1}")]
  DecodeError(String, image::ImageError),
}

/// 图片输入源
///
/// 在构造时完成解码，图片缺失或格式不可识别在任何推理发生之前即报错。
/// 作为帧序列恰好产生一帧。
#[derive(Debug)]
pub struct ImageSource {
  /// 图片数据
  image: Option<RgbImage>,
  /// 图片宽度
  width: u32,
  /// 图片高度
  height: u32,
}

impl ImageSource {
  /// 创建一个新的图片输入源
  pub fn new(path: &str) -> Result<Self, ImageSourceError> {
    let img = ImageReader::open(path)
      .map_err(|e| ImageSourceError::IoError(path.to_string(), e))?
      .decode()
      .map_err(|e| ImageSourceError::DecodeError(path.to_string(), e))?
      .to_rgb8();

    let width = img.width();
    let height = img.height();
    debug!("图片解码完成: {} ({}x{})", path, width, height);

    Ok(Self {
      image: Some(img),
      width,
      height,
    })
  }
}

impl Iterator for ImageSource {
  type Item = Frame;

  fn next(&mut self) -> Option<Self::Item> {
    self.image.take().map(|image| Frame { image, index: 0 })
  }
}

impl InputSource for ImageSource {
  fn width(&self) -> u32 {
    self.width
  }

  fn height(&self) -> u32 {
    self.height
  }
}
