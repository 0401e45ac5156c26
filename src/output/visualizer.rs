// 该文件是 Qianli （千里眼） 项目的一部分。
// src/output/visualizer.rs - 可视化模块
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::warn;

use crate::detector::Detection;

/// 常见系统字体位置，按顺序尝试
const FONT_CANDIDATES: [&str; 5] = [
  "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
  "/usr/share/fonts/dejavu/DejaVuSans.ttf",
  "/usr/share/fonts/TTF/DejaVuSans.ttf",
  "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
  "/System/Library/Fonts/Supplemental/Arial.ttf",
];

/// 可视化工具
pub struct Visualizer {
  /// 字体（系统中找不到字体时只画边框不画文字）
  font: Option<FontArc>,
  /// 字体大小
  font_scale: PxScale,
  /// 边界框颜色映射
  colors: Vec<Rgb<u8>>,
}

impl Default for Visualizer {
  fn default() -> Self {
    Self::new()
  }
}

impl Visualizer {
  /// 创建一个新的可视化工具
  pub fn new() -> Self {
    let font = Self::load_system_font();
    if font.is_none() {
      warn!("未找到可用字体，标注结果将不含文字标签");
    }

    // 生成 80 种不同的颜色（对应 COCO 数据集的 80 个类别）
    let colors: Vec<Rgb<u8>> = (0..80)
      .map(|i| {
        let hue = (i as f32 / 80.0) * 360.0;
        Self::hsv_to_rgb(hue, 0.8, 0.9)
      })
      .collect();

    Self {
      font,
      font_scale: PxScale::from(16.0),
      colors,
    }
  }

  /// 按候选路径加载系统字体
  fn load_system_font() -> Option<FontArc> {
    for path in FONT_CANDIDATES {
      if let Ok(data) = std::fs::read(path)
        && let Ok(font) = FontArc::try_from_vec(data)
      {
        return Some(font);
      }
    }
    None
  }

  /// HSV 转 RGB
  fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb<u8> {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
      (c, x, 0.0)
    } else if h < 120.0 {
      (x, c, 0.0)
    } else if h < 180.0 {
      (0.0, c, x)
    } else if h < 240.0 {
      (0.0, x, c)
    } else if h < 300.0 {
      (x, 0.0, c)
    } else {
      (c, 0.0, x)
    };

    Rgb([
      ((r + m) * 255.0) as u8,
      ((g + m) * 255.0) as u8,
      ((b + m) * 255.0) as u8,
    ])
  }

  /// 在图像上绘制检测结果
  pub fn draw_detections(&self, image: &mut RgbImage, detections: &[Detection]) {
    for detection in detections {
      let color = self.colors[detection.class_id % self.colors.len()];

      // 绘制边界框
      let x = detection.xmin.max(0.0) as i32;
      let y = detection.ymin.max(0.0) as i32;
      let width = detection.width().min(image.width() as f32 - detection.xmin) as u32;
      let height = detection.height().min(image.height() as f32 - detection.ymin) as u32;

      if width > 0 && height > 0 {
        let rect = Rect::at(x, y).of_size(width, height);
        draw_hollow_rect_mut(image, rect, color);

        // 绘制第二个边框以增加可见度
        if x > 0 && y > 0 && width > 2 && height > 2 {
          let inner_rect =
            Rect::at(x + 1, y + 1).of_size(width.saturating_sub(2), height.saturating_sub(2));
          draw_hollow_rect_mut(image, inner_rect, color);
        }
      }

      // 绘制标签
      if let Some(font) = &self.font {
        let label = format!("{}: {:.2}", detection.class_name, detection.confidence);
        let text_y = (y - 20).max(0);
        draw_text_mut(image, color, x, text_y, self.font_scale, font, &label);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_detection() -> Detection {
    Detection {
      xmin: 4.0,
      ymin: 4.0,
      xmax: 24.0,
      ymax: 24.0,
      confidence: 0.9,
      class_id: 0,
      class_name: "person".to_string(),
    }
  }

  #[test]
  fn draw_detections_marks_box_edges() {
    let visualizer = Visualizer::new();
    let mut image = RgbImage::from_pixel(32, 32, Rgb([0, 0, 0]));
    visualizer.draw_detections(&mut image, &[sample_detection()]);

    // 边框左上角像素被着色
    assert_ne!(*image.get_pixel(4, 4), Rgb([0, 0, 0]));
    // 框外围不受影响
    assert_eq!(*image.get_pixel(30, 30), Rgb([0, 0, 0]));
  }

  #[test]
  fn draw_detections_handles_empty_result() {
    let visualizer = Visualizer::new();
    let mut image = RgbImage::from_pixel(8, 8, Rgb([7, 7, 7]));
    visualizer.draw_detections(&mut image, &[]);
    assert_eq!(*image.get_pixel(0, 0), Rgb([7, 7, 7]));
  }

  #[test]
  fn class_colors_are_distinct_for_adjacent_ids() {
    let visualizer = Visualizer::new();
    assert_ne!(visualizer.colors[0], visualizer.colors[1]);
    assert_eq!(visualizer.colors.len(), 80);
  }
}
