// 该文件是 Qianli （千里眼） 项目的一部分。
// src/detector/yolo.rs - YOLO 目标检测器
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::Path;

use image::RgbImage;
use ndarray::Array4;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::TensorRef;
use thiserror::Error;
use tracing::{debug, info};

use super::Detection;

/// Letterbox 填充灰度值
const PAD_VALUE: f32 = 114.0 / 255.0;

#[derive(Error, Debug)]
pub enum YoloError {
  #[error("模型文件不存在: {0}")]
  ModelNotFound(String),
  #[error("ONNX Runtime 错误: {0}")]
  OrtError(#[from] ort::Error),
  #[error("模型输出缺失: {0}")]
  MissingOutput(String),
  #[error("无法识别的模型输出形状: {0:?}")]
  UnexpectedShape(Vec<usize>),
}

/// Letterbox 预处理几何参数
///
/// 输入图像等比缩放 `scale` 后，左右/上下各填充 `pad_x`/`pad_y` 像素，
/// 得到 `size x size` 的推理输入。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
  pub scale: f32,
  pub pad_x: f32,
  pub pad_y: f32,
}

/// 计算 letterbox 缩放和填充参数
pub fn letterbox_params(width: u32, height: u32, size: u32) -> Letterbox {
  let scale = (size as f32 / width as f32).min(size as f32 / height as f32);
  let new_w = (width as f32 * scale).round();
  let new_h = (height as f32 * scale).round();
  Letterbox {
    scale,
    pad_x: (size as f32 - new_w) / 2.0,
    pad_y: (size as f32 - new_h) / 2.0,
  }
}

/// YOLO 目标检测器
///
/// 绑定一个 ONNX Runtime 推理会话、推理分辨率、阈值和标签表，
/// 构造后不再改变。
#[derive(Debug)]
pub struct YoloDetector {
  /// ONNX 推理会话
  session: Session,
  /// 输入张量名称
  input_name: String,
  /// 输出张量名称
  output_name: String,
  /// 推理分辨率（宽高同值）
  input_size: u32,
  /// 置信度阈值
  confidence_threshold: f32,
  /// NMS IOU 阈值
  nms_threshold: f32,
  /// 类别标签表
  labels: Vec<String>,
}

impl YoloDetector {
  /// 创建一个新的 YOLO 检测器
  ///
  /// 模型文件缺失在创建会话之前即报错，属于配置错误，不做重试。
  pub fn new(
    model_path: &str,
    input_size: u32,
    confidence_threshold: f32,
    nms_threshold: f32,
    labels: Vec<String>,
  ) -> Result<Self, YoloError> {
    if !Path::new(model_path).exists() {
      return Err(YoloError::ModelNotFound(model_path.to_string()));
    }

    info!("加载模型文件: {}", model_path);
    let session = Session::builder()?
      .with_optimization_level(GraphOptimizationLevel::Level3)?
      .commit_from_file(model_path)?;

    let input_name = session
      .inputs
      .first()
      .map(|i| i.name.clone())
      .unwrap_or_else(|| "images".to_string());
    let output_name = session
      .outputs
      .first()
      .map(|o| o.name.clone())
      .ok_or_else(|| YoloError::MissingOutput("(第一个输出)".to_string()))?;

    debug!("模型输入: {}, 输出: {}", input_name, output_name);
    info!("模型加载完成");

    Ok(Self {
      session,
      input_name,
      output_name,
      input_size,
      confidence_threshold,
      nms_threshold,
      labels,
    })
  }

  /// 类别标签表
  pub fn labels(&self) -> &[String] {
    &self.labels
  }

  /// 预处理图像: letterbox 缩放到推理分辨率，归一化为 NCHW float32
  fn preprocess(&self, image: &RgbImage) -> (Array4<f32>, Letterbox) {
    let lb = letterbox_params(image.width(), image.height(), self.input_size);
    let new_w = ((image.width() as f32 * lb.scale).round() as u32).max(1);
    let new_h = ((image.height() as f32 * lb.scale).round() as u32).max(1);

    let resized =
      image::imageops::resize(image, new_w, new_h, image::imageops::FilterType::Triangle);

    let size = self.input_size as usize;
    let mut tensor = Array4::<f32>::from_elem((1, 3, size, size), PAD_VALUE);

    let offset_x = lb.pad_x as usize;
    let offset_y = lb.pad_y as usize;
    for (x, y, pixel) in resized.enumerate_pixels() {
      let tx = x as usize + offset_x;
      let ty = y as usize + offset_y;
      if tx < size && ty < size {
        for c in 0..3 {
          tensor[[0, c, ty, tx]] = pixel[c] as f32 / 255.0;
        }
      }
    }

    (tensor, lb)
  }

  /// 运行推理
  ///
  /// 检测器内部完成缩放与归一化，返回原始图像像素空间中的检测结果。
  pub fn detect(&mut self, image: &RgbImage) -> Result<Vec<Detection>, YoloError> {
    let original_width = image.width() as f32;
    let original_height = image.height() as f32;

    debug!("预处理图像: {}x{}", image.width(), image.height());
    let (tensor, lb) = self.preprocess(image);

    debug!("执行模型推理");
    let input = tensor.as_standard_layout();
    let input_tensor = TensorRef::from_array_view(&input)?;
    let outputs = self
      .session
      .run(ort::inputs![&self.input_name => input_tensor])?;

    let output = outputs
      .get(self.output_name.as_str())
      .ok_or_else(|| YoloError::MissingOutput(self.output_name.clone()))?;
    let (shape, data) = output.try_extract_tensor::<f32>()?;
    let shape: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
    debug!("模型输出形状: {:?}", shape);

    let detections = decode_outputs(
      data,
      &shape,
      &self.labels,
      self.confidence_threshold,
      lb,
      original_width,
      original_height,
    )?;

    let detections = nms(detections, self.nms_threshold);
    debug!("检测到 {} 个物体", detections.len());

    Ok(detections)
  }
}

/// 解码模型输出为检测结果
///
/// 支持两种常见的 YOLO ONNX 输出布局:
/// - `[1, rows, 5+nc]`: v5 风格，每行为 cx cy w h objectness + 类别分数
/// - `[1, 4+nc, cols]`: v8 风格，无 objectness，按属性排列
///
/// 边界框由 letterbox 空间映射回原始图像空间并裁剪到图像边界，
/// 裁剪后退化的框被丢弃。
pub fn decode_outputs(
  data: &[f32],
  shape: &[usize],
  labels: &[String],
  confidence_threshold: f32,
  lb: Letterbox,
  original_width: f32,
  original_height: f32,
) -> Result<Vec<Detection>, YoloError> {
  let [batch, a, b] = shape else {
    return Err(YoloError::UnexpectedShape(shape.to_vec()));
  };
  if *batch != 1 || *a < 5 || *b < 5 || data.len() != a * b {
    return Err(YoloError::UnexpectedShape(shape.to_vec()));
  }

  let mut detections = Vec::new();

  if b < a {
    // v5 布局: [1, rows, 5+nc]
    let (rows, attrs) = (*a, *b);
    let num_classes = attrs - 5;
    for row in 0..rows {
      let cell = &data[row * attrs..(row + 1) * attrs];
      let objectness = cell[4];
      if objectness < confidence_threshold {
        continue;
      }

      let mut best_score = 0.0f32;
      let mut best_class = 0usize;
      for class_id in 0..num_classes {
        let score = cell[5 + class_id];
        if score > best_score {
          best_score = score;
          best_class = class_id;
        }
      }

      let confidence = (objectness * best_score).clamp(0.0, 1.0);
      if confidence < confidence_threshold {
        continue;
      }

      push_detection(
        &mut detections,
        [cell[0], cell[1], cell[2], cell[3]],
        confidence,
        best_class,
        labels,
        lb,
        original_width,
        original_height,
      );
    }
  } else {
    // v8 布局: [1, 4+nc, cols]
    let (attrs, cols) = (*a, *b);
    let num_classes = attrs - 4;
    for col in 0..cols {
      let mut best_score = 0.0f32;
      let mut best_class = 0usize;
      for class_id in 0..num_classes {
        let score = data[(4 + class_id) * cols + col];
        if score > best_score {
          best_score = score;
          best_class = class_id;
        }
      }

      let confidence = best_score.clamp(0.0, 1.0);
      if confidence < confidence_threshold {
        continue;
      }

      push_detection(
        &mut detections,
        [
          data[col],
          data[cols + col],
          data[2 * cols + col],
          data[3 * cols + col],
        ],
        confidence,
        best_class,
        labels,
        lb,
        original_width,
        original_height,
      );
    }
  }

  Ok(detections)
}

/// 将 letterbox 空间中的中心点框转换到原始图像空间并收集
#[allow(clippy::too_many_arguments)]
fn push_detection(
  detections: &mut Vec<Detection>,
  cxcywh: [f32; 4],
  confidence: f32,
  class_id: usize,
  labels: &[String],
  lb: Letterbox,
  original_width: f32,
  original_height: f32,
) {
  let [cx, cy, w, h] = cxcywh;

  let xmin = ((cx - w / 2.0 - lb.pad_x) / lb.scale).clamp(0.0, original_width);
  let ymin = ((cy - h / 2.0 - lb.pad_y) / lb.scale).clamp(0.0, original_height);
  let xmax = ((cx + w / 2.0 - lb.pad_x) / lb.scale).clamp(0.0, original_width);
  let ymax = ((cy + h / 2.0 - lb.pad_y) / lb.scale).clamp(0.0, original_height);

  // 裁剪后退化的框直接丢弃
  if xmin >= xmax || ymin >= ymax {
    return;
  }

  detections.push(Detection {
    xmin,
    ymin,
    xmax,
    ymax,
    confidence,
    class_id,
    class_name: labels
      .get(class_id)
      .map(String::as_str)
      .unwrap_or("unknown")
      .to_string(),
  });
}

/// 非极大值抑制（按类别）
pub fn nms(mut detections: Vec<Detection>, nms_threshold: f32) -> Vec<Detection> {
  detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

  let mut result = Vec::new();

  while !detections.is_empty() {
    let best = detections.remove(0);

    detections.retain(|det| {
      if det.class_id != best.class_id {
        return true;
      }
      iou(&best, det) < nms_threshold
    });

    result.push(best);
  }

  result
}

/// 计算两个边界框的 IoU
pub fn iou(a: &Detection, b: &Detection) -> f32 {
  let x1 = a.xmin.max(b.xmin);
  let y1 = a.ymin.max(b.ymin);
  let x2 = a.xmax.min(b.xmax);
  let y2 = a.ymax.min(b.ymax);

  let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
  let area_a = a.width() * a.height();
  let area_b = b.width() * b.height();
  let union = area_a + area_b - intersection;

  if union > 0.0 { intersection / union } else { 0.0 }
}
