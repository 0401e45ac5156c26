// 该文件是 Qianli （千里眼） 项目的一部分。
// src/pipeline.rs - 单次推理流水线
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

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Args;
use crate::detector::{YoloDetector, default_labels, load_label_file};
use crate::input::{ImageSource, InputSource};
use crate::output::{ImageOutput, OutputWriter};
use crate::report::{DetectionGroup, Results};

/// 执行一次完整的检测流水线
///
/// 顺序固定: 加载模型 -> 解码图片 -> 推理 -> 绘制标注。
/// 任何一步失败都向上传播并终止进程，不做重试。
pub fn run(args: &Args) -> Result<Results> {
  // 标签表
  let labels = match &args.labels {
    Some(path) => {
      load_label_file(path).with_context(|| format!("无法读取标签文件: {}", path))?
    }
    None => default_labels(),
  };

  // 加载模型（在任何图片解码之前失败）
  let mut detector = YoloDetector::new(
    &args.model,
    args.size,
    args.confidence,
    args.nms_threshold,
    labels,
  )?;

  // 打开输入源（在任何推理之前失败）
  let source = ImageSource::new(&args.image)?;
  let (width, height) = (source.width(), source.height());
  info!("输入图片: {} ({}x{})", args.image, width, height);

  // 推理并绘制标注
  let mut output = ImageOutput::new(&args.output);
  let mut groups = Vec::new();

  for frame in source {
    let now = std::time::Instant::now();
    let detections = detector.detect(&frame.image)?;
    info!(
      "推理完成，耗时: {:.2?}, 检测到 {} 个对象",
      now.elapsed(),
      detections.len()
    );

    output.write_frame(&frame.image, &detections)?;

    groups.push(DetectionGroup {
      source: args.image.clone(),
      width,
      height,
      detections,
    });
  }

  Ok(Results { groups })
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::Parser;

  fn args(model: &str, image: &str) -> Args {
    Args::try_parse_from(["qianli", "--model", model, "--image", image]).unwrap()
  }

  #[test]
  fn missing_model_fails_before_image_decode() {
    // 图片文件存在但模型缺失: 错误必须来自模型加载
    let image_path = std::env::temp_dir().join("qianli_test_pipeline.png");
    image::RgbImage::from_pixel(4, 4, image::Rgb([0, 0, 0]))
      .save(&image_path)
      .unwrap();

    let err = run(&args(
      "/nonexistent/qianli/model.onnx",
      image_path.to_str().unwrap(),
    ))
    .unwrap_err();
    std::fs::remove_file(&image_path).ok();

    assert!(
      matches!(
        err.downcast_ref::<crate::detector::YoloError>(),
        Some(crate::detector::YoloError::ModelNotFound(_))
      ),
      "unexpected error: {err:?}"
    );
  }

  #[test]
  fn missing_label_file_fails_first() {
    let mut args = args("/nonexistent/qianli/model.onnx", "photo.jpg");
    args.labels = Some("/nonexistent/qianli/labels.txt".to_string());
    let err = run(&args).unwrap_err();
    assert!(format!("{err:#}").contains("标签文件"));
  }
}
