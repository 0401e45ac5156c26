// 该文件是 Qianli （千里眼） 项目的一部分。
// src/config.rs - 项目参数配置
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use clap::Parser;

/// Qianli 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// ONNX 模型文件路径
  #[arg(long, value_name = "FILE")]
  pub model: String,

  /// 输入图片文件路径
  /// 支持格式: *.jpg, *.jpeg, *.png, *.bmp, *.gif, *.webp
  #[arg(long, value_name = "IMAGE")]
  pub image: String,

  /// 标注结果图片输出路径
  #[arg(long, default_value = "output.jpg", value_name = "OUTPUT")]
  pub output: String,

  /// 推理分辨率（单个整数，宽高同值）
  #[arg(long, default_value = "640", value_name = "SIZE")]
  pub size: u32,

  /// 置信度阈值 (0.0 - 1.0)
  #[arg(long, default_value = "0.25", value_name = "THRESHOLD")]
  pub confidence: f32,

  /// NMS IOU 阈值 (0.0 - 1.0)
  #[arg(long, default_value = "0.45", value_name = "THRESHOLD")]
  pub nms_threshold: f32,

  /// 类别标签文件（每行一个类别名称，缺省使用内置 COCO 标签）
  #[arg(long, value_name = "FILE")]
  pub labels: Option<String>,

  /// 检测结果 JSON 输出路径（可选）
  #[arg(long, value_name = "FILE")]
  pub json: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_minimal_args() {
    let args =
      Args::try_parse_from(["qianli", "--model", "yolov5n.onnx", "--image", "bus.jpg"]).unwrap();
    assert_eq!(args.model, "yolov5n.onnx");
    assert_eq!(args.image, "bus.jpg");
    assert_eq!(args.output, "output.jpg");
    assert_eq!(args.size, 640);
    assert_eq!(args.confidence, 0.25);
    assert_eq!(args.nms_threshold, 0.45);
    assert!(args.labels.is_none());
    assert!(args.json.is_none());
  }

  #[test]
  fn parse_requires_model_and_image() {
    assert!(Args::try_parse_from(["qianli", "--image", "bus.jpg"]).is_err());
    assert!(Args::try_parse_from(["qianli", "--model", "yolov5n.onnx"]).is_err());
  }

  #[test]
  fn parse_full_args() {
    let args = Args::try_parse_from([
      "qianli",
      "--model",
      "yolov5n.onnx",
      "--image",
      "bus.jpg",
      "--output",
      "annotated.png",
      "--size",
      "320",
      "--confidence",
      "0.5",
      "--nms-threshold",
      "0.6",
      "--labels",
      "coco.txt",
      "--json",
      "result.json",
    ])
    .unwrap();
    assert_eq!(args.size, 320);
    assert_eq!(args.confidence, 0.5);
    assert_eq!(args.nms_threshold, 0.6);
    assert_eq!(args.labels.as_deref(), Some("coco.txt"));
    assert_eq!(args.json.as_deref(), Some("result.json"));
  }
}
