// 该文件是 Qianli （千里眼） 项目的一部分。
// src/main.rs - 项目主程序
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use qianli::config::Args;
use qianli::pipeline;

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  info!("模型文件路径: {}", args.model);
  info!("输入图片: {}", args.image);
  info!("输出文件: {}", args.output);
  info!("推理分辨率: {}", args.size);
  info!("置信度阈值: {}", args.confidence);
  info!("NMS 阈值: {}", args.nms_threshold);

  let results = pipeline::run(&args)?;

  // 检测摘要与表格输出到标准输出
  results.print();

  if let Some(json_path) = &args.json {
    let json = serde_json::to_string_pretty(&results.to_json())?;
    std::fs::write(json_path, json)
      .with_context(|| format!("无法写入 JSON 文件: {}", json_path))?;
    info!("检测结果已写入: {}", json_path);
  }

  info!("处理完成, 总检测数: {}", results.total_detections());

  Ok(())
}
