use std::path::PathBuf;

use anyhow::{Context, Result};
use ical_split_core::prelude::*;
use serde::Serialize;

/// 分割命令参数
pub struct SplitParams {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub prefix: String,
    pub max_size: Option<String>,
    pub manifest: Option<PathBuf>,
}

/// 分割命令
pub async fn split_command(params: SplitParams) -> Result<Vec<PathBuf>> {
    let max_bytes = match params.max_size.as_deref().map(str::trim) {
        Some(size) if !size.is_empty() => parse_size(size)?,
        _ => 0,
    };

    let loaded = load_document(&params.input).await?;
    let document = &loaded.document;

    let options = SplitOptions {
        prefix: params.prefix,
        mode: SplitMode::from_max_bytes(max_bytes),
    };
    let report = split(document, &options);

    if report.warnings.contains(&SplitWarning::NoEvents) {
        eprintln!("警告: 没有找到任何事件");
        return Ok(Vec::new());
    }

    println!();
    println!("📅 开始分割iCalendar文件");
    println!(
        "   输入: {} ({}, {} 个事件)",
        params.input.display(),
        format_bytes(loaded.byte_size),
        document.events.len()
    );
    println!("   输出: {}", params.output_dir.display());
    match options.mode {
        SplitMode::MaxBytes(limit) => println!("   最大大小: {}", format_bytes(limit)),
        SplitMode::PerEvent => println!("   模式: 每个事件一个文件"),
    }
    println!();

    let paths = write_chunks(&params.output_dir, &report.chunks)
        .await
        .with_context(|| format!("写入输出目录失败: {}", params.output_dir.display()))?;

    let mut oversized = report.warnings.iter().filter_map(|warning| match warning {
        SplitWarning::OversizedEvent {
            summary,
            size,
            limit,
        } => Some((summary, *size, *limit)),
        SplitWarning::NoEvents => None,
    });

    let total = report.chunks.len();
    for chunk in &report.chunks {
        match options.mode {
            SplitMode::PerEvent => {
                println!("  [{}/{}] {}", chunk.index, total, chunk.file_name);
                let summary = &document.events[chunk.index - 1].summary;
                if !summary.is_empty() {
                    println!("        标题: {summary}");
                }
            }
            SplitMode::MaxBytes(_) => {
                if chunk.oversized {
                    if let Some((summary, size, limit)) = oversized.next() {
                        println!(
                            "  ⚠️  事件 '{}' ({}) 单独成块仍超过 {}",
                            summary,
                            format_bytes(size),
                            format_bytes(limit)
                        );
                    }
                }
                println!(
                    "  [{}] {}  ({}, {} 个事件)",
                    chunk.index,
                    chunk.file_name,
                    format_bytes(chunk.byte_size as u64),
                    chunk.event_count
                );
            }
        }
    }

    if let Some(manifest) = &params.manifest {
        write_manifest(manifest, &report)
            .await
            .with_context(|| format!("写入清单失败: {}", manifest.display()))?;
        tracing::info!("清单已写入: {}", manifest.display());
    }

    println!();
    println!(
        "✅ 完成: 已生成 {} 个文件 ({}) → {}/",
        paths.len(),
        format_bytes(report.total_bytes() as u64),
        params.output_dir.display()
    );
    println!();

    Ok(paths)
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    header_lines: &'a [String],
    timezone_count: usize,
    events: Vec<InspectEvent<'a>>,
}

#[derive(Serialize)]
struct InspectEvent<'a> {
    index: usize,
    summary: &'a str,
    uid: &'a str,
    dtstart: &'a str,
    byte_size: usize,
}

/// 汇总文档结构
fn inspect_output(document: &Document) -> InspectOutput<'_> {
    InspectOutput {
        header_lines: &document.header_lines,
        timezone_count: document.timezones.len(),
        events: document
            .events
            .iter()
            .enumerate()
            .map(|(i, event)| InspectEvent {
                index: i + 1,
                summary: &event.summary,
                uid: &event.uid,
                dtstart: &event.dtstart,
                byte_size: event.byte_size(),
            })
            .collect(),
    }
}

/// 单个事件的显示行，缺失的字段显示为 `-`
fn event_line(event: &InspectEvent<'_>) -> String {
    let placeholder = |value: &str| (if value.is_empty() { "-" } else { value }).to_string();
    format!(
        "  [{:03}] {}  {}  {}",
        event.index,
        placeholder(event.dtstart),
        placeholder(event.uid),
        event.summary
    )
}

/// 查看文件结构命令
pub async fn inspect_command(input: PathBuf, json: bool) -> Result<()> {
    let loaded = load_document(&input).await?;
    let output = inspect_output(&loaded.document);

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("文件: {} ({})", input.display(), format_bytes(loaded.byte_size));
    println!("头部属性: {} 行", output.header_lines.len());
    for line in output.header_lines {
        println!("  {line}");
    }
    println!("时区: {} 个", output.timezone_count);
    println!("事件: {} 个", output.events.len());
    for event in &output.events {
        println!("{}", event_line(event));
    }

    Ok(())
}
