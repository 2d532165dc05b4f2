use std::sync::LazyLock;

use regex::Regex;

use crate::{
    Chunk, Document, SplitMode, SplitOptions, SplitReport, SplitWarning,
    ics::{build, skeleton_size},
};

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("valid regex"));
static MULTI_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("valid regex"));

/// 按选项分割文档
pub fn split(document: &Document, options: &SplitOptions) -> SplitReport {
    if document.has_no_events() {
        tracing::warn!("文档中没有事件");
        return SplitReport {
            chunks: Vec::new(),
            warnings: vec![SplitWarning::NoEvents],
        };
    }

    match options.mode {
        SplitMode::PerEvent => split_per_event(document, &options.prefix),
        SplitMode::MaxBytes(max_bytes) => split_by_size(document, &options.prefix, max_bytes),
    }
}

/// 每个事件生成一个独立文档
pub fn split_per_event(document: &Document, prefix: &str) -> SplitReport {
    let chunks = document
        .events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let index = i + 1;
            let summary_part = if event.summary.is_empty() {
                "event".to_string()
            } else {
                sanitize_filename(&event.summary)
            };
            let file_name = if prefix.is_empty() {
                format!("{index:03}_{summary_part}.ics")
            } else {
                format!("{prefix}_{index:03}_{summary_part}.ics")
            };

            let content = build(
                &document.header_lines,
                &document.timezones,
                &[event.text.as_str()],
            );

            Chunk {
                index,
                file_name,
                byte_size: content.len(),
                content,
                event_count: 1,
                oversized: false,
            }
        })
        .collect();

    SplitReport {
        chunks,
        warnings: Vec::new(),
    }
}

/// 按最大字节数贪心打包事件，保持原始顺序
///
/// 每个输出文件都包含相同的头部和时区块，其大小作为固定开销计入。
/// 单个事件加上固定开销仍超过限制时，该事件单独成块并产生警告。
pub fn split_by_size(document: &Document, prefix: &str, max_bytes: u64) -> SplitReport {
    let skeleton = skeleton_size(&document.header_lines, &document.timezones) as u64;
    let mut packer = ChunkPacker::new(document, prefix);
    let mut warnings = Vec::new();

    let mut current: Vec<&str> = Vec::new();
    let mut current_size = skeleton;

    for event in &document.events {
        let event_bytes = event.byte_size() as u64;

        if event_bytes + skeleton > max_bytes {
            if !current.is_empty() {
                packer.flush(&current, false);
                current.clear();
                current_size = skeleton;
            }

            tracing::warn!(
                "事件 '{}' ({} bytes) 单独成块仍超过 {} bytes",
                event.summary,
                event_bytes + skeleton,
                max_bytes
            );
            warnings.push(SplitWarning::OversizedEvent {
                summary: event.summary.clone(),
                size: event_bytes + skeleton,
                limit: max_bytes,
            });
            packer.flush(&[event.text.as_str()], true);
            continue;
        }

        if current_size + event_bytes > max_bytes && !current.is_empty() {
            packer.flush(&current, false);
            current.clear();
            current_size = skeleton;
        }

        current.push(&event.text);
        current_size += event_bytes;
    }

    if !current.is_empty() {
        packer.flush(&current, false);
    }

    SplitReport {
        chunks: packer.chunks,
        warnings,
    }
}

/// 按顺序生成编号的输出块
struct ChunkPacker<'a> {
    document: &'a Document,
    tag: &'a str,
    chunks: Vec<Chunk>,
}

impl<'a> ChunkPacker<'a> {
    fn new(document: &'a Document, prefix: &'a str) -> Self {
        Self {
            document,
            tag: if prefix.is_empty() { "part" } else { prefix },
            chunks: Vec::new(),
        }
    }

    fn flush(&mut self, event_texts: &[&str], oversized: bool) {
        let index = self.chunks.len() + 1;
        let content = build(
            &self.document.header_lines,
            &self.document.timezones,
            event_texts,
        );

        tracing::debug!(
            "块 {} 完成: {} 个事件, {} bytes",
            index,
            event_texts.len(),
            content.len()
        );

        self.chunks.push(Chunk {
            index,
            file_name: format!("{}_{index:03}.ics", self.tag),
            byte_size: content.len(),
            content,
            event_count: event_texts.len(),
            oversized,
        });
    }
}

/// 清理文件名中的非法字符
pub fn sanitize_filename(name: &str) -> String {
    let sanitized = UNSAFE_CHARS.replace_all(name, "").replace(' ', "_");
    let sanitized = MULTI_UNDERSCORE.replace_all(&sanitized, "_");
    let sanitized = sanitized.trim_matches('_');

    if sanitized.is_empty() {
        "untitled".to_string()
    } else {
        sanitized.to_string()
    }
}
