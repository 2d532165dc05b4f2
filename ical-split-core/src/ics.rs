use crate::{BlockKind, Document, Event};

const CALENDAR_BEGIN: &str = "BEGIN:VCALENDAR";
const CALENDAR_END: &str = "END:VCALENDAR";

/// 解析状态
enum ParseState<'a> {
    /// 不在任何块内
    Outside,
    /// 正在收集一个顶层块
    Inside {
        kind: BlockKind,
        depth: usize,
        lines: Vec<&'a str>,
    },
}

/// 解析iCalendar文本，拆出头部属性、时区块和事件块
pub fn parse(content: &str) -> Document {
    let mut document = Document::default();
    let mut state = ParseState::Outside;

    for line in content.lines() {
        let stripped = line.trim();

        if stripped == CALENDAR_BEGIN || stripped == CALENDAR_END {
            continue;
        }

        state = match state {
            ParseState::Outside => match stripped.strip_prefix("BEGIN:") {
                Some(tag) => ParseState::Inside {
                    kind: BlockKind::from_tag(tag),
                    depth: 1,
                    lines: vec![line],
                },
                None => {
                    if !stripped.is_empty() {
                        document.header_lines.push(line.to_string());
                    }
                    ParseState::Outside
                }
            },
            ParseState::Inside {
                kind,
                mut depth,
                mut lines,
            } => {
                lines.push(line);

                if stripped.starts_with("BEGIN:") {
                    depth += 1;
                } else if stripped.starts_with("END:") {
                    depth -= 1;
                }

                if depth == 0 {
                    finish_block(&mut document, kind, lines.join("\n"));
                    ParseState::Outside
                } else {
                    ParseState::Inside { kind, depth, lines }
                }
            }
        };
    }

    if let ParseState::Inside { kind, lines, .. } = state {
        tracing::warn!(
            "丢弃未闭合的块: {:?} ({} 行)",
            kind,
            lines.len()
        );
    }

    tracing::debug!(
        "解析完成: {} 行头部, {} 个时区, {} 个事件",
        document.header_lines.len(),
        document.timezones.len(),
        document.events.len()
    );

    document
}

/// 按块类型归档已完成的块
fn finish_block(document: &mut Document, kind: BlockKind, text: String) {
    match kind {
        BlockKind::Timezone => document.timezones.push(text),
        BlockKind::Event => {
            let summary = extract_property(&text, "SUMMARY");
            let uid = extract_property(&text, "UID");
            let dtstart = extract_property(&text, "DTSTART");
            document.events.push(Event {
                text,
                summary,
                uid,
                dtstart,
            });
        }
        BlockKind::Other => {
            tracing::debug!(
                "忽略顶层块: {}",
                text.lines().next().unwrap_or_default().trim()
            );
        }
    }
}

/// 提取块中第一个匹配属性的值
///
/// 同时匹配 `NAME:value` 和带参数的 `NAME;PARAM=x:value`。只看第一个匹配行，
/// 找不到或该行没有冒号时返回空字符串。
pub fn extract_property(block: &str, name: &str) -> String {
    block
        .lines()
        .find(|line| {
            line.strip_prefix(name)
                .is_some_and(|rest| rest.starts_with(':') || rest.starts_with(';'))
        })
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

/// 组装完整的ICS文档
pub fn build<H, T, E>(header_lines: &[H], timezones: &[T], event_texts: &[E]) -> String
where
    H: AsRef<str>,
    T: AsRef<str>,
    E: AsRef<str>,
{
    let mut ics_content = String::new();

    ics_content.push_str(CALENDAR_BEGIN);
    ics_content.push('\n');

    let body = header_lines
        .iter()
        .map(AsRef::as_ref)
        .chain(timezones.iter().map(AsRef::as_ref))
        .chain(event_texts.iter().map(AsRef::as_ref));
    for part in body {
        ics_content.push_str(part);
        ics_content.push('\n');
    }

    ics_content.push_str(CALENDAR_END);
    ics_content.push('\n');

    ics_content
}

/// 不含任何事件的文档大小（每个输出文件的固定开销）
pub fn skeleton_size<H, T>(header_lines: &[H], timezones: &[T]) -> usize
where
    H: AsRef<str>,
    T: AsRef<str>,
{
    build::<_, _, &str>(header_lines, timezones, &[]).len()
}
