use serde::{Deserialize, Serialize};

/// 顶层块类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// `VTIMEZONE`
    Timezone,
    /// `VEVENT`
    Event,
    /// 其他组件（解析时丢弃）
    Other,
}

impl BlockKind {
    /// 根据 `BEGIN:` 后的标签名确定块类型
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "VTIMEZONE" => Self::Timezone,
            "VEVENT" => Self::Event,
            _ => Self::Other,
        }
    }
}

/// 单个事件块
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// 原始块文本，从 `BEGIN:VEVENT` 到 `END:VEVENT`
    pub text: String,
    /// 第一个 `SUMMARY` 属性的值，缺失时为空
    pub summary: String,
    /// 第一个 `UID` 属性的值，缺失时为空
    pub uid: String,
    /// 第一个 `DTSTART` 属性的值（原样保留，不解析时间），缺失时为空
    pub dtstart: String,
}

impl Event {
    /// 事件在序列化文档中占用的字节数（含换行符）
    pub fn byte_size(&self) -> usize {
        self.text.len() + 1
    }
}

/// 解析后的日历文档
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// 不属于任何块的日历级属性行
    pub header_lines: Vec<String>,
    /// 原始 `VTIMEZONE` 块
    pub timezones: Vec<String>,
    /// 按文件顺序排列的事件
    pub events: Vec<Event>,
}

impl Document {
    /// 是否没有任何事件（头部和时区块不计入）
    pub fn has_no_events(&self) -> bool {
        self.events.is_empty()
    }
}

/// 分割模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// 每个事件一个文件
    #[default]
    PerEvent,
    /// 按最大字节数打包事件
    MaxBytes(u64),
}

impl SplitMode {
    /// `0` 表示不限制大小，即每个事件一个文件
    pub fn from_max_bytes(max_bytes: u64) -> Self {
        if max_bytes == 0 {
            Self::PerEvent
        } else {
            Self::MaxBytes(max_bytes)
        }
    }
}

/// 分割选项
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitOptions {
    /// 文件名前缀（可为空）
    pub prefix: String,
    /// 分割模式
    pub mode: SplitMode,
}

/// 输出文件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// 输出序号（从1开始）
    pub index: usize,
    /// 输出文件名（含 `.ics` 扩展名）
    pub file_name: String,
    /// 完整的ICS文档内容
    #[serde(skip)]
    pub content: String,
    /// 块中的事件数
    pub event_count: usize,
    /// `content` 的UTF-8字节数
    pub byte_size: usize,
    /// 单个事件本身已超过大小限制
    pub oversized: bool,
}

/// 分割过程中的非致命警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitWarning {
    /// 文档中没有事件
    NoEvents,
    /// 单个事件单独成块仍超过限制
    OversizedEvent {
        /// 事件标题
        summary: String,
        /// 该事件单独成块时的文件大小
        size: u64,
        /// 大小上限
        limit: u64,
    },
}

/// 分割结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitReport {
    /// 按输出顺序排列的文件
    pub chunks: Vec<Chunk>,
    /// 非致命警告
    pub warnings: Vec<SplitWarning>,
}

impl SplitReport {
    /// 所有输出文件中的事件总数
    pub fn total_events(&self) -> usize {
        self.chunks.iter().map(|c| c.event_count).sum()
    }

    /// 所有输出文件的总字节数
    pub fn total_bytes(&self) -> usize {
        self.chunks.iter().map(|c| c.byte_size).sum()
    }
}
