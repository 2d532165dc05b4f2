use std::path::{Path, PathBuf};

use tokio::{fs, task::JoinSet};

use crate::{Chunk, Document, Error, Result, SplitReport, ics};

/// 读取并解析后的输入文件
#[derive(Debug, Clone)]
pub struct LoadedInput {
    /// 解析后的文档
    pub document: Document,
    /// 输入文件的字节数
    pub byte_size: u64,
}

/// 读取ICS文件并解析
pub async fn load_document(path: impl AsRef<Path>) -> Result<LoadedInput> {
    let path = path.as_ref();
    if !fs::try_exists(path).await? {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).await?;
    tracing::info!("读取输入文件: {} ({} bytes)", path.display(), content.len());

    Ok(LoadedInput {
        byte_size: content.len() as u64,
        document: ics::parse(&content),
    })
}

/// 将所有输出块写入目录，返回按块顺序排列的文件路径
///
/// 目录不存在时会连同父目录一起创建。写入并发进行，但文件内容和编号在分割时已确定。
pub async fn write_chunks(dir: impl AsRef<Path>, chunks: &[Chunk]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).await?;

    let mut tasks = JoinSet::new();
    for chunk in chunks {
        let path = dir.join(&chunk.file_name);
        let content = chunk.content.clone();
        tasks.spawn(async move { fs::write(&path, content).await });
    }

    while let Some(result) = tasks.join_next().await {
        result.map_err(|e| Error::Task(e.to_string()))??;
    }

    tracing::debug!("已写入 {} 个文件到 {}", chunks.len(), dir.display());

    Ok(chunks
        .iter()
        .map(|chunk| dir.join(&chunk.file_name))
        .collect())
}

/// 将分割结果的元数据导出为JSON（不含文件内容）
pub async fn write_manifest(path: impl AsRef<Path>, report: &SplitReport) -> Result<()> {
    let json_content = serde_json::to_string_pretty(report)?;
    fs::write(path, json_content).await?;
    Ok(())
}
