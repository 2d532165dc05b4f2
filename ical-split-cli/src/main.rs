mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ical-split")]
#[command(about = "iCalendar (.ics) 文件分割工具")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 启用详细日志
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 将ICS文件按事件或按大小分割
    Split {
        /// 输入ICS文件路径
        input: PathBuf,

        /// 输出目录
        #[arg(short, long, default_value = "./split_output")]
        output_dir: PathBuf,

        /// 输出文件名前缀
        #[arg(short, long, default_value = "")]
        prefix: String,

        /// 每个文件的最大大小（如 1M、512K、2MB），未指定时每个事件一个文件
        #[arg(short = 's', long)]
        max_size: Option<String>,

        /// 将分割结果的元数据导出为JSON文件
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// 查看ICS文件的结构
    Inspect {
        /// 输入ICS文件路径
        input: PathBuf,

        /// 以JSON格式输出
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 设置日志级别
    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("ical_split_cli={log_level},ical_split_core={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Split {
            input,
            output_dir,
            prefix,
            max_size,
            manifest,
        } => {
            commands::split_command(commands::SplitParams {
                input,
                output_dir,
                prefix,
                max_size,
                manifest,
            })
            .await?;
            Ok(())
        }

        Commands::Inspect { input, json } => commands::inspect_command(input, json).await,
    }
}
