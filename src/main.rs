//! Status Board 程序入口
//!
//! 解析命令行参数，初始化日志系统并分发子命令

use status_board::cli::{commands, Args, Commands};
use status_board::error::Result;
use status_board::logging::{init_logging, LogConfig};
use tracing::error;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    let log_config = LogConfig {
        level: args.log_level.to_string(),
        json_format: args.json_logs,
    };
    if let Err(e) = init_logging(&log_config) {
        eprintln!("初始化日志系统失败: {e}");
        std::process::exit(1);
    }

    match run(args).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            std::process::exit(commands::exit_code_for(&e));
        }
    }
}

/// 分发子命令
///
/// # 参数
/// * `args` - 命令行参数
///
/// # 返回
/// * `Result<i32>` - 进程退出码
async fn run(args: Args) -> Result<i32> {
    match args.command.clone() {
        Commands::Serve => {
            let config = commands::load_config(args.get_config_path()?).await?;
            commands::run_serve(config).await?;
            Ok(0)
        }
        Commands::Check { project, name } => {
            let config = commands::load_config(args.get_config_path()?).await?;
            commands::run_check(config, project.as_deref(), name.as_deref()).await
        }
        Commands::Validate { config_path } => {
            let path = match config_path {
                Some(path) => path,
                None => args.get_config_path()?,
            };
            commands::run_validate(path).await?;
            Ok(0)
        }
    }
}
