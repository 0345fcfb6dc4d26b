use std::path::{Path, PathBuf};

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};

use song_db::config::Config;
use song_db::custom_err::CustomResult;
use song_db::server::fifo_transport::FifoTransport;
use song_db::server::RequestServer;
use song_db::store::data_manager::DataManager;

/// 可选的配置文件，位于工作目录
const CONFIG_FILE: &str = "songdb.json";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_log();

    if let Err(e) = start().await {
        log::error!("服务退出: {}", e);
        std::process::exit(1);
    }
}

async fn start() -> CustomResult<()> {
    let config = Config::load_or_default(Path::new(CONFIG_FILE))?;
    config.validate()?;
    log::info!("config={:?}", config);

    let transport = FifoTransport::create(&config)?;
    let mut server = RequestServer::new(transport, DataManager::new(config));
    server.run().await
}

fn init_log() {
    let mut config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    config_path.push("log4rs.yaml");

    match log4rs::init_file(&config_path, Default::default()) {
        Ok(_) => log::info!("日志初始化成功！"),
        Err(e) => {
            // 没有配置文件时只输出到控制台
            let stdout = ConsoleAppender::builder().build();
            let config = log4rs::Config::builder()
                .appender(Appender::builder().build("stdout", Box::new(stdout)))
                .build(Root::builder().appender("stdout").build(LevelFilter::Info));
            match config {
                Ok(config) => {
                    if let Err(init_err) = log4rs::init_config(config) {
                        eprintln!("初始化控制台日志失败: {}", init_err);
                    }
                }
                Err(build_err) => eprintln!("构建控制台日志配置失败: {}", build_err),
            }
            log::warn!("读取日志配置{:?}失败，使用控制台输出: {}", config_path, e);
        }
    }
}
