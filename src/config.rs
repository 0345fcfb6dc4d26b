use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::custom_err::{config_err, CustomResult};
use crate::index::SLOT_WIDTH;

/// 哈希表大小，一个大质数，必须和建索引时一致
pub const TABLE_SIZE: u64 = 20000003;
/// 单次查询最多返回的结果数
pub const MAX_RESULTS: usize = 128;

/// 服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // 数据文件所在目录
    pub workspace: String,
    // 哈希桶文件
    pub table_file: String,
    // 索引节点文件
    pub node_file: String,
    // 歌曲目录文件
    pub catalog_file: String,
    // 客户端 -> 服务端
    pub request_fifo: String,
    // 服务端 -> 客户端
    pub response_fifo: String,
    pub table_size: u64,
    pub max_results: usize,
    // 链表最多跳转次数，防止损坏的索引形成环
    pub max_chain_hops: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            workspace: String::from("."),
            table_file: String::from("hash_index.bin"),
            node_file: String::from("index_nodes.bin"),
            catalog_file: String::from("songs.csv"),
            request_fifo: String::from("/tmp/fifo_c2s"),
            response_fifo: String::from("/tmp/fifo_s2c"),
            table_size: TABLE_SIZE,
            max_results: MAX_RESULTS,
            max_chain_hops: TABLE_SIZE,
        }
    }
}

impl Config {
    pub fn new(workspace: String) -> Config {
        Config {
            workspace,
            ..Default::default()
        }
    }

    /// 从json文件读取配置，缺失的字段使用默认值
    pub fn load(path: &Path) -> CustomResult<Config> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| config_err(format!("读取配置文件{:?}失败: {}", path, e)))?;
        let config: Config = serde_json::from_str(&text)
            .map_err(|e| config_err(format!("解析配置文件{:?}失败: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 文件存在就读取，否则使用默认配置
    pub fn load_or_default(path: &Path) -> CustomResult<Config> {
        if path.exists() {
            log::info!("加载配置文件:{:?}", path);
            Config::load(path)
        } else {
            log::info!("配置文件{:?}不存在，使用默认配置", path);
            Ok(Config::default())
        }
    }

    pub fn validate(&self) -> CustomResult<()> {
        if self.table_size == 0 {
            return Err(config_err(String::from("table_size 必须大于0")));
        }
        // 桶的字节偏移量 bucket * SLOT_WIDTH 不能溢出
        if self.table_size > u64::MAX / SLOT_WIDTH {
            return Err(config_err(format!("table_size 不能超过{}", u64::MAX / SLOT_WIDTH)));
        }
        if self.max_results == 0 {
            return Err(config_err(String::from("max_results 必须大于0")));
        }
        // 响应中的匹配数量是 i32
        if self.max_results > i32::MAX as usize {
            return Err(config_err(format!("max_results 不能超过{}", i32::MAX)));
        }
        if self.max_chain_hops == 0 {
            return Err(config_err(String::from("max_chain_hops 必须大于0")));
        }
        Ok(())
    }

    pub fn table_path(&self) -> PathBuf {
        Path::new(&self.workspace).join(&self.table_file)
    }

    pub fn node_path(&self) -> PathBuf {
        Path::new(&self.workspace).join(&self.node_file)
    }

    pub fn catalog_path(&self) -> PathBuf {
        Path::new(&self.workspace).join(&self.catalog_file)
    }
}
