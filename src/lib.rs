//! 歌曲目录查询服务
//!
//! 通过磁盘上预先建好的哈希索引，按 title(可选 artist) 查找歌曲，
//! 不需要把目录文件加载到内存。

pub mod config;
pub mod custom_err;
pub mod fifo_param;
pub mod index;
pub mod server;
pub mod store;

/// 把 key 转为小写，只处理 ASCII 字母，其它字节保持不变
pub fn normalize_key(key: &str) -> String {
    key.to_ascii_lowercase()
}

/// 计算hash: hash = hash * 33 + byte，初始值 5381，溢出时回绕
pub fn calc_hash(key: &str) -> u64 {
    key.bytes()
        .fold(5381u64, |hash, b| hash.wrapping_mul(33).wrapping_add(b as u64))
}

/// 计算所在的桶
pub fn bucket_index(normalized_key: &str, table_size: u64) -> u64 {
    calc_hash(normalized_key) % table_size
}
