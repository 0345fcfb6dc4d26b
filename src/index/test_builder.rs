//! 测试用的建索引工具，生成和离线索引程序相同格式的文件

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use crate::config::Config;
use crate::index::{IndexNode, NODE_SIZE, SENTINEL, SLOT_WIDTH};
use crate::{bucket_index, normalize_key};

/// 在 dir 下写出目录文件、哈希表和节点文件，返回指向它们的配置
pub fn build_workspace(dir: &Path, lines: &[&str], table_size: u64) -> Config {
    let mut config = Config::new(dir.to_string_lossy().into_owned());
    config.table_size = table_size;
    config.max_chain_hops = table_size;

    let mut catalog = Vec::new();
    let mut table = vec![SENTINEL; table_size as usize];
    let mut nodes = Vec::new();

    for line in lines {
        let data_offset = catalog.len() as i64;
        catalog.extend_from_slice(line.as_bytes());
        catalog.push(b'\n');

        let key = line.split(',').next().unwrap_or("").to_string();
        let bucket = bucket_index(&normalize_key(&key), table_size) as usize;
        let node_offset = (nodes.len() * NODE_SIZE) as i64;
        // 插在链表头部
        let node = IndexNode {
            key,
            data_offset,
            next_offset: table[bucket],
        };
        table[bucket] = node_offset;
        nodes.push(node);
    }

    std::fs::write(config.catalog_path(), &catalog).unwrap();

    let mut table_bytes = Vec::with_capacity(table.len() * SLOT_WIDTH as usize);
    for head in table {
        table_bytes.extend_from_slice(&head.to_le_bytes());
    }
    std::fs::write(config.table_path(), &table_bytes).unwrap();

    let mut node_bytes = Vec::with_capacity(nodes.len() * NODE_SIZE);
    for node in &nodes {
        node_bytes.extend_from_slice(&node.encode());
    }
    std::fs::write(config.node_path(), &node_bytes).unwrap();

    config
}

/// 修改某个节点的 next_offset，用于构造损坏的链表
pub fn set_next_offset(node_path: &Path, node_offset: u64, next: i64) {
    let mut file = OpenOptions::new().write(true).open(node_path).unwrap();
    file.seek(SeekFrom::Start(node_offset + NODE_SIZE as u64 - 8)).unwrap();
    file.write_all(&next.to_le_bytes()).unwrap();
}

/// 修改某个节点的 data_offset
pub fn set_data_offset(node_path: &Path, node_offset: u64, data_offset: i64) {
    let mut file = OpenOptions::new().write(true).open(node_path).unwrap();
    file.seek(SeekFrom::Start(node_offset + NODE_SIZE as u64 - 16)).unwrap();
    file.write_all(&data_offset.to_le_bytes()).unwrap();
}
