use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

use crate::custom_err::{index_unavailable, CustomResult};
use crate::index::{to_position, IndexNode, NODE_SIZE};

/// 沿着同一个桶的单链表逐个读取节点
///
/// 读取失败时直接结束，已经返回的节点仍然有效；
/// 跳转次数超过 max_hops 也会结束，避免损坏的索引形成环导致死循环。
pub struct ChainWalker {
    file: File,
    // 下一个要读取的节点
    next: Option<u64>,
    hops: u64,
    max_hops: u64,
}

pub async fn open_node_file(path: &Path) -> CustomResult<File> {
    File::open(path)
        .await
        .map_err(|e| index_unavailable(format!("打开索引节点文件{:?}失败: {}", path, e)))
}

impl ChainWalker {
    pub fn new(file: File, head: Option<u64>, max_hops: u64) -> ChainWalker {
        ChainWalker {
            file,
            next: head,
            hops: 0,
            max_hops,
        }
    }

    /// 已经读取的节点数
    pub fn hops(&self) -> u64 {
        self.hops
    }

    pub async fn next_node(&mut self) -> Option<IndexNode> {
        let offset = self.next.take()?;
        if self.hops >= self.max_hops {
            log::warn!("链表跳转次数超过{}，索引可能存在环，停止遍历", self.max_hops);
            return None;
        }

        let node = match self.read_node(offset).await {
            Ok(node) => node,
            Err(e) => {
                log::warn!("读取索引节点失败，offset={}: {}", offset, e);
                return None;
            }
        };
        self.hops += 1;
        self.next = to_position(node.next_offset);
        Some(node)
    }

    async fn read_node(&mut self, offset: u64) -> std::io::Result<IndexNode> {
        self.file.seek(SeekFrom::Start(offset)).await?;
        let mut raw = [0u8; NODE_SIZE];
        self.file.read_exact(&mut raw).await?;
        Ok(IndexNode::decode(&raw))
    }
}
