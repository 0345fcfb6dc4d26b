pub mod bucket_table;
pub mod chain_walker;
#[cfg(test)]
pub mod test_builder;

use crate::fifo_param::{decode_text, truncate_text};

/// 节点中 key 的容量
pub const MAX_KEY_SIZE: usize = 128;
/// 哈希桶每个槽位的宽度
pub const SLOT_WIDTH: u64 = 8;
/// 索引节点大小: key + data_offset + next_offset
pub const NODE_SIZE: usize = MAX_KEY_SIZE + 8 + 8;
/// 空桶 / 链表结尾
pub const SENTINEL: i64 = -1;

/// 磁盘上的偏移量转为位置，负数(哨兵)表示没有
pub fn to_position(offset: i64) -> Option<u64> {
    if offset < 0 {
        None
    } else {
        Some(offset as u64)
    }
}

/// 索引节点
#[derive(Debug, Clone, PartialEq)]
pub struct IndexNode {
    // 建索引时的原始 title，未转小写
    pub key: String,
    // 在歌曲目录文件中的偏移量
    pub data_offset: i64,
    // 同一个桶中下一个节点的偏移量
    pub next_offset: i64,
}

impl IndexNode {
    pub fn decode(raw: &[u8; NODE_SIZE]) -> IndexNode {
        let key = truncate_text(&decode_text(&raw[..MAX_KEY_SIZE]), MAX_KEY_SIZE);
        let mut data_offset = [0u8; 8];
        data_offset.copy_from_slice(&raw[MAX_KEY_SIZE..MAX_KEY_SIZE + 8]);
        let mut next_offset = [0u8; 8];
        next_offset.copy_from_slice(&raw[MAX_KEY_SIZE + 8..]);
        IndexNode {
            key,
            data_offset: i64::from_le_bytes(data_offset),
            next_offset: i64::from_le_bytes(next_offset),
        }
    }

    pub fn encode(&self) -> [u8; NODE_SIZE] {
        let mut raw = [0u8; NODE_SIZE];
        let key = truncate_text(&self.key, MAX_KEY_SIZE);
        raw[..key.len()].copy_from_slice(key.as_bytes());
        raw[MAX_KEY_SIZE..MAX_KEY_SIZE + 8].copy_from_slice(&self.data_offset.to_le_bytes());
        raw[MAX_KEY_SIZE + 8..].copy_from_slice(&self.next_offset.to_le_bytes());
        raw
    }
}

#[cfg(test)]
mod tests {
    use crate::index::{to_position, IndexNode, NODE_SIZE, SENTINEL};

    #[test]
    pub fn test_node_layout() {
        let node = IndexNode {
            key: String::from("Imagine"),
            data_offset: 42,
            next_offset: SENTINEL,
        };
        let raw = node.encode();
        assert_eq!(raw.len(), NODE_SIZE);
        assert_eq!(&raw[..7], b"Imagine");
        assert_eq!(raw[7], 0);
        assert_eq!(&raw[128..136], &42i64.to_le_bytes());
        assert_eq!(&raw[136..], &(-1i64).to_le_bytes());
        assert_eq!(IndexNode::decode(&raw), node);
    }

    #[test]
    pub fn test_to_position() {
        assert_eq!(to_position(SENTINEL), None);
        assert_eq!(to_position(-7), None);
        assert_eq!(to_position(0), Some(0));
        assert_eq!(to_position(144), Some(144));
    }
}
