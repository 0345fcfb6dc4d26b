use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

use crate::bucket_index;
use crate::custom_err::{index_unavailable, CustomResult};
use crate::index::{to_position, SLOT_WIDTH};

/// 定长哈希桶文件，每个槽位存放对应链表头节点的偏移量
pub struct BucketTable {
    file: File,
    table_size: u64,
}

impl BucketTable {
    pub async fn open(path: &Path, table_size: u64) -> CustomResult<BucketTable> {
        let file = File::open(path)
            .await
            .map_err(|e| index_unavailable(format!("打开哈希表文件{:?}失败: {}", path, e)))?;
        Ok(BucketTable { file, table_size })
    }

    /// 根据转小写后的 title 找到链表头
    /// 空桶返回 None，文件被截断或读取失败返回 IndexUnavailable
    pub async fn locate_chain_head(&mut self, normalized_title: &str) -> CustomResult<Option<u64>> {
        let bucket = bucket_index(normalized_title, self.table_size);
        let slot_offset = bucket * SLOT_WIDTH;

        self.file
            .seek(SeekFrom::Start(slot_offset))
            .await
            .map_err(|e| index_unavailable(format!("定位哈希桶{}失败: {}", bucket, e)))?;
        let head = self
            .file
            .read_i64_le()
            .await
            .map_err(|e| index_unavailable(format!("读取哈希桶{}失败: {}", bucket, e)))?;

        log::debug!("title={:?} bucket={} head={}", normalized_title, bucket, head);
        Ok(to_position(head))
    }
}
