use std::sync::Arc;

use crate::config::Config;
use crate::custom_err::CustomResult;
use crate::fifo_param::SearchCriteria;
use crate::index::bucket_table::BucketTable;
use crate::index::chain_walker::{open_node_file, ChainWalker};
use crate::store::catalog_reader::CatalogReader;
use crate::store::match_filter::MatchFilter;
use crate::store::Song;

#[derive(Clone)]
pub struct DataManager {
    config: Arc<Config>,
}

impl DataManager {
    pub fn new(config: Config) -> DataManager {
        DataManager {
            config: Arc::new(config),
        }
    }

    /// 执行一次查询
    /// 索引或目录文件出错只会让结果变少(或为空)，不会返回错误
    pub async fn find(&self, criteria: &SearchCriteria) -> Vec<Song> {
        match self.search(criteria).await {
            Ok(songs) => songs,
            Err(e) => {
                log::warn!("查询失败，返回空结果: {}", e);
                Vec::new()
            }
        }
    }

    /// 三个文件在每次查询时打开，函数返回时全部关闭
    async fn search(&self, criteria: &SearchCriteria) -> CustomResult<Vec<Song>> {
        let mut filter = MatchFilter::new(criteria, self.config.max_results);

        let mut table = BucketTable::open(&self.config.table_path(), self.config.table_size).await?;
        let node_file = open_node_file(&self.config.node_path()).await?;
        let mut catalog = CatalogReader::open(&self.config.catalog_path()).await?;

        let head = table.locate_chain_head(filter.title()).await?;
        let mut walker = ChainWalker::new(node_file, head, self.config.max_chain_hops);

        while let Some(node) = walker.next_node().await {
            if !filter.key_matches(&node.key) {
                continue;
            }
            match catalog.read_record(node.data_offset).await {
                Ok(song) => {
                    filter.offer(song);
                    if filter.is_full() {
                        log::info!("结果达到上限{}，停止遍历", self.config.max_results);
                        break;
                    }
                }
                Err(e) => log::warn!("跳过候选节点{:?}: {}", node.key, e),
            }
        }
        log::debug!("遍历节点数={}", walker.hops());

        Ok(filter.into_results())
    }
}
