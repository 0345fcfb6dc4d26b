use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncSeekExt, BufReader, SeekFrom};

use crate::custom_err::{record_unreadable, CustomResult};
use crate::store::{parse_song, Song};

/// 单行最多读取的字节数
pub const MAX_LINE_SIZE: u64 = 1023;

/// 按偏移量读取歌曲目录文件中的一行
pub struct CatalogReader {
    reader: BufReader<File>,
}

impl CatalogReader {
    pub async fn open(path: &Path) -> CustomResult<CatalogReader> {
        let file = File::open(path)
            .await
            .map_err(|e| record_unreadable(format!("打开目录文件{:?}失败: {}", path, e)))?;
        Ok(CatalogReader {
            reader: BufReader::new(file),
        })
    }

    pub async fn read_record(&mut self, offset: i64) -> CustomResult<Song> {
        if offset < 0 {
            return Err(record_unreadable(format!("非法的目录偏移量{}", offset)));
        }
        self.reader
            .seek(SeekFrom::Start(offset as u64))
            .await
            .map_err(|e| record_unreadable(format!("定位目录偏移量{}失败: {}", offset, e)))?;

        let mut line = Vec::new();
        let n = (&mut self.reader)
            .take(MAX_LINE_SIZE)
            .read_until(b'\n', &mut line)
            .await
            .map_err(|e| record_unreadable(format!("读取目录偏移量{}失败: {}", offset, e)))?;
        if n == 0 {
            return Err(record_unreadable(format!("目录偏移量{}超出文件末尾", offset)));
        }

        Ok(parse_song(&String::from_utf8_lossy(&line)))
    }
}
