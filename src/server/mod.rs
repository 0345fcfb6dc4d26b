pub mod fifo_transport;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::custom_err::{channel_failure, CustomResult};
use crate::fifo_param::{encode_count, encode_song, SearchCriteria, CRITERIA_SIZE};
use crate::store::data_manager::DataManager;
use crate::store::Song;

/// 请求/响应通道
///
/// 打开请求端和响应端都可能阻塞，直到另一端连上；
/// 服务端每次只持有一个请求，响应写完并关闭之后才会再次打开请求端。
#[allow(async_fn_in_trait)]
pub trait Transport {
    type Reader: AsyncRead + Unpin;
    type Writer: AsyncWrite + Unpin;

    async fn open_request(&mut self) -> std::io::Result<Self::Reader>;

    async fn open_response(&mut self) -> std::io::Result<Self::Writer>;

    /// 响应写完后关闭
    async fn close_response(&mut self, mut writer: Self::Writer) -> std::io::Result<()> {
        writer.shutdown().await
    }
}

/// 服务端状态，循环执行 等待请求 -> 查询 -> 响应
#[derive(Debug)]
pub enum ServerState {
    AwaitRequest,
    Search(SearchCriteria),
    Respond(Vec<Song>),
}

pub struct RequestServer<T: Transport> {
    transport: T,
    dm: DataManager,
    state: ServerState,
}

impl<T: Transport> RequestServer<T> {
    pub fn new(transport: T, dm: DataManager) -> RequestServer<T> {
        RequestServer {
            transport,
            dm,
            state: ServerState::AwaitRequest,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 一直运行，只有管道出错时返回
    pub async fn run(&mut self) -> CustomResult<()> {
        log::info!("歌曲查询服务已启动!");
        loop {
            self.step().await?;
        }
    }

    /// 处理一个完整的请求，返回匹配数量
    pub async fn serve_once(&mut self) -> CustomResult<usize> {
        loop {
            let count = match &self.state {
                ServerState::Respond(songs) => Some(songs.len()),
                _ => None,
            };
            self.step().await?;
            if let (Some(count), ServerState::AwaitRequest) = (count, &self.state) {
                return Ok(count);
            }
        }
    }

    /// 执行一次状态转换
    pub async fn step(&mut self) -> CustomResult<()> {
        let state = std::mem::replace(&mut self.state, ServerState::AwaitRequest);
        self.state = match state {
            ServerState::AwaitRequest => ServerState::Search(self.await_request().await?),
            ServerState::Search(criteria) => ServerState::Respond(self.dm.find(&criteria).await),
            ServerState::Respond(songs) => {
                self.respond(&songs).await?;
                ServerState::AwaitRequest
            }
        };
        Ok(())
    }

    /// 读取出错时请求的边界已经无法恢复，直接返回错误
    async fn await_request(&mut self) -> CustomResult<SearchCriteria> {
        let mut reader = self
            .transport
            .open_request()
            .await
            .map_err(|e| channel_failure(format!("打开请求管道失败: {}", e)))?;

        let mut payload = [0u8; CRITERIA_SIZE];
        reader
            .read_exact(&mut payload)
            .await
            .map_err(|e| channel_failure(format!("读取请求失败: {}", e)))?;
        drop(reader);

        let criteria = SearchCriteria::decode(&payload);
        log::info!("收到请求 title={:?} artist={:?}", criteria.title, criteria.artist);
        Ok(criteria)
    }

    /// 写入出错时响应已经无法撤回，直接返回错误
    async fn respond(&mut self, songs: &[Song]) -> CustomResult<()> {
        let mut writer = self
            .transport
            .open_response()
            .await
            .map_err(|e| channel_failure(format!("打开响应管道失败: {}", e)))?;

        writer
            .write_all(&encode_count(songs.len()))
            .await
            .map_err(|e| channel_failure(format!("写入匹配数量失败: {}", e)))?;

        if songs.is_empty() {
            log::info!("没有找到匹配的歌曲");
        } else {
            log::info!("找到{}首歌曲", songs.len());
        }
        for (i, song) in songs.iter().enumerate() {
            writer
                .write_all(&encode_song(song))
                .await
                .map_err(|e| channel_failure(format!("写入第{}首歌曲失败: {}", i + 1, e)))?;
            log::info!(
                "[{}] {} - {} ({}) | Views: {}",
                i + 1,
                song.title,
                song.artist,
                song.year,
                song.views
            );
        }

        writer
            .flush()
            .await
            .map_err(|e| channel_failure(format!("刷新响应管道失败: {}", e)))?;
        self.transport
            .close_response(writer)
            .await
            .map_err(|e| channel_failure(format!("关闭响应管道失败: {}", e)))
    }
}
