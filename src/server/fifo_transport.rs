use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};

use crate::config::Config;
use crate::custom_err::{channel_failure, CustomResult};
use crate::server::Transport;

/// 命名管道，open 会阻塞直到另一端也打开
pub struct FifoTransport {
    request_path: PathBuf,
    response_path: PathBuf,
}

impl FifoTransport {
    /// 管道不存在时创建
    pub fn create(config: &Config) -> CustomResult<FifoTransport> {
        let request_path = PathBuf::from(&config.request_fifo);
        let response_path = PathBuf::from(&config.response_fifo);
        make_fifo(&request_path)?;
        make_fifo(&response_path)?;
        Ok(FifoTransport {
            request_path,
            response_path,
        })
    }
}

pub fn make_fifo(path: &Path) -> CustomResult<()> {
    if let Ok(meta) = std::fs::metadata(path) {
        if !meta.file_type().is_fifo() {
            log::warn!("{:?} 已存在但不是命名管道", path);
        }
        return Ok(());
    }

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| channel_failure(format!("非法的管道路径{:?}: {}", path, e)))?;
    // SAFETY: c_path 是以 0 结尾的有效字符串，调用期间一直存活
    let ret = unsafe { libc::mkfifo(c_path.as_ptr(), 0o666) };
    if ret != 0 {
        let err = std::io::Error::last_os_error();
        if err.kind() != std::io::ErrorKind::AlreadyExists {
            return Err(channel_failure(format!("创建管道{:?}失败: {}", path, err)));
        }
    }
    log::info!("创建管道:{:?}", path);
    Ok(())
}

impl Transport for FifoTransport {
    type Reader = File;
    type Writer = File;

    async fn open_request(&mut self) -> std::io::Result<File> {
        log::debug!("等待客户端请求...");
        File::open(&self.request_path).await
    }

    async fn open_response(&mut self) -> std::io::Result<File> {
        OpenOptions::new().write(true).open(&self.response_path).await
    }
}
