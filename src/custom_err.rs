use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CustomResult<T> = std::result::Result<T, CustomError>;

/// 通用错误
pub const COMMON_ERR: usize = 10000;
/// 哈希表或节点文件无法打开，或读取不完整，本次查询降级为空结果
pub const INDEX_UNAVAILABLE: usize = 10001;
/// 目录文件中某一行无法读取，跳过该候选
pub const RECORD_UNREADABLE: usize = 10002;
/// 请求/响应管道出错，进程退出
pub const CHANNEL_FAILURE: usize = 10003;
/// 配置错误
pub const CONFIG_ERR: usize = 10004;

#[derive(Debug, PartialEq)]
pub struct CustomError {
    pub code: usize,
    pub message: String,
}

pub fn common_err(msg: String) -> CustomError {
    CustomError {
        code: COMMON_ERR,
        message: msg,
    }
}

pub fn index_unavailable(msg: String) -> CustomError {
    CustomError {
        code: INDEX_UNAVAILABLE,
        message: msg,
    }
}

pub fn record_unreadable(msg: String) -> CustomError {
    CustomError {
        code: RECORD_UNREADABLE,
        message: msg,
    }
}

pub fn channel_failure(msg: String) -> CustomError {
    CustomError {
        code: CHANNEL_FAILURE,
        message: msg,
    }
}

pub fn config_err(msg: String) -> CustomError {
    CustomError {
        code: CONFIG_ERR,
        message: msg,
    }
}

impl Display for CustomError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for CustomError {}

impl From<std::io::Error> for CustomError {
    fn from(e: std::io::Error) -> Self {
        common_err(e.to_string())
    }
}

impl From<serde_json::Error> for CustomError {
    fn from(e: serde_json::Error) -> Self {
        common_err(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::custom_err::{channel_failure, CustomError, CHANNEL_FAILURE, COMMON_ERR};

    #[test]
    pub fn test_from_io() {
        let err: CustomError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.code, COMMON_ERR);
        assert_eq!(format!("{}", err), "[10000] gone");
        assert_eq!(channel_failure(String::from("closed")).code, CHANNEL_FAILURE);
    }
}
