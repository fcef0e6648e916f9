//! 好友列表获取的错误类型

use thiserror::Error;

/// 好友列表获取过程中可能出现的错误
#[derive(Debug, Error)]
pub enum FriendError {
    /// 桥接层请求失败（对应原生插件的错误回调）
    #[error("外部请求失败 ({path}): {source}")]
    ExternalRequest {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// 响应 JSON 结构与预期不符
    #[error("响应结构无效 ({path}): {source}")]
    MalformedResponse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// 好友记录缺少 picture.data.url
    #[error("好友 {facebook_id} 缺少头像地址 picture.data.url")]
    MissingProfilePicture { facebook_id: String },

    /// 超过配置的最大分页数
    #[error("分页数超过上限 {limit}")]
    PageLimitExceeded { limit: u32 },

    #[error("配置无效: {0}")]
    InvalidConfig(String),
}

pub type Result<T, E = FriendError> = std::result::Result<T, E>;
