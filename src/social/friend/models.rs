//! 好友本地模型定义

use serde::{Deserialize, Serialize};

/// 内部统一的好友数据结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    /// 业务数据库分配的内部 ID，本模块从不填充
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub facebook_id: String,
    pub name: String,
    pub profile_picture_url: String,
}

/// 好友列表获取器配置
#[derive(Clone, Debug)]
pub struct FriendFetcherConfig {
    /// 请求时携带的权限范围
    pub permissions: Vec<String>,
    /// 无头像好友使用的占位图
    pub placeholder_image_url: String,
    /// 最大分页数，None 表示不限制
    pub max_pages: Option<u32>,
    /// 缺少头像时是否改用占位图（默认关闭，缺少头像视为错误）
    pub placeholder_for_missing_picture: bool,
}

impl FriendFetcherConfig {
    /// 创建默认配置：不限制分页数，不启用占位图回退
    pub fn new(permissions: Vec<String>, placeholder_image_url: String) -> Self {
        Self {
            permissions,
            placeholder_image_url,
            max_pages: None,
            placeholder_for_missing_picture: false,
        }
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn with_placeholder_fallback(mut self, enabled: bool) -> Self {
        self.placeholder_for_missing_picture = enabled;
        self
    }
}
