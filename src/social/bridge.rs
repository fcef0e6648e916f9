//! 社交平台桥接接口
//!
//! 对应移动端原生插件暴露的 `api(path, permissions, onSuccess, onError)`，
//! 在 Rust 中以单次异步调用表达：成功返回原始 JSON，失败返回错误。

use async_trait::async_trait;

/// 单次请求/响应的社交图谱桥接
#[async_trait]
pub trait GraphBridge: Send + Sync {
    /// 发起一次请求，`path` 为相对路径（例如 `me/friends?fields=id,name,picture`）
    async fn api(&self, path: &str, permissions: &[String]) -> anyhow::Result<serde_json::Value>;
}
