//! 好友列表获取监听器回调接口

use async_trait::async_trait;

/// 好友列表获取过程的回调（调用方“发起后观察”的入口）
#[async_trait]
pub trait FriendListListener: Send + Sync {
    /// 开始新一轮获取，缓存已清空
    async fn on_fetch_started(&self);

    /// 第 `page_index` 页（从 1 开始）已追加到缓存
    async fn on_page_fetched(&self, page_index: u32, friend_count: usize);

    /// 所有分页获取完成，`total` 为本轮缓存的好友总数
    async fn on_fetch_finished(&self, total: usize);

    /// 获取中止，已追加的好友保留在缓存中
    async fn on_fetch_failed(&self, error: String);
}

/// 默认空实现（无操作）
pub struct EmptyFriendListListener;

#[async_trait]
impl FriendListListener for EmptyFriendListListener {
    async fn on_fetch_started(&self) {}

    async fn on_page_fetched(&self, _page_index: u32, _friend_count: usize) {}

    async fn on_fetch_finished(&self, _total: usize) {}

    async fn on_fetch_failed(&self, _error: String) {}
}
