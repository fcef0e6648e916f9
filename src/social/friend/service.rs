//! 好友列表获取服务层
//!
//! 顺序请求所有好友分页，把结果归一化后缓存在内存中。缓存只在进程生命周期内有效，
//! 通过 `get_friends()` 读取副本，登出时调用 `reset()` 清空。

use crate::social::bridge::GraphBridge;
use crate::social::error::{FriendError, Result};
use crate::social::friend::api::FriendApi;
use crate::social::friend::listener::{EmptyFriendListListener, FriendListListener};
use crate::social::friend::models::{Friend, FriendFetcherConfig};
use crate::social::friend::types::RawFriendRecord;
use crate::social::ready::ReadySignal;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// 分页状态（仅在一次获取循环内有效）
#[derive(Debug, Clone, PartialEq, Eq)]
struct PageState {
    before_cursor_id: String,
    after_cursor_id: String,
    first: bool,
    done: bool,
}

impl PageState {
    fn initial() -> Self {
        Self {
            before_cursor_id: String::new(),
            after_cursor_id: String::new(),
            first: true,
            done: false,
        }
    }

    /// 非首页且 before 与 after 游标相同：分页已到尽头
    fn is_stagnant(&self) -> bool {
        !self.first && self.before_cursor_id == self.after_cursor_id
    }
}

/// 单页获取结果
struct PageResult {
    friends: Vec<Friend>,
    state: PageState,
    /// 是否实际发起了请求（游标停滞时不发起）
    requested: bool,
}

/// 严格归一化：任一记录缺少 `picture.data.url` 即失败
pub fn normalize_friends(records: &[RawFriendRecord]) -> Result<Vec<Friend>> {
    records
        .iter()
        .map(|record| {
            let url = record
                .picture_url()
                .ok_or_else(|| FriendError::MissingProfilePicture {
                    facebook_id: record.id.clone(),
                })?;
            Ok(Friend {
                id: None,
                facebook_id: record.id.clone(),
                name: record.name.clone(),
                profile_picture_url: url.to_string(),
            })
        })
        .collect()
}

/// 好友列表获取器
pub struct FriendListFetcher {
    config: FriendFetcherConfig,
    /// 好友 API 客户端
    api: FriendApi,
    /// 运行环境就绪信号
    ready: Arc<ReadySignal>,
    /// 获取过程监听器
    listener: Arc<dyn FriendListListener>,
    /// 好友缓存
    friends: Mutex<Vec<Friend>>,
}

impl FriendListFetcher {
    /// 创建新的获取器（默认配置、环境已就绪、空监听器）
    pub fn new(
        bridge: Arc<dyn GraphBridge>,
        permissions: Vec<String>,
        placeholder_image_url: String,
    ) -> Result<Self> {
        Self::with_config(
            bridge,
            FriendFetcherConfig::new(permissions, placeholder_image_url),
        )
    }

    pub fn with_config(bridge: Arc<dyn GraphBridge>, config: FriendFetcherConfig) -> Result<Self> {
        if config.max_pages == Some(0) {
            return Err(FriendError::InvalidConfig(
                "max_pages 必须大于 0".to_string(),
            ));
        }
        info!(
            "[FriendFetch] 创建好友列表获取器，权限: {:?}, 最大分页数: {:?}",
            config.permissions, config.max_pages
        );
        Ok(Self {
            api: FriendApi::new(bridge, config.permissions.clone()),
            ready: Arc::new(ReadySignal::fired()),
            listener: Arc::new(EmptyFriendListListener),
            friends: Mutex::new(Vec::new()),
            config,
        })
    }

    /// 设置监听器
    pub fn with_listener(mut self, listener: Arc<dyn FriendListListener>) -> Self {
        self.listener = listener;
        self
    }

    /// 设置运行环境就绪信号（移动端在设备就绪事件里调用 `fire()`）
    pub fn with_ready_signal(mut self, ready: Arc<ReadySignal>) -> Self {
        self.ready = ready;
        self
    }

    fn cache(&self) -> MutexGuard<'_, Vec<Friend>> {
        self.friends.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 获取并缓存全部好友，返回本轮缓存的好友数
    ///
    /// 缓存在开始时清空，之后每页结果按顺序追加。某一页失败时立即返回错误，
    /// 已追加的好友不会回滚。同一实例上的并发调用不做互斥，会交替写入缓存。
    pub async fn fetch_and_cache_all_friends(&self) -> Result<usize> {
        self.cache().clear();
        self.listener.on_fetch_started().await;
        match self.fetch_all_pages().await {
            Ok(total) => {
                info!("[FriendFetch] ✅ 好友列表获取完成，共 {} 个好友", total);
                self.listener.on_fetch_finished(total).await;
                Ok(total)
            }
            Err(e) => {
                error!("[FriendFetch] ❌ 好友列表获取中止: {}", e);
                self.listener.on_fetch_failed(e.to_string()).await;
                Err(e)
            }
        }
    }

    /// 在 tokio 运行时上后台执行 `fetch_and_cache_all_friends`
    pub fn spawn_fetch(self: Arc<Self>) -> JoinHandle<Result<usize>> {
        tokio::spawn(async move { self.fetch_and_cache_all_friends().await })
    }

    async fn fetch_all_pages(&self) -> Result<usize> {
        let mut state = PageState::initial();
        let mut pages: u32 = 0;
        let mut total = 0usize;

        while !state.done {
            if !state.is_stagnant() {
                if let Some(limit) = self.config.max_pages {
                    if pages >= limit {
                        warn!("[FriendFetch] 分页数达到上限 {}，停止获取", limit);
                        return Err(FriendError::PageLimitExceeded { limit });
                    }
                }
            }

            let page = self.fetch_page(&state).await?;
            state = page.state;
            if page.requested {
                pages += 1;
                let count = page.friends.len();
                self.cache().extend(page.friends);
                total += count;
                self.listener.on_page_fetched(pages, count).await;
            }
        }

        Ok(total)
    }

    /// 获取一页好友，并计算下一页的分页状态
    async fn fetch_page(&self, state: &PageState) -> Result<PageResult> {
        self.ready.wait().await;

        let mut next = PageState {
            before_cursor_id: String::new(),
            after_cursor_id: String::new(),
            first: false,
            done: false,
        };

        if state.is_stagnant() {
            debug!(
                "[FriendFetch] 游标未变化 ({})，分页结束",
                state.after_cursor_id
            );
            next.done = true;
            return Ok(PageResult {
                friends: Vec::new(),
                state: next,
                requested: false,
            });
        }

        let resp = self.api.get_friends_page(&state.after_cursor_id).await?;
        let friends = self.normalize(&resp.data)?;
        if friends.is_empty() {
            next.done = true;
        }

        match resp.cursors() {
            Some(cursors) => {
                next.before_cursor_id = cursors.before.clone();
                next.after_cursor_id = cursors.after.clone();
            }
            None => next.done = true,
        }

        debug!(
            "[FriendFetch] 分页好友数: {}, before: {}, after: {}, 结束: {}",
            friends.len(),
            next.before_cursor_id,
            next.after_cursor_id,
            next.done
        );

        Ok(PageResult {
            friends,
            state: next,
            requested: true,
        })
    }

    /// 把原始记录归一化为内部结构
    ///
    /// 启用占位图回退时，缺少头像的好友使用配置的占位图；否则与 [`normalize_friends`] 一致。
    pub fn normalize(&self, records: &[RawFriendRecord]) -> Result<Vec<Friend>> {
        if !self.config.placeholder_for_missing_picture {
            return normalize_friends(records);
        }

        Ok(records
            .iter()
            .map(|record| {
                let url = match record.picture_url() {
                    Some(url) => url.to_string(),
                    None => {
                        warn!(
                            "[FriendFetch] 好友 {} 没有头像，使用占位图",
                            record.id
                        );
                        self.config.placeholder_image_url.clone()
                    }
                };
                Friend {
                    id: None,
                    facebook_id: record.id.clone(),
                    name: record.name.clone(),
                    profile_picture_url: url,
                }
            })
            .collect())
    }

    /// 返回缓存好友的独立副本
    pub fn get_friends(&self) -> Vec<Friend> {
        self.cache().clone()
    }

    /// 以 JSON 数组字符串返回缓存好友
    pub fn friends_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*self.cache())
    }

    /// 清空缓存（例如用户登出时）。不会中止正在进行的获取。
    pub fn reset(&self) {
        let mut friends = self.cache();
        if !friends.is_empty() {
            info!("[FriendFetch] 清空好友缓存，原有 {} 个好友", friends.len());
        }
        friends.clear();
    }
}
