//! 好友列表模块
//!
//! 通过社交平台桥接分页获取当前用户的好友列表，并缓存在内存中

pub mod api;
pub mod listener;
pub mod models;
pub mod service;
pub mod types;

// 重新导出主要类型和函数
pub use api::{friends_page_path, FriendApi, FRIENDS_PATH};
pub use listener::{EmptyFriendListListener, FriendListListener};
pub use models::{Friend, FriendFetcherConfig};
pub use service::{normalize_friends, FriendListFetcher};
pub use types::{Cursors, FriendsPageResp, Paging, RawFriendRecord};
