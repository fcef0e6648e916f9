pub mod social;

// 重新导出常用类型，方便外部使用
pub use social::{
    friend::{Friend, FriendFetcherConfig, FriendListFetcher, FriendListListener},
    FriendError, GraphBridge, GraphClientConfig, HttpGraphBridge, ReadySignal,
};
