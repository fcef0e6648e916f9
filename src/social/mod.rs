pub mod bridge;
pub mod error;
pub mod http;
pub mod ready;
pub mod friend;

// 重新导出桥接与错误类型
pub use bridge::GraphBridge;
pub use error::{FriendError, Result};
pub use http::{GraphClientConfig, HttpGraphBridge};
pub use ready::ReadySignal;
