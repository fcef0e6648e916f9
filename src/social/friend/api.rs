//! 好友 API 客户端
//!
//! 负责拼接好友分页请求路径、通过桥接发起请求并解析响应

use crate::social::bridge::GraphBridge;
use crate::social::error::{FriendError, Result};
use crate::social::friend::types::FriendsPageResp;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// 好友列表请求路径
pub const FRIENDS_PATH: &str = "me/friends?fields=id,name,picture";

/// 拼接某一页的请求路径，`after_cursor_id` 为空时请求第一页
pub fn friends_page_path(after_cursor_id: &str) -> String {
    if after_cursor_id.is_empty() {
        FRIENDS_PATH.to_string()
    } else {
        format!("{}&after={}", FRIENDS_PATH, after_cursor_id)
    }
}

/// 好友相关的 API 客户端
pub struct FriendApi {
    bridge: Arc<dyn GraphBridge>,
    permissions: Vec<String>,
}

impl FriendApi {
    pub fn new(bridge: Arc<dyn GraphBridge>, permissions: Vec<String>) -> Self {
        Self {
            bridge,
            permissions,
        }
    }

    /// 获取一页好友
    pub async fn get_friends_page(&self, after_cursor_id: &str) -> Result<FriendsPageResp> {
        let operation_id = Uuid::new_v4().to_string();
        let path = friends_page_path(after_cursor_id);

        info!("[FriendAPI] 📡 请求好友分页");
        debug!("[FriendAPI]   请求路径: {}, 操作ID: {}", path, operation_id);

        let value = self
            .bridge
            .api(&path, &self.permissions)
            .await
            .map_err(|source| {
                error!(
                    "[FriendAPI] 好友分页请求失败，操作ID: {}, 错误: {:#}",
                    operation_id, source
                );
                FriendError::ExternalRequest {
                    path: path.clone(),
                    source,
                }
            })?;

        let resp: FriendsPageResp = serde_json::from_value(value).map_err(|source| {
            error!(
                "[FriendAPI] 好友分页反序列化失败，操作ID: {}, 错误: {:?}",
                operation_id, source
            );
            FriendError::MalformedResponse {
                path: path.clone(),
                source,
            }
        })?;

        debug!(
            "[FriendAPI] ✅ 好友分页响应，记录数: {}, 含游标: {}",
            resp.data.len(),
            resp.cursors().is_some()
        );
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct EchoBridge {
        reply: Mutex<Option<anyhow::Result<serde_json::Value>>>,
        seen: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl EchoBridge {
        fn new(reply: anyhow::Result<serde_json::Value>) -> Arc<Self> {
            Arc::new(Self {
                reply: Mutex::new(Some(reply)),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GraphBridge for EchoBridge {
        async fn api(&self, path: &str, permissions: &[String]) -> anyhow::Result<serde_json::Value> {
            self.seen
                .lock()
                .unwrap()
                .push((path.to_string(), permissions.to_vec()));
            self.reply.lock().unwrap().take().unwrap()
        }
    }

    #[test]
    fn page_path_appends_after_cursor() {
        assert_eq!(friends_page_path(""), "me/friends?fields=id,name,picture");
        assert_eq!(
            friends_page_path("QVFIb"),
            "me/friends?fields=id,name,picture&after=QVFIb"
        );
    }

    #[tokio::test]
    async fn passes_path_and_permissions_to_bridge() {
        let bridge = EchoBridge::new(Ok(json!({"data": []})));
        let api = FriendApi::new(bridge.clone(), vec!["user_friends".into()]);

        let resp = api.get_friends_page("abc").await.unwrap();
        assert!(resp.data.is_empty());

        let seen = bridge.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "me/friends?fields=id,name,picture&after=abc");
        assert_eq!(seen[0].1, vec!["user_friends".to_string()]);
    }

    #[tokio::test]
    async fn bridge_failure_becomes_external_request_error() {
        let bridge = EchoBridge::new(Err(anyhow::anyhow!("session expired")));
        let api = FriendApi::new(bridge, vec![]);

        match api.get_friends_page("").await {
            Err(FriendError::ExternalRequest { path, source }) => {
                assert_eq!(path, FRIENDS_PATH);
                assert_eq!(source.to_string(), "session expired");
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.data.len())),
        }
    }

    #[tokio::test]
    async fn wrong_shape_becomes_malformed_response() {
        let bridge = EchoBridge::new(Ok(json!({"data": [{"name": "no id"}]})));
        let api = FriendApi::new(bridge, vec![]);

        assert!(matches!(
            api.get_friends_page("").await,
            Err(FriendError::MalformedResponse { .. })
        ));
    }
}
