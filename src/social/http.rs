//! 基于 reqwest 的 Graph API 桥接实现
//!
//! 移动端由原生插件完成请求；在桌面端 / 服务端则直接用 access token 访问 Graph API。

use crate::social::bridge::GraphBridge;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Graph API 默认地址（cordova-plugin-facebook4 所对应的版本）
pub const DEFAULT_GRAPH_API_BASE_URL: &str = "https://graph.facebook.com/v2.12";

/// HTTP 桥接配置
#[derive(Clone, Debug)]
pub struct GraphClientConfig {
    /// Graph API 基础地址
    pub api_base_url: String,
    /// 用户 access token（由登录流程获得）
    pub access_token: String,
}

impl GraphClientConfig {
    /// 使用默认地址创建配置
    pub fn new(access_token: String) -> Self {
        Self {
            api_base_url: DEFAULT_GRAPH_API_BASE_URL.to_string(),
            access_token,
        }
    }

    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }
}

/// Graph API 错误包装：`{"error": {"message", "type", "code"}}`
#[derive(Debug, Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    #[serde(default)]
    message: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    code: i64,
}

/// 通过 reqwest 直接访问 Graph API 的桥接
pub struct HttpGraphBridge {
    client: reqwest::Client,
    config: GraphClientConfig,
}

impl HttpGraphBridge {
    /// 创建新的 HTTP 桥接
    pub fn new(config: GraphClientConfig) -> Result<Self> {
        if config.access_token.is_empty() {
            return Err(anyhow::anyhow!("access token 不能为空"));
        }
        let client = reqwest::ClientBuilder::new()
            .build()
            .context("创建 HTTP 客户端失败")?;
        Ok(Self::with_client(client, config))
    }

    /// 使用外部配置好的 `reqwest::Client`
    pub fn with_client(client: reqwest::Client, config: GraphClientConfig) -> Self {
        Self { client, config }
    }

    /// 构造带 access token 的 GET 请求
    fn build_request(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.build_url(path))
            .query(&[("access_token", self.config.access_token.as_str())])
            .header("Accept", "application/json")
    }

    /// 拼接请求地址，`path` 已带查询串时不会重复添加 `/`
    pub(crate) fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// 把 Graph API 的错误响应转成可读的错误
fn describe_graph_error(status: reqwest::StatusCode, body: &[u8]) -> anyhow::Error {
    match serde_json::from_slice::<GraphErrorEnvelope>(body) {
        Ok(envelope) => anyhow::anyhow!(
            "Graph API 错误 {} ({} #{}): {}",
            status,
            envelope.error.kind,
            envelope.error.code,
            envelope.error.message
        ),
        Err(_) => anyhow::anyhow!("HTTP 错误 {}: {}", status, String::from_utf8_lossy(body)),
    }
}

#[async_trait]
impl GraphBridge for HttpGraphBridge {
    async fn api(&self, path: &str, permissions: &[String]) -> Result<serde_json::Value> {
        let operation_id = Uuid::new_v4().to_string();
        let url = self.build_url(path);

        info!("[GraphHTTP] 📡 请求 {}", path);
        debug!("[GraphHTTP]   请求URL: {}, 操作ID: {}", url, operation_id);
        debug!("[GraphHTTP]   权限: {}", permissions.join(","));

        let response = self
            .build_request(path)
            .send()
            .await
            .context("请求失败")?;

        let status = response.status();
        let body_bytes = response.bytes().await.context("读取响应 body 失败")?;

        if !status.is_success() {
            let err = describe_graph_error(status, &body_bytes);
            error!("[GraphHTTP] 请求失败，操作ID: {}, {}", operation_id, err);
            return Err(err);
        }
        debug!("[GraphHTTP] 请求成功，HTTP状态: {}", status);

        serde_json::from_slice(&body_bytes).map_err(|e| {
            error!(
                "[GraphHTTP] 响应不是合法 JSON: {:?}\n原始响应: {}",
                e,
                String::from_utf8_lossy(&body_bytes)
            );
            anyhow::anyhow!("反序列化响应失败: {:?}", e)
        })
    }
}
