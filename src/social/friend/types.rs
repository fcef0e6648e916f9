//! 好友 API DTO（Graph API 原始响应结构）

use serde::{Deserialize, Deserializer};

/// 反序列化数组字段，处理 null 值
pub(crate) fn deserialize_vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// 原始好友记录：`{ id, name, picture: { data: { url } } }`
///
/// `picture` 链路上的字段都允许缺失，是否容忍由归一化步骤决定。
#[derive(Debug, Clone, Deserialize)]
pub struct RawFriendRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub picture: Option<RawPicture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPicture {
    #[serde(default)]
    pub data: Option<RawPictureData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPictureData {
    #[serde(default)]
    pub url: Option<String>,
}

impl RawFriendRecord {
    /// `picture.data.url`，任一层缺失时返回 None
    pub fn picture_url(&self) -> Option<&str> {
        self.picture
            .as_ref()?
            .data
            .as_ref()?
            .url
            .as_deref()
    }
}

/// 分页游标
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cursors {
    #[serde(default)]
    pub before: String,
    #[serde(default)]
    pub after: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub cursors: Option<Cursors>,
}

/// 一页好友响应：`{ data: [...], paging?: { cursors?: { before, after } } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FriendsPageResp {
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub data: Vec<RawFriendRecord>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

impl FriendsPageResp {
    /// 响应中的游标块；没有 `paging.cursors` 时返回 None
    pub fn cursors(&self) -> Option<&Cursors> {
        self.paging.as_ref()?.cursors.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_page() {
        let resp: FriendsPageResp = serde_json::from_value(json!({
            "data": [
                {"id": "1", "name": "Alice", "picture": {"data": {"url": "http://x/a.jpg", "is_silhouette": false}}},
                {"id": "2", "name": "Bob", "picture": {"data": {"url": "http://x/b.jpg"}}}
            ],
            "paging": {"cursors": {"before": "QVFIa", "after": "QVFIb"}},
            "summary": {"total_count": 2}
        }))
        .unwrap();

        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.data[1].picture_url(), Some("http://x/b.jpg"));
        let cursors = resp.cursors().unwrap();
        assert_eq!(cursors.before, "QVFIa");
        assert_eq!(cursors.after, "QVFIb");
    }

    #[test]
    fn null_or_missing_data_is_empty() {
        let resp: FriendsPageResp = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(resp.data.is_empty());
        let resp: FriendsPageResp = serde_json::from_value(json!({})).unwrap();
        assert!(resp.data.is_empty());
        assert!(resp.cursors().is_none());
    }

    #[test]
    fn paging_without_cursors() {
        let resp: FriendsPageResp =
            serde_json::from_value(json!({"data": [], "paging": {"next": "https://..."}})).unwrap();
        assert!(resp.paging.is_some());
        assert!(resp.cursors().is_none());
    }

    #[test]
    fn missing_picture_levels_yield_none() {
        for picture in [json!(null), json!({}), json!({"data": {}}), json!({"data": null})] {
            let record: RawFriendRecord =
                serde_json::from_value(json!({"id": "9", "name": "Z", "picture": picture})).unwrap();
            assert_eq!(record.picture_url(), None);
        }
        let record: RawFriendRecord =
            serde_json::from_value(json!({"id": "9", "name": "Z"})).unwrap();
        assert_eq!(record.picture_url(), None);
    }
}
