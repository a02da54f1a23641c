//! Self Service bookmark repository
//!
//! One REST endpoint per method; no retries, no batching.

use dlpx_step_api::StepResult;
use serde_json::{
    json,
    Value,
};

use crate::client::EngineClient;
use crate::types::{
    Bookmark,
    EngineAction,
};

const PATH_ROOT: &str = "/resources/json/delphix/jetstream/bookmark";

/// Used for interacting with Self Service bookmarks.
pub struct BookmarkRepository<'a> {
    engine: &'a EngineClient,
}

impl<'a> BookmarkRepository<'a> {
    pub fn new(engine: &'a EngineClient) -> Self {
        Self { engine }
    }

    /// Lists the bookmarks on the engine.
    pub async fn list(&self) -> StepResult<Vec<Bookmark>> {
        let response = self.engine.get(PATH_ROOT).await?;
        Ok(serde_json::from_value(response.result)?)
    }

    /// Creates a bookmark at the latest time on `branch`.
    pub async fn create(
        &self, name: &str, branch: &str, source_data_layout: &str,
    ) -> StepResult<EngineAction> {
        let payload = create_payload(name, branch, source_data_layout);
        let response = self.engine.post(PATH_ROOT, &payload).await?;
        Ok(response.into_action())
    }

    /// Deletes a bookmark by reference.
    pub async fn delete(&self, reference: &str) -> StepResult<EngineAction> {
        let response = self.engine.post(&delete_path(reference), &json!({})).await?;
        Ok(response.into_action())
    }
}

pub(crate) fn create_payload(name: &str, branch: &str, source_data_layout: &str) -> Value {
    json!({
        "type": "JSBookmarkCreateParameters",
        "bookmark": {
            "type": "JSBookmark",
            "name": name,
            "branch": branch
        },
        "timelinePointParameters": {
            "type": "JSTimelinePointLatestTimeInput",
            "sourceDataLayout": source_data_layout
        }
    })
}

pub(crate) fn delete_path(reference: &str) -> String {
    format!("{PATH_ROOT}/{reference}/delete")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_payload_shape() {
        let payload = create_payload("nightly", "JS_BRANCH-4", "JS_DATA_CONTAINER-2");
        assert_eq!(payload["type"], "JSBookmarkCreateParameters");
        assert_eq!(payload["bookmark"]["type"], "JSBookmark");
        assert_eq!(payload["bookmark"]["name"], "nightly");
        assert_eq!(payload["bookmark"]["branch"], "JS_BRANCH-4");
        assert_eq!(
            payload["timelinePointParameters"]["type"],
            "JSTimelinePointLatestTimeInput"
        );
        assert_eq!(
            payload["timelinePointParameters"]["sourceDataLayout"],
            "JS_DATA_CONTAINER-2"
        );
    }

    #[test]
    fn test_delete_path() {
        assert_eq!(
            delete_path("JS_BOOKMARK-7"),
            "/resources/json/delphix/jetstream/bookmark/JS_BOOKMARK-7/delete"
        );
    }

    #[test]
    fn test_bookmark_list_parse() {
        let result = json!([
            {
                "type": "JSBookmark",
                "reference": "JS_BOOKMARK-1",
                "name": "pre-release",
                "branch": "JS_BRANCH-2",
                "container": "JS_DATA_CONTAINER-2"
            },
            {
                "type": "JSBookmark",
                "reference": "JS_BOOKMARK-2",
                "name": "post-release",
                "branch": "JS_BRANCH-2"
            }
        ]);

        let bookmarks: Vec<Bookmark> = serde_json::from_value(result).unwrap();
        assert_eq!(bookmarks.len(), 2);
        assert_eq!(bookmarks[0].reference, "JS_BOOKMARK-1");
        assert!(bookmarks[1].container.is_none());
    }
}
