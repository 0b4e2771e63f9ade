// ABOUTME: HTTP client for the FOG imaging service.
// ABOUTME: Five stateless operations with FOG's two static auth headers.

use super::error::{FogError, Result};
use super::records::{
    ActiveTask, ActiveTasksResponse, HostRecord, HostSearchResponse, ImageRecord,
    ImageSearchResponse, TaskTypeSearchResponse,
};
use super::ImagingService;
use crate::types::{HostId, ImageId, OsSpec, TaskTypeId};
use async_trait::async_trait;
use reqwest::Method;

/// Header carrying the service-level API token.
const API_TOKEN_HEADER: &str = "fog-api-token";
/// Header carrying the per-user token.
const USER_TOKEN_HEADER: &str = "fog-user-token";

/// Stateless request/response wrapper around the FOG HTTP API.
///
/// Knows the handful of endpoints the reimage workflow needs and nothing
/// about orchestration. Cheap to clone per request; holds no mutable state.
#[derive(Debug, Clone)]
pub struct FogClient {
    http: reqwest::Client,
    endpoint: String,
    api_token: String,
    user_token: String,
}

impl FogClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_token: impl Into<String>,
        user_token: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            user_token: user_token.into(),
        }
    }

    /// Issue one authenticated request and return the response body.
    ///
    /// Non-2xx responses are logged (status plus body) before the error is
    /// returned, so failures are diagnosable without a transport trace.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String> {
        let url = format!("{}{}", self.endpoint, path);
        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(API_TOKEN_HEADER, &self.api_token)
            .header(USER_TOKEN_HEADER, &self.user_token);
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            tracing::error!(%method, path, status = status.as_u16(), body = %text,
                "imaging service request failed");
            return Err(FogError::Service {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let text = self.request(Method::GET, path, None).await?;
        serde_json::from_str(&text).map_err(|source| FogError::Decode {
            path: path.to_string(),
            source,
        })
    }

    /// Find the id of the "deploy" task type, matching case-insensitively
    /// on the name and taking the first match.
    async fn find_deploy_task_type(&self) -> Result<TaskTypeId> {
        const DEPLOY: &str = "deploy";
        let resp: TaskTypeSearchResponse =
            self.get_json(&format!("/tasktype/search/{DEPLOY}")).await?;
        select_task_type(resp, DEPLOY)
    }
}

#[async_trait]
impl ImagingService for FogClient {
    async fn find_host(&self, short_name: &str) -> Result<HostRecord> {
        let resp: HostSearchResponse = self
            .get_json(&format!("/host/search/{short_name}"))
            .await?;
        select_host(resp, short_name)
    }

    async fn find_image(&self, os: &OsSpec) -> Result<ImageRecord> {
        let key = os.image_key();
        let resp: ImageSearchResponse = self.get_json(&format!("/image/search/{key}")).await?;
        select_image(resp, &key)
    }

    async fn assign_image(&self, host: HostId, image: ImageId) -> Result<()> {
        // Idempotent on the FOG side: re-assigning the same image is a no-op.
        self.request(
            Method::PUT,
            &format!("/image/{image}/edit"),
            Some(serde_json::json!({ "hosts": host.value() })),
        )
        .await?;
        Ok(())
    }

    async fn schedule_deploy_task(&self, host: HostId) -> Result<()> {
        // FOG's schedule call returns nothing useful, in particular not the
        // created task's id; callers discover it via correlation.
        let task_type = self.find_deploy_task_type().await?;
        self.request(
            Method::POST,
            &format!("/host/{host}/task"),
            Some(serde_json::json!({ "taskTypeID": task_type.value() })),
        )
        .await?;
        Ok(())
    }

    async fn list_active_tasks(&self) -> Result<Vec<ActiveTask>> {
        let resp: ActiveTasksResponse = self.get_json("/task/active").await?;
        Ok(resp.tasks)
    }
}

/// Exactly one host record must match a short name; zero or several are
/// both configuration problems worth failing on.
fn select_host(resp: HostSearchResponse, short_name: &str) -> Result<HostRecord> {
    match resp.count {
        0 => Err(FogError::HostNotFound(short_name.to_string())),
        1 => resp
            .hosts
            .into_iter()
            .next()
            .ok_or_else(|| FogError::HostNotFound(short_name.to_string())),
        count => Err(FogError::AmbiguousHost {
            shortname: short_name.to_string(),
            count,
        }),
    }
}

/// The search is a substring match on FOG's side, so the listing can carry
/// entries like "Deploy All Snapins" alongside "Deploy". Only a name equal
/// to `name` (ignoring case) counts, and the first such entry wins.
fn select_task_type(resp: TaskTypeSearchResponse, name: &str) -> Result<TaskTypeId> {
    resp.tasktypes
        .into_iter()
        .find(|tt| tt.name.eq_ignore_ascii_case(name))
        .map(|tt| tt.id)
        .ok_or_else(|| FogError::TaskTypeNotFound(name.to_string()))
}

/// At least one image must match; the first is used when several do. That
/// is a simplification, not a promise of "best" match.
fn select_image(resp: ImageSearchResponse, key: &str) -> Result<ImageRecord> {
    if resp.count == 0 {
        return Err(FogError::ImageNotFound(key.to_string()));
    }
    resp.images
        .into_iter()
        .next()
        .ok_or_else(|| FogError::ImageNotFound(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_resp(json: &str) -> HostSearchResponse {
        serde_json::from_str(json).unwrap()
    }

    fn image_resp(json: &str) -> ImageSearchResponse {
        serde_json::from_str(json).unwrap()
    }

    fn tasktype_resp(json: &str) -> TaskTypeSearchResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn zero_hosts_is_not_found() {
        let resp = host_resp(r#"{"count": 0, "hosts": []}"#);
        assert!(matches!(
            select_host(resp, "cephtest-042"),
            Err(FogError::HostNotFound(_))
        ));
    }

    #[test]
    fn multiple_hosts_is_ambiguous() {
        let resp = host_resp(
            r#"{"count": 2, "hosts": [{"id": "1", "name": "a"}, {"id": "2", "name": "b"}]}"#,
        );
        assert!(matches!(
            select_host(resp, "cephtest-042"),
            Err(FogError::AmbiguousHost { count: 2, .. })
        ));
    }

    #[test]
    fn single_host_is_returned() {
        let resp = host_resp(r#"{"count": 1, "hosts": [{"id": "17", "name": "cephtest-042"}]}"#);
        let host = select_host(resp, "cephtest-042").unwrap();
        assert_eq!(host.id.value(), 17);
    }

    #[test]
    fn zero_images_is_not_found() {
        let resp = image_resp(r#"{"count": 0, "images": []}"#);
        assert!(matches!(
            select_image(resp, "smithi_ubuntu_20.04"),
            Err(FogError::ImageNotFound(_))
        ));
    }

    #[test]
    fn first_image_wins_on_multiple_matches() {
        let resp = image_resp(
            r#"{"count": 2, "images": [{"id": "9", "name": "first"}, {"id": "11", "name": "second"}]}"#,
        );
        let image = select_image(resp, "smithi_ubuntu_20.04").unwrap();
        assert_eq!(image.id.value(), 9);
    }

    #[test]
    fn task_type_name_match_ignores_case() {
        let resp = tasktype_resp(r#"{"tasktypes": [{"id": "3", "name": "Deploy"}]}"#);
        let id = select_task_type(resp, "deploy").unwrap();
        assert_eq!(id.value(), 3);
    }

    #[test]
    fn first_deploy_named_task_type_wins() {
        let resp = tasktype_resp(
            r#"{"tasktypes": [{"id": "12", "name": "Deploy All Snapins"}, {"id": "3", "name": "deploy"}, {"id": "4", "name": "DEPLOY"}]}"#,
        );
        let id = select_task_type(resp, "deploy").unwrap();
        assert_eq!(id.value(), 3);
    }

    #[test]
    fn empty_task_type_listing_is_not_found() {
        let resp = tasktype_resp(r#"{"tasktypes": []}"#);
        assert!(matches!(
            select_task_type(resp, "deploy"),
            Err(FogError::TaskTypeNotFound(name)) if name == "deploy"
        ));
    }

    #[test]
    fn substring_only_matches_are_not_found() {
        let resp = tasktype_resp(
            r#"{"tasktypes": [{"id": "12", "name": "Deploy All Snapins"}, {"id": "13", "name": "Multicast Deployment"}]}"#,
        );
        assert!(matches!(
            select_task_type(resp, "deploy"),
            Err(FogError::TaskTypeNotFound(_))
        ));
    }
}
