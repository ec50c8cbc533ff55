//! Typed view of the upstream job API.
//!
//! `AppState` holds an `Arc<dyn JobApi>`; `HttpJobApi` is the production backend.

use async_trait::async_trait;

use crate::models::job::{Application, Job, SamlAttributes};
use crate::upstream::{UpstreamClient, UpstreamError};

const JOBS: &[&str] = &["devs", "tas", "jobs"];
const SUBMIT: &[&str] = &["devs", "allan", "submit"];

#[async_trait]
pub trait JobApi: Send + Sync {
    /// Lists the tenant's jobs. A null or empty body yields an empty list.
    async fn list_jobs(&self, tenant: &str) -> Result<Vec<Job>, UpstreamError>;

    async fn get_job(&self, tenant: &str, job_id: &str) -> Result<Job, UpstreamError>;

    /// Looks up the applicant email stored in the SAML assertion for `saml_key`.
    async fn resolve_email(&self, tenant: &str, saml_key: &str) -> Result<String, UpstreamError>;

    async fn submit_application(
        &self,
        tenant: &str,
        application: &Application,
    ) -> Result<(), UpstreamError>;
}

pub struct HttpJobApi {
    upstream: UpstreamClient,
}

impl HttpJobApi {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl JobApi for HttpJobApi {
    async fn list_jobs(&self, tenant: &str) -> Result<Vec<Job>, UpstreamError> {
        let body = self.upstream.get(tenant, "jobs.list", JOBS).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let jobs: Option<Vec<Job>> = serde_json::from_slice(&body)?;
        Ok(jobs.unwrap_or_default())
    }

    async fn get_job(&self, tenant: &str, job_id: &str) -> Result<Job, UpstreamError> {
        let body = self
            .upstream
            .get(tenant, "jobs.by_id", &["devs", "tas", "jobs", "byID", job_id])
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn resolve_email(&self, tenant: &str, saml_key: &str) -> Result<String, UpstreamError> {
        let body = self
            .upstream
            .get(
                tenant,
                "saml.assertion",
                &[
                    "core", "tenants", tenant, "saml", "assertions", "byKey", saml_key, "json",
                ],
            )
            .await?;
        let attributes: SamlAttributes = serde_json::from_slice(&body)?;
        Ok(attributes.email)
    }

    async fn submit_application(
        &self,
        tenant: &str,
        application: &Application,
    ) -> Result<(), UpstreamError> {
        let payload = serde_json::to_vec(application)?;
        self.upstream
            .post(tenant, "applications.submit", SUBMIT, payload)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::testing::{client_for, spawn_upstream};
    use crate::upstream::{SECRET_HEADER, TENANT_HEADER};

    #[tokio::test]
    async fn test_list_jobs_decodes_array() {
        let upstream = spawn_upstream(&[(
            "/api/devs/tas/jobs",
            200,
            r#"[{"id":1,"title":"Engineer","description":"Rust"},{"id":2,"title":"Designer","description":"UI"}]"#,
        )])
        .await;
        let api = HttpJobApi::new(client_for(&upstream, "s3cret"));

        let jobs = api.list_jobs("acme").await.unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Engineer");
        assert_eq!(jobs[1].id, 2);
    }

    #[tokio::test]
    async fn test_list_jobs_null_and_empty_bodies_are_empty_lists() {
        for body in ["null", "", "[]"] {
            let upstream = spawn_upstream(&[("/api/devs/tas/jobs", 200, body)]).await;
            let api = HttpJobApi::new(client_for(&upstream, "s3cret"));
            assert!(api.list_jobs("acme").await.unwrap().is_empty(), "body {body:?}");
        }
    }

    #[tokio::test]
    async fn test_list_jobs_malformed_json_is_decode_error() {
        let upstream = spawn_upstream(&[("/api/devs/tas/jobs", 200, "{not json")]).await;
        let api = HttpJobApi::new(client_for(&upstream, "s3cret"));
        assert!(matches!(
            api.list_jobs("acme").await,
            Err(UpstreamError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_get_job_hits_by_id_path() {
        let upstream = spawn_upstream(&[(
            "/api/devs/tas/jobs/byID/42",
            200,
            r#"{"id":42,"title":"Engineer","description":"Build it"}"#,
        )])
        .await;
        let api = HttpJobApi::new(client_for(&upstream, "s3cret"));

        let job = api.get_job("acme", "42").await.unwrap();
        assert_eq!(job.id, 42);
        assert_eq!(job.description, "Build it");
    }

    #[tokio::test]
    async fn test_resolve_email_reads_saml_assertion() {
        let upstream = spawn_upstream(&[(
            "/api/core/tenants/acme/saml/assertions/byKey/key-1/json",
            200,
            r#"{"tas.personal.email":"dev@acme.test"}"#,
        )])
        .await;
        let api = HttpJobApi::new(client_for(&upstream, "s3cret"));

        assert_eq!(api.resolve_email("acme", "key-1").await.unwrap(), "dev@acme.test");
        assert_eq!(upstream.requests()[0].header(TENANT_HEADER), Some("acme"));
    }

    #[tokio::test]
    async fn test_submit_application_posts_payload_once() {
        let upstream = spawn_upstream(&[("/api/devs/allan/submit", 200, "")]).await;
        let api = HttpJobApi::new(client_for(&upstream, "s3cret"));
        let application = Application {
            job: "42".to_string(),
            email: "dev@acme.test".to_string(),
        };

        api.submit_application("acme", &application).await.unwrap();

        let seen = upstream.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, "POST");
        assert_eq!(seen[0].path, "/api/devs/allan/submit");
        assert_eq!(seen[0].header(SECRET_HEADER), Some("s3cret"));
        let forwarded: Application = serde_json::from_slice(&seen[0].body).unwrap();
        assert_eq!(forwarded, application);
    }

    #[tokio::test]
    async fn test_submit_application_propagates_upstream_failure() {
        let upstream = spawn_upstream(&[("/api/devs/allan/submit", 500, "boom")]).await;
        let api = HttpJobApi::new(client_for(&upstream, "s3cret"));
        let application = Application {
            job: "42".to_string(),
            email: String::new(),
        };

        let err = api.submit_application("acme", &application).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_dot_identifiers_never_reach_upstream() {
        let upstream = spawn_upstream(&[("/api/devs/tas/jobs/byID", 200, "{}")]).await;
        let api = HttpJobApi::new(client_for(&upstream, "s3cret"));

        assert!(matches!(
            api.get_job("acme", "..").await,
            Err(UpstreamError::InvalidSegment { .. })
        ));
        assert!(matches!(
            api.resolve_email("acme", "..").await,
            Err(UpstreamError::InvalidSegment { .. })
        ));
        assert!(upstream.requests().is_empty());
    }
}
