//! aura-client: reqwest implementation of the planning service API.
//!
//! Thin transport layer over the backend's `/planner/*` routes. All schedule
//! logic stays in `aura-core`; this crate only moves JSON (and one multipart
//! file upload) and turns non-2xx responses into errors.

use anyhow::{Context, Result, bail};
use aura_core::{
    ExportRequest, FixedScheduleItem, GenerateScheduleRequest, GenerateScheduleResponse,
    PlanningService, SyllabusUpload, SyncResult,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone)]
pub struct PlannerClient {
    base_url: String,
    http: reqwest::Client,
}

impl PlannerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}/planner/{route}", self.base_url)
    }

    async fn post_json<Req: Serialize, Resp: for<'de> Deserialize<'de>>(
        &self,
        route: &str,
        body: &Req,
    ) -> Result<Resp> {
        let resp = self
            .http
            .post(self.url(route))
            .json(body)
            .send()
            .await
            .with_context(|| format!("planner {route} request"))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("planner {route} error: {status} {txt}");
        }

        resp.json()
            .await
            .with_context(|| format!("parse planner {route} response"))
    }
}

impl Default for PlannerClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PlanningService for PlannerClient {
    async fn parse_syllabus(&self, upload: &SyllabusUpload) -> Result<Vec<FixedScheduleItem>> {
        let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str("application/pdf")
            .context("syllabus mime type")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .http
            .post(self.url("parse-syllabus"))
            .multipart(form)
            .send()
            .await
            .context("planner parse-syllabus request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("planner parse-syllabus error: {status} {txt}");
        }

        resp.json()
            .await
            .context("parse planner parse-syllabus response")
    }

    async fn analyze_goals(&self, description: &str) -> Result<String> {
        #[derive(Serialize)]
        struct Req<'a> {
            description: &'a str,
        }

        #[derive(Deserialize)]
        struct Resp {
            analysis: String,
        }

        let out: Resp = self
            .post_json("analyze-goals", &Req { description })
            .await?;
        Ok(out.analysis)
    }

    async fn analyze_feedback(&self, feedback: &str) -> Result<String> {
        #[derive(Serialize)]
        struct Req<'a> {
            feedback: &'a str,
        }

        #[derive(Deserialize)]
        struct Resp {
            constraints: String,
        }

        let out: Resp = self.post_json("analyze-feedback", &Req { feedback }).await?;
        Ok(out.constraints)
    }

    async fn generate_schedule(
        &self,
        request: &GenerateScheduleRequest,
    ) -> Result<GenerateScheduleResponse> {
        self.post_json("generate", request).await
    }

    async fn sync_to_calendar(&self, request: &ExportRequest) -> Result<SyncResult> {
        self.post_json("sync-to-google-calendar", request).await
    }

    async fn render_ics(&self, request: &ExportRequest) -> Result<String> {
        #[derive(Deserialize)]
        struct Resp {
            ics: String,
        }

        let out: Resp = self.post_json("ics", request).await?;
        Ok(out.ics)
    }
}
