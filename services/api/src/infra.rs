use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use gst_assess::config::AssessmentConfig;
use gst_assess::workflows::assessment::AssessmentPipeline;
use gst_assess::workflows::filings::FilingUpload;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared, read-only inputs for assessment requests.
#[derive(Clone, Default)]
pub(crate) struct AssessmentService {
    pub(crate) pipeline: AssessmentPipeline,
    pub(crate) defaults: AssessmentConfig,
}

impl AssessmentService {
    pub(crate) fn new(defaults: AssessmentConfig) -> Self {
        Self {
            pipeline: AssessmentPipeline::default(),
            defaults,
        }
    }

    pub(crate) fn today(&self, requested: Option<NaiveDate>) -> NaiveDate {
        requested.unwrap_or_else(|| self.defaults.today())
    }
}

/// A filing as posted over HTTP: plain text or base64 for spreadsheets.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UploadedFile {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) content: Option<String>,
    #[serde(default)]
    pub(crate) content_base64: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UploadDecodeError {
    pub(crate) name: String,
    pub(crate) reason: String,
}

impl fmt::Display for UploadDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file '{}': {}", self.name, self.reason)
    }
}

impl std::error::Error for UploadDecodeError {}

impl UploadedFile {
    pub(crate) fn decode(self) -> Result<FilingUpload, UploadDecodeError> {
        let UploadedFile {
            name,
            content,
            content_base64,
        } = self;

        let bytes = match (content, content_base64) {
            (Some(text), None) => text.into_bytes(),
            (None, Some(encoded)) => match STANDARD.decode(encoded.trim()) {
                Ok(bytes) => bytes,
                Err(err) => {
                    return Err(UploadDecodeError {
                        name,
                        reason: format!("invalid base64 content ({err})"),
                    })
                }
            },
            (Some(_), Some(_)) => {
                return Err(UploadDecodeError {
                    name,
                    reason: "provide either content or content_base64, not both".to_string(),
                })
            }
            (None, None) => {
                return Err(UploadDecodeError {
                    name,
                    reason: "missing content or content_base64".to_string(),
                })
            }
        };

        Ok(FilingUpload::new(name, bytes))
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
