use crate::infra::{deserialize_optional_date, AppState, AssessmentService, UploadedFile};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use gst_assess::error::AppError;
use gst_assess::workflows::assessment::{AssessmentRequest, GstAssessment};
use gst_assess::workflows::business::BusinessProfile;
use gst_assess::workflows::lending::{quote, CalculatorRange};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct AssessmentPayload {
    pub(crate) profile: BusinessProfile,
    #[serde(default)]
    pub(crate) files: Vec<UploadedFile>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessmentResponse {
    #[serde(flatten)]
    pub(crate) assessment: GstAssessment,
    /// Absent when the loan ceiling is below the calculator minimum.
    pub(crate) calculator: Option<CalculatorRange>,
}

const TENURE_YEARS: std::ops::RangeInclusive<u32> = 1..=30;

#[derive(Debug, Deserialize)]
pub(crate) struct EmiRequest {
    pub(crate) principal: f64,
    pub(crate) interest_rate: f64,
    pub(crate) tenure_years: u32,
}

pub(crate) fn router(service: AssessmentService) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/assessments", post(assessment_endpoint))
        .route("/api/v1/loan/emi", post(emi_endpoint))
        .layer(Extension(service))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn assessment_endpoint(
    Extension(service): Extension<AssessmentService>,
    Json(payload): Json<AssessmentPayload>,
) -> Response {
    let AssessmentPayload {
        profile,
        files,
        today,
    } = payload;

    let uploads = match files
        .into_iter()
        .map(UploadedFile::decode)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(uploads) => uploads,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    let request = AssessmentRequest {
        profile,
        uploads,
        today: service.today(today),
    };

    match service.pipeline.run(request) {
        Ok(assessment) => {
            let calculator = assessment.loan.calculator_range();
            let body = AssessmentResponse {
                assessment,
                calculator,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn emi_endpoint(Json(request): Json<EmiRequest>) -> Response {
    let EmiRequest {
        principal,
        interest_rate,
        tenure_years,
    } = request;

    if !principal.is_finite() || principal < 0.0 {
        let payload = json!({ "error": "principal must be a non-negative amount" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }
    if !interest_rate.is_finite() || interest_rate < 0.0 {
        let payload = json!({ "error": "interest_rate must be a non-negative percentage" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    if !TENURE_YEARS.contains(&tenure_years) {
        let payload = json!({
            "error": format!(
                "tenure_years must be between {} and {}",
                TENURE_YEARS.start(),
                TENURE_YEARS.end()
            )
        });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    let months = tenure_years * 12;
    (StatusCode::OK, Json(quote(principal, interest_rate, months))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use gst_assess::config::AssessmentConfig;
    use gst_assess::workflows::business::{BusinessCategory, BusinessType};
    use serde_json::Value;
    use tower::ServiceExt;

    fn service() -> AssessmentService {
        AssessmentService::new(AssessmentConfig {
            reference_date: NaiveDate::from_ymd_opt(2024, 6, 30),
        })
    }

    fn profile() -> BusinessProfile {
        BusinessProfile {
            gstin: "27AAPFU0939F1ZV".to_string(),
            business_name: "Konkan Spice Co".to_string(),
            business_type: BusinessType::Msme,
            business_category: BusinessCategory::Goods,
            incorporation_date: "2015-01-01".to_string(),
            state: "Maharashtra".to_string(),
        }
    }

    fn b2b_file() -> UploadedFile {
        UploadedFile {
            name: "Apr_b2b.csv".to_string(),
            content: Some("Invoice Value,Taxable Value,Rate\n100000,100000,18\n".to_string()),
            content_base64: None,
        }
    }

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn assessment_endpoint_returns_full_report() {
        let payload = AssessmentPayload {
            profile: profile(),
            files: vec![b2b_file()],
            today: None,
        };

        let response = assessment_endpoint(Extension(service()), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json_body(response).await;
        assert_eq!(body["metrics"]["annual_turnover"], 1_200_000.0);
        assert_eq!(body["loan"]["credit_score"], 730);
        assert_eq!(body["assessed_on"], "2024-06-30");
        assert_eq!(body["calculator"]["max"], 300_000.0);
        assert_eq!(body["schemes"]["pmmy_loans"]["eligible"], true);
    }

    #[tokio::test]
    async fn small_ceiling_reports_no_calculator() {
        let payload = AssessmentPayload {
            profile: profile(),
            files: vec![UploadedFile {
                name: "Apr_b2b.csv".to_string(),
                content: Some("Invoice Value,Taxable Value,Rate\n25000,25000,18\n".to_string()),
                content_base64: None,
            }],
            today: None,
        };

        let response = assessment_endpoint(Extension(service()), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json_body(response).await;
        assert_eq!(body["loan"]["max_loan_amount"], 75_000.0);
        assert!(body["calculator"].is_null());
    }

    #[tokio::test]
    async fn assessment_without_sales_files_is_bad_request() {
        let payload = AssessmentPayload {
            profile: profile(),
            files: Vec::new(),
            today: None,
        };

        let response = assessment_endpoint(Extension(service()), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_json_body(response).await;
        let message = body["error"].as_str().expect("error message");
        assert!(message.contains("at least one B2B or B2C sales file"));
    }

    #[tokio::test]
    async fn undecodable_upload_is_bad_request() {
        let payload = AssessmentPayload {
            profile: profile(),
            files: vec![UploadedFile {
                name: "gstr2b.xlsx".to_string(),
                content: None,
                content_base64: Some("not base64!".to_string()),
            }],
            today: None,
        };

        let response = assessment_endpoint(Extension(service()), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn emi_route_quotes_through_the_router() {
        let response = router(service())
            .oneshot(
                Request::post("/api/v1/loan/emi")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "principal": 1_000_000.0, "interest_rate": 12.0, "tenure_years": 5 })
                            .to_string(),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["tenure_months"], 60);
        let emi = body["monthly_emi"].as_f64().expect("emi");
        assert!((emi - 22_244.45).abs() < 0.01);
    }

    #[tokio::test]
    async fn emi_route_rejects_negative_principal() {
        let request = EmiRequest {
            principal: -1.0,
            interest_rate: 10.0,
            tenure_years: 3,
        };

        let response = emi_endpoint(Json(request)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn emi_route_rejects_out_of_range_tenure() {
        for tenure_years in [0, 31, u32::MAX] {
            let request = EmiRequest {
                principal: 500_000.0,
                interest_rate: 12.0,
                tenure_years,
            };

            let response = emi_endpoint(Json(request)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "tenure {tenure_years}");
            let body = read_json_body(response).await;
            assert_eq!(body["error"], "tenure_years must be between 1 and 30");
        }

        let response = emi_endpoint(Json(EmiRequest {
            principal: 500_000.0,
            interest_rate: 12.0,
            tenure_years: 30,
        }))
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert!(body["monthly_emi"].as_f64().is_some_and(f64::is_finite));
    }

    #[tokio::test]
    async fn assessment_route_accepts_json_over_http() {
        let body = json!({
            "profile": {
                "gstin": "27AAPFU0939F1ZV",
                "business_name": "Konkan Spice Co",
                "business_type": "trader",
                "business_category": "both",
                "incorporation_date": "2020-02-01",
                "state": "Sikkim"
            },
            "files": [
                { "name": "Mar_b2b.csv", "content": "Invoice Value,Taxable Value,Rate\n500000,500000,5\n" }
            ],
            "today": "2024-06-30"
        });

        let response = router(service())
            .oneshot(
                Request::post("/api/v1/assessments")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["schemes"]["gst_composition"]["eligible"], true);
        assert_eq!(payload["monthly"][0]["month"], "Month 1 (Mar)");
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }
}
