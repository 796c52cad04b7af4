use crate::routes::AssessmentResponse;
use chrono::NaiveDate;
use clap::Args;
use gst_assess::config::AppConfig;
use gst_assess::error::AppError;
use gst_assess::telemetry;
use gst_assess::workflows::assessment::{
    assess, AssessmentRequest, GstAssessment, EXCELLENT_PROFILE_DETAIL,
};
use gst_assess::workflows::business::{BusinessCategory, BusinessProfile, BusinessType};
use gst_assess::workflows::filings::FilingUpload;
use gst_assess::workflows::lending::EmiQuote;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// GST identification number
    #[arg(long)]
    pub(crate) gstin: String,
    /// Registered business name
    #[arg(long)]
    pub(crate) name: String,
    /// One of msme, exporter, startup, manufacturer, trader, restaurant
    #[arg(long)]
    pub(crate) business_type: BusinessType,
    /// One of goods, services, both
    #[arg(long, default_value = "goods")]
    pub(crate) category: BusinessCategory,
    /// Incorporation date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) incorporated: String,
    /// State of registration
    #[arg(long)]
    pub(crate) state: String,
    /// Filing export; repeat per file. Names containing b2b/b2c are sales, anything else purchases
    #[arg(long = "file", required = true)]
    pub(crate) files: Vec<PathBuf>,
    /// Reference date for business vintage (defaults to APP_ASSESSMENT_DATE, then today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Principal for a what-if EMI quote at the assessed rate and tenure
    #[arg(long)]
    pub(crate) principal: Option<f64>,
    /// Emit the assessment as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let AssessArgs {
        gstin,
        name,
        business_type,
        category,
        incorporated,
        state,
        files,
        today,
        principal,
        json,
    } = args;

    let uploads = files
        .iter()
        .map(|path| load_upload(path))
        .collect::<Result<Vec<_>, _>>()?;

    let request = AssessmentRequest {
        profile: BusinessProfile {
            gstin,
            business_name: name,
            business_type,
            business_category: category,
            incorporation_date: incorporated,
            state,
        },
        uploads,
        today: today.unwrap_or_else(|| config.assessment.today()),
    };

    let assessment = assess(request)?;
    let what_if = principal.map(|amount| assessment.loan.quote(amount));

    if json {
        let calculator = assessment.loan.calculator_range();
        let report = AssessmentResponse {
            assessment,
            calculator,
        };
        let body = serde_json::json!({ "assessment": report, "what_if": what_if });
        println!("{body:#}");
    } else {
        render_assessment(&assessment, what_if.as_ref());
    }

    Ok(())
}

fn load_upload(path: &Path) -> Result<FilingUpload, AppError> {
    let content = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FilingUpload::new(file_name, content))
}

pub(crate) fn render_assessment(assessment: &GstAssessment, what_if: Option<&EmiQuote>) {
    let profile = &assessment.profile;
    println!("GST business assessment");
    println!(
        "{} ({}) | {} | {} | {}",
        profile.business_name,
        profile.gstin,
        profile.business_type.label(),
        profile.state,
        assessment.assessed_on
    );
    println!(
        "Uploads: {} B2B, {} B2C, {} purchase",
        assessment.uploads.b2b, assessment.uploads.b2c, assessment.uploads.purchase
    );

    println!("\nMonthly breakdown");
    for month in &assessment.monthly {
        println!(
            "- {}: sales ₹{:.2} (B2B ₹{:.2}, B2C ₹{:.2}), purchases ₹{:.2}, GST ₹{:.2}, {} customers",
            month.month,
            month.total_sales,
            month.b2b_sales,
            month.b2c_sales,
            month.total_purchases,
            month.gst_collected,
            month.unique_customers
        );
    }

    let metrics = &assessment.metrics;
    println!("\nBusiness metrics");
    println!("- Annual turnover: ₹{:.2}", metrics.annual_turnover);
    println!("- Average monthly sales: ₹{:.2}", metrics.avg_monthly_sales);
    println!(
        "- Sales mix: {:.1}% B2B / {:.1}% B2C",
        metrics.b2b_percentage, metrics.b2c_percentage
    );
    println!(
        "- GST compliance score: {}/100 over {} month(s)",
        metrics.gst_compliance_score, metrics.filing_frequency
    );
    println!("- Estimated margin: {:.1}%", metrics.profit_margin_estimate);

    let insights = &assessment.insights;
    println!(
        "\nScheme eligibility ({} of {} eligible)",
        insights.eligible_schemes, insights.total_schemes
    );
    for verdict in assessment.schemes.verdicts() {
        let marker = match (verdict.evaluated, verdict.eligible) {
            (false, _) => "n/a",
            (true, true) => "yes",
            (true, false) => "no",
        };
        println!("- [{marker}] {}: {}", verdict.scheme_name, verdict.reason);
    }

    let loan = &assessment.loan;
    println!("\nLoan assessment");
    println!(
        "- Credit score: {} ({})",
        loan.credit_score,
        loan.credit_grade.label()
    );
    for component in &loan.score_components {
        println!("    {:>3} pts  {}", component.points, component.notes);
    }
    println!("- Maximum loan: ₹{:.2}", loan.max_loan_amount);
    println!(
        "- Recommended: ₹{:.2} at {:.2}% over {} years",
        loan.recommended_amount, loan.interest_rate, loan.max_tenure_years
    );
    println!(
        "- EMI ₹{:.2}, total interest ₹{:.2}",
        loan.monthly_emi, loan.total_interest
    );
    println!("- Approval probability: {:.1}%", loan.approval_probability);

    if let Some(quote) = what_if {
        println!(
            "- What-if ₹{:.2}: EMI ₹{:.2}, total payable ₹{:.2}",
            quote.principal, quote.monthly_emi, quote.total_payable
        );
    }

    println!("\nStrengths");
    if insights.strengths.is_empty() {
        println!("- none identified");
    }
    for strength in &insights.strengths {
        println!("- {strength}");
    }
    match &insights.headline {
        Some(headline) => println!("\n{headline}: {EXCELLENT_PROFILE_DETAIL}"),
        None => {
            println!("\nAreas for improvement");
            for improvement in &insights.improvements {
                println!("- {improvement}");
            }
        }
    }

    if !assessment.diagnostics.is_empty() {
        println!("\nFile warnings");
        for diagnostic in &assessment.diagnostics {
            println!(
                "- {} ({}): {}",
                diagnostic.source,
                diagnostic.kind.label(),
                diagnostic.message
            );
        }
    }
}
