//! Analyze command - one-shot scrape and summary

use clap::Args;

use crate::infrastructure::services::{AnalyzeRequest, SummaryOptions};

/// Identity the rate limiter sees for command line runs
const LOCAL_IDENTITY: &str = "cli";

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Profile URL, or the configured fixture locator
    pub url: String,

    /// Additional requirements for the summary
    #[arg(long)]
    pub prompt: Option<String>,

    /// Lead with a one-line years-of-experience headline
    #[arg(long)]
    pub years_of_experience: bool,

    /// Lead with a one-line relevant-job-titles headline
    #[arg(long)]
    pub relevant_job_titles: bool,

    /// Lead with a one-line degrees-earned headline
    #[arg(long)]
    pub degrees_earned: bool,
}

impl From<AnalyzeArgs> for AnalyzeRequest {
    fn from(args: AnalyzeArgs) -> Self {
        AnalyzeRequest {
            url: args.url,
            custom_prompt: args.prompt,
            summary_options: SummaryOptions {
                years_of_experience: args.years_of_experience,
                relevant_job_titles: args.relevant_job_titles,
                degrees_earned: args.degrees_earned,
            },
        }
    }
}

pub async fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let state = crate::create_app_state(&config)?;

    let report = state.analysis.analyze(LOCAL_IDENTITY, args.into()).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
