use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use serde_json::Value;
use templated_email::{
    domain::communication::{templated_email::TemplatedEmailConfig, templates::Parameters},
    infrastructure::{
        email::smtp::{SMTPConfig, SMTPMailer},
        templated_email::email_builder,
        templates::MiniJinjaRenderer,
    },
};

#[derive(Parser)]
pub struct Args {
    #[clap(flatten)]
    pub email: TemplatedEmailConfig,

    #[clap(flatten)]
    pub smtp: SMTPConfig,

    /// Host the email is composed for
    #[arg(long, env = "APP_HOST", default_value = "localhost")]
    pub host: String,

    /// Template name, without extension
    #[arg(long)]
    pub template: String,

    /// Recipient address
    #[arg(long)]
    pub to: String,

    /// Subject line
    #[arg(long)]
    pub subject: Option<String>,

    /// Template parameters as key=value
    #[arg(long = "param")]
    pub params: Vec<String>,
}

fn parameters(pairs: &[String]) -> Result<Parameters> {
    let mut parameters = Parameters::new();

    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got \"{pair}\""))?;
        parameters.insert(key.to_string(), Value::String(value.to_string()));
    }

    Ok(parameters)
}

#[mutants::skip]
pub fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let renderer = Arc::new(MiniJinjaRenderer::new(&args.email.template_storage).with_inline_css(true));
    let mailer = Arc::new(SMTPMailer::new(args.smtp));

    let mut email = email_builder(&args.email, args.host, renderer, mailer)?;

    email
        .compose_from(&args.template, parameters(&args.params)?)?
        .add_to(&args.to, None);

    if let Some(subject) = args.subject {
        email.set_subject(subject);
    }

    email.send()?;

    println!("Sent \"{}\" to {}", args.template, args.to);

    Ok(())
}
