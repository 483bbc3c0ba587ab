use crate::cli::commands::{Cli, Commands, ContextArgs, PresaleArgs};
use anyhow::{Context, Result};
use mnex::Config;
use mnex::persona::{GeneratedPost, PostContext, PresaleData};
use mnex::security::audit::read_audit_log;
use mnex::security::{CheckContext, ComplianceCheck};
use serde::Serialize;
use tracing::info;

/// Generated text together with its verdict, as printed by `generate` and `reply`.
#[derive(Serialize)]
struct Review<'a> {
    post: &'a GeneratedPost,
    compliance: &'a ComplianceCheck,
}

#[derive(Serialize)]
struct SafeResponse {
    response: String,
}

pub fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Generate { context, presale } => run_generate(&config, context, presale),
        Commands::Reply { text, context } => run_reply(&config, &text, context),
        Commands::Check {
            text,
            event,
            presale,
        } => {
            let checker = config.build_checker(&config.load_corpus()?);
            let check_context = CheckContext {
                event_type: event,
                presale_mode: presale,
            };
            print_json(&checker.check_content(&text, Some(&check_context)))
        }
        Commands::Respond { message } => {
            let checker = config.build_checker(&config.load_corpus()?);
            print_json(&SafeResponse {
                response: checker.generate_safe_response(&message),
            })
        }
        Commands::Audit { file: Some(path) } => {
            let entries = read_audit_log(&path)
                .with_context(|| format!("Failed to read audit log {}", path.display()))?;
            print_json(&entries)
        }
        Commands::Audit { file: None } => {
            let entries = config.audit_entries().with_context(|| {
                format!("Failed to read audit log {}", config.audit_log_path().display())
            })?;
            print_json(&entries)
        }
    }
}

fn run_generate(config: &Config, args: ContextArgs, presale: PresaleArgs) -> Result<()> {
    let corpus = config.load_corpus()?;
    let checker = config.build_checker(&corpus);
    let generator = config
        .build_generator(corpus)
        .context("Persona corpus failed validation")?;

    let mut context = post_context(args);
    if !presale.is_empty() {
        context.presale_data = Some(PresaleData {
            start_time: presale.start_time,
            rate: presale.rate,
            wallet: presale.wallet,
            website: presale.website,
        });
    }

    let post = generator.generate_post(&context);
    let compliance = match (&context.presale_data, context.is_presale()) {
        (Some(data), true) => checker.validate_presale_post(&post.text, data),
        _ => checker.check_content(&post.text, Some(&CheckContext::from(&context))),
    };
    info!(
        template = %post.template,
        passed = compliance.passed,
        requires_approval = compliance.requires_approval,
        "post ready for review"
    );

    print_json(&Review {
        post: &post,
        compliance: &compliance,
    })
}

fn run_reply(config: &Config, text: &str, args: ContextArgs) -> Result<()> {
    let corpus = config.load_corpus()?;
    let checker = config.build_checker(&corpus);
    let generator = config
        .build_generator(corpus)
        .context("Persona corpus failed validation")?;

    let context = post_context(args);
    let post = generator.generate_reply(text, &context);
    let compliance = checker.check_content(&post.text, Some(&CheckContext::from(&context)));

    print_json(&Review {
        post: &post,
        compliance: &compliance,
    })
}

fn post_context(args: ContextArgs) -> PostContext {
    PostContext {
        event_type: args.event.map(Into::into),
        tx_hash: args.tx_hash,
        presale_mode: args.presale_mode,
        seed: args.seed,
        ..PostContext::default()
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{rendered}");
    Ok(())
}
