//! Mirror command - Copy a whole Drive folder tree by name
//!
//! `drivemirror mirror <DRIVE_FOLDER_NAME> <GCS_BUCKET>` looks the folder up
//! by exact name and recreates its subtree under the destination prefix.
//! A folder that does not exist is reported and exits 0; failures of single
//! files are isolated and summarized unless `--on-error fail-fast` is given.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use tracing::info;

use drivemirror_core::config::Config;
use drivemirror_core::domain::{BucketName, CopyError, WalkMode};
use drivemirror_core::usecases::CopyReport;

use super::{
    build_use_case, console_observer, finish, validate_config, CopyArgs, OnAmbiguous, RunContext,
    TokenArgs,
};
use crate::output::get_formatter;

#[derive(Debug, Args)]
pub struct MirrorCommand {
    /// Exact name of the Drive folder to copy
    pub folder_name: String,

    /// Destination bucket
    pub bucket: String,

    /// What to do when several folders have this name
    #[arg(long, value_enum)]
    pub on_ambiguous: Option<OnAmbiguous>,

    /// Path inside the bucket under which the tree is recreated
    #[arg(long)]
    pub dest_prefix: Option<String>,

    #[command(flatten)]
    pub copy: CopyArgs,

    #[command(flatten)]
    pub tokens: TokenArgs,
}

impl MirrorCommand {
    pub async fn execute(&self, ctx: &RunContext) -> Result<ExitCode> {
        let config = self.effective_config(&ctx.config);
        validate_config(&config, &ctx.config_path)?;

        let formatter = get_formatter(ctx.format.is_json());
        let outcome = self.run(ctx, &config).await;
        Ok(finish(&*formatter, ctx.format, WalkMode::Recursive, outcome))
    }

    /// The loaded config with `--dest-prefix` applied, so the prefix is
    /// validated like a configured one
    fn effective_config(&self, config: &Config) -> Config {
        let mut config = config.clone();
        if let Some(prefix) = &self.dest_prefix {
            config.copy.destination_prefix = prefix.clone();
        }
        config
    }

    async fn run(
        &self,
        ctx: &RunContext,
        config: &Config,
    ) -> Result<(BucketName, CopyReport), CopyError> {
        let tokens = self.tokens.resolve()?;
        let bucket = BucketName::new(self.bucket.clone())?;

        let mut options = config.copy_options(WalkMode::Recursive);
        self.copy.apply(&mut options);
        if let Some(on_ambiguous) = self.on_ambiguous {
            options.ambiguity = on_ambiguous.into();
        }

        info!(folder = %self.folder_name, bucket = %bucket, "Running mirror copy");

        let use_case = build_use_case(config, tokens, console_observer(ctx));
        let report = use_case
            .copy_recursive(&self.folder_name, &bucket, &options)
            .await?;
        Ok((bucket, report))
    }
}
