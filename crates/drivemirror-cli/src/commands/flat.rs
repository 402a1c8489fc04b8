//! Flat command - Copy the files directly inside one Drive folder
//!
//! `drivemirror flat <DRIVE_FOLDER_ID> <GCS_BUCKET>` checks that the bucket
//! exists, then copies every transferable file in the folder to the bucket
//! root. Subfolders are skipped. Any fatal error exits with status 1.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use tracing::info;

use drivemirror_core::domain::{BucketName, CopyError, RemoteId, WalkMode};
use drivemirror_core::usecases::CopyReport;

use super::{
    build_use_case, console_observer, finish, validate_config, CopyArgs, RunContext, TokenArgs,
};
use crate::output::get_formatter;

#[derive(Debug, Args)]
pub struct FlatCommand {
    /// ID of the Drive folder to copy
    pub folder_id: String,

    /// Destination bucket
    pub bucket: String,

    #[command(flatten)]
    pub copy: CopyArgs,

    #[command(flatten)]
    pub tokens: TokenArgs,
}

impl FlatCommand {
    pub async fn execute(&self, ctx: &RunContext) -> Result<ExitCode> {
        validate_config(&ctx.config, &ctx.config_path)?;

        let formatter = get_formatter(ctx.format.is_json());
        let outcome = self.run(ctx).await;
        Ok(finish(&*formatter, ctx.format, WalkMode::Flat, outcome))
    }

    async fn run(&self, ctx: &RunContext) -> Result<(BucketName, CopyReport), CopyError> {
        let tokens = self.tokens.resolve()?;
        let folder_id = RemoteId::new(self.folder_id.clone())?;
        let bucket = BucketName::new(self.bucket.clone())?;

        let mut options = ctx.config.copy_options(WalkMode::Flat);
        self.copy.apply(&mut options);

        info!(folder_id = %folder_id, bucket = %bucket, "Running flat copy");

        let use_case = build_use_case(&ctx.config, tokens, console_observer(ctx));
        let report = use_case.copy_flat(&folder_id, &bucket, &options).await?;
        Ok((bucket, report))
    }
}
