// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use aws_config::BehaviorVersion;
use aws_types::region::Region;
use clap::Parser;
use ecs_recycle::{
    orchestrator::{self, STATE},
    OrchResult,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> OrchResult<()> {
    let config = orchestrator::Cli::parse().process_config_file()?;

    let unique_id = format!(
        "{}-{}",
        humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
        config.service()
    );

    let file_appender =
        tracing_appender::rolling::daily(STATE.log_dir, STATE.log_file_prefix(&unique_id));
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(non_blocking)
        .init();
    tracing::info!("ecs-recycle {} run: {}", STATE.version, unique_id);

    let region = Region::new(config.region().to_string());
    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await;
    let elb_client = aws_sdk_elasticloadbalancingv2::Client::new(&aws_config);
    let ecs_client = aws_sdk_ecs::Client::new(&aws_config);

    orchestrator::run(&config, &elb_client, &ecs_client).await
}
