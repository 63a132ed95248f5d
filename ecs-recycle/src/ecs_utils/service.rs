// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    ecs_utils::{EcsApi, RemovedService, ServiceStatus, WaitPolicy},
    orchestrator::{OrchError, OrchResult, RecycleConfig, STATE},
};
use core::task::Poll;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

/// Scale an ACTIVE service down to zero tasks and wait for it to settle.
///
/// Returns `false` without touching the service when it is missing or not
/// ACTIVE. A rejected update, or one for a service removed in the meantime, is
/// logged and also returns `false`. Running out of wait attempts is an error.
pub async fn stop_service<C: EcsApi>(
    ecs: &C,
    config: &RecycleConfig,
    policy: &WaitPolicy,
) -> OrchResult<bool> {
    let (cluster, service) = (config.cluster(), config.service());
    progress!("Stopping service {service}...");

    let Some(detail) = ecs.describe_service(cluster, service).await? else {
        progress!("Service '{service}' not found in cluster '{cluster}'");
        return Ok(false);
    };
    debug!("{}", detail);

    if detail.status != ServiceStatus::Active {
        progress!(
            "Unable to stop service {service} because it is not ACTIVE (status: {})",
            detail.status
        );
        return Ok(false);
    }

    progress!(
        "Updating service {service} to {} tasks...",
        STATE.stopped_desired_count
    );
    match ecs
        .update_desired_count(cluster, service, STATE.stopped_desired_count)
        .await
    {
        Ok(()) => {}
        Err(OrchError::InvalidParameter { dbg }) => {
            println!("Error stopping service: {dbg}");
            error!("Error stopping service: {dbg}");
            return Ok(false);
        }
        Err(OrchError::ServiceNotFound { dbg }) => {
            debug!("{dbg}");
            progress!("Service '{service}' not found in cluster '{cluster}'");
            return Ok(false);
        }
        Err(err) => return Err(err),
    }

    progress!("Waiting for the service tasks to stop...");
    wait_services_stable(ecs, cluster, service, policy).await?;
    progress!("Service {service} stopped successfully!");
    Ok(true)
}

/// Poll the service until it reports a single deployment with every desired
/// task running.
///
/// The service is described up to `policy.max_attempts` times with
/// `policy.delay` between attempts.
pub async fn wait_services_stable<C: EcsApi>(
    ecs: &C,
    cluster: &str,
    service: &str,
    policy: &WaitPolicy,
) -> OrchResult<()> {
    let bar = get_progress_bar(policy);
    bar.set_message(service.to_string());

    for attempt in 1..=policy.max_attempts {
        let poll = poll_services_stable(ecs, cluster, service).await;
        bar.set_position(attempt as u64);

        match poll {
            Ok(Poll::Ready(())) => {
                bar.finish();
                return Ok(());
            }
            Ok(Poll::Pending) => {}
            Err(err) => {
                bar.abandon();
                return Err(err);
            }
        }

        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.delay).await;
        }
    }

    bar.abandon();
    Err(OrchError::WaitTimeout {
        dbg: format!(
            "service {service} not stable after {} attempts",
            policy.max_attempts
        ),
    })
}

async fn poll_services_stable<C: EcsApi>(
    ecs: &C,
    cluster: &str,
    service: &str,
) -> OrchResult<Poll<()>> {
    // the same failure states as the `services_stable` waiter
    let Some(detail) = ecs.describe_service(cluster, service).await? else {
        return Err(OrchError::WaitTimeout {
            dbg: format!("service {service} is MISSING"),
        });
    };
    if matches!(
        detail.status,
        ServiceStatus::Draining | ServiceStatus::Inactive
    ) {
        return Err(OrchError::WaitTimeout {
            dbg: format!("service {service} is {}", detail.status),
        });
    }

    debug!("{}", detail);
    if detail.is_stable() {
        Ok(Poll::Ready(()))
    } else {
        Ok(Poll::Pending)
    }
}

fn get_progress_bar(policy: &WaitPolicy) -> ProgressBar {
    let bar = ProgressBar::new(policy.max_attempts as u64);
    let style = ProgressStyle::with_template(
        "{spinner} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}/{len:3} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");
    bar.set_style(style);
    bar
}

/// Delete the service, returning the task definition and deployment
/// configuration it was running with.
///
/// A service that doesn't exist, or is already INACTIVE, yields an empty
/// `RemovedService`.
pub async fn delete_service<C: EcsApi>(
    ecs: &C,
    config: &RecycleConfig,
) -> OrchResult<RemovedService> {
    let (cluster, service) = (config.cluster(), config.service());

    let detail = match ecs.describe_service(cluster, service).await? {
        Some(detail) if detail.status != ServiceStatus::Inactive => detail,
        _ => {
            progress!("Service '{service}' not found in cluster '{cluster}'");
            return Ok(RemovedService::default());
        }
    };
    let removed = RemovedService {
        task_definition_arn: detail.task_definition_arn,
        deployment_configuration: detail.deployment_configuration,
    };

    progress!("Deleting service '{service}' in cluster '{cluster}'...");
    match ecs.delete_service(cluster, service).await {
        Ok(()) => {}
        Err(OrchError::ServiceNotFound { dbg }) => {
            debug!("{dbg}");
            progress!("Service {service} was not found.");
            return Ok(RemovedService::default());
        }
        Err(err) => return Err(err),
    }

    progress!("Service {service} deleted successfully!");
    debug!("{:?}", removed);
    Ok(removed)
}
