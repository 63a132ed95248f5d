// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    ecs_utils::{EcsApi, TaskDefinitionArn},
    orchestrator::{OrchError, OrchResult, RecycleConfig},
};
use tracing::error;

/// The newest ACTIVE revision in the configured task definition family.
pub async fn latest_active_task_definition<C: EcsApi>(
    ecs: &C,
    config: &RecycleConfig,
) -> OrchResult<Option<TaskDefinitionArn>> {
    let family = config.task_definition_family();
    match ecs.list_task_definitions(family).await {
        Ok(arns) => {
            let latest = arns.into_iter().next();
            if latest.is_none() {
                progress!("No active task definition found for family {family}.");
            }
            Ok(latest)
        }
        Err(OrchError::EcsClient { dbg }) => {
            println!("An error occurred fetching the task definition for family {family}: {dbg}.");
            error!("An error occurred fetching the task definition for family {family}: {dbg}.");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Deregister the task definition a deleted service was running.
///
/// Returns whether the task definition was deregistered. A `ClientException`
/// is logged rather than returned.
pub async fn deregister_task_definition<C: EcsApi>(
    ecs: &C,
    arn: Option<&TaskDefinitionArn>,
) -> OrchResult<bool> {
    let Some(arn) = arn else {
        progress!("No task definition to deregister");
        return Ok(false);
    };

    match ecs.deregister_task_definition(arn).await {
        Ok(()) => {
            progress!("Task definition {arn} deregistered successfully!");
            Ok(true)
        }
        Err(OrchError::EcsClient { dbg }) => {
            println!("An error occurred deregistering the task definition {arn}: {dbg}.");
            error!("An error occurred deregistering the task definition {arn}: {dbg}.");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}
