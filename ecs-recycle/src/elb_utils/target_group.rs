// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    elb_utils::{ElbApi, TargetGroupDetail},
    orchestrator::{OrchError, OrchResult, RecycleConfig},
};
use tracing::debug;

/// Look up a target group by name.
///
/// A missing target group is a normal outcome and resolves to `None`. If the
/// name matches more than one target group the first is returned.
pub async fn describe_target_group<E: ElbApi>(
    elb: &E,
    name: &str,
) -> OrchResult<Option<TargetGroupDetail>> {
    match elb.describe_target_groups(name).await {
        Ok(target_groups) => {
            let target_group = target_groups.into_iter().next();
            if let Some(target_group) = &target_group {
                progress!("Found target group {}", target_group.name);
                debug!("{:?}", target_group);
            }
            Ok(target_group)
        }
        Err(OrchError::TargetGroupNotFound { .. }) => {
            progress!("Target group {name} not found.");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

pub async fn delete_target_group<E: ElbApi>(elb: &E, config: &RecycleConfig) -> OrchResult<bool> {
    let Some(target_group) = describe_target_group(elb, config.target_group()).await? else {
        progress!("Target group not found, nothing to delete");
        return Ok(false);
    };

    elb.delete_target_group(&target_group.arn).await?;
    progress!("Target group {} deleted successfully!", target_group.arn);
    Ok(true)
}
