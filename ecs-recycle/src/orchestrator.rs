// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{ecs_utils, ecs_utils::EcsApi, elb_utils, elb_utils::ElbApi};
use tracing::debug;

mod cli;
mod error;
mod state;

pub use cli::{Cli, RecycleConfig};
pub use error::{OrchError, OrchResult};
pub use state::STATE;

// The teardown steps, in the order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    StopService,
    DeleteService,
    DeregisterTaskDefinition,
    DeleteAlbRules,
    DeleteTargetGroup,
}

impl Step {
    pub fn as_str(&self) -> &str {
        match self {
            Step::StopService => "stop_service",
            Step::DeleteService => "delete_service",
            Step::DeregisterTaskDefinition => "deregister_task_definition",
            Step::DeleteAlbRules => "delete_alb_rules",
            Step::DeleteTargetGroup => "delete_target_group",
        }
    }

    fn start(&self) {
        progress!("Start: {}", self.as_str());
    }
}

/// Tear down the configured service and its load balancer routing.
///
/// Every step runs regardless of what the previous one found. Only errors
/// the steps don't handle themselves are returned, and they end the run.
pub async fn run<E: ElbApi, C: EcsApi>(
    config: &RecycleConfig,
    elb: &E,
    ecs: &C,
) -> OrchResult<()> {
    debug!("{:?}", config);

    Step::StopService.start();
    let stopped = ecs_utils::stop_service(ecs, config, &STATE.services_stable).await?;

    Step::DeleteService.start();
    let removed = ecs_utils::delete_service(ecs, config).await?;

    Step::DeregisterTaskDefinition.start();
    let deregistered =
        ecs_utils::deregister_task_definition(ecs, removed.task_definition_arn.as_ref()).await?;

    Step::DeleteAlbRules.start();
    let rules_deleted = elb_utils::delete_alb_rules(elb, config).await?;

    Step::DeleteTargetGroup.start();
    let target_group_deleted = elb_utils::delete_target_group(elb, config).await?;

    progress!(
        "Finished recycling {}: stopped: {} service_deleted: {} task_definition_deregistered: {} rules_deleted: {} target_group_deleted: {}",
        config.service(),
        stopped,
        removed.task_definition_arn.is_some(),
        deregistered,
        rules_deleted,
        target_group_deleted
    );
    Ok(())
}
