// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use core::time::Duration;

arn_new_types!(TaskDefinitionArn);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceStatus {
    Active,
    Draining,
    Inactive,
    Other(String),
}

impl From<&str> for ServiceStatus {
    fn from(value: &str) -> Self {
        match value {
            "ACTIVE" => ServiceStatus::Active,
            "DRAINING" => ServiceStatus::Draining,
            "INACTIVE" => ServiceStatus::Inactive,
            other => ServiceStatus::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceStatus::Active => write!(f, "ACTIVE"),
            ServiceStatus::Draining => write!(f, "DRAINING"),
            ServiceStatus::Inactive => write!(f, "INACTIVE"),
            ServiceStatus::Other(status) => write!(f, "{}", status),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub maximum_percent: Option<i32>,
    pub minimum_healthy_percent: Option<i32>,
}

// A snapshot of an ECS service as reported by `DescribeServices`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceDetail {
    pub name: String,
    pub status: ServiceStatus,
    pub desired_count: i32,
    pub running_count: i32,
    pub pending_count: i32,
    pub deployment_count: usize,
    pub task_definition_arn: Option<TaskDefinitionArn>,
    pub deployment_configuration: Option<DeploymentConfig>,
}

impl ServiceDetail {
    // Same acceptor as the `services_stable` waiter: a single deployment with
    // every desired task running.
    pub fn is_stable(&self) -> bool {
        self.deployment_count == 1 && self.running_count == self.desired_count
    }
}

impl std::fmt::Display for ServiceDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}): desired {} running {} pending {} deployments {}",
            self.name,
            self.status,
            self.desired_count,
            self.running_count,
            self.pending_count,
            self.deployment_count
        )
    }
}

// What is left of a service once it has been deleted. Both values are `None`
// when there was no service to delete.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemovedService {
    pub task_definition_arn: Option<TaskDefinitionArn>,
    pub deployment_configuration: Option<DeploymentConfig>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitPolicy {
    pub delay: Duration,
    pub max_attempts: u32,
}

impl WaitPolicy {
    // Total time spent sleeping if every attempt is used.
    pub fn max_wait(&self) -> Duration {
        self.delay * self.max_attempts.saturating_sub(1)
    }
}
