// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    ecs_utils::types::{DeploymentConfig, ServiceDetail, ServiceStatus, TaskDefinitionArn},
    orchestrator::{OrchError, OrchResult},
};
use aws_sdk_ecs as ecs;
use ecs::{
    error::DisplayErrorContext,
    types::{Service, SortOrder, TaskDefinitionStatus},
};
use tracing::debug;

// The container orchestration control plane calls needed to stop and remove
// a service.
#[allow(async_fn_in_trait)]
pub trait EcsApi {
    // `None` when the cluster has no service by that name.
    async fn describe_service(
        &self,
        cluster: &str,
        service: &str,
    ) -> OrchResult<Option<ServiceDetail>>;

    async fn update_desired_count(
        &self,
        cluster: &str,
        service: &str,
        desired_count: i32,
    ) -> OrchResult<()>;

    async fn delete_service(&self, cluster: &str, service: &str) -> OrchResult<()>;

    // ACTIVE task definitions in the family, newest revision first.
    async fn list_task_definitions(&self, family: &str) -> OrchResult<Vec<TaskDefinitionArn>>;

    async fn deregister_task_definition(&self, arn: &TaskDefinitionArn) -> OrchResult<()>;
}

impl EcsApi for ecs::Client {
    async fn describe_service(
        &self,
        cluster: &str,
        service: &str,
    ) -> OrchResult<Option<ServiceDetail>> {
        let output = self
            .describe_services()
            .cluster(cluster)
            .services(service)
            .send()
            .await
            .map_err(|err| OrchError::Ecs {
                dbg: format!(
                    "Failed to describe service {service} in {cluster}: {}",
                    DisplayErrorContext(&err)
                ),
            })?;

        for failure in output.failures() {
            // a service which doesn't exist is reported as a failure with
            // reason MISSING rather than an error
            debug!(
                "describe_services failure: {:?} {:?}",
                failure.arn(),
                failure.reason()
            );
        }

        output.services().first().map(service_detail).transpose()
    }

    async fn update_desired_count(
        &self,
        cluster: &str,
        service: &str,
        desired_count: i32,
    ) -> OrchResult<()> {
        self.update_service()
            .cluster(cluster)
            .service(service)
            .desired_count(desired_count)
            .send()
            .await
            .map_err(|err| {
                let dbg = format!(
                    "Failed to update service {service} in {cluster}: {}",
                    DisplayErrorContext(&err)
                );
                match err.as_service_error() {
                    Some(err) if err.is_invalid_parameter_exception() => {
                        OrchError::InvalidParameter { dbg }
                    }
                    Some(err) if err.is_service_not_found_exception() => {
                        OrchError::ServiceNotFound { dbg }
                    }
                    _ => OrchError::Ecs { dbg },
                }
            })?;
        Ok(())
    }

    async fn delete_service(&self, cluster: &str, service: &str) -> OrchResult<()> {
        self.delete_service()
            .cluster(cluster)
            .service(service)
            .send()
            .await
            .map_err(|err| {
                let dbg = format!(
                    "Failed to delete service {service} in {cluster}: {}",
                    DisplayErrorContext(&err)
                );
                match err.as_service_error() {
                    Some(err) if err.is_service_not_found_exception() => {
                        OrchError::ServiceNotFound { dbg }
                    }
                    _ => OrchError::Ecs { dbg },
                }
            })?;
        Ok(())
    }

    async fn list_task_definitions(&self, family: &str) -> OrchResult<Vec<TaskDefinitionArn>> {
        let output = self
            .list_task_definitions()
            .family_prefix(family)
            .status(TaskDefinitionStatus::Active)
            .sort(SortOrder::Desc)
            .send()
            .await
            .map_err(|err| {
                let dbg = format!(
                    "Failed to list task definitions for {family}: {}",
                    DisplayErrorContext(&err)
                );
                match err.as_service_error() {
                    Some(err) if err.is_client_exception() => OrchError::EcsClient { dbg },
                    _ => OrchError::Ecs { dbg },
                }
            })?;

        Ok(output
            .task_definition_arns()
            .iter()
            .map(|arn| TaskDefinitionArn::from(arn.as_str()))
            .collect())
    }

    async fn deregister_task_definition(&self, arn: &TaskDefinitionArn) -> OrchResult<()> {
        self.deregister_task_definition()
            .task_definition(arn.as_str())
            .send()
            .await
            .map_err(|err| {
                let dbg = format!(
                    "Failed to deregister task definition {arn}: {}",
                    DisplayErrorContext(&err)
                );
                match err.as_service_error() {
                    Some(err) if err.is_client_exception() => OrchError::EcsClient { dbg },
                    _ => OrchError::Ecs { dbg },
                }
            })?;
        Ok(())
    }
}

fn service_detail(service: &Service) -> OrchResult<ServiceDetail> {
    let name = service.service_name().ok_or(OrchError::Ecs {
        dbg: "Couldn't find service name".to_string(),
    })?;
    let status = service.status().ok_or(OrchError::Ecs {
        dbg: format!("Couldn't find status for service {name}"),
    })?;

    Ok(ServiceDetail {
        name: name.to_string(),
        status: ServiceStatus::from(status),
        desired_count: service.desired_count(),
        running_count: service.running_count(),
        pending_count: service.pending_count(),
        deployment_count: service.deployments().len(),
        task_definition_arn: service.task_definition().map(TaskDefinitionArn::from),
        deployment_configuration: service.deployment_configuration().map(|config| {
            DeploymentConfig {
                maximum_percent: config.maximum_percent(),
                minimum_healthy_percent: config.minimum_healthy_percent(),
            }
        }),
    })
}
