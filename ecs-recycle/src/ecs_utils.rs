// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

mod client;
mod service;
mod task_definition;
mod types;

pub use client::EcsApi;
pub use service::{delete_service, stop_service, wait_services_stable};
pub use task_definition::{deregister_task_definition, latest_active_task_definition};
pub use types::{
    DeploymentConfig, RemovedService, ServiceDetail, ServiceStatus, TaskDefinitionArn, WaitPolicy,
};
