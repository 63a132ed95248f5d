// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

// In-memory stand-ins for the AWS clients. Every call is appended to a
// shared `CallLog` so tests can assert on the order of calls across both
// clients.

use crate::{
    ecs_utils::{EcsApi, ServiceDetail, ServiceStatus, TaskDefinitionArn},
    elb_utils::{
        ElbApi, ListenerArn, ListenerDetail, ListenerProtocol, LoadBalancerArn, RuleArn,
        RuleDetail, TargetGroupArn, TargetGroupDetail,
    },
    orchestrator::{OrchError, OrchResult},
};
use std::{
    collections::{HashMap, VecDeque},
    io,
    sync::{Arc, Mutex},
};
use tracing::subscriber::DefaultGuard;

#[derive(Clone, Debug, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn record(&self, call: String) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

// Collects the formatted tracing output of the current thread while the
// returned guard is alive.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn install() -> (Self, DefaultGuard) {
        let capture = LogCapture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_level(false)
            .with_target(false)
            .with_writer(move || writer.clone())
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn lines(&self) -> Vec<String> {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .map(|line| line.trim().to_string())
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn target_group(name: &str, load_balancer_arns: &[&str]) -> TargetGroupDetail {
    TargetGroupDetail {
        arn: TargetGroupArn::from(format!("arn:tg/{name}")),
        name: name.to_string(),
        load_balancer_arns: load_balancer_arns
            .iter()
            .map(|arn| LoadBalancerArn::from(*arn))
            .collect(),
    }
}

pub fn listener(arn: &str, protocol: ListenerProtocol, port: i32) -> ListenerDetail {
    ListenerDetail {
        arn: ListenerArn::from(arn),
        protocol,
        port: Some(port),
    }
}

pub fn rule(arn: &str, priority: &str, target_group_arns: &[&str]) -> RuleDetail {
    RuleDetail::new(
        RuleArn::from(arn),
        priority.to_string(),
        false,
        target_group_arns.iter().copied(),
    )
}

pub fn default_rule(arn: &str, target_group_arns: &[&str]) -> RuleDetail {
    RuleDetail::new(
        RuleArn::from(arn),
        "default".to_string(),
        true,
        target_group_arns.iter().copied(),
    )
}

pub fn service(name: &str, status: ServiceStatus, desired: i32, running: i32) -> ServiceDetail {
    ServiceDetail {
        name: name.to_string(),
        status,
        desired_count: desired,
        running_count: running,
        pending_count: 0,
        deployment_count: 1,
        task_definition_arn: Some(TaskDefinitionArn::from(format!(
            "arn:task-definition/{name}:7"
        ))),
        deployment_configuration: Some(crate::ecs_utils::DeploymentConfig {
            maximum_percent: Some(200),
            minimum_healthy_percent: Some(100),
        }),
    }
}

#[derive(Default)]
pub struct FakeElb {
    log: CallLog,
    target_groups: Vec<TargetGroupDetail>,
    listeners: HashMap<LoadBalancerArn, Vec<ListenerDetail>>,
    rules: HashMap<ListenerArn, Vec<RuleDetail>>,
}

impl FakeElb {
    pub fn new(log: &CallLog) -> Self {
        FakeElb {
            log: log.clone(),
            ..Default::default()
        }
    }

    pub fn with_target_group(mut self, target_group: TargetGroupDetail) -> Self {
        self.target_groups.push(target_group);
        self
    }

    pub fn with_listeners(
        mut self,
        load_balancer_arn: &str,
        listeners: Vec<ListenerDetail>,
    ) -> Self {
        self.listeners
            .insert(LoadBalancerArn::from(load_balancer_arn), listeners);
        self
    }

    pub fn with_rules(mut self, listener_arn: &str, rules: Vec<RuleDetail>) -> Self {
        self.rules.insert(ListenerArn::from(listener_arn), rules);
        self
    }
}

impl ElbApi for FakeElb {
    async fn describe_target_groups(&self, name: &str) -> OrchResult<Vec<TargetGroupDetail>> {
        self.log.record(format!("describe_target_groups {name}"));
        let matching: Vec<_> = self
            .target_groups
            .iter()
            .filter(|target_group| target_group.name == name)
            .cloned()
            .collect();
        if matching.is_empty() {
            return Err(OrchError::TargetGroupNotFound {
                dbg: name.to_string(),
            });
        }
        Ok(matching)
    }

    async fn describe_listeners(
        &self,
        load_balancer_arn: &LoadBalancerArn,
    ) -> OrchResult<Vec<ListenerDetail>> {
        self.log
            .record(format!("describe_listeners {load_balancer_arn}"));
        Ok(self
            .listeners
            .get(load_balancer_arn)
            .cloned()
            .unwrap_or_default())
    }

    async fn describe_rules(&self, listener_arn: &ListenerArn) -> OrchResult<Vec<RuleDetail>> {
        self.log.record(format!("describe_rules {listener_arn}"));
        Ok(self.rules.get(listener_arn).cloned().unwrap_or_default())
    }

    async fn delete_rule(&self, rule_arn: &RuleArn) -> OrchResult<()> {
        self.log.record(format!("delete_rule {rule_arn}"));
        Ok(())
    }

    async fn delete_target_group(&self, target_group_arn: &TargetGroupArn) -> OrchResult<()> {
        self.log
            .record(format!("delete_target_group {target_group_arn}"));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeEcs {
    log: CallLog,
    // Successive `describe_service` responses. The last one repeats.
    services: Mutex<VecDeque<Option<ServiceDetail>>>,
    task_definitions: Vec<TaskDefinitionArn>,
    update_err: Mutex<Option<OrchError>>,
    delete_err: Mutex<Option<OrchError>>,
    list_err: Mutex<Option<OrchError>>,
    deregister_err: Mutex<Option<OrchError>>,
}

impl FakeEcs {
    pub fn new(log: &CallLog) -> Self {
        FakeEcs {
            log: log.clone(),
            ..Default::default()
        }
    }

    pub fn with_describe(self, service: Option<ServiceDetail>) -> Self {
        self.services.lock().unwrap().push_back(service);
        self
    }

    pub fn with_task_definitions(mut self, arns: &[&str]) -> Self {
        self.task_definitions = arns.iter().map(|arn| TaskDefinitionArn::from(*arn)).collect();
        self
    }

    pub fn fail_update(self, err: OrchError) -> Self {
        *self.update_err.lock().unwrap() = Some(err);
        self
    }

    pub fn fail_delete(self, err: OrchError) -> Self {
        *self.delete_err.lock().unwrap() = Some(err);
        self
    }

    pub fn fail_list(self, err: OrchError) -> Self {
        *self.list_err.lock().unwrap() = Some(err);
        self
    }

    pub fn fail_deregister(self, err: OrchError) -> Self {
        *self.deregister_err.lock().unwrap() = Some(err);
        self
    }

    fn take(err: &Mutex<Option<OrchError>>) -> OrchResult<()> {
        match err.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl EcsApi for FakeEcs {
    async fn describe_service(
        &self,
        cluster: &str,
        service: &str,
    ) -> OrchResult<Option<ServiceDetail>> {
        self.log
            .record(format!("describe_services {cluster}/{service}"));
        let mut services = self.services.lock().unwrap();
        let detail = if services.len() > 1 {
            services.pop_front().flatten()
        } else {
            services.front().cloned().flatten()
        };
        Ok(detail)
    }

    async fn update_desired_count(
        &self,
        _cluster: &str,
        service: &str,
        desired_count: i32,
    ) -> OrchResult<()> {
        self.log
            .record(format!("update_service {service} desired_count={desired_count}"));
        Self::take(&self.update_err)
    }

    async fn delete_service(&self, _cluster: &str, service: &str) -> OrchResult<()> {
        self.log.record(format!("delete_service {service}"));
        Self::take(&self.delete_err)
    }

    async fn list_task_definitions(&self, family: &str) -> OrchResult<Vec<TaskDefinitionArn>> {
        self.log.record(format!("list_task_definitions {family}"));
        Self::take(&self.list_err)?;
        Ok(self.task_definitions.clone())
    }

    async fn deregister_task_definition(&self, arn: &TaskDefinitionArn) -> OrchResult<()> {
        self.log
            .record(format!("deregister_task_definition {arn}"));
        Self::take(&self.deregister_err)
    }
}
