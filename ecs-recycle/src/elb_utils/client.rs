// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    elb_utils::types::{
        ListenerArn, ListenerDetail, ListenerProtocol, LoadBalancerArn, RuleArn, RuleDetail,
        TargetGroupArn, TargetGroupDetail,
    },
    orchestrator::{OrchError, OrchResult},
};
use aws_sdk_elasticloadbalancingv2 as elbv2;
use elbv2::{
    error::DisplayErrorContext,
    types::{Listener, Rule, TargetGroup},
};
use tracing::trace;

// The load balancer control plane calls needed to remove the routing for a
// service.
#[allow(async_fn_in_trait)]
pub trait ElbApi {
    // Resolves to `OrchError::TargetGroupNotFound` when no target group has
    // the name.
    async fn describe_target_groups(&self, name: &str) -> OrchResult<Vec<TargetGroupDetail>>;

    async fn describe_listeners(
        &self,
        load_balancer_arn: &LoadBalancerArn,
    ) -> OrchResult<Vec<ListenerDetail>>;

    // All rules on the listener, following pagination.
    async fn describe_rules(&self, listener_arn: &ListenerArn) -> OrchResult<Vec<RuleDetail>>;

    async fn delete_rule(&self, rule_arn: &RuleArn) -> OrchResult<()>;

    async fn delete_target_group(&self, target_group_arn: &TargetGroupArn) -> OrchResult<()>;
}

impl ElbApi for elbv2::Client {
    async fn describe_target_groups(&self, name: &str) -> OrchResult<Vec<TargetGroupDetail>> {
        let output = self
            .describe_target_groups()
            .names(name)
            .send()
            .await
            .map_err(|err| {
                let not_found = err
                    .as_service_error()
                    .map(|err| err.is_target_group_not_found_exception())
                    .unwrap_or(false);
                if not_found {
                    OrchError::TargetGroupNotFound {
                        dbg: name.to_string(),
                    }
                } else {
                    OrchError::Elb {
                        dbg: format!(
                            "Failed to describe target group {name}: {}",
                            DisplayErrorContext(&err)
                        ),
                    }
                }
            })?;

        output
            .target_groups()
            .iter()
            .map(target_group_detail)
            .collect()
    }

    async fn describe_listeners(
        &self,
        load_balancer_arn: &LoadBalancerArn,
    ) -> OrchResult<Vec<ListenerDetail>> {
        let output = self
            .describe_listeners()
            .load_balancer_arn(load_balancer_arn.as_str())
            .send()
            .await
            .map_err(|err| OrchError::Elb {
                dbg: format!(
                    "Failed to describe listeners for {load_balancer_arn}: {}",
                    DisplayErrorContext(&err)
                ),
            })?;

        output.listeners().iter().map(listener_detail).collect()
    }

    async fn describe_rules(&self, listener_arn: &ListenerArn) -> OrchResult<Vec<RuleDetail>> {
        let mut rules = Vec::new();
        let mut marker = None;
        loop {
            let output = self
                .describe_rules()
                .listener_arn(listener_arn.as_str())
                .set_marker(marker)
                .send()
                .await
                .map_err(|err| OrchError::Elb {
                    dbg: format!(
                        "Failed to describe rules for {listener_arn}: {}",
                        DisplayErrorContext(&err)
                    ),
                })?;

            for rule in output.rules() {
                rules.push(rule_detail(rule)?);
            }

            marker = output.next_marker().map(|marker| marker.to_string());
            trace!("describe_rules next marker: {:?}", marker);
            if marker.is_none() {
                break;
            }
        }

        Ok(rules)
    }

    async fn delete_rule(&self, rule_arn: &RuleArn) -> OrchResult<()> {
        self.delete_rule()
            .rule_arn(rule_arn.as_str())
            .send()
            .await
            .map_err(|err| OrchError::Elb {
                dbg: format!(
                    "Failed to delete rule {rule_arn}: {}",
                    DisplayErrorContext(&err)
                ),
            })?;
        Ok(())
    }

    async fn delete_target_group(&self, target_group_arn: &TargetGroupArn) -> OrchResult<()> {
        self.delete_target_group()
            .target_group_arn(target_group_arn.as_str())
            .send()
            .await
            .map_err(|err| OrchError::Elb {
                dbg: format!(
                    "Failed to delete target group {target_group_arn}: {}",
                    DisplayErrorContext(&err)
                ),
            })?;
        Ok(())
    }
}

fn target_group_detail(target_group: &TargetGroup) -> OrchResult<TargetGroupDetail> {
    let arn = target_group.target_group_arn().ok_or(OrchError::Elb {
        dbg: "Couldn't find target group arn".to_string(),
    })?;

    Ok(TargetGroupDetail {
        arn: TargetGroupArn::from(arn),
        name: target_group
            .target_group_name()
            .unwrap_or_default()
            .to_string(),
        load_balancer_arns: target_group
            .load_balancer_arns()
            .iter()
            .map(|arn| LoadBalancerArn::from(arn.as_str()))
            .collect(),
    })
}

fn listener_detail(listener: &Listener) -> OrchResult<ListenerDetail> {
    let arn = listener.listener_arn().ok_or(OrchError::Elb {
        dbg: "Couldn't find listener arn".to_string(),
    })?;

    Ok(ListenerDetail {
        arn: ListenerArn::from(arn),
        protocol: listener
            .protocol()
            .map(|protocol| ListenerProtocol::from(protocol.as_str()))
            .unwrap_or(ListenerProtocol::Other(String::new())),
        port: listener.port(),
    })
}

fn rule_detail(rule: &Rule) -> OrchResult<RuleDetail> {
    let arn = rule.rule_arn().ok_or(OrchError::Elb {
        dbg: "Couldn't find rule arn".to_string(),
    })?;

    // A forward action names its target group directly, or lists several in a
    // weighted forward config.
    let target_group_arns = rule.actions().iter().flat_map(|action| {
        let forward_config = action
            .forward_config()
            .map(|config| config.target_groups())
            .unwrap_or_default()
            .iter()
            .filter_map(|tuple| tuple.target_group_arn());
        action.target_group_arn().into_iter().chain(forward_config)
    });

    Ok(RuleDetail::new(
        RuleArn::from(arn),
        rule.priority().unwrap_or_default().to_string(),
        rule.is_default().unwrap_or(false),
        target_group_arns,
    ))
}
