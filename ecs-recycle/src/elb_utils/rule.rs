// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    elb_utils::{describe_target_group, find_listener, ElbApi, ListenerArn, RuleArn, TargetGroupArn},
    orchestrator::{OrchResult, RecycleConfig},
};
use tracing::debug;

/// ARNs of the listener rules forwarding to `target_group_arn`.
///
/// The default rule is never returned since it can't be deleted.
pub async fn rule_arns_for_target_group<E: ElbApi>(
    elb: &E,
    listener_arn: &ListenerArn,
    target_group_arn: &TargetGroupArn,
) -> OrchResult<Vec<RuleArn>> {
    let rules = elb.describe_rules(listener_arn).await?;
    let rule_arns = rules
        .into_iter()
        .filter(|rule| rule.forwards_to(target_group_arn))
        .filter(|rule| {
            if rule.is_default {
                debug!("skipping default rule {}", rule.arn);
            }
            !rule.is_default
        })
        .map(|rule| rule.arn)
        .collect();
    Ok(rule_arns)
}

/// Priorities of every rule on the listener, in listener order.
pub async fn rule_priorities<E: ElbApi>(
    elb: &E,
    listener_arn: &ListenerArn,
) -> OrchResult<Vec<String>> {
    let rules = elb.describe_rules(listener_arn).await?;
    Ok(rules.into_iter().map(|rule| rule.priority).collect())
}

pub async fn delete_alb_rules<E: ElbApi>(elb: &E, config: &RecycleConfig) -> OrchResult<usize> {
    let Some(target_group) = describe_target_group(elb, config.target_group()).await? else {
        progress!("Target group not found, no rules to delete");
        return Ok(0);
    };

    let Some(listener) = find_listener(elb, &target_group).await? else {
        progress!("No listener found, no rules to delete");
        return Ok(0);
    };

    let rule_arns = rule_arns_for_target_group(elb, &listener.arn, &target_group.arn).await?;
    if rule_arns.is_empty() {
        progress!("No rule associated with the load balancer");
        return Ok(0);
    }

    for rule_arn in rule_arns.iter() {
        elb.delete_rule(rule_arn).await?;
        progress!("Load balancer rule {rule_arn} deleted successfully!");
    }

    Ok(rule_arns.len())
}
