// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

mod client;
mod listener;
mod rule;
mod target_group;
mod types;

pub use client::ElbApi;
pub use listener::{find_listener, select_listener};
pub use rule::{delete_alb_rules, rule_arns_for_target_group, rule_priorities};
pub use target_group::{delete_target_group, describe_target_group};
pub use types::{
    ListenerArn, ListenerDetail, ListenerProtocol, LoadBalancerArn, RuleArn, RuleDetail,
    TargetGroupArn, TargetGroupDetail,
};
