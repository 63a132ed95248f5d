// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

arn_new_types!(TargetGroupArn);
arn_new_types!(LoadBalancerArn);
arn_new_types!(ListenerArn);
arn_new_types!(RuleArn);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetGroupDetail {
    pub arn: TargetGroupArn,
    pub name: String,
    // Load balancers which route to this target group. Empty when the target
    // group is not attached.
    pub load_balancer_arns: Vec<LoadBalancerArn>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListenerProtocol {
    Http,
    Https,
    Other(String),
}

impl ListenerProtocol {
    pub fn as_str(&self) -> &str {
        match self {
            ListenerProtocol::Http => "HTTP",
            ListenerProtocol::Https => "HTTPS",
            ListenerProtocol::Other(protocol) => protocol,
        }
    }
}

impl From<&str> for ListenerProtocol {
    fn from(value: &str) -> Self {
        match value {
            "HTTP" => ListenerProtocol::Http,
            "HTTPS" => ListenerProtocol::Https,
            other => ListenerProtocol::Other(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListenerDetail {
    pub arn: ListenerArn,
    pub protocol: ListenerProtocol,
    pub port: Option<i32>,
}

impl std::fmt::Display for ListenerDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.port {
            Some(port) => write!(f, "{} ({}:{})", self.arn, self.protocol.as_str(), port),
            None => write!(f, "{} ({})", self.arn, self.protocol.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleDetail {
    pub arn: RuleArn,
    // "default" for the listener's default rule, otherwise a number
    pub priority: String,
    pub is_default: bool,
    // Every target group the rule's actions forward to, including weighted
    // forward configs.
    pub target_group_arns: Vec<TargetGroupArn>,
}

impl RuleDetail {
    pub fn new<'a>(
        arn: RuleArn,
        priority: String,
        is_default: bool,
        target_group_arns: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut arns: Vec<TargetGroupArn> = Vec::new();
        for target_group_arn in target_group_arns.into_iter().map(TargetGroupArn::from) {
            if !arns.contains(&target_group_arn) {
                arns.push(target_group_arn);
            }
        }

        RuleDetail {
            arn,
            priority,
            is_default,
            target_group_arns: arns,
        }
    }

    pub fn forwards_to(&self, target_group_arn: &TargetGroupArn) -> bool {
        self.target_group_arns.contains(target_group_arn)
    }
}
