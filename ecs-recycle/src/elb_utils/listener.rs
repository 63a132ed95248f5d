// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    elb_utils::{ElbApi, ListenerDetail, ListenerProtocol, TargetGroupDetail},
    orchestrator::OrchResult,
};
use tracing::debug;

/// Find the listener that routes to the target group's load balancer.
///
/// Only the first load balancer attached to the target group is considered.
pub async fn find_listener<E: ElbApi>(
    elb: &E,
    target_group: &TargetGroupDetail,
) -> OrchResult<Option<ListenerDetail>> {
    let Some(load_balancer_arn) = target_group.load_balancer_arns.first() else {
        progress!(
            "Target group {} is not attached to a load balancer",
            target_group.name
        );
        return Ok(None);
    };

    let listeners = elb.describe_listeners(load_balancer_arn).await?;
    let listener = select_listener(&listeners).cloned();
    match &listener {
        Some(listener) => progress!("Found load balancer listener {listener}"),
        None => progress!("No HTTP or HTTPS listener found on {load_balancer_arn}"),
    }
    Ok(listener)
}

// Prefer HTTPS and fall back to HTTP. Listeners on any other protocol can't
// carry path or host based rules.
pub fn select_listener(listeners: &[ListenerDetail]) -> Option<&ListenerDetail> {
    [ListenerProtocol::Https, ListenerProtocol::Http]
        .iter()
        .find_map(|protocol| {
            let mut matching = listeners
                .iter()
                .filter(|listener| &listener.protocol == protocol);
            let selected = matching.next();
            if selected.is_some() && matching.next().is_some() {
                debug!(
                    "multiple {} listeners, selecting the first",
                    protocol.as_str()
                );
            }
            selected
        })
}
