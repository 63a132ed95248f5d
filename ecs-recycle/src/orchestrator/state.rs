// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::ecs_utils::WaitPolicy;
use core::time::Duration;

pub const STATE: State = State {
    version: "v0.1.0",

    // orchestrator
    config_file: "ecs-service.json",
    log_dir: "./target/ecs-recycle",

    // ecs
    stopped_desired_count: 0,
    // mirrors the `services_stable` waiter config: Delay 10, MaxAttempts 30
    services_stable: WaitPolicy {
        delay: Duration::from_secs(10),
        max_attempts: 30,
    },
};

pub struct State {
    pub version: &'static str,

    // orchestrator
    pub config_file: &'static str,
    pub log_dir: &'static str,

    // ecs
    pub stopped_desired_count: i32,
    pub services_stable: WaitPolicy,
}

impl State {
    pub fn log_file_prefix(&self, unique_id: &str) -> String {
        format!("ecs_recycle_{}", unique_id)
    }
}
