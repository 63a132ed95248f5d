// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::orchestrator::{OrchError, OrchResult, STATE};
use clap::Parser;
use serde::Deserialize;
use std::{
    fs::File,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
#[command(about = "Tear down an ECS service along with its ALB rules and target group")]
pub struct Cli {
    /// Path to the service configuration file
    #[arg(long, default_value = STATE.config_file)]
    config_file: PathBuf,
}

impl Cli {
    pub fn process_config_file(self) -> OrchResult<RecycleConfig> {
        RecycleConfig::from_file(&self.config_file)
    }
}

// Parsed from the service configuration file.
//
// The `service` value doubles as the target group name and the task
// definition family unless those are set explicitly.
#[derive(Clone, Debug, Deserialize)]
pub struct RecycleConfig {
    service: String,
    region: String,
    cluster: String,
    #[serde(default)]
    target_group: Option<String>,
    #[serde(default)]
    task_definition_family: Option<String>,
}

impl RecycleConfig {
    pub fn new(service: &str, region: &str, cluster: &str) -> Self {
        RecycleConfig {
            service: service.to_string(),
            region: region.to_string(),
            cluster: cluster.to_string(),
            target_group: None,
            task_definition_family: None,
        }
    }

    pub fn from_file(config_file: &PathBuf) -> OrchResult<Self> {
        let path = Path::new(&config_file);
        let file = File::open(path).map_err(|_err| OrchError::Init {
            dbg: format!("Config file not found: {:?}", path),
        })?;
        serde_json::from_reader(file).map_err(|err| OrchError::Init {
            dbg: format!("Failed to parse config file {:?}. {err}", path),
        })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn target_group(&self) -> &str {
        self.target_group.as_deref().unwrap_or(&self.service)
    }

    pub fn task_definition_family(&self) -> &str {
        self.task_definition_family
            .as_deref()
            .unwrap_or(&self.service)
    }
}
