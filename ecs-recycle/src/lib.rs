// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

// Print a progress line for the user and record it in the log file.
macro_rules! progress {
    ($($arg:tt)*) => {{
        println!($($arg)*);
        tracing::info!($($arg)*);
    }};
}

macro_rules! arn_new_types {
    ($name:ident) => {
        #[derive(Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub mod ecs_utils;
pub mod elb_utils;
pub mod orchestrator;
#[cfg(test)]
mod testing;

pub use orchestrator::{OrchError, OrchResult};
