// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub type OrchResult<T, E = OrchError> = Result<T, E>;

#[derive(Debug)]
pub enum OrchError {
    Init { dbg: String },
    Elb { dbg: String },
    Ecs { dbg: String },

    // Provider "not found" responses. Callers convert these into a logged,
    // non-fatal early return.
    TargetGroupNotFound { dbg: String },
    ServiceNotFound { dbg: String },

    // ECS `ClientException` and `InvalidParameterException`
    EcsClient { dbg: String },
    InvalidParameter { dbg: String },

    WaitTimeout { dbg: String },
}

impl std::fmt::Display for OrchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchError::Init { dbg } => write!(f, "{}", dbg),
            OrchError::Elb { dbg } => write!(f, "{}", dbg),
            OrchError::Ecs { dbg } => write!(f, "{}", dbg),
            OrchError::TargetGroupNotFound { dbg } => write!(f, "TargetGroupNotFound {}", dbg),
            OrchError::ServiceNotFound { dbg } => write!(f, "ServiceNotFound {}", dbg),
            OrchError::EcsClient { dbg } => write!(f, "ClientException {}", dbg),
            OrchError::InvalidParameter { dbg } => write!(f, "InvalidParameter {}", dbg),
            OrchError::WaitTimeout { dbg } => write!(f, "WaitTimeout {}", dbg),
        }
    }
}

impl std::error::Error for OrchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_provider_message() {
        let err = OrchError::Ecs {
            dbg: "AccessDenied: not authorized".to_string(),
        };
        assert_eq!(err.to_string(), "AccessDenied: not authorized");

        let err = OrchError::WaitTimeout {
            dbg: "orders-api not stable after 30 attempts".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "WaitTimeout orders-api not stable after 30 attempts"
        );
    }
}
