use validator::Validate;

use crate::Config;
use crate::error::{ApiError, Result};

/// Run derive-based validation and surface the first failure as a
/// field-level error.
pub fn validate_request<T: Validate>(request: &T) -> Result<()> {
    if let Err(errors) = request.validate() {
        if let Some((field, field_errors)) = errors.field_errors().into_iter().next() {
            let message = field_errors
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            return Err(ApiError::validation_field(field.to_string(), message));
        }
        return Err(ApiError::Validation("Invalid input".to_string()));
    }
    Ok(())
}

/// Refuse to start with obviously unsafe secrets
pub fn validate_secrets(config: &Config) -> anyhow::Result<()> {
    if config.jwt_secret.len() < 32 {
        anyhow::bail!("JWT_SECRET must be at least 32 characters");
    }
    if config.jwt_secret == "changeme" || config.jwt_secret.contains("secret") {
        anyhow::bail!("JWT_SECRET looks like a placeholder value");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_validate_request_reports_field() {
        let bad = Sample {
            email: "not-an-email".to_string(),
        };
        assert!(validate_request(&bad).is_err());

        let good = Sample {
            email: "a@b.com".to_string(),
        };
        assert!(validate_request(&good).is_ok());
    }
}
