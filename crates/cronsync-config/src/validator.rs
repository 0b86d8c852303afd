//! Configuration validation.

use cronsync_protocols::Trigger;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse into the first error, if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_scheduler(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_scheduler(config: &Config, result: &mut ValidationResult) {
        let scheduler = &config.scheduler;

        if scheduler.group.trim().is_empty() {
            result.add_error(ValidationError::new(
                "scheduler.group",
                "Group cannot be empty",
            ));
        }

        if scheduler.key_prefix.is_empty() {
            result.add_warning(ValidationWarning::new(
                "scheduler.key_prefix",
                "Empty key prefix: a definition ID could collide with the maintenance job key",
            ));
        }

        if let Err(e) = Trigger::cron(&scheduler.maintenance_cron) {
            result.add_error(ValidationError::new(
                "scheduler.maintenance_cron",
                e.to_string(),
            ));
        }

        if scheduler.reconcile_interval_secs == 0 {
            result.add_error(ValidationError::new(
                "scheduler.reconcile_interval_secs",
                "reconcile_interval_secs must be greater than 0",
            ));
        } else if scheduler.reconcile_interval_secs < 5 {
            result.add_warning(ValidationWarning::new(
                "scheduler.reconcile_interval_secs",
                "reconcile_interval_secs is very low (<5), the job store will be read constantly",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "Log level cannot be empty",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
