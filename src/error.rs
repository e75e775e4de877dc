use thiserror::Error;

pub type Result<T> = std::result::Result<T, AimError>;

#[derive(Debug, Error)]
pub enum AimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Non-finite input for {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Stale pointer sample from canvas epoch {sample_epoch} (current epoch {current_epoch})")]
    StaleSample { sample_epoch: u64, current_epoch: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] serde_json::Error),
}

/// Rejects NaN and infinities, naming the offending field.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AimError::NonFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_passes_regular_values() {
        assert_eq!(ensure_finite("x", 12.5).unwrap(), 12.5);
        assert_eq!(ensure_finite("x", -0.0).unwrap(), 0.0);
    }

    #[test]
    fn ensure_finite_rejects_nan_and_infinity() {
        assert!(matches!(
            ensure_finite("x", f64::NAN),
            Err(AimError::NonFinite { field: "x", .. })
        ));
        assert!(ensure_finite("y", f64::INFINITY).is_err());
        assert!(ensure_finite("y", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn stale_sample_message_names_both_epochs() {
        let err = AimError::StaleSample {
            sample_epoch: 2,
            current_epoch: 3,
        };
        assert_eq!(
            err.to_string(),
            "Stale pointer sample from canvas epoch 2 (current epoch 3)"
        );
    }
}
