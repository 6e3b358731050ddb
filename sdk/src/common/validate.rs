use super::errors::{SdkError, SdkResult};

/// Client-side checks a model runs before it is sent.
///
/// Most models have nothing to check and keep the default.
pub trait Validate {
    fn validate(&self) -> SdkResult<()> {
        Ok(())
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> SdkResult<()> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> SdkResult<()> {
        match self {
            Some(value) => value.validate(),
            None => Ok(()),
        }
    }
}

/// Fail with the canonical message for a missing required property.
pub fn require<'a, T>(value: &'a Option<T>, property: &str, model: &str) -> SdkResult<&'a T> {
    value.as_ref().ok_or_else(|| {
        SdkError::Validation(format!(
            "Missing required property {property} in model {model}"
        ))
    })
}
