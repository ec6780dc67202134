use std::borrow::Cow;
use std::ops::Deref;

use validator::{Validate, ValidationError, ValidationErrors};

use errors::Error;

fn collect_errors(errors: ValidationErrors) -> Vec<String> {
    let mut field_errors: Vec<_> = errors.field_errors().into_iter().collect();
    field_errors.sort_by_key(|(field, _)| *field);

    field_errors
        .into_iter()
        .map(|err| {
            let default_error = format!("{} is required", err.0);
            err.1[0]
                .message
                .as_ref()
                .unwrap_or(&Cow::Owned(default_error))
                .to_string()
        })
        .collect()
}

/// Runs the derived validation rules of an extracted body, query or form.
pub fn validate<P, T>(params: &P) -> Result<(), Error>
where
    P: Deref<Target = T>,
    T: Validate,
{
    match params.validate() {
        Ok(_) => Ok(()),
        Err(err) => Err(Error::ValidationError(collect_errors(err))),
    }
}

/// Rejects strings that are empty or only whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }

    Ok(())
}
