use super::domain::CommercialField;

/// Local, synchronous failures of the calculation core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarginError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
    #[error("client commercial configuration is incomplete (missing: {})", join_fields(.missing))]
    IncompleteClientConfig { missing: Vec<CommercialField> },
}

impl MarginError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidInput { field, reason }
    }

    /// Names of the missing fields, empty for other errors.
    pub fn missing_field_names(&self) -> Vec<&'static str> {
        match self {
            MarginError::IncompleteClientConfig { missing } => {
                missing.iter().map(CommercialField::name).collect()
            }
            MarginError::InvalidInput { .. } => Vec::new(),
        }
    }
}

fn join_fields(fields: &[CommercialField]) -> String {
    fields
        .iter()
        .map(CommercialField::name)
        .collect::<Vec<_>>()
        .join(", ")
}
