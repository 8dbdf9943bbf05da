//! Validation utilities

use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that a monetary amount is a non-negative magnitude
pub fn validate_amount(amount: &BigDecimal) -> ReconResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(ReconError::Validation(
            "Amount must be non-negative".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a record ID is valid
pub fn validate_record_id(record_id: &str) -> ReconResult<()> {
    if record_id.trim().is_empty() {
        return Err(ReconError::Validation(
            "Record ID cannot be empty".to_string(),
        ));
    }

    if record_id.len() > 64 {
        return Err(ReconError::Validation(
            "Record ID cannot exceed 64 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a record description is valid
pub fn validate_description(description: &str) -> ReconResult<()> {
    if description.trim().is_empty() {
        return Err(ReconError::Validation(
            "Description cannot be empty".to_string(),
        ));
    }

    if description.len() > 255 {
        return Err(ReconError::Validation(
            "Description cannot exceed 255 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced record validator with detailed checks
pub struct EnhancedRecordValidator;

impl RecordValidator for EnhancedRecordValidator {
    fn validate_record(&self, record: &TransactionRecord) -> ReconResult<()> {
        validate_record_id(&record.id)?;
        validate_description(&record.description)?;
        validate_amount(&record.amount)?;

        // A record cannot arrive already linked
        if record.status == RecordStatus::Pending && record.linked_id.is_some() {
            return Err(ReconError::Validation(
                "Pending record cannot carry a linked record ID".to_string(),
            ));
        }

        Ok(())
    }
}
