use sea_orm::DbErr;

/// Postgres unique violation (SQLSTATE 23505), detected from the driver message.
pub fn is_unique_violation(err: &DbErr) -> bool {
    let err_str = err.to_string();
    err_str.contains("23505")
        || err_str.contains("duplicate key")
        || err_str.contains("unique constraint")
}

/// Postgres foreign-key violation (SQLSTATE 23503).
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    let err_str = err.to_string();
    err_str.contains("23503") || err_str.contains("foreign key constraint")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn detects_duplicate_key_message() {
        let err = DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"profiles_email_key\"".to_string(),
        ));
        assert!(is_unique_violation(&err));
    }

    #[test]
    fn ignores_other_errors() {
        let err = DbErr::Conn(RuntimeErr::Internal("connection refused".to_string()));
        assert!(!is_unique_violation(&err));
        assert!(!is_foreign_key_violation(&err));
    }

    #[test]
    fn detects_missing_parent_row() {
        let err = DbErr::Query(RuntimeErr::Internal(
            "insert or update on table \"jobs\" violates foreign key constraint \"fk_jobs_employer_id\""
                .to_string(),
        ));
        assert!(is_foreign_key_violation(&err));
        assert!(!is_unique_violation(&err));
    }
}
