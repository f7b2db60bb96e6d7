use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Group already exists: {0}")]
    GroupAlreadyExists(String),

    #[error("No member '{member}' in group '{group}'")]
    MemberNotFound { group: String, member: String },

    #[error("Member already exists in group '{group}': {member}")]
    MemberAlreadyExists { group: String, member: String },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Payer '{member}' is not a member of group '{group}'")]
    UnknownPayer { group: String, member: String },

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
