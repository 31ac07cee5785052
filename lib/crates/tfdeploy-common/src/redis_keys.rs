/// Valkey key prefixes for the workspace registry
pub mod keys {
    /// User document
    /// Format: tfdeploy:user:{email}
    /// Type: hash, fields in [`super::fields`]
    /// Created with HSETNX so two concurrent registrations cannot both win.
    pub const USER: &str = "tfdeploy:user";

    /// Workspaces referenced by a user
    /// Format: tfdeploy:user:{email}:workspaces
    /// Type: hash, field = remote workspace id, value = JSON-serialized WorkspaceDoc
    /// Append/remove are single HSET/HDEL commands; variable appends rewrite
    /// one field inside WATCH/MULTI/EXEC.
    pub const WORKSPACES_SUFFIX: &str = "workspaces";
}

/// Hash field names inside a user document
pub mod fields {
    pub const PASSWORD_HASH: &str = "password_hash";
}

/// Longest address accepted as a key component (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

pub fn user_key(email: &str) -> String {
    format!("{}:{}", keys::USER, email)
}

pub fn user_workspaces_key(email: &str) -> String {
    format!("{}:{}:{}", keys::USER, email, keys::WORKSPACES_SUFFIX)
}

/// Validate that an email address is safe to embed in a registry key.
/// Returns Ok(()) if valid, Err with description if invalid.
/// SECURITY: Always call before constructing keys from untrusted input.
/// Rejects glob characters and `:` so an address cannot reach into
/// another user's namespace.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return Err("email must be between 1 and 254 characters");
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err("email must contain '@'");
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err("email must have exactly one '@' with text on both sides");
    }
    if email
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, ':' | '*' | '?' | '[' | ']'))
    {
        return Err("email contains characters not allowed in a registry key");
    }
    Ok(())
}
