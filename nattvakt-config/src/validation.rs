//! Custom validation functions for configuration.

use validator::ValidationError;

/// Validate that an interface name follows Linux naming conventions.
pub fn validate_interface(name: &str) -> Result<(), ValidationError> {
    let valid = !name.is_empty()
        && name.len() <= 15
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    let re =
        regex::Regex::new("^[a-zA-Z0-9_]+$").map_err(|_| ValidationError::new("invalid_regex"))?;

    if valid && re.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_interface"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_interface_names() {
        assert!(validate_interface("eth0").is_ok());
        assert!(validate_interface("wlan_1").is_ok());
    }

    #[test]
    fn rejects_path_like_names() {
        assert!(validate_interface("").is_err());
        assert!(validate_interface("eth0/../x").is_err());
        assert!(validate_interface("aninterfacenamethatistoolong").is_err());
    }
}
