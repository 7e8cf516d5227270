//! Pool User Entity
//!
//! The user record as the pool reports it: a canonical username plus a
//! flat list of attributes. The pool owns this data; we only read it.

/// Single user attribute as stored in the pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

/// User record returned by the pool for an authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolUser {
    /// Canonical username (may differ in case from what was typed)
    pub username: String,
    /// Pool attributes such as `sub`, `email`, `email_verified`
    pub attributes: Vec<UserAttribute>,
}

impl PoolUser {
    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Pool-issued unique identifier
    pub fn sub(&self) -> Option<&str> {
        self.attribute("sub")
    }

    /// Email attribute, if present
    pub fn email(&self) -> Option<&str> {
        self.attribute("email")
    }

    /// Whether the pool has verified the email attribute
    pub fn email_verified(&self) -> bool {
        self.attribute("email_verified") == Some("true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> PoolUser {
        PoolUser {
            username: "user@example.com".to_string(),
            attributes: vec![
                UserAttribute {
                    name: "sub".to_string(),
                    value: "abc-123".to_string(),
                },
                UserAttribute {
                    name: "email".to_string(),
                    value: "user@example.com".to_string(),
                },
                UserAttribute {
                    name: "email_verified".to_string(),
                    value: "true".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_attribute_lookup() {
        let user = user();
        assert_eq!(user.sub(), Some("abc-123"));
        assert_eq!(user.email(), Some("user@example.com"));
        assert!(user.email_verified());
        assert_eq!(user.attribute("phone_number"), None);
    }

    #[test]
    fn test_email_verified_defaults_false() {
        let user = PoolUser {
            username: "u".to_string(),
            attributes: vec![],
        };
        assert!(!user.email_verified());
    }
}
