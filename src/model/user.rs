use super::resource_id;
use serde::{Deserialize, Serialize};

resource_id!(
    /// Type-safe identifier for Users.
    UserId,
    "user"
);

/// Which side of a trade a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Buyer,
    Seller,
}

/// A registered marketplace participant.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
/// See [`crate::user_actor`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Payload for creating a new user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn new(id: UserId, params: UserCreate) -> Self {
        Self {
            id,
            name: params.name,
            email: params.email,
            role: params.role,
        }
    }

    pub fn is(&self, role: Role) -> bool {
        self.role == role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_parses_prefixed_and_bare_forms() {
        assert_eq!("user_12".parse::<UserId>().unwrap(), UserId(12));
        assert_eq!("12".parse::<UserId>().unwrap(), UserId(12));
        assert_eq!(UserId(3).to_string(), "user_3");

        let err = "product_12".parse::<UserId>().unwrap_err();
        assert_eq!(err.resource, "user");
        assert!("user_".parse::<UserId>().is_err());
    }

    #[test]
    fn id_serializes_as_display_string() {
        let json = serde_json::to_string(&UserId(4)).unwrap();
        assert_eq!(json, "\"user_4\"");

        let from_number: UserId = serde_json::from_str("4").unwrap();
        let from_text: UserId = serde_json::from_str("\"user_4\"").unwrap();
        assert_eq!(from_number, from_text);
    }

    #[test]
    fn role_uses_screaming_case() {
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), "\"SELLER\"");
        let parsed: UserCreate =
            serde_json::from_str(r#"{"name":"Ann","email":"ann@example.com","role":"BUYER"}"#)
                .unwrap();
        assert_eq!(parsed.role, Role::Buyer);
    }
}
