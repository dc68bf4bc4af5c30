use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(RotationId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub active: bool,
}

/// The singleton record naming whose turn it currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    pub id: RotationId,
    #[serde(default)]
    pub current_user: Option<User>,
}

impl Rotation {
    pub fn current_user_name(&self) -> Option<&str> {
        self.current_user.as_ref().map(|user| user.name.as_str())
    }
}

/// One forecast week as the backend returns it. `user` is a display name,
/// not a full user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRotationEntry {
    pub week: i64,
    pub user: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_without_current_user_deserializes_as_none() {
        let rotation: Rotation =
            serde_json::from_str(r#"{"id":1,"current_user":null}"#).expect("rotation");
        assert_eq!(rotation.id, RotationId(1));
        assert!(rotation.current_user.is_none());
        assert_eq!(rotation.current_user_name(), None);
    }

    #[test]
    fn rotation_exposes_current_user_name() {
        let rotation: Rotation = serde_json::from_str(
            r#"{"id":1,"current_user":{"id":3,"name":"Taro","email":"t@x.com","active":true}}"#,
        )
        .expect("rotation");
        assert_eq!(rotation.current_user_name(), Some("Taro"));
        assert_eq!(
            rotation.current_user.map(|user| user.id),
            Some(UserId(3))
        );
    }
}
