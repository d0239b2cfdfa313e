use serde::{Deserialize, Serialize};

/// Board colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The single local user's profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub role: String,
    /// Image URI or data URI
    pub avatar: String,
    /// Pro entitlement; lifts the free-tier limits
    #[serde(default)]
    pub is_pro: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "TaskFlow User".to_string(),
            role: "Member".to_string(),
            avatar: "https://api.dicebear.com/7.x/notionists/svg?seed=TaskFlow".to_string(),
            is_pro: false,
            email: None,
        }
    }
}

/// Partial profile update
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub avatar: Option<String>,
    pub is_pro: Option<bool>,
    pub email: Option<String>,
}

impl ProfileUpdate {
    /// Merge into `profile`, returning whether anything changed
    pub fn apply_to(&self, profile: &mut Profile) -> bool {
        let before = profile.clone();

        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(role) = &self.role {
            profile.role = role.clone();
        }
        if let Some(avatar) = &self.avatar {
            profile.avatar = avatar.clone();
        }
        if let Some(is_pro) = self.is_pro {
            profile.is_pro = is_pro;
        }
        if let Some(email) = &self.email {
            profile.email = Some(email.clone());
        }

        *profile != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let mut profile = Profile::default();
        let update = ProfileUpdate {
            role: Some("Founder".to_string()),
            ..ProfileUpdate::default()
        };

        assert!(update.apply_to(&mut profile));
        assert_eq!(profile.role, "Founder");
        assert_eq!(profile.name, "TaskFlow User");
        assert!(!profile.is_pro);
    }

    #[test]
    fn test_profile_wire_format() {
        let profile = Profile {
            is_pro: true,
            email: Some("me@example.com".to_string()),
            ..Profile::default()
        };
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["isPro"], true);
        assert_eq!(json["email"], "me@example.com");
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
