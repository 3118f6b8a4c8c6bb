use serde::{Deserialize, Serialize};

/// A stored contact card. The id is assigned by [`ContactService`](super::service::ContactService).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}

/// Create/update payload. Has no id; an `id` key in the request body is ignored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContactInput {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    pub phone: String,
    pub email: String,
    #[serde(default, alias = "linkedIn")]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default, alias = "gitHub")]
    pub github: Option<String>,
}

impl Contact {
    pub fn from_input(id: u32, input: ContactInput) -> Self {
        Self {
            id,
            name: input.name,
            title: input.title,
            phone: input.phone,
            email: input.email,
            linkedin: input.linkedin,
            twitter: input.twitter,
            github: input.github,
        }
    }

    /// Overwrite the editable fields. `id` and `title` are kept.
    pub fn apply_update(&mut self, input: ContactInput) {
        self.name = input.name;
        self.phone = input.phone;
        self.email = input.email;
        self.linkedin = input.linkedin;
        self.twitter = input.twitter;
        self.github = input.github;
    }
}
