//! Custom Maven repository entries.

use serde::Serialize;

use crate::core::naming;

/// One custom repository assembled from the url/username/password lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomRepoEntry {
    /// 1-based position in the url list
    pub index: usize,
    pub url: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl CustomRepoEntry {
    /// Zip three lists by position.
    ///
    /// The url list decides how many entries there are; missing usernames
    /// or passwords become empty strings.
    pub fn zip(urls: Vec<String>, usernames: Vec<String>, passwords: Vec<String>) -> Vec<Self> {
        let mut usernames = usernames.into_iter();
        let mut passwords = passwords.into_iter();

        urls.into_iter()
            .enumerate()
            .map(|(i, url)| Self {
                index: i + 1,
                url,
                username: usernames.next().unwrap_or_default(),
                password: passwords.next().unwrap_or_default(),
            })
            .collect()
    }

    /// Repository name used when registering it with a build.
    pub fn name(&self) -> String {
        naming::repository_name(self.index)
    }

    /// Whether both username and password are set.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}
