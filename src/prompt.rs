use crate::types::{present, CompletionRequest, GithubUser, PinnedRepository};
use serde::Serialize;

pub const PROFILE_SYSTEM: &str =
    "You are a helpful AI that analyzes and generates README files for GitHub profiles.";
pub const PROFILE_INSTRUCTION: &str = "Analyze the following GitHub profile and repositories. \
From this, generate a readme in markdown format that the user can use for their profile. \
Do not wrap anything in a code block. Do not make any mentions of missing fields. \
The profile readme should stand out and highlight the strength of the user's profile. \
This readme should look appealing to tech recruiters.";

pub const REPO_SYSTEM: &str =
    "You are an AI that generates well-structured GitHub README files for repositories.";
pub const REPO_INSTRUCTION: &str = "Generate a README file for the following GitHub repository:";

const NO_BIO: &str = "No bio available";
const NO_WEBSITE: &str = "No website";
const NO_REPO_DESCRIPTION: &str = "No description";
const NO_DESCRIPTION: &str = "No Description";
const NO_README: &str = "No README content";

// Prompt objects hold plain strings only: absent inputs are replaced before serialization.

#[derive(Debug, Serialize)]
struct ProfilePrompt<'a> {
    user: UserPrompt<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserPrompt<'a> {
    name: &'a str,
    bio: &'a str,
    website: &'a str,
    repos: Vec<PinnedRepoPrompt<'a>>,
    additional_description: &'a str,
}

#[derive(Debug, Serialize)]
struct PinnedRepoPrompt<'a> {
    name: &'a str,
    description: &'a str,
    url: &'a str,
    readme: &'a str,
}

#[derive(Debug, Serialize)]
struct RepositoryPrompt<'a> {
    repo: RepoPrompt<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RepoPrompt<'a> {
    name: &'a str,
    description: &'a str,
    readme: &'a str,
    additional_description: &'a str,
}

/// System/user message pair sent to the completions API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: &'static str,
    pub user: String,
}

impl Prompt {
    pub fn for_request(req: &CompletionRequest) -> serde_json::Result<Self> {
        match req {
            CompletionRequest::Profile(user) => profile_prompt(user),
            CompletionRequest::Repository(repo) => repository_prompt(repo),
        }
    }
}

fn profile_prompt(user: &GithubUser) -> serde_json::Result<Prompt> {
    let shaped = ProfilePrompt {
        user: UserPrompt {
            name: &user.name,
            bio: present(&user.bio).unwrap_or(NO_BIO),
            website: present(&user.website_url).unwrap_or(NO_WEBSITE),
            repos: user
                .pinned_repositories
                .iter()
                .map(|r| PinnedRepoPrompt {
                    name: &r.name,
                    description: present(&r.description).unwrap_or(NO_REPO_DESCRIPTION),
                    url: r.url(),
                    readme: r.shared_readme().unwrap_or(NO_README),
                })
                .collect(),
            additional_description: present(&user.additional_desc).unwrap_or(""),
        },
    };
    Ok(Prompt {
        system: PROFILE_SYSTEM,
        user: format!(
            "{}\n\n{}",
            PROFILE_INSTRUCTION,
            serde_json::to_string_pretty(&shaped)?
        ),
    })
}

fn repository_prompt(repo: &PinnedRepository) -> serde_json::Result<Prompt> {
    let shaped = RepositoryPrompt {
        repo: RepoPrompt {
            name: &repo.name,
            description: present(&repo.description).unwrap_or(NO_DESCRIPTION),
            readme: repo.shared_readme().unwrap_or(NO_README),
            additional_description: present(&repo.additional_desc).unwrap_or(""),
        },
    };
    Ok(Prompt {
        system: REPO_SYSTEM,
        user: format!(
            "{}\n\n{}",
            REPO_INSTRUCTION,
            serde_json::to_string_pretty(&shaped)?
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn embedded_json(prompt: &Prompt) -> Value {
        let (_, json) = prompt
            .user
            .split_once("\n\n")
            .expect("instruction and payload separated by a blank line");
        serde_json::from_str(json).unwrap()
    }

    fn repo(name: &str) -> PinnedRepository {
        PinnedRepository {
            name: name.into(),
            description: None,
            url: Some(format!("https://github.com/o/{}", name)),
            readme: None,
            enable_readme: None,
            additional_desc: None,
        }
    }

    #[test]
    fn profile_placeholders_fill_every_gap() {
        let user = GithubUser {
            name: "Grace".into(),
            bio: Some(String::new()),
            website_url: None,
            pinned_repositories: vec![repo("cobol"), repo("flowmatic")],
            additional_desc: None,
        };
        let prompt = Prompt::for_request(&CompletionRequest::Profile(user)).unwrap();
        assert_eq!(prompt.system, PROFILE_SYSTEM);
        assert!(prompt.user.starts_with(PROFILE_INSTRUCTION));

        let v = embedded_json(&prompt);
        assert_eq!(v["user"]["name"], "Grace");
        assert_eq!(v["user"]["bio"], "No bio available");
        assert_eq!(v["user"]["website"], "No website");
        assert_eq!(v["user"]["additionalDescription"], "");
        let repos = v["user"]["repos"].as_array().unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0]["name"], "cobol");
        assert_eq!(repos[1]["name"], "flowmatic");
        assert_eq!(repos[0]["description"], "No description");
        assert_eq!(repos[0]["readme"], "No README content");
        assert_eq!(repos[0]["url"], "https://github.com/o/cobol");
    }

    #[test]
    fn repository_prompt_respects_readme_flag() {
        let mut r = repo("kernel");
        r.description = Some("tiny os".into());
        r.readme = Some("# kernel".into());
        r.additional_desc = Some("written in rust".into());

        let hidden = Prompt::for_request(&CompletionRequest::Repository(r.clone())).unwrap();
        let v = embedded_json(&hidden);
        assert_eq!(v["repo"]["readme"], "No README content");
        assert_eq!(v["repo"]["description"], "tiny os");
        assert_eq!(v["repo"]["additionalDescription"], "written in rust");
        assert!(v["repo"].get("url").is_none());

        r.enable_readme = Some(true);
        let shown = Prompt::for_request(&CompletionRequest::Repository(r)).unwrap();
        assert_eq!(shown.system, REPO_SYSTEM);
        assert_eq!(embedded_json(&shown)["repo"]["readme"], "# kernel");
    }

    #[test]
    fn repository_description_placeholder() {
        let prompt = Prompt::for_request(&CompletionRequest::Repository(repo("x"))).unwrap();
        assert_eq!(embedded_json(&prompt)["repo"]["description"], "No Description");
        assert!(prompt.user.contains("\n  \"repo\": {"));
    }
}
