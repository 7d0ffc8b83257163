//! Commits grouped by organization and repository
//!
//! [`CommitGroups`] is an ordered two-level map: organization label to
//! repository name to the commits fetched for that repository. Insertion
//! order is kept at both levels so reports list sections in fetch order.

use crate::commit::Commit;

/// Label used for repositories owned directly by the user
pub const PERSONAL_LABEL: &str = "Personal";

/// Commits of a single repository, in fetch order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCommits {
    /// Repository name
    pub name: String,
    /// Commits authored within the window
    pub commits: Vec<Commit>,
}

impl RepoCommits {
    /// Create an empty repository entry
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commits: Vec::new(),
        }
    }

    /// Number of commits
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    /// Check if the repository has no commits
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Repositories of a single organization, in fetch order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgCommits {
    /// Organization login, or [`PERSONAL_LABEL`]
    pub label: String,
    /// Repositories of this organization
    pub repos: Vec<RepoCommits>,
}

impl OrgCommits {
    /// Create an empty organization entry
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            repos: Vec::new(),
        }
    }

    /// Total commits across all repositories
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.repos.iter().map(RepoCommits::commit_count).sum()
    }

    /// Look up a repository by name
    #[must_use]
    pub fn repo(&self, name: &str) -> Option<&RepoCommits> {
        self.repos.iter().find(|r| r.name == name)
    }

    /// Repositories that have at least one commit
    pub fn non_empty_repos(&self) -> impl Iterator<Item = &RepoCommits> {
        self.repos.iter().filter(|r| !r.is_empty())
    }

    fn repo_mut(&mut self, name: &str) -> &mut RepoCommits {
        let idx = match self.repos.iter().position(|r| r.name == name) {
            Some(idx) => idx,
            None => {
                self.repos.push(RepoCommits::new(name));
                self.repos.len() - 1
            }
        };
        &mut self.repos[idx]
    }
}

/// Ordered organization -> repository -> commits map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitGroups {
    orgs: Vec<OrgCommits>,
}

impl CommitGroups {
    /// Create an empty grouping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure an (initially empty) entry exists for `org`/`repo`
    ///
    /// Existing entries keep their position and commits.
    pub fn ensure_repo(&mut self, org: &str, repo: &str) -> &mut RepoCommits {
        self.org_mut(org).repo_mut(repo)
    }

    /// Append a commit to `org`/`repo`, creating the entries as needed
    pub fn push(&mut self, org: &str, repo: &str, commit: Commit) {
        self.ensure_repo(org, repo).commits.push(commit);
    }

    /// Look up an organization by label
    #[must_use]
    pub fn get(&self, org: &str) -> Option<&OrgCommits> {
        self.orgs.iter().find(|o| o.label == org)
    }

    /// Look up the commits of `org`/`repo`
    #[must_use]
    pub fn commits(&self, org: &str, repo: &str) -> Option<&[Commit]> {
        self.get(org)
            .and_then(|o| o.repo(repo))
            .map(|r| r.commits.as_slice())
    }

    /// Iterate organizations in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, OrgCommits> {
        self.orgs.iter()
    }

    /// Number of organizations (including those without commits)
    #[must_use]
    pub fn len(&self) -> usize {
        self.orgs.len()
    }

    /// Total commits across every organization and repository
    #[must_use]
    pub fn total_commits(&self) -> usize {
        self.orgs.iter().map(OrgCommits::commit_count).sum()
    }

    /// Check if there are no commits at all (empty entries are ignored)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_commits() == 0
    }

    fn org_mut(&mut self, label: &str) -> &mut OrgCommits {
        let idx = match self.orgs.iter().position(|o| o.label == label) {
            Some(idx) => idx,
            None => {
                self.orgs.push(OrgCommits::new(label));
                self.orgs.len() - 1
            }
        };
        &mut self.orgs[idx]
    }
}

impl<'a> IntoIterator for &'a CommitGroups {
    type Item = &'a OrgCommits;
    type IntoIter = std::slice::Iter<'a, OrgCommits>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
