use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::CardError;
use crate::stats::{self, Stats};

const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";
const USER_AGENT: &str = "ghcard";

/// One query serves every page: profile fields and the contributions
/// aggregate are only read from the first response, repository pages are
/// folded from all of them.
const STATS_QUERY: &str = r#"
query($login: String!, $from: DateTime!, $to: DateTime!, $after: String) {
  user(login: $login) {
    name
    login
    avatarUrl(size: 128)
    createdAt
    followers { totalCount }
    contributionsCollection(from: $from, to: $to) {
      totalCommitContributions
      totalPullRequestContributions
      totalPullRequestReviewContributions
      totalIssueContributions
      totalRepositoryContributions
      contributionCalendar { totalContributions }
    }
    repositories(ownerAffiliations: OWNER, isFork: false, first: 100, after: $after) {
      nodes { stargazerCount }
      totalCount
      pageInfo { hasNextPage endCursor }
    }
  }
}
"#;

#[derive(Deserialize)]
struct GraphqlResponse {
    data: Option<ResponseData>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Deserialize)]
struct ResponseData {
    user: Option<User>,
}

#[derive(Deserialize)]
struct User {
    name: Option<String>,
    login: String,
    #[serde(rename = "avatarUrl")]
    avatar_url: String,
    #[serde(rename = "createdAt")]
    created_at: String,
    followers: Option<CountObj>,
    #[serde(rename = "contributionsCollection")]
    contributions_collection: Option<Contributions>,
    repositories: Repositories,
}

#[derive(Deserialize)]
struct CountObj {
    #[serde(rename = "totalCount")]
    total_count: u64,
}

#[derive(Deserialize, Default)]
struct Contributions {
    #[serde(rename = "totalCommitContributions", default)]
    total_commit_contributions: u64,
    #[serde(rename = "totalPullRequestContributions", default)]
    total_pull_request_contributions: u64,
    #[serde(rename = "totalPullRequestReviewContributions", default)]
    total_pull_request_review_contributions: u64,
    #[serde(rename = "totalIssueContributions", default)]
    total_issue_contributions: u64,
    #[serde(rename = "totalRepositoryContributions", default)]
    total_repository_contributions: u64,
    #[serde(rename = "contributionCalendar")]
    contribution_calendar: Option<Calendar>,
}

#[derive(Deserialize)]
struct Calendar {
    #[serde(rename = "totalContributions")]
    total_contributions: u64,
}

#[derive(Deserialize)]
struct Repositories {
    nodes: Option<Vec<RepoNode>>,
    #[serde(rename = "totalCount")]
    total_count: u64,
    #[serde(rename = "pageInfo")]
    page_info: PageInfo,
}

#[derive(Deserialize)]
struct RepoNode {
    #[serde(rename = "stargazerCount", default)]
    stargazer_count: u64,
}

#[derive(Deserialize)]
struct PageInfo {
    #[serde(rename = "hasNextPage")]
    has_next_page: bool,
    #[serde(rename = "endCursor")]
    end_cursor: Option<String>,
}

#[derive(Default)]
struct Profile {
    name: String,
    login: String,
    avatar_url: String,
    created_at: String,
}

/// Folds the page walk. Profile and the window aggregates are captured from
/// the first page only ("not yet seen" condition); stars accumulate from
/// every page.
#[derive(Default)]
struct PageAccumulator {
    profile: Option<Profile>,
    contributions: Contributions,
    followers: u64,
    total_repos: u64,
    total_stars: u64,
}

impl PageAccumulator {
    /// Fold one page in, returning the cursor for the next page if the
    /// listing reports one.
    fn fold(&mut self, user: User) -> Option<String> {
        if self.profile.is_none() {
            let name = user
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| user.login.clone());
            self.profile = Some(Profile {
                name,
                login: user.login,
                avatar_url: user.avatar_url,
                created_at: user.created_at,
            });
            self.contributions = user.contributions_collection.unwrap_or_default();
            self.followers = user.followers.map(|f| f.total_count).unwrap_or(0);
            self.total_repos = user.repositories.total_count;
        }

        for repo in user.repositories.nodes.unwrap_or_default() {
            self.total_stars += repo.stargazer_count;
        }

        if user.repositories.page_info.has_next_page {
            user.repositories.page_info.end_cursor
        } else {
            None
        }
    }

    fn finish(self, from: DateTime<Utc>, to: DateTime<Utc>) -> Stats {
        let profile = self.profile.unwrap_or_default();
        let contributions = self.contributions;
        let total_contributions = contributions
            .contribution_calendar
            .map(|c| c.total_contributions)
            .unwrap_or(0);
        let joined = stats::format_year_month(&profile.created_at);

        Stats {
            name: profile.name,
            login: profile.login,
            avatar_url: profile.avatar_url,
            created_at: profile.created_at,
            total_stars: self.total_stars,
            total_repos: self.total_repos,
            commits: contributions.total_commit_contributions,
            prs: contributions.total_pull_request_contributions,
            reviews: contributions.total_pull_request_review_contributions,
            issues: contributions.total_issue_contributions,
            contributed: contributions.total_repository_contributions,
            followers: self.followers,
            total_contributions,
            joined,
            period_label: stats::period_label(from, to),
        }
    }
}

#[derive(Clone)]
pub struct GithubClient {
    token: Arc<String>,
    http: Arc<Client>,
    endpoint: Arc<String>,
}

impl GithubClient {
    pub fn new(token: String) -> Self {
        Self::with_endpoint(token, GITHUB_GRAPHQL_URL.to_string())
    }

    /// Same client against a different GraphQL endpoint. Tests point this
    /// at a local mock server.
    pub fn with_endpoint(token: String, endpoint: String) -> Self {
        Self {
            token: Arc::new(token),
            http: Arc::new(Client::new()),
            endpoint: Arc::new(endpoint),
        }
    }

    /// Walk the cursor-paginated repository listing for `login`, folding
    /// all pages into one [`Stats`]. `Ok(None)` means the account does not
    /// exist upstream; any transport failure or explicit `errors` payload
    /// aborts the walk with no partial result.
    pub async fn fetch_user_stats(&self, login: &str) -> Result<Option<Stats>, CardError> {
        let (from, to) = stats::trailing_window();
        let from_str = from.to_rfc3339_opts(SecondsFormat::Secs, true);
        let to_str = to.to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut acc = PageAccumulator::default();
        let mut after: Option<String> = None;
        let mut pages = 0u32;

        loop {
            let response = self
                .query_page(login, &from_str, &to_str, after.as_deref())
                .await?;
            pages += 1;

            let user = match response.data.and_then(|d| d.user) {
                Some(user) => user,
                None => return Ok(None),
            };

            match acc.fold(user) {
                Some(cursor) => after = Some(cursor),
                None => break,
            }
        }

        debug!(login, pages, "aggregated user stats");
        Ok(Some(acc.finish(from, to)))
    }

    /// One GraphQL POST. No retries here: retry policy belongs to whatever
    /// fronts this service, and a failed page must fail the whole walk.
    async fn query_page(
        &self,
        login: &str,
        from: &str,
        to: &str,
        after: Option<&str>,
    ) -> Result<GraphqlResponse, CardError> {
        let payload = serde_json::json!({
            "query": STATS_QUERY,
            "variables": {
                "login": login,
                "from": from,
                "to": to,
                "after": after,
            },
        });

        let response = self
            .http
            .post(self.endpoint.as_str())
            .bearer_auth(&*self.token)
            .header("User-Agent", USER_AGENT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CardError::Upstream(format!("Network error querying GitHub: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CardError::Upstream(format!(
                "GitHub API error: {} {}",
                status.as_u16(),
                text
            )));
        }

        let parsed: GraphqlResponse = response
            .json()
            .await
            .map_err(|e| CardError::Upstream(format!("Failed to parse JSON from GitHub: {e}")))?;

        if let Some(errors) = &parsed.errors {
            if let Some(first) = errors.first() {
                return Err(CardError::Upstream(first.message.clone()));
            }
        }

        Ok(parsed)
    }
}
