//! Tracker client implementation.

use crate::error::SdkError;
use crate::transport::{Transport, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use trackline_domain::{Project, Story, StoryState, StoryType, UNESTIMATED};

/// Environment variable holding the API token
pub const TOKEN_ENV_VAR: &str = "TRACKLINE_TOKEN";

// Search expressions behind the preset queries. The filter DSL belongs to
// the remote service; contents are percent-encoded but never validated here.
const FILTER_OPEN_BUGS: &str = "type:bug state:unstarted";
const FILTER_UNSTARTED_FEATURES: &str = "type:feature state:unstarted";
const FILTER_IN_PROGRESS: &str = "state:started,rejected";
const FILTER_FINISHED_FEATURES: &str = "state:delivered,finished type:feature";
const FILTER_FINISHED_BUGS: &str = "state:delivered,finished type:bug";
const FILTER_KNOWN_ISSUES: &str = "state:unscheduled,unstarted,started,rejected type:bug";

/// Fields for a story creation request
#[derive(Debug, Clone, Serialize)]
pub struct NewStory {
    /// Title (the one field the remote service requires)
    pub name: String,

    /// Long-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Kind of work; the service defaults to feature when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_type: Option<StoryType>,

    /// Initial point value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<i64>,

    /// Labels to attach
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl NewStory {
    /// Create a request with just a title
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            story_type: None,
            estimate: None,
            labels: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the story type
    pub fn with_story_type(mut self, story_type: StoryType) -> Self {
        self.story_type = Some(story_type);
        self
    }

    /// Set the initial estimate
    pub fn with_estimate(mut self, estimate: i64) -> Self {
        self.estimate = Some(estimate);
        self
    }
}

/// Partial story update
///
/// `None` fields are skipped during serialization, so the request body
/// carries exactly the changes asked for and the service leaves everything
/// else untouched.
#[derive(Debug, Default, Clone, Serialize)]
pub struct StoryUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New point value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<i64>,

    /// New workflow state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_state: Option<StoryState>,

    /// New owner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
}

/// Trackline SDK client
///
/// Owns the authenticated transport; all remote operations live here.
/// Entities ([`Project`], [`Story`]) are plain snapshots - pass them back
/// in to act on them.
pub struct TrackerClient {
    transport: Transport,
}

impl TrackerClient {
    /// Create a client with an explicit API token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            transport: Transport::new(
                token.into(),
                DEFAULT_BASE_URL.to_string(),
                Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }

    /// Create a client from the `TRACKLINE_TOKEN` environment variable
    pub fn from_env() -> Result<Self, SdkError> {
        let token = std::env::var(TOKEN_ENV_VAR)
            .map_err(|_| SdkError::Token(format!("{} environment variable not set", TOKEN_ENV_VAR)))?;

        if token.is_empty() {
            return Err(SdkError::Token(format!("{} is empty", TOKEN_ENV_VAR)));
        }

        Ok(Self::new(token))
    }

    /// Override the API base URL (mainly for tests and self-hosted mirrors)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.transport.base_url = base_url.into();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport = Transport::new(
            self.transport.token.clone(),
            self.transport.base_url.clone(),
            timeout,
        );
        self
    }

    // ---------------------------------------------------------------------
    // Projects
    // ---------------------------------------------------------------------

    /// List every project visible to the authenticated account
    pub fn projects(&self) -> Result<Vec<Project>, SdkError> {
        let url = format!("{}/projects", self.transport.base_url);
        let root = self.transport.get(&url)?;
        let nodes = root
            .as_array()
            .ok_or_else(|| SdkError::Json("expected a JSON array of projects".to_string()))?;

        nodes
            .iter()
            .map(|node| Project::from_json(node).map_err(SdkError::from))
            .collect()
    }

    /// Fetch a single project by ID
    pub fn project(&self, project_id: i64) -> Result<Project, SdkError> {
        let url = format!("{}/projects/{}", self.transport.base_url, project_id);
        let node = self.transport.get(&url)?;
        Ok(Project::from_json(&node)?)
    }

    // ---------------------------------------------------------------------
    // Story queries
    // ---------------------------------------------------------------------

    /// Search a project's stories with a filter expression
    ///
    /// `filter` uses the remote service's search DSL (e.g.
    /// `"type:bug state:unstarted"`); it is percent-encoded and otherwise
    /// passed through unmodified. No matches yield an empty list.
    pub fn stories(&self, project: &Project, filter: &str) -> Result<Vec<Story>, SdkError> {
        let url = self.stories_url(project.project_id, filter)?;
        let root = self.transport.get(url.as_str())?;
        let nodes = root
            .as_array()
            .ok_or_else(|| SdkError::Json("expected a JSON array of stories".to_string()))?;

        nodes
            .iter()
            .map(|node| Story::from_json(node).map_err(SdkError::from))
            .collect()
    }

    /// Open bugs plus unstarted features that still carry the unestimated
    /// sentinel
    ///
    /// The remote DSL cannot express "unestimated" directly, so the feature
    /// half is filtered client-side on `estimate == -1`. Two round-trips by
    /// construction.
    pub fn unestimated_stories(&self, project: &Project) -> Result<Vec<Story>, SdkError> {
        let mut stories = self.open_bugs(project)?;
        let features = self.stories(project, FILTER_UNSTARTED_FEATURES)?;
        stories.extend(
            features
                .into_iter()
                .filter(|story| story.estimate == Some(UNESTIMATED)),
        );
        Ok(stories)
    }

    /// Bugs that have not been started
    pub fn open_bugs(&self, project: &Project) -> Result<Vec<Story>, SdkError> {
        self.stories(project, FILTER_OPEN_BUGS)
    }

    /// Stories currently started or bounced back by a rejection
    pub fn in_progress_stories(&self, project: &Project) -> Result<Vec<Story>, SdkError> {
        self.stories(project, FILTER_IN_PROGRESS)
    }

    /// Features finished or delivered but not yet accepted
    pub fn finished_features(&self, project: &Project) -> Result<Vec<Story>, SdkError> {
        self.stories(project, FILTER_FINISHED_FEATURES)
    }

    /// Bugs finished or delivered but not yet accepted
    pub fn finished_bugs(&self, project: &Project) -> Result<Vec<Story>, SdkError> {
        self.stories(project, FILTER_FINISHED_BUGS)
    }

    /// Bugs anywhere in the open part of the workflow
    pub fn known_issues(&self, project: &Project) -> Result<Vec<Story>, SdkError> {
        self.stories(project, FILTER_KNOWN_ISSUES)
    }

    /// Fetch a single story, or `None` if the service reports 404
    ///
    /// This is the one place a transport error code becomes a normal
    /// result; every other non-2xx status propagates.
    pub fn load_story(&self, project: &Project, story_id: i64) -> Result<Option<Story>, SdkError> {
        let url = self.story_url(project.project_id, story_id);
        match self.transport.get(&url) {
            Ok(node) => Ok(Some(Story::from_json(&node)?)),
            Err(SdkError::Http { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Create a story in a project. Fire-and-forget: the acknowledgement is
    /// discarded and no entity is constructed from it.
    pub fn create_story(&self, project: &Project, story: &NewStory) -> Result<(), SdkError> {
        let url = format!(
            "{}/projects/{}/stories",
            self.transport.base_url, project.project_id
        );
        self.transport.post(&url, story)?;
        Ok(())
    }

    /// PUT a partial update to a story's resource URL
    ///
    /// Returns the raw acknowledgement body. The passed-in snapshot is NOT
    /// refreshed; re-fetch for current state.
    pub fn update_story(&self, story: &Story, update: &StoryUpdate) -> Result<Value, SdkError> {
        let url = self.story_url(story.project_id, story.story_id);
        self.transport.put(&url, update)
    }

    /// Change a story's estimate
    pub fn assign_estimate(&self, story: &Story, estimate: i64) -> Result<Value, SdkError> {
        self.update_story(
            story,
            &StoryUpdate {
                estimate: Some(estimate),
                ..StoryUpdate::default()
            },
        )
    }

    /// Move a story to the given workflow state
    pub fn set_state(&self, story: &Story, state: StoryState) -> Result<Value, SdkError> {
        self.update_story(
            story,
            &StoryUpdate {
                current_state: Some(state),
                ..StoryUpdate::default()
            },
        )
    }

    /// Start a story. Fails before any network call if it is unestimated.
    pub fn start(&self, story: &Story) -> Result<Value, SdkError> {
        self.require_estimated(story)?;
        self.set_state(story, StoryState::Started)
    }

    /// Finish a story. Fails before any network call if it is unestimated.
    pub fn finish(&self, story: &Story) -> Result<Value, SdkError> {
        self.require_estimated(story)?;
        self.set_state(story, StoryState::Finished)
    }

    /// Deliver a story. Fails before any network call if it is unestimated.
    pub fn deliver(&self, story: &Story) -> Result<Value, SdkError> {
        self.require_estimated(story)?;
        self.set_state(story, StoryState::Delivered)
    }

    /// Accept a delivered story
    pub fn accept(&self, story: &Story) -> Result<Value, SdkError> {
        self.set_state(story, StoryState::Accepted)
    }

    /// Reject a delivered story
    pub fn reject(&self, story: &Story) -> Result<Value, SdkError> {
        self.set_state(story, StoryState::Rejected)
    }

    // ---------------------------------------------------------------------
    // Cross-project lookup
    // ---------------------------------------------------------------------

    /// Find the project that owns a story by scanning every accessible
    /// project in order
    ///
    /// Costs one `load_story` round-trip per project until the first hit:
    /// O(number of projects) remote calls in the worst case.
    pub fn find_project_for_story(&self, story_id: i64) -> Result<Option<Project>, SdkError> {
        for project in self.projects()? {
            if self.load_story(&project, story_id)?.is_some() {
                return Ok(Some(project));
            }
        }

        tracing::debug!("no project found for story #{}", story_id);
        Ok(None)
    }

    /// Load a story by ID, optionally pinned to a project by its position
    /// in the [`projects`](Self::projects) listing
    ///
    /// With `project_index` this is a single lookup; without it the scan in
    /// [`find_project_for_story`](Self::find_project_for_story) runs first
    /// (up to N+1 calls).
    pub fn find_story(
        &self,
        story_id: i64,
        project_index: Option<usize>,
    ) -> Result<Option<Story>, SdkError> {
        let project = match project_index {
            Some(index) => self.projects()?.into_iter().nth(index),
            None => self.find_project_for_story(story_id)?,
        };

        match project {
            Some(project) => self.load_story(&project, story_id),
            None => Ok(None),
        }
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    fn require_estimated(&self, story: &Story) -> Result<(), SdkError> {
        if story.estimate == Some(UNESTIMATED) {
            return Err(SdkError::InvalidState(format!(
                "story #{} must be estimated first",
                story.story_id
            )));
        }
        Ok(())
    }

    fn story_url(&self, project_id: i64, story_id: i64) -> String {
        format!(
            "{}/projects/{}/stories/{}",
            self.transport.base_url, project_id, story_id
        )
    }

    fn stories_url(&self, project_id: i64, filter: &str) -> Result<Url, SdkError> {
        let base = format!(
            "{}/projects/{}/stories",
            self.transport.base_url, project_id
        );
        Url::parse_with_params(&base, &[("filter", filter)])
            .map_err(|e| SdkError::Connection(format!("Invalid request URL: {}", e)))
    }
}
