use prguard_types::RepoPath;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Files modified by the pull request, in the order the platform reported them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    paths: Vec<RepoPath>,
}

impl ChangeSet {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            paths: paths.into_iter().map(RepoPath::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// First path containing `needle` anywhere in it (substring, not segment, match).
    pub fn find_containing(&self, needle: &str) -> Option<&RepoPath> {
        self.paths.iter().find(|p| p.contains(needle))
    }

    /// Whether some path is exactly `path` after normalization.
    pub fn contains_exact(&self, path: &str) -> bool {
        let wanted = RepoPath::new(path);
        self.paths.iter().any(|p| *p == wanted)
    }
}

/// The PR author's relationship to the repository, as assigned by the platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorAssociation {
    Collaborator,
    Contributor,
    FirstTimer,
    FirstTimeContributor,
    Mannequin,
    Member,
    /// The platform's `NONE`: no relationship at all.
    NoAssociation,
    Owner,
    Unknown(String),
}

impl AuthorAssociation {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Collaborator => "COLLABORATOR",
            Self::Contributor => "CONTRIBUTOR",
            Self::FirstTimer => "FIRST_TIMER",
            Self::FirstTimeContributor => "FIRST_TIME_CONTRIBUTOR",
            Self::Mannequin => "MANNEQUIN",
            Self::Member => "MEMBER",
            Self::NoAssociation => "NONE",
            Self::Owner => "OWNER",
            Self::Unknown(raw) => raw,
        }
    }

    /// `FIRST_TIME_CONTRIBUTOR` and `NONE` are welcomed; `FIRST_TIMER` is not.
    pub fn is_welcomed(&self) -> bool {
        matches!(self, Self::FirstTimeContributor | Self::NoAssociation)
    }
}

impl FromStr for AuthorAssociation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "COLLABORATOR" => Self::Collaborator,
            "CONTRIBUTOR" => Self::Contributor,
            "FIRST_TIMER" => Self::FirstTimer,
            "FIRST_TIME_CONTRIBUTOR" => Self::FirstTimeContributor,
            "MANNEQUIN" => Self::Mannequin,
            "MEMBER" => Self::Member,
            "NONE" => Self::NoAssociation,
            "OWNER" => Self::Owner,
            other => Self::Unknown(other.to_string()),
        })
    }
}

impl fmt::Display for AuthorAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinates of the pull request on the hosting platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl fmt::Display for PrRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrMetadata {
    pub author: String,
    pub association: AuthorAssociation,
    pub merged: bool,
    pub pr: PrRef,
}

/// Aggregate merge statistics served by the contributor stats API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct ContributorStats {
    #[serde(rename = "mergedPRsCount")]
    pub merged_prs_count: u32,
    pub rank: u32,
}

/// Everything a single evaluation looks at.
#[derive(Clone, Debug, Default)]
pub struct PrContext {
    pub changes: ChangeSet,
    /// `None` when the run has no pull request event (e.g. a local dry run).
    pub pr: Option<PrMetadata>,
}
