//! Core data model types for pawfect evaluations.
//!
//! The heuristic and walkthrough-step keys are closed enums: every store is
//! backed by a fixed-size array indexed by these keys, so a store can never
//! hold a partial key set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EvaluationError;

// ---------------------------------------------------------------------------
// Heuristics
// ---------------------------------------------------------------------------

/// One of Nielsen's ten usability heuristics, numbered 1 through 10.
///
/// Serialized as its number, so a heuristics map is keyed `"1".."10"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum HeuristicId {
    VisibilityOfSystemStatus = 1,
    MatchWithRealWorld = 2,
    UserControlAndFreedom = 3,
    ConsistencyAndStandards = 4,
    ErrorPrevention = 5,
    RecognitionOverRecall = 6,
    FlexibilityAndEfficiency = 7,
    AestheticAndMinimalistDesign = 8,
    ErrorRecovery = 9,
    HelpAndDocumentation = 10,
}

impl HeuristicId {
    /// Number of heuristics.
    pub const COUNT: usize = 10;

    /// All heuristics in display order.
    pub const ALL: [HeuristicId; Self::COUNT] = [
        HeuristicId::VisibilityOfSystemStatus,
        HeuristicId::MatchWithRealWorld,
        HeuristicId::UserControlAndFreedom,
        HeuristicId::ConsistencyAndStandards,
        HeuristicId::ErrorPrevention,
        HeuristicId::RecognitionOverRecall,
        HeuristicId::FlexibilityAndEfficiency,
        HeuristicId::AestheticAndMinimalistDesign,
        HeuristicId::ErrorRecovery,
        HeuristicId::HelpAndDocumentation,
    ];

    /// The heuristic's number (1-based).
    pub fn number(self) -> u8 {
        self as u8
    }

    pub(crate) fn index(self) -> usize {
        self as usize - 1
    }

    /// Human-readable heuristic name.
    pub fn title(self) -> &'static str {
        match self {
            HeuristicId::VisibilityOfSystemStatus => "Visibility of System Status",
            HeuristicId::MatchWithRealWorld => "Match Between System and Real World",
            HeuristicId::UserControlAndFreedom => "User Control and Freedom",
            HeuristicId::ConsistencyAndStandards => "Consistency and Standards",
            HeuristicId::ErrorPrevention => "Error Prevention",
            HeuristicId::RecognitionOverRecall => "Recognition Rather Than Recall",
            HeuristicId::FlexibilityAndEfficiency => "Flexibility and Efficiency of Use",
            HeuristicId::AestheticAndMinimalistDesign => "Aesthetic and Minimalist Design",
            HeuristicId::ErrorRecovery => {
                "Help Users Recognize, Diagnose, and Recover from Errors"
            }
            HeuristicId::HelpAndDocumentation => "Help and Documentation",
        }
    }

    /// Rating the store is seeded with.
    pub fn seed_rating(self) -> Rating {
        match self {
            HeuristicId::MatchWithRealWorld
            | HeuristicId::ConsistencyAndStandards
            | HeuristicId::RecognitionOverRecall
            | HeuristicId::AestheticAndMinimalistDesign => Rating::Excellent,
            HeuristicId::HelpAndDocumentation => Rating::NeedsImprovement,
            _ => Rating::Good,
        }
    }

    /// Observation notes the store is seeded with.
    pub fn seed_notes(self) -> &'static str {
        match self {
            HeuristicId::VisibilityOfSystemStatus => "Active navigation states clearly indicate current page location. Toast notifications provide immediate feedback for user actions.",
            HeuristicId::MatchWithRealWorld => "Pet adoption terminology is familiar and intuitive. Icons (paw prints, animals) align with user mental models.",
            HeuristicId::UserControlAndFreedom => "Clear navigation allows users to move freely between sections. Mobile menu provides easy exit with X icon.",
            HeuristicId::ConsistencyAndStandards => "Consistent design system with unified color palette, rounded corners, and button styles throughout all pages.",
            HeuristicId::ErrorPrevention => "Form validation prevents submission of empty fields. Clear input placeholders guide users on expected input format.",
            HeuristicId::RecognitionOverRecall => "Visual icons and clear labels reduce memory load. Pet cards display all relevant information at a glance.",
            HeuristicId::FlexibilityAndEfficiency => "Quick search bar on homepage provides efficient access. Direct navigation links serve both new and experienced users.",
            HeuristicId::AestheticAndMinimalistDesign => "Clean, warm design with purposeful use of space. Warm orange tones create emotional connection without overwhelming users.",
            HeuristicId::ErrorRecovery => "Error messages are clear and descriptive. Toast notifications explain what went wrong and guide correction.",
            HeuristicId::HelpAndDocumentation => "Contact page provides support access. Could benefit from FAQ section or inline help tooltips for complex features.",
        }
    }
}

impl From<HeuristicId> for u8 {
    fn from(id: HeuristicId) -> Self {
        id.number()
    }
}

impl TryFrom<u8> for HeuristicId {
    type Error = EvaluationError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1..=10 => Ok(HeuristicId::ALL[n as usize - 1]),
            other => Err(EvaluationError::UnknownHeuristic(other.to_string())),
        }
    }
}

impl fmt::Display for HeuristicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for HeuristicId {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| EvaluationError::UnknownHeuristic(s.to_string()))
            .and_then(HeuristicId::try_from)
    }
}

/// Rating assigned to a heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    Excellent,
    Good,
    NeedsImprovement,
    Poor,
    NotRated,
}

impl Rating {
    /// Wire name (e.g. "needs-improvement").
    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Excellent => "excellent",
            Rating::Good => "good",
            Rating::NeedsImprovement => "needs-improvement",
            Rating::Poor => "poor",
            Rating::NotRated => "not-rated",
        }
    }

    /// Badge label shown next to a heuristic.
    pub fn label(self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::NeedsImprovement => "Needs Improvement",
            Rating::Poor => "Poor",
            Rating::NotRated => "Not Rated",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "excellent" => Ok(Rating::Excellent),
            "good" => Ok(Rating::Good),
            "needs-improvement" => Ok(Rating::NeedsImprovement),
            "poor" => Ok(Rating::Poor),
            "not-rated" | "none" => Ok(Rating::NotRated),
            _ => Err(EvaluationError::UnknownRating(s.to_string())),
        }
    }
}

/// The recorded assessment of one heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicRating {
    pub id: HeuristicId,
    pub rating: Rating,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub checked: bool,
}

impl HeuristicRating {
    /// The pre-seeded entry for a heuristic.
    pub fn seeded(id: HeuristicId) -> Self {
        Self {
            id,
            rating: id.seed_rating(),
            notes: id.seed_notes().to_string(),
            checked: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Cognitive walkthrough
// ---------------------------------------------------------------------------

/// One of the three user journeys covered by the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WalkthroughTask {
    FindingAPet = 1,
    ContactingAboutAPet = 2,
    CreatingAnAccount = 3,
}

impl WalkthroughTask {
    pub const ALL: [WalkthroughTask; 3] = [
        WalkthroughTask::FindingAPet,
        WalkthroughTask::ContactingAboutAPet,
        WalkthroughTask::CreatingAnAccount,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            WalkthroughTask::FindingAPet => "Finding and Viewing a Pet",
            WalkthroughTask::ContactingAboutAPet => "Contacting About a Pet",
            WalkthroughTask::CreatingAnAccount => "Creating an Account",
        }
    }

    /// The four steps of this task, in order.
    pub fn steps(self) -> &'static [StepId] {
        static STEPS: [StepId; StepId::COUNT] = StepId::ALL;
        let start = (self.number() as usize - 1) * StepId::PER_TASK;
        &STEPS[start..start + StepId::PER_TASK]
    }
}

impl fmt::Display for WalkthroughTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task {}: {}", self.number(), self.title())
    }
}

/// A single walkthrough step, keyed `task<N>-<M>`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum StepId {
    #[serde(rename = "task1-1")]
    Task1Step1,
    #[serde(rename = "task1-2")]
    Task1Step2,
    #[serde(rename = "task1-3")]
    Task1Step3,
    #[serde(rename = "task1-4")]
    Task1Step4,
    #[serde(rename = "task2-1")]
    Task2Step1,
    #[serde(rename = "task2-2")]
    Task2Step2,
    #[serde(rename = "task2-3")]
    Task2Step3,
    #[serde(rename = "task2-4")]
    Task2Step4,
    #[serde(rename = "task3-1")]
    Task3Step1,
    #[serde(rename = "task3-2")]
    Task3Step2,
    #[serde(rename = "task3-3")]
    Task3Step3,
    #[serde(rename = "task3-4")]
    Task3Step4,
}

impl StepId {
    pub const COUNT: usize = 12;
    const PER_TASK: usize = 4;

    pub const ALL: [StepId; Self::COUNT] = [
        StepId::Task1Step1,
        StepId::Task1Step2,
        StepId::Task1Step3,
        StepId::Task1Step4,
        StepId::Task2Step1,
        StepId::Task2Step2,
        StepId::Task2Step3,
        StepId::Task2Step4,
        StepId::Task3Step1,
        StepId::Task3Step2,
        StepId::Task3Step3,
        StepId::Task3Step4,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn task(self) -> WalkthroughTask {
        WalkthroughTask::ALL[self.index() / Self::PER_TASK]
    }

    /// 1-based position within its task.
    pub fn step_number(self) -> u8 {
        (self.index() % Self::PER_TASK) as u8 + 1
    }

    /// Map key, e.g. "task2-3".
    pub fn key(self) -> String {
        format!("task{}-{}", self.task().number(), self.step_number())
    }

    pub fn title(self) -> &'static str {
        match self {
            StepId::Task1Step1 => "User lands on homepage",
            StepId::Task1Step2 => "User identifies how to browse pets",
            StepId::Task1Step3 => "User navigates to Browse page",
            StepId::Task1Step4 => "User views available pets",
            StepId::Task2Step1 => "User wants to inquire about a pet",
            StepId::Task2Step2 => "User navigates to contact page",
            StepId::Task2Step3 => "User fills out form",
            StepId::Task2Step4 => "User submits message",
            StepId::Task3Step1 => "User wants to save favorite pets",
            StepId::Task3Step2 => "User realizes they need to sign up",
            StepId::Task3Step3 => "User fills signup form",
            StepId::Task3Step4 => "User completes signup",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for StepId {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || EvaluationError::UnknownStep(s.to_string());
        let rest = s.trim().strip_prefix("task").ok_or_else(unknown)?;
        let (task, step) = rest.split_once('-').ok_or_else(unknown)?;
        let task: usize = task.parse().map_err(|_| unknown())?;
        let step: usize = step.parse().map_err(|_| unknown())?;
        if !(1..=3).contains(&task) || !(1..=Self::PER_TASK).contains(&step) {
            return Err(unknown());
        }
        Ok(StepId::ALL[(task - 1) * Self::PER_TASK + (step - 1)])
    }
}

/// The recorded state of one walkthrough step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CognitiveStep {
    pub id: StepId,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
}

impl CognitiveStep {
    pub fn seeded(id: StepId) -> Self {
        Self {
            id,
            completed: false,
            notes: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Usability testing
// ---------------------------------------------------------------------------

/// Scripted scenario a usability-test participant is asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    #[default]
    PetDiscovery,
    ContactInquiry,
    AccountCreation,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::PetDiscovery,
        Scenario::ContactInquiry,
        Scenario::AccountCreation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::PetDiscovery => "pet-discovery",
            Scenario::ContactInquiry => "contact-inquiry",
            Scenario::AccountCreation => "account-creation",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Scenario::PetDiscovery => "Pet Discovery",
            Scenario::ContactInquiry => "Information Request",
            Scenario::AccountCreation => "Account Creation",
        }
    }

    /// The task statement read to the participant.
    pub fn task(self) -> &'static str {
        match self {
            Scenario::PetDiscovery => {
                "You're looking to adopt a dog. Find and view available dogs on the site."
            }
            Scenario::ContactInquiry => {
                "You found a pet you like. Send a message asking about adoption requirements."
            }
            Scenario::AccountCreation => "Create an account to save your favorite pets.",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "pet-discovery" => Ok(Scenario::PetDiscovery),
            "contact-inquiry" | "information-request" => Ok(Scenario::ContactInquiry),
            "account-creation" => Ok(Scenario::AccountCreation),
            _ => Err(EvaluationError::UnknownScenario(s.to_string())),
        }
    }
}

/// One observed usability-test session. Immutable once logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsabilityTestRecord {
    pub id: String,
    pub participant: String,
    pub scenario: Scenario,
    pub time_to_complete: String,
    pub clicks: u32,
    pub success: bool,
    #[serde(default)]
    pub notes: String,
}

/// Pending form values for the next usability-test record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestDraft {
    pub participant: String,
    pub scenario: Scenario,
    /// Seconds, as typed.
    pub time_to_complete: String,
    pub clicks: u32,
    pub success: bool,
    pub notes: String,
}

impl TestDraft {
    pub fn new(participant: &str, scenario: Scenario, time_to_complete: &str) -> Self {
        Self {
            participant: participant.to_string(),
            scenario,
            time_to_complete: time_to_complete.to_string(),
            ..Default::default()
        }
    }

    pub fn with_clicks(mut self, clicks: u32) -> Self {
        self.clicks = clicks;
        self
    }

    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }
}
