#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LoadingExperiment,
    CheckingCache,
    LoadingCachedResult,
    Reducing,
    SavingResults,
    Completed,
}

impl RunStage {
    pub fn label(self) -> &'static str {
        match self {
            Self::LoadingExperiment => "loading experiment",
            Self::CheckingCache => "checking cache",
            Self::LoadingCachedResult => "loading cached run",
            Self::Reducing => "reducing",
            Self::SavingResults => "saving",
            Self::Completed => "done",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
        }
    }
}
