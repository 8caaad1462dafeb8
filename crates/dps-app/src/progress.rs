#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LoadingScenario,
    BuildingEngine,
    Running,
    Completed,
}

impl RunStage {
    pub fn label(self) -> &'static str {
        match self {
            RunStage::LoadingScenario => "loading scenario",
            RunStage::BuildingEngine => "building engine",
            RunStage::Running => "running",
            RunStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    /// Clock ticks attempted so far.
    pub tick: usize,
    pub ticks_total: usize,
    /// Current time index of the engine.
    pub t: usize,
    pub message: Option<String>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            tick: 0,
            ticks_total: 0,
            t: 0,
            message,
        }
    }

    pub fn fraction_complete(&self) -> f64 {
        if self.ticks_total == 0 {
            return 0.0;
        }
        self.tick as f64 / self.ticks_total as f64
    }
}
