#[derive(Debug, Clone)]
pub enum Message {
    // === SESSION MESSAGES ===
    Welcome,
    SessionActivated,
    MotionIdleTimerReset,
    GoingIdle(u64), // idle timeout in seconds
    SessionEndedByShutdown,
    IdleFrame(usize), // dot count
    Goodbye,

    // === BREAK MESSAGES ===
    BreakStarted,
    BreakEnded,
    OnBreak,
    BreakScheduled,
    InvalidTransition {
        action: String,
        state: String,
    },

    // === SENSOR MESSAGES ===
    SensorReading {
        temperature_c: f64,
        humidity_pct: f64,
        lux: f64,
    },
    AcquisitionFailed(String), // error message
    SensorWarning(u32),        // consecutive failures
    SensorWorkerStopped,
    PersistenceFailed(String), // error message

    // === SUMMARY MESSAGES ===
    SummaryHeader,
    SummaryTotalTime(u64, u64), // minutes, seconds
    SummaryAverage {
        label: String,
        value: Option<f64>,
        unit: String,
    },

    // === SUGGESTION MESSAGES ===
    SuggestionsHeader,
    NoSuggestions,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDefaultsSaved,
    ConfigModuleEngine,

    // === WATCH/EVENT LOOP MESSAGES ===
    WatchStarted {
        sample_interval: u64,
        idle_timeout: u64,
        break_duration: u64,
    },
    WatchControls,
    WatchShuttingDown,
    WatchReceivedCtrlC,
    WatchCtrlCListenFailed(String), // error message
    WatchUnknownInput(String),
    WatchStdinClosed,
    EventLoopExitedNormally,
    EventLoopError(String),    // error message
    EventLoopPanicked(String), // error message
    EngineStopped,

    // === READINGS MESSAGES ===
    ReadingsHeader(usize), // count
    NoReadingsFound,
    DbConnectionFailed,

    // === PROMPTS ===
    PromptSampleInterval,
    PromptIdleTimeout,
    PromptBreakDuration,
    PromptBreakStep,
    PromptTickInterval,
    PromptSensorTimeout,
}
