//! Audio engine status and load options

/// Options passed to `AudioEngine::load`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    /// Initial output volume (0.0 - 1.0)
    pub volume: f32,

    /// Start playing as soon as the resource is ready
    pub autoplay: bool,
}

/// Status report delivered by an `AudioHandle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackStatus {
    /// Current position in milliseconds
    pub position_ms: u64,

    /// Total duration in milliseconds (0 until known)
    pub duration_ms: u64,

    /// Whether the resource is loaded
    pub is_loaded: bool,

    /// Playback reached the end in this report
    pub just_finished: bool,

    /// The engine loops the resource on its own
    pub is_looping: bool,
}

impl PlaybackStatus {
    /// Position update for a loaded resource
    pub fn progress(position_ms: u64, duration_ms: u64) -> Self {
        Self {
            position_ms,
            duration_ms,
            is_loaded: true,
            just_finished: false,
            is_looping: false,
        }
    }

    /// Terminal report for a resource that played to the end
    pub fn finished(duration_ms: u64) -> Self {
        Self {
            position_ms: duration_ms,
            duration_ms,
            is_loaded: true,
            just_finished: true,
            is_looping: false,
        }
    }

    /// Finished naturally and the engine will not loop it
    pub fn ended(&self) -> bool {
        self.is_loaded && self.just_finished && !self.is_looping
    }
}
