/// Caller-supplied description of one attendee's negotiation session.
#[derive(Debug, Clone)]
pub struct SessionConfiguration {
    pub attendee_id: String,
    pub audio_host_url: String,
    pub runtime: RuntimeFamily,
    pub enable_simulcast: bool,
}

/// Capability flags of the runtime the session runs on. The negotiation
/// core never sniffs its environment, callers describe it up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeFamily {
    pub requires_compatibility_rewrite: bool,
    pub requires_strict_subscription_order: bool,
    pub uses_alternate_bandwidth_unit: bool,
}

impl RuntimeFamily {
    pub fn chromium() -> Self {
        RuntimeFamily {
            requires_compatibility_rewrite: true,
            requires_strict_subscription_order: false,
            uses_alternate_bandwidth_unit: false,
        }
    }

    pub fn gecko() -> Self {
        RuntimeFamily {
            requires_compatibility_rewrite: false,
            requires_strict_subscription_order: true,
            uses_alternate_bandwidth_unit: true,
        }
    }

    pub fn webkit() -> Self {
        RuntimeFamily {
            requires_compatibility_rewrite: true,
            requires_strict_subscription_order: true,
            uses_alternate_bandwidth_unit: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoDuplexMode {
    Receive,
    Send,
    Duplex,
}

impl VideoDuplexMode {
    pub fn is_sending(&self) -> bool {
        match self {
            VideoDuplexMode::Send | VideoDuplexMode::Duplex => true,
            VideoDuplexMode::Receive => false,
        }
    }
}
