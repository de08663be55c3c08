/// The request-processing pipeline
///
/// Raw text flows through classification, per-candidate validation and
/// dispatch, and finally reply assembly. The engine owns nothing but an
/// immutable registry, so a single instance can serve concurrent callers.

pub mod batch;
pub mod dispatcher;
pub mod envelope;
pub mod validator;

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::protocol::{Reply, ResponseEnvelope};
use crate::registry::{MethodRegistry, ModuleResolver, RegistryError};
use batch::Mode;
use envelope::Envelope;

/// JSON-RPC 2.0 engine bound to one method registry
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<MethodRegistry>,
    /// Log every inbound payload and outbound envelope
    trace_payloads: bool,
}

impl Engine {
    /// Create an engine over a registry that was built directly
    pub fn new(registry: MethodRegistry) -> Self {
        info!("Loaded with methods: {}", registry.method_names().join(","));
        Self {
            registry: Arc::new(registry),
            trace_payloads: false,
        }
    }

    /// Create an engine over a registry resolved by module name
    pub fn from_module<R>(resolver: &R, module: &str) -> Result<Self, RegistryError>
    where
        R: ModuleResolver + ?Sized,
    {
        debug!("Resolving method module: {}", module);
        Ok(Self::new(resolver.resolve(module)?))
    }

    /// Enable or disable `-->`/`<--` payload tracing
    pub fn with_payload_tracing(mut self, enabled: bool) -> Self {
        self.trace_payloads = enabled;
        self
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Process raw input and return the serialized reply, if any
    pub fn process(&self, raw: &str) -> Option<String> {
        self.process_bytes(raw.as_bytes())
    }

    /// Process raw bytes; input that is not UTF-8 is answered with a parse error
    pub fn process_bytes(&self, raw: &[u8]) -> Option<String> {
        let reply = self.handle_bytes(raw)?;
        serde_json::to_string(&reply)
            .map_err(|e| error!("Failed to serialize reply: {}", e))
            .ok()
    }

    /// Process raw input and return the structured reply, if any
    pub fn handle(&self, raw: &str) -> Option<Reply> {
        self.handle_bytes(raw.as_bytes())
    }

    /// Structured reply for raw bytes
    pub fn handle_bytes(&self, raw: &[u8]) -> Option<Reply> {
        self.trace_inbound(raw);

        let (mode, candidates) = match envelope::classify_slice(raw) {
            Ok(Envelope::Single(candidate)) => (Mode::Single, vec![candidate]),
            Ok(Envelope::Batch(candidates)) => (Mode::Batch, candidates),
            Err(rejection) => {
                self.trace_outbound(&rejection);
                return Some(Reply::Single(rejection));
            }
        };

        let outcomes = candidates
            .into_iter()
            .filter_map(|candidate| self.handle_candidate(candidate))
            .collect();

        batch::assemble(mode, outcomes)
    }

    /// Validate and dispatch one candidate. Notifications run for effect
    /// but never yield an envelope.
    fn handle_candidate(&self, candidate: Value) -> Option<ResponseEnvelope> {
        let notification = envelope::is_notification(&candidate);

        let outcome = match validator::validate(candidate, &self.registry) {
            Ok(call) => dispatcher::dispatch(call),
            Err(rejection) => rejection,
        };

        if notification {
            match outcome.error_object() {
                Some(error) => debug!("Dropped notification error: {} {:?}", error.message, error.data),
                None => debug!("Notification handled"),
            }
            return None;
        }

        self.trace_outbound(&outcome);
        Some(outcome)
    }

    fn trace_inbound(&self, raw: &[u8]) {
        if self.trace_payloads {
            debug!("--> {}", String::from_utf8_lossy(raw));
        }
    }

    fn trace_outbound(&self, envelope: &ResponseEnvelope) {
        if self.trace_payloads {
            match serde_json::to_string(envelope) {
                Ok(text) => debug!("<-- {}", text),
                Err(e) => debug!("<-- <unserializable envelope: {}>", e),
            }
        }
    }
}
